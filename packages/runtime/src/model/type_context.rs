//! One-shot immutable codec table for a finalized service model.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use soapwire_core::qname::xmlns;
use soapwire_core::{Codec, CodecGenerator, TypeDescriptor};

use crate::error::ModelBuildError;

/// Codec table plus the derived known-namespace set. Built exactly once
/// per service model and read-shared by request threads afterwards.
#[derive(Clone)]
pub struct TypeContext {
    codecs: HashMap<TypeDescriptor, Arc<dyn Codec>>,
    known_namespace_uris: Vec<String>,
}

impl TypeContext {
    /// Run the codec generator over `types` and build one codec per type.
    ///
    /// The known-namespace set is the generator's reported namespaces minus
    /// empty entries and the two XML built-in URIs.
    pub(crate) fn build(
        types: &[TypeDescriptor],
        generator: &dyn CodecGenerator,
    ) -> Result<Self, ModelBuildError> {
        let set = generator
            .generate(types)
            .map_err(ModelBuildError::CodecGeneration)?;

        let mut codecs = HashMap::with_capacity(types.len());
        for ty in types {
            let codec = set.codec_for(ty).map_err(ModelBuildError::CodecGeneration)?;
            codecs.insert(ty.clone(), codec);
        }

        let mut known_namespace_uris = Vec::new();
        for namespace in set.namespaces() {
            if namespace.is_empty() || namespace == xmlns::XSD || namespace == xmlns::XMLNS {
                continue;
            }
            if !known_namespace_uris.contains(&namespace) {
                known_namespace_uris.push(namespace);
            }
        }

        Ok(Self {
            codecs,
            known_namespace_uris,
        })
    }

    /// Codec for a type included in the generator run.
    #[must_use]
    pub fn codec(&self, ty: &TypeDescriptor) -> Option<&Arc<dyn Codec>> {
        self.codecs.get(ty)
    }

    /// Number of codecs in the table.
    #[must_use]
    pub fn codec_count(&self) -> usize {
        self.codecs.len()
    }

    /// Service namespaces covered by the generated schema.
    #[must_use]
    pub fn known_namespace_uris(&self) -> &[String] {
        &self.known_namespace_uris
    }
}

impl fmt::Debug for TypeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeContext")
            .field("codec_count", &self.codecs.len())
            .field("known_namespace_uris", &self.known_namespace_uris)
            .finish()
    }
}
