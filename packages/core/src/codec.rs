//! Codec seams: generated per-type serializers and their one-shot generator.
//!
//! Envelope encoding is the serializer layer's concern. Dispatch only needs
//! the type identity each codec covers and the namespace it reports, which
//! is enough to build the codec table and derive the known-namespace set.

use std::sync::Arc;

use thiserror::Error;

use crate::typeref::TypeDescriptor;

/// Errors surfaced by codec generation or codec-set lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The schema compiler rejected the referenced types.
    #[error("schema generation failed: {reason}")]
    Generation {
        /// Cause reported by the generator.
        reason: String,
    },
    /// The generator run did not cover the requested type.
    #[error("no codec generated for type {type_name}")]
    UnknownType {
        /// Name of the uncovered type.
        type_name: String,
    },
}

/// A generated serializer/deserializer handle for one structural type.
pub trait Codec: Send + Sync {
    /// The structural type this codec covers.
    fn type_descriptor(&self) -> &TypeDescriptor;

    /// Namespace the generated schema places this type in.
    fn namespace_uri(&self) -> &str;
}

/// Product of one generator run: per-type codec lookup plus the set of
/// namespaces the generated schema covers.
pub trait CodecSet: Send + Sync {
    /// Look up the codec for a type included in the generator run.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownType`] if the run did not cover `ty`.
    fn codec_for(&self, ty: &TypeDescriptor) -> Result<Arc<dyn Codec>, CodecError>;

    /// All namespace URIs the generated schema covers, built-ins included.
    fn namespaces(&self) -> Vec<String>;
}

/// External schema-compiler seam. Invoked synchronously, exactly once per
/// service model, during startup; never on a request path.
pub trait CodecGenerator: Send + Sync {
    /// Run the schema compiler over every type the model references.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Generation`] when compilation fails; the
    /// caller treats this as a fatal startup error.
    fn generate(&self, types: &[TypeDescriptor]) -> Result<Box<dyn CodecSet>, CodecError>;
}
