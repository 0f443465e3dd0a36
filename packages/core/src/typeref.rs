//! Structural type descriptors used as codec-table keys.

use serde::{Deserialize, Serialize};

use crate::qname::QName;

/// Identifies a structural type referenced by an operation parameter or a
/// declared fault. The codec generator produces exactly one codec per
/// distinct descriptor, and the finalized type context is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Element name the type is bound to on the wire.
    pub element_name: QName,
    /// Name of the structural type in the host type system.
    pub type_name: String,
}

impl TypeDescriptor {
    /// Create a type descriptor.
    #[must_use]
    pub fn new(element_name: QName, type_name: impl Into<String>) -> Self {
        Self {
            element_name,
            type_name: type_name.into(),
        }
    }
}
