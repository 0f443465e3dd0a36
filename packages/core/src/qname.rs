//! Namespace-qualified names for operations, payload elements, and faults.
//!
//! Rendering follows Clark notation (`{namespace}local`) so names are
//! unambiguous in logs and diagnostics. The empty-payload sentinel values
//! here are the keys used for bodiless requests: a request with no body
//! element dispatches under [`QName::empty_payload`], and a body element
//! with no namespace gets [`EMPTY_PAYLOAD_NSURI`] substituted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// XML namespace URIs built into every schema. Codecs report these along
/// with service namespaces; the known-namespace derivation excludes them.
pub mod xmlns {
    /// XML Schema namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";
    /// XML namespace-declaration namespace.
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
}

/// Namespace substituted when an inbound payload element has no namespace.
pub const EMPTY_PAYLOAD_NSURI: &str = "";

/// Local part of the empty-payload sentinel name.
pub const EMPTY_PAYLOAD_LOCAL: &str = "";

/// A namespace-qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    /// Namespace URI; empty for unqualified names.
    pub namespace_uri: String,
    /// Local part of the name.
    pub local_part: String,
}

impl QName {
    /// Create a qualified name.
    #[must_use]
    pub fn new(namespace_uri: impl Into<String>, local_part: impl Into<String>) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            local_part: local_part.into(),
        }
    }

    /// The sentinel name under which bodiless requests dispatch.
    #[must_use]
    pub fn empty_payload() -> Self {
        Self::new(EMPTY_PAYLOAD_NSURI, EMPTY_PAYLOAD_LOCAL)
    }

    /// Whether this is the empty-payload sentinel.
    #[must_use]
    pub fn is_empty_payload(&self) -> bool {
        self.namespace_uri.is_empty() && self.local_part.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            write!(f, "{}", self.local_part)
        } else {
            write!(f, "{{{}}}{}", self.namespace_uri, self.local_part)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_clark_notation() {
        let name = QName::new("urn:example", "Echo");
        assert_eq!(name.to_string(), "{urn:example}Echo");
    }

    #[test]
    fn display_of_unqualified_name_is_bare_local_part() {
        let name = QName::new("", "Echo");
        assert_eq!(name.to_string(), "Echo");
    }

    #[test]
    fn empty_payload_sentinel_round_trips() {
        let sentinel = QName::empty_payload();
        assert!(sentinel.is_empty_payload());
        assert!(!QName::new("urn:example", "Echo").is_empty_payload());
        assert_eq!(sentinel, QName::new(EMPTY_PAYLOAD_NSURI, EMPTY_PAYLOAD_LOCAL));
    }
}
