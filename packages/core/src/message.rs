//! Inbound-message introspection consumed by operation finders.

use crate::contract::AddressingVersion;
use crate::qname::{QName, EMPTY_PAYLOAD_NSURI};

/// Minimal view of an inbound request message.
///
/// The transport layer implements this over its envelope representation.
/// Finders need exactly two things: the addressing action (when addressing
/// headers are present for the negotiated version) and the name of the
/// body's top-level element.
pub trait InboundMessage {
    /// Addressing action carried in the message headers, for the given
    /// addressing version. `None` means addressing is not in effect for
    /// this message.
    fn addressing_action(&self, version: AddressingVersion) -> Option<String>;

    /// Namespace URI of the body's top-level element, if the element is
    /// qualified.
    fn payload_namespace_uri(&self) -> Option<&str>;

    /// Local name of the body's top-level element; `None` when the body is
    /// empty.
    fn payload_local_part(&self) -> Option<&str>;
}

/// Payload name of a message under the empty-payload sentinel rules: an
/// empty body yields [`QName::empty_payload`], and an unqualified element
/// gets [`EMPTY_PAYLOAD_NSURI`] substituted for its namespace.
#[must_use]
pub fn payload_qname(message: &dyn InboundMessage) -> QName {
    match message.payload_local_part() {
        None => QName::empty_payload(),
        Some(local_part) => {
            let namespace = message.payload_namespace_uri().unwrap_or(EMPTY_PAYLOAD_NSURI);
            QName::new(namespace, local_part)
        }
    }
}
