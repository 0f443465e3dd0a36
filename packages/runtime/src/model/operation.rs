//! Operation descriptors: the runtime view of one contract operation.

use std::fmt;

use soapwire_core::{MessageExchangePattern, Parameter, QName, TypeDescriptor, WrapperParameter};

/// Opaque identity of the handler implementing an operation. The host maps
/// it to whatever invocation target it uses (a method, a closure table
/// slot, a script entry point).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(String);

impl HandlerId {
    /// Create a handler identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared fault: the detail element's tag and its structural type.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultDescriptor {
    /// Tag name of the fault detail element.
    pub tag_name: QName,
    /// Structural type of the fault detail.
    pub detail_type: TypeDescriptor,
}

/// Runtime descriptor of one contract operation.
///
/// Built by the host's contract modeler, mutated once during model freeze
/// (binding resolution rewrites the wrappers and fills the attachment
/// lists), read-only afterwards.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    name: QName,
    handler: HandlerId,
    mep: MessageExchangePattern,
    input_action: Option<String>,
    request_payload_name: Option<QName>,
    request_wrapper: Option<WrapperParameter>,
    response_wrapper: Option<WrapperParameter>,
    faults: Vec<FaultDescriptor>,
    request_attachments: Vec<Parameter>,
    response_attachments: Vec<Parameter>,
}

impl OperationDescriptor {
    /// Create a descriptor with no payload, action, or parameters.
    #[must_use]
    pub fn new(name: QName, handler: HandlerId, mep: MessageExchangePattern) -> Self {
        Self {
            name,
            handler,
            mep,
            input_action: None,
            request_payload_name: None,
            request_wrapper: None,
            response_wrapper: None,
            faults: Vec::new(),
            request_attachments: Vec::new(),
            response_attachments: Vec::new(),
        }
    }

    /// Set the explicitly declared input action.
    #[must_use]
    pub fn with_input_action(mut self, action: impl Into<String>) -> Self {
        self.input_action = Some(action.into());
        self
    }

    /// Set the request payload element name.
    #[must_use]
    pub fn with_request_payload_name(mut self, name: QName) -> Self {
        self.request_payload_name = Some(name);
        self
    }

    /// Attach the request body wrapper.
    #[must_use]
    pub fn with_request_wrapper(mut self, wrapper: WrapperParameter) -> Self {
        self.request_wrapper = Some(wrapper);
        self
    }

    /// Attach the response body wrapper.
    #[must_use]
    pub fn with_response_wrapper(mut self, wrapper: WrapperParameter) -> Self {
        self.response_wrapper = Some(wrapper);
        self
    }

    /// Declare a fault.
    #[must_use]
    pub fn with_fault(mut self, fault: FaultDescriptor) -> Self {
        self.faults.push(fault);
        self
    }

    /// Contract operation name.
    #[must_use]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Handler identity.
    #[must_use]
    pub fn handler(&self) -> &HandlerId {
        &self.handler
    }

    /// Message exchange pattern.
    #[must_use]
    pub fn mep(&self) -> MessageExchangePattern {
        self.mep
    }

    /// Explicitly declared input action, if any.
    #[must_use]
    pub fn input_action(&self) -> Option<&str> {
        self.input_action.as_deref()
    }

    /// Request payload element name; `None` for bodiless requests.
    #[must_use]
    pub fn request_payload_name(&self) -> Option<&QName> {
        self.request_payload_name.as_ref()
    }

    /// Request body wrapper, in wire order after freeze.
    #[must_use]
    pub fn request_wrapper(&self) -> Option<&WrapperParameter> {
        self.request_wrapper.as_ref()
    }

    /// Response body wrapper, in wire order after freeze.
    #[must_use]
    pub fn response_wrapper(&self) -> Option<&WrapperParameter> {
        self.response_wrapper.as_ref()
    }

    /// Declared faults.
    #[must_use]
    pub fn faults(&self) -> &[FaultDescriptor] {
        &self.faults
    }

    /// Request parts bound as attachments, extracted at freeze.
    #[must_use]
    pub fn request_attachments(&self) -> &[Parameter] {
        &self.request_attachments
    }

    /// Response parts bound as attachments, extracted at freeze.
    #[must_use]
    pub fn response_attachments(&self) -> &[Parameter] {
        &self.response_attachments
    }

    /// Append every structural type this operation references: all wrapper
    /// children in both directions plus fault detail types.
    pub fn collect_types(&self, out: &mut Vec<TypeDescriptor>) {
        for wrapper in [&self.request_wrapper, &self.response_wrapper]
            .into_iter()
            .flatten()
        {
            for child in wrapper.children() {
                out.push(child.type_descriptor.clone());
            }
        }
        for attachment in self.request_attachments.iter().chain(&self.response_attachments) {
            out.push(attachment.type_descriptor.clone());
        }
        for fault in &self.faults {
            out.push(fault.detail_type.clone());
        }
    }

    pub(crate) fn request_wrapper_mut(&mut self) -> Option<&mut WrapperParameter> {
        self.request_wrapper.as_mut()
    }

    pub(crate) fn response_wrapper_mut(&mut self) -> Option<&mut WrapperParameter> {
        self.response_wrapper.as_mut()
    }

    pub(crate) fn set_request_attachments(&mut self, attachments: Vec<Parameter>) {
        self.request_attachments = attachments;
    }

    pub(crate) fn set_response_attachments(&mut self, attachments: Vec<Parameter>) {
        self.response_attachments = attachments;
    }
}

#[cfg(test)]
mod tests {
    use soapwire_core::Direction;

    use super::*;
    use crate::testutil::string_type;

    #[test]
    fn collect_types_covers_wrappers_attachments_and_faults() {
        let ns = "urn:example";
        let mut wrapper = WrapperParameter::new(QName::new(ns, "echo"), Direction::In);
        wrapper.add_child(Parameter::new(
            "text",
            QName::new(ns, "text"),
            string_type(ns, "text"),
            Direction::In,
            0,
        ));

        let mut op = OperationDescriptor::new(
            QName::new(ns, "Echo"),
            HandlerId::new("echo"),
            MessageExchangePattern::RequestResponse,
        )
        .with_request_wrapper(wrapper)
        .with_fault(FaultDescriptor {
            tag_name: QName::new(ns, "EchoFault"),
            detail_type: string_type(ns, "EchoFault"),
        });
        op.set_request_attachments(vec![Parameter::new(
            "blob",
            QName::new(ns, "blob"),
            string_type(ns, "blob"),
            Direction::In,
            1,
        )]);

        let mut types = Vec::new();
        op.collect_types(&mut types);
        assert_eq!(
            types,
            vec![
                string_type(ns, "text"),
                string_type(ns, "blob"),
                string_type(ns, "EchoFault"),
            ]
        );
    }
}
