//! Operation finders: resolve an inbound message to a contract operation.
//!
//! Finders are a closed set of strategies selected at build time by the
//! binding configuration. Each `resolve` call returns the operation name,
//! an explicit abstention ([`Resolution::NoDecision`]) so the caller can
//! try the next strategy, or a [`DispatchFault`] for the transport layer
//! to encode as a protocol fault response. Resolution is pure map lookup:
//! no I/O, no blocking, safe for unsynchronized concurrent use.

pub mod action;
pub mod payload;

use soapwire_core::{AddressingVersion, InboundMessage, PortBinding, QName};
use thiserror::Error;

use crate::model::ServiceModel;

pub use action::{ActionBasedFinder, DuplicateSignature, OperationSignature};
pub use payload::PayloadBasedFinder;

/// Outcome of a resolve attempt that did not fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The message maps to this contract operation.
    Operation(QName),
    /// This strategy does not apply to the message; try the next one.
    NoDecision,
}

/// Request-time dispatch failure. The transport converts it into a fault
/// response to the remote caller; it never terminates the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchFault {
    /// No operation is registered for the message's addressing action.
    #[error("addressing action {action:?} is not supported by this service")]
    ActionNotSupported {
        /// The unmatched action.
        action: String,
        /// Addressing version negotiated for the binding.
        addressing: AddressingVersion,
    },
}

impl DispatchFault {
    /// Fault subcode the transport should place in the fault response.
    #[must_use]
    pub fn subcode(&self) -> QName {
        match self {
            Self::ActionNotSupported { addressing, .. } => {
                addressing.action_not_supported_fault()
            }
        }
    }
}

/// A dispatch strategy.
#[derive(Debug)]
pub enum OperationFinder {
    /// Addressing-action dispatch; built only when addressing is enabled.
    ActionBased(ActionBasedFinder),
    /// Payload-element dispatch; the non-authoritative fallback strategy.
    PayloadBased(PayloadBasedFinder),
}

impl OperationFinder {
    /// Resolve an inbound message with this strategy.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's [`DispatchFault`]; the payload strategy
    /// never faults.
    pub fn resolve(&self, message: &dyn InboundMessage) -> Result<Resolution, DispatchFault> {
        match self {
            Self::ActionBased(finder) => finder.resolve(message),
            Self::PayloadBased(finder) => Ok(finder.resolve(message)),
        }
    }
}

/// Error from walking a whole finder chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A strategy faulted; the transport answers with a fault response.
    #[error(transparent)]
    Fault(#[from] DispatchFault),
    /// Every configured strategy abstained.
    #[error("no dispatch strategy could resolve the inbound message")]
    Unresolvable,
}

/// Ordered finder chain for one bound port: action-based first when
/// addressing is negotiated, payload-based always.
#[derive(Debug)]
pub struct OperationDispatcher {
    finders: Vec<OperationFinder>,
}

impl OperationDispatcher {
    /// Build the chain from a frozen service model.
    #[must_use]
    pub fn from_model(
        model: &ServiceModel,
        port: &dyn PortBinding,
        addressing: Option<AddressingVersion>,
    ) -> Self {
        let mut finders = Vec::new();
        if let Some(version) = addressing {
            finders.push(OperationFinder::ActionBased(ActionBasedFinder::from_model(
                model, port, version,
            )));
        }
        finders.push(OperationFinder::PayloadBased(PayloadBasedFinder::from_model(
            model,
        )));
        Self { finders }
    }

    /// Build the chain directly from contract bindings, for deployments
    /// without a service model.
    #[must_use]
    pub fn from_contract(port: &dyn PortBinding, addressing: Option<AddressingVersion>) -> Self {
        let mut finders = Vec::new();
        if let Some(version) = addressing {
            finders.push(OperationFinder::ActionBased(
                ActionBasedFinder::from_contract(port, version),
            ));
        }
        finders.push(OperationFinder::PayloadBased(
            PayloadBasedFinder::from_contract(port),
        ));
        Self { finders }
    }

    /// The configured strategies, in resolution order.
    #[must_use]
    pub fn finders(&self) -> &[OperationFinder] {
        &self.finders
    }

    /// Walk the chain and return the first decision.
    ///
    /// # Errors
    ///
    /// Propagates the first [`DispatchFault`] a strategy raises, or
    /// returns [`DispatchError::Unresolvable`] when every strategy
    /// abstains.
    pub fn dispatch(&self, message: &dyn InboundMessage) -> Result<QName, DispatchError> {
        for finder in &self.finders {
            match finder.resolve(message)? {
                Resolution::Operation(name) => return Ok(name),
                Resolution::NoDecision => {}
            }
        }
        Err(DispatchError::Unresolvable)
    }
}

#[cfg(test)]
mod tests {
    use soapwire_core::{MessageExchangePattern, TablePortBinding};

    use super::*;
    use crate::model::operation::{HandlerId, OperationDescriptor};
    use crate::model::ServiceModelBuilder;
    use crate::testutil::TestMessage;

    const NS: &str = "urn:example";

    fn model() -> ServiceModel {
        let mut builder = ServiceModelBuilder::new();
        builder.add_operation(
            OperationDescriptor::new(
                QName::new(NS, "Echo"),
                HandlerId::new("echo"),
                MessageExchangePattern::RequestResponse,
            )
            .with_input_action("urn:echo")
            .with_request_payload_name(QName::new(NS, "echo")),
        );
        builder.populate_maps();
        builder.freeze(&TablePortBinding::new()).unwrap()
    }

    #[test]
    fn addressing_enabled_puts_the_action_finder_first() {
        let model = model();
        let dispatcher = OperationDispatcher::from_model(
            &model,
            &TablePortBinding::new(),
            Some(AddressingVersion::WsAddressing10),
        );
        assert_eq!(dispatcher.finders().len(), 2);
        assert!(matches!(
            dispatcher.finders()[0],
            OperationFinder::ActionBased(_)
        ));
    }

    #[test]
    fn addressing_disabled_builds_a_payload_only_chain() {
        let model = model();
        let dispatcher = OperationDispatcher::from_model(&model, &TablePortBinding::new(), None);
        assert_eq!(dispatcher.finders().len(), 1);
        assert!(matches!(
            dispatcher.finders()[0],
            OperationFinder::PayloadBased(_)
        ));
    }

    #[test]
    fn message_without_an_action_falls_through_to_payload_dispatch() {
        let model = model();
        let dispatcher = OperationDispatcher::from_model(
            &model,
            &TablePortBinding::new(),
            Some(AddressingVersion::WsAddressing10),
        );

        let message = TestMessage::new(None, Some(NS), Some("echo"));
        assert_eq!(dispatcher.dispatch(&message).unwrap(), QName::new(NS, "Echo"));
    }

    #[test]
    fn action_fault_propagates_instead_of_falling_through() {
        let model = model();
        let dispatcher = OperationDispatcher::from_model(
            &model,
            &TablePortBinding::new(),
            Some(AddressingVersion::WsAddressing10),
        );

        // The payload would resolve, but the explicit unknown action is
        // authoritative once addressing is engaged.
        let message = TestMessage::new(Some("urn:unknown"), Some(NS), Some("echo"));
        let err = dispatcher.dispatch(&message).unwrap_err();
        assert!(matches!(err, DispatchError::Fault(_)));
    }

    #[test]
    fn fully_unresolvable_message_reports_unresolvable() {
        let model = model();
        let dispatcher = OperationDispatcher::from_model(&model, &TablePortBinding::new(), None);

        let message = TestMessage::new(None, Some(NS), Some("unknown"));
        assert_eq!(
            dispatcher.dispatch(&message).unwrap_err(),
            DispatchError::Unresolvable
        );
    }
}
