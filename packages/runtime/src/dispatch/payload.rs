//! Payload-element dispatch: body top-level QName to operation name.

use std::collections::HashMap;

use soapwire_core::{payload_qname, InboundMessage, PortBinding, QName};

use super::Resolution;
use crate::model::ServiceModel;

/// Resolves by the request body's top-level element name.
///
/// Payload names are not guaranteed unique across operations, so this
/// strategy is not authoritative: a miss abstains instead of faulting, and
/// on duplicate payload names the first registration wins.
#[derive(Debug, Default)]
pub struct PayloadBasedFinder {
    by_payload: HashMap<QName, QName>,
}

impl PayloadBasedFinder {
    /// Build the payload table from a frozen service model.
    #[must_use]
    pub fn from_model(model: &ServiceModel) -> Self {
        let mut by_payload = HashMap::new();
        for op in model.operations() {
            if op.mep().is_async() {
                continue;
            }
            let payload = op
                .request_payload_name()
                .cloned()
                .unwrap_or_else(QName::empty_payload);
            by_payload
                .entry(payload)
                .or_insert_with(|| op.name().clone());
        }
        Self { by_payload }
    }

    /// Build the payload table directly from the contract bindings.
    #[must_use]
    pub fn from_contract(port: &dyn PortBinding) -> Self {
        let mut by_payload = HashMap::new();
        for op in port.operations() {
            let payload = op
                .request_payload_name
                .unwrap_or_else(QName::empty_payload);
            by_payload.entry(payload).or_insert(op.name);
        }
        Self { by_payload }
    }

    /// Resolve by the message's payload name; abstains on a miss.
    #[must_use]
    pub fn resolve(&self, message: &dyn InboundMessage) -> Resolution {
        match self.by_payload.get(&payload_qname(message)) {
            Some(operation) => Resolution::Operation(operation.clone()),
            None => Resolution::NoDecision,
        }
    }
}
