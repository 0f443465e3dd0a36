//! Addressing-action dispatch: `(action, payload QName)` lookup with an
//! action-only interoperability fallback.

use std::collections::HashMap;

use soapwire_core::{payload_qname, AddressingVersion, InboundMessage, PortBinding, QName};
use tracing::warn;

use super::{DispatchFault, Resolution};
use crate::model::ServiceModel;

/// Composite dispatch key: addressing action plus request payload name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationSignature {
    /// Addressing action string.
    pub action: String,
    /// Request payload name, or the empty-payload sentinel.
    pub payload_name: QName,
}

/// Non-fatal build-time diagnostic: two operations declare the same
/// signature. The first registration keeps the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSignature {
    /// The contested signature.
    pub signature: OperationSignature,
    /// Operation that owns the mapping.
    pub kept: QName,
    /// Operation whose registration was rejected.
    pub rejected: QName,
}

/// Resolves inbound messages by their addressing action. Built only when
/// message addressing is enabled for the binding.
///
/// Two lookup levels: the primary map keys on `(action, payload name)` for
/// precise dispatch; the fallback map keys on the action alone, tolerating
/// contracts whose declared payload does not match the wire payload.
/// Actions are expected to be globally distinguishing even when payload
/// metadata is wrong, so the fallback never misdispatches unrelated
/// operations.
#[derive(Debug)]
pub struct ActionBasedFinder {
    addressing: AddressingVersion,
    signatures: HashMap<OperationSignature, QName>,
    by_action: HashMap<String, QName>,
    duplicates: Vec<DuplicateSignature>,
}

impl ActionBasedFinder {
    /// Build the dispatch table from a frozen service model.
    ///
    /// Asynchronous operations never receive inbound requests and are
    /// skipped. The effective action is the operation's explicitly declared
    /// input action when non-empty, else the contract-declared action for
    /// that operation; operations with neither are skipped.
    #[must_use]
    pub fn from_model(
        model: &ServiceModel,
        port: &dyn PortBinding,
        addressing: AddressingVersion,
    ) -> Self {
        let mut finder = Self::empty(addressing);
        for op in model.operations() {
            if op.mep().is_async() {
                continue;
            }
            let payload = op
                .request_payload_name()
                .cloned()
                .unwrap_or_else(QName::empty_payload);
            let action = match op.input_action() {
                Some(action) if !action.is_empty() => Some(action.to_owned()),
                _ => port.input_action(op.name()),
            };
            if let Some(action) = action {
                finder.insert(action, payload, op.name().clone());
            }
        }
        finder
    }

    /// Build the dispatch table directly from the contract bindings, for
    /// deployments without a service model.
    #[must_use]
    pub fn from_contract(port: &dyn PortBinding, addressing: AddressingVersion) -> Self {
        let mut finder = Self::empty(addressing);
        for op in port.operations() {
            let payload = op
                .request_payload_name
                .unwrap_or_else(QName::empty_payload);
            let Some(action) = op.input_action else {
                continue;
            };
            finder.insert(action, payload, op.name);
        }
        finder
    }

    fn empty(addressing: AddressingVersion) -> Self {
        Self {
            addressing,
            signatures: HashMap::new(),
            by_action: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// First registration wins in both maps; a duplicate signature is
    /// recorded and logged, never overwritten.
    fn insert(&mut self, action: String, payload_name: QName, operation: QName) {
        let signature = OperationSignature {
            action: action.clone(),
            payload_name,
        };
        if let Some(existing) = self.signatures.get(&signature) {
            warn!(
                action = signature.action.as_str(),
                payload = %signature.payload_name,
                kept = %existing,
                rejected = %operation,
                "duplicate operation signature, keeping first registration"
            );
            self.duplicates.push(DuplicateSignature {
                signature,
                kept: existing.clone(),
                rejected: operation,
            });
            return;
        }
        self.by_action
            .entry(action)
            .or_insert_with(|| operation.clone());
        self.signatures.insert(signature, operation);
    }

    /// Resolve an inbound message to a contract operation name.
    ///
    /// A message without an addressing action means addressing is not
    /// engaged; the finder abstains so the caller can fall through to
    /// another strategy.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchFault::ActionNotSupported`] when the action is in
    /// neither map.
    pub fn resolve(&self, message: &dyn InboundMessage) -> Result<Resolution, DispatchFault> {
        let Some(action) = message.addressing_action(self.addressing) else {
            return Ok(Resolution::NoDecision);
        };

        let payload_name = payload_qname(message);
        let signature = OperationSignature {
            action: action.clone(),
            payload_name,
        };
        if let Some(operation) = self.signatures.get(&signature) {
            return Ok(Resolution::Operation(operation.clone()));
        }

        // Some deployed contracts declare a request payload that does not
        // match the wire payload. Fall back to the action alone before
        // giving up.
        if let Some(operation) = self.by_action.get(&action) {
            return Ok(Resolution::Operation(operation.clone()));
        }

        Err(DispatchFault::ActionNotSupported {
            action,
            addressing: self.addressing,
        })
    }

    /// Duplicate signatures detected at build time.
    #[must_use]
    pub fn duplicates(&self) -> &[DuplicateSignature] {
        &self.duplicates
    }

    /// Addressing version this finder was built for.
    #[must_use]
    pub fn addressing(&self) -> AddressingVersion {
        self.addressing
    }
}
