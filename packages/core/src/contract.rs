//! Parsed-contract abstractions: what dispatch needs from a service
//! description.
//!
//! Contract parsing itself is a host concern. The engine consumes a
//! [`PortBinding`] view of one bound port: the operation list for finder
//! construction, per-part wire bindings keyed by `(operation, part,
//! direction)`, and the declared wire part indexes that drive body
//! ordering. [`TablePortBinding`] is the in-memory implementation hosts
//! load from their parser output; tests build fixtures with it directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::param::{Direction, WireBinding};
use crate::qname::QName;

/// Message exchange pattern of a contract operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageExchangePattern {
    /// Request only, no response message.
    OneWay,
    /// Request with a correlated response.
    RequestResponse,
    /// Asynchronous polling variant of request-response.
    AsyncPoll,
    /// Asynchronous callback variant of request-response.
    AsyncCallback,
}

impl MessageExchangePattern {
    /// Whether this is an asynchronous variant. Asynchronous operations
    /// never receive inbound requests, so finders skip them.
    #[must_use]
    pub fn is_async(self) -> bool {
        matches!(self, Self::AsyncPoll | Self::AsyncCallback)
    }
}

/// Message-addressing protocol version negotiated for a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingVersion {
    /// W3C WS-Addressing 1.0.
    WsAddressing10,
    /// The 2004/08 member-submission draft, still common in deployed
    /// services.
    MemberSubmission,
}

impl AddressingVersion {
    /// Namespace of the addressing headers for this version.
    #[must_use]
    pub fn namespace_uri(self) -> &'static str {
        match self {
            Self::WsAddressing10 => "http://www.w3.org/2005/08/addressing",
            Self::MemberSubmission => "http://schemas.xmlsoap.org/ws/2004/08/addressing",
        }
    }

    /// Fault subcode this version defines for an unsupported action.
    #[must_use]
    pub fn action_not_supported_fault(self) -> QName {
        QName::new(self.namespace_uri(), "ActionNotSupported")
    }
}

/// Per-operation view of the contract binding, consumed by finder
/// construction when no service model exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractOperation {
    /// Contract operation name.
    pub name: QName,
    /// Input action declared by the contract, if any.
    pub input_action: Option<String>,
    /// Name of the request body's top-level element; `None` for bodiless
    /// requests.
    pub request_payload_name: Option<QName>,
}

/// Wire metadata for one bound port.
pub trait PortBinding: Send + Sync {
    /// The bound operations, in contract declaration order.
    fn operations(&self) -> Vec<ContractOperation>;

    /// Wire binding for a part of an operation in a direction, if the
    /// binding declares one.
    fn binding_for(&self, operation: &QName, part: &str, direction: Direction)
        -> Option<WireBinding>;

    /// Declared wire index of a body part, if the binding orders it
    /// explicitly.
    fn part_index(&self, operation: &QName, part: &str, direction: Direction) -> Option<usize>;

    /// Input action the contract declares for an operation.
    fn input_action(&self, operation: &QName) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PartKey {
    operation: QName,
    part: String,
    direction: Direction,
}

impl PartKey {
    fn new(operation: &QName, part: &str, direction: Direction) -> Self {
        Self {
            operation: operation.clone(),
            part: part.to_owned(),
            direction,
        }
    }
}

/// In-memory [`PortBinding`] backed by hash tables.
#[derive(Debug, Default)]
pub struct TablePortBinding {
    operations: Vec<ContractOperation>,
    bindings: HashMap<PartKey, WireBinding>,
    part_indexes: HashMap<PartKey, usize>,
}

impl TablePortBinding {
    /// Create an empty binding table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bound operation.
    pub fn add_operation(&mut self, operation: ContractOperation) {
        self.operations.push(operation);
    }

    /// Declare the wire binding of a part.
    pub fn set_binding(
        &mut self,
        operation: &QName,
        part: &str,
        direction: Direction,
        binding: WireBinding,
    ) {
        self.bindings
            .insert(PartKey::new(operation, part, direction), binding);
    }

    /// Declare the explicit wire index of a body part.
    pub fn set_part_index(
        &mut self,
        operation: &QName,
        part: &str,
        direction: Direction,
        index: usize,
    ) {
        self.part_indexes
            .insert(PartKey::new(operation, part, direction), index);
    }
}

impl PortBinding for TablePortBinding {
    fn operations(&self) -> Vec<ContractOperation> {
        self.operations.clone()
    }

    fn binding_for(
        &self,
        operation: &QName,
        part: &str,
        direction: Direction,
    ) -> Option<WireBinding> {
        self.bindings
            .get(&PartKey::new(operation, part, direction))
            .cloned()
    }

    fn part_index(&self, operation: &QName, part: &str, direction: Direction) -> Option<usize> {
        self.part_indexes
            .get(&PartKey::new(operation, part, direction))
            .copied()
    }

    fn input_action(&self, operation: &QName) -> Option<String> {
        self.operations
            .iter()
            .find(|op| op.name == *operation)
            .and_then(|op| op.input_action.clone())
    }
}
