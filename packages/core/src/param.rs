//! Message parts and their wire-role bindings.

use serde::{Deserialize, Serialize};

use crate::qname::QName;
use crate::typeref::TypeDescriptor;

/// Direction of a message part relative to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Request part.
    In,
    /// Response part.
    Out,
    /// Part carried in both directions.
    InOut,
}

/// Wire region a message part is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireBinding {
    /// Serialized inside the body wrapper, ordered by wire part index.
    Body,
    /// Carried as a protocol header block.
    Header,
    /// Carried as an out-of-band attachment part.
    Attachment {
        /// MIME content type declared by the binding, if any.
        content_type: Option<String>,
    },
    /// Declared in the contract but absent from the wire.
    Unbound,
}

impl WireBinding {
    /// Whether this is a body binding.
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self, Self::Body)
    }

    /// Whether this is a header binding.
    #[must_use]
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header)
    }

    /// Whether this is an attachment binding.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        matches!(self, Self::Attachment { .. })
    }

    /// Whether this part never appears on the wire.
    #[must_use]
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::Unbound)
    }
}

/// A single message part declared by an operation.
///
/// The wire binding starts unset and is recorded during binding resolution
/// at model freeze; `wire_position` is set for body parts at the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Contract part name; empty for parts that have none.
    pub part_name: String,
    /// Element name the part serializes under.
    pub element_name: QName,
    /// Structural type of the part's value.
    pub type_descriptor: TypeDescriptor,
    /// Direction of the part.
    pub direction: Direction,
    /// Argument position in the handler signature.
    pub index: usize,
    /// Wire binding for the request direction, once resolved.
    pub in_binding: Option<WireBinding>,
    /// Wire binding for the response direction, once resolved.
    pub out_binding: Option<WireBinding>,
    /// Position among the operation's body parts, once resolved.
    pub wire_position: Option<usize>,
}

impl Parameter {
    /// Create an unresolved parameter.
    #[must_use]
    pub fn new(
        part_name: impl Into<String>,
        element_name: QName,
        type_descriptor: TypeDescriptor,
        direction: Direction,
        index: usize,
    ) -> Self {
        Self {
            part_name: part_name.into(),
            element_name,
            type_descriptor,
            direction,
            index,
            in_binding: None,
            out_binding: None,
            wire_position: None,
        }
    }

    /// The resolved binding for a direction: IN reads the in-binding,
    /// OUT and INOUT read the out-binding.
    #[must_use]
    pub fn binding_for(&self, direction: Direction) -> Option<&WireBinding> {
        match direction {
            Direction::In => self.in_binding.as_ref(),
            Direction::Out | Direction::InOut => self.out_binding.as_ref(),
        }
    }

    /// Record a resolved binding in the slot for `direction`.
    pub fn record_binding(&mut self, direction: Direction, binding: WireBinding) {
        match direction {
            Direction::In => self.in_binding = Some(binding),
            Direction::Out | Direction::InOut => self.out_binding = Some(binding),
        }
    }
}

/// A body wrapper owning an ordered list of child parts.
///
/// Child order starts as declaration order; binding resolution rewrites it
/// to wire order (body parts by part index, then unbound parts). The
/// wrapper is plain data after that.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperParameter {
    /// Element name of the wrapper itself.
    pub element_name: QName,
    /// Direction of the wrapped message.
    pub direction: Direction,
    children: Vec<Parameter>,
}

impl WrapperParameter {
    /// Create an empty wrapper.
    #[must_use]
    pub fn new(element_name: QName, direction: Direction) -> Self {
        Self {
            element_name,
            direction,
            children: Vec::new(),
        }
    }

    /// Create a wrapper with its children in declaration order.
    #[must_use]
    pub fn with_children(element_name: QName, direction: Direction, children: Vec<Parameter>) -> Self {
        Self {
            element_name,
            direction,
            children,
        }
    }

    /// Append a child part.
    pub fn add_child(&mut self, parameter: Parameter) {
        self.children.push(parameter);
    }

    /// Child parts in their current order.
    #[must_use]
    pub fn children(&self) -> &[Parameter] {
        &self.children
    }

    /// Remove and return all children, leaving the wrapper empty.
    pub fn take_children(&mut self) -> Vec<Parameter> {
        std::mem::take(&mut self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(direction: Direction) -> Parameter {
        Parameter::new(
            "arg0",
            QName::new("urn:example", "arg0"),
            TypeDescriptor::new(QName::new("urn:example", "arg0"), "String"),
            direction,
            0,
        )
    }

    #[test]
    fn record_binding_fills_the_in_slot_for_in_parts() {
        let mut param = parameter(Direction::In);
        param.record_binding(Direction::In, WireBinding::Body);
        assert_eq!(param.in_binding, Some(WireBinding::Body));
        assert_eq!(param.out_binding, None);
        assert_eq!(param.binding_for(Direction::In), Some(&WireBinding::Body));
    }

    #[test]
    fn record_binding_fills_the_out_slot_for_out_and_inout_parts() {
        let mut param = parameter(Direction::InOut);
        param.record_binding(Direction::InOut, WireBinding::Header);
        assert_eq!(param.in_binding, None);
        assert_eq!(param.out_binding, Some(WireBinding::Header));
        assert_eq!(param.binding_for(Direction::Out), Some(&WireBinding::Header));
    }

    #[test]
    fn take_children_empties_the_wrapper() {
        let mut wrapper = WrapperParameter::with_children(
            QName::new("urn:example", "echo"),
            Direction::In,
            vec![parameter(Direction::In)],
        );
        let children = wrapper.take_children();
        assert_eq!(children.len(), 1);
        assert!(wrapper.children().is_empty());
    }
}
