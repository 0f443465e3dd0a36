//! Parameter binding resolution for body wrappers.
//!
//! Reconciles declared parameter order with wire part order, the way
//! RPC-literal bindings require: body parts are reordered by their declared
//! wire part index, unbound parts keep encounter order and trail the body
//! parts, and attachment parts are handed back to the caller for the
//! out-of-band attachment layer. Parts without a wire binding (and parts
//! with no part name) leave the wrapper entirely; header parts likewise
//! leave the wrapper, since the header layer serializes them from the
//! recorded binding rather than from the body.

use std::collections::BTreeMap;

use soapwire_core::{Direction, Parameter, PortBinding, QName, WrapperParameter};

/// Classify the wrapper's children against the port's binding table and
/// rewrite them in wire order. Returns the attachment-bound parts, which
/// are removed from the wrapper.
pub fn apply_binding(
    operation: &QName,
    wrapper: &mut WrapperParameter,
    port: &dyn PortBinding,
    direction: Direction,
) -> Vec<Parameter> {
    let mut body: BTreeMap<usize, Parameter> = BTreeMap::new();
    let mut unbound: Vec<Parameter> = Vec::new();
    let mut attachments: Vec<Parameter> = Vec::new();

    for mut param in wrapper.take_children() {
        if param.part_name.is_empty() {
            continue;
        }
        let Some(binding) = port.binding_for(operation, &param.part_name, direction) else {
            // No wire binding declared: the part is excluded from every
            // bucket and dropped from the wrapper.
            continue;
        };
        param.record_binding(direction, binding.clone());

        if binding.is_unbound() {
            unbound.push(param);
        } else if binding.is_attachment() {
            attachments.push(param);
        } else if binding.is_body() {
            let index = port
                .part_index(operation, &param.part_name, direction)
                .unwrap_or_else(|| next_unused_index(&body));
            param.wire_position = Some(index);
            body.insert(index, param);
        }
    }

    for param in body.into_values() {
        wrapper.add_child(param);
    }
    for param in unbound {
        wrapper.add_child(param);
    }
    attachments
}

/// Smallest index not yet occupied by an explicitly indexed body part, so
/// unindexed parts never overwrite a declared position.
fn next_unused_index(body: &BTreeMap<usize, Parameter>) -> usize {
    let mut index = body.len();
    while body.contains_key(&index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use soapwire_core::{TablePortBinding, WireBinding};

    use super::*;
    use crate::testutil::string_type;

    const NS: &str = "urn:example";

    fn operation() -> QName {
        QName::new(NS, "Process")
    }

    fn part(name: &str, index: usize) -> Parameter {
        Parameter::new(
            name,
            QName::new(NS, name),
            string_type(NS, name),
            Direction::In,
            index,
        )
    }

    fn wrapper_of(names: &[&str]) -> WrapperParameter {
        WrapperParameter::with_children(
            QName::new(NS, "process"),
            Direction::In,
            names
                .iter()
                .enumerate()
                .map(|(i, name)| part(name, i))
                .collect(),
        )
    }

    #[test]
    fn body_parts_reorder_by_wire_index_with_unbound_trailing() {
        // Encounter order: BODY(1), BODY(0), UNBOUND, ATTACHMENT.
        let mut table = TablePortBinding::new();
        let op = operation();
        table.set_binding(&op, "second", Direction::In, WireBinding::Body);
        table.set_part_index(&op, "second", Direction::In, 1);
        table.set_binding(&op, "first", Direction::In, WireBinding::Body);
        table.set_part_index(&op, "first", Direction::In, 0);
        table.set_binding(&op, "loose", Direction::In, WireBinding::Unbound);
        table.set_binding(
            &op,
            "blob",
            Direction::In,
            WireBinding::Attachment { content_type: None },
        );

        let mut wrapper = wrapper_of(&["second", "first", "loose", "blob"]);
        let attachments = apply_binding(&op, &mut wrapper, &table, Direction::In);

        let names: Vec<&str> = wrapper
            .children()
            .iter()
            .map(|p| p.part_name.as_str())
            .collect();
        assert_eq!(names, ["first", "second", "loose"]);
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].part_name, "blob");
    }

    #[test]
    fn body_parts_record_binding_and_wire_position() {
        let mut table = TablePortBinding::new();
        let op = operation();
        table.set_binding(&op, "first", Direction::In, WireBinding::Body);
        table.set_part_index(&op, "first", Direction::In, 0);

        let mut wrapper = wrapper_of(&["first"]);
        apply_binding(&op, &mut wrapper, &table, Direction::In);

        let first = &wrapper.children()[0];
        assert_eq!(first.in_binding, Some(WireBinding::Body));
        assert_eq!(first.out_binding, None);
        assert_eq!(first.wire_position, Some(0));
    }

    #[test]
    fn out_direction_records_the_out_binding_slot() {
        let mut table = TablePortBinding::new();
        let op = operation();
        table.set_binding(&op, "result", Direction::Out, WireBinding::Body);

        let mut wrapper = WrapperParameter::with_children(
            QName::new(NS, "processResponse"),
            Direction::Out,
            vec![Parameter::new(
                "result",
                QName::new(NS, "result"),
                string_type(NS, "result"),
                Direction::Out,
                0,
            )],
        );
        apply_binding(&op, &mut wrapper, &table, Direction::Out);

        let result = &wrapper.children()[0];
        assert_eq!(result.out_binding, Some(WireBinding::Body));
        assert_eq!(result.in_binding, None);
    }

    #[test]
    fn unresolved_and_nameless_parts_are_dropped() {
        let mut table = TablePortBinding::new();
        let op = operation();
        table.set_binding(&op, "kept", Direction::In, WireBinding::Body);

        let mut wrapper = WrapperParameter::with_children(
            QName::new(NS, "process"),
            Direction::In,
            vec![part("kept", 0), part("no-binding", 1), part("", 2)],
        );
        let attachments = apply_binding(&op, &mut wrapper, &table, Direction::In);

        assert!(attachments.is_empty());
        assert_eq!(wrapper.children().len(), 1);
        assert_eq!(wrapper.children()[0].part_name, "kept");
    }

    #[test]
    fn header_parts_leave_the_wrapper_but_keep_their_binding_recorded() {
        let mut table = TablePortBinding::new();
        let op = operation();
        table.set_binding(&op, "token", Direction::In, WireBinding::Header);
        table.set_binding(&op, "payload", Direction::In, WireBinding::Body);

        let mut wrapper = wrapper_of(&["token", "payload"]);
        let attachments = apply_binding(&op, &mut wrapper, &table, Direction::In);

        assert!(attachments.is_empty());
        let names: Vec<&str> = wrapper
            .children()
            .iter()
            .map(|p| p.part_name.as_str())
            .collect();
        assert_eq!(names, ["payload"]);
    }

    #[test]
    fn unindexed_body_parts_fill_the_smallest_free_position() {
        // "tail" has an explicit index 0; "head" has none and must not
        // overwrite it.
        let mut table = TablePortBinding::new();
        let op = operation();
        table.set_binding(&op, "tail", Direction::In, WireBinding::Body);
        table.set_part_index(&op, "tail", Direction::In, 0);
        table.set_binding(&op, "head", Direction::In, WireBinding::Body);

        let mut wrapper = wrapper_of(&["tail", "head"]);
        apply_binding(&op, &mut wrapper, &table, Direction::In);

        let names: Vec<&str> = wrapper
            .children()
            .iter()
            .map(|p| p.part_name.as_str())
            .collect();
        assert_eq!(names, ["tail", "head"]);
        assert_eq!(wrapper.children()[1].wire_position, Some(1));
    }

    proptest! {
        /// For any mix of indexed body parts and unbound parts, the rebuilt
        /// wrapper holds body parts in ascending wire order followed by the
        /// unbound parts in encounter order.
        #[test]
        fn rebuilt_wrapper_is_body_ascending_then_unbound_in_order(
            body_order in proptest::sample::subsequence((0..8usize).collect::<Vec<_>>(), 0..8).prop_shuffle(),
            unbound_count in 0..4usize,
        ) {
            let op = operation();
            let mut table = TablePortBinding::new();
            let mut children = Vec::new();

            for (encounter, wire_index) in body_order.iter().enumerate() {
                let name = format!("body{wire_index}");
                table.set_binding(&op, &name, Direction::In, WireBinding::Body);
                table.set_part_index(&op, &name, Direction::In, *wire_index);
                children.push(part(&name, encounter));
            }
            for i in 0..unbound_count {
                let name = format!("loose{i}");
                table.set_binding(&op, &name, Direction::In, WireBinding::Unbound);
                children.push(part(&name, body_order.len() + i));
            }

            let mut wrapper = WrapperParameter::with_children(
                QName::new(NS, "process"),
                Direction::In,
                children,
            );
            apply_binding(&op, &mut wrapper, &table, Direction::In);

            let rebuilt = wrapper.children();
            prop_assert_eq!(rebuilt.len(), body_order.len() + unbound_count);

            let positions: Vec<usize> = rebuilt[..body_order.len()]
                .iter()
                .map(|p| p.wire_position.unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            prop_assert_eq!(positions, sorted);

            for (i, p) in rebuilt[body_order.len()..].iter().enumerate() {
                let expected = format!("loose{i}");
                prop_assert_eq!(p.part_name.as_str(), expected.as_str());
            }
        }
    }
}
