//! Property-based tests for the document wire format.
//!
//! 1. Serialize → deserialize yields a structurally identical tree.
//! 2. Serialization is stable: a second save produces identical JSON.
//! 3. Ids, kinds, children order, and gridData keys survive a round trip.
//!
//! Trees include legacy type spellings, `null` child slots, and explicit
//! `"gridData": null`, all of which must be written back unchanged.

use pagecraft_core::component::GRID_DATA_PROP;
use pagecraft_core::{CellKey, Component, ComponentKind, Document, GridData};
use proptest::prelude::*;
use serde_json::Value;

// ── Strategies ──────────────────────────────────────────────────────────

fn kind_strategy() -> impl Strategy<Value = ComponentKind> {
    prop_oneof![
        4 => proptest::sample::select(ComponentKind::KNOWN.to_vec()),
        1 => proptest::sample::select(vec!["video-embed", "code-block"]).prop_map(ComponentKind::from),
        1 => "x-[a-z]{1,6}".prop_map(|tag| ComponentKind::from(tag.as_str())),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9 #]{0,8}".prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Component> {
    (
        "[a-z]{1,4}[0-9]{0,3}",
        kind_strategy(),
        proptest::collection::vec(("[a-z]{1,8}", value_strategy()), 0..3),
        proptest::option::of("[a-z-]{1,10}"),
        proptest::collection::vec(("[a-z]{1,8}", value_strategy()), 0..3),
        proptest::option::of(".{0,12}"),
    )
        .prop_map(|(id, kind, style, class_name, props, content)| {
            let mut node = Component::new(id, kind);
            for (key, value) in style {
                node = node.with_style(key, value);
            }
            for (key, value) in props {
                node = node.with_prop(key, value);
            }
            node.class_name = class_name;
            node.content = content;
            node
        })
}

fn tree_strategy() -> impl Strategy<Value = Component> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        (
            leaf_strategy(),
            proptest::collection::vec(proptest::option::weighted(0.8, inner.clone()), 0..4),
            proptest::option::of(proptest::collection::vec(
                ((0usize..4, 0usize..4), inner),
                0..3,
            )),
            any::<bool>(),
        )
            .prop_map(|(mut node, children, cells, null_grid)| {
                node.children = children;
                if cells.is_none() && null_grid {
                    node.props.insert(GRID_DATA_PROP.to_string(), Value::Null);
                }
                node.grid_data = cells.map(|cells| {
                    cells
                        .into_iter()
                        .map(|((row, col), child)| (CellKey::new(row, col), child))
                        .collect::<GridData>()
                });
                node
            })
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip is lossless
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn round_trip_is_structurally_identical(nodes in proptest::collection::vec(tree_strategy(), 0..4)) {
        let doc = Document::new(nodes);
        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        prop_assert_eq!(&back, &doc);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Serialization is stable
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn second_save_is_byte_identical(node in tree_strategy()) {
        let doc = Document::new(vec![node]);
        let first = doc.to_json().unwrap();
        let second = Document::from_json(&first).unwrap().to_json().unwrap();
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Traversal order survives
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn walk_order_survives_round_trip(node in tree_strategy()) {
        let slots_before: Vec<_> = node.walk().map(|n| n.children.iter().map(Option::is_some).collect::<Vec<_>>()).collect();
        let before: Vec<_> = node.walk().map(|n| (n.id.clone(), n.kind.clone())).collect();
        let json = serde_json::to_string(&node).unwrap();
        let back: Component = serde_json::from_str(&json).unwrap();
        let after: Vec<_> = back.walk().map(|n| (n.id.clone(), n.kind.clone())).collect();
        prop_assert_eq!(before, after);
        let slots_after: Vec<_> = back.walk().map(|n| n.children.iter().map(Option::is_some).collect::<Vec<_>>()).collect();
        prop_assert_eq!(slots_before, slots_after);

        let keys_before: Vec<_> = node.cells().map(|(key, _)| key).collect();
        let keys_after: Vec<_> = back.cells().map(|(key, _)| key).collect();
        prop_assert_eq!(keys_before, keys_after);
    }
}
