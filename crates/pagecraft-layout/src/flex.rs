#![forbid(unsafe_code)]

//! Flex container column planning.
//!
//! A container declares `N` columns and the current width permits some
//! `actual <= N` of them. Slot `i < actual` holds `children[i]` when that
//! slot exists and is populated, and is empty otherwise (a `null` slot or
//! one past the end of `children`). Columns and children past `actual` are
//! not rendered; `props.columns` is never rewritten.

use pagecraft_core::{Component, ContainerProps, MAX_FLEX_COLUMNS, SlotAddress};

use crate::responsive::ColumnSource;

/// One displayed column of a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot<'a> {
    pub index: usize,
    pub child: Option<&'a Component>,
}

impl ColumnSlot<'_> {
    #[inline]
    #[must_use]
    pub const fn slot(&self) -> SlotAddress {
        SlotAddress::column(self.index)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.child.is_none()
    }
}

/// Column layout of a flex container.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexPlan<'a> {
    /// Declared column count, `1..=MAX_FLEX_COLUMNS`.
    pub declared: usize,
    /// Columns displayed at the current width.
    pub effective: usize,
    pub slots: Vec<ColumnSlot<'a>>,
    /// Populated children not displayed at the current width.
    pub overflow: usize,
}

impl<'a> FlexPlan<'a> {
    #[must_use]
    pub fn build(node: &'a Component, source: &dyn ColumnSource) -> Self {
        let declared = ContainerProps::of(node).columns;
        let effective = source.effective_columns(&node.id, declared).clamp(1, declared);
        let slots = (0..effective)
            .map(|index| ColumnSlot {
                index,
                child: node.child_at(index),
            })
            .collect();
        let overflow = node.children.iter().skip(effective).flatten().count();
        if overflow > 0 {
            pagecraft_core::debug!(
                container = %node.id,
                declared,
                effective,
                overflow,
                "children beyond displayed columns are not rendered"
            );
        }
        Self {
            declared,
            effective,
            slots,
            overflow,
        }
    }

    /// A column can be removed while more than one is declared.
    #[must_use]
    pub fn can_remove_column(&self) -> bool {
        self.declared > 1
    }

    #[must_use]
    pub fn can_add_column(&self) -> bool {
        self.declared < MAX_FLEX_COLUMNS
    }

    /// Percentage width of each column track.
    #[must_use]
    pub fn column_width_percent(&self) -> f32 {
        100.0 / self.effective.max(1) as f32
    }

    #[must_use]
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responsive::{ColumnBreakpoints, FixedViewport, Unconstrained};
    use pagecraft_core::ComponentKind;

    fn container(columns: Option<u64>, children: usize) -> Component {
        let mut node = Component::new("c", ComponentKind::Container).with_children(
            (0..children).map(|i| Component::new(format!("t{i}"), ComponentKind::Text)),
        );
        if let Some(columns) = columns {
            node = node.with_prop("columns", columns);
        }
        node
    }

    #[test]
    fn declared_columns_with_fewer_children_leave_empty_slots() {
        let node = container(Some(3), 1);
        let plan = FlexPlan::build(&node, &Unconstrained);
        assert_eq!(plan.declared, 3);
        assert_eq!(plan.slots[0].child.map(|c| c.id.as_str()), Some("t0"));
        assert!(plan.slots[1].is_empty());
        assert!(plan.slots[2].is_empty());
        assert_eq!(plan.empty_slots(), 2);
    }

    #[test]
    fn null_slots_stay_in_place() {
        let node = Component::new("c", ComponentKind::Container)
            .with_prop("columns", 3)
            .with_empty_slot()
            .with_child(Component::new("t", ComponentKind::Text))
            .with_empty_slot();
        let plan = FlexPlan::build(&node, &Unconstrained);
        let filled: Vec<_> = plan.slots.iter().map(|slot| slot.child.map(|c| c.id.as_str())).collect();
        assert_eq!(filled, vec![None, Some("t"), None]);
        assert_eq!(plan.empty_slots(), 2);
        assert_eq!(plan.overflow, 0);
    }

    #[test]
    fn hidden_empty_slots_are_not_overflow() {
        let node = Component::new("c", ComponentKind::Container)
            .with_prop("columns", 3)
            .with_child(Component::new("a", ComponentKind::Text))
            .with_empty_slot()
            .with_child(Component::new("b", ComponentKind::Text));
        let source = FixedViewport::new(100, ColumnBreakpoints::new(300, 500, 800));
        let plan = FlexPlan::build(&node, &source);
        assert_eq!(plan.effective, 1);
        assert_eq!(plan.overflow, 1);
    }

    #[test]
    fn children_beyond_declared_are_overflow() {
        let node = container(Some(2), 5);
        let plan = FlexPlan::build(&node, &Unconstrained);
        assert_eq!(plan.slots.len(), 2);
        assert_eq!(plan.overflow, 3);
    }

    #[test]
    fn missing_columns_prop_uses_child_count() {
        let plan_node = container(None, 4);
        let plan = FlexPlan::build(&plan_node, &Unconstrained);
        assert_eq!(plan.declared, 4);
        assert_eq!(plan.empty_slots(), 0);
    }

    #[test]
    fn narrow_width_hides_trailing_columns() {
        let node = container(Some(4), 4);
        let source = FixedViewport::new(350, ColumnBreakpoints::new(300, 500, 800));
        let plan = FlexPlan::build(&node, &source);
        assert_eq!(plan.declared, 4);
        assert_eq!(plan.effective, 2);
        assert_eq!(plan.slots.len(), 2);
        assert_eq!(plan.overflow, 2);
        assert_eq!(node.prop_u64("columns"), Some(4), "declared count is untouched");
        assert!((plan.column_width_percent() - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn remove_column_needs_more_than_one() {
        let single = container(Some(1), 0);
        assert!(!FlexPlan::build(&single, &Unconstrained).can_remove_column());
        let pair = container(Some(2), 0);
        assert!(FlexPlan::build(&pair, &Unconstrained).can_remove_column());
        let full = container(Some(12), 0);
        assert!(!FlexPlan::build(&full, &Unconstrained).can_add_column());
    }
}
