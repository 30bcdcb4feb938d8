#![forbid(unsafe_code)]

//! Internal state of composite widgets.
//!
//! Composite widgets own state the tree does not describe (which FAQ items
//! are open, which slide is showing). The store lives outside the render
//! pass; rendering only reads it, and widget intents update it.

use std::collections::{BTreeSet, HashMap};

use pagecraft_core::{Component, ComponentId, ComponentKind, WidgetAction};

/// Open items of an FAQ accordion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqState {
    open: BTreeSet<usize>,
}

impl FaqState {
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    /// Toggle an item. Returns whether it is now open.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.open.remove(&index) {
            self.open.insert(index);
            return true;
        }
        false
    }

    pub fn open_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.iter().copied()
    }
}

/// Current slide of a slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderState {
    current: usize,
}

impl SliderState {
    /// Current slide, clamped to `len`.
    #[must_use]
    pub fn current(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.current % len }
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.current = (self.current(len) + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.current = (self.current(len) + len - 1) % len;
        }
    }

    pub fn go_to(&mut self, index: usize, len: usize) {
        if index < len {
            self.current = index;
        }
    }
}

/// Number of slides a slider node declares.
#[must_use]
pub fn slide_count(node: &Component) -> usize {
    node.prop_array("slides").len()
}

/// Widget state for every composite on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetStates {
    faqs: HashMap<ComponentId, FaqState>,
    sliders: HashMap<ComponentId, SliderState>,
}

impl WidgetStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn faq(&self, id: &ComponentId) -> FaqState {
        self.faqs.get(id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn slider(&self, id: &ComponentId) -> SliderState {
        self.sliders.get(id).copied().unwrap_or_default()
    }

    /// Apply a widget action to `node`. Returns `false` when the action does
    /// not apply to the node's kind.
    pub fn apply(&mut self, node: &Component, action: WidgetAction) -> bool {
        match (&node.kind, action) {
            (ComponentKind::Faq, WidgetAction::ToggleItem(index)) => {
                self.faqs.entry(node.id.clone()).or_default().toggle(index);
                true
            }
            (ComponentKind::Slider, action) => {
                let len = slide_count(node);
                let state = self.sliders.entry(node.id.clone()).or_default();
                match action {
                    WidgetAction::NextSlide => state.next(len),
                    WidgetAction::PrevSlide => state.prev(len),
                    WidgetAction::GoToSlide(index) => state.go_to(index, len),
                    WidgetAction::ToggleItem(_) => return false,
                }
                true
            }
            _ => false,
        }
    }

    /// Drop state of widgets no longer on the page.
    pub fn retain(&mut self, mut keep: impl FnMut(&ComponentId) -> bool) {
        self.faqs.retain(|id, _| keep(id));
        self.sliders.retain(|id, _| keep(id));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faqs.len() + self.sliders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
