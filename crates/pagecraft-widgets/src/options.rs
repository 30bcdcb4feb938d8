#![forbid(unsafe_code)]

//! Render options.

use bitflags::bitflags;
use pagecraft_core::ComponentKind;
use pagecraft_layout::ColumnBreakpoints;

bitflags! {
    /// Editor affordances that can be switched off individually.
    ///
    /// Runtime rendering ignores these; it never draws any affordance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Affordances: u16 {
        const SELECTION_RING  = 0b0000_0000_0001;
        const HOVER_RING      = 0b0000_0000_0010;
        const TYPE_BADGE      = 0b0000_0000_0100;
        const DRAG_HANDLE     = 0b0000_0000_1000;
        const ADD_AFTER       = 0b0000_0001_0000;
        const EMPTY_SLOTS     = 0b0000_0010_0000;
        const COLUMN_CONTROLS = 0b0000_0100_0000;
        const LAYOUT_PICKER   = 0b0000_1000_0000;
        const GRID_BADGE      = 0b0001_0000_0000;
    }
}

impl Default for Affordances {
    fn default() -> Self {
        Self::all()
    }
}

/// Default autoplay interval for sliders that do not set one.
pub const DEFAULT_SLIDER_INTERVAL_MS: u64 = 5000;

/// Options shared by every widget of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub breakpoints: ColumnBreakpoints,
    pub affordances: Affordances,
    /// Kinds offered by add-after and empty-slot controls.
    pub palette: Vec<ComponentKind>,
    pub slider_interval_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            breakpoints: ColumnBreakpoints::DEFAULT,
            affordances: Affordances::default(),
            palette: vec![
                ComponentKind::Heading,
                ComponentKind::Text,
                ComponentKind::Button,
                ComponentKind::Image,
                ComponentKind::Container,
                ComponentKind::Grid,
            ],
            slider_interval_ms: DEFAULT_SLIDER_INTERVAL_MS,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: ColumnBreakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    #[must_use]
    pub fn with_add_after(mut self, enabled: bool) -> Self {
        self.affordances.set(Affordances::ADD_AFTER, enabled);
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: impl IntoIterator<Item = ComponentKind>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_slider_interval_ms(mut self, interval_ms: u64) -> Self {
        self.slider_interval_ms = interval_ms.max(1);
        self
    }

    #[must_use]
    pub fn without(mut self, affordances: Affordances) -> Self {
        self.affordances.remove(affordances);
        self
    }

    #[inline]
    #[must_use]
    pub fn shows(&self, affordance: Affordances) -> bool {
        self.affordances.contains(affordance)
    }
}
