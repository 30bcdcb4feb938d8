#![forbid(unsafe_code)]

//! Responsive column measurement.
//!
//! Maps a measured region width to an effective column count:
//!
//! | Width            | Columns               |
//! |------------------|-----------------------|
//! | `< w0`           | 1                     |
//! | `w0 ..< w1`      | `min(2, base)`        |
//! | `w1 ..< w2`      | `min(3, base)`        |
//! | `>= w2`          | `base`                |
//!
//! Layout engines depend only on [`ColumnSource`], never on how widths are
//! obtained, so layout can be computed headless. [`ViewportRegistry`] is
//! the stateful source: hosts push measured widths into it, and each
//! observed region holds a [`RegionObservation`] whose `Drop` ends the
//! observation.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | No width measured yet | Region not laid out | `base` columns |
//! | Observation unsupported | [`ViewportRegistry::unavailable`] | `base` columns |

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use pagecraft_core::ComponentId;
use serde::{Deserialize, Serialize};

/// Width thresholds `[w0, w1, w2]` in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnBreakpoints {
    /// Minimum width for two columns.
    pub w0: u32,
    /// Minimum width for three columns.
    pub w1: u32,
    /// Minimum width for the full base count.
    pub w2: u32,
}

impl Default for ColumnBreakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ColumnBreakpoints {
    /// Default breakpoints: 640 / 768 / 1024 px.
    pub const DEFAULT: Self = Self {
        w0: 640,
        w1: 768,
        w2: 1024,
    };

    /// Create breakpoints with explicit thresholds.
    ///
    /// Values are sanitized to be monotonically non-decreasing.
    pub const fn new(w0: u32, w1: u32, w2: u32) -> Self {
        let w1 = if w1 < w0 { w0 } else { w1 };
        let w2 = if w2 < w1 { w1 } else { w2 };
        Self { w0, w1, w2 }
    }

    /// Classify a width into a tier.
    #[inline]
    pub const fn classify_width(self, width: u32) -> ColumnTier {
        if width >= self.w2 {
            ColumnTier::Full
        } else if width >= self.w1 {
            ColumnTier::Triple
        } else if width >= self.w0 {
            ColumnTier::Double
        } else {
            ColumnTier::Single
        }
    }

    /// Effective columns for `base` declared columns at `width`.
    #[inline]
    pub const fn columns_for_width(self, base: usize, width: u32) -> usize {
        self.classify_width(width).columns(base)
    }

    /// Thresholds as an array, ascending.
    #[must_use]
    pub const fn thresholds(self) -> [u32; 3] {
        [self.w0, self.w1, self.w2]
    }
}

/// Width tier selected by [`ColumnBreakpoints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnTier {
    Single,
    Double,
    Triple,
    Full,
}

impl ColumnTier {
    /// Column count permitted by this tier for `base` declared columns.
    #[inline]
    pub const fn columns(self, base: usize) -> usize {
        let base = if base == 0 { 1 } else { base };
        let cap = match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Full => base,
        };
        if cap < base { cap } else { base }
    }
}

/// Resolves the effective column count of a region.
pub trait ColumnSource {
    /// Effective columns for `region`, never more than `base` and never 0.
    fn effective_columns(&self, region: &ComponentId, base: usize) -> usize;
}

/// Source used when measurement is unavailable: every region gets `base`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl ColumnSource for Unconstrained {
    fn effective_columns(&self, _region: &ComponentId, base: usize) -> usize {
        base.max(1)
    }
}

/// Every region has the same width (headless rendering at a fixed viewport).
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub width: u32,
    pub breakpoints: ColumnBreakpoints,
}

impl FixedViewport {
    #[must_use]
    pub const fn new(width: u32, breakpoints: ColumnBreakpoints) -> Self {
        Self { width, breakpoints }
    }
}

impl ColumnSource for FixedViewport {
    fn effective_columns(&self, _region: &ComponentId, base: usize) -> usize {
        self.breakpoints.columns_for_width(base, self.width)
    }
}

/// Tracks one region's effective column count across width changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsiveColumns {
    base: usize,
    breakpoints: ColumnBreakpoints,
    width: Option<u32>,
}

impl ResponsiveColumns {
    #[must_use]
    pub fn new(base: usize, breakpoints: ColumnBreakpoints) -> Self {
        Self {
            base: base.max(1),
            breakpoints,
            width: None,
        }
    }

    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    #[must_use]
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Current effective count; `base` until a width has been observed.
    #[must_use]
    pub fn effective(&self) -> usize {
        match self.width {
            Some(width) => self.breakpoints.columns_for_width(self.base, width),
            None => self.base,
        }
    }

    /// Record a measured width. Returns `true` if the effective count changed.
    pub fn observe(&mut self, width: Option<u32>) -> bool {
        let before = self.effective();
        self.width = width;
        before != self.effective()
    }

    /// Change the declared base. Returns `true` if the effective count changed.
    pub fn set_base(&mut self, base: usize) -> bool {
        let before = self.effective();
        self.base = base.max(1);
        before != self.effective()
    }
}

#[derive(Debug)]
struct RegistryInner {
    breakpoints: ColumnBreakpoints,
    available: bool,
    viewport_width: Option<u32>,
    region_widths: HashMap<ComponentId, u32>,
    observers: HashMap<ComponentId, usize>,
}

/// Width store shared by every observed region of a page.
///
/// Cloning yields another handle to the same store.
#[derive(Debug, Clone)]
pub struct ViewportRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ViewportRegistry {
    #[must_use]
    pub fn new(breakpoints: ColumnBreakpoints) -> Self {
        Self::with_availability(breakpoints, true)
    }

    /// A registry on a host without resize observation; every region reports
    /// its base column count.
    #[must_use]
    pub fn unavailable(breakpoints: ColumnBreakpoints) -> Self {
        Self::with_availability(breakpoints, false)
    }

    fn with_availability(breakpoints: ColumnBreakpoints, available: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                breakpoints,
                available,
                viewport_width: None,
                region_widths: HashMap::new(),
                observers: HashMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn breakpoints(&self) -> ColumnBreakpoints {
        self.inner.borrow().breakpoints
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.inner.borrow().available
    }

    /// Width applied to regions without their own measurement.
    pub fn set_viewport_width(&self, width: u32) {
        self.inner.borrow_mut().viewport_width = Some(width);
    }

    /// Measured width of one observed region. Widths for regions without a
    /// live observation are dropped; returns whether the width was stored.
    pub fn set_region_width(&self, region: &ComponentId, width: u32) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.observers.contains_key(region) {
            pagecraft_core::debug!(region = %region, width, "width for unobserved region ignored");
            return false;
        }
        inner.region_widths.insert(region.clone(), width);
        true
    }

    /// Current width of a region, falling back to the viewport width.
    #[must_use]
    pub fn width_of(&self, region: &ComponentId) -> Option<u32> {
        let inner = self.inner.borrow();
        if !inner.available {
            return None;
        }
        inner
            .region_widths
            .get(region)
            .copied()
            .or(inner.viewport_width)
    }

    /// Begin observing `region` with `base` declared columns.
    #[must_use = "the observation ends when the handle is dropped"]
    pub fn observe(&self, region: ComponentId, base: usize) -> RegionObservation {
        let mut columns = ResponsiveColumns::new(base, self.breakpoints());
        columns.observe(self.width_of(&region));
        *self
            .inner
            .borrow_mut()
            .observers
            .entry(region.clone())
            .or_insert(0) += 1;
        pagecraft_core::debug!(region = %region, base, "region observation started");
        RegionObservation {
            region,
            columns,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Number of regions with at least one live observation.
    #[must_use]
    pub fn active_regions(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    #[must_use]
    pub fn is_observed(&self, region: &ComponentId) -> bool {
        self.inner.borrow().observers.contains_key(region)
    }
}

impl ColumnSource for ViewportRegistry {
    fn effective_columns(&self, region: &ComponentId, base: usize) -> usize {
        match self.width_of(region) {
            Some(width) => self.breakpoints().columns_for_width(base, width),
            None => base.max(1),
        }
    }
}

/// Live observation of one region. Dropping it stops the observation and
/// forgets the region's measured width once no observer remains.
#[derive(Debug)]
pub struct RegionObservation {
    region: ComponentId,
    columns: ResponsiveColumns,
    registry: Weak<RefCell<RegistryInner>>,
}

impl RegionObservation {
    #[must_use]
    pub fn region(&self) -> &ComponentId {
        &self.region
    }

    #[must_use]
    pub fn effective(&self) -> usize {
        self.columns.effective()
    }

    #[must_use]
    pub fn columns(&self) -> &ResponsiveColumns {
        &self.columns
    }

    /// Re-read the region width. Returns `true` if the effective count
    /// changed, i.e. a breakpoint was crossed for this region.
    pub fn refresh(&mut self) -> bool {
        let Some(inner) = self.registry.upgrade() else {
            return false;
        };
        let width = {
            let inner = inner.borrow();
            if inner.available {
                inner
                    .region_widths
                    .get(&self.region)
                    .copied()
                    .or(inner.viewport_width)
            } else {
                None
            }
        };
        self.columns.observe(width)
    }

    /// Update the declared base. Returns `true` if the effective count changed.
    pub fn set_base(&mut self, base: usize) -> bool {
        self.columns.set_base(base)
    }
}

impl Drop for RegionObservation {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        let remaining = match inner.observers.get_mut(&self.region) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => return,
        };
        if remaining == 0 {
            inner.observers.remove(&self.region);
            inner.region_widths.remove(&self.region);
            pagecraft_core::debug!(region = %self.region, "region observation stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: &str) -> ComponentId {
        ComponentId::from(id)
    }

    #[test]
    fn widths_map_to_tiers() {
        let bp = ColumnBreakpoints::new(300, 500, 800);
        let got: Vec<_> = [250, 350, 600, 900]
            .into_iter()
            .map(|w| bp.columns_for_width(4, w))
            .collect();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let bp = ColumnBreakpoints::new(300, 500, 800);
        assert_eq!(bp.columns_for_width(4, 299), 1);
        assert_eq!(bp.columns_for_width(4, 300), 2);
        assert_eq!(bp.columns_for_width(4, 500), 3);
        assert_eq!(bp.columns_for_width(4, 800), 4);
    }

    #[test]
    fn small_base_caps_every_tier() {
        let bp = ColumnBreakpoints::new(300, 500, 800);
        assert_eq!(bp.columns_for_width(2, 600), 2);
        assert_eq!(bp.columns_for_width(1, 900), 1);
        assert_eq!(bp.columns_for_width(0, 900), 1);
        assert_eq!(bp.columns_for_width(6, 900), 6);
    }

    #[test]
    fn new_sanitizes_order() {
        let bp = ColumnBreakpoints::new(500, 300, 100);
        assert_eq!(bp.thresholds(), [500, 500, 500]);
    }

    #[test]
    fn responsive_columns_report_changes() {
        let mut cols = ResponsiveColumns::new(4, ColumnBreakpoints::new(300, 500, 800));
        assert_eq!(cols.effective(), 4, "unmeasured region is unconstrained");
        assert!(cols.observe(Some(250)));
        assert_eq!(cols.effective(), 1);
        assert!(!cols.observe(Some(260)), "same tier is not a change");
        assert!(cols.observe(Some(900)));
        assert!(!cols.observe(None), "losing measurement returns to base");
    }

    #[test]
    fn unavailable_registry_falls_back_to_base() {
        let registry = ViewportRegistry::unavailable(ColumnBreakpoints::new(300, 500, 800));
        registry.set_viewport_width(100);
        assert_eq!(registry.effective_columns(&region("c"), 4), 4);
        let obs = registry.observe(region("c"), 4);
        assert_eq!(obs.effective(), 4);
    }

    #[test]
    fn region_width_overrides_viewport() {
        let registry = ViewportRegistry::new(ColumnBreakpoints::new(300, 500, 800));
        registry.set_viewport_width(900);
        let _narrow = registry.observe(region("narrow"), 4);
        assert!(registry.set_region_width(&region("narrow"), 350));
        assert_eq!(registry.effective_columns(&region("narrow"), 4), 2);
        assert_eq!(registry.effective_columns(&region("wide"), 4), 4);
    }

    #[test]
    fn dropping_observation_tears_down_region() {
        let registry = ViewportRegistry::new(ColumnBreakpoints::new(300, 500, 800));
        let first = registry.observe(region("a"), 3);
        let second = registry.observe(region("b"), 2);
        let again = registry.observe(region("a"), 3);
        assert!(registry.set_region_width(&region("a"), 200));
        assert_eq!(registry.active_regions(), 2);

        drop(first);
        assert!(registry.is_observed(&region("a")), "one observer of `a` remains");
        drop(again);
        assert!(!registry.is_observed(&region("a")));
        assert_eq!(registry.width_of(&region("a")), None);
        drop(second);
        assert_eq!(registry.active_regions(), 0);
    }

    #[test]
    fn independent_regions_do_not_interfere() {
        let registry = ViewportRegistry::new(ColumnBreakpoints::new(300, 500, 800));
        let mut a = registry.observe(region("a"), 4);
        let mut b = registry.observe(region("b"), 4);
        assert!(registry.set_region_width(&region("a"), 250));
        assert!(a.refresh());
        assert!(!b.refresh());
        assert_eq!(a.effective(), 1);
        assert_eq!(b.effective(), 4);
    }

    #[test]
    fn unobserved_region_widths_are_not_retained() {
        let registry = ViewportRegistry::new(ColumnBreakpoints::new(300, 500, 800));
        registry.set_viewport_width(900);
        assert!(!registry.set_region_width(&region("ghost"), 250));
        assert_eq!(registry.width_of(&region("ghost")), Some(900));
        assert!(registry.inner.borrow().region_widths.is_empty());

        let obs = registry.observe(region("a"), 4);
        assert!(registry.set_region_width(&region("a"), 250));
        drop(obs);
        assert!(registry.inner.borrow().region_widths.is_empty());
    }

    #[test]
    fn observation_outliving_registry_is_inert() {
        let registry = ViewportRegistry::new(ColumnBreakpoints::DEFAULT);
        let mut obs = registry.observe(region("a"), 2);
        drop(registry);
        assert!(!obs.refresh());
        drop(obs);
    }
}
