#![forbid(unsafe_code)]

//! Mount lifecycle for region observations and widget timers.
//!
//! After every render pass the page hands the new [`Frame`] to
//! [`Lifecycle::reconcile`], which compares what the frame asked for with
//! what is currently running:
//!
//! 1. Observations and timers no longer requested are dropped (stopped)
//! 2. New requests are started
//! 3. Unchanged ones keep running with their accumulated state
//!
//! Both resources end on `Drop`, so tearing down the lifecycle (or the page
//! that owns it) can never leak an observer or a timer.

use std::collections::HashSet;

use pagecraft_core::{ComponentId, WidgetAction};
use pagecraft_layout::{RegionObservation, ViewportRegistry};
use pagecraft_render::{Frame, TimerRequest};

/// Most firings one timer reports per [`Lifecycle::advance`]. Intervals
/// beyond this (a host that was suspended) are dropped, not replayed.
pub const MAX_FIRINGS_PER_ADVANCE: u64 = 8;

/// A mounted autoplay timer.
#[derive(Debug)]
pub struct WidgetTimer {
    owner: ComponentId,
    interval_ms: u64,
    action: WidgetAction,
    elapsed_ms: u64,
}

impl WidgetTimer {
    fn start(request: &TimerRequest) -> Self {
        tracing::debug!(owner = %request.owner, interval_ms = request.interval_ms, "timer mounted");
        Self {
            owner: request.owner.clone(),
            interval_ms: request.interval_ms.max(1),
            action: request.action,
            elapsed_ms: 0,
        }
    }

    #[must_use]
    pub fn owner(&self) -> &ComponentId {
        &self.owner
    }

    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[must_use]
    pub fn action(&self) -> WidgetAction {
        self.action
    }

    /// Advance by `ms`; returns how many intervals completed, capped at
    /// [`MAX_FIRINGS_PER_ADVANCE`].
    fn advance(&mut self, ms: u64) -> u64 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
        let due = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        if due > MAX_FIRINGS_PER_ADVANCE {
            tracing::debug!(owner = %self.owner, due, "timer backlog dropped");
        }
        due.min(MAX_FIRINGS_PER_ADVANCE)
    }

    fn update(&mut self, request: &TimerRequest) {
        let interval_ms = request.interval_ms.max(1);
        if interval_ms != self.interval_ms {
            self.interval_ms = interval_ms;
            self.elapsed_ms = 0;
        }
        self.action = request.action;
    }
}

impl Drop for WidgetTimer {
    fn drop(&mut self) {
        tracing::debug!(owner = %self.owner, "timer unmounted");
    }
}

/// Counts of what one reconcile pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub observations_started: usize,
    pub observations_stopped: usize,
    pub timers_mounted: usize,
    pub timers_unmounted: usize,
}

/// Running observations and timers of a page.
#[derive(Debug)]
pub struct Lifecycle {
    registry: ViewportRegistry,
    observations: Vec<RegionObservation>,
    timers: Vec<WidgetTimer>,
}

impl Lifecycle {
    #[must_use]
    pub fn new(registry: ViewportRegistry) -> Self {
        Self {
            registry,
            observations: Vec::new(),
            timers: Vec::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ViewportRegistry {
        &self.registry
    }

    /// Bring running resources in line with what `frame` requested.
    pub fn reconcile(&mut self, frame: &Frame) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let requested: HashSet<&ComponentId> =
            frame.observed_regions().iter().map(|r| &r.id).collect();
        let before = self.observations.len();
        self.observations.retain(|obs| requested.contains(obs.region()));
        report.observations_stopped = before - self.observations.len();
        for region in frame.observed_regions() {
            match self.observations.iter_mut().find(|obs| *obs.region() == region.id) {
                Some(obs) => {
                    obs.set_base(region.base);
                }
                None => {
                    self.observations
                        .push(self.registry.observe(region.id.clone(), region.base));
                    report.observations_started += 1;
                }
            }
        }

        let requested: HashSet<&ComponentId> = frame.timers().iter().map(|t| &t.owner).collect();
        let before = self.timers.len();
        self.timers.retain(|timer| requested.contains(&timer.owner));
        report.timers_unmounted = before - self.timers.len();
        for request in frame.timers() {
            match self.timers.iter_mut().find(|t| t.owner == request.owner) {
                Some(timer) => timer.update(request),
                None => {
                    self.timers.push(WidgetTimer::start(request));
                    report.timers_mounted += 1;
                }
            }
        }

        tracing::trace!(
            observations = self.observations.len(),
            timers = self.timers.len(),
            ?report,
            "lifecycle reconciled"
        );
        report
    }

    /// Re-read widths. Returns the regions whose column count changed.
    pub fn refresh(&mut self) -> Vec<ComponentId> {
        self.observations
            .iter_mut()
            .filter_map(|obs| obs.refresh().then(|| obs.region().clone()))
            .collect()
    }

    /// Advance every timer by `ms`, returning the actions that fired in
    /// mount order.
    pub fn advance(&mut self, ms: u64) -> Vec<(ComponentId, WidgetAction)> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            for _ in 0..timer.advance(ms) {
                fired.push((timer.owner.clone(), timer.action));
            }
        }
        fired
    }

    #[must_use]
    pub fn observations(&self) -> &[RegionObservation] {
        &self.observations
    }

    #[must_use]
    pub fn timers(&self) -> &[WidgetTimer] {
        &self.timers
    }

    /// Stop everything.
    pub fn clear(&mut self) {
        self.observations.clear();
        self.timers.clear();
    }
}
