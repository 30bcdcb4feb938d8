#![forbid(unsafe_code)]

//! Page runtime: hosts a document across render passes.
//!
//! Rendering itself is a pure function of the document, mode, and
//! interaction state. This crate adds what persists between passes:
//! measured widths, region observations, slider timers, and widget state,
//! plus the configuration that seeds them.

pub mod config;
pub mod lifecycle;
pub mod page;

pub use config::{ConfigError, ConfigResult, PageConfig, parse_breakpoints};
pub use lifecycle::{Lifecycle, MAX_FIRINGS_PER_ADVANCE, ReconcileReport, WidgetTimer};
pub use page::{Dispatch, Page};
