#![forbid(unsafe_code)]

//! Render kernel: virtual elements, HTML output, and the per-pass frame
//! that collects handlers and lifecycle requests.

pub mod css;
pub mod element;
pub mod frame;
pub mod html;

pub use element::{Element, NODE_ATTR, Node};
pub use frame::{EventKind, Frame, Handler, HandlerId, ObservedRegion, TimerRequest};
