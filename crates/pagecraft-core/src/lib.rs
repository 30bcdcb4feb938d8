#![forbid(unsafe_code)]

//! Core: component tree model, document format, and the interaction contract
//! shared by the layout engines, the render dispatcher, and host editors.

pub mod cell;
pub mod component;
pub mod document;
pub mod interaction;
pub mod kind;
pub mod logging;
pub mod props;
pub mod selection;
pub mod slot;

pub use cell::{CellKey, GridData, ParseCellKeyError};
pub use component::{Component, ComponentId, Props, StyleMap};
pub use document::{Document, DocumentError, DocumentResult};
pub use interaction::{EditorCallbacks, Intent, NoopCallbacks, RecordingCallbacks, WidgetAction};
pub use kind::{ComponentKind, KindFamily};
pub use props::{ContainerProps, GridProps, LayoutId, MAX_FLEX_COLUMNS};
pub use selection::{NodeVisualState, RenderMode, SelectionState};
pub use slot::SlotAddress;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, warn};
