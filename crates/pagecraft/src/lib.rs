#![forbid(unsafe_code)]

//! pagecraft public facade crate.
//!
//! Re-exports the common types of the internal crates and offers a small
//! prelude for hosts that load a document and render it.

// --- Core re-exports -------------------------------------------------------

pub use pagecraft_core::{
    CellKey, Component, ComponentId, ComponentKind, Document, DocumentError, EditorCallbacks,
    GridData, Intent, NodeVisualState, NoopCallbacks, RecordingCallbacks, RenderMode,
    SelectionState, SlotAddress, WidgetAction,
};

// --- Layout re-exports -----------------------------------------------------

pub use pagecraft_layout::{
    CATALOGUE, ColumnBreakpoints, ColumnSource, LayoutTemplate, ViewportRegistry, find_template,
    prune_grid_data, switch_layout,
};

// --- Render re-exports -----------------------------------------------------

pub use pagecraft_render::{Element, EventKind, Frame, HandlerId, Node};

// --- Widget re-exports -----------------------------------------------------

pub use pagecraft_widgets::{Affordances, PageRenderer, RenderOptions, WidgetStates};

// --- Runtime re-exports ----------------------------------------------------

pub use pagecraft_runtime::{ConfigError, Dispatch, Page, PageConfig};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for pagecraft hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for pagecraft APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a JSON document and render it to HTML in one step.
pub fn render_json(json: &str, mode: RenderMode) -> Result<String> {
    let document = Document::from_json(json)?;
    Ok(PageRenderer::new(mode).render(&document.nodes).to_html())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Component, ComponentId, ComponentKind, Document, EditorCallbacks, Error, Frame, Intent,
        Page, PageConfig, PageRenderer, RenderMode, RenderOptions, Result, SelectionState,
    };

    pub use crate::{core, layout, render, runtime, widgets};
}

pub use pagecraft_core as core;
pub use pagecraft_layout as layout;
pub use pagecraft_render as render;
pub use pagecraft_runtime as runtime;
pub use pagecraft_widgets as widgets;
