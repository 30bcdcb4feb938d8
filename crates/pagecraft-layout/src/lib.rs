#![forbid(unsafe_code)]

//! Layout: responsive column measurement, the grid template catalogue, and
//! slot planning for flex containers and grids.
//!
//! Planning is pure. Width measurement enters only through
//! [`ColumnSource`], so layouts can be computed without a host.

pub mod flex;
pub mod grid;
pub mod responsive;
pub mod template;

pub use flex::{ColumnSlot, FlexPlan};
pub use grid::{GridPlan, GridTracks, LogicalCell, PlannedCell, enumerate_cells, prune_grid_data, switch_layout};
pub use responsive::{
    ColumnBreakpoints, ColumnSource, ColumnTier, FixedViewport, RegionObservation,
    ResponsiveColumns, Unconstrained, ViewportRegistry,
};
pub use template::{
    CATALOGUE, LayoutTemplate, TemplateError, default_template, find_template, resolve_template,
    validate_catalogue,
};
