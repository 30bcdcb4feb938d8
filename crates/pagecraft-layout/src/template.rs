#![forbid(unsafe_code)]

//! Grid template catalogue.
//!
//! A template is a `rows × columns` matrix of cell-group identifiers plus
//! percentage column widths. A group that repeats contiguously within a row
//! forms one merged cell whose origin is its leftmost column.
//!
//! The catalogue is static and its first entry is the default layout.

use pagecraft_core::LayoutId;
use thiserror::Error;

use crate::grid::{LogicalCell, enumerate_cells};

/// Tolerance when checking that column widths sum to 100%.
const WIDTH_EPSILON: f32 = 0.05;

/// A catalogued grid template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub rows: usize,
    pub columns: usize,
    /// Row-major group identifiers, `rows` rows of `columns` entries.
    pub cells: &'static [&'static [u8]],
    /// Percentage width of each column.
    pub column_widths: &'static [f32],
}

/// Structural problems in a template definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("template {id:?}: expected {expected} rows, found {found}")]
    RowCount {
        id: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("template {id:?}: row {row} has {found} cells, expected {expected}")]
    RowWidth {
        id: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("template {id:?}: {found} column widths for {expected} columns")]
    WidthCount {
        id: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("template {id:?}: column widths sum to {sum}%")]
    WidthSum { id: &'static str, sum: f32 },
    #[error("template {id:?}: group {group} is split in row {row}")]
    SplitGroup { id: &'static str, row: usize, group: u8 },
    #[error("template {id:?}: group {group} appears in rows {first} and {second}")]
    GroupAcrossRows {
        id: &'static str,
        group: u8,
        first: usize,
        second: usize,
    },
    #[error("duplicate template id {0:?}")]
    DuplicateId(&'static str),
}

impl LayoutTemplate {
    #[must_use]
    pub fn layout_id(&self) -> LayoutId {
        LayoutId::from(self.id)
    }

    /// Group identifier at `(row, col)`, if inside the template.
    #[must_use]
    pub fn group_at(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Logical (merged) cells in row-major order of their origins.
    #[must_use]
    pub fn logical_cells(&self) -> Vec<LogicalCell> {
        enumerate_cells(self)
    }

    /// Thumbnail rows for a layout picker: the span of each logical cell,
    /// row by row.
    #[must_use]
    pub fn thumbnail(&self) -> Vec<Vec<usize>> {
        let mut rows = vec![Vec::new(); self.rows];
        for cell in enumerate_cells(self) {
            if let Some(row) = rows.get_mut(cell.row) {
                row.push(cell.col_span);
            }
        }
        rows
    }

    /// Check the structural invariants of this template.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let id = self.id;
        if self.cells.len() != self.rows {
            return Err(TemplateError::RowCount {
                id,
                expected: self.rows,
                found: self.cells.len(),
            });
        }
        for (row, groups) in self.cells.iter().enumerate() {
            if groups.len() != self.columns {
                return Err(TemplateError::RowWidth {
                    id,
                    row,
                    expected: self.columns,
                    found: groups.len(),
                });
            }
        }
        if self.column_widths.len() != self.columns {
            return Err(TemplateError::WidthCount {
                id,
                expected: self.columns,
                found: self.column_widths.len(),
            });
        }
        let sum: f32 = self.column_widths.iter().sum();
        if (sum - 100.0).abs() > WIDTH_EPSILON {
            return Err(TemplateError::WidthSum { id, sum });
        }

        // group -> row where it was seen
        let mut seen: Vec<(u8, usize)> = Vec::new();
        for (row, groups) in self.cells.iter().enumerate() {
            let mut closed: Vec<u8> = Vec::new();
            let mut previous: Option<u8> = None;
            for &group in groups.iter() {
                if previous != Some(group) {
                    if closed.contains(&group) {
                        return Err(TemplateError::SplitGroup { id, row, group });
                    }
                    if let Some(prev) = previous {
                        closed.push(prev);
                    }
                    if let Some(&(_, first)) = seen.iter().find(|(g, _)| *g == group) {
                        return Err(TemplateError::GroupAcrossRows {
                            id,
                            group,
                            first,
                            second: row,
                        });
                    }
                }
                previous = Some(group);
            }
            for group in closed.into_iter().chain(previous) {
                seen.push((group, row));
            }
        }
        Ok(())
    }
}

macro_rules! template {
    ($id:literal, $label:literal, [$($row:expr),+ $(,)?], $widths:expr) => {
        LayoutTemplate {
            id: $id,
            label: $label,
            rows: [$($row.len()),+].len(),
            columns: $widths.len(),
            cells: &[$(&$row),+],
            column_widths: &$widths,
        }
    };
}

const HALVES: [f32; 2] = [50.0, 50.0];
const THIRDS: [f32; 3] = [33.33, 33.33, 33.34];
const QUARTERS: [f32; 4] = [25.0, 25.0, 25.0, 25.0];

/// Every available template; the first is the default.
pub static CATALOGUE: [LayoutTemplate; 12] = [
    template!("2x2", "2 × 2", [[0u8, 1], [2, 3]], HALVES),
    template!("1x1", "Single", [[0u8]], [100.0f32]),
    template!("1x2", "Halves", [[0u8, 1]], HALVES),
    template!("1x3", "Thirds", [[0u8, 1, 2]], THIRDS),
    template!("1x4", "Quarters", [[0u8, 1, 2, 3]], QUARTERS),
    template!("sidebar-left", "Sidebar left", [[0u8, 1, 1]], [25.0f32, 37.5, 37.5]),
    template!("sidebar-right", "Sidebar right", [[0u8, 0, 1]], [37.5f32, 37.5, 25.0]),
    template!("2x3", "2 × 3", [[0u8, 1, 2], [3, 4, 5]], THIRDS),
    template!("2x3-hero", "Hero + 3", [[0u8, 0, 0], [1, 2, 3]], THIRDS),
    template!("3x3", "3 × 3", [[0u8, 1, 2], [3, 4, 5], [6, 7, 8]], THIRDS),
    template!(
        "3x3-feature",
        "Feature",
        [[0u8, 0, 1], [2, 3, 4], [5, 6, 6]],
        THIRDS
    ),
    template!("2x4-banner", "Banner + 4", [[0u8, 0, 0, 0], [1, 2, 3, 4]], QUARTERS),
];

/// The default template used when a grid names none.
#[must_use]
pub fn default_template() -> &'static LayoutTemplate {
    &CATALOGUE[0]
}

/// Look up a template by id.
#[must_use]
pub fn find_template(id: &str) -> Option<&'static LayoutTemplate> {
    CATALOGUE.iter().find(|template| template.id == id)
}

/// Resolve a grid's layout reference, falling back to the default template
/// for missing or unknown ids.
#[must_use]
pub fn resolve_template(layout: Option<&LayoutId>) -> &'static LayoutTemplate {
    let Some(layout) = layout else {
        return default_template();
    };
    match find_template(layout.as_str()) {
        Some(template) => template,
        None => {
            pagecraft_core::warn!(
                layout = %layout,
                fallback = default_template().id,
                "unknown grid layout"
            );
            default_template()
        }
    }
}

/// Validate every catalogued template and id uniqueness.
pub fn validate_catalogue() -> Result<(), TemplateError> {
    for (index, template) in CATALOGUE.iter().enumerate() {
        template.validate()?;
        if CATALOGUE[..index].iter().any(|t| t.id == template.id) {
            return Err(TemplateError::DuplicateId(template.id));
        }
    }
    Ok(())
}
