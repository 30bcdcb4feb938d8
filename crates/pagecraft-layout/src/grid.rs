#![forbid(unsafe_code)]

//! Template grid planning.
//!
//! Turns a grid node plus its template into the list of logical cells to
//! render, each paired with its occupant. `gridData` entries that do not
//! land on a logical cell origin (out of bounds, or covered by a merged
//! cell) are kept in the data but never rendered.

use pagecraft_core::{CellKey, Component, GridData, GridProps, LayoutId, SlotAddress};

use crate::responsive::ColumnSource;
use crate::template::{LayoutTemplate, resolve_template};

/// A rendered cell: the origin of a cell group and how many columns it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalCell {
    pub row: usize,
    pub col: usize,
    pub col_span: usize,
}

impl LogicalCell {
    #[inline]
    #[must_use]
    pub const fn key(&self) -> CellKey {
        CellKey::new(self.row, self.col)
    }

    #[inline]
    #[must_use]
    pub const fn slot(&self) -> SlotAddress {
        SlotAddress::cell(self.row, self.col)
    }

    /// Span limited to the columns actually available.
    #[inline]
    #[must_use]
    pub fn clamped_span(&self, columns: usize) -> usize {
        self.col_span.min(columns.max(1))
    }
}

/// Enumerate the logical cells of a template in row-major order.
///
/// Within each row a group is emitted once, at its first column, with a
/// span equal to its contiguous run length.
#[must_use]
pub fn enumerate_cells(template: &LayoutTemplate) -> Vec<LogicalCell> {
    let mut cells = Vec::with_capacity(template.rows * template.columns);
    for (row, groups) in template.cells.iter().enumerate() {
        let mut opened: Vec<u8> = Vec::with_capacity(groups.len());
        for (col, &group) in groups.iter().enumerate() {
            if opened.contains(&group) {
                continue;
            }
            opened.push(group);
            let col_span = groups[col..].iter().take_while(|&&g| g == group).count();
            cells.push(LogicalCell { row, col, col_span });
        }
    }
    cells
}

/// Column tracks for a grid at its current width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridTracks {
    /// Full width: the template's own percentage columns.
    Template(&'static [f32]),
    /// Collapsed: `n` equal columns.
    Uniform(usize),
}

/// A logical cell and whatever occupies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedCell<'a> {
    pub cell: LogicalCell,
    pub occupant: Option<&'a Component>,
}

/// Everything needed to render one grid node.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan<'a> {
    pub template: &'static LayoutTemplate,
    pub cells: Vec<PlannedCell<'a>>,
    /// Keys present in `gridData` that no logical cell renders.
    pub unreachable: Vec<CellKey>,
    pub effective_columns: usize,
}

impl<'a> GridPlan<'a> {
    /// Plan a grid node against the column budget from `source`.
    #[must_use]
    pub fn build(node: &'a Component, source: &dyn ColumnSource) -> Self {
        let props = GridProps::of(node);
        let template = resolve_template(props.layout.as_ref());
        let logical = enumerate_cells(template);

        let cells: Vec<PlannedCell<'a>> = logical
            .iter()
            .map(|&cell| PlannedCell {
                cell,
                occupant: node.cell(cell.key()),
            })
            .collect();
        let unreachable: Vec<CellKey> = node
            .cells()
            .map(|(key, _)| key)
            .filter(|key| !logical.iter().any(|cell| cell.key() == *key))
            .collect();
        if !unreachable.is_empty() {
            pagecraft_core::debug!(
                grid = %node.id,
                layout = template.id,
                count = unreachable.len(),
                "grid entries outside the template are not rendered"
            );
        }

        Self {
            template,
            cells,
            unreachable,
            effective_columns: source.effective_columns(&node.id, template.columns),
        }
    }

    /// Whether the grid is narrower than its template.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.effective_columns < self.template.columns
    }

    #[must_use]
    pub fn tracks(&self) -> GridTracks {
        if self.is_collapsed() {
            GridTracks::Uniform(self.effective_columns.max(1))
        } else {
            GridTracks::Template(self.template.column_widths)
        }
    }

    /// Rendered span of a cell under the current tracks.
    #[must_use]
    pub fn span_of(&self, cell: &LogicalCell) -> usize {
        if self.is_collapsed() {
            cell.clamped_span(self.effective_columns)
        } else {
            cell.col_span
        }
    }

    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.occupant.is_some()).count()
    }
}

/// Keep only entries that fall inside `template`'s bounds.
#[must_use]
pub fn prune_grid_data(data: &GridData, template: &LayoutTemplate) -> GridData {
    data.retain_within(template.rows, template.columns)
}

/// Return a copy of `node` switched to `layout`, with `gridData` pruned to
/// the new template's bounds. Unknown ids resolve to the default template,
/// and the resolved id is what gets stored.
#[must_use]
pub fn switch_layout(node: &Component, layout: &LayoutId) -> Component {
    let template = resolve_template(Some(layout));
    let mut next = node.clone();
    next.props
        .insert("layout".to_string(), template.id.into());
    next.grid_data = node
        .grid_data
        .as_ref()
        .map(|data| prune_grid_data(data, template));
    pagecraft_core::debug!(
        grid = %node.id,
        requested = %layout,
        layout = template.id,
        kept = next.grid_data.as_ref().map_or(0, GridData::len),
        "grid layout switched"
    );
    next
}
