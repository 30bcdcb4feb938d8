#![forbid(unsafe_code)]

//! Container slot addressing.
//!
//! Flex containers address slots by column index; grids by `(row, col)`.
//! [`SlotAddress`] carries both explicitly. Hosts that only accept a single
//! integer slot can bridge with [`SlotAddress::to_legacy_index`], which
//! uses the bijection `index = row * 1000 + col` for grid cells. The
//! bijection requires `col < 1000`; wider grids have no legacy encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellKey;

/// Row stride of the legacy single-integer grid encoding.
pub const LEGACY_ROW_STRIDE: usize = 1000;

/// Address of a slot inside a flex container or grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SlotAddress {
    /// Column index of a flex container.
    Column { index: usize },
    /// Origin cell of a grid.
    Cell { row: usize, col: usize },
}

impl SlotAddress {
    #[inline]
    #[must_use]
    pub const fn column(index: usize) -> Self {
        Self::Column { index }
    }

    #[inline]
    #[must_use]
    pub const fn cell(row: usize, col: usize) -> Self {
        Self::Cell { row, col }
    }

    /// Grid key for cell addresses.
    #[must_use]
    pub const fn cell_key(self) -> Option<CellKey> {
        match self {
            Self::Cell { row, col } => Some(CellKey::new(row, col)),
            Self::Column { .. } => None,
        }
    }

    /// Encode as a single integer for hosts with an index-only interface.
    ///
    /// Columns encode as themselves. Cells encode as `row * 1000 + col` and
    /// return `None` when `col >= 1000` or the product overflows.
    #[must_use]
    pub fn to_legacy_index(self) -> Option<usize> {
        match self {
            Self::Column { index } => Some(index),
            Self::Cell { row, col } => {
                if col >= LEGACY_ROW_STRIDE {
                    return None;
                }
                row.checked_mul(LEGACY_ROW_STRIDE)?.checked_add(col)
            }
        }
    }

    /// Decode a legacy index that is known to address a grid cell.
    #[must_use]
    pub const fn cell_from_legacy_index(index: usize) -> Self {
        Self::Cell {
            row: index / LEGACY_ROW_STRIDE,
            col: index % LEGACY_ROW_STRIDE,
        }
    }
}

impl From<CellKey> for SlotAddress {
    fn from(key: CellKey) -> Self {
        Self::cell(key.row, key.col)
    }
}

impl fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column { index } => write!(f, "column {index}"),
            Self::Cell { row, col } => write!(f, "cell {row}-{col}"),
        }
    }
}
