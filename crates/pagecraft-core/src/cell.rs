#![forbid(unsafe_code)]

//! Sparse grid addressing.
//!
//! A grid node indexes its occupied cells by [`CellKey`]. In memory the key
//! is a `(row, col)` pair ordered row-major; the `"row-col"` string form
//! exists only at the serialization boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::component::Component;

/// Row/column address of a grid cell.
///
/// Ordering is row-major, so iterating a [`GridData`] visits cells in the
/// same order the grid renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub row: usize,
    pub col: usize,
}

impl CellKey {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the key lies inside a `rows × columns` rectangle.
    #[inline]
    #[must_use]
    pub const fn within(self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.col < columns
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Error returned when a `"row-col"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell key {0:?}: expected \"<row>-<col>\"")]
pub struct ParseCellKeyError(pub String);

impl FromStr for CellKey {
    type Err = ParseCellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellKeyError(s.to_string());
        let (row, col) = s.split_once('-').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Self { row, col })
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Sparse map of occupied grid cells.
///
/// Backed by a `BTreeMap` so enumeration order never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridData {
    cells: BTreeMap<CellKey, Component>,
}

impl GridData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: CellKey) -> Option<&Component> {
        self.cells.get(&key)
    }

    /// Insert a component at `key`, returning the previous occupant.
    pub fn insert(&mut self, key: CellKey, component: Component) -> Option<Component> {
        self.cells.insert(key, component)
    }

    pub fn remove(&mut self, key: CellKey) -> Option<Component> {
        self.cells.remove(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &Component)> {
        self.cells.iter().map(|(key, node)| (*key, node))
    }

    pub fn keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.cells.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &Component> {
        self.cells.values()
    }

    /// Copy of this map keeping only entries inside `rows × columns`.
    #[must_use]
    pub fn retain_within(&self, rows: usize, columns: usize) -> Self {
        let cells = self
            .cells
            .iter()
            .filter(|(key, _)| key.within(rows, columns))
            .map(|(key, node)| (*key, node.clone()))
            .collect();
        Self { cells }
    }
}

impl FromIterator<(CellKey, Component)> for GridData {
    fn from_iter<I: IntoIterator<Item = (CellKey, Component)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ComponentKind;

    #[test]
    fn parses_and_formats() {
        let key: CellKey = "1-2".parse().unwrap();
        assert_eq!(key, CellKey::new(1, 2));
        assert_eq!(key.to_string(), "1-2");
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!("12".parse::<CellKey>().is_err());
        assert!("a-1".parse::<CellKey>().is_err());
        assert!("1-".parse::<CellKey>().is_err());
        assert!("-1-2".parse::<CellKey>().is_err());
    }

    #[test]
    fn ordering_is_row_major() {
        let mut keys = vec![
            CellKey::new(1, 0),
            CellKey::new(0, 2),
            CellKey::new(0, 10),
            CellKey::new(0, 0),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                CellKey::new(0, 0),
                CellKey::new(0, 2),
                CellKey::new(0, 10),
                CellKey::new(1, 0),
            ]
        );
    }

    #[test]
    fn retain_within_drops_out_of_bounds() {
        let data: GridData = [
            (CellKey::new(0, 0), Component::new("a", ComponentKind::Text)),
            (CellKey::new(1, 2), Component::new("b", ComponentKind::Text)),
            (CellKey::new(2, 0), Component::new("c", ComponentKind::Text)),
        ]
        .into_iter()
        .collect();

        let kept = data.retain_within(2, 2);
        assert_eq!(kept.keys().collect::<Vec<_>>(), vec![CellKey::new(0, 0)]);
        assert_eq!(data.len(), 3, "source map is untouched");
    }
}
