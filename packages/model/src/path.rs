//! Addressing tables inside the document tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based cell coordinate within one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell immediately to the right
    pub fn right(self) -> Self {
        Self::new(self.row, self.col.saturating_add(1))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Route from the root table to a nested table, one `table` cell per step.
/// The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TablePath(Vec<CellCoord>);

impl TablePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the table held by `cell` of the table at `self`
    pub fn child(&self, cell: CellCoord) -> Self {
        let mut steps = self.0.clone();
        steps.push(cell);
        Self(steps)
    }

    /// Path of the owning table and the cell that holds this table
    pub fn parent(&self) -> Option<(TablePath, CellCoord)> {
        let (last, rest) = self.0.split_last()?;
        Some((Self(rest.to_vec()), *last))
    }

    pub fn steps(&self) -> &[CellCoord] {
        &self.0
    }

    /// Number of nesting levels below the root
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<CellCoord> for TablePath {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for step in &self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}
