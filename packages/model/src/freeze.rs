//! Frozen panes: a leading prefix of rows and columns pinned while the rest
//! of the grid scrolls.

use serde::{Deserialize, Serialize};

/// Frozen row and column counts of one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreezeState {
    #[serde(default)]
    pub rows: usize,

    #[serde(default)]
    pub columns: usize,
}

/// Which pane a cell renders in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneRegion {
    /// Both its row and its column are frozen
    Corner,
    FrozenRows,
    FrozenColumns,
    Scrollable,
}

impl FreezeState {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 && self.columns == 0
    }

    /// Freeze rows `0..=row`, never more than `row_count`
    pub fn freeze_rows_through(&mut self, row: usize, row_count: usize) {
        self.rows = row.saturating_add(1).min(row_count);
    }

    /// Freeze columns `0..=col`, never more than `column_count`
    pub fn freeze_columns_through(&mut self, col: usize, column_count: usize) {
        self.columns = col.saturating_add(1).min(column_count);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pull both counts back inside a grid of the given size
    pub fn clamp(&mut self, row_count: usize, column_count: usize) {
        self.rows = self.rows.min(row_count);
        self.columns = self.columns.min(column_count);
    }

    pub fn fits(&self, row_count: usize, column_count: usize) -> bool {
        self.rows <= row_count && self.columns <= column_count
    }

    pub fn is_row_frozen(&self, row: usize) -> bool {
        row < self.rows
    }

    pub fn is_column_frozen(&self, col: usize) -> bool {
        col < self.columns
    }

    pub fn region(&self, row: usize, col: usize) -> PaneRegion {
        match (self.is_row_frozen(row), self.is_column_frozen(col)) {
            (true, true) => PaneRegion::Corner,
            (true, false) => PaneRegion::FrozenRows,
            (false, true) => PaneRegion::FrozenColumns,
            (false, false) => PaneRegion::Scrollable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_through_clamps_to_grid() {
        let mut frozen = FreezeState::default();
        frozen.freeze_rows_through(1, 4);
        assert_eq!(frozen.rows, 2);

        frozen.freeze_rows_through(10, 4);
        assert_eq!(frozen.rows, 4);

        frozen.freeze_columns_through(usize::MAX, 3);
        assert_eq!(frozen.columns, 3);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut frozen = FreezeState::new(4, 2);
        frozen.clamp(3, 5);
        assert_eq!(frozen, FreezeState::new(3, 2));
        assert!(frozen.fits(3, 5));
        assert!(!frozen.fits(2, 5));
    }

    #[test]
    fn test_regions() {
        let frozen = FreezeState::new(1, 2);
        assert_eq!(frozen.region(0, 0), PaneRegion::Corner);
        assert_eq!(frozen.region(0, 2), PaneRegion::FrozenRows);
        assert_eq!(frozen.region(3, 1), PaneRegion::FrozenColumns);
        assert_eq!(frozen.region(1, 2), PaneRegion::Scrollable);
    }

    #[test]
    fn test_clear() {
        let mut frozen = FreezeState::new(2, 2);
        frozen.clear();
        assert!(frozen.is_empty());
    }
}
