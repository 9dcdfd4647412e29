//! Where a cell's popup menu opens relative to the cell.
//!
//! Menus open above the cell so they stay visible in tall tables, except in
//! the first two rows where there is no room above. Cells in the right half
//! of the table open their menu towards the left.

use gridnest_model::Table;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuAnchor {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

/// Row and column counts of the table a menu belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub columns: usize,
}

impl GridSize {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn of(table: &Table) -> Self {
        Self::new(table.row_count(), table.column_count())
    }
}

pub fn compute_menu_anchor(row: usize, col: usize, grid: GridSize) -> MenuAnchor {
    let vertical = if row < 2 { Vertical::Below } else { Vertical::Above };

    // col > columns / 2, without losing the half on odd widths
    let horizontal = if col.saturating_mul(2) > grid.columns {
        Horizontal::Left
    } else {
        Horizontal::Right
    };

    MenuAnchor {
        vertical,
        horizontal,
    }
}
