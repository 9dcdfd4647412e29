//! # Table Mutations
//!
//! Serializable edit operations addressed into the document tree.
//!
//! ## Design Principles
//!
//! 1. **Addressed by path**: a mutation names the table it edits by its
//!    [`TablePath`] from the root, so one type covers every nesting level
//! 2. **Whole-root replacement**: applying produces a new root; the old one
//!    is never touched
//! 3. **Total**: out-of-range coordinates and floor violations are no-ops
//! 4. **Last write wins**: no merging of concurrent edits
//!
//! ## Failures
//!
//! - `PathNotFound`: the path does not lead to a table
//! - `InvalidOperation`: the cell's content type cannot take the edit
//! - `TableSizeRequired`: `table` chosen as content type without a size

use crate::ops;
use gridnest_model::{CellCoord, ContentType, IdSource, Table, TablePath, TablePreset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural edits on one table of a document tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a row of empty text cells
    AddRow {
        #[serde(default)]
        path: TablePath,
    },

    /// Append an empty text cell to every row
    AddColumn {
        #[serde(default)]
        path: TablePath,
    },

    DeleteRow {
        #[serde(default)]
        path: TablePath,
        row: usize,
    },

    DeleteColumn {
        #[serde(default)]
        path: TablePath,
        col: usize,
    },

    /// Replace the value of a text, code, separator or action-list cell
    EditCellText {
        #[serde(default)]
        path: TablePath,
        cell: CellCoord,
        text: String,
    },

    /// Reset a cell to empty text, dropping any nested table
    DeleteCellContent {
        #[serde(default)]
        path: TablePath,
        cell: CellCoord,
    },

    /// Copy a cell over its right-hand neighbour
    DuplicateCell {
        #[serde(default)]
        path: TablePath,
        cell: CellCoord,
    },

    FreezeRowsThrough {
        #[serde(default)]
        path: TablePath,
        row: usize,
    },

    FreezeColumnsThrough {
        #[serde(default)]
        path: TablePath,
        col: usize,
    },

    Unfreeze {
        #[serde(default)]
        path: TablePath,
    },

    /// Change a cell's content type; `table` needs a preset
    SetContentType {
        #[serde(default)]
        path: TablePath,
        cell: CellCoord,
        content_type: ContentType,
        #[serde(default)]
        preset: Option<TablePreset>,
    },

    /// Store an image by URI or `data:` URI
    SetImage {
        #[serde(default)]
        path: TablePath,
        cell: CellCoord,
        uri: String,
    },

    /// Put a fresh table into a cell
    CreateNestedTable {
        #[serde(default)]
        path: TablePath,
        cell: CellCoord,
        preset: TablePreset,
    },

    RenameTable {
        #[serde(default)]
        path: TablePath,
        name: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Cannot {operation} on a {content_type} cell")]
    InvalidOperation {
        operation: &'static str,
        content_type: ContentType,
    },

    #[error("No table at {0}")]
    PathNotFound(TablePath),

    #[error("A table size must be chosen before a cell becomes a table")]
    TableSizeRequired,
}

impl MutationError {
    pub fn invalid_operation(operation: &'static str, content_type: ContentType) -> Self {
        Self::InvalidOperation {
            operation,
            content_type,
        }
    }
}

impl Mutation {
    /// Path of the table this mutation edits
    pub fn path(&self) -> &TablePath {
        match self {
            Mutation::AddRow { path }
            | Mutation::AddColumn { path }
            | Mutation::DeleteRow { path, .. }
            | Mutation::DeleteColumn { path, .. }
            | Mutation::EditCellText { path, .. }
            | Mutation::DeleteCellContent { path, .. }
            | Mutation::DuplicateCell { path, .. }
            | Mutation::FreezeRowsThrough { path, .. }
            | Mutation::FreezeColumnsThrough { path, .. }
            | Mutation::Unfreeze { path }
            | Mutation::SetContentType { path, .. }
            | Mutation::SetImage { path, .. }
            | Mutation::CreateNestedTable { path, .. }
            | Mutation::RenameTable { path, .. } => path,
        }
    }

    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddRow { .. } => "AddRow",
            Mutation::AddColumn { .. } => "AddColumn",
            Mutation::DeleteRow { .. } => "DeleteRow",
            Mutation::DeleteColumn { .. } => "DeleteColumn",
            Mutation::EditCellText { .. } => "EditCellText",
            Mutation::DeleteCellContent { .. } => "DeleteCellContent",
            Mutation::DuplicateCell { .. } => "DuplicateCell",
            Mutation::FreezeRowsThrough { .. } => "FreezeRowsThrough",
            Mutation::FreezeColumnsThrough { .. } => "FreezeColumnsThrough",
            Mutation::Unfreeze { .. } => "Unfreeze",
            Mutation::SetContentType { .. } => "SetContentType",
            Mutation::SetImage { .. } => "SetImage",
            Mutation::CreateNestedTable { .. } => "CreateNestedTable",
            Mutation::RenameTable { .. } => "RenameTable",
        }
    }

    /// Validate without applying
    pub fn validate(&self, root: &Table) -> Result<(), MutationError> {
        let table = root
            .table_at(self.path())
            .ok_or_else(|| MutationError::PathNotFound(self.path().clone()))?;

        match self {
            Mutation::EditCellText { cell, .. } => match table.cell(*cell) {
                Some(target) if !target.content_type().is_text_bearing() => Err(
                    MutationError::invalid_operation("edit text", target.content_type()),
                ),
                _ => Ok(()),
            },

            Mutation::SetContentType {
                cell,
                content_type: ContentType::Table,
                preset: None,
                ..
            } => match table.cell(*cell) {
                Some(target) if target.content_type() != ContentType::Table => {
                    Err(MutationError::TableSizeRequired)
                }
                _ => Ok(()),
            },

            _ => Ok(()),
        }
    }

    /// Apply to `root` and return the new root. `root` itself is left as is.
    pub fn apply(&self, root: &Table, ids: &mut dyn IdSource) -> Result<Table, MutationError> {
        self.validate(root)?;

        let mut next = root.clone();
        let table = next
            .table_at_mut(self.path())
            .ok_or_else(|| MutationError::PathNotFound(self.path().clone()))?;

        match self {
            Mutation::AddRow { .. } => ops::push_row(table),
            Mutation::AddColumn { .. } => ops::push_column(table),
            Mutation::DeleteRow { row, .. } => ops::remove_row(table, *row),
            Mutation::DeleteColumn { col, .. } => ops::remove_column(table, *col),
            Mutation::EditCellText { cell, text, .. } => ops::set_cell_text(table, *cell, text)?,
            Mutation::DeleteCellContent { cell, .. } => ops::reset_cell(table, *cell),
            Mutation::DuplicateCell { cell, .. } => ops::copy_cell_right(table, *cell, ids),
            Mutation::FreezeRowsThrough { row, .. } => ops::freeze_rows(table, *row),
            Mutation::FreezeColumnsThrough { col, .. } => ops::freeze_columns(table, *col),
            Mutation::Unfreeze { .. } => table.frozen.clear(),
            Mutation::SetContentType {
                cell,
                content_type,
                preset,
                ..
            } => ops::change_content_type(table, *cell, *content_type, *preset, ids)?,
            Mutation::SetImage { cell, uri, .. } => ops::put_image(table, *cell, uri.clone()),
            Mutation::CreateNestedTable { cell, preset, .. } => {
                ops::put_nested_table(table, *cell, *preset, ids)
            }
            Mutation::RenameTable { name, .. } => table.name = name.clone(),
        }

        tracing::debug!(mutation = self.name(), path = %self.path(), "mutation applied");
        Ok(next)
    }
}

/// Result of applying a mutation to a [`crate::Document`]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// False when the mutation was a no-op
    pub changed: bool,
}
