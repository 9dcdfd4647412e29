use crate::TableId;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Table {0} has no rows or no columns")]
    EmptyTable(TableId),

    #[error("Table {table} row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        table: TableId,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Table id {0} is owned by more than one cell")]
    DuplicateId(TableId),

    #[error("Table {table} freezes {rows} rows and {columns} columns beyond its grid")]
    FreezeOutOfBounds {
        table: TableId,
        rows: usize,
        columns: usize,
    },

    #[error("Invalid table size: {0}")]
    InvalidSize(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),
}

impl ModelError {
    pub fn invalid_size(message: impl Into<String>) -> Self {
        Self::InvalidSize(message.into())
    }
}
