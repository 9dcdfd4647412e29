//! Error types for the editor

use gridnest_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Invalid document: {0}")]
    Model(#[from] ModelError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No table size is awaiting a choice")]
    NoPendingTableSize,
}
