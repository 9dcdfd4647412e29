//! # Document Handle
//!
//! A Document owns one root table and its editing state.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Validate → Edit → Save
//!   ↓        ↓        ↓      ↓
//! JSON    Table   Mutation  SaveSink
//! ```
//!
//! Every accepted mutation replaces the root wholesale, bumps the version
//! and hands the new root to the sink. A rejected mutation or one that
//! changes nothing leaves all three alone.

use crate::{content, EditorError, Mutation, MutationResult};
use gridnest_model::{CellCoord, IdSource, SequentialIds, Table, TableId, TablePath};
use std::fmt;

/// Receives the whole root table after each accepted edit.
///
/// Saving is fire-and-forget: a sink reports its own failures and never
/// hands them back to the editor.
pub trait SaveSink {
    fn save(&mut self, id: TableId, table: &Table);
}

impl<F> SaveSink for F
where
    F: FnMut(TableId, &Table),
{
    fn save(&mut self, id: TableId, table: &Table) {
        self(id, table)
    }
}

/// Editable table document
pub struct Document {
    root: Table,

    /// Current version number (increments on each accepted mutation)
    version: u64,

    ids: Box<dyn IdSource>,
    sink: Option<Box<dyn SaveSink>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.root.id)
            .field("name", &self.root.name)
            .field("version", &self.version)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Document {
    /// Wrap a root table. New nested tables get ids past every id already
    /// in the tree; ids that were deleted before loading are unknown here, so
    /// hosts keeping a persisted high-water mark pass it via [`with_ids`].
    ///
    /// [`with_ids`]: Document::with_ids
    pub fn new(root: Table) -> Result<Self, EditorError> {
        root.validate()?;
        let ids = SequentialIds::starting_after(root.max_id());

        Ok(Self {
            root,
            version: 0,
            ids: Box::new(ids),
            sink: None,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let root: Table = serde_json::from_str(json)?;
        Self::new(root)
    }

    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_sink(mut self, sink: impl SaveSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn id(&self) -> TableId {
        self.root.id
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    pub fn into_root(self) -> Table {
        self.root
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let next = match mutation.apply(&self.root, &mut *self.ids) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(mutation = mutation.name(), error = %err, "mutation rejected");
                return Err(err.into());
            }
        };

        if next == self.root {
            return Ok(MutationResult {
                version: self.version,
                changed: false,
            });
        }

        self.root = next;
        self.version += 1;

        if let Some(sink) = self.sink.as_mut() {
            sink.save(self.root.id, &self.root);
        }

        Ok(MutationResult {
            version: self.version,
            changed: true,
        })
    }

    /// Store raw image bytes in a cell as a `data:` URI
    pub fn set_image_bytes(
        &mut self,
        path: TablePath,
        cell: CellCoord,
        bytes: &[u8],
        mime: &str,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::SetImage {
            path,
            cell,
            uri: content::image_data_uri(bytes, mime),
        })
    }
}
