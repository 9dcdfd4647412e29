//! Save sinks handed to [`Document`](gridnest_editor::Document)s.
//!
//! A sink never reports failure back to the editor. `JsonDirSink` logs
//! its errors and drops them.

use crate::store::{raise_last_id, read_record, record_path, write_record, StoreResult, TableRecord};
use gridnest_editor::SaveSink;
use gridnest_model::{Table, TableId};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Records every save. Clones share the same log, so a test can keep one
/// handle and give the other to a document.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    saves: Rc<RefCell<Vec<(TableId, Table)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> Vec<(TableId, Table)> {
        self.saves.borrow().clone()
    }

    pub fn last(&self) -> Option<Table> {
        self.saves.borrow().last().map(|(_, table)| table.clone())
    }

    pub fn len(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.borrow().is_empty()
    }
}

impl SaveSink for MemorySink {
    fn save(&mut self, id: TableId, table: &Table) {
        self.saves.borrow_mut().push((id, table.clone()));
    }
}

/// Writes `<dir>/<id>.json` records, keeping the creation time of an
/// existing record, and raises the directory's id high-water mark
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, table: &Table) -> StoreResult<()> {
        let path = record_path(&self.dir, table.id);
        let record = if path.exists() {
            let mut record = read_record(&path)?;
            record.replace(table.clone());
            record
        } else {
            TableRecord::new(table.clone())
        };
        write_record(&self.dir, &record)?;
        raise_last_id(&self.dir, table.max_id())
    }
}

impl SaveSink for JsonDirSink {
    fn save(&mut self, id: TableId, table: &Table) {
        match self.write(table) {
            Ok(()) => tracing::debug!(%id, dir = %self.dir.display(), "table saved"),
            Err(err) => tracing::error!(%id, error = %err, "failed to save table"),
        }
    }
}
