//! Catalog of root tables, the host side of the save boundary.
//!
//! Every root table lives in a [`TableRecord`] with a version and
//! timestamps. Saves replace a record's table wholesale; the last write
//! wins.
//!
//! Ids come from one catalog-wide high-water mark ([`CatalogIds`]). It only
//! moves forward, so an id stays retired after its table is deleted, and
//! it is persisted next to the records in `catalog.json`.

use chrono::{DateTime, Utc};
use gridnest_editor::{Document, EditorError};
use gridnest_model::{IdSource, ModelError, Table, TableId, TableSize};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const CATALOG_FILE: &str = "catalog.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No table with id {0}")]
    NotFound(TableId),

    #[error("Table name cannot be empty")]
    EmptyName,

    #[error("Data for table {expected} has root id {found}")]
    IdMismatch { expected: TableId, found: TableId },

    #[error("Invalid table: {0}")]
    Model(#[from] ModelError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    pub table: Table,

    /// Bumped on every rename or data save
    pub version: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TableRecord {
    pub fn new(table: Table) -> Self {
        let now = Utc::now();
        Self {
            table,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> TableId {
        self.table.id
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Replace the data and bump the version
    pub fn replace(&mut self, table: Table) {
        self.table = table;
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

/// Catalog-wide id counter. Clones share the mark, so ids issued by an open
/// document are never issued again by the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogIds {
    last: Rc<Cell<u64>>,
}

impl CatalogIds {
    pub fn last(&self) -> Option<TableId> {
        let last = self.last.get();
        (last > 0).then_some(TableId(last))
    }

    /// Raise the mark to `id`; never lowers it
    pub fn observe(&self, id: TableId) {
        if id.0 > self.last.get() {
            self.last.set(id.0);
        }
    }
}

impl IdSource for CatalogIds {
    fn next_id(&mut self) -> TableId {
        let next = self.last.get() + 1;
        self.last.set(next);
        TableId(next)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogMeta {
    #[serde(default)]
    last_id: u64,
}

/// Persisted high-water mark of a catalog directory, 0 when there is none
pub fn read_last_id(dir: &Path) -> StoreResult<u64> {
    let path = dir.join(CATALOG_FILE);
    if !path.exists() {
        return Ok(0);
    }
    let meta: CatalogMeta = serde_json::from_str(&fs::read_to_string(path)?)?;
    Ok(meta.last_id)
}

/// Raise the persisted high-water mark of `dir` to at least `id`
pub fn raise_last_id(dir: &Path, id: TableId) -> StoreResult<()> {
    if read_last_id(dir)? >= id.0 {
        return Ok(());
    }
    write_last_id(dir, id.0)
}

fn write_last_id(dir: &Path, last_id: u64) -> StoreResult<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(&CatalogMeta { last_id })?;
    fs::write(dir.join(CATALOG_FILE), json)?;
    Ok(())
}

/// Path of the record file for `id` inside a catalog directory
pub fn record_path(dir: &Path, id: TableId) -> PathBuf {
    dir.join(format!("{}.json", id))
}

pub fn read_record(path: &Path) -> StoreResult<TableRecord> {
    let content = fs::read_to_string(path)?;
    let record: TableRecord = serde_json::from_str(&content)?;
    record.table.validate()?;
    Ok(record)
}

pub fn write_record(dir: &Path, record: &TableRecord) -> StoreResult<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(record)?;
    fs::write(record_path(dir, record.id()), json)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct TableStore {
    records: BTreeMap<TableId, TableRecord>,
    ids: CatalogIds,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest id used by a live table, nested tables included
    pub fn max_id(&self) -> Option<TableId> {
        self.records.values().map(|record| record.table.max_id()).max()
    }

    /// Highest id ever issued, deleted tables included
    pub fn last_id(&self) -> Option<TableId> {
        self.ids.last()
    }

    /// Create a blank root table
    pub fn create_table(&mut self, name: &str, size: TableSize) -> StoreResult<&TableRecord> {
        let name = non_empty(name)?;
        let id = self.ids.next_id();
        self.insert(Table::root(id, name, size))
    }

    /// Create a root table whose cells read `R1C1`, `R1C2`, ...
    pub fn create_labelled_table(&mut self, name: &str, size: TableSize) -> StoreResult<&TableRecord> {
        let name = non_empty(name)?;
        let id = self.ids.next_id();
        self.insert(Table::labelled(id, name, size))
    }

    fn insert(&mut self, table: Table) -> StoreResult<&TableRecord> {
        let id = table.id;
        tracing::info!(%id, name = %table.name, "table created");
        self.records.insert(id, TableRecord::new(table));
        self.get_table(id)
    }

    pub fn rename_table(&mut self, id: TableId, name: &str) -> StoreResult<&TableRecord> {
        let name = non_empty(name)?;
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.table.name = name.to_string();
        record.touch();
        tracing::info!(%id, name, "table renamed");
        Ok(record)
    }

    pub fn delete_table(&mut self, id: TableId) -> StoreResult<TableRecord> {
        let record = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        tracing::info!(%id, "table deleted");
        Ok(record)
    }

    pub fn get_table(&self, id: TableId) -> StoreResult<&TableRecord> {
        self.records.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Every record, ordered by id
    pub fn list(&self) -> impl Iterator<Item = &TableRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace a table's data wholesale
    pub fn save_table_data(&mut self, id: TableId, table: Table) -> StoreResult<&TableRecord> {
        if table.id != id {
            return Err(StoreError::IdMismatch {
                expected: id,
                found: table.id,
            });
        }
        table.validate()?;

        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        self.ids.observe(table.max_id());
        record.replace(table);
        tracing::debug!(%id, version = record.version, "table data saved");
        Ok(record)
    }

    /// Hand a root table to an editing host. The document shares the
    /// catalog's id counter.
    pub fn open_document(&self, id: TableId) -> StoreResult<Document> {
        let record = self.get_table(id)?;
        let document = Document::new(record.table.clone())?.with_ids(self.ids.clone());
        Ok(document)
    }

    /// Load every `<id>.json` record in `dir`. A missing directory is an
    /// empty catalog.
    pub fn load_dir(dir: &Path) -> StoreResult<Self> {
        let mut store = Self::new();
        if !dir.exists() {
            return Ok(store);
        }
        store.ids.observe(TableId(read_last_id(dir)?));

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if record_id(&path).is_none() {
                continue;
            }
            let record = read_record(&path)?;
            store.ids.observe(record.table.max_id());
            store.records.insert(record.id(), record);
        }

        tracing::debug!(dir = %dir.display(), tables = store.len(), "catalog loaded");
        Ok(store)
    }

    /// Write every record to `dir` and remove record files of deleted tables
    pub fn persist_dir(&self, dir: &Path) -> StoreResult<()> {
        fs::create_dir_all(dir)?;

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if let Some(id) = record_id(&path) {
                if !self.records.contains_key(&id) {
                    fs::remove_file(&path)?;
                }
            }
        }

        for record in self.records.values() {
            write_record(dir, record)?;
        }
        if let Some(last) = self.last_id() {
            raise_last_id(dir, last)?;
        }
        Ok(())
    }
}

fn non_empty(name: &str) -> StoreResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(name)
}

/// Id of a record file, `None` for anything else in the directory
fn record_id(path: &Path) -> Option<TableId> {
    if path.extension()? != "json" {
        return None;
    }
    path.file_stem()?.to_str()?.parse::<u64>().ok().map(TableId)
}
