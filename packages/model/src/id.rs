use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable table identifier, assigned at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u64);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TableId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Produces ids for newly created tables (roots, nested tables, duplicates)
pub trait IdSource {
    fn next_id(&mut self) -> TableId;
}

/// Sequential id generator
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Continue after `id`, so a loaded tree never sees one of its ids again
    pub fn starting_after(id: TableId) -> Self {
        Self { last: id.0 }
    }

    /// Most recently issued id
    pub fn last(&self) -> Option<TableId> {
        (self.last > 0).then_some(TableId(self.last))
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> TableId {
        self.last += 1;
        TableId(self.last)
    }
}
