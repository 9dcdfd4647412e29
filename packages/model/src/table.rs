//! # Tables and the document tree
//!
//! A `Table` is a rectangular grid of cells. Any cell may hold another
//! table, so a root table is also the root of a document tree:
//!
//! ```text
//! Table #1
//! ├── (0, 0) text
//! ├── (0, 1) table ── Table #4
//! │                   ├── (0, 0) code
//! │                   └── (1, 1) table ── Table #9
//! └── (1, 0) image
//! ```
//!
//! Each nested table is owned by exactly one cell. Tables are only ever
//! created fresh with a new id, so the tree cannot contain a cycle.

use crate::visitor::{walk_table, walk_table_mut, TableVisitor, TableVisitorMut};
use crate::{
    Cell, CellCoord, FreezeState, IdSource, ModelError, ModelResult, TableId, TablePath, TableSize,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,

    pub name: String,

    /// Row-major grid; every row has the same length
    pub rows: Vec<Vec<Cell>>,

    #[serde(default, skip_serializing_if = "FreezeState::is_empty")]
    pub frozen: FreezeState,
}

impl Table {
    /// Empty-text grid named after its dimensions, e.g. `Table 2x3`
    pub fn blank(id: TableId, size: TableSize) -> Self {
        Self::root(id, format!("Table {}", size), size)
    }

    pub fn root(id: TableId, name: impl Into<String>, size: TableSize) -> Self {
        Self {
            id,
            name: name.into(),
            rows: vec![vec![Cell::empty(); size.columns()]; size.rows()],
            frozen: FreezeState::default(),
        }
    }

    /// Grid whose cells read `R1C1`, `R1C2`, ...
    pub fn labelled(id: TableId, name: impl Into<String>, size: TableSize) -> Self {
        let rows = (1..=size.rows())
            .map(|r| (1..=size.columns()).map(|c| Cell::text(format!("R{}C{}", r, c))).collect())
            .collect();

        Self {
            id,
            name: name.into(),
            rows,
            frozen: FreezeState::default(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// `None` only for a grid that fails [`Table::validate`]
    pub fn size(&self) -> Option<TableSize> {
        TableSize::new(self.row_count(), self.column_count()).ok()
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.row_count() && coord.col < self.column_count()
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.rows.get(coord.row)?.get(coord.col)
    }

    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.rows.get_mut(coord.row)?.get_mut(coord.col)
    }

    /// Table reached by following `path` from this table
    pub fn table_at(&self, path: &TablePath) -> Option<&Table> {
        path.steps()
            .iter()
            .try_fold(self, |table, step| table.cell(*step)?.as_table())
    }

    pub fn table_at_mut(&mut self, path: &TablePath) -> Option<&mut Table> {
        let mut table = self;
        for step in path.steps() {
            table = table.cell_mut(*step)?.as_table_mut()?;
        }
        Some(table)
    }

    /// Path to the table with `id`, if it is in this tree
    pub fn find(&self, id: TableId) -> Option<TablePath> {
        let mut finder = Finder { id, found: None };
        finder.visit_table(self, &TablePath::root());
        finder.found
    }

    /// Every table id in the tree, parents first
    pub fn ids(&self) -> Vec<TableId> {
        let mut collector = IdCollector(Vec::new());
        collector.visit_table(self, &TablePath::root());
        collector.0
    }

    pub fn max_id(&self) -> TableId {
        self.ids().into_iter().max().unwrap_or(self.id)
    }

    /// Number of tables in the tree, this one included
    pub fn table_count(&self) -> usize {
        self.ids().len()
    }

    /// Nesting levels, 1 for a table without nested tables
    pub fn depth(&self) -> usize {
        let mut meter = DepthMeter(0);
        meter.visit_table(self, &TablePath::root());
        meter.0 + 1
    }

    /// Give this table and every table below it a fresh id
    pub fn reassign_ids(&mut self, ids: &mut dyn IdSource) {
        Reassigner(ids).visit_table_mut(self);
    }

    /// Check the structural invariants of the whole tree: non-empty,
    /// rectangular, freeze counts inside the grid, and no id owned twice.
    pub fn validate(&self) -> ModelResult<()> {
        let mut validator = Validator {
            seen: HashSet::new(),
            error: None,
        };
        validator.visit_table(self, &TablePath::root());
        match validator.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct Finder {
    id: TableId,
    found: Option<TablePath>,
}

impl TableVisitor for Finder {
    fn visit_table(&mut self, table: &Table, path: &TablePath) {
        if self.found.is_some() {
            return;
        }
        if table.id == self.id {
            self.found = Some(path.clone());
            return;
        }
        walk_table(self, table, path);
    }
}

struct IdCollector(Vec<TableId>);

impl TableVisitor for IdCollector {
    fn visit_table(&mut self, table: &Table, path: &TablePath) {
        self.0.push(table.id);
        walk_table(self, table, path);
    }
}

struct DepthMeter(usize);

impl TableVisitor for DepthMeter {
    fn visit_table(&mut self, table: &Table, path: &TablePath) {
        self.0 = self.0.max(path.depth());
        walk_table(self, table, path);
    }
}

struct Reassigner<'a>(&'a mut dyn IdSource);

impl TableVisitorMut for Reassigner<'_> {
    fn visit_table_mut(&mut self, table: &mut Table) {
        table.id = self.0.next_id();
        walk_table_mut(self, table);
    }
}

struct Validator {
    seen: HashSet<TableId>,
    error: Option<ModelError>,
}

impl Validator {
    fn check(&mut self, table: &Table) -> ModelResult<()> {
        if !self.seen.insert(table.id) {
            return Err(ModelError::DuplicateId(table.id));
        }

        let columns = table.column_count();
        if table.row_count() == 0 || columns == 0 {
            return Err(ModelError::EmptyTable(table.id));
        }

        if let Some((row, found)) = table
            .rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != columns)
        {
            return Err(ModelError::RaggedRow {
                table: table.id,
                row,
                expected: columns,
                found,
            });
        }

        if !table.frozen.fits(table.row_count(), columns) {
            return Err(ModelError::FreezeOutOfBounds {
                table: table.id,
                rows: table.frozen.rows,
                columns: table.frozen.columns,
            });
        }

        Ok(())
    }
}

impl TableVisitor for Validator {
    fn visit_table(&mut self, table: &Table, path: &TablePath) {
        if self.error.is_some() {
            return;
        }
        match self.check(table) {
            Ok(()) => walk_table(self, table, path),
            Err(err) => self.error = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellContent, SequentialIds};

    fn size(rows: usize, columns: usize) -> TableSize {
        TableSize::new(rows, columns).unwrap()
    }

    fn nested_tree() -> Table {
        let mut grandchild = Table::blank(TableId(3), size(1, 1));
        grandchild.rows[0][0] = Cell::text("deep");

        let mut child = Table::blank(TableId(2), size(2, 2));
        child.rows[1][0] = Cell::table(grandchild);

        let mut root = Table::root(TableId(1), "Budget", size(3, 3));
        root.rows[0][2] = Cell::table(child);
        root
    }

    #[test]
    fn test_blank_table() {
        let table = Table::blank(TableId(5), size(2, 4));
        assert_eq!(table.name, "Table 2x4");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 4);
        assert!(table.rows.iter().flatten().all(Cell::is_blank));
        assert!(table.frozen.is_empty());
    }

    #[test]
    fn test_labelled_table() {
        let table = Table::labelled(TableId(1), "New Table", size(8, 6));
        assert_eq!(table.cell(CellCoord::new(0, 0)).unwrap().text_value(), Some("R1C1"));
        assert_eq!(table.cell(CellCoord::new(7, 5)).unwrap().text_value(), Some("R8C6"));
    }

    #[test]
    fn test_table_at_path() {
        let root = nested_tree();
        let path = TablePath::root().child(CellCoord::new(0, 2)).child(CellCoord::new(1, 0));

        assert_eq!(root.table_at(&TablePath::root()).unwrap().id, TableId(1));
        assert_eq!(root.table_at(&path).unwrap().id, TableId(3));

        // Path through a text cell leads nowhere
        let bad = TablePath::root().child(CellCoord::new(0, 0));
        assert!(root.table_at(&bad).is_none());
        let out_of_range = TablePath::root().child(CellCoord::new(9, 9));
        assert!(root.table_at(&out_of_range).is_none());
    }

    #[test]
    fn test_find_and_counts() {
        let root = nested_tree();
        assert_eq!(root.ids(), vec![TableId(1), TableId(2), TableId(3)]);
        assert_eq!(root.max_id(), TableId(3));
        assert_eq!(root.table_count(), 3);
        assert_eq!(root.depth(), 3);

        let path = root.find(TableId(2)).unwrap();
        assert_eq!(path.steps(), &[CellCoord::new(0, 2)]);
        assert!(root.find(TableId(99)).is_none());
    }

    #[test]
    fn test_reassign_ids_covers_descendants() {
        let mut tree = nested_tree();
        let mut ids = SequentialIds::starting_after(TableId(10));
        tree.reassign_ids(&mut ids);
        assert_eq!(tree.ids(), vec![TableId(11), TableId(12), TableId(13)]);
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        assert_eq!(nested_tree().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_ragged_rows() {
        let mut table = Table::blank(TableId(1), size(2, 2));
        table.rows[1].pop();
        assert_eq!(
            table.validate(),
            Err(ModelError::RaggedRow {
                table: TableId(1),
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut root = Table::blank(TableId(1), size(1, 2));
        root.rows[0][0] = Cell::table(Table::blank(TableId(2), size(1, 1)));
        root.rows[0][1] = Cell::table(Table::blank(TableId(2), size(1, 1)));
        assert_eq!(root.validate(), Err(ModelError::DuplicateId(TableId(2))));
    }

    #[test]
    fn test_validate_rejects_empty_and_overfrozen() {
        let mut empty = Table::blank(TableId(1), size(1, 1));
        empty.rows.clear();
        assert_eq!(empty.validate(), Err(ModelError::EmptyTable(TableId(1))));

        let mut frozen = Table::blank(TableId(1), size(2, 2));
        frozen.frozen = FreezeState::new(3, 0);
        assert!(matches!(
            frozen.validate(),
            Err(ModelError::FreezeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_persisted_shape() {
        let mut root = Table::blank(TableId(1), size(1, 2));
        root.rows[0][1] = Cell::table(Table::blank(TableId(2), size(1, 1)));

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Table 1x2",
                "rows": [[
                    { "type": "text", "content": "" },
                    { "type": "table", "content": {
                        "id": 2,
                        "name": "Table 1x1",
                        "rows": [[{ "type": "text", "content": "" }]]
                    }}
                ]]
            })
        );

        let back: Table = serde_json::from_value(json).unwrap();
        assert_eq!(back, root);
        assert!(matches!(back.rows[0][1].content, CellContent::Table(_)));
    }

    #[test]
    fn test_frozen_counts_persist_when_set() {
        let mut table = Table::blank(TableId(1), size(2, 2));
        table.frozen = FreezeState::new(1, 0);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["frozen"], serde_json::json!({ "rows": 1, "columns": 0 }));
    }
}
