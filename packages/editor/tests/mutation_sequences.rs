//! Long mutation sequences
//!
//! This tests:
//! - Rectangularity and the 1×1 floor after any sequence of edits
//! - Freeze counts staying inside the grid
//! - Tree invariants (unique ids, no table inside itself) with nesting
//! - Deep nesting addressed by path

use gridnest_editor::{Document, Mutation};
use gridnest_model::{CellCoord, ContentType, Table, TableId, TablePath, TablePreset, TableSize};
use proptest::prelude::*;

fn preset() -> impl Strategy<Value = TablePreset> {
    (1usize..4, 1usize..4, any::<bool>()).prop_map(|(rows, columns, headed)| TablePreset {
        size: TableSize::new(rows, columns).unwrap(),
        headed,
    })
}

/// Root-level edits; indices may run past the grid on purpose
fn mutation() -> impl Strategy<Value = Mutation> {
    let index = 0usize..8;
    let cell = (0usize..8, 0usize..8).prop_map(|(row, col)| CellCoord::new(row, col));

    prop_oneof![
        1 => Just(Mutation::AddRow { path: TablePath::root() }),
        1 => Just(Mutation::AddColumn { path: TablePath::root() }),
        2 => index.clone().prop_map(|row| Mutation::DeleteRow { path: TablePath::root(), row }),
        2 => index.clone().prop_map(|col| Mutation::DeleteColumn { path: TablePath::root(), col }),
        1 => index.clone().prop_map(|row| Mutation::FreezeRowsThrough { path: TablePath::root(), row }),
        1 => index.prop_map(|col| Mutation::FreezeColumnsThrough { path: TablePath::root(), col }),
        1 => Just(Mutation::Unfreeze { path: TablePath::root() }),
        1 => cell.clone().prop_map(|cell| Mutation::DuplicateCell { path: TablePath::root(), cell }),
        1 => cell.clone().prop_map(|cell| Mutation::DeleteCellContent { path: TablePath::root(), cell }),
        2 => (cell, preset()).prop_map(|(cell, preset)| Mutation::CreateNestedTable {
            path: TablePath::root(),
            cell,
            preset,
        }),
    ]
}

fn check_invariants(table: &Table) -> Result<(), TestCaseError> {
    let width = table.column_count();
    prop_assert!(table.row_count() >= 1, "at least one row");
    prop_assert!(width >= 1, "at least one column");
    prop_assert!(table.rows.iter().all(|row| row.len() == width), "rectangular");
    prop_assert!(table.frozen.rows <= table.row_count());
    prop_assert!(table.frozen.columns <= width);
    prop_assert_eq!(table.validate(), Ok(()));
    Ok(())
}

fn assert_invariants(table: &Table) {
    if let Err(err) = check_invariants(table) {
        panic!("{}", err);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_sequences_keep_invariants(
        rows in 1usize..5,
        columns in 1usize..5,
        mutations in prop::collection::vec(mutation(), 1..200),
    ) {
        let mut doc = Document::new(Table::blank(TableId(1), TableSize::new(rows, columns).unwrap())).unwrap();
        let mut changes = 0;

        for mutation in mutations {
            let result = doc.apply(mutation).unwrap();
            changes += u64::from(result.changed);
            check_invariants(doc.root())?;
        }

        prop_assert_eq!(doc.version(), changes);
    }

    #[test]
    fn nested_ids_never_collide(presets in prop::collection::vec(preset(), 1..12)) {
        let mut doc = Document::new(Table::blank(TableId(1), TableSize::new(1, 2).unwrap())).unwrap();
        let mut path = TablePath::root();

        for preset in presets {
            doc.apply(Mutation::CreateNestedTable { path: path.clone(), cell: CellCoord::new(0, 0), preset }).unwrap();
            doc.apply(Mutation::DuplicateCell { path: path.clone(), cell: CellCoord::new(0, 0) }).unwrap();
            path = path.child(CellCoord::new(0, 0));
        }

        check_invariants(doc.root())?;
        let mut ids = doc.root().ids();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }
}

#[test]
fn test_shrink_to_floor() {
    let mut doc = Document::new(Table::blank(TableId(1), TableSize::new(4, 4).unwrap())).unwrap();
    doc.apply(Mutation::FreezeRowsThrough { path: TablePath::root(), row: 3 }).unwrap();
    doc.apply(Mutation::FreezeColumnsThrough { path: TablePath::root(), col: 3 }).unwrap();

    for _ in 0..10 {
        doc.apply(Mutation::DeleteRow { path: TablePath::root(), row: 0 }).unwrap();
        doc.apply(Mutation::DeleteColumn { path: TablePath::root(), col: 0 }).unwrap();
        assert_invariants(doc.root());
    }

    let table = doc.root();
    assert_eq!((table.row_count(), table.column_count()), (1, 1));
    assert_eq!((table.frozen.rows, table.frozen.columns), (1, 1));
}

#[test]
fn test_deep_nesting_by_path() {
    let mut doc = Document::new(Table::blank(TableId(1), TableSize::new(1, 1).unwrap())).unwrap();
    let mut path = TablePath::root();

    for _ in 0..12 {
        doc.apply(Mutation::SetContentType {
            path: path.clone(),
            cell: CellCoord::new(0, 0),
            content_type: ContentType::Table,
            preset: Some(TableSize::new(1, 1).unwrap().into()),
        })
        .unwrap();
        path = path.child(CellCoord::new(0, 0));
    }

    let root = doc.root();
    assert_eq!(root.depth(), 13);
    assert_eq!(root.table_count(), 13);
    assert_invariants(root);

    let deepest = root.table_at(&path).unwrap();
    assert_eq!(root.find(deepest.id), Some(path));
}

#[test]
fn test_duplicated_subtrees_stay_disjoint() {
    let mut doc = Document::new(Table::blank(TableId(1), TableSize::new(1, 4).unwrap())).unwrap();
    let first = TablePath::root().child(CellCoord::new(0, 0));

    doc.apply(Mutation::CreateNestedTable {
        path: TablePath::root(),
        cell: CellCoord::new(0, 0),
        preset: TableSize::new(2, 2).unwrap().into(),
    })
    .unwrap();
    doc.apply(Mutation::CreateNestedTable {
        path: first.clone(),
        cell: CellCoord::new(1, 1),
        preset: TableSize::new(1, 1).unwrap().into(),
    })
    .unwrap();

    for col in 0..3 {
        doc.apply(Mutation::DuplicateCell {
            path: TablePath::root(),
            cell: CellCoord::new(0, col),
        })
        .unwrap();
    }

    // 1 root + 4 copies of a two-table subtree
    assert_eq!(doc.root().table_count(), 9);
    assert_invariants(doc.root());

    doc.apply(Mutation::EditCellText {
        path: TablePath::root().child(CellCoord::new(0, 3)),
        cell: CellCoord::new(0, 0),
        text: "only here".into(),
    })
    .unwrap();
    assert!(doc.root().table_at(&first).unwrap().rows[0][0].is_blank());
}
