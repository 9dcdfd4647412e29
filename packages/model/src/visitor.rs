use crate::{Cell, CellContent, CellCoord, Table, TablePath};

/// Visitor over the document tree, parents before children.
///
/// The default methods walk every cell and descend into nested tables.
/// Override `visit_table` or `visit_cell` and call the matching `walk_*`
/// function to keep descending.
pub trait TableVisitor: Sized {
    fn visit_table(&mut self, table: &Table, path: &TablePath) {
        walk_table(self, table, path);
    }

    fn visit_cell(&mut self, cell: &Cell, path: &TablePath, coord: CellCoord) {
        walk_cell(self, cell, path, coord);
    }
}

pub fn walk_table<V: TableVisitor>(visitor: &mut V, table: &Table, path: &TablePath) {
    for (row_index, row) in table.rows.iter().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            visitor.visit_cell(cell, path, CellCoord::new(row_index, col_index));
        }
    }
}

pub fn walk_cell<V: TableVisitor>(visitor: &mut V, cell: &Cell, path: &TablePath, coord: CellCoord) {
    if let CellContent::Table(nested) = &cell.content {
        visitor.visit_table(nested, &path.child(coord));
    }
}

/// Mutable counterpart of [`TableVisitor`]
pub trait TableVisitorMut: Sized {
    fn visit_table_mut(&mut self, table: &mut Table) {
        walk_table_mut(self, table);
    }
}

pub fn walk_table_mut<V: TableVisitorMut>(visitor: &mut V, table: &mut Table) {
    for cell in table.rows.iter_mut().flatten() {
        if let CellContent::Table(nested) = &mut cell.content {
            visitor.visit_table_mut(nested);
        }
    }
}
