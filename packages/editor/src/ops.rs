//! # Structural edits
//!
//! Pure operations on a single table: each takes the current table and
//! returns the edited one. The caller puts the result back at its place in
//! the document tree and saves it (see [`crate::Document`]).
//!
//! Every operation is total over its inputs:
//! - coordinates outside the grid are no-ops
//! - deleting the last row or column is a no-op, so a table is never
//!   smaller than 1×1
//! - freeze counts are clamped to the grid after every shrink
//!
//! The only failure is asking a cell for something its content type cannot
//! do, such as editing the text of an image.

use crate::content::{self, ContentChange};
use crate::MutationError;
use gridnest_model::{Cell, CellCoord, ContentType, IdSource, Table, TablePreset};

fn edit(table: &Table, apply: impl FnOnce(&mut Table)) -> Table {
    let mut next = table.clone();
    apply(&mut next);
    next
}

fn try_edit(
    table: &Table,
    apply: impl FnOnce(&mut Table) -> Result<(), MutationError>,
) -> Result<Table, MutationError> {
    let mut next = table.clone();
    apply(&mut next)?;
    Ok(next)
}

pub fn add_row(table: &Table) -> Table {
    edit(table, push_row)
}

pub fn add_column(table: &Table) -> Table {
    edit(table, push_column)
}

pub fn delete_row(table: &Table, row: usize) -> Table {
    edit(table, |t| remove_row(t, row))
}

pub fn delete_column(table: &Table, col: usize) -> Table {
    edit(table, |t| remove_column(t, col))
}

pub fn edit_cell_text(table: &Table, cell: CellCoord, text: &str) -> Result<Table, MutationError> {
    try_edit(table, |t| set_cell_text(t, cell, text))
}

pub fn delete_cell_content(table: &Table, cell: CellCoord) -> Table {
    edit(table, |t| reset_cell(t, cell))
}

pub fn duplicate_cell(table: &Table, cell: CellCoord, ids: &mut dyn IdSource) -> Table {
    edit(table, |t| copy_cell_right(t, cell, ids))
}

pub fn freeze_rows_through(table: &Table, row: usize) -> Table {
    edit(table, |t| freeze_rows(t, row))
}

pub fn freeze_columns_through(table: &Table, col: usize) -> Table {
    edit(table, |t| freeze_columns(t, col))
}

pub fn unfreeze(table: &Table) -> Table {
    edit(table, |t| t.frozen.clear())
}

pub fn create_nested_table(
    table: &Table,
    cell: CellCoord,
    preset: impl Into<TablePreset>,
    ids: &mut dyn IdSource,
) -> Table {
    let preset = preset.into();
    edit(table, |t| put_nested_table(t, cell, preset, ids))
}

pub fn set_cell_content_type(
    table: &Table,
    cell: CellCoord,
    content_type: ContentType,
    preset: Option<TablePreset>,
    ids: &mut dyn IdSource,
) -> Result<Table, MutationError> {
    try_edit(table, |t| change_content_type(t, cell, content_type, preset, ids))
}

pub fn set_cell_image(table: &Table, cell: CellCoord, bytes: &[u8], mime: &str) -> Table {
    edit(table, |t| put_image(t, cell, content::image_data_uri(bytes, mime)))
}

pub fn rename_table(table: &Table, name: &str) -> Table {
    edit(table, |t| t.name = name.to_string())
}

// In-place forms, shared with `Mutation::apply`

pub(crate) fn push_row(table: &mut Table) {
    let width = table.column_count();
    table.rows.push(vec![Cell::empty(); width]);
}

pub(crate) fn push_column(table: &mut Table) {
    for row in &mut table.rows {
        row.push(Cell::empty());
    }
}

pub(crate) fn remove_row(table: &mut Table, row: usize) {
    if table.row_count() <= 1 || row >= table.row_count() {
        tracing::debug!(table = %table.id, row, "delete row ignored");
        return;
    }
    table.rows.remove(row);
    clamp_frozen(table);
}

pub(crate) fn remove_column(table: &mut Table, col: usize) {
    if table.column_count() <= 1 || col >= table.column_count() {
        tracing::debug!(table = %table.id, col, "delete column ignored");
        return;
    }
    for row in &mut table.rows {
        if col < row.len() {
            row.remove(col);
        }
    }
    clamp_frozen(table);
}

fn clamp_frozen(table: &mut Table) {
    let (rows, columns) = (table.row_count(), table.column_count());
    table.frozen.clamp(rows, columns);
}

pub(crate) fn set_cell_text(table: &mut Table, coord: CellCoord, text: &str) -> Result<(), MutationError> {
    let Some(cell) = table.cell_mut(coord) else {
        tracing::debug!(%coord, "edit outside the grid ignored");
        return Ok(());
    };

    let content_type = cell.content_type();
    match cell.text_value_mut() {
        Some(value) => {
            *value = text.to_string();
            Ok(())
        }
        None => Err(MutationError::invalid_operation("edit text", content_type)),
    }
}

pub(crate) fn reset_cell(table: &mut Table, coord: CellCoord) {
    if let Some(cell) = table.cell_mut(coord) {
        *cell = Cell::empty();
    }
}

/// Copy a cell over its right-hand neighbour. A nested table is copied by
/// value and every table in the copy gets a fresh id.
pub(crate) fn copy_cell_right(table: &mut Table, coord: CellCoord, ids: &mut dyn IdSource) {
    let target = coord.right();
    if !table.contains(coord) || !table.contains(target) || target == coord {
        tracing::debug!(table = %table.id, %coord, "no cell to the right, duplicate ignored");
        return;
    }

    let Some(mut copy) = table.cell(coord).cloned() else {
        return;
    };
    if let Some(nested) = copy.as_table_mut() {
        nested.reassign_ids(ids);
    }
    if let Some(slot) = table.cell_mut(target) {
        *slot = copy;
    }
}

pub(crate) fn freeze_rows(table: &mut Table, row: usize) {
    let rows = table.row_count();
    table.frozen.freeze_rows_through(row, rows);
}

pub(crate) fn freeze_columns(table: &mut Table, col: usize) {
    let columns = table.column_count();
    table.frozen.freeze_columns_through(col, columns);
}

pub(crate) fn put_nested_table(
    table: &mut Table,
    coord: CellCoord,
    preset: TablePreset,
    ids: &mut dyn IdSource,
) {
    match table.cell_mut(coord) {
        Some(cell) => *cell = Cell::table(content::build_nested_table(preset, ids)),
        None => tracing::debug!(%coord, "nested table outside the grid ignored"),
    }
}

pub(crate) fn change_content_type(
    table: &mut Table,
    coord: CellCoord,
    content_type: ContentType,
    preset: Option<TablePreset>,
    ids: &mut dyn IdSource,
) -> Result<(), MutationError> {
    let Some(cell) = table.cell_mut(coord) else {
        return Ok(());
    };

    match content::set_content_type(cell, content_type, preset, ids) {
        ContentChange::Applied(next) => *cell = next,
        ContentChange::Unchanged => {}
        ContentChange::AwaitingTableSize => return Err(MutationError::TableSizeRequired),
    }
    Ok(())
}

pub(crate) fn put_image(table: &mut Table, coord: CellCoord, uri: String) {
    if let Some(cell) = table.cell_mut(coord) {
        *cell = content::image_cell_from_uri(uri);
    }
}
