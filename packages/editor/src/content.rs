//! # Content-type transitions
//!
//! Changing a cell's content type replaces its value with the canonical
//! empty value of the new type:
//!
//! | type          | canonical value            |
//! |---------------|----------------------------|
//! | `text`        | `""`                       |
//! | `image`       | `""` (awaiting an image)   |
//! | `code`        | `// Code here`             |
//! | `separator`   | `---`                      |
//! | `action-list` | two unchecked tasks        |
//! | `drawing`     | `""`                       |
//! | `diagram`     | `""`                       |
//! | `table`       | fresh table of chosen size |
//!
//! Choosing the type a cell already has keeps its value. Choosing `table`
//! without a size leaves the cell alone until a size is picked.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use gridnest_model::{Cell, CellContent, ContentType, IdSource, Table, TablePreset};

pub const CODE_PLACEHOLDER: &str = "// Code here";
pub const SEPARATOR_MARKER: &str = "---";
pub const ACTION_LIST_TEMPLATE: &str = "□ Task 1\n□ Task 2";

/// Outcome of choosing a content type for a cell
#[derive(Debug, Clone, PartialEq)]
pub enum ContentChange {
    /// The cell to store in place of the old one
    Applied(Cell),

    /// The cell already has this type; its value is kept
    Unchanged,

    /// `table` was chosen without a size
    AwaitingTableSize,
}

/// Canonical initial content of every type except `table`, whose initial
/// value depends on a chosen size
pub fn canonical_content(content_type: ContentType) -> Option<CellContent> {
    let content = match content_type {
        ContentType::Text => CellContent::Text(String::new()),
        ContentType::Image => CellContent::Image(String::new()),
        ContentType::Code => CellContent::Code(CODE_PLACEHOLDER.to_string()),
        ContentType::Separator => CellContent::Separator(SEPARATOR_MARKER.to_string()),
        ContentType::ActionList => CellContent::ActionList(ACTION_LIST_TEMPLATE.to_string()),
        ContentType::Drawing => CellContent::Drawing(String::new()),
        ContentType::Diagram => CellContent::Diagram(String::new()),
        ContentType::Table => return None,
    };
    Some(content)
}

/// Fresh blank nested table. `Headed` presets build the same grid as
/// their plain counterparts.
pub fn build_nested_table(preset: TablePreset, ids: &mut dyn IdSource) -> Table {
    Table::blank(ids.next_id(), preset.size)
}

pub fn set_content_type(
    cell: &Cell,
    content_type: ContentType,
    preset: Option<TablePreset>,
    ids: &mut dyn IdSource,
) -> ContentChange {
    if content_type == ContentType::Table {
        return match preset {
            Some(preset) => ContentChange::Applied(Cell::table(build_nested_table(preset, ids))),
            None if cell.content_type() == ContentType::Table => ContentChange::Unchanged,
            None => ContentChange::AwaitingTableSize,
        };
    }

    if cell.content_type() == content_type {
        return ContentChange::Unchanged;
    }

    match canonical_content(content_type) {
        Some(content) => ContentChange::Applied(Cell::new(content)),
        None => ContentChange::AwaitingTableSize,
    }
}

/// `data:` URI for raw image bytes
pub fn image_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Image cell holding `bytes`; the previous content type does not matter
pub fn image_cell_from_bytes(bytes: &[u8], mime: &str) -> Cell {
    image_cell_from_uri(image_data_uri(bytes, mime))
}

pub fn image_cell_from_uri(uri: impl Into<String>) -> Cell {
    Cell::new(CellContent::Image(uri.into()))
}
