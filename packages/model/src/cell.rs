//! # Cells
//!
//! A cell holds exactly one typed content value. The content type is the
//! variant tag, so a cell can never claim one type while holding another.
//!
//! Persisted shape (shared with the host):
//!
//! ```text
//! { "type": "text",  "content": "hello" }
//! { "type": "table", "content": { "id": 4, "name": "Table 2x2", "rows": [...] } }
//! ```

use crate::{ModelError, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag identifying which variant a cell currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Text,
    Image,
    Table,
    Code,
    Separator,
    ActionList,
    Drawing,
    Diagram,
}

impl ContentType {
    pub const ALL: [ContentType; 8] = [
        ContentType::Text,
        ContentType::Image,
        ContentType::Table,
        ContentType::Code,
        ContentType::Separator,
        ContentType::ActionList,
        ContentType::Drawing,
        ContentType::Diagram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Table => "table",
            ContentType::Code => "code",
            ContentType::Separator => "separator",
            ContentType::ActionList => "action-list",
            ContentType::Drawing => "drawing",
            ContentType::Diagram => "diagram",
        }
    }

    /// Whether the content is a string the user edits in place
    pub fn is_text_bearing(self) -> bool {
        matches!(
            self,
            ContentType::Text | ContentType::Code | ContentType::ActionList | ContentType::Separator
        )
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ModelError::UnknownContentType(s.to_string()))
    }
}

/// Cell content, one variant per content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum CellContent {
    Text(String),

    /// Data URI or URL; empty while awaiting an image
    Image(String),

    /// Nested table, owned exclusively by this cell
    Table(Box<Table>),

    Code(String),

    Separator(String),

    /// Checklist lines separated by `\n`
    ActionList(String),

    /// Opaque payload owned by the drawing surface
    Drawing(String),

    /// Opaque payload owned by the diagram surface
    Diagram(String),
}

impl CellContent {
    pub fn content_type(&self) -> ContentType {
        match self {
            CellContent::Text(_) => ContentType::Text,
            CellContent::Image(_) => ContentType::Image,
            CellContent::Table(_) => ContentType::Table,
            CellContent::Code(_) => ContentType::Code,
            CellContent::Separator(_) => ContentType::Separator,
            CellContent::ActionList(_) => ContentType::ActionList,
            CellContent::Drawing(_) => ContentType::Drawing,
            CellContent::Diagram(_) => ContentType::Diagram,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Text(String::new())
    }
}

/// Smallest addressable unit of a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    pub content: CellContent,
}

impl Cell {
    pub fn new(content: CellContent) -> Self {
        Self { content }
    }

    /// `Text("")`, the content every new cell starts with
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(CellContent::Text(value.into()))
    }

    pub fn table(table: Table) -> Self {
        Self::new(CellContent::Table(Box::new(table)))
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    /// Value of a text-bearing cell
    pub fn text_value(&self) -> Option<&str> {
        match &self.content {
            CellContent::Text(s)
            | CellContent::Code(s)
            | CellContent::Separator(s)
            | CellContent::ActionList(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn text_value_mut(&mut self) -> Option<&mut String> {
        match &mut self.content {
            CellContent::Text(s)
            | CellContent::Code(s)
            | CellContent::Separator(s)
            | CellContent::ActionList(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match &self.content {
            CellContent::Table(table) => Some(table.as_ref()),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.content {
            CellContent::Table(table) => Some(table.as_mut()),
            _ => None,
        }
    }

    /// True for `Text("")`
    pub fn is_blank(&self) -> bool {
        matches!(&self.content, CellContent::Text(s) if s.is_empty())
    }
}
