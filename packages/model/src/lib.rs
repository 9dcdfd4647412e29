//! # Gridnest Model
//!
//! Data model for documents built from nested tables.
//!
//! - [`Cell`] holds one typed [`CellContent`] value
//! - [`Table`] is a named, identified rectangular grid of cells
//! - a cell of type `table` owns another [`Table`], which makes every root
//!   table the root of a document tree of unbounded depth
//!
//! The model only describes structure. Edits live in `gridnest-editor`.

pub mod cell;
pub mod error;
pub mod freeze;
pub mod id;
pub mod path;
pub mod size;
pub mod table;
pub mod visitor;

pub use cell::{Cell, CellContent, ContentType};
pub use error::{ModelError, ModelResult};
pub use freeze::{FreezeState, PaneRegion};
pub use id::{IdSource, SequentialIds, TableId};
pub use path::{CellCoord, TablePath};
pub use size::{TablePreset, TableSize, HEADED_PRESETS, PLAIN_PRESETS};
pub use table::Table;
pub use visitor::{walk_cell, walk_table, walk_table_mut, TableVisitor, TableVisitorMut};
