//! # Gridnest Editor
//!
//! Mutation engine for nested-table documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Table / Cell tree, ids, paths        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Pure structural edits (ops)              │
//! │  - Content-type transitions                 │
//! │  - Path-addressed mutations on the root     │
//! │  - Save sink after every accepted edit      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: catalog of root tables + storage │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Root is the unit of change**: every edit yields a new root
//! 2. **Total operations**: bad coordinates are no-ops, never panics
//! 3. **View state stays out of the model**: menus, hover and the pending
//!    table-size choice live in [`EditSession`]
//! 4. **Last write wins**: saves replace the stored table wholesale
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridnest_editor::{Document, Mutation};
//! use gridnest_model::{CellCoord, Table, TableId, TablePath, TableSize};
//!
//! let root = Table::root(TableId(1), "Plan", TableSize::DEFAULT);
//! let mut doc = Document::new(root)?
//!     .with_sink(|id: TableId, table: &Table| println!("saving {} ({})", id, table.name));
//!
//! doc.apply(Mutation::EditCellText {
//!     path: TablePath::root(),
//!     cell: CellCoord::new(0, 0),
//!     text: "Owner".to_string(),
//! })?;
//! ```

pub mod anchor;
pub mod content;
mod document;
mod errors;
mod mutations;
pub mod ops;
mod session;

pub use anchor::{compute_menu_anchor, GridSize, Horizontal, MenuAnchor, Vertical};
pub use content::ContentChange;
pub use document::{Document, SaveSink};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use session::{CellTarget, EditSession, MenuState, OpenMenu, TypePicker, ViewState};
