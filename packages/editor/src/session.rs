//! # Edit Session Management
//!
//! One client's view of a document: the two-phase content-type picker plus
//! transient view state (hovered cell, open menu, cell being edited).
//! None of it is persisted or stored in the table tree.
//!
//! Choosing `table` as a content type does not change the cell. The session
//! remembers the cell and opens the size menu; the cell only becomes a
//! table once [`EditSession::choose_table_size`] is called.

use crate::anchor::{compute_menu_anchor, GridSize, MenuAnchor};
use crate::{Document, EditorError, Mutation, MutationResult};
use gridnest_model::{CellCoord, ContentType, TablePath, TablePreset};

/// A cell somewhere in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTarget {
    pub path: TablePath,
    pub cell: CellCoord,
}

impl CellTarget {
    pub fn new(path: TablePath, cell: CellCoord) -> Self {
        Self { path, cell }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypePicker {
    #[default]
    Idle,

    /// `table` was chosen for this cell; waiting for a size
    AwaitingTableSize { path: TablePath, cell: CellCoord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMenu {
    ContentType,
    TableSize,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub kind: OpenMenu,
    pub target: CellTarget,
    pub anchor: MenuAnchor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub hovered: Option<CellTarget>,
    pub editing: Option<CellTarget>,
    pub menu: Option<MenuState>,
}

/// Single edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    picker: TypePicker,
    view: ViewState,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            picker: TypePicker::Idle,
            view: ViewState::default(),
        }
    }

    pub fn picker(&self) -> &TypePicker {
        &self.picker
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Apply a mutation and close any open menu
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(mutation);
        self.close_menus();
        result
    }

    /// First phase of a content-type change.
    ///
    /// Every type except `table` applies at once. `table` parks the cell in
    /// the picker and opens the size menu, even when the cell already holds
    /// a table; the chosen size then replaces it with a fresh one.
    pub fn choose_content_type(
        &mut self,
        path: TablePath,
        cell: CellCoord,
        content_type: ContentType,
    ) -> Result<MutationResult, EditorError> {
        if content_type == ContentType::Table && self.has_cell(&path, cell) {
            tracing::debug!(session = %self.id, %path, %cell, "waiting for a table size");
            self.picker = TypePicker::AwaitingTableSize {
                path: path.clone(),
                cell,
            };
            self.open_menu(OpenMenu::TableSize, path, cell);
            return Ok(MutationResult {
                version: self.document.version(),
                changed: false,
            });
        }

        self.picker = TypePicker::Idle;
        self.apply(Mutation::SetContentType {
            path,
            cell,
            content_type,
            preset: None,
        })
    }

    fn has_cell(&self, path: &TablePath, cell: CellCoord) -> bool {
        self.document
            .root()
            .table_at(path)
            .is_some_and(|table| table.contains(cell))
    }

    /// Second phase: turn the parked cell into a fresh table
    pub fn choose_table_size(
        &mut self,
        preset: impl Into<TablePreset>,
    ) -> Result<MutationResult, EditorError> {
        let TypePicker::AwaitingTableSize { path, cell } = std::mem::take(&mut self.picker) else {
            return Err(EditorError::NoPendingTableSize);
        };

        self.apply(Mutation::SetContentType {
            path,
            cell,
            content_type: ContentType::Table,
            preset: Some(preset.into()),
        })
    }

    pub fn cancel_picker(&mut self) {
        self.picker = TypePicker::Idle;
        self.close_menus();
    }

    /// Open a menu on a cell. Returns `None` when the cell does not exist.
    pub fn open_menu(
        &mut self,
        kind: OpenMenu,
        path: TablePath,
        cell: CellCoord,
    ) -> Option<MenuAnchor> {
        let table = self.document.root().table_at(&path)?;
        if !table.contains(cell) {
            return None;
        }

        let anchor = compute_menu_anchor(cell.row, cell.col, GridSize::of(table));
        self.view.menu = Some(MenuState {
            kind,
            target: CellTarget::new(path, cell),
            anchor,
        });
        Some(anchor)
    }

    pub fn close_menus(&mut self) {
        self.view.menu = None;
    }

    pub fn hover(&mut self, target: Option<CellTarget>) {
        self.view.hovered = target;
    }

    pub fn start_editing(&mut self, path: TablePath, cell: CellCoord) {
        self.close_menus();
        self.view.editing = Some(CellTarget::new(path, cell));
    }

    pub fn stop_editing(&mut self) {
        self.view.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Horizontal, Vertical};
    use gridnest_model::{Table, TableId, TableSize};

    fn session() -> EditSession {
        let doc = Document::new(Table::root(TableId(1), "Plan", TableSize::DEFAULT)).unwrap();
        EditSession::new("client-1", doc)
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert_eq!(session.picker(), &TypePicker::Idle);
        assert_eq!(session.view(), &ViewState::default());
    }

    #[test]
    fn test_table_choice_waits_for_size() {
        let mut session = session();
        let cell = CellCoord::new(2, 2);

        let result = session
            .choose_content_type(TablePath::root(), cell, ContentType::Table)
            .unwrap();
        assert!(!result.changed);
        assert!(session.document.root().rows[2][2].is_blank());
        assert_eq!(
            session.picker(),
            &TypePicker::AwaitingTableSize {
                path: TablePath::root(),
                cell
            }
        );

        let menu = session.view().menu.as_ref().unwrap();
        assert_eq!(menu.kind, OpenMenu::TableSize);
        assert_eq!(menu.anchor.vertical, Vertical::Above);
        assert_eq!(menu.anchor.horizontal, Horizontal::Left);

        let result = session.choose_table_size(TableSize::new(2, 2).unwrap()).unwrap();
        assert!(result.changed);
        assert_eq!(session.picker(), &TypePicker::Idle);
        assert!(session.view().menu.is_none());

        let nested = session.document.root().rows[2][2].as_table().unwrap();
        assert_eq!(nested.id, TableId(2));
    }

    #[test]
    fn test_table_choice_on_table_cell_replaces_it() {
        let mut session = session();
        let cell = CellCoord::new(1, 1);
        session
            .choose_content_type(TablePath::root(), cell, ContentType::Table)
            .unwrap();
        session.choose_table_size(TableSize::DEFAULT).unwrap();
        assert_eq!(session.document.root().rows[1][1].as_table().unwrap().id, TableId(2));

        let result = session
            .choose_content_type(TablePath::root(), cell, ContentType::Table)
            .unwrap();
        assert!(!result.changed);
        assert!(matches!(session.picker(), TypePicker::AwaitingTableSize { .. }));
        assert_eq!(session.view().menu.as_ref().unwrap().kind, OpenMenu::TableSize);

        let result = session.choose_table_size(TableSize::new(1, 2).unwrap()).unwrap();
        assert!(result.changed);
        assert_eq!(session.document.version(), 2);

        let nested = session.document.root().rows[1][1].as_table().unwrap();
        assert_eq!(nested.id, TableId(3));
        assert_eq!((nested.row_count(), nested.column_count()), (1, 2));
        assert_eq!(session.document.root().find(TableId(2)), None);
    }

    #[test]
    fn test_size_without_pending_choice() {
        let mut session = session();
        assert!(matches!(
            session.choose_table_size(TableSize::DEFAULT),
            Err(EditorError::NoPendingTableSize)
        ));
    }

    #[test]
    fn test_cancel_leaves_cell_untouched() {
        let mut session = session();
        session
            .choose_content_type(TablePath::root(), CellCoord::new(0, 0), ContentType::Table)
            .unwrap();
        session.cancel_picker();

        assert_eq!(session.picker(), &TypePicker::Idle);
        assert!(session.view().menu.is_none());
        assert_eq!(session.document.version(), 0);
    }

    #[test]
    fn test_other_types_apply_at_once() {
        let mut session = session();
        session
            .choose_content_type(TablePath::root(), CellCoord::new(0, 1), ContentType::Code)
            .unwrap();
        assert_eq!(
            session.document.root().rows[0][1].text_value(),
            Some("// Code here")
        );
        assert_eq!(session.document.version(), 1);
    }

    #[test]
    fn test_menu_closes_after_edit() {
        let mut session = session();
        let anchor = session
            .open_menu(OpenMenu::Context, TablePath::root(), CellCoord::new(0, 0))
            .unwrap();
        assert_eq!(anchor.vertical, Vertical::Below);
        assert_eq!(anchor.horizontal, Horizontal::Right);

        session.apply(Mutation::AddRow { path: TablePath::root() }).unwrap();
        assert!(session.view().menu.is_none());
    }

    #[test]
    fn test_menu_outside_grid() {
        let mut session = session();
        assert!(session
            .open_menu(OpenMenu::Context, TablePath::root(), CellCoord::new(9, 9))
            .is_none());
        assert!(session.view().menu.is_none());
    }
}
