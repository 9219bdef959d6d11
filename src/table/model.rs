//! Grid model: construction, the row pipeline and every state-changing
//! intent.
//!
//! Each intent updates state synchronously and, where the host application
//! should hear about it, returns the corresponding [`GridEvent`].

use super::keys::TableKeyMap;
use super::state::TableState;
use super::style::TableStyles;
use crate::cell::CellEditor;
use crate::column::{Column, EditableConfig};
use crate::config::GridConfig;
use crate::editor::{EditMode, RowEditor};
use crate::error::{GridError, Result};
use crate::event::GridEvent;
use crate::expansion::{ExpansionState, RowPath};
use crate::paginator::{self, PageDirection};
use crate::row::Row;
use crate::selection::{RowSelector, SelectionMode};
use crate::sorting::SortDirection;
use crate::value::Value;
use crate::{filtering, sorting};
use indexmap::IndexMap;
use std::collections::HashSet;

/// An interactive data grid.
///
/// The grid owns a copy of the caller's rows and derives the visible page
/// from them with filter → sort → paginate whenever state changes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::{Column, DataGrid, GridEvent, Row};
///
/// let mut grid = DataGrid::new(vec![
///     Column::new("name", "Name"),
///     Column::new("age", "Age"),
/// ])
/// .with_rows(vec![
///     Row::new().with("id", 1).with("name", "Bob").with("age", 30),
///     Row::new().with("id", 2).with("name", "Ann").with("age", 25),
/// ]);
///
/// assert_eq!(grid.sort_by("age"), GridEvent::Sort("age".into()));
/// let names: Vec<String> = grid.visible_rows().iter().map(|r| r.get("name").to_string()).collect();
/// assert_eq!(names, vec!["Ann", "Bob"]);
///
/// grid.set_filter_text("bo");
/// assert_eq!(grid.visible_rows().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    pub(super) columns: Vec<Column>,
    pub(super) rows: Vec<Row>,
    pub(super) id_field: String,
    pub(super) state: TableState,
    // filtered and sorted, before pagination
    pub(super) processed: Vec<Row>,
    pub(super) selector: RowSelector<Value>,
    pub(super) editor: RowEditor,
    pub(super) cell_editor: CellEditor,
    pub(super) popup_field: usize,
    pub(super) expansion: ExpansionState,
    pub(super) expandable: bool,
    pub(super) paginator: paginator::Model,
    pub(super) keymap: TableKeyMap,
    pub(super) styles: TableStyles,
    pub(super) cursor: usize,
    pub(super) column_cursor: usize,
    pub(super) filtering: bool,
    pub(super) focused: bool,
    pub(super) last_error: Option<String>,
}

impl Model {
    /// Creates a grid with default settings for `columns`.
    pub fn new(columns: Vec<Column>) -> Self {
        Self::build(GridConfig::new(columns))
    }

    /// Creates a grid from a validated configuration.
    pub fn from_config(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GridConfig) -> Self {
        let editor = RowEditor::new(config.edit_mode, config.editable_fields)
            .with_id_field(config.id_field.clone());
        let mut model = Self {
            columns: config.columns,
            rows: Vec::new(),
            id_field: config.id_field,
            state: TableState::new(config.page_size),
            processed: Vec::new(),
            selector: RowSelector::new(config.selection_mode),
            editor,
            cell_editor: CellEditor::new(),
            popup_field: 0,
            expansion: ExpansionState::new(),
            expandable: false,
            paginator: paginator::Model::new(),
            keymap: TableKeyMap::default(),
            styles: TableStyles::default(),
            cursor: 0,
            column_cursor: 0,
            filtering: false,
            focused: true,
            last_error: None,
        };
        model.refresh();
        model
    }

    /// Sets the rows (builder pattern).
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Shows expand/collapse markers for nested rows (builder pattern).
    ///
    /// The grid only tracks which rows are open; it has no child data. The
    /// host renders subtables when it receives [`GridEvent::Expanded`], and
    /// addresses nested rows with [`RowPath::child`] through
    /// [`Model::toggle_expanded`] and [`Model::is_row_visible`].
    ///
    /// ```rust
    /// use bubbletea_datagrid::{Column, DataGrid, GridEvent, Row, RowPath};
    ///
    /// let mut grid = DataGrid::new(vec![Column::new("name", "Name")])
    ///     .with_expandable(true)
    ///     .with_rows(vec![Row::new().with("id", 1).with("name", "Orders")]);
    ///
    /// let order = RowPath::root(1).child(100);
    /// grid.toggle_expanded(RowPath::root(1));
    /// assert!(!grid.is_row_visible(&order.child(7)));
    /// assert_eq!(
    ///     grid.toggle_expanded(order.clone()),
    ///     GridEvent::Expanded { path: order.clone(), expanded: true },
    /// );
    /// assert!(grid.is_row_visible(&order.child(7)));
    /// ```
    pub fn with_expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    /// Replaces the default styles (builder pattern).
    pub fn with_styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the default key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: TableKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the row set.
    ///
    /// Selection and expansion entries whose rows disappeared are dropped,
    /// and the current page is clamped to the new page count.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        let ids: HashSet<Value> = self
            .rows
            .iter()
            .map(|row| row.get(&self.id_field).clone())
            .collect();
        self.selector.retain(|id| ids.contains(id));
        self.expansion.retain_roots(|id| ids.contains(id));
        self.refresh();
    }

    /// Recomputes the filtered and sorted rows and clamps page and cursor.
    pub(super) fn refresh(&mut self) {
        let filtered = filtering::filter(&self.rows, &self.state.filter_text, &self.columns);
        let sorted = sorting::sort(
            &filtered,
            self.state.sort_field.as_deref(),
            self.state.sort_direction,
        );
        self.processed = sorted.into_owned();

        if self.state.clamp_page(self.processed.len()) {
            log::debug!("current page clamped to {}", self.state.current_page);
        }
        self.paginator.set_per_page(self.state.page_size);
        self.paginator.set_total_items(self.processed.len());
        self.paginator.set_page(self.state.current_page);

        let visible = self.visible_rows().len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }

    // Accessors

    /// Display columns, in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All rows, unfiltered, in caller order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Sort, filter and page state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Rows on the current page, filtered and sorted.
    pub fn visible_rows(&self) -> &[Row] {
        paginator::paginate(
            &self.processed,
            self.state.current_page,
            self.state.page_size,
        )
    }

    /// Number of rows passing the filter.
    pub fn filtered_len(&self) -> usize {
        self.processed.len()
    }

    /// Current page, starting at 1.
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Page count for the filtered rows, at least 1.
    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.processed.len(), self.state.page_size)
    }

    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    /// Cursor position within the visible page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<&Row> {
        self.visible_rows().get(self.cursor)
    }

    /// Column the column cursor is on.
    pub fn focused_column(&self) -> Option<&Column> {
        self.columns.get(self.column_cursor)
    }

    /// Returns `true` while the filter line takes key input.
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn editor(&self) -> &RowEditor {
        &self.editor
    }

    pub fn selector(&self) -> &RowSelector<Value> {
        &self.selector
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn keymap(&self) -> &TableKeyMap {
        &self.keymap
    }

    pub fn styles_mut(&mut self) -> &mut TableStyles {
        &mut self.styles
    }

    /// Message of the last failed key action, cleared on the next key.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // Filter, sort, pages

    /// Sets the filter text and returns to the first page.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.state.set_filter_text(text);
        log::debug!("filter set to {:?}", self.state.filter_text);
        self.cursor = 0;
        self.refresh();
    }

    pub fn filter_text(&self) -> &str {
        &self.state.filter_text
    }

    /// Sets the page size (minimum 1) and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.set_page_size(page_size);
        self.cursor = 0;
        self.refresh();
    }

    /// Sorts by `field`; sorting the active field again flips direction.
    pub fn sort_by(&mut self, field: &str) -> GridEvent {
        self.state.sort_by(field);
        log::debug!(
            "sort by {} {:?}",
            field,
            self.state.sort_direction
        );
        self.refresh();
        GridEvent::Sort(field.to_string())
    }

    /// Sorts by the column under the column cursor.
    pub fn sort_by_focused_column(&mut self) -> Option<GridEvent> {
        let field = self.focused_column()?.field.clone();
        Some(self.sort_by(&field))
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.state.sort_field.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.state.sort_direction
    }

    /// Moves to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page.max(1);
        self.cursor = 0;
        self.refresh();
    }

    /// Goes forward one page. Returns `None` on the last page.
    pub fn next_page(&mut self) -> Option<GridEvent> {
        if !self.paginator.next_page() {
            return None;
        }
        Some(self.page_changed(PageDirection::Next))
    }

    /// Goes back one page. Returns `None` on the first page.
    pub fn prev_page(&mut self) -> Option<GridEvent> {
        if !self.paginator.prev_page() {
            return None;
        }
        Some(self.page_changed(PageDirection::Previous))
    }

    pub(super) fn page_changed(&mut self, direction: PageDirection) -> GridEvent {
        self.state.current_page = self.paginator.page;
        self.cursor = 0;
        log::trace!("page {:?} to {}", direction, self.state.current_page);
        GridEvent::PageChange(direction)
    }

    // Cursor

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible_rows().len() {
            self.cursor += 1;
        }
    }

    pub fn next_column(&mut self) {
        if !self.columns.is_empty() {
            self.column_cursor = (self.column_cursor + 1) % self.columns.len();
        }
    }

    pub fn prev_column(&mut self) {
        if !self.columns.is_empty() {
            self.column_cursor = if self.column_cursor == 0 {
                self.columns.len() - 1
            } else {
                self.column_cursor - 1
            };
        }
    }

    // Selection

    /// Identifier of `row`.
    pub fn row_id(&self, row: &Row) -> Result<Value> {
        row.id(&self.id_field).cloned()
    }

    fn selection_changed(&self) -> GridEvent {
        GridEvent::SelectionChanged(self.selector.selected_ids())
    }

    pub fn select_row(&mut self, id: Value) -> GridEvent {
        self.selector.select(id);
        self.selection_changed()
    }

    pub fn deselect_row(&mut self, id: &Value) -> GridEvent {
        self.selector.deselect(id);
        self.selection_changed()
    }

    pub fn toggle_row(&mut self, id: Value) -> GridEvent {
        self.selector.toggle(id);
        self.selection_changed()
    }

    pub fn clear_selection(&mut self) -> GridEvent {
        self.selector.clear();
        self.selection_changed()
    }

    /// Toggles selection of the cursor row.
    pub fn toggle_cursor_selection(&mut self) -> Result<Option<GridEvent>> {
        let Some(row) = self.cursor_row() else {
            return Ok(None);
        };
        let id = self.row_id(row)?;
        Ok(Some(self.toggle_row(id)))
    }

    pub fn is_row_selected(&self, row: &Row) -> bool {
        self.selector.is_selected(row.get(&self.id_field))
    }

    pub fn selected_ids(&self) -> Vec<Value> {
        self.selector.selected_ids()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selector.mode()
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selector.set_mode(mode);
    }

    // Editing

    pub fn edit_mode(&self) -> EditMode {
        self.editor.edit_mode()
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.editor.set_edit_mode(mode);
    }

    /// Opens an edit session for `row`.
    ///
    /// In popup mode the first editable field receives input.
    pub fn start_edit(&mut self, row: &Row) -> Result<()> {
        self.editor.start_edit(row)?;
        self.popup_field = 0;
        if self.editor.edit_mode() == EditMode::Popup {
            self.begin_popup_field();
        }
        Ok(())
    }

    /// Opens an edit session for the cursor row.
    ///
    /// Inline mode edits the focused column and needs it to be editable;
    /// returns `Ok(false)` when there is nothing to edit.
    pub fn edit_cursor_row(&mut self) -> Result<bool> {
        let Some(row) = self.cursor_row().cloned() else {
            return Ok(false);
        };
        match self.editor.edit_mode() {
            EditMode::Popup => {
                if self.popup_fields().is_empty() {
                    return Ok(false);
                }
                self.start_edit(&row)?;
            }
            EditMode::Inline => {
                let Some(field) = self.focused_column().map(|c| c.field.clone()) else {
                    return Ok(false);
                };
                let Some(config) = self.editor.field_config(&field).cloned() else {
                    return Ok(false);
                };
                self.editor.start_edit(&row)?;
                self.cell_editor.begin(row.get(&field), Some(&config));
            }
        }
        Ok(true)
    }

    /// Sets a field on the open session's working copy.
    pub fn update_field(&mut self, field: &str, value: impl Into<Value>) -> bool {
        self.editor.update_field(field, value)
    }

    /// Editable fields shown by the popup form.
    pub fn popup_fields(&self) -> Vec<EditableConfig> {
        self.editor
            .editable_fields()
            .iter()
            .filter(|config| config.editable)
            .cloned()
            .collect()
    }

    /// Index into [`Model::popup_fields`] receiving input.
    pub fn popup_field(&self) -> usize {
        self.popup_field
    }

    pub(super) fn begin_popup_field(&mut self) {
        let fields = self.popup_fields();
        let Some(config) = fields.get(self.popup_field) else {
            return;
        };
        let value = self
            .editor
            .current_row()
            .map(|row| row.get(&config.field).clone())
            .unwrap_or_default();
        self.cell_editor.cancel();
        self.cell_editor.begin(&value, Some(config));
    }

    /// Commits the focused cell into the working copy.
    pub(super) fn commit_cell(&mut self) -> Result<Option<GridEvent>> {
        let event = self.cell_editor.commit()?;
        if let Some(GridEvent::ValueChanged {
            field, new_value, ..
        }) = &event
        {
            self.editor.update_field(field, new_value.clone());
        }
        Ok(event)
    }

    /// Moves popup input to the next (or previous) editable field.
    pub fn popup_move_field(&mut self, forward: bool) -> Result<()> {
        if !self.editor.has_session() {
            return Err(GridError::NoActiveSession);
        }
        self.commit_cell()?;
        let count = self.popup_fields().len();
        if count > 0 {
            self.popup_field = if forward {
                (self.popup_field + 1) % count
            } else {
                (self.popup_field + count - 1) % count
            };
        }
        self.begin_popup_field();
        Ok(())
    }

    /// Saves the open session.
    ///
    /// Pending cell input is committed first; invalid input keeps the
    /// session open. The saved row replaces its original in the row set.
    pub fn save_edit(&mut self) -> Result<Option<GridEvent>> {
        if !self.editor.has_session() {
            return Ok(None);
        }
        self.commit_cell()?;
        let original_id = self.editor.session_id().cloned();
        let Some(saved) = self.editor.save_edit() else {
            return Ok(None);
        };
        if let Some(original_id) = original_id {
            self.replace_row(&original_id, &saved);
        }
        Ok(Some(GridEvent::Save(saved)))
    }

    /// Commits an inline cell edit and closes its session.
    ///
    /// Reports the value change, if any, rather than the whole row.
    pub fn commit_inline(&mut self) -> Result<Option<GridEvent>> {
        if !self.editor.has_session() {
            return Ok(None);
        }
        let event = self.commit_cell()?;
        let original_id = self.editor.session_id().cloned();
        if let (Some(original_id), Some(saved)) = (original_id, self.editor.save_edit()) {
            self.replace_row(&original_id, &saved);
        }
        Ok(event)
    }

    /// Discards the open session and any pending cell input.
    pub fn cancel_edit(&mut self) -> Option<GridEvent> {
        let active = self.editor.has_session() || self.cell_editor.is_editing();
        self.cell_editor.cancel();
        self.editor.cancel_edit();
        active.then_some(GridEvent::Cancel)
    }

    /// Input of the cell being edited.
    pub fn cell_input(&self) -> Option<&str> {
        self.cell_editor.input()
    }

    pub(super) fn cell_editor_mut(&mut self) -> &mut CellEditor {
        &mut self.cell_editor
    }

    /// Replaces the row that had `original_id` when its session started.
    ///
    /// When the id itself was edited, selection follows the row to its new
    /// id and its expansion is dropped.
    fn replace_row(&mut self, original_id: &Value, saved: &Row) {
        if let Some(slot) = self
            .rows
            .iter_mut()
            .find(|row| row.get(&self.id_field) == original_id)
        {
            *slot = saved.clone();
        }

        let new_id = saved.get(&self.id_field);
        if new_id != original_id {
            log::debug!("row id changed from {} to {}", original_id, new_id);
            if self.selector.is_selected(original_id) {
                self.selector.deselect(original_id);
                self.selector.select(new_id.clone());
            }
            self.expansion.collapse(&RowPath::root(original_id.clone()));
        }
        self.refresh();
    }

    pub fn is_row_modified(&self, row: &Row) -> bool {
        self.editor.is_modified(row)
    }

    /// Rows saved with changes, keyed by id.
    pub fn modified_rows(&self) -> &IndexMap<Value, Row> {
        self.editor.modified_rows()
    }

    pub fn clear_modified_rows(&mut self) {
        self.editor.clear_modified_rows();
    }

    // Expansion

    /// Toggles any path, top-level or nested. Collapsing a path also
    /// collapses everything below it.
    pub fn toggle_expanded(&mut self, path: RowPath) -> GridEvent {
        let expanded = self.expansion.toggle(path.clone());
        GridEvent::Expanded { path, expanded }
    }

    /// Toggles expansion of the cursor row.
    pub fn toggle_cursor_expanded(&mut self) -> Result<Option<GridEvent>> {
        let Some(row) = self.cursor_row() else {
            return Ok(None);
        };
        let path = RowPath::root(self.row_id(row)?);
        Ok(Some(self.toggle_expanded(path)))
    }

    pub fn is_expanded(&self, path: &RowPath) -> bool {
        self.expansion.is_expanded(path)
    }

    /// Returns `true` when every ancestor of `path` is expanded.
    pub fn is_row_visible(&self, path: &RowPath) -> bool {
        self.expansion.is_visible(path)
    }
}
