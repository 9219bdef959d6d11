//! Row edit sessions and the modified-rows ledger.
//!
//! A [`RowEditor`] holds at most one open session: a snapshot of the row as
//! it was when editing started plus a working copy that field updates go
//! to. Saving a session that changed an editable field records the working
//! copy in the ledger under the row's identifier.

use crate::column::EditableConfig;
use crate::error::{GridError, Result};
use crate::row::Row;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field used as row identifier unless configured otherwise.
pub const DEFAULT_ID_FIELD: &str = "id";

/// How the grid presents an edit session. The editor itself does not branch
/// on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// A form listing every editable field of the row.
    #[default]
    Popup,
    /// Cells are edited in place.
    Inline,
}

#[derive(Debug, Clone)]
struct EditSession {
    id: Value,
    original: Row,
    working: Row,
}

/// Tracks the active edit session and the rows saved with changes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::{EditableConfig, Row, RowEditor, EditMode};
///
/// let mut editor = RowEditor::new(EditMode::Inline, vec![EditableConfig::new("name")]);
/// let row = Row::new().with("id", 1).with("name", "Bob");
///
/// editor.start_edit(&row).unwrap();
/// assert!(editor.is_editing(&row));
/// editor.update_field("name", "Robert");
///
/// let saved = editor.save_edit().unwrap();
/// assert_eq!(saved.get("name").to_string(), "Robert");
/// assert!(editor.is_modified(&row));
/// assert!(!editor.is_editing(&row));
/// ```
#[derive(Debug, Clone)]
pub struct RowEditor {
    edit_mode: EditMode,
    editable_fields: Vec<EditableConfig>,
    id_field: String,
    session: Option<EditSession>,
    // keyed by the id each row carries after its last save
    modified: IndexMap<Value, Row>,
}

impl Default for RowEditor {
    fn default() -> Self {
        Self::new(EditMode::default(), Vec::new())
    }
}

impl RowEditor {
    /// Creates an editor with no open session and an empty ledger.
    ///
    /// `editable_fields` decides which fields count when [`RowEditor::save_edit`]
    /// checks for changes; fields flagged read-only are ignored.
    pub fn new(edit_mode: EditMode, editable_fields: Vec<EditableConfig>) -> Self {
        Self {
            edit_mode,
            editable_fields,
            id_field: DEFAULT_ID_FIELD.to_string(),
            session: None,
            modified: IndexMap::new(),
        }
    }

    /// Uses `id_field` as the row identifier (builder pattern).
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Field used as row identifier.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Opens a session for `row`.
    ///
    /// Fails with [`GridError::SessionActive`] while another session is
    /// open, so unsaved work is never dropped silently.
    pub fn start_edit(&mut self, row: &Row) -> Result<()> {
        if let Some(session) = &self.session {
            return Err(GridError::SessionActive {
                id: session.id.clone(),
            });
        }
        let id = row.id(&self.id_field)?.clone();
        log::debug!("edit session opened for row {}", id);
        self.session = Some(EditSession {
            id,
            original: row.clone(),
            working: row.clone(),
        });
        Ok(())
    }

    /// Sets `field` on the working copy. Returns `false` without a session.
    pub fn update_field(&mut self, field: &str, value: impl Into<Value>) -> bool {
        match &mut self.session {
            Some(session) => {
                session.working.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Closes the session and returns the full working copy.
    ///
    /// The ledger is only touched when an editable field differs from the
    /// snapshot taken at [`RowEditor::start_edit`]. Entries are keyed by the
    /// id of the saved row, so a session that changed the id field moves the
    /// existing entry to the new id.
    pub fn save_edit(&mut self) -> Option<Row> {
        let session = self.session.take()?;
        let changed = self
            .editable_field_names()
            .any(|field| session.working.get(field) != session.original.get(field));

        if changed {
            // an edited id moves the entry, keeping its ledger position
            let key = session
                .working
                .id(&self.id_field)
                .cloned()
                .unwrap_or_else(|_| session.id.clone());
            log::debug!("row {} saved with changes as {}", session.id, key);
            match self.modified.get_index_of(&session.id) {
                Some(index) if key != session.id => {
                    self.modified.shift_remove_index(index);
                    let index = index.min(self.modified.len());
                    self.modified
                        .shift_insert(index, key, session.working.clone());
                }
                _ => {
                    self.modified.insert(key, session.working.clone());
                }
            }
        } else {
            log::debug!("row {} saved without changes", session.id);
        }
        Some(session.working)
    }

    /// Discards the session. The ledger is left untouched.
    pub fn cancel_edit(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("edit session for row {} cancelled", session.id);
        }
    }

    /// Returns `true` if a session is open for the row with `row`'s id.
    pub fn is_editing(&self, row: &Row) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| &session.id == row.get(&self.id_field))
    }

    /// Returns `true` while a session is open, whatever its row.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` if the ledger has an entry for `row`'s id.
    pub fn is_modified(&self, row: &Row) -> bool {
        self.is_id_modified(row.get(&self.id_field))
    }

    pub fn is_id_modified(&self, id: &Value) -> bool {
        self.modified.contains_key(id)
    }

    /// Rows saved with changes, keyed by id, in the order they were first
    /// modified.
    pub fn modified_rows(&self) -> &IndexMap<Value, Row> {
        &self.modified
    }

    /// Empties the ledger. An open session is not affected.
    pub fn clear_modified_rows(&mut self) {
        self.modified.clear();
    }

    /// Identifier captured when the open session started.
    ///
    /// This is the id the row had before any edit to the id field itself.
    pub fn session_id(&self) -> Option<&Value> {
        self.session.as_ref().map(|session| &session.id)
    }

    /// Working copy of the open session.
    pub fn current_row(&self) -> Option<&Row> {
        self.session.as_ref().map(|session| &session.working)
    }

    /// Snapshot taken when the open session started.
    pub fn original_row(&self) -> Option<&Row> {
        self.session.as_ref().map(|session| &session.original)
    }

    /// Presentation mode. Only the grid reads it.
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
    }

    pub fn editable_fields(&self) -> &[EditableConfig] {
        &self.editable_fields
    }

    pub fn set_editable_fields(&mut self, fields: Vec<EditableConfig>) {
        self.editable_fields = fields;
    }

    /// Names of the fields flagged editable.
    pub fn editable_field_names(&self) -> impl Iterator<Item = &str> {
        self.editable_fields
            .iter()
            .filter(|config| config.editable)
            .map(|config| config.field.as_str())
    }

    pub fn is_field_editable(&self, field: &str) -> bool {
        self.field_config(field).is_some()
    }

    /// Configuration of `field` if it is editable.
    pub fn field_config(&self, field: &str) -> Option<&EditableConfig> {
        self.editable_fields
            .iter()
            .find(|config| config.field == field && config.editable)
    }
}
