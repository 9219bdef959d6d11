//! Interactive data grid component for bubbletea-rs applications.
//!
//! The grid displays a set of [`Row`](crate::row::Row)s under configured
//! [`Column`](crate::column::Column)s and derives what is on screen with a
//! fixed pipeline:
//!
//! ```text
//! rows ─► filter (case-insensitive substring) ─► sort (stable) ─► paginate
//! ```
//!
//! On top of the pipeline it offers row selection, row editing (popup form or
//! inline cell), and expandable rows. Every user intent is reported to the
//! host as a [`GridEvent`], delivered as a bubbletea message by
//! [`update`](bubbletea_rs::Model::update) or returned directly by the
//! intent methods.
//!
//! ## Module Organization
//!
//! - [`keys`]: key bindings
//! - [`style`]: styles and markers
//! - [`state`]: sort, filter and page state
//! - `model`: construction and intent methods
//! - `rendering`: view composition
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_datagrid::prelude::*;
//!
//! let config = GridConfig::new(vec![Column::new("name", "Name"), Column::new("role", "Role")])
//!     .with_editable_fields(vec![EditableConfig::new("role")])
//!     .with_page_size(2);
//!
//! let mut grid = DataGrid::from_config(config).unwrap().with_rows(vec![
//!     Row::new().with("id", 1).with("name", "Ann").with("role", "dev"),
//!     Row::new().with("id", 2).with("name", "Bob").with("role", "ops"),
//!     Row::new().with("id", 3).with("name", "Cy").with("role", "dev"),
//! ]);
//!
//! assert_eq!(grid.total_pages(), 2);
//! assert!(grid.next_page().is_some());
//! assert_eq!(grid.visible_rows().len(), 1);
//! ```

pub mod keys;
mod model;
mod rendering;
pub mod state;
pub mod style;

pub use keys::TableKeyMap;
pub use model::Model;
pub use state::TableState;
pub use style::TableStyles;

use crate::editor::EditMode;
use crate::error::Result;
use crate::event::GridEvent;
use crate::{key, Component};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

impl Model {
    /// Handles one key press and returns the resulting event, if any.
    ///
    /// Keys are interpreted by mode: filter input while filtering, field
    /// input while an edit session is open, navigation otherwise. A failed
    /// action is logged and kept in [`Model::last_error`] until the next key.
    pub fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<GridEvent> {
        if !self.focused {
            return None;
        }
        self.last_error = None;

        let result = if self.filtering {
            self.handle_filter_key(key_msg)
        } else if self.editor.has_session() {
            self.handle_edit_key(key_msg)
        } else {
            self.handle_browse_key(key_msg)
        };

        match result {
            Ok(event) => event,
            Err(err) => {
                log::warn!("grid key action failed: {}", err);
                self.last_error = Some(err.to_string());
                None
            }
        }
    }

    fn handle_filter_key(&mut self, key_msg: &KeyMsg) -> Result<Option<GridEvent>> {
        if self.keymap.clear_filter.matches(key_msg) {
            self.filtering = false;
            self.set_filter_text("");
        } else if self.keymap.accept_filter.matches(key_msg) {
            self.filtering = false;
        } else {
            match key_msg.key {
                KeyCode::Backspace => {
                    let mut text = self.state.filter_text.clone();
                    text.pop();
                    self.set_filter_text(text);
                }
                KeyCode::Char(c) if !key_msg.modifiers.contains(KeyModifiers::CONTROL) => {
                    let mut text = self.state.filter_text.clone();
                    text.push(c);
                    self.set_filter_text(text);
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn handle_edit_key(&mut self, key_msg: &KeyMsg) -> Result<Option<GridEvent>> {
        let popup = self.editor.edit_mode() == EditMode::Popup;

        if self.keymap.cancel.matches(key_msg) {
            return Ok(self.cancel_edit());
        }
        if self.keymap.save.matches(key_msg) {
            return if popup {
                self.save_edit()
            } else {
                self.commit_inline()
            };
        }
        if popup && self.keymap.next_column.matches(key_msg) {
            self.popup_move_field(true)?;
            return Ok(None);
        }
        if popup && self.keymap.prev_column.matches(key_msg) {
            self.popup_move_field(false)?;
            return Ok(None);
        }

        match key_msg.key {
            KeyCode::Backspace => self.cell_editor_mut().pop_char(),
            KeyCode::Char(c) if !key_msg.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cell_editor_mut().push_char(c)
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_browse_key(&mut self, key_msg: &KeyMsg) -> Result<Option<GridEvent>> {
        if let Some(direction) = self.paginator.handle_key(key_msg) {
            return Ok(Some(self.page_changed(direction)));
        }

        if self.keymap.cursor_up.matches(key_msg) {
            self.cursor_up();
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.cursor_down();
        } else if self.keymap.prev_column.matches(key_msg) {
            self.prev_column();
        } else if self.keymap.next_column.matches(key_msg) {
            self.next_column();
        } else if self.keymap.sort.matches(key_msg) {
            return Ok(self.sort_by_focused_column());
        } else if self.keymap.filter.matches(key_msg) {
            self.filtering = true;
        } else if self.keymap.toggle_select.matches(key_msg) {
            return self.toggle_cursor_selection();
        } else if self.keymap.clear_selection.matches(key_msg) {
            return Ok(Some(self.clear_selection()));
        } else if self.keymap.toggle_expand.matches(key_msg) {
            if self.expandable {
                return self.toggle_cursor_expanded();
            }
        } else if self.keymap.edit.matches(key_msg) {
            self.edit_cursor_row()?;
        }
        Ok(None)
    }
}

impl key::KeyMap for Model {
    /// Bindings relevant to the current mode.
    fn short_help(&self) -> Vec<&key::Binding> {
        if self.filtering {
            vec![&self.keymap.accept_filter, &self.keymap.clear_filter]
        } else if self.editor.has_session() {
            vec![&self.keymap.save, &self.keymap.cancel]
        } else {
            key::KeyMap::short_help(&self.keymap)
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        let mut groups = key::KeyMap::full_help(&self.keymap);
        groups.push(vec![
            &self.paginator.keymap.prev_page,
            &self.paginator.keymap.next_page,
        ]);
        groups
    }
}

impl BubbleTeaModel for Model {
    /// An empty, focused grid without columns.
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new()), None)
    }

    /// Handles key messages and returns the resulting [`GridEvent`] as a
    /// command. Other messages are ignored.
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        self.handle_key(key_msg).map(GridEvent::into_cmd)
    }

    fn view(&self) -> String {
        self.render_view()
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    /// Blurring leaves any open filter input.
    fn blur(&mut self) {
        self.focused = false;
        self.filtering = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, EditableConfig, FieldType};
    use crate::config::GridConfig;
    use crate::error::GridError;
    use crate::expansion::RowPath;
    use crate::paginator::PageDirection;
    use crate::row::Row;
    use crate::selection::SelectionMode;
    use crate::value::Value;
    use lipgloss_extras::lipgloss;

    fn press(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "Bob").with("age", 30),
            Row::new().with("id", 2).with("name", "Ann").with("age", 25),
            Row::new().with("id", 3).with("name", "Dana").with("age", Value::Null),
            Row::new().with("id", 4).with("name", "Carl").with("age", 41),
            Row::new().with("id", 5).with("name", "Eve").with("age", 19),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("name", "Name").with_width(6), Column::new("age", "Age").with_width(4)]
    }

    fn grid(page_size: usize) -> Model {
        let config = GridConfig::new(columns())
            .with_page_size(page_size)
            .with_editable_fields(vec![
                EditableConfig::new("name"),
                EditableConfig::new("age").with_kind(FieldType::Number),
            ]);
        Model::from_config(config).unwrap().with_rows(people())
    }

    fn names(model: &Model) -> Vec<String> {
        model
            .visible_rows()
            .iter()
            .map(|row| row.get("name").to_string())
            .collect()
    }

    fn plain_view(model: &Model) -> String {
        lipgloss::strip_ansi(&BubbleTeaModel::view(model))
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = GridConfig::new(columns()).with_page_size(0);
        assert!(matches!(Model::from_config(config), Err(GridError::Config(_))));
    }

    #[test]
    fn test_pipeline_filter_sort_paginate() {
        let mut model = grid(2);
        assert_eq!(model.total_pages(), 3);
        assert_eq!(names(&model), vec!["Bob", "Ann"]);

        model.sort_by("age");
        assert_eq!(names(&model), vec!["Eve", "Ann"]);
        model.set_page(3);
        // nulls sort last
        assert_eq!(names(&model), vec!["Dana"]);

        model.set_filter_text("A");
        assert_eq!(model.current_page(), 1);
        assert_eq!(names(&model), vec!["Ann", "Carl"]);
        assert_eq!(model.filtered_len(), 3);
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut model = grid(10);
        assert_eq!(model.sort_by("age"), GridEvent::Sort("age".into()));
        assert_eq!(model.sort_by("age"), GridEvent::Sort("age".into()));
        assert_eq!(names(&model), vec!["Carl", "Bob", "Ann", "Eve", "Dana"]);
    }

    #[test]
    fn test_page_navigation_events() {
        let mut model = grid(2);
        assert_eq!(model.prev_page(), None);
        assert_eq!(
            model.next_page(),
            Some(GridEvent::PageChange(PageDirection::Next))
        );
        assert_eq!(model.current_page(), 2);
        assert_eq!(
            model.handle_key(&press(KeyCode::Right)),
            Some(GridEvent::PageChange(PageDirection::Next))
        );
        assert_eq!(model.current_page(), 3);
        assert_eq!(model.handle_key(&press(KeyCode::Right)), None);
        assert_eq!(
            model.handle_key(&press(KeyCode::Left)),
            Some(GridEvent::PageChange(PageDirection::Previous))
        );
        assert_eq!(model.current_page(), 2);
    }

    #[test]
    fn test_set_rows_clamps_page_and_prunes_selection() {
        let mut model = grid(2);
        model.set_page(3);
        model.select_row(Value::from(5));
        model.set_rows(people().into_iter().take(2).collect());
        assert_eq!(model.current_page(), 1);
        assert!(model.selected_ids().is_empty());
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut model = grid(2);
        model.set_page(2);
        model.set_page_size(0);
        assert_eq!(model.state().page_size, 1);
        assert_eq!(model.current_page(), 1);
        assert_eq!(model.total_pages(), 5);
    }

    #[test]
    fn test_filter_keys() {
        let mut model = grid(10);
        model.handle_key(&press(KeyCode::Char('/')));
        assert!(model.is_filtering());
        model.handle_key(&press(KeyCode::Char('e')));
        model.handle_key(&press(KeyCode::Char('v')));
        assert_eq!(names(&model), vec!["Eve"]);
        model.handle_key(&press(KeyCode::Backspace));
        assert_eq!(model.filter_text(), "e");
        model.handle_key(&press(KeyCode::Enter));
        assert!(!model.is_filtering());
        assert_eq!(model.filter_text(), "e");

        model.handle_key(&press(KeyCode::Char('/')));
        model.handle_key(&press(KeyCode::Esc));
        assert_eq!(model.filter_text(), "");
        assert_eq!(model.visible_rows().len(), 5);
    }

    #[test]
    fn test_selection_single_and_multiple() {
        let mut model = grid(10);
        assert_eq!(
            model.handle_key(&press(KeyCode::Char(' '))),
            Some(GridEvent::SelectionChanged(vec![Value::from(1)]))
        );
        model.handle_key(&press(KeyCode::Down));
        assert_eq!(
            model.handle_key(&press(KeyCode::Char(' '))),
            Some(GridEvent::SelectionChanged(vec![Value::from(2)]))
        );

        model.set_selection_mode(SelectionMode::Multiple);
        assert_eq!(
            model.toggle_row(Value::from(4)),
            GridEvent::SelectionChanged(vec![Value::from(2), Value::from(4)])
        );
        assert_eq!(
            model.handle_key(&press(KeyCode::Char('c'))),
            Some(GridEvent::SelectionChanged(vec![]))
        );
    }

    #[test]
    fn test_popup_edit_save() {
        let mut model = grid(10);
        model.handle_key(&press(KeyCode::Enter));
        assert!(model.editor().has_session());
        assert_eq!(model.cell_input(), Some("Bob"));

        for _ in 0..3 {
            model.handle_key(&press(KeyCode::Backspace));
        }
        for c in "Rob".chars() {
            model.handle_key(&press(KeyCode::Char(c)));
        }
        let event = model.handle_key(&press(KeyCode::Enter));
        let Some(GridEvent::Save(row)) = event else {
            panic!("expected save, got {:?}", event);
        };
        assert_eq!(row.get("name"), &Value::from("Rob"));
        assert_eq!(model.rows()[0].get("name"), &Value::from("Rob"));
        assert_eq!(model.modified_rows().len(), 1);
        assert!(!model.editor().has_session());
    }

    #[test]
    fn test_popup_tab_moves_between_fields() {
        let mut model = grid(10);
        model.edit_cursor_row().unwrap();
        model.handle_key(&press(KeyCode::Tab));
        assert_eq!(model.popup_field(), 1);
        assert_eq!(model.cell_input(), Some("30"));

        model.handle_key(&press(KeyCode::Backspace));
        model.handle_key(&press(KeyCode::Backspace));
        model.handle_key(&press(KeyCode::Char('x')));
        assert_eq!(model.handle_key(&press(KeyCode::Enter)), None);
        assert!(model.last_error().is_some());
        assert!(model.editor().has_session());

        assert_eq!(model.handle_key(&press(KeyCode::Esc)), Some(GridEvent::Cancel));
        assert!(!model.editor().has_session());
        assert!(model.modified_rows().is_empty());
        assert_eq!(model.rows()[0].get("age"), &Value::from(30));
    }

    #[test]
    fn test_save_without_changes_is_not_modified() {
        let mut model = grid(10);
        model.edit_cursor_row().unwrap();
        assert!(matches!(model.save_edit(), Ok(Some(GridEvent::Save(_)))));
        assert!(model.modified_rows().is_empty());
    }

    #[test]
    fn test_save_with_edited_id_replaces_original_row() {
        let config = GridConfig::new(columns())
            .with_editable_fields(vec![EditableConfig::new("id"), EditableConfig::new("name")]);
        let mut model = Model::from_config(config).unwrap().with_rows(people());
        model.select_row(Value::from(1));

        let bob = model.rows()[0].clone();
        model.start_edit(&bob).unwrap();
        model.cell_editor_mut().cancel();
        model.update_field("id", 9);
        model.update_field("name", "Rob");
        let Ok(Some(GridEvent::Save(saved))) = model.save_edit() else {
            panic!("expected save");
        };

        assert_eq!(model.rows()[0].get("name"), &Value::from("Rob"));
        assert_eq!(model.rows()[0].get("id"), &Value::from(9));
        assert_eq!(model.rows().len(), 5);
        assert!(model.is_row_modified(&saved));
        assert_eq!(model.modified_rows().len(), 1);
        assert_eq!(model.selected_ids(), vec![Value::from(9)]);
    }

    #[test]
    fn test_nested_expansion_paths() {
        let mut model = grid(10).with_expandable(true);
        let child = RowPath::root(1).child(10);
        model.toggle_expanded(RowPath::root(1));
        model.toggle_expanded(child.clone());
        assert!(model.is_row_visible(&child.child(100)));

        model.toggle_expanded(RowPath::root(1));
        assert!(!model.is_expanded(&child));
        assert!(!model.is_row_visible(&child));
    }

    #[test]
    fn test_inline_edit_reports_value_change() {
        let mut model = grid(10);
        model.set_edit_mode(EditMode::Inline);
        model.handle_key(&press(KeyCode::Tab));
        model.handle_key(&press(KeyCode::Enter));
        assert_eq!(model.cell_input(), Some("30"));

        model.handle_key(&press(KeyCode::Char('5')));
        assert_eq!(
            model.handle_key(&press(KeyCode::Enter)),
            Some(GridEvent::ValueChanged {
                field: "age".into(),
                old_value: Value::from(30),
                new_value: Value::from(305),
            })
        );
        assert_eq!(model.rows()[0].get("age"), &Value::from(305));
        assert!(model.is_row_modified(&model.rows()[0].clone()));
    }

    #[test]
    fn test_inline_unchanged_commit_emits_nothing() {
        let mut model = grid(10);
        model.set_edit_mode(EditMode::Inline);
        assert!(model.edit_cursor_row().unwrap());
        assert_eq!(model.commit_inline().unwrap(), None);
        assert!(!model.editor().has_session());
    }

    #[test]
    fn test_second_session_is_rejected() {
        let mut model = grid(10);
        let first = model.rows()[0].clone();
        let second = model.rows()[1].clone();
        model.start_edit(&first).unwrap();
        assert!(matches!(
            model.start_edit(&second),
            Err(GridError::SessionActive { .. })
        ));
    }

    #[test]
    fn test_expansion() {
        let mut model = grid(10).with_expandable(true);
        assert_eq!(
            model.handle_key(&press(KeyCode::Char('o'))),
            Some(GridEvent::Expanded {
                path: RowPath::root(1),
                expanded: true,
            })
        );
        assert!(model.is_expanded(&RowPath::root(1)));
        let view = plain_view(&model);
        assert!(view.contains("▾"));
        assert!(view.contains("▸"));

        let path = RowPath::root(1);
        assert_eq!(
            model.toggle_expanded(path.clone()),
            GridEvent::Expanded {
                path,
                expanded: false,
            }
        );
    }

    #[test]
    fn test_blurred_grid_ignores_keys() {
        let mut model = grid(10);
        Component::blur(&mut model);
        assert_eq!(model.handle_key(&press(KeyCode::Char(' '))), None);
        assert!(model.selected_ids().is_empty());
        Component::focus(&mut model);
        assert!(Component::focused(&model));
    }

    #[test]
    fn test_update_wraps_events_in_cmd() {
        let mut model = grid(10);
        let msg: Msg = Box::new(press(KeyCode::Char('s')));
        assert!(BubbleTeaModel::update(&mut model, msg).is_some());
        let msg: Msg = Box::new(press(KeyCode::Down));
        assert!(BubbleTeaModel::update(&mut model, msg).is_none());
        let msg: Msg = Box::new(42u32);
        assert!(BubbleTeaModel::update(&mut model, msg).is_none());
    }

    #[test]
    fn test_view_shows_header_rows_and_footer() {
        let mut model = grid(2);
        model.sort_by("name");
        let view = plain_view(&model);
        assert!(view.contains("Name ↑"));
        assert!(view.contains("> "));
        assert!(view.contains("Ann"));
        assert!(view.contains("Page 1 of 3 · 5 rows"));

        model.set_filter_text("zzz");
        let view = plain_view(&model);
        assert!(view.contains("No rows."));
        assert!(view.contains("Page 1 of 1 · 0 rows"));
    }

    #[test]
    fn test_view_shows_popup_form() {
        let mut model = grid(10);
        model.edit_cursor_row().unwrap();
        let view = plain_view(&model);
        assert!(view.contains("Edit row 1"));
        assert!(view.contains("> name: Bob_"));
        assert!(view.contains("  age: 30"));
    }
}
