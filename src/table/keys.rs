//! Key bindings for grid navigation, sorting, selection and editing.
//!
//! ## Navigation
//!
//! - **Rows**: `↑/k`, `↓/j`
//! - **Columns**: `tab`, `shift+tab`
//! - **Pages**: `→/l/pgdn`, `←/h/pgup` (from the paginator key map)
//!
//! ## Actions
//!
//! - **Sort** by the focused column: `s`
//! - **Filter**: `/` to type, `enter` to accept, `esc` to clear
//! - **Select** the cursor row: `space`; clear selection: `c`
//! - **Expand** the cursor row: `o`
//! - **Edit** the cursor row: `enter`; `enter` saves, `esc` cancels

use crate::key;
use crossterm::event::KeyCode;

/// Grid key bindings.
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    pub cursor_up: key::Binding,
    pub cursor_down: key::Binding,
    pub next_column: key::Binding,
    pub prev_column: key::Binding,
    pub sort: key::Binding,
    pub filter: key::Binding,
    pub accept_filter: key::Binding,
    pub clear_filter: key::Binding,
    pub toggle_select: key::Binding,
    pub clear_selection: key::Binding,
    pub toggle_expand: key::Binding,
    pub edit: key::Binding,
    pub save: key::Binding,
    pub cancel: key::Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_column: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "next column"),
            prev_column: key::Binding::new(vec![KeyCode::BackTab])
                .with_help("shift+tab", "prev column"),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            filter: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "filter"),
            accept_filter: key::Binding::new(vec![KeyCode::Enter, KeyCode::Tab])
                .with_help("enter", "apply filter"),
            clear_filter: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear filter"),
            toggle_select: key::Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "select"),
            clear_selection: key::Binding::new(vec![KeyCode::Char('c')])
                .with_help("c", "clear selection"),
            toggle_expand: key::Binding::new(vec![KeyCode::Char('o')]).with_help("o", "expand"),
            edit: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "edit"),
            save: key::new_binding(vec![
                key::with_keys_str(&["enter", "ctrl+s"]),
                key::with_help("enter", "save"),
            ]),
            cancel: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        }
    }
}

impl key::KeyMap for TableKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.sort,
            &self.filter,
            &self.edit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.next_column,
                &self.prev_column,
            ],
            vec![
                &self.sort,
                &self.filter,
                &self.accept_filter,
                &self.clear_filter,
            ],
            vec![
                &self.toggle_select,
                &self.clear_selection,
                &self.toggle_expand,
            ],
            vec![&self.edit, &self.save, &self.cancel],
        ]
    }
}
