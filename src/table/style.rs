//! Styles for grid rendering.
//!
//! All defaults use `AdaptiveColor` so the grid stays readable on light and
//! dark terminals.

use lipgloss_extras::prelude::*;

/// Marker for the cursor row.
pub const CURSOR: &str = ">";
/// Marker for selected rows.
pub const SELECTED: &str = "●";
/// Marker for rows saved with changes.
pub const MODIFIED: &str = "*";
/// Marker for collapsed expandable rows.
pub const COLLAPSED: &str = "▸";
/// Marker for expanded rows.
pub const EXPANDED: &str = "▾";
/// Truncation suffix.
pub const ELLIPSIS: &str = "…";
/// Column separator.
pub const SEPARATOR: &str = " │ ";

#[derive(Debug, Clone)]
pub struct TableStyles {
    pub header: Style,
    pub cell: Style,
    pub cursor_row: Style,
    pub selected_row: Style,
    pub modified_marker: Style,
    pub editing_cell: Style,
    pub filter_prompt: Style,
    pub popup_label: Style,
    pub popup_focused: Style,
    pub pagination: Style,
    pub no_rows: Style,
    pub error: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        let accent = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };

        Self {
            header: Style::new().bold(true),
            cell: Style::new(),
            cursor_row: Style::new().foreground(accent.clone()),
            selected_row: Style::new().bold(true),
            modified_marker: Style::new().foreground(AdaptiveColor {
                Light: "#D7A600",
                Dark: "#ECFD65",
            }),
            editing_cell: Style::new().underline(true),
            filter_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            popup_label: Style::new().bold(true),
            popup_focused: Style::new().foreground(accent),
            pagination: Style::new().foreground(subdued.clone()),
            no_rows: Style::new().foreground(subdued),
            error: Style::new().foreground(Color::from("#FF5F87")),
        }
    }
}
