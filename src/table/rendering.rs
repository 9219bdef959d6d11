//! View rendering for the grid.
//!
//! The view is composed top to bottom from:
//! - the filter line, when filtering or a filter is applied
//! - the header with the sort arrow on the active column
//! - the visible rows with cursor, selection, modified and expansion markers
//! - the popup edit form, when a popup session is open
//! - the pagination footer and the last error

use super::style::{
    COLLAPSED, CURSOR, ELLIPSIS, EXPANDED, MODIFIED, SELECTED, SEPARATOR,
};
use super::Model;
use crate::cell::format_value;
use crate::editor::EditMode;
use crate::expansion::RowPath;
use crate::row::Row;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pads or truncates `text` to exactly `width` terminal columns.
///
/// Truncated text ends with an ellipsis.
pub(super) fn fit(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

impl Model {
    fn gutter_width(&self) -> usize {
        if self.expandable {
            5
        } else {
            4
        }
    }

    pub(super) fn view_filter(&self) -> Option<String> {
        if self.filtering {
            Some(format!(
                "{}{}_",
                self.styles.filter_prompt.clone().render("Filter: "),
                self.state.filter_text
            ))
        } else if !self.state.filter_text.is_empty() {
            Some(format!(
                "{}{} ({} matching)",
                self.styles.filter_prompt.clone().render("Filter: "),
                self.state.filter_text,
                self.processed.len()
            ))
        } else {
            None
        }
    }

    pub(super) fn view_header(&self) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let label = if self.state.sort_field.as_deref() == Some(column.field.as_str()) {
                    format!("{} {}", column.header, self.state.sort_direction.arrow())
                } else {
                    column.header.clone()
                };
                fit(&label, column.display_width())
            })
            .collect();
        let line = format!(
            "{}{}",
            " ".repeat(self.gutter_width()),
            cells.join(SEPARATOR)
        );
        self.styles.header.clone().render(&line)
    }

    pub(super) fn view_rule(&self) -> String {
        let rules: Vec<String> = self
            .columns
            .iter()
            .map(|column| "─".repeat(column.display_width()))
            .collect();
        format!("{}{}", " ".repeat(self.gutter_width()), rules.join("─┼─"))
    }

    pub(super) fn view_rows(&self) -> Vec<String> {
        let visible = self.visible_rows();
        if visible.is_empty() {
            return vec![self.styles.no_rows.clone().render("No rows.")];
        }
        visible
            .iter()
            .enumerate()
            .map(|(index, row)| self.view_row(index, row))
            .collect()
    }

    fn view_row(&self, index: usize, row: &Row) -> String {
        let is_cursor = index == self.cursor && self.focused;
        let editing = self.editor.is_editing(row);
        // an open session shows its working copy
        let shown = if editing {
            self.editor.current_row().unwrap_or(row)
        } else {
            row
        };

        let mut gutter = String::new();
        gutter.push_str(if is_cursor { CURSOR } else { " " });
        gutter.push_str(if self.is_row_selected(row) {
            SELECTED
        } else {
            " "
        });
        if self.editor.is_modified(row) {
            gutter.push_str(&self.styles.modified_marker.clone().render(MODIFIED));
        } else {
            gutter.push(' ');
        }
        if self.expandable {
            let expanded = row
                .id(&self.id_field)
                .map(|id| self.expansion.is_expanded(&RowPath::root(id.clone())))
                .unwrap_or(false);
            gutter.push_str(if expanded { EXPANDED } else { COLLAPSED });
        }
        gutter.push(' ');

        let inline_field = if editing && self.editor.edit_mode() == EditMode::Inline {
            self.cell_editor.field()
        } else {
            None
        };

        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let width = column.display_width();
                if inline_field == Some(column.field.as_str()) {
                    let input = self.cell_editor.input().unwrap_or_default();
                    return self.styles.editing_cell.clone().render(&fit(input, width));
                }
                let value = shown.get(&column.field);
                let text = format_value(value, self.editor.field_config(&column.field));
                fit(&text, width)
            })
            .collect();
        let body = cells.join(SEPARATOR);

        let body = if is_cursor {
            self.styles.cursor_row.clone().render(&body)
        } else if self.is_row_selected(row) {
            self.styles.selected_row.clone().render(&body)
        } else {
            self.styles.cell.clone().render(&body)
        };
        format!("{}{}", gutter, body)
    }

    /// Popup edit form, one line per editable field.
    pub(super) fn view_popup(&self) -> Option<Vec<String>> {
        if self.editor.edit_mode() != EditMode::Popup {
            return None;
        }
        let working = self.editor.current_row()?;
        let id = working.get(&self.id_field);

        let mut lines = vec![self
            .styles
            .popup_label
            .clone()
            .render(&format!("Edit row {}", id))];
        for (index, config) in self.popup_fields().iter().enumerate() {
            let label = self.styles.popup_label.clone().render(&config.field);
            if index == self.popup_field {
                let input = self.cell_editor.input().unwrap_or_default();
                lines.push(format!(
                    "{} {}: {}",
                    CURSOR,
                    label,
                    self.styles.popup_focused.clone().render(&format!("{}_", input))
                ));
            } else {
                let value = working.get(&config.field);
                lines.push(format!("  {}: {}", label, format_value(value, Some(config))));
            }
        }
        lines.push(
            self.styles
                .pagination
                .clone()
                .render("enter save • esc cancel • tab next field"),
        );
        Some(lines)
    }

    pub(super) fn view_footer(&self) -> String {
        let mut footer = format!("{} · {} rows", self.paginator.view(), self.processed.len());
        let selected = self.selector.selected_ids().len();
        if selected > 0 {
            footer.push_str(&format!(" · {} selected", selected));
        }
        self.styles.pagination.clone().render(&footer)
    }

    pub(super) fn view_error(&self) -> Option<String> {
        self.last_error
            .as_ref()
            .map(|err| self.styles.error.clone().render(err))
    }

    /// Composes the full view.
    pub(super) fn render_view(&self) -> String {
        let mut lines = Vec::new();
        if let Some(filter) = self.view_filter() {
            lines.push(filter);
        }
        lines.push(self.view_header());
        lines.push(self.view_rule());
        lines.extend(self.view_rows());
        if let Some(popup) = self.view_popup() {
            lines.push(String::new());
            lines.extend(popup);
        }
        lines.push(String::new());
        lines.push(self.view_footer());
        if let Some(err) = self.view_error() {
            lines.push(err);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 1), "…");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_fit_wide_chars() {
        // each CJK char is two columns wide
        assert_eq!(fit("日本語", 4), "日… ");
        assert_eq!(UnicodeWidthStr::width(fit("日本語", 5).as_str()), 5);
    }
}
