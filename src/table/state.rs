//! Sort, filter and page state of a grid.

use crate::paginator;
use crate::sorting::SortDirection;
use serde::{Deserialize, Serialize};

/// What subset of rows the grid shows and in which order.
///
/// `current_page` and `page_size` are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: usize,
    pub filter_text: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort_field: None,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            page_size: page_size.max(1),
            filter_text: String::new(),
        }
    }

    /// Activates `field`. The active field flips direction; a new field
    /// starts ascending.
    pub fn sort_by(&mut self, field: &str) {
        if self.sort_field.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = Some(field.to_string());
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Sets the filter text and returns to the first page.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.current_page = 1;
    }

    /// Sets the page size (minimum 1) and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Clamps the current page into `[1, total_pages]` for `len` rows.
    /// Returns `true` if the page moved.
    pub fn clamp_page(&mut self, len: usize) -> bool {
        let total = paginator::total_pages(len, self.page_size);
        let clamped = self.current_page.clamp(1, total);
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_toggle_and_reset() {
        let mut state = TableState::default();
        state.sort_by("age");
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        state.sort_by("age");
        assert_eq!(state.sort_direction, SortDirection::Descending);
        state.sort_by("name");
        assert_eq!(state.sort_field.as_deref(), Some("name"));
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_filter_and_page_size_reset_page() {
        let mut state = TableState::new(5);
        state.current_page = 3;
        state.set_filter_text("x");
        assert_eq!(state.current_page, 1);
        state.current_page = 2;
        state.set_page_size(0);
        assert_eq!(state.page_size, 1);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_clamp_page() {
        let mut state = TableState::new(2);
        state.current_page = 9;
        assert!(state.clamp_page(5));
        assert_eq!(state.current_page, 3);
        assert!(state.clamp_page(0));
        assert_eq!(state.current_page, 1);
        assert!(!state.clamp_page(0));
    }
}
