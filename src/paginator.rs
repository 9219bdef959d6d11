//! Pagination helpers and the paginator component.
//!
//! Pages are 1-indexed throughout the grid. The free functions slice row
//! sets; the [`Model`] tracks the current page, handles the previous/next
//! key bindings and renders the page indicator below the grid.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use serde::{Deserialize, Serialize};

/// Number of pages needed for `len` items, never less than one.
///
/// A page size of zero is treated as one.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::paginator::total_pages;
///
/// assert_eq!(total_pages(0, 10), 1);
/// assert_eq!(total_pages(2, 1), 2);
/// assert_eq!(total_pages(95, 10), 10);
/// ```
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Half-open index bounds of 1-indexed `page`, clamped to `len`.
///
/// Page zero and pages past the end produce an empty range.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    if page == 0 {
        return (0, 0);
    }
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    (start, end)
}

/// Returns the items of 1-indexed `page`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::paginator::paginate;
///
/// let items = [1, 2, 3, 4, 5];
/// assert_eq!(paginate(&items, 2, 2), &[3, 4]);
/// assert_eq!(paginate(&items, 3, 2), &[5]);
/// assert!(paginate(&items, 4, 2).is_empty());
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let (start, end) = page_bounds(items.len(), page, page_size);
    &items[start..end]
}

/// Direction of a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageDirection {
    Previous,
    Next,
}

/// How the page indicator is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Numbers, e.g. "Page 1 of 5".
    #[default]
    Arabic,
    /// Dots, e.g. "● ○ ○ ○ ○".
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Default keys: PageUp, Left Arrow, 'h'
    pub prev_page: key::Binding,
    /// Default keys: PageDown, Right Arrow, 'l'
    pub next_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "left", "h"]),
                key::with_help("←/h", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "right", "l"]),
                key::with_help("→/l", "next page"),
            ]),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// Pagination state for the grid.
///
/// The paginator only tracks position; it never holds the rows themselves.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::paginator::Model;
///
/// let mut paginator = Model::new().with_per_page(10).with_total_items(25);
/// assert_eq!(paginator.total_pages, 3);
/// assert!(paginator.on_first_page());
///
/// paginator.next_page();
/// assert_eq!(paginator.page, 2);
/// assert_eq!(paginator.get_slice_bounds(25), (10, 20));
/// assert_eq!(paginator.view(), "Page 2 of 3");
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Indicator style.
    pub paginator_type: Type,
    /// Current page, starting at 1.
    pub page: usize,
    /// Items per page, at least 1.
    pub per_page: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Dot for the current page in `Dots` mode.
    pub active_dot: String,
    /// Dot for other pages in `Dots` mode.
    pub inactive_dot: String,
    /// Format for `Arabic` mode; the first `%d` is the page, the second the total.
    pub arabic_format: String,
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 1,
            per_page: 1,
            total_pages: 1,
            active_dot: "●".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "Page %d of %d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total item count (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the page size (builder pattern). Values below 1 are clamped to 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the page size. Values below 1 are clamped to 1.
    ///
    /// The page count is not recomputed; call [`Model::set_total_items`]
    /// afterwards.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Recomputes the page count for `items` and clamps the current page
    /// into range.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = total_pages(items, self.per_page);
        self.clamp_page();
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages.max(1));
    }

    /// Number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.get_slice_bounds(total_items);
        end - start
    }

    /// Slice bounds of the current page for data of `length`.
    pub fn get_slice_bounds(&self, length: usize) -> (usize, usize) {
        page_bounds(length, self.page, self.per_page)
    }

    /// Goes back one page. Returns `true` if the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.on_first_page() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Goes forward one page. Returns `true` if the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn on_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Handles the previous/next key bindings.
    ///
    /// Returns the direction moved, if any.
    pub fn update(&mut self, msg: &Msg) -> Option<PageDirection> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        self.handle_key(key_msg)
    }

    pub(crate) fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<PageDirection> {
        if self.keymap.next_page.matches(key_msg) {
            self.next_page().then_some(PageDirection::Next)
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page().then_some(PageDirection::Previous)
        } else {
            None
        }
    }

    /// Renders the page indicator.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self.arabic_view(),
            Type::Dots => self.dots_view(),
        }
    }

    fn arabic_view(&self) -> String {
        self.arabic_format
            .replacen("%d", &self.page.to_string(), 1)
            .replacen("%d", &self.total_pages.to_string(), 1)
    }

    fn dots_view(&self) -> String {
        (1..=self.total_pages)
            .map(|i| {
                if i == self.page {
                    self.active_dot.as_str()
                } else {
                    self.inactive_dot.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let rows = ["a", "b"];
        assert_eq!(paginate(&rows, 2, 1), &["b"]);
        assert!(paginate(&rows, 3, 1).is_empty());
        assert!(paginate(&rows, 0, 1).is_empty());
        assert!(paginate(&rows, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_pages_cover_input_without_overlap() {
        let items: Vec<u32> = (0..23).collect();
        for size in 1..=25 {
            let pages = total_pages(items.len(), size);
            let joined: Vec<u32> = (1..=pages)
                .flat_map(|page| paginate(&items, page, size).iter().copied())
                .collect();
            assert_eq!(joined, items, "page size {}", size);
        }
    }

    #[test]
    fn test_shrinking_clamps_page() {
        let mut paginator = Model::new().with_per_page(10).with_total_items(100);
        paginator.set_page(8);
        paginator.set_total_items(15);
        assert_eq!(paginator.page, 2);
        paginator.set_total_items(0);
        assert_eq!(paginator.page, 1);
        assert_eq!(paginator.total_pages, 1);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut paginator = Model::new().with_per_page(2).with_total_items(4);
        assert!(!paginator.prev_page());
        assert!(paginator.next_page());
        assert!(!paginator.next_page());
        assert_eq!(paginator.page, 2);
        assert_eq!(paginator.items_on_page(3), 1);
    }

    #[test]
    fn test_key_navigation() {
        let mut paginator = Model::new().with_per_page(1).with_total_items(3);
        let next: Msg = Box::new(KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(paginator.update(&next), Some(PageDirection::Next));
        assert_eq!(paginator.page, 2);

        let prev = KeyMsg {
            key: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(paginator.handle_key(&prev), Some(PageDirection::Previous));
        assert_eq!(paginator.handle_key(&prev), None);
    }

    #[test]
    fn test_views() {
        let mut paginator = Model::new().with_per_page(10).with_total_items(30);
        assert_eq!(paginator.view(), "Page 1 of 3");
        paginator.paginator_type = Type::Dots;
        paginator.next_page();
        assert_eq!(paginator.view(), "○ ● ○");
    }
}
