//! Row selection tracking.
//!
//! Selection is keyed by row identifier rather than position, so it stays
//! stable while the grid is sorted, filtered or paged.

use crate::error::GridError;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::str::FromStr;

/// Selection cardinality policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one row selected.
    #[default]
    Single,
    /// Any number of rows selected.
    Multiple,
}

impl FromStr for SelectionMode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(SelectionMode::Single),
            "multiple" => Ok(SelectionMode::Multiple),
            other => Err(GridError::InvalidMode(other.to_string())),
        }
    }
}

/// Snapshot of the current selection, shaped by the mode.
///
/// Multiple mode keeps an insertion-ordered set so membership checks are
/// constant time and the first selected id stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T: Hash + Eq> {
    Single(Option<T>),
    /// Ids in the order they were selected.
    Multiple(IndexSet<T>),
}

/// Tracks which row identifiers are selected.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::selection::{RowSelector, SelectionMode};
///
/// let mut selector = RowSelector::new(SelectionMode::Single);
/// selector.select(1);
/// selector.select(2);
/// assert!(!selector.is_selected(&1));
/// assert_eq!(selector.selected_ids(), vec![2]);
///
/// selector.set_mode(SelectionMode::Multiple);
/// selector.toggle(3);
/// assert_eq!(selector.selected_ids(), vec![2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelector<T: Hash + Eq> {
    selection: Selection<T>,
}

impl<T: Clone + Hash + Eq> Default for RowSelector<T> {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl<T: Clone + Hash + Eq> RowSelector<T> {
    /// Creates an empty selector in `mode`.
    pub fn new(mode: SelectionMode) -> Self {
        let selection = match mode {
            SelectionMode::Single => Selection::Single(None),
            SelectionMode::Multiple => Selection::Multiple(IndexSet::new()),
        };
        Self { selection }
    }

    /// Current selection mode, derived from the shape of the selection.
    pub fn mode(&self) -> SelectionMode {
        match self.selection {
            Selection::Single(_) => SelectionMode::Single,
            Selection::Multiple(_) => SelectionMode::Multiple,
        }
    }

    /// Selects `id`. In single mode this replaces the previous selection.
    pub fn select(&mut self, id: T) {
        match &mut self.selection {
            Selection::Single(current) => *current = Some(id),
            Selection::Multiple(ids) => {
                ids.insert(id);
            }
        }
    }

    /// Removes `id` from the selection. Unselected ids are ignored.
    ///
    /// In multiple mode the remaining ids keep their selection order.
    pub fn deselect(&mut self, id: &T) {
        match &mut self.selection {
            Selection::Single(current) => {
                if current.as_ref() == Some(id) {
                    *current = None;
                }
            }
            Selection::Multiple(ids) => {
                ids.shift_remove(id);
            }
        }
    }

    /// Flips the selection state of `id`.
    pub fn toggle(&mut self, id: T) {
        if self.is_selected(&id) {
            self.deselect(&id);
        } else {
            self.select(id);
        }
    }

    /// Returns `true` if `id` is selected. Constant time in both modes.
    pub fn is_selected(&self, id: &T) -> bool {
        match &self.selection {
            Selection::Single(current) => current.as_ref() == Some(id),
            Selection::Multiple(ids) => ids.contains(id),
        }
    }

    /// Deselects everything. The mode is kept.
    pub fn clear(&mut self) {
        match &mut self.selection {
            Selection::Single(current) => *current = None,
            Selection::Multiple(ids) => ids.clear(),
        }
    }

    /// The selection in its mode-specific shape.
    ///
    /// ```rust
    /// use bubbletea_datagrid::selection::{RowSelector, Selection, SelectionMode};
    ///
    /// let mut selector = RowSelector::new(SelectionMode::Single);
    /// assert_eq!(selector.selected(), &Selection::Single(None));
    /// selector.select("a");
    /// assert_eq!(selector.selected(), &Selection::Single(Some("a")));
    /// ```
    pub fn selected(&self) -> &Selection<T> {
        &self.selection
    }

    /// Selected ids as a sequence: empty, a singleton in single mode, or in
    /// selection order in multiple mode.
    pub fn selected_ids(&self) -> Vec<T> {
        match &self.selection {
            Selection::Single(current) => current.iter().cloned().collect(),
            Selection::Multiple(ids) => ids.iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.selection {
            Selection::Single(current) => current.is_none(),
            Selection::Multiple(ids) => ids.is_empty(),
        }
    }

    /// Switches mode, carrying the selection over.
    ///
    /// Going to single mode keeps only the first selected id; going to
    /// multiple mode wraps the current id, if any.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode() == mode {
            return;
        }
        log::debug!("selection mode {:?} -> {:?}", self.mode(), mode);
        let ids = self.selected_ids();
        self.selection = match mode {
            SelectionMode::Single => Selection::Single(ids.into_iter().next()),
            SelectionMode::Multiple => Selection::Multiple(ids.into_iter().collect()),
        };
    }

    /// Drops ids for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        match &mut self.selection {
            Selection::Single(current) => {
                if current.as_ref().is_some_and(|id| !keep(id)) {
                    *current = None;
                }
            }
            Selection::Multiple(ids) => ids.retain(|id| keep(id)),
        }
    }
}
