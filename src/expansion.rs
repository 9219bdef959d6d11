//! Nested subtable expansion.
//!
//! A nested row is located by a [`RowPath`]: the identifiers of its ancestors
//! from the top-level row down, followed by its own. [`ExpansionState`]
//! stores one flag per path: a path is expanded iff it is in the set.
//! Parent/child relations are decided structurally by comparing path
//! prefixes.

use crate::value::Value;
use indexmap::IndexSet;
use std::fmt;

/// Location of a row inside nested subtables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RowPath(Vec<Value>);

impl RowPath {
    /// Path of a top-level row.
    pub fn root(id: impl Into<Value>) -> Self {
        Self(vec![id.into()])
    }

    /// Path of the nested row `id` under this one.
    pub fn child(&self, id: impl Into<Value>) -> Self {
        let mut ids = self.0.clone();
        ids.push(id.into());
        Self(ids)
    }

    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    pub fn ids(&self) -> &[Value] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn root_id(&self) -> Option<&Value> {
        self.0.first()
    }

    /// Returns `true` if `other` lies strictly below this path.
    pub fn is_ancestor_of(&self, other: &RowPath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<Value>> for RowPath {
    fn from(ids: Vec<Value>) -> Self {
        Self(ids)
    }
}

impl fmt::Display for RowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

/// Which nested rows are expanded.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::expansion::{ExpansionState, RowPath};
///
/// let mut state = ExpansionState::new();
/// let parent = RowPath::root(1);
/// let child = parent.child(10);
///
/// state.expand(parent.clone());
/// state.expand(child.clone());
/// assert!(state.is_visible(&child.child(100)));
///
/// state.collapse(&parent);
/// assert!(!state.is_expanded(&child));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    // expansion order
    expanded: IndexSet<RowPath>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, path: &RowPath) -> bool {
        self.expanded.contains(path)
    }

    pub fn expand(&mut self, path: RowPath) {
        log::trace!("expand {}", path);
        self.expanded.insert(path);
    }

    /// Collapses `path` together with everything expanded beneath it.
    pub fn collapse(&mut self, path: &RowPath) {
        log::trace!("collapse {}", path);
        self.expanded
            .retain(|expanded| expanded != path && !path.is_ancestor_of(expanded));
    }

    /// Flips `path` and returns its new state.
    pub fn toggle(&mut self, path: RowPath) -> bool {
        if self.is_expanded(&path) {
            self.collapse(&path);
            false
        } else {
            self.expand(path);
            true
        }
    }

    /// A row is visible when every ancestor is expanded. Top-level rows are
    /// always visible.
    pub fn is_visible(&self, path: &RowPath) -> bool {
        let mut current = path.parent();
        while let Some(ancestor) = current {
            if !self.is_expanded(&ancestor) {
                return false;
            }
            current = ancestor.parent();
        }
        true
    }

    /// Expanded paths in the order they were expanded.
    pub fn expanded_paths(&self) -> impl Iterator<Item = &RowPath> {
        self.expanded.iter()
    }

    /// Number of expanded paths.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Forgets paths whose top-level row is no longer present.
    pub fn retain_roots(&mut self, mut exists: impl FnMut(&Value) -> bool) {
        self.expanded
            .retain(|path| path.root_id().is_some_and(|id| exists(id)));
    }
}
