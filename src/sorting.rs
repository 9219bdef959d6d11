//! Column sorting.

use crate::row::Row;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator for this direction.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Compares two present values: numerically when both are numbers,
/// otherwise by their lower-cased text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.folded_text().cmp(&b.folded_text()),
    }
}

/// Compares two cells for `direction`, placing nulls after every present
/// value regardless of direction.
pub fn compare_cells(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_values(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Sorts rows by `field`. Equal keys keep their relative order.
///
/// Without a field the input is borrowed unchanged.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::sorting::{sort, SortDirection};
/// use bubbletea_datagrid::Row;
///
/// let rows = vec![
///     Row::new().with("name", "Bob").with("age", 30),
///     Row::new().with("name", "Ann").with("age", 25),
/// ];
/// let sorted = sort(&rows, Some("age"), SortDirection::Ascending);
/// assert_eq!(sorted[0].get("name").to_string(), "Ann");
/// ```
pub fn sort<'a>(rows: &'a [Row], field: Option<&str>, direction: SortDirection) -> Cow<'a, [Row]> {
    let Some(field) = field else {
        return Cow::Borrowed(rows);
    };

    let mut sorted = rows.to_vec();
    // slice::sort_by is stable
    sorted.sort_by(|a, b| compare_cells(a.get(field), b.get(field), direction));
    Cow::Owned(sorted)
}
