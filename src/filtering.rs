//! Text filtering over grid rows.
//!
//! Matching is a case-insensitive substring test against the textual form of
//! every column the grid displays. Null and absent values match as the empty
//! string, so they never match a non-blank query on their own.

use crate::column::Column;
use crate::row::Row;
use std::borrow::Cow;

/// Returns `true` if any of `columns` in `row` contains `needle`.
///
/// `needle` must already be lower-cased.
pub fn row_matches(row: &Row, needle: &str, columns: &[Column]) -> bool {
    columns
        .iter()
        .any(|column| row.get(&column.field).folded_text().contains(needle))
}

/// Keeps the rows matching `query`, preserving their order.
///
/// A blank query borrows the input unchanged.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::{filtering::filter, Column, Row};
///
/// let rows = vec![
///     Row::new().with("id", 1).with("name", "Bob"),
///     Row::new().with("id", 2).with("name", "Ann"),
/// ];
/// let columns = vec![Column::new("name", "Name")];
///
/// let matched = filter(&rows, "AN", &columns);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].get("name").to_string(), "Ann");
/// ```
pub fn filter<'a>(rows: &'a [Row], query: &str, columns: &[Column]) -> Cow<'a, [Row]> {
    if query.trim().is_empty() {
        return Cow::Borrowed(rows);
    }

    let needle = query.to_lowercase();
    let matched: Vec<Row> = rows
        .iter()
        .filter(|row| row_matches(row, &needle, columns))
        .cloned()
        .collect();

    log::trace!(
        "filter {:?} kept {} of {} rows",
        query,
        matched.len(),
        rows.len()
    );
    Cow::Owned(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "Bob").with("age", 30),
            Row::new().with("id", 2).with("name", "Ann").with("age", 25),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID"),
            Column::new("name", "Name"),
            Column::new("age", "Age"),
        ]
    }

    #[test]
    fn test_blank_query_returns_input() {
        let rows = people();
        assert!(matches!(filter(&rows, "", &columns()), Cow::Borrowed(_)));
        assert_eq!(filter(&rows, "   ", &columns()).as_ref(), rows.as_slice());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rows = people();
        let matched = filter(&rows, "an", &columns());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("name"), &Value::from("Ann"));

        let matched = filter(&rows, "B", &columns());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("id"), &Value::from(1));
    }

    #[test]
    fn test_numbers_match_by_text() {
        let rows = people();
        let matched = filter(&rows, "2", &columns());
        // id 2 and age 25
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("name"), &Value::from("Ann"));
    }

    #[test]
    fn test_only_listed_columns_are_searched() {
        let rows = people();
        let only_name = vec![Column::new("name", "Name")];
        assert!(filter(&rows, "30", &only_name).is_empty());
    }

    #[test]
    fn test_null_values_do_not_match() {
        let rows = vec![
            Row::new().with("name", Value::Null),
            Row::new().with("other", "null"),
        ];
        let name = vec![Column::new("name", "Name")];
        assert!(filter(&rows, "null", &name).is_empty());
        assert!(filter(&rows, "undefined", &name).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = people();
        let once = filter(&rows, "b", &columns()).into_owned();
        let twice = filter(&once, "b", &columns()).into_owned();
        assert_eq!(once, twice);
    }
}
