//! Cell formatting, input parsing and inline cell editing.

use crate::column::{EditableConfig, FieldType};
use crate::error::{GridError, Result};
use crate::event::GridEvent;
use crate::value::{Value, DATE_FORMAT};
use chrono::NaiveDate;
use std::borrow::Cow;

/// Display text for `value` under an optional field configuration.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::cell::format_value;
/// use bubbletea_datagrid::{EditableConfig, FieldType, SelectOption, Value};
///
/// let done = EditableConfig::new("done").with_kind(FieldType::Checkbox);
/// assert_eq!(format_value(&Value::from(true), Some(&done)), "✓");
///
/// let status = EditableConfig::new("status")
///     .with_kind(FieldType::Select)
///     .with_options(vec![SelectOption::new("a", "Active")]);
/// assert_eq!(format_value(&Value::from("a"), Some(&status)), "Active");
/// assert_eq!(format_value(&Value::from("z"), Some(&status)), "z");
/// ```
pub fn format_value<'a>(value: &'a Value, config: Option<&'a EditableConfig>) -> Cow<'a, str> {
    if value.is_null() {
        return Cow::Borrowed("");
    }
    match config.map(|c| (c.kind, c)) {
        Some((FieldType::Checkbox, _)) => {
            let checked = value.as_bool().unwrap_or_else(|| !value.to_string().is_empty());
            Cow::Borrowed(if checked { "✓" } else { "✗" })
        }
        Some((FieldType::Select, config)) => match config.option_label(value) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(value.to_string()),
        },
        _ => match value {
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        },
    }
}

/// Converts raw input text to a value of the field's type.
pub fn parse_input(text: &str, config: &EditableConfig) -> Result<Value> {
    let trimmed = text.trim();
    match config.kind {
        FieldType::Text => Ok(Value::Text(text.to_string())),
        FieldType::Number => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            trimmed
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|e| GridError::invalid_input(&config.field, e.to_string()))
        }
        FieldType::Checkbox => match trimmed.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "x" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(Value::Bool(false)),
            other => Err(GridError::invalid_input(
                &config.field,
                format!("'{}' is not a checkbox value", other),
            )),
        },
        FieldType::Date => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|e| GridError::invalid_input(&config.field, e.to_string()))
        }
        FieldType::Select => {
            if config.options.is_empty() {
                return Ok(Value::Text(text.to_string()));
            }
            config
                .options
                .iter()
                .find(|option| option.value.to_string() == trimmed || option.label == trimmed)
                .map(|option| option.value.clone())
                .ok_or_else(|| {
                    GridError::invalid_input(&config.field, format!("'{}' is not an option", trimmed))
                })
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveCell {
    config: EditableConfig,
    original: Value,
    input: String,
}

/// Single-cell inline editing.
///
/// Holds the raw input while the user types; committing parses it and
/// reports a [`GridEvent::ValueChanged`] only when the value changed.
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    active: Option<ActiveCell>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing a cell. Returns `false` if the field is not editable
    /// or another cell is being edited.
    pub fn begin(&mut self, value: &Value, config: Option<&EditableConfig>) -> bool {
        let Some(config) = config.filter(|c| c.editable) else {
            return false;
        };
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveCell {
            config: config.clone(),
            original: value.clone(),
            input: value.to_string(),
        });
        true
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Field of the cell being edited.
    pub fn field(&self) -> Option<&str> {
        self.active.as_ref().map(|cell| cell.config.field.as_str())
    }

    pub fn input(&self) -> Option<&str> {
        self.active.as_ref().map(|cell| cell.input.as_str())
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        if let Some(cell) = &mut self.active {
            cell.input = input.into();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(cell) = &mut self.active {
            cell.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(cell) = &mut self.active {
            cell.input.pop();
        }
    }

    /// Parses the input and closes the cell.
    ///
    /// Invalid input keeps the cell open and returns the error. Without an
    /// active cell this returns `Ok(None)`.
    pub fn commit(&mut self) -> Result<Option<GridEvent>> {
        let Some(cell) = &self.active else {
            return Ok(None);
        };
        let new_value = parse_input(&cell.input, &cell.config)?;
        let Some(cell) = self.active.take() else {
            return Ok(None);
        };
        if new_value == cell.original {
            return Ok(None);
        }
        Ok(Some(GridEvent::ValueChanged {
            field: cell.config.field,
            old_value: cell.original,
            new_value,
        }))
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::SelectOption;

    fn status() -> EditableConfig {
        EditableConfig::new("status")
            .with_kind(FieldType::Select)
            .with_options(vec![SelectOption::new(1, "Open"), SelectOption::new(2, "Closed")])
    }

    #[test]
    fn test_format_plain_values() {
        assert_eq!(format_value(&Value::Null, None), "");
        assert_eq!(format_value(&Value::from(4), None), "4");
        let done = EditableConfig::new("done").with_kind(FieldType::Checkbox);
        assert_eq!(format_value(&Value::from(false), Some(&done)), "✗");
        assert_eq!(format_value(&Value::Null, Some(&done)), "");
    }

    #[test]
    fn test_parse_by_type() {
        let age = EditableConfig::new("age").with_kind(FieldType::Number);
        assert_eq!(parse_input(" 42 ", &age).unwrap(), Value::from(42));
        assert_eq!(parse_input("", &age).unwrap(), Value::Null);
        assert!(matches!(
            parse_input("abc", &age),
            Err(GridError::InvalidInput { field, .. }) if field == "age"
        ));

        let due = EditableConfig::new("due").with_kind(FieldType::Date);
        assert_eq!(
            parse_input("2024-02-29", &due).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(parse_input("2023-02-29", &due).is_err());

        let done = EditableConfig::new("done").with_kind(FieldType::Checkbox);
        assert_eq!(parse_input("Yes", &done).unwrap(), Value::Bool(true));
        assert_eq!(parse_input("", &done).unwrap(), Value::Bool(false));

        assert_eq!(parse_input("Closed", &status()).unwrap(), Value::from(2));
        assert_eq!(parse_input("1", &status()).unwrap(), Value::from(1));
        assert!(parse_input("3", &status()).is_err());
    }

    #[test]
    fn test_commit_reports_changes_only() {
        let config = EditableConfig::new("name");
        let mut cell = CellEditor::new();
        assert!(cell.begin(&Value::from("Bob"), Some(&config)));
        assert!(!cell.begin(&Value::from("Ann"), Some(&config)));
        assert_eq!(cell.commit().unwrap(), None);
        assert!(!cell.is_editing());

        assert!(cell.begin(&Value::from("Bob"), Some(&config)));
        cell.pop_char();
        cell.push_char('x');
        assert_eq!(
            cell.commit().unwrap(),
            Some(GridEvent::ValueChanged {
                field: "name".into(),
                old_value: Value::from("Bob"),
                new_value: Value::from("Box"),
            })
        );
    }

    #[test]
    fn test_read_only_cells_do_not_open() {
        let mut cell = CellEditor::new();
        assert!(!cell.begin(&Value::from(1), None));
        assert!(!cell.begin(&Value::from(1), Some(&EditableConfig::new("id").read_only())));
    }

    #[test]
    fn test_invalid_input_keeps_cell_open() {
        let age = EditableConfig::new("age").with_kind(FieldType::Number);
        let mut cell = CellEditor::new();
        cell.begin(&Value::from(30), Some(&age));
        cell.set_input("thirty");
        assert!(cell.commit().is_err());
        assert!(cell.is_editing());
        cell.cancel();
        assert_eq!(cell.input(), None);
    }
}
