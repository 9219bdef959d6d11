//! Column and editable-field descriptors.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A display column: which row field it shows and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Row field this column reads.
    pub field: String,
    /// Header label.
    pub header: String,
    /// Fixed width in terminal cells. Falls back to the header width.
    #[serde(default)]
    pub width: Option<usize>,
}

impl Column {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            width: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Width used when rendering, never narrower than one cell.
    pub fn display_width(&self) -> usize {
        self.width
            .unwrap_or_else(|| unicode_width::UnicodeWidthStr::width(self.header.as_str()))
            .max(1)
    }
}

/// Input kind for an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Select,
    Date,
    Checkbox,
}

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Editing configuration for a single field.
///
/// Only fields with `editable` set take part in change detection when an
/// edit session is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableConfig {
    pub field: String,
    #[serde(default = "default_editable")]
    pub editable: bool,
    #[serde(default, rename = "type")]
    pub kind: FieldType,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

fn default_editable() -> bool {
    true
}

impl EditableConfig {
    /// An editable text field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            editable: true,
            kind: FieldType::Text,
            options: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: FieldType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Label of the option whose value equals `value`.
    pub fn option_label(&self, value: &Value) -> Option<&str> {
        self.options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width() {
        assert_eq!(Column::new("name", "Name").display_width(), 4);
        assert_eq!(Column::new("name", "Name").with_width(12).display_width(), 12);
        assert_eq!(Column::new("x", "").display_width(), 1);
    }

    #[test]
    fn test_editable_config_from_json() {
        let config: EditableConfig = serde_json::from_str(
            r#"{"field": "status", "type": "select",
                "options": [{"value": "a", "label": "Active"}, {"value": 0, "label": "Off"}]}"#,
        )
        .unwrap();
        assert!(config.editable);
        assert_eq!(config.kind, FieldType::Select);
        assert_eq!(config.option_label(&Value::from("a")), Some("Active"));
        assert_eq!(config.option_label(&Value::from(0)), Some("Off"));
        assert_eq!(config.option_label(&Value::from("b")), None);
    }
}
