//! Grid configuration.
//!
//! Everything the host supplies besides the rows: display columns, editable
//! fields, page size and the selection and edit modes. The configuration
//! can be built in code or deserialised from JSON.
//!
//! ```rust
//! use bubbletea_datagrid::config::GridConfig;
//! use bubbletea_datagrid::SelectionMode;
//!
//! let config = GridConfig::from_json_str(r#"{
//!     "columns": [
//!         {"field": "id", "header": "ID", "width": 4},
//!         {"field": "name", "header": "Name"}
//!     ],
//!     "editable_fields": [{"field": "name"}],
//!     "selection_mode": "multiple"
//! }"#).unwrap();
//!
//! assert_eq!(config.page_size, 10);
//! assert_eq!(config.selection_mode, SelectionMode::Multiple);
//! ```

use crate::column::{Column, EditableConfig};
use crate::editor::{EditMode, DEFAULT_ID_FIELD};
use crate::error::{GridError, Result};
use crate::selection::SelectionMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_PAGE_SIZE: usize = 10;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub editable_fields: Vec<EditableConfig>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub edit_mode: EditMode,
    #[serde(default = "default_id_field")]
    pub id_field: String,
}

impl GridConfig {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            editable_fields: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            selection_mode: SelectionMode::default(),
            edit_mode: EditMode::default(),
            id_field: default_id_field(),
        }
    }

    pub fn with_editable_fields(mut self, fields: Vec<EditableConfig>) -> Self {
        self.editable_fields = fields;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_edit_mode(mut self, mode: EditMode) -> Self {
        self.edit_mode = mode;
        self
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates an already deserialised JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the page size, column fields and identifier field.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GridError::Config("page_size must be at least 1".into()));
        }
        if self.columns.is_empty() {
            return Err(GridError::Config("at least one column is required".into()));
        }
        if self.id_field.is_empty() {
            return Err(GridError::Config("id_field must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.field.is_empty() {
                return Err(GridError::Config(format!(
                    "column '{}' has an empty field",
                    column.header
                )));
            }
            if !seen.insert(column.field.as_str()) {
                return Err(GridError::Config(format!(
                    "duplicate column field '{}'",
                    column.field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::FieldType;

    #[test]
    fn test_defaults() {
        let config = GridConfig::from_json_str(r#"{"columns": [{"field": "a", "header": "A"}]}"#)
            .unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert_eq!(config.edit_mode, EditMode::Popup);
        assert_eq!(config.id_field, "id");
        assert!(config.editable_fields.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = GridConfig::from_json_value(serde_json::json!({
            "columns": [{"field": "due", "header": "Due"}],
            "editable_fields": [{"field": "due", "type": "date", "editable": false}],
            "page_size": 25,
            "edit_mode": "inline",
            "id_field": "key"
        }))
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.edit_mode, EditMode::Inline);
        assert_eq!(config.editable_fields[0].kind, FieldType::Date);
        assert!(!config.editable_fields[0].editable);
        assert_eq!(config.id_field, "key");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = GridConfig::from_json_str(
            r#"{"columns": [{"field": "a", "header": "A"}], "page_size": 0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let config = GridConfig::new(vec![Column::new("a", "A"), Column::new("a", "Again")]);
        assert!(config.validate().is_err());
        assert!(GridConfig::new(vec![]).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_mode_and_json() {
        assert!(matches!(
            GridConfig::from_json_str(
                r#"{"columns": [{"field": "a", "header": "A"}], "selection_mode": "many"}"#
            ),
            Err(GridError::Json(_))
        ));
        assert!(matches!(GridConfig::from_json_str("{"), Err(GridError::Json(_))));
    }
}
