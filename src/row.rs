//! Ordered grid records.

use crate::error::{GridError, Result};
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

static NULL: Value = Value::Null;

/// One record of the data set: field names mapped to values, in insertion
/// order.
///
/// Reading a field that is not present yields [`Value::Null`]. Serialises
/// as a JSON object with the fields in row order.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::{Row, Value};
///
/// let row = Row::new().with("id", 1).with("name", "Bob");
/// assert_eq!(row.get("name"), &Value::from("Bob"));
/// assert!(row.get("age").is_null());
/// assert_eq!(row.fields().collect::<Vec<_>>(), vec!["id", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field and returns the row (builder pattern).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of `field`, or null when absent.
    pub fn get(&self, field: &str) -> &Value {
        self.cells.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the row carries `field`, even with a null value.
    pub fn contains(&self, field: &str) -> bool {
        self.cells.contains_key(field)
    }

    /// Sets `field`, keeping its position if it already exists.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(field.into(), value.into());
    }

    /// Removes `field`; the remaining fields keep their order.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.cells.shift_remove(field)
    }

    /// Iterates over field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Iterates over `(field, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the identifier stored under `id_field`.
    ///
    /// A missing or null identifier is a caller contract violation.
    pub fn id(&self, id_field: &str) -> Result<&Value> {
        match self.get(id_field) {
            Value::Null => Err(GridError::missing_id(id_field)),
            id => Ok(id),
        }
    }

    /// Builds a row from a JSON object, keeping the object's key order.
    ///
    /// Nested arrays and objects become their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| GridError::Config(format!("expected a JSON object, got {}", value)))?;
        Ok(object
            .iter()
            .map(|(field, value)| (field.clone(), Value::from_json(value)))
            .collect())
    }

    /// Parses a JSON array of objects into rows, keeping field order.
    pub fn from_json_str(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (field, value) in iter {
            row.set(field, value);
        }
        row
    }
}
