//! Host record access
//!
//! Records belong to the host. The pipeline only reads them through the
//! [`Record`] trait, and reads its own configuration through
//! [`ConfigSource`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// A field value as handed out by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Numeric value
    Number(f64),
    /// Text/string value
    Text(String),
    /// Multi-valued field
    List(Vec<Value>),
}

impl Value {
    /// Check if the value carries nothing worth reading
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Boolean(_) | Value::Number(_) => false,
        }
    }

    /// Convert to string representation
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Namespace prefix of a field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldNamespace {
    /// `property.<key>`: a user-defined property
    Property,
    /// `note.<key>`: alias for a user-defined property
    Note,
    /// `file.<key>`: built-in file metadata
    File,
    /// `formula.<key>`: a host-computed formula
    Formula,
}

impl FieldNamespace {
    fn parse(prefix: &str) -> Option<Self> {
        match prefix {
            "property" => Some(FieldNamespace::Property),
            "note" => Some(FieldNamespace::Note),
            "file" => Some(FieldNamespace::File),
            "formula" => Some(FieldNamespace::Formula),
            _ => None,
        }
    }
}

/// Identifier of a record field, e.g. `property.effort` or `file.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace, if the id starts with a known prefix
    pub fn namespace(&self) -> Option<FieldNamespace> {
        self.0
            .split_once('.')
            .and_then(|(prefix, _)| FieldNamespace::parse(prefix))
    }

    /// The key within the namespace; the whole id for bare keys
    pub fn key(&self) -> &str {
        match self.0.split_once('.') {
            Some((prefix, rest)) if FieldNamespace::parse(prefix).is_some() => rest,
            _ => &self.0,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A host record the pipeline can read fields from
pub trait Record {
    /// Look up a field. `Ok(None)` means the record has no such value.
    fn field(&self, field: &FieldId) -> FieldResult<Option<Value>>;

    /// Canonical short name, used as the point label
    fn short_name(&self) -> &str;

    /// Stable identity used to find the record again
    fn key(&self) -> &str;
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, field: &FieldId) -> FieldResult<Option<Value>> {
        (**self).field(field)
    }

    fn short_name(&self) -> &str {
        (**self).short_name()
    }

    fn key(&self) -> &str {
        (**self).key()
    }
}

/// An in-memory record, for inline data and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRecord {
    name: String,
    key: String,
    fields: HashMap<String, Value>,
    failures: HashMap<String, FieldError>,
}

impl MemoryRecord {
    /// Create a record whose key is its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// Set the stable key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Add a field value
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Make lookups of a field fail with the given error
    pub fn with_failure(mut self, field: impl Into<String>, error: FieldError) -> Self {
        self.failures.insert(field.into(), error);
        self
    }
}

impl Record for MemoryRecord {
    /// Matches the full id first, then the key within its namespace.
    fn field(&self, field: &FieldId) -> FieldResult<Option<Value>> {
        for name in [field.as_str(), field.key()] {
            if let Some(error) = self.failures.get(name) {
                return Err(error.clone());
            }
            if let Some(value) = self.fields.get(name) {
                return Ok(Some(value.clone()));
            }
        }
        Ok(None)
    }

    fn short_name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }
}

/// Configuration storage readable by string key
pub trait ConfigSource {
    fn get_str(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl ConfigSource for serde_json::Map<String, serde_json::Value> {
    fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }
}

/// Configuration key for the X axis field
pub const X_FIELD_KEY: &str = "xField";
/// Configuration key for the Y axis field
pub const Y_FIELD_KEY: &str = "yField";
/// Configuration key for the color grouping field
pub const COLOR_FIELD_KEY: &str = "colorField";

/// Which fields feed the plot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub x_field: Option<FieldId>,
    pub y_field: Option<FieldId>,
    pub color_field: Option<FieldId>,
}

impl PlotConfig {
    /// Create a config with both axes set and no color grouping
    pub fn new(x_field: impl Into<FieldId>, y_field: impl Into<FieldId>) -> Self {
        Self {
            x_field: Some(x_field.into()),
            y_field: Some(y_field.into()),
            color_field: None,
        }
    }

    /// Set the color grouping field
    pub fn with_color(mut self, color_field: impl Into<FieldId>) -> Self {
        self.color_field = Some(color_field.into());
        self
    }

    /// Read the three field ids from a config source. Blank values count as unset.
    pub fn from_source(source: &impl ConfigSource) -> Self {
        let read = |key: &str| {
            source
                .get_str(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(FieldId::new)
        };

        Self {
            x_field: read(X_FIELD_KEY),
            y_field: read(Y_FIELD_KEY),
            color_field: read(COLOR_FIELD_KEY),
        }
    }

    /// Both axes are configured, so the pipeline can run
    pub fn is_complete(&self) -> bool {
        self.x_field.is_some() && self.y_field.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(!Value::from(" ").is_empty());
        assert!(!Value::from(0.0).is_empty());
        assert!(!Value::from(false).is_empty());
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(Value::from(2.0).to_text(), "2");
        assert_eq!(Value::from(2.5).to_text(), "2.5");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::from(3)]).to_text(),
            "a, 3"
        );
        assert_eq!(Value::Null.to_text(), "");
    }

    #[test]
    fn test_field_id_namespaces() {
        let id = FieldId::new("property.effort");
        assert_eq!(id.namespace(), Some(FieldNamespace::Property));
        assert_eq!(id.key(), "effort");

        let id = FieldId::new("file.name");
        assert_eq!(id.namespace(), Some(FieldNamespace::File));
        assert_eq!(id.key(), "name");

        let id = FieldId::new("effort");
        assert_eq!(id.namespace(), None);
        assert_eq!(id.key(), "effort");

        let id = FieldId::new("meta.score");
        assert_eq!(id.namespace(), None);
        assert_eq!(id.key(), "meta.score");
    }

    #[test]
    fn test_plot_config_from_json() {
        let json = serde_json::json!({
            "xField": "property.effort",
            "yField": "  ",
            "colorField": "note.status",
        });
        let map = json.as_object().unwrap();
        let config = PlotConfig::from_source(map);

        assert_eq!(config.x_field, Some(FieldId::new("property.effort")));
        assert_eq!(config.y_field, None);
        assert_eq!(config.color_field, Some(FieldId::new("note.status")));
        assert!(!config.is_complete());
    }

    #[test]
    fn test_plot_config_from_map() {
        let mut map = HashMap::new();
        map.insert(X_FIELD_KEY.to_string(), "a".to_string());
        map.insert(Y_FIELD_KEY.to_string(), "b".to_string());

        let config = PlotConfig::from_source(&map);
        assert!(config.is_complete());
        assert_eq!(config, PlotConfig::new("a", "b"));
    }

    #[test]
    fn test_memory_record_lookup() {
        let record = MemoryRecord::new("Task")
            .with("effort", 3)
            .with("property.value", "high")
            .with_failure("broken", FieldError::Lookup("boom".to_string()));

        let effort = record.field(&FieldId::new("property.effort")).unwrap();
        assert_eq!(effort, Some(Value::Number(3.0)));

        let value = record.field(&FieldId::new("property.value")).unwrap();
        assert_eq!(value, Some(Value::from("high")));

        assert_eq!(record.field(&FieldId::new("missing")).unwrap(), None);
        assert!(record.field(&FieldId::new("note.broken")).is_err());
        assert_eq!(record.key(), "Task");
    }
}
