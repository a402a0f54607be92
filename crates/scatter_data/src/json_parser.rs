//! JSON record source

use std::collections::HashMap;
use std::path::Path;

use scatter::Value;
use serde_json::{Map, Value as JsonValue};

use crate::csv_parser::apply_identity;
use crate::data_source::{ColumnDef, DataRecord, DataSource, DataSourceType, DataType};
use crate::error::{DataError, Result};

/// JSON parser configuration
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Root path to the data array (e.g., "data.tasks")
    pub root_path: Option<String>,
    /// Whether to flatten nested objects with dot notation
    pub flatten_nested: bool,
    /// Maximum nesting depth for flattening
    pub max_depth: usize,
    /// Key holding the record's display name
    pub name_key: String,
    /// Key holding the record's stable key
    pub path_key: String,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            flatten_nested: true,
            max_depth: 3,
            name_key: "name".to_string(),
            path_key: "path".to_string(),
        }
    }
}

impl JsonConfig {
    /// Set the root path for the data array
    pub fn with_root_path(mut self, path: impl Into<String>) -> Self {
        self.root_path = Some(path.into());
        self
    }

    /// Set whether to flatten nested objects
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten_nested = flatten;
        self
    }

    /// Set the key used for record names
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }
}

/// JSON parser for creating data sources from JSON files or strings
pub struct JsonParser {
    config: JsonConfig,
}

impl JsonParser {
    /// Create a new JSON parser with default configuration
    pub fn new() -> Self {
        Self {
            config: JsonConfig::default(),
        }
    }

    /// Create a new JSON parser with custom configuration
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Parse a JSON file and return a DataSource
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DataSource> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("json_source")
            .to_string();

        let source_type = DataSourceType::Json {
            path: path.display().to_string(),
            root_path: self.config.root_path.clone(),
        };

        self.parse_with_source_type(&content, id, source_type)
    }

    /// Parse JSON from a string and return a DataSource
    pub fn parse_string(&self, data: &str, id: impl Into<String>) -> Result<DataSource> {
        self.parse_with_source_type(data, id.into(), DataSourceType::Inline)
    }

    fn parse_with_source_type(&self, data: &str, id: String, source_type: DataSourceType) -> Result<DataSource> {
        let json: JsonValue = serde_json::from_str(data)?;

        let root = match self.config.root_path {
            Some(ref path) => navigate_to_path(&json, path)?,
            None => &json,
        };

        let objects: Vec<&Map<String, JsonValue>> = match root {
            JsonValue::Array(items) => items.iter().filter_map(JsonValue::as_object).collect(),
            JsonValue::Object(obj) => vec![obj],
            _ => {
                return Err(DataError::InvalidDataSource(
                    "Expected JSON array or object".to_string(),
                ));
            }
        };

        if objects.is_empty() {
            return Err(DataError::EmptyDataSource("JSON array has no objects".to_string()));
        }

        let mut data_source = DataSource::new(id, source_type);
        let mut column_order: Vec<String> = Vec::new();
        let mut column_values: HashMap<String, Vec<Value>> = HashMap::new();

        for (index, obj) in objects.into_iter().enumerate() {
            let mut record = DataRecord::new(
                format!("Item {}", index + 1),
                format!("{}#{}", data_source.id, index + 1),
            );
            self.flatten_into(obj, "", 0, &mut record.properties);
            apply_identity(&mut record, &self.config.name_key, &self.config.path_key);

            let mut keys: Vec<&String> = record.properties.keys().collect();
            keys.sort();
            for key in keys {
                if !column_values.contains_key(key) {
                    column_order.push(key.clone());
                }
                column_values
                    .entry(key.clone())
                    .or_default()
                    .push(record.properties[key].clone());
            }

            data_source.add_record(record);
        }

        for name in column_order {
            let data_type = DataType::infer(column_values.get(&name).into_iter().flatten());
            data_source.add_column(ColumnDef::new(name, data_type));
        }

        tracing::debug!(
            source = %data_source.id,
            records = data_source.record_count(),
            columns = data_source.columns.len(),
            "parsed JSON source"
        );

        Ok(data_source)
    }

    /// Copy an object's fields into `out`, nested objects under dotted keys
    fn flatten_into(
        &self,
        obj: &Map<String, JsonValue>,
        prefix: &str,
        depth: usize,
        out: &mut HashMap<String, Value>,
    ) {
        for (key, value) in obj {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            match value {
                JsonValue::Object(nested) if self.config.flatten_nested && depth < self.config.max_depth => {
                    self.flatten_into(nested, &full_key, depth + 1, out);
                }
                _ => {
                    out.insert(full_key, json_value_to_value(value));
                }
            }
        }
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigate to a nested path in a JSON value using dot notation
fn navigate_to_path<'a>(json: &'a JsonValue, path: &str) -> Result<&'a JsonValue> {
    let mut current = json;

    for part in path.split('.') {
        current = match current {
            JsonValue::Object(obj) => obj
                .get(part)
                .ok_or_else(|| DataError::InvalidPath(format!("Path '{}' not found", path)))?,
            JsonValue::Array(arr) => {
                let index: usize = part.parse().map_err(|_| {
                    DataError::InvalidPath(format!(
                        "Expected numeric index for array access, got '{}'",
                        part
                    ))
                })?;
                arr.get(index).ok_or_else(|| {
                    DataError::InvalidPath(format!("Array index {} out of bounds", index))
                })?
            }
            _ => {
                return Err(DataError::InvalidPath(format!(
                    "Cannot access '{}' on non-object/array value",
                    part
                )));
            }
        };
    }

    Ok(current)
}

/// Convert a JSON value to a field value. Strings stay text.
fn json_value_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => Value::List(items.iter().map(json_value_to_value).collect()),
        JsonValue::Object(obj) => Value::Text(JsonValue::Object(obj.clone()).to_string()),
    }
}
