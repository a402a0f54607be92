//! Data source and record types

use std::collections::HashMap;
use std::path::Path;

use scatter::{FieldError, FieldId, FieldNamespace, FieldResult, Record, Value};
use serde::{Deserialize, Serialize};

/// A loaded set of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    /// Identifier for this data source, usually the file stem
    pub id: String,
    /// Where the records came from
    pub source_type: DataSourceType,
    /// Column definitions in first-seen order
    pub columns: Vec<ColumnDef>,
    /// Records in file order
    pub records: Vec<DataRecord>,
}

impl DataSource {
    /// Create a new data source with the given ID and source type
    pub fn new(id: impl Into<String>, source_type: DataSourceType) -> Self {
        Self {
            id: id.into(),
            source_type,
            columns: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Create a new inline data source
    pub fn inline(id: impl Into<String>) -> Self {
        Self::new(id, DataSourceType::Inline)
    }

    /// Add a column definition
    pub fn add_column(&mut self, column: ColumnDef) {
        self.columns.push(column);
    }

    /// Add a record
    pub fn add_record(&mut self, record: DataRecord) {
        self.records.push(record);
    }

    /// Get the number of records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of columns whose values were all numeric, for axis pickers
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data_type == DataType::Number)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Get a record by its key
    pub fn find(&self, key: &str) -> Option<&DataRecord> {
        self.records.iter().find(|r| r.path == key)
    }
}

/// Type of data source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSourceType {
    /// CSV file data source
    Csv {
        path: String,
        delimiter: char,
        has_header: bool,
    },
    /// JSON file data source
    Json {
        path: String,
        /// Optional dot path to the data array (e.g., "data.tasks")
        root_path: Option<String>,
    },
    /// Records built in memory
    Inline,
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Data type inferred for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Text,
    Number,
    Boolean,
    List,
}

impl DataType {
    /// Type of a single value; nulls have none
    pub fn of(value: &Value) -> Option<DataType> {
        match value {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Number(_) => Some(DataType::Number),
            Value::Text(_) => Some(DataType::Text),
            Value::List(_) => Some(DataType::List),
        }
    }

    /// Combine the types seen in one column: one type wins, anything mixed is text
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> DataType {
        let mut seen: Option<DataType> = None;
        for data_type in values.into_iter().filter_map(DataType::of) {
            match seen {
                None => seen = Some(data_type),
                Some(t) if t == data_type => {}
                Some(_) => return DataType::Text,
            }
        }
        seen.unwrap_or(DataType::Text)
    }
}

/// One row or object from a data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Short display name
    pub name: String,
    /// Stable key, a real path when the data provides one
    pub path: String,
    pub properties: HashMap<String, Value>,
}

impl DataRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            properties: HashMap::new(),
        }
    }

    /// Add a property
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    fn file_field(&self, field: &FieldId) -> FieldResult<Option<Value>> {
        let value = match field.key() {
            "name" | "basename" => self.name.clone(),
            "path" => self.path.clone(),
            "ext" => match Path::new(&self.path).extension().and_then(|e| e.to_str()) {
                Some(ext) => ext.to_string(),
                None => return Ok(None),
            },
            _ => return Err(FieldError::UnknownField(field.to_string())),
        };
        Ok(Some(Value::Text(value)))
    }
}

impl Record for DataRecord {
    fn field(&self, field: &FieldId) -> FieldResult<Option<Value>> {
        match field.namespace() {
            Some(FieldNamespace::File) => self.file_field(field),
            Some(FieldNamespace::Formula) => Err(FieldError::Unsupported(field.to_string())),
            Some(FieldNamespace::Property) | Some(FieldNamespace::Note) | None => {
                Ok(self.properties.get(field.key()).cloned())
            }
        }
    }

    fn short_name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.path
    }
}

/// Parse a raw text cell with automatic type detection
pub fn parse_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed.eq_ignore_ascii_case("na") {
        return Value::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
    }

    Value::Text(raw.to_string())
}
