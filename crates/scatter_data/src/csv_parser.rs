//! CSV record source

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use scatter::Value;

use crate::data_source::{parse_value, ColumnDef, DataRecord, DataSource, DataSourceType, DataType};
use crate::error::{DataError, Result};

/// CSV parser configuration
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Delimiter character
    pub delimiter: char,
    /// Whether the first row contains headers
    pub has_header: bool,
    /// Whether to trim whitespace from values
    pub trim_whitespace: bool,
    /// Column holding the record's display name
    pub name_column: String,
    /// Column holding the record's stable key
    pub path_column: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            trim_whitespace: true,
            name_column: "name".to_string(),
            path_column: "path".to_string(),
        }
    }
}

impl CsvConfig {
    /// Create a new CSV config with tab delimiter
    pub fn tab() -> Self {
        Self {
            delimiter: '\t',
            ..Default::default()
        }
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the first row is a header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the column used for record names
    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }
}

/// CSV parser for creating data sources from CSV files or strings
pub struct CsvParser {
    config: CsvConfig,
}

impl CsvParser {
    /// Create a new CSV parser with default configuration
    pub fn new() -> Self {
        Self {
            config: CsvConfig::default(),
        }
    }

    /// Create a new CSV parser with custom configuration
    pub fn with_config(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Parse a CSV file and return a DataSource
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DataSource> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("csv_source")
            .to_string();

        let source_type = DataSourceType::Csv {
            path: path.display().to_string(),
            delimiter: self.config.delimiter,
            has_header: self.config.has_header,
        };

        self.parse_reader(file, id, source_type)
    }

    /// Parse CSV from a string and return a DataSource
    pub fn parse_string(&self, data: &str, id: impl Into<String>) -> Result<DataSource> {
        self.parse_reader(data.as_bytes(), id.into(), DataSourceType::Inline)
    }

    fn parse_reader<R: Read>(&self, reader: R, id: String, source_type: DataSourceType) -> Result<DataSource> {
        if !self.config.delimiter.is_ascii() {
            return Err(DataError::InvalidDataSource(format!(
                "Delimiter must be a single ASCII character, got {:?}",
                self.config.delimiter
            )));
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .has_headers(self.config.has_header)
            .trim(if self.config.trim_whitespace {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = if self.config.has_header {
            csv_reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(DataError::DuplicateColumn(header.clone()));
            }
        }

        let mut rows: Vec<Vec<Value>> = Vec::new();
        for result in csv_reader.records() {
            rows.push(result?.iter().map(parse_value).collect());
        }

        if rows.is_empty() && headers.is_empty() {
            return Err(DataError::EmptyDataSource("CSV file is empty".to_string()));
        }

        let headers = if headers.is_empty() {
            let count = rows.first().map_or(0, Vec::len);
            (0..count).map(|i| format!("Column{}", i + 1)).collect()
        } else {
            headers
        };

        let mut data_source = DataSource::new(id, source_type);
        for (col_idx, header) in headers.iter().enumerate() {
            let data_type = DataType::infer(rows.iter().filter_map(|row| row.get(col_idx)));
            data_source.add_column(ColumnDef::new(header.clone(), data_type));
        }

        for (row_idx, row) in rows.into_iter().enumerate() {
            let mut record = DataRecord::new(
                format!("Row {}", row_idx + 1),
                format!("{}#{}", data_source.id, row_idx + 1),
            );
            for (header, value) in headers.iter().zip(row) {
                record.properties.insert(header.clone(), value);
            }
            apply_identity(&mut record, &self.config.name_column, &self.config.path_column);
            data_source.add_record(record);
        }

        tracing::debug!(
            source = %data_source.id,
            records = data_source.record_count(),
            columns = data_source.columns.len(),
            "parsed CSV source"
        );

        Ok(data_source)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Take the record name and key from their columns when present and non-empty
pub(crate) fn apply_identity(record: &mut DataRecord, name_key: &str, path_key: &str) {
    if let Some(name) = record.properties.get(name_key).filter(|v| !v.is_empty()) {
        record.name = name.to_text();
    }
    if let Some(path) = record.properties.get(path_key).filter(|v| !v.is_empty()) {
        record.path = path.to_text();
    }
}

/// Detect the delimiter used in a CSV file
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let delimiters = [',', ';', '\t', '|'];
    let mut best_delimiter = ',';
    let mut best_count = 0;

    for &delim in &delimiters {
        let count = first_line.matches(delim).count();
        if count > best_count {
            best_count = count;
            best_delimiter = delim;
        }
    }

    best_delimiter
}
