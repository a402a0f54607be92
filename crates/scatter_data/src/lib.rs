//! Scatter Data Sources
//!
//! This crate loads record sets for the scatter plot pipeline from files.
//!
//! # Features
//!
//! - CSV parsing with configurable delimiters (comma, semicolon, tab, pipe)
//! - JSON parsing with nested object support and configurable root paths
//! - Automatic value typing for text cells
//! - Records that answer `file.*`, `property.*` and `note.*` field lookups
//!
//! # Example
//!
//! ```rust
//! use scatter::{PlotConfig, process_records};
//! use scatter_data::CsvParser;
//!
//! let csv_data = "name,effort,value\nWrite docs,2,8\nRefactor,bad,5";
//! let source = CsvParser::new().parse_string(csv_data, "tasks").unwrap();
//!
//! let config = PlotConfig::new("property.effort", "property.value");
//! let result = process_records(&source.records, &config);
//!
//! assert_eq!(result.points.len(), 1);
//! assert_eq!(result.skipped.len(), 1);
//! ```

mod csv_parser;
mod data_source;
mod error;
mod json_parser;

pub use csv_parser::{detect_delimiter, CsvConfig, CsvParser};
pub use data_source::{parse_value, ColumnDef, DataRecord, DataSource, DataSourceType, DataType};
pub use error::{DataError, Result};
pub use json_parser::{JsonConfig, JsonParser};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a data source from a file, choosing the parser by extension
pub fn load_from_file(path: impl AsRef<Path>) -> Result<DataSource> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => {
            if !path.exists() {
                return Err(DataError::FileNotFound(path.display().to_string()));
            }
            // Only the header line decides the delimiter
            let mut header = String::new();
            BufReader::new(File::open(path)?).read_line(&mut header)?;
            let config = CsvConfig::default().with_delimiter(detect_delimiter(&header));
            CsvParser::with_config(config).parse_file(path)
        }
        Some("tsv") => CsvParser::with_config(CsvConfig::tab()).parse_file(path),
        Some("json") => JsonParser::new().parse_file(path),
        _ => Err(DataError::UnsupportedFormat(format!(
            "Unknown file extension for: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_csv_detects_delimiter() {
        let file = temp_file(".csv", "name;x;y\nA;1;2\nB;3;4\n");
        let source = load_from_file(file.path()).unwrap();

        assert_eq!(source.record_count(), 2);
        assert_eq!(source.numeric_columns(), vec!["x", "y"]);
    }

    #[test]
    fn test_load_csv_delimiter_from_header_only() {
        let file = temp_file(".csv", "name;x;note\nA;1;a, b, c, d\nB;2;e, f, g\n");
        let source = load_from_file(file.path()).unwrap();

        assert_eq!(source.column_names(), vec!["name", "x", "note"]);
        assert_eq!(source.record_count(), 2);
        assert!(matches!(source.source_type, DataSourceType::Csv { delimiter: ';', .. }));
    }

    #[test]
    fn test_load_tsv() {
        let file = temp_file(".tsv", "name\tx\nA\t1\n");
        let source = load_from_file(file.path()).unwrap();
        assert!(source.has_column("x"));
    }

    #[test]
    fn test_load_json() {
        let file = temp_file(".JSON", r#"[{"name": "A", "x": 1}]"#);
        let source = load_from_file(file.path()).unwrap();
        assert_eq!(source.records[0].name, "A");
    }

    #[test]
    fn test_unsupported_and_missing() {
        let file = temp_file(".xlsx", "");
        assert!(matches!(
            load_from_file(file.path()),
            Err(DataError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            load_from_file("/nonexistent/data.csv"),
            Err(DataError::FileNotFound(_))
        ));
    }
}
