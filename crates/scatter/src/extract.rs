//! Field value extraction
//!
//! Reads one configured field from a record and classifies the result.
//! Extraction never fails outright: every problem becomes a
//! [`NumericExtraction::Failure`] carrying a human-readable reason.

use crate::record::{FieldId, Record};

/// Result of reading a numeric field
#[derive(Debug, Clone, PartialEq)]
pub enum NumericExtraction {
    /// A finite number
    Success(f64),
    /// Why the field could not be used
    Failure(String),
}

impl NumericExtraction {
    /// Convert into a `Result`, the failure reason as the error
    pub fn into_result(self) -> Result<f64, String> {
        match self {
            NumericExtraction::Success(value) => Ok(value),
            NumericExtraction::Failure(reason) => Err(reason),
        }
    }
}

/// Result of reading a categorical field
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryExtraction {
    Success(String),
    Failure,
}

impl CategoryExtraction {
    pub fn into_option(self) -> Option<String> {
        match self {
            CategoryExtraction::Success(value) => Some(value),
            CategoryExtraction::Failure => None,
        }
    }
}

/// Read a field and parse it as a finite number
pub fn extract_number(record: &impl Record, field: &FieldId) -> NumericExtraction {
    let value = match record.field(field) {
        Ok(Some(value)) if !value.is_empty() => value,
        Ok(_) => {
            return NumericExtraction::Failure(format!("Property \"{}\" is empty", field));
        }
        Err(err) => {
            return NumericExtraction::Failure(format!(
                "Failed to read property \"{}\": {}",
                field, err
            ));
        }
    };

    let raw = value.to_text();
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_nan() => not_numeric(field, &raw),
        Ok(n) if n.is_infinite() => {
            NumericExtraction::Failure(format!("Property \"{}\" value is not finite", field))
        }
        Ok(n) => NumericExtraction::Success(n),
        Err(_) => not_numeric(field, &raw),
    }
}

fn not_numeric(field: &FieldId, raw: &str) -> NumericExtraction {
    NumericExtraction::Failure(format!(
        "Property \"{}\" value \"{}\" is not numeric",
        field, raw
    ))
}

/// Read a field as a category label. Missing, empty, and unreadable values all fail.
pub fn extract_category(record: &impl Record, field: Option<&FieldId>) -> CategoryExtraction {
    let Some(field) = field else {
        return CategoryExtraction::Failure;
    };

    match record.field(field) {
        Ok(Some(value)) if !value.is_empty() => CategoryExtraction::Success(value.to_text()),
        _ => CategoryExtraction::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::record::{MemoryRecord, Value};

    fn field(id: &str) -> FieldId {
        FieldId::new(id)
    }

    #[test]
    fn test_extract_number_from_number() {
        let record = MemoryRecord::new("a").with("effort", 2.5);
        let result = extract_number(&record, &field("property.effort"));
        assert_eq!(result, NumericExtraction::Success(2.5));
    }

    #[test]
    fn test_extract_number_from_text() {
        let record = MemoryRecord::new("a").with("effort", " 42 ");
        let result = extract_number(&record, &field("property.effort"));
        assert_eq!(result, NumericExtraction::Success(42.0));
    }

    #[test]
    fn test_extract_number_missing_field() {
        let record = MemoryRecord::new("a");
        let result = extract_number(&record, &field("property.effort"));
        assert_eq!(
            result,
            NumericExtraction::Failure("Property \"property.effort\" is empty".to_string())
        );
    }

    #[test]
    fn test_extract_number_null_and_blank() {
        let record = MemoryRecord::new("a")
            .with("n", Value::Null)
            .with("s", "")
            .with("l", Value::List(vec![]));

        for id in ["n", "s", "l"] {
            let result = extract_number(&record, &field(id));
            assert_eq!(
                result,
                NumericExtraction::Failure(format!("Property \"{}\" is empty", id))
            );
        }
    }

    #[test]
    fn test_extract_number_not_numeric() {
        let record = MemoryRecord::new("a").with("effort", "bad");
        let result = extract_number(&record, &field("property.effort"));
        assert_eq!(
            result,
            NumericExtraction::Failure(
                "Property \"property.effort\" value \"bad\" is not numeric".to_string()
            )
        );
    }

    #[test]
    fn test_extract_number_nan_is_not_numeric() {
        let record = MemoryRecord::new("a").with("v", "NaN").with("w", f64::NAN);
        for id in ["v", "w"] {
            let reason = extract_number(&record, &field(id)).into_result().unwrap_err();
            assert!(reason.ends_with("is not numeric"), "{}", reason);
        }
    }

    #[test]
    fn test_extract_number_not_finite() {
        let record = MemoryRecord::new("a")
            .with("v", "inf")
            .with("w", f64::NEG_INFINITY);
        for id in ["v", "w"] {
            let result = extract_number(&record, &field(id));
            assert_eq!(
                result,
                NumericExtraction::Failure(format!("Property \"{}\" value is not finite", id))
            );
        }
    }

    #[test]
    fn test_extract_number_boolean_is_not_numeric() {
        let record = MemoryRecord::new("a").with("done", true);
        let reason = extract_number(&record, &field("done")).into_result().unwrap_err();
        assert_eq!(reason, "Property \"done\" value \"true\" is not numeric");
    }

    #[test]
    fn test_extract_number_lookup_failure() {
        let record = MemoryRecord::new("a")
            .with_failure("score", FieldError::Lookup("index corrupted".to_string()));
        let result = extract_number(&record, &field("formula.score"));
        assert_eq!(
            result,
            NumericExtraction::Failure(
                "Failed to read property \"formula.score\": index corrupted".to_string()
            )
        );
    }

    #[test]
    fn test_extract_category() {
        let record = MemoryRecord::new("a")
            .with("status", "todo")
            .with("priority", 3)
            .with("blank", "")
            .with_failure("broken", FieldError::Lookup("x".to_string()));

        assert_eq!(
            extract_category(&record, Some(&field("note.status"))),
            CategoryExtraction::Success("todo".to_string())
        );
        assert_eq!(
            extract_category(&record, Some(&field("priority"))),
            CategoryExtraction::Success("3".to_string())
        );
        assert_eq!(extract_category(&record, Some(&field("blank"))), CategoryExtraction::Failure);
        assert_eq!(extract_category(&record, Some(&field("broken"))), CategoryExtraction::Failure);
        assert_eq!(extract_category(&record, Some(&field("missing"))), CategoryExtraction::Failure);
        assert_eq!(extract_category(&record, None), CategoryExtraction::Failure);
    }
}
