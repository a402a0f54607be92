//! Error types for the scatter crate

use thiserror::Error;

/// Errors a host record can raise while looking up a field.
///
/// These never escape the pipeline: the extractor converts them into a
/// skip reason for the record that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The field namespace is known but the field is not
    #[error("unknown field \"{0}\"")]
    UnknownField(String),

    /// The field exists but cannot be evaluated by this host
    #[error("field \"{0}\" cannot be evaluated here")]
    Unsupported(String),

    /// Host-specific lookup failure
    #[error("{0}")]
    Lookup(String),
}

/// Result type for field lookups
pub type FieldResult<T> = Result<T, FieldError>;
