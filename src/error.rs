//! Error types for cable label generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for label generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// No usable cable rows (-11)
    NoRecords = -11,
    /// Record failed validation (E100)
    InvalidRecord = 100,
    /// Layout parameters are geometrically inconsistent (E101)
    InvalidParameters = 101,
}

/// Main error type for label generation.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("No cable records found")]
    NoRecords,

    #[error("Invalid record{}: field '{field}' {message}", record_suffix(.record))]
    InvalidRecord {
        record: Option<usize>,
        field: &'static str,
        message: String,
    },

    #[error("Invalid layout parameters{}: {message}", record_suffix(.record))]
    InvalidParameters {
        record: Option<usize>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn record_suffix(record: &Option<usize>) -> String {
    match record {
        Some(index) => format!(" #{}", index),
        None => String::new(),
    }
}

impl LabelError {
    /// Create an `InvalidParameters` error not tied to a record.
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        LabelError::InvalidParameters {
            record: None,
            message: message.into(),
        }
    }

    /// Attach the 0-based index of the offending record.
    ///
    /// Only validation errors carry a record index; other variants are
    /// returned unchanged.
    pub fn at_record(self, index: usize) -> Self {
        match self {
            LabelError::InvalidRecord { field, message, .. } => LabelError::InvalidRecord {
                record: Some(index),
                field,
                message,
            },
            LabelError::InvalidParameters { message, .. } => LabelError::InvalidParameters {
                record: Some(index),
                message,
            },
            other => other,
        }
    }

    /// Index of the record that caused this error, if known.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            LabelError::InvalidRecord { record, .. }
            | LabelError::InvalidParameters { record, .. } => *record,
            _ => None,
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            LabelError::FileNotFound { .. } => ErrorCode::FileNotFound,
            LabelError::EmptyFile { .. } => ErrorCode::EmptyFile,
            LabelError::ParseError { .. } => ErrorCode::ParseError,
            LabelError::NoRecords => ErrorCode::NoRecords,
            LabelError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            LabelError::InvalidParameters { .. } => ErrorCode::InvalidParameters,
            LabelError::Io(_) => ErrorCode::FileNotFound,
            LabelError::Json(_) => ErrorCode::ParseError,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for label operations.
pub type Result<T> = std::result::Result<T, LabelError>;
