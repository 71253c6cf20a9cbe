//! Error types for the Campwash cleaning pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - CSV reading/writing errors
//! - [`LoadError`] - dataset contract errors
//! - [`CleanError`] - cleaning stage errors
//! - [`ValidationError`] - schema validation errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or writing CSV files.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or write a file.
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid CSV structure.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Loader Errors
// =============================================================================

/// Errors raised when a dataset does not satisfy the column contract.
#[derive(Debug, Error)]
pub enum LoadError {
    /// One or more required columns are absent.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A column holds values that cannot be coerced to the expected type.
    #[error("Invalid data in column '{column}': {message}")]
    InvalidColumn { column: String, message: String },

    /// Dataset holds no records at all.
    #[error("Dataset contains no records")]
    EmptyDataset,

    /// Underlying CSV problem.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),
}

// =============================================================================
// Cleaning Errors
// =============================================================================

/// Errors raised by the cleaning stages.
///
/// Data-quality anomalies (missing values, duplicates, out-of-range numbers)
/// are never errors; they are corrected in place and recorded on the
/// observer. Only a structurally broken table is fatal.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A column the cleaning contract expects is absent from the table.
    #[error("Contract column missing from table: {0}")]
    MissingColumn(String),

    /// A record is not a JSON object.
    #[error("Record {0} is not an object")]
    MalformedRecord(usize),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors during cleaned-record schema validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more records failed schema validation.
    #[error("{count} records failed schema validation: {}", .errors.join("; "))]
    SchemaError { count: usize, errors: Vec<String> },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::clean::clean_csv`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading/writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Contract error from the loader.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Cleaning stage error.
    #[error("Clean error: {0}")]
    Clean(#[from] CleanError),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // CleanError -> PipelineError
        let clean_err = CleanError::MissingColumn("Clicks".into());
        let pipeline_err: PipelineError = clean_err.into();
        assert!(pipeline_err.to_string().contains("Clicks"));

        // CsvError -> LoadError -> PipelineError
        let load_err: LoadError = CsvError::NoHeaders.into();
        let pipeline_err: PipelineError = load_err.into();
        assert!(pipeline_err.to_string().contains("headers"));
    }

    #[test]
    fn test_missing_columns_format() {
        let err = LoadError::MissingColumns(vec!["Clicks".into(), "ROI".into()]);
        let msg = err.to_string();
        assert!(msg.contains("Clicks, ROI"));
    }

    #[test]
    fn test_validation_error_format() {
        let err = ValidationError::SchemaError {
            count: 2,
            errors: vec!["\"Conversion_Rate\": 1.5 is greater than the maximum of 1".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 records"));
        assert!(msg.contains("Conversion_Rate"));

        let pipeline_err: PipelineError = err.into();
        assert!(pipeline_err.to_string().contains("Validation error"));
    }
}
