//! # Campwash - Marketing campaign CSV cleaning and analysis
//!
//! Campwash takes raw marketing campaign exports (messy encodings, currency
//! strings, duplicate rows, missing cells) and produces a cleaned CSV with
//! derived features, plus summary and dashboard aggregations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Loader    │────▶│   Cleaner   │────▶│ Cleaned CSV │
//! │  (ISO/UTF8) │     │  (contract) │     │  (5 stages) │     │ + dashboard │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campwash::{clean_csv, CleaningConfig, CleaningLog};
//!
//! fn main() {
//!     let mut log = CleaningLog::with_stderr();
//!     let summary = clean_csv(
//!         "raw.csv".as_ref(),
//!         "cleaned.csv".as_ref(),
//!         &CleaningConfig::default(),
//!         &mut log,
//!     )
//!     .unwrap();
//!     println!("{} rows cleaned", summary.final_rows);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (CleaningConfig, category bins, summaries)
//! - [`report`] - Injected cleaning log
//! - [`parser`] - CSV parsing and writing with auto-detection
//! - [`loader`] - Column contract and dataset overview
//! - [`clean`] - The five-stage cleaning pipeline
//! - [`validation`] - Cleaned-record schema validation
//! - [`aggregate`] - Dashboard aggregation
//! - [`sample`] - Seeded sample data generator

// Core modules
pub mod error;
pub mod models;
pub mod report;

// Parsing
pub mod parser;

// Loading
pub mod loader;

// Cleaning
pub mod clean;

// Validation
pub mod validation;

// Aggregation
pub mod aggregate;

// Sample data
pub mod sample;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CleanError,
    CsvError,
    CsvResult,
    LoadError,
    PipelineError,
    PipelineResult,
    ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    CleaningConfig,
    CleaningSummary,
    DurationCategory,
    EngagementCategory,
    DERIVED_COLUMNS,
    UNKNOWN_CATEGORY,
};

// =============================================================================
// Re-exports - Log
// =============================================================================

pub use report::{CleaningLog, LogEntry, LogLevel};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_csv_file_auto,
    parse_csv_str,
    write_csv_file,
    ParseResult,
};

// =============================================================================
// Re-exports - Loader
// =============================================================================

pub use loader::{check_contract, load_dataset, DatasetSummary, REQUIRED_COLUMNS};

// =============================================================================
// Re-exports - Cleaning pipeline
// =============================================================================

pub use clean::{clean_csv, CampaignCleaner, CleanedDataset};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    is_valid,
    is_valid_cleaned_record,
    validate,
    validate_cleaned_record,
};

// =============================================================================
// Re-exports - Aggregation
// =============================================================================

pub use aggregate::{build_dashboard_data, DashboardData, DashboardSummary};

// =============================================================================
// Re-exports - Sample data
// =============================================================================

pub use sample::{generate_csv_file, generate_records};
