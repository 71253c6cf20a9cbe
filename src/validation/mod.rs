//! JSON Schema validation for cleaned campaign records.
//!
//! The schema is embedded at compile time from
//! `schemas/cleaned-campaign.json` (JSON Schema Draft 7) and describes the
//! post-cleaning shape of one record: all 16 contract columns, the 7 derived
//! columns, metrics within their domain ranges, category labels from their
//! fixed vocabularies.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use campwash::{is_valid_cleaned_record, validate_cleaned_record};
//!
//! let record = json!({ /* cleaned row */ });
//! if let Err(errors) = validate_cleaned_record(&record) {
//!     eprintln!("{} problems", errors.len());
//! }
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static CLEANED_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/cleaned-campaign.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON object against a schema.
///
/// Returns `Ok(())` when valid, otherwise every validation error message.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean-only variant of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate one cleaned record against the embedded schema.
pub fn validate_cleaned_record(data: &Value) -> Result<(), Vec<String>> {
    validate(&CLEANED_SCHEMA, data)
}

/// Quick check against the cleaned-record schema.
pub fn is_valid_cleaned_record(data: &Value) -> bool {
    is_valid(&CLEANED_SCHEMA, data)
}
