//! Stage 1: missing-value imputation.
//!
//! Numeric contract columns get the column median (computed over present
//! values, falling back to 0 when the whole column is missing); categorical
//! columns get the sentinel category. Numeric cells are coerced to JSON
//! numbers here so later stages can rely on typed values.

use serde_json::Value;

use crate::clean::{as_number, is_missing, json_number, median};
use crate::models::{CleaningConfig, UNKNOWN_CATEGORY};
use crate::report::CleaningLog;

/// Fill missing values in place. Returns the number of cells imputed.
pub fn impute_missing(
    records: &mut [Value],
    config: &CleaningConfig,
    log: &mut CleaningLog,
) -> usize {
    let mut imputed = 0;

    for col in &config.numeric_columns {
        let present: Vec<f64> = records
            .iter()
            .filter_map(|r| r.get(col.as_str()))
            .filter_map(as_number)
            .collect();
        let fill = median(&present).unwrap_or(0.0);

        let mut filled = 0;
        for record in records.iter_mut() {
            let Some(obj) = record.as_object_mut() else { continue };
            let cell = obj.get(col.as_str());
            if is_missing(cell) {
                obj.insert(col.clone(), json_number(fill));
                filled += 1;
            } else if let Some(n) = cell.and_then(as_number) {
                // Coerce "42" -> 42 so later stages see typed numbers.
                obj.insert(col.clone(), json_number(n));
            } else {
                // Non-numeric junk in a numeric column counts as missing.
                obj.insert(col.clone(), json_number(fill));
                filled += 1;
            }
        }

        if filled > 0 {
            log.info(format!(
                "Filled {} missing values in {} with median {}",
                filled, col, fill
            ));
            imputed += filled;
        }
    }

    for col in &config.categorical_columns {
        let mut filled = 0;
        for record in records.iter_mut() {
            let Some(obj) = record.as_object_mut() else { continue };
            if is_missing(obj.get(col.as_str())) {
                obj.insert(col.clone(), Value::String(UNKNOWN_CATEGORY.to_string()));
                filled += 1;
            }
        }
        if filled > 0 {
            log.info(format!(
                "Filled {} missing values in {} with '{}'",
                filled, col, UNKNOWN_CATEGORY
            ));
            imputed += filled;
        }
    }

    imputed
}
