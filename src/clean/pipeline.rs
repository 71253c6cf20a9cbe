//! Pipeline orchestration: the five stages in their fixed order.
//!
//! # Example
//!
//! ```rust,ignore
//! use campwash::{CampaignCleaner, CleaningConfig, CleaningLog};
//!
//! let cleaner = CampaignCleaner::with_defaults();
//! let mut log = CleaningLog::with_stderr();
//! let cleaned = cleaner.clean(records, &mut log)?;
//! println!("removed {} rows", cleaned.summary.rows_removed);
//! ```

use serde_json::Value;
use std::path::Path;

use crate::clean::{dedup, derive, impute, normalize, ranges};
use crate::error::{CleanError, CleanResult, PipelineResult};
use crate::models::{CleaningConfig, CleaningSummary, DERIVED_COLUMNS};
use crate::parser::write_csv_file;
use crate::report::CleaningLog;

/// Cleaned records plus the run summary.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    /// Records with imputed values, duplicates removed, and derived columns.
    pub records: Vec<Value>,
    /// What the run did.
    pub summary: CleaningSummary,
}

/// Deterministic, single-pass cleaner for campaign datasets.
///
/// Holds the column contract explicitly; callers inject a
/// [`CleaningLog`] per run, so the cleaner itself carries no logging state.
#[derive(Debug, Clone, Default)]
pub struct CampaignCleaner {
    config: CleaningConfig,
}

impl CampaignCleaner {
    /// Cleaner with an explicit column contract.
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Cleaner for the standard marketing campaign schema.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The column contract in use.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Run the five cleaning stages over `records`.
    ///
    /// Data-quality anomalies are corrected and recorded on `log`; only a
    /// structurally broken table (missing contract column, non-object record)
    /// is an error.
    pub fn clean(&self, mut records: Vec<Value>, log: &mut CleaningLog) -> CleanResult<CleanedDataset> {
        self.check_contract(&records)?;

        let initial_rows = records.len();
        log.info(format!("Cleaning {} records", initial_rows));

        let imputed = impute::impute_missing(&mut records, &self.config, log);
        let removed = dedup::remove_duplicates(&mut records, &self.config, log);
        derive::derive_features(&mut records, &self.config, log);
        normalize::normalize_categories(&mut records, &self.config, log);
        let corrected = ranges::validate_ranges(&mut records, &self.config, log);

        log.success(format!(
            "Cleaned: {} imputed, {} duplicates removed, {} range corrections",
            imputed, removed, corrected
        ));

        let summary = CleaningSummary::new(initial_rows, records.len());
        Ok(CleanedDataset { records, summary })
    }

    /// Fail fast if a contract column is absent or a record is not an object.
    fn check_contract(&self, records: &[Value]) -> CleanResult<()> {
        for (i, record) in records.iter().enumerate() {
            if !record.is_object() {
                return Err(CleanError::MalformedRecord(i));
            }
        }

        if let Some(first) = records.first().and_then(|r| r.as_object()) {
            for col in self.config.contract_columns() {
                if !first.contains_key(col) {
                    return Err(CleanError::MissingColumn(col.to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Clean a CSV file end to end: load, clean, write.
///
/// The output keeps the input column order and appends the derived columns;
/// parent directories of `output` are created if absent.
pub fn clean_csv(
    input: &Path,
    output: &Path,
    config: &CleaningConfig,
    log: &mut CleaningLog,
) -> PipelineResult<CleaningSummary> {
    let parsed = crate::loader::load_dataset(input, log)?;
    let headers = parsed.headers;

    let cleaner = CampaignCleaner::new(config.clone());
    let cleaned = cleaner.clean(parsed.records, log)?;

    let mut columns = headers;
    for derived in DERIVED_COLUMNS {
        if !columns.iter().any(|c| c == derived) {
            columns.push(derived.to_string());
        }
    }
    write_csv_file(output, &columns, &cleaned.records)?;
    log.success(format!("Saved cleaned dataset to {}", output.display()));

    Ok(cleaned.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::as_number;
    use crate::parser::{parse_csv_file_auto, parse_csv_str};
    use tempfile::tempdir;

    const HEADER: &str = "Campaign_ID,Company,Campaign_Type,Target_Audience,Duration,Channel_Used,Conversion_Rate,Acquisition_Cost,ROI,Location,Language,Clicks,Impressions,Engagement_Score,Customer_Segment,Date";

    fn messy_csv() -> String {
        let mut csv = String::from(HEADER);
        csv.push('\n');
        // Duplicate ID, messy casing, currency cost, out-of-range metrics
        csv.push_str("C001,Innovate Industries,email,Men 18-24,10 days,google ads,0.12,\"$1,200.50\",3.5,chicago,English,500,5000,8.5,Foodies,2021-03-15\n");
        csv.push_str("C001,Innovate Industries,email,Men 18-24,10 days,google ads,0.12,\"$1,200.50\",3.5,chicago,English,500,5000,8.5,Foodies,2021-03-15\n");
        csv.push_str("C002,NexGen Systems,DISPLAY,Women 25-34,30 days,youtube,1.7,\"$900.00\",2.0,new york,English,,4000,3.0,Fashionistas,2021-06-01\n");
        csv.push_str("C003,Alpha Innovations,Social Media,All Ages,5 days,facebook,0.08,\"$2,000.00\",-1.0,Miami,,-100,3000,6.0,Tech Enthusiasts,2021-09-20\n");
        csv
    }

    fn clean_records(csv: &str) -> (CleanedDataset, CleaningLog) {
        let parsed = parse_csv_str(csv, ',').unwrap();
        let cleaner = CampaignCleaner::with_defaults();
        let mut log = CleaningLog::new();
        let cleaned = cleaner.clean(parsed.records, &mut log).unwrap();
        (cleaned, log)
    }

    #[test]
    fn test_end_to_end_cleaning() {
        let (cleaned, _log) = clean_records(&messy_csv());

        assert_eq!(cleaned.summary.initial_rows, 4);
        assert_eq!(cleaned.summary.final_rows, 3);
        assert_eq!(cleaned.summary.rows_removed, 1);
        assert_eq!(cleaned.summary.derived_features_added.len(), 7);

        let first = &cleaned.records[0];
        assert_eq!(first["Campaign_Type"], "Email");
        assert_eq!(first["Channel_Used"], "Google Ads");
        assert_eq!(first["Location"], "Chicago");
        assert_eq!(first["Acquisition_Cost"], serde_json::json!(1200.5));
        assert_eq!(first["Campaign_Duration"], serde_json::json!(10));
        assert_eq!(first["Duration_Category"], "Medium");
        assert_eq!(first["Engagement_Category"], "High");
        assert_eq!(first["Month"], serde_json::json!(3));
        assert_eq!(first["Quarter"], serde_json::json!(1));
        assert_eq!(first["Year"], serde_json::json!(2021));
    }

    #[test]
    fn test_post_conditions_hold() {
        let (cleaned, _log) = clean_records(&messy_csv());
        let config = CleaningConfig::default();

        let mut seen_ids = std::collections::HashSet::new();
        for record in &cleaned.records {
            let obj = record.as_object().unwrap();

            // Unique IDs
            assert!(seen_ids.insert(obj["Campaign_ID"].to_string()));

            // No missing values in contract columns
            for col in config.contract_columns() {
                assert!(!crate::clean::is_missing(obj.get(col)), "missing {}", col);
            }

            // Non-negative metrics
            for col in &config.non_negative_columns {
                assert!(as_number(&obj[col.as_str()]).unwrap() >= 0.0);
            }

            // Conversion rate in [0, 1]
            let rate = as_number(&obj["Conversion_Rate"]).unwrap();
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn test_sentinel_for_missing_categorical() {
        let (cleaned, _log) = clean_records(&messy_csv());
        // C003 ships without a Language value
        let c003 = cleaned
            .records
            .iter()
            .find(|r| r["Campaign_ID"] == "C003")
            .unwrap();
        assert_eq!(c003["Language"], "Unknown");
    }

    #[test]
    fn test_idempotent_on_clean_data() {
        let (first_pass, _) = clean_records(&messy_csv());

        let cleaner = CampaignCleaner::with_defaults();
        let mut log = CleaningLog::new();
        let second_pass = cleaner.clean(first_pass.records.clone(), &mut log).unwrap();

        assert_eq!(second_pass.summary.rows_removed, 0);
        assert_eq!(second_pass.records, first_pass.records);
        assert_eq!(log.warning_count(), 0);
        assert!(!log.entries().iter().any(|e| e.message.contains("Filled")));
    }

    #[test]
    fn test_missing_contract_column_fails_fast() {
        let parsed = parse_csv_str("Campaign_ID,Clicks\nC001,100", ',').unwrap();
        let cleaner = CampaignCleaner::with_defaults();
        let mut log = CleaningLog::new();
        let err = cleaner.clean(parsed.records, &mut log).unwrap_err();

        assert!(matches!(err, CleanError::MissingColumn(_)));
    }

    #[test]
    fn test_empty_input_yields_empty_summary() {
        let cleaner = CampaignCleaner::with_defaults();
        let mut log = CleaningLog::new();
        let cleaned = cleaner.clean(Vec::new(), &mut log).unwrap();

        assert_eq!(cleaned.summary.initial_rows, 0);
        assert_eq!(cleaned.summary.rows_removed, 0);
        assert!(cleaned.records.is_empty());
    }

    #[test]
    fn test_clean_csv_file_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("processed/cleaned.csv");
        std::fs::write(&input, messy_csv()).unwrap();

        let mut log = CleaningLog::new();
        let summary = clean_csv(&input, &output, &CleaningConfig::default(), &mut log).unwrap();

        assert_eq!(summary.rows_removed, 1);

        let written = parse_csv_file_auto(&output).unwrap();
        assert_eq!(written.records.len(), 3);
        assert!(written.headers.contains(&"Engagement_Category".to_string()));
        // Input column order is preserved ahead of derived columns
        assert_eq!(written.headers[0], "Campaign_ID");
        assert_eq!(written.records[0]["Duration_Category"], "Medium");
        assert_eq!(written.records[0]["Acquisition_Cost"], "1200.5");
    }
}
