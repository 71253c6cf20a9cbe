//! Dataset loading: contract validation and summary statistics.
//!
//! The loader sits between the CSV parser and the cleaner. It enforces the
//! 16-column contract (a missing column is fatal), reports null counts it
//! finds, and rejects values that cannot be coerced to their expected types.
//! Data-quality problems inside a schema-valid table are the cleaner's job,
//! not the loader's.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::clean::{as_number, is_missing, parse_currency};
use crate::error::{LoadError, LoadResult};
use crate::parser::{parse_csv_file_auto, ParseResult};
use crate::report::CleaningLog;

/// The fixed 16-column schema of a raw campaign dataset.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "Campaign_ID",
    "Company",
    "Campaign_Type",
    "Target_Audience",
    "Duration",
    "Channel_Used",
    "Conversion_Rate",
    "Acquisition_Cost",
    "ROI",
    "Location",
    "Language",
    "Clicks",
    "Impressions",
    "Engagement_Score",
    "Customer_Segment",
    "Date",
];

/// Numeric columns the loader type-checks.
const NUMERIC_COLUMNS: [&str; 5] = [
    "Clicks",
    "Impressions",
    "Engagement_Score",
    "Conversion_Rate",
    "ROI",
];

/// Check that every required column is present.
pub fn check_contract(headers: &[String]) -> LoadResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Load and validate a campaign dataset from a CSV file.
///
/// Fails on a missing required column, an empty dataset, or non-missing
/// values that cannot be coerced (numeric metrics, currency costs). Null
/// counts are reported on `log` but are not fatal.
pub fn load_dataset(path: &Path, log: &mut CleaningLog) -> LoadResult<ParseResult> {
    log.info(format!("Loading data from {}", path.display()));
    let parsed = parse_csv_file_auto(path)?;

    check_contract(&parsed.headers)?;
    if parsed.records.is_empty() {
        return Err(LoadError::EmptyDataset);
    }

    report_null_counts(&parsed.records, log);
    check_coercion(&parsed.records)?;

    log.success(format!("Loaded {} records, validation passed", parsed.records.len()));
    Ok(parsed)
}

/// Report per-column null counts, pandas-style, without failing.
fn report_null_counts(records: &[Value], log: &mut CleaningLog) {
    let mut null_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        for col in REQUIRED_COLUMNS {
            if is_missing(record.get(col)) {
                *null_counts.entry(col).or_default() += 1;
            }
        }
    }
    for (col, count) in &null_counts {
        log.warning(format!("Found {} null values in {}", count, col));
    }
}

/// Reject non-missing values the pipeline could not coerce.
fn check_coercion(records: &[Value]) -> LoadResult<()> {
    for col in NUMERIC_COLUMNS {
        let bad = records
            .iter()
            .filter(|r| {
                let cell = r.get(col);
                !is_missing(cell) && cell.map(|v| as_number(v).is_none()).unwrap_or(false)
            })
            .count();
        if bad > 0 {
            return Err(LoadError::InvalidColumn {
                column: col.to_string(),
                message: format!("{} values are not numeric", bad),
            });
        }
    }

    let bad_costs = records
        .iter()
        .filter(|r| {
            let cell = r.get("Acquisition_Cost");
            !is_missing(cell) && cell.map(|v| parse_currency(v).is_none()).unwrap_or(false)
        })
        .count();
    if bad_costs > 0 {
        return Err(LoadError::InvalidColumn {
            column: "Acquisition_Cost".to_string(),
            message: format!("{} values are not currency amounts", bad_costs),
        });
    }

    Ok(())
}

// =============================================================================
// Dataset Summary Statistics
// =============================================================================

/// Descriptive statistics for a loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_campaigns: usize,
    pub campaign_types: BTreeMap<String, usize>,
    pub channels: BTreeMap<String, usize>,
    pub companies: BTreeMap<String, usize>,
    pub customer_segments: BTreeMap<String, usize>,
    /// Lexicographic min/max of the date column (ISO dates sort correctly).
    pub date_range: Option<DateRange>,
    pub avg_acquisition_cost: f64,
    pub avg_conversion_rate: f64,
    pub avg_roi: f64,
    pub total_clicks: f64,
    pub total_impressions: f64,
}

/// First and last campaign dates in the dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DatasetSummary {
    /// Compute summary statistics over raw or cleaned records.
    pub fn compute(records: &[Value]) -> Self {
        let mut campaign_types = BTreeMap::new();
        let mut channels = BTreeMap::new();
        let mut companies = BTreeMap::new();
        let mut customer_segments = BTreeMap::new();
        let mut dates: Vec<&str> = Vec::new();

        let mut cost_sum = 0.0;
        let mut cost_count = 0usize;
        let mut rate_sum = 0.0;
        let mut rate_count = 0usize;
        let mut roi_sum = 0.0;
        let mut roi_count = 0usize;
        let mut total_clicks = 0.0;
        let mut total_impressions = 0.0;

        for record in records {
            count_value(record.get("Campaign_Type"), &mut campaign_types);
            count_value(record.get("Channel_Used"), &mut channels);
            count_value(record.get("Company"), &mut companies);
            count_value(record.get("Customer_Segment"), &mut customer_segments);

            if let Some(date) = record.get("Date").and_then(|v| v.as_str()) {
                if !date.trim().is_empty() {
                    dates.push(date);
                }
            }

            if let Some(v) = record.get("Acquisition_Cost").and_then(parse_currency) {
                cost_sum += v;
                cost_count += 1;
            }
            if let Some(v) = record.get("Conversion_Rate").and_then(as_number) {
                rate_sum += v;
                rate_count += 1;
            }
            if let Some(v) = record.get("ROI").and_then(as_number) {
                roi_sum += v;
                roi_count += 1;
            }
            total_clicks += record.get("Clicks").and_then(as_number).unwrap_or(0.0);
            total_impressions += record.get("Impressions").and_then(as_number).unwrap_or(0.0);
        }

        let date_range = match (dates.iter().min(), dates.iter().max()) {
            (Some(start), Some(end)) => Some(DateRange {
                start: start.to_string(),
                end: end.to_string(),
            }),
            _ => None,
        };

        Self {
            total_campaigns: records.len(),
            campaign_types,
            channels,
            companies,
            customer_segments,
            date_range,
            avg_acquisition_cost: mean(cost_sum, cost_count),
            avg_conversion_rate: mean(rate_sum, rate_count),
            avg_roi: mean(roi_sum, roi_count),
            total_clicks,
            total_impressions,
        }
    }
}

fn count_value(value: Option<&Value>, counts: &mut BTreeMap<String, usize>) {
    if let Some(s) = value.and_then(|v| v.as_str()) {
        if !s.trim().is_empty() {
            *counts.entry(s.to_string()).or_default() += 1;
        }
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_records() -> Vec<Value> {
        vec![
            json!({
                "Campaign_ID": "C001", "Company": "Innovate Industries",
                "Campaign_Type": "Email", "Channel_Used": "Google Ads",
                "Customer_Segment": "Foodies", "Date": "2021-01-05",
                "Acquisition_Cost": "$1,000.00", "Conversion_Rate": "0.10",
                "ROI": "2.0", "Clicks": "100", "Impressions": "1000",
            }),
            json!({
                "Campaign_ID": "C002", "Company": "NexGen Systems",
                "Campaign_Type": "Email", "Channel_Used": "YouTube",
                "Customer_Segment": "Fashionistas", "Date": "2021-06-10",
                "Acquisition_Cost": "$3,000.00", "Conversion_Rate": "0.30",
                "ROI": "4.0", "Clicks": "300", "Impressions": "2000",
            }),
        ]
    }

    #[test]
    fn test_check_contract_passes() {
        let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        assert!(check_contract(&headers).is_ok());
    }

    #[test]
    fn test_check_contract_reports_missing() {
        let headers = vec!["Campaign_ID".to_string(), "Clicks".to_string()];
        let err = check_contract(&headers).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Impressions"));
        assert!(msg.contains("Date"));
        assert!(!msg.contains("Campaign_ID,"));
    }

    #[test]
    fn test_summary_stats() {
        let summary = DatasetSummary::compute(&sample_records());

        assert_eq!(summary.total_campaigns, 2);
        assert_eq!(summary.campaign_types.get("Email"), Some(&2));
        assert_eq!(summary.channels.len(), 2);
        assert_eq!(
            summary.date_range,
            Some(DateRange { start: "2021-01-05".into(), end: "2021-06-10".into() })
        );
        assert!((summary.avg_acquisition_cost - 2000.0).abs() < 1e-9);
        assert!((summary.avg_conversion_rate - 0.2).abs() < 1e-9);
        assert!((summary.avg_roi - 3.0).abs() < 1e-9);
        assert_eq!(summary.total_clicks, 400.0);
        assert_eq!(summary.total_impressions, 3000.0);
    }

    #[test]
    fn test_load_dataset_rejects_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "Campaign_ID,Clicks\nC001,100\n").unwrap();

        let mut log = CleaningLog::new();
        let err = load_dataset(&path, &mut log).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns(_)));
    }

    #[test]
    fn test_load_dataset_rejects_non_numeric_metric() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad_types.csv");
        let header = REQUIRED_COLUMNS.join(",");
        let row = "C001,Acme,Email,All Ages,10 days,YouTube,0.1,$100.00,2.0,Miami,English,lots,1000,5,Foodies,2021-01-01";
        std::fs::write(&path, format!("{}\n{}\n", header, row)).unwrap();

        let mut log = CleaningLog::new();
        let err = load_dataset(&path, &mut log).unwrap_err();
        match err {
            LoadError::InvalidColumn { column, .. } => assert_eq!(column, "Clicks"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_dataset_reports_nulls_without_failing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nulls.csv");
        let header = REQUIRED_COLUMNS.join(",");
        let row = "C001,Acme,Email,All Ages,10 days,YouTube,0.1,$100.00,2.0,Miami,,500,1000,5,Foodies,2021-01-01";
        std::fs::write(&path, format!("{}\n{}\n", header, row)).unwrap();

        let mut log = CleaningLog::new();
        let parsed = load_dataset(&path, &mut log).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(log
            .entries()
            .iter()
            .any(|e| e.message.contains("null values in Language")));
    }
}
