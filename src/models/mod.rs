//! Domain models for the Campwash cleaning pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`CleaningConfig`] - explicit column contract handed to the cleaner
//! - [`CleaningSummary`] - what a cleaning run did, returned to the caller
//! - [`DurationCategory`] - bucketed campaign duration (Short/Medium/Long)
//! - [`EngagementCategory`] - bucketed engagement score (Low/Medium/High)

use serde::{Deserialize, Serialize};

/// Sentinel category written into missing categorical cells.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Derived column names, in output order.
pub const DERIVED_COLUMNS: [&str; 7] = [
    "Campaign_Duration",
    "Duration_Category",
    "Engagement_Rate",
    "Month",
    "Quarter",
    "Year",
    "Engagement_Category",
];

// =============================================================================
// Cleaning Configuration
// =============================================================================

/// Column contract for a campaign dataset.
///
/// The contract is passed to [`crate::clean::CampaignCleaner`] explicitly so
/// tests can run the pipeline against alternate schemas. `default()` is the
/// marketing campaign dataset this tool ships for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Unique record identifier, used for deduplication.
    pub id_column: String,
    /// Numeric metric columns: median-imputed, non-negativity enforced where
    /// listed in `non_negative_columns`.
    pub numeric_columns: Vec<String>,
    /// Categorical columns: sentinel-imputed and title-cased.
    pub categorical_columns: Vec<String>,
    /// Subset of numeric columns that must not be negative.
    pub non_negative_columns: Vec<String>,
    /// Ratio column constrained to [0, 1].
    pub rate_column: String,
    /// Currency-formatted cost column (e.g. `"$1,200.50"`).
    pub cost_column: String,
    /// Campaign start date column.
    pub date_column: String,
    /// Duration column, either numeric or a string like `"30 days"`.
    pub duration_column: String,
    /// Clicks column (numerator of the engagement rate).
    pub clicks_column: String,
    /// Impressions column (denominator of the engagement rate).
    pub impressions_column: String,
    /// Engagement score column (source of the engagement category).
    pub score_column: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            id_column: "Campaign_ID".into(),
            numeric_columns: vec![
                "Clicks".into(),
                "Impressions".into(),
                "Engagement_Score".into(),
                "Conversion_Rate".into(),
                "ROI".into(),
            ],
            categorical_columns: vec![
                "Campaign_Type".into(),
                "Channel_Used".into(),
                "Target_Audience".into(),
                "Location".into(),
                "Language".into(),
                "Customer_Segment".into(),
            ],
            non_negative_columns: vec![
                "Clicks".into(),
                "Impressions".into(),
                "Engagement_Score".into(),
            ],
            rate_column: "Conversion_Rate".into(),
            cost_column: "Acquisition_Cost".into(),
            date_column: "Date".into(),
            duration_column: "Duration".into(),
            clicks_column: "Clicks".into(),
            impressions_column: "Impressions".into(),
            score_column: "Engagement_Score".into(),
        }
    }
}

impl CleaningConfig {
    /// Every column the cleaner touches and therefore expects to exist.
    ///
    /// Used for the fail-fast contract check before any stage runs.
    pub fn contract_columns(&self) -> Vec<&str> {
        let mut cols: Vec<&str> = vec![self.id_column.as_str()];
        cols.extend(self.numeric_columns.iter().map(String::as_str));
        cols.extend(self.categorical_columns.iter().map(String::as_str));
        for extra in [
            self.rate_column.as_str(),
            self.cost_column.as_str(),
            self.date_column.as_str(),
            self.duration_column.as_str(),
        ] {
            if !cols.contains(&extra) {
                cols.push(extra);
            }
        }
        cols
    }
}

// =============================================================================
// Duration Category
// =============================================================================

/// Bucketed campaign duration.
///
/// Bin edges at 0, 7, 14, +inf days. A duration of zero (the default for
/// unparseable values) lands in `Short` so no record leaves the pipeline
/// uncategorized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DurationCategory {
    /// 7 days or fewer.
    Short,
    /// 8 to 14 days.
    Medium,
    /// More than 14 days.
    Long,
}

impl DurationCategory {
    /// Bucket a duration in days.
    pub fn bucket(days: f64) -> Self {
        if days <= 7.0 {
            Self::Short
        } else if days <= 14.0 {
            Self::Medium
        } else {
            Self::Long
        }
    }

    /// Label written into the cleaned dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }

    /// Parse a label from a cleaned dataset.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Short" => Some(Self::Short),
            "Medium" => Some(Self::Medium),
            "Long" => Some(Self::Long),
            _ => None,
        }
    }
}

// =============================================================================
// Engagement Category
// =============================================================================

/// Bucketed engagement score.
///
/// Bin edges at 0, 4, 7, 10, right-inclusive: a score of exactly 4 is `Low`,
/// exactly 7 is `Medium`. Scores of zero land in `Low`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EngagementCategory {
    /// Score in [0, 4].
    Low,
    /// Score in (4, 7].
    Medium,
    /// Score in (7, 10].
    High,
}

impl EngagementCategory {
    /// Bucket an engagement score.
    pub fn bucket(score: f64) -> Self {
        if score <= 4.0 {
            Self::Low
        } else if score <= 7.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Label written into the cleaned dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parse a label from a cleaned dataset.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

// =============================================================================
// Cleaning Summary
// =============================================================================

/// Summary of a cleaning run, returned alongside the cleaned records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleaningSummary {
    /// Row count before cleaning.
    pub initial_rows: usize,
    /// Row count after cleaning.
    pub final_rows: usize,
    /// Rows dropped by deduplication.
    pub rows_removed: usize,
    /// Names of the derived columns added to every record.
    pub derived_features_added: Vec<String>,
}

impl CleaningSummary {
    /// Build a summary for a run that went from `initial` to `final_rows` rows.
    pub fn new(initial: usize, final_rows: usize) -> Self {
        Self {
            initial_rows: initial,
            final_rows,
            rows_removed: initial - final_rows,
            derived_features_added: DERIVED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
