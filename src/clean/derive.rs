//! Stage 3: derived features.
//!
//! Adds seven columns to every record:
//! `Campaign_Duration`, `Duration_Category`, `Engagement_Rate`,
//! `Month`, `Quarter`, `Year`, `Engagement_Category`.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::clean::{as_number, json_number, parse_duration_days};
use crate::models::{CleaningConfig, DurationCategory, EngagementCategory};
use crate::report::CleaningLog;

/// Date layouts accepted in the campaign date column.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Add derived columns in place.
pub fn derive_features(records: &mut [Value], config: &CleaningConfig, log: &mut CleaningLog) {
    let mut bad_durations = 0;
    let mut bad_dates = 0;

    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else { continue };

        // Duration in days, extracted from strings like "30 days".
        let days = match obj.get(config.duration_column.as_str()).and_then(parse_duration_days) {
            Some(d) => d,
            None => {
                bad_durations += 1;
                0.0
            }
        };
        obj.insert("Campaign_Duration".into(), json_number(days));
        obj.insert(
            "Duration_Category".into(),
            Value::String(DurationCategory::bucket(days).as_str().to_string()),
        );

        // Engagement rate: clicks / impressions, 0 when there are no impressions.
        let clicks = obj.get(config.clicks_column.as_str()).and_then(as_number).unwrap_or(0.0);
        let impressions = obj
            .get(config.impressions_column.as_str())
            .and_then(as_number)
            .unwrap_or(0.0);
        let rate = if impressions > 0.0 { clicks / impressions } else { 0.0 };
        obj.insert("Engagement_Rate".into(), json_number(rate));

        // Calendar parts of the start date.
        let date = obj
            .get(config.date_column.as_str())
            .and_then(|v| v.as_str())
            .and_then(parse_date);
        match date {
            Some(d) => {
                obj.insert("Month".into(), json_number(d.month() as f64));
                obj.insert("Quarter".into(), json_number(((d.month() - 1) / 3 + 1) as f64));
                obj.insert("Year".into(), json_number(d.year() as f64));
            }
            None => {
                bad_dates += 1;
                obj.insert("Month".into(), json_number(0.0));
                obj.insert("Quarter".into(), json_number(0.0));
                obj.insert("Year".into(), json_number(0.0));
            }
        }

        // Engagement category from the (already imputed) score.
        let score = obj.get(config.score_column.as_str()).and_then(as_number).unwrap_or(0.0);
        obj.insert(
            "Engagement_Category".into(),
            Value::String(EngagementCategory::bucket(score).as_str().to_string()),
        );
    }

    if bad_durations > 0 {
        log.warning(format!(
            "{} records had unparseable durations, defaulted to 0 days",
            bad_durations
        ));
    }
    if bad_dates > 0 {
        log.warning(format!(
            "{} records had unparseable dates, calendar features set to 0",
            bad_dates
        ));
    }
}

/// Parse a date cell, trying plain dates first and then datetimes.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(duration: &str, date: &str, clicks: f64, impressions: f64, score: f64) -> Value {
        json!({
            "Duration": duration,
            "Date": date,
            "Clicks": clicks,
            "Impressions": impressions,
            "Engagement_Score": score,
        })
    }

    fn derive_one(rec: Value) -> Value {
        let mut records = vec![rec];
        let mut log = CleaningLog::new();
        derive_features(&mut records, &CleaningConfig::default(), &mut log);
        records.pop().unwrap()
    }

    #[test]
    fn test_duration_string_to_medium() {
        let rec = derive_one(record("10 days", "2021-03-15", 100.0, 1000.0, 5.0));
        assert_eq!(rec["Campaign_Duration"], json!(10));
        assert_eq!(rec["Duration_Category"], json!("Medium"));
    }

    #[test]
    fn test_long_duration() {
        let rec = derive_one(record("30 days", "2021-03-15", 100.0, 1000.0, 5.0));
        assert_eq!(rec["Duration_Category"], json!("Long"));
    }

    #[test]
    fn test_unparseable_duration_defaults_to_zero() {
        let mut records = vec![record("soon", "2021-03-15", 100.0, 1000.0, 5.0)];
        let mut log = CleaningLog::new();
        derive_features(&mut records, &CleaningConfig::default(), &mut log);

        assert_eq!(records[0]["Campaign_Duration"], json!(0));
        assert_eq!(records[0]["Duration_Category"], json!("Short"));
        assert_eq!(log.warning_count(), 1);
    }

    #[test]
    fn test_engagement_rate() {
        let rec = derive_one(record("7 days", "2021-03-15", 250.0, 1000.0, 5.0));
        assert_eq!(rec["Engagement_Rate"], json!(0.25));
    }

    #[test]
    fn test_zero_impressions_rate_is_zero() {
        let rec = derive_one(record("7 days", "2021-03-15", 250.0, 0.0, 5.0));
        assert_eq!(rec["Engagement_Rate"], json!(0));
    }

    #[test]
    fn test_calendar_features() {
        let rec = derive_one(record("7 days", "2021-08-02", 100.0, 1000.0, 5.0));
        assert_eq!(rec["Month"], json!(8));
        assert_eq!(rec["Quarter"], json!(3));
        assert_eq!(rec["Year"], json!(2021));
    }

    #[test]
    fn test_us_date_format() {
        let rec = derive_one(record("7 days", "03/15/2021", 100.0, 1000.0, 5.0));
        assert_eq!(rec["Month"], json!(3));
        assert_eq!(rec["Year"], json!(2021));
    }

    #[test]
    fn test_engagement_category_high() {
        let rec = derive_one(record("7 days", "2021-03-15", 100.0, 1000.0, 8.5));
        assert_eq!(rec["Engagement_Category"], json!("High"));
    }

    #[test]
    fn test_engagement_category_low_at_edge() {
        let rec = derive_one(record("7 days", "2021-03-15", 100.0, 1000.0, 4.0));
        assert_eq!(rec["Engagement_Category"], json!("Low"));
    }
}
