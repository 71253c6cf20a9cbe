//! The five-stage cleaning pipeline.
//!
//! Stages run in a fixed order; later stages depend on earlier ones:
//!
//! 1. [`impute`] - fill missing values (numeric: column median, categorical: sentinel)
//! 2. [`dedup`] - drop duplicate campaign IDs, first occurrence wins
//! 3. [`derive`] - duration/engagement categories, engagement rate, date parts
//! 4. [`normalize`] - title-case categorical values
//! 5. [`ranges`] - clamp out-of-range metrics, parse currency costs
//!
//! [`pipeline`] orchestrates the stages and produces the
//! [`CleaningSummary`](crate::models::CleaningSummary).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub mod dedup;
pub mod derive;
pub mod impute;
pub mod normalize;
pub mod pipeline;
pub mod ranges;

pub use pipeline::{clean_csv, CampaignCleaner, CleanedDataset};

/// True if a cell counts as missing: null, blank, or a textual NA marker.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed.is_empty()
                || matches!(trimmed.to_ascii_lowercase().as_str(), "nan" | "na" | "null" | "none")
        }
        _ => false,
    }
}

/// Read a cell as a number, coercing numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// Median of the given values. Returns `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Parse a currency cell like `"$1,200.50"` into `1200.50`.
///
/// Plain numbers pass through; anything unparseable yields `None`.
pub fn parse_currency(value: &Value) -> Option<f64> {
    if let Some(n) = as_number(value) {
        return Some(n);
    }
    match value {
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

static DURATION_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Invalid regex"));

/// Extract a day count from a duration cell.
///
/// Accepts plain numbers and strings like `"30 days"` (first run of digits
/// wins). Returns `None` when nothing numeric is present.
pub fn parse_duration_days(value: &Value) -> Option<f64> {
    if let Some(n) = as_number(value) {
        return Some(n);
    }
    match value {
        Value::String(s) => DURATION_DIGITS
            .find(s)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        _ => None,
    }
}

/// Build a JSON number from an f64, preferring integer representation for
/// whole values so `10.0` round-trips as `10`.
pub(crate) fn json_number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
        Value::Number((v as i64).into())
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some(&Value::Null)));
        assert!(is_missing(Some(&json!(""))));
        assert!(is_missing(Some(&json!("  "))));
        assert!(is_missing(Some(&json!("NaN"))));
        assert!(is_missing(Some(&json!("na"))));
        assert!(!is_missing(Some(&json!("0"))));
        assert!(!is_missing(Some(&json!(0))));
    }

    #[test]
    fn test_as_number_coerces_strings() {
        assert_eq!(as_number(&json!("42")), Some(42.0));
        assert_eq!(as_number(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(as_number(&json!(7)), Some(7.0));
        assert_eq!(as_number(&json!("seven")), None);
        assert_eq!(as_number(&json!("")), None);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency(&json!("$1,200.50")), Some(1200.50));
        assert_eq!(parse_currency(&json!("$16,174.00")), Some(16174.0));
        assert_eq!(parse_currency(&json!("950")), Some(950.0));
        assert_eq!(parse_currency(&json!(12.5)), Some(12.5));
        assert_eq!(parse_currency(&json!("free")), None);
    }

    #[test]
    fn test_parse_duration_days() {
        assert_eq!(parse_duration_days(&json!("10 days")), Some(10.0));
        assert_eq!(parse_duration_days(&json!("30 days")), Some(30.0));
        assert_eq!(parse_duration_days(&json!(45)), Some(45.0));
        assert_eq!(parse_duration_days(&json!("45")), Some(45.0));
        assert_eq!(parse_duration_days(&json!("soon")), None);
    }

    #[test]
    fn test_json_number_whole_values() {
        assert_eq!(json_number(10.0), json!(10));
        assert_eq!(json_number(0.35), json!(0.35));
    }
}
