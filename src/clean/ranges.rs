//! Stage 5: numeric range validation.
//!
//! Negative counts/scores and out-of-range conversion rates are replaced with
//! the median of the column's valid values; currency-formatted acquisition
//! costs are parsed to plain numbers. Replacement medians deliberately ignore
//! the invalid values themselves, so the post-conditions (non-negative counts,
//! rate in [0, 1]) hold even on pathological inputs.

use serde_json::Value;

use crate::clean::{as_number, json_number, median, parse_currency};
use crate::models::CleaningConfig;
use crate::report::CleaningLog;

/// Enforce numeric domain ranges in place. Returns the number of cells fixed.
pub fn validate_ranges(
    records: &mut [Value],
    config: &CleaningConfig,
    log: &mut CleaningLog,
) -> usize {
    let mut corrected = 0;

    // Non-negative metrics: replace negatives with the valid-value median.
    for col in &config.non_negative_columns {
        let valid: Vec<f64> = records
            .iter()
            .filter_map(|r| r.get(col.as_str()))
            .filter_map(as_number)
            .filter(|v| *v >= 0.0)
            .collect();
        let fill = median(&valid).unwrap_or(0.0);

        let mut fixed = 0;
        for record in records.iter_mut() {
            let Some(obj) = record.as_object_mut() else { continue };
            if let Some(v) = obj.get(col.as_str()).and_then(as_number) {
                if v < 0.0 {
                    obj.insert(col.clone(), json_number(fill));
                    fixed += 1;
                }
            }
        }
        if fixed > 0 {
            log.warning(format!("Found {} negative values in {}, replaced with median", fixed, col));
            corrected += fixed;
        }
    }

    // Replacing clicks, impressions, or scores invalidates the derived
    // engagement fields; refresh them so they stay consistent with their
    // sources. Records without derived fields (standalone stage use) are
    // left alone.
    if corrected > 0 {
        refresh_engagement_features(records, config);
    }

    // Acquisition cost: strip currency formatting.
    let mut bad_costs = 0;
    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else { continue };
        let cell = obj.get(config.cost_column.as_str());
        match cell.and_then(parse_currency) {
            Some(v) => {
                obj.insert(config.cost_column.clone(), json_number(v));
            }
            None => {
                bad_costs += 1;
                obj.insert(config.cost_column.clone(), json_number(0.0));
            }
        }
    }
    if bad_costs > 0 {
        log.warning(format!(
            "{} unparseable values in {}, defaulted to 0",
            bad_costs, config.cost_column
        ));
        corrected += bad_costs;
    }

    // Conversion rate: clamp to [0, 1] via the in-range median.
    let rate_col = &config.rate_column;
    let in_range: Vec<f64> = records
        .iter()
        .filter_map(|r| r.get(rate_col.as_str()))
        .filter_map(as_number)
        .filter(|v| (0.0..=1.0).contains(v))
        .collect();
    let rate_fill = median(&in_range).unwrap_or(0.0);

    let mut bad_rates = 0;
    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else { continue };
        if let Some(v) = obj.get(rate_col.as_str()).and_then(as_number) {
            if !(0.0..=1.0).contains(&v) {
                obj.insert(rate_col.clone(), json_number(rate_fill));
                bad_rates += 1;
            }
        }
    }
    if bad_rates > 0 {
        log.warning(format!("Found {} invalid conversion rates, replaced with median", bad_rates));
        corrected += bad_rates;
    }

    corrected
}

/// Recompute `Engagement_Rate` and `Engagement_Category` from their (now
/// corrected) source columns, for records that carry them.
fn refresh_engagement_features(records: &mut [Value], config: &CleaningConfig) {
    use crate::models::EngagementCategory;

    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else { continue };

        if obj.contains_key("Engagement_Rate") {
            let clicks = obj.get(config.clicks_column.as_str()).and_then(as_number).unwrap_or(0.0);
            let impressions = obj
                .get(config.impressions_column.as_str())
                .and_then(as_number)
                .unwrap_or(0.0);
            let rate = if impressions > 0.0 { clicks / impressions } else { 0.0 };
            obj.insert("Engagement_Rate".into(), json_number(rate));
        }

        if obj.contains_key("Engagement_Category") {
            let score = obj.get(config.score_column.as_str()).and_then(as_number).unwrap_or(0.0);
            obj.insert(
                "Engagement_Category".into(),
                Value::String(EngagementCategory::bucket(score).as_str().to_string()),
            );
        }
    }
}
