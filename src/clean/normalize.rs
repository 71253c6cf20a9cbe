//! Stage 4: categorical normalization.
//!
//! Title-cases every categorical contract column so `"email"`, `"EMAIL"` and
//! `"Email"` stop counting as three campaign types.

use serde_json::Value;

use crate::models::CleaningConfig;
use crate::report::CleaningLog;

/// Title-case categorical cells in place. Returns the number of cells changed.
pub fn normalize_categories(
    records: &mut [Value],
    config: &CleaningConfig,
    log: &mut CleaningLog,
) -> usize {
    let mut changed = 0;

    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else { continue };
        for col in &config.categorical_columns {
            if let Some(Value::String(s)) = obj.get(col.as_str()) {
                let normalized = title_case(s);
                if normalized != *s {
                    obj.insert(col.clone(), Value::String(normalized));
                    changed += 1;
                }
            }
        }
    }

    if changed > 0 {
        log.info(format!("Normalized casing of {} categorical values", changed));
    }
    changed
}

/// Title-case a string: each letter run starts uppercase, the rest lowercase.
///
/// Runs are delimited by any non-alphabetic character, so `"new york"` becomes
/// `"New York"` and `"health & wellness"` becomes `"Health & Wellness"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("email"), "Email");
        assert_eq!(title_case("GOOGLE ADS"), "Google Ads");
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("health & wellness"), "Health & Wellness");
        assert_eq!(title_case("tech-enthusiasts"), "Tech-Enthusiasts");
        assert_eq!(title_case("Email"), "Email");
    }

    #[test]
    fn test_normalizes_categorical_columns() {
        let mut records = vec![json!({
            "Campaign_Type": "email",
            "Channel_Used": "google ads",
            "Target_Audience": "ALL AGES",
            "Location": "chicago",
            "Language": "english",
            "Customer_Segment": "foodies",
        })];
        let mut log = CleaningLog::new();
        let changed = normalize_categories(&mut records, &CleaningConfig::default(), &mut log);

        assert_eq!(changed, 6);
        assert_eq!(records[0]["Campaign_Type"], json!("Email"));
        assert_eq!(records[0]["Channel_Used"], json!("Google Ads"));
        assert_eq!(records[0]["Location"], json!("Chicago"));
    }

    #[test]
    fn test_already_normalized_is_untouched() {
        let mut records = vec![json!({
            "Campaign_Type": "Email",
            "Channel_Used": "Google Ads",
            "Target_Audience": "All Ages",
            "Location": "Chicago",
            "Language": "English",
            "Customer_Segment": "Foodies",
        })];
        let mut log = CleaningLog::new();
        let changed = normalize_categories(&mut records, &CleaningConfig::default(), &mut log);

        assert_eq!(changed, 0);
        assert!(log.entries().is_empty());
    }
}
