//! Stage 2: duplicate removal.
//!
//! Records sharing a campaign ID collapse to the first occurrence in input
//! order.

use serde_json::Value;
use std::collections::HashSet;

use crate::models::CleaningConfig;
use crate::report::CleaningLog;

/// Drop duplicate records in place. Returns the number removed.
pub fn remove_duplicates(
    records: &mut Vec<Value>,
    config: &CleaningConfig,
    log: &mut CleaningLog,
) -> usize {
    let initial = records.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(initial);

    records.retain(|record| {
        let key = record
            .get(config.id_column.as_str())
            .map(id_key)
            .unwrap_or_default();
        seen.insert(key)
    });

    let removed = initial - records.len();
    if removed > 0 {
        log.warning(format!("Removed {} duplicate campaign entries", removed));
    }
    removed
}

/// Stable key for an ID cell, so `"42"` and `42` dedupe together.
fn id_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_occurrence_wins() {
        let mut records = vec![
            json!({"Campaign_ID": "C001", "Channel_Used": "Facebook"}),
            json!({"Campaign_ID": "C002", "Channel_Used": "YouTube"}),
            json!({"Campaign_ID": "C001", "Channel_Used": "TikTok"}),
        ];
        let mut log = CleaningLog::new();
        let removed = remove_duplicates(&mut records, &CleaningConfig::default(), &mut log);

        assert_eq!(removed, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Channel_Used"], "Facebook");
        assert_eq!(log.warning_count(), 1);
    }

    #[test]
    fn test_numeric_and_string_ids_match() {
        let mut records = vec![
            json!({"Campaign_ID": 42}),
            json!({"Campaign_ID": "42"}),
        ];
        let mut log = CleaningLog::new();
        let removed = remove_duplicates(&mut records, &CleaningConfig::default(), &mut log);

        assert_eq!(removed, 1);
    }

    #[test]
    fn test_no_duplicates_no_warning() {
        let mut records = vec![
            json!({"Campaign_ID": "C001"}),
            json!({"Campaign_ID": "C002"}),
        ];
        let mut log = CleaningLog::new();
        let removed = remove_duplicates(&mut records, &CleaningConfig::default(), &mut log);

        assert_eq!(removed, 0);
        assert!(log.entries().is_empty());
    }
}
