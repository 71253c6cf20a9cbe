//! Seeded sample dataset generator.
//!
//! Emits raw (uncleaned) campaign CSVs for demos and tests: currency strings
//! with thousands separators, durations like "30 days", and sequential dates.
//! The same seed always produces the same file.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::path::Path;

use crate::error::PipelineResult;
use crate::loader::REQUIRED_COLUMNS;
use crate::parser::write_csv_file;

const COMPANIES: &[&str] = &[
    "Innovate Industries",
    "NexGen Systems",
    "Alpha Innovations",
    "DataTech Solutions",
    "FutureBrands",
];

const CAMPAIGN_TYPES: &[&str] = &["Email", "Influencer", "Display", "Social Media", "Search"];

const TARGET_AUDIENCES: &[&str] = &[
    "Men 18-24",
    "Men 25-34",
    "Women 25-34",
    "Women 35-44",
    "All Ages",
];

const CHANNELS: &[&str] = &["Google Ads", "YouTube", "Facebook", "Instagram", "TikTok"];

const LOCATIONS: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Miami"];

const LANGUAGES: &[&str] = &["English", "Spanish", "French", "German", "Mandarin"];

const SEGMENTS: &[&str] = &[
    "Tech Enthusiasts",
    "Fashionistas",
    "Health & Wellness",
    "Foodies",
    "Outdoor Adventurers",
];

const DURATIONS: &[u32] = &[15, 30, 45, 60, 90];

/// Format a cost as a currency string with thousands separators.
fn format_currency(amount: f64) -> String {
    // Round to cents first so 999.999 carries to $1,000.00.
    let total_cents = (amount * 100.0).round() as i64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{cents:02}")
}

fn pick<'a>(rng: &mut StdRng, pool: &'a [&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Generate `rows` raw campaign records from a seed.
pub fn generate_records(rows: usize, seed: u64) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

    (0..rows)
        .map(|i| {
            let date = start + chrono::Duration::days(i as i64);
            let cost = rng.gen_range(5_000.0..20_000.0);
            json!({
                "Campaign_ID": format!("{}", i + 1),
                "Company": pick(&mut rng, COMPANIES),
                "Campaign_Type": pick(&mut rng, CAMPAIGN_TYPES),
                "Target_Audience": pick(&mut rng, TARGET_AUDIENCES),
                "Duration": format!("{} days", DURATIONS[rng.gen_range(0..DURATIONS.len())]),
                "Channel_Used": pick(&mut rng, CHANNELS),
                "Conversion_Rate": rng.gen_range(0.01..0.15),
                "Acquisition_Cost": format_currency(cost),
                "ROI": rng.gen_range(1.0..10.0),
                "Location": pick(&mut rng, LOCATIONS),
                "Language": pick(&mut rng, LANGUAGES),
                "Clicks": rng.gen_range(100..1000),
                "Impressions": rng.gen_range(1000..10000),
                "Engagement_Score": rng.gen_range(1..=10),
                "Customer_Segment": pick(&mut rng, SEGMENTS),
                "Date": date.format("%Y-%m-%d").to_string(),
            })
        })
        .collect()
}

/// Generate a sample CSV on disk with the standard column order.
pub fn generate_csv_file(path: &Path, rows: usize, seed: u64) -> PipelineResult<()> {
    let records = generate_records(rows, seed);
    let columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    write_csv_file(path, &columns, &records)?;
    Ok(())
}
