//! Campwash CLI - Clean marketing campaign CSV files
//!
//! # Main Commands
//!
//! ```bash
//! campwash clean input.csv -o cleaned.csv   # Run the full cleaning pipeline
//! campwash summary input.csv                # Dataset overview statistics
//! campwash aggregate cleaned.csv            # Dashboard aggregation JSON
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! campwash parse input.csv          # Just parse CSV to JSON
//! campwash validate cleaned.json    # Validate records against schema
//! campwash generate -n 1000         # Generate a raw sample dataset
//! ```

use campwash::{
    build_dashboard_data, generate_csv_file, parse_csv_file_auto, validate_cleaned_record,
    write_csv_file, CampaignCleaner, CleaningLog, DatasetSummary, ValidationError,
    DERIVED_COLUMNS,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "campwash")]
#[command(about = "Clean and analyze marketing campaign CSV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full cleaning pipeline: impute, dedupe, derive, normalize, fix ranges
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Write the cleaning summary as JSON
        #[arg(short, long)]
        summary: Option<PathBuf>,

        /// Skip schema validation of the cleaned records
        #[arg(long)]
        no_validate: bool,
    },

    /// Parse a CSV file and output JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dataset overview: row counts, null counts, value distributions
    Summary {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate JSON records against the cleaned-campaign schema
    Validate {
        /// Input JSON file (array of records)
        input: PathBuf,
    },

    /// Aggregate a cleaned CSV into dashboard JSON
    Aggregate {
        /// Cleaned CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a raw sample dataset
    Generate {
        /// Number of rows
        #[arg(short = 'n', long, default_value = "1000")]
        rows: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output CSV file
        #[arg(short, long, default_value = "sample_campaign_data.csv")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            input,
            output,
            summary,
            no_validate,
        } => cmd_clean(&input, &output, summary.as_deref(), no_validate),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Summary { input, output } => cmd_summary(&input, output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Aggregate { input, output } => cmd_aggregate(&input, output.as_deref()),

        Commands::Generate { rows, seed, output } => cmd_generate(rows, seed, &output),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_clean(
    input: &Path,
    output: &Path,
    summary_path: Option<&Path>,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Cleaning: {}", input.display());

    let mut log = CleaningLog::with_stderr();
    let parsed = campwash::load_dataset(input, &mut log)?;

    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(parsed.delimiter));
    eprintln!("   Rows: {}", parsed.records.len());

    let cleaner = CampaignCleaner::with_defaults();
    let cleaned = cleaner.clean(parsed.records, &mut log)?;

    if !no_validate {
        let mut invalid = 0;
        let mut first_errors = Vec::new();
        for (i, record) in cleaned.records.iter().enumerate() {
            if let Err(errors) = validate_cleaned_record(record) {
                invalid += 1;
                if invalid <= 5 {
                    eprintln!("\n❌ Record {} invalid:", i);
                    for err in errors.iter().take(3) {
                        eprintln!("   - {}", err);
                    }
                    first_errors.extend(errors.into_iter().take(3));
                }
            }
        }
        if invalid > 0 {
            return Err(ValidationError::SchemaError {
                count: invalid,
                errors: first_errors,
            }
            .into());
        }
        eprintln!("   ✅ All {} records valid", cleaned.records.len());
    }

    let mut columns = parsed.headers.clone();
    for derived in DERIVED_COLUMNS {
        if !columns.iter().any(|c| c == derived) {
            columns.push(derived.to_string());
        }
    }
    write_csv_file(output, &columns, &cleaned.records)?;
    eprintln!("💾 Cleaned CSV written to: {}", output.display());

    let summary = &cleaned.summary;
    eprintln!(
        "\n📊 {} rows in, {} rows out ({} removed, {} features added)",
        summary.initial_rows,
        summary.final_rows,
        summary.rows_removed,
        summary.derived_features_added.len()
    );

    if let Some(path) = summary_path {
        fs::write(path, serde_json::to_string_pretty(summary)?)?;
        eprintln!("💾 Summary written to: {}", path.display());
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_csv_file_auto(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_summary(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📊 Summarizing: {}", input.display());

    let mut log = CleaningLog::with_stderr();
    let parsed = campwash::load_dataset(input, &mut log)?;
    let summary = DatasetSummary::compute(&parsed.records);

    let json = serde_json::to_string_pretty(&summary)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let records: Vec<Value> = serde_json::from_str(&content)?;

    let mut valid = 0;
    let mut invalid = 0;

    for (i, record) in records.iter().enumerate() {
        match validate_cleaned_record(record) {
            Ok(()) => valid += 1,
            Err(errors) => {
                invalid += 1;
                if invalid <= 5 {
                    eprintln!("\n❌ Record {} invalid:", i);
                    for err in errors.iter().take(3) {
                        eprintln!("   - {}", err);
                    }
                }
            }
        }
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_aggregate(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Aggregating: {}", input.display());

    let parsed = parse_csv_file_auto(input)?;
    eprintln!("   {} records", parsed.records.len());

    let dashboard = build_dashboard_data(&parsed.records);
    eprintln!(
        "   {} campaign types, {} channels, {} segments",
        dashboard.campaign_types.len(),
        dashboard.channel_performance.len(),
        dashboard.segment_performance.len()
    );

    let json = serde_json::to_string_pretty(&dashboard)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_generate(rows: usize, seed: u64, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🎲 Generating {} rows (seed {})", rows, seed);

    generate_csv_file(output, rows, seed)?;
    eprintln!("💾 Sample CSV written to: {}", output.display());

    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
