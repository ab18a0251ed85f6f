//! CLI entry point for the IMDb cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use imdb_processing::{CleaningConfig, CleaningSummary, Pipeline, ProcessingError};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean the IMDb Top 1000 dataset",
    long_about = "Renames columns, removes duplicate and incomplete rows, coerces numeric \
                  columns and derives genre and decade fields.\n\n\
                  EXAMPLES:\n  \
                  # Clean imdb.csv into imdb_clean.csv\n  \
                  imdb-processing\n\n  \
                  # Custom paths\n  \
                  imdb-processing -i data/imdb_top_1000.csv -o data/imdb_clean.csv\n\n  \
                  # Preview without writing anything\n  \
                  imdb-processing --dry-run"
)]
struct Args {
    /// Path to the raw CSV file
    #[arg(short, long, default_value = imdb_processing::config::DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Path of the cleaned CSV file
    #[arg(short, long, default_value = imdb_processing::config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Run every stage in memory and print the summary without writing
    #[arg(long)]
    dry_run: bool,

    /// Print the cleaning summary as JSON on stdout
    ///
    /// Disables all logging so stdout only contains the JSON document.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so that stdout only
/// carries the JSON summary.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables (RUST_LOG) from .env file
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = CleaningConfig::builder()
        .input_path(&args.input)
        .output_path(&args.output)
        .save_to_disk(!args.dry_run)
        .build()?;

    let mut builder = Pipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    let result = match builder.build()?.run() {
        Ok(result) => result,
        Err(e) if e.is_missing_input() => {
            error!("{}", e);
            return Err(anyhow!(
                "Input file '{}' not found. Download the IMDb Top 1000 CSV first.",
                args.input.display()
            ));
        }
        Err(e) => return Err(report_failure(e)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    print_summary(&result.summary, &args);
    Ok(())
}

fn report_failure(e: ProcessingError) -> anyhow::Error {
    error!("Cleaning failed [{}]: {}", e.error_code(), e);
    anyhow!("Cleaning failed: {}", e)
}

/// Print the completion message and, for dry runs, the per-column details.
///
/// Printed with `println!` whatever the log level.
fn print_summary(summary: &CleaningSummary, args: &Args) {
    match &summary.output_path {
        Some(path) => println!("Cleaning complete. File: {}", path.display()),
        None => println!("Dry run complete. Nothing written to {}", args.output.display()),
    }
    println!("Final records: {}", summary.rows_after);

    if !args.dry_run {
        return;
    }

    println!();
    println!(
        "Rows: {} -> {} ({} duplicates, {} incomplete, {:.1}% removed)",
        summary.rows_before,
        summary.rows_after,
        summary.duplicates_removed,
        summary.incomplete_removed,
        summary.rows_removed_percentage()
    );
    println!(
        "Columns: {} -> {}",
        summary.columns_before, summary.columns_after
    );
    println!();
    println!(
        "{:<14} {:>12} {:>16} {:>11}",
        "Column", "Null before", "Coerced to null", "Null after"
    );
    println!("{}", "-".repeat(56));
    for report in &summary.coercions {
        println!(
            "{:<14} {:>12} {:>16} {:>11}",
            report.column, report.null_before, report.coerced_to_null, report.null_after
        );
    }

    if !summary.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("  ! {}", warning);
        }
    }
}
