//! CLI entry point for the IMDb dashboard.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use imdb_dashboard::{Dashboard, DashboardConfig, DashboardError, GenreFilter, render};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, warn};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Explore the cleaned IMDb Top 1000 dataset by genre",
    long_about = "Shows the top-rated titles, titles per decade and mean revenue per genre \
                  for all titles or a single main genre.\n\n\
                  EXAMPLES:\n  \
                  # Everything, from imdb_clean.csv\n  \
                  imdb-dashboard\n\n  \
                  # Only dramas, as JSON\n  \
                  imdb-dashboard -g Drama --json\n\n  \
                  # Pick genres one line at a time\n  \
                  imdb-dashboard --interactive"
)]
struct Args {
    /// Path to the cleaned CSV file
    #[arg(short, long, default_value = imdb_processing::config::DEFAULT_OUTPUT_PATH)]
    input: PathBuf,

    /// Initial genre selection ("All" for every title)
    #[arg(short, long, default_value = imdb_dashboard::filter::ALL_LABEL)]
    genre: String,

    /// Print the available filter options and exit
    #[arg(long)]
    list_genres: bool,

    /// Read further selections from stdin, one per line, until quit/exit/EOF
    #[arg(long)]
    interactive: bool,

    /// Print each view as JSON instead of text
    ///
    /// Disables all logging so stdout only contains JSON documents.
    #[arg(long)]
    json: bool,

    /// Number of titles in the top-rated ranking
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Number of genres in the revenue ranking
    #[arg(long, default_value_t = 10)]
    revenue_top: usize,

    /// Number of records in the preview table (0 hides it)
    #[arg(long, default_value_t = 20)]
    preview_rows: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries only the rendered views.
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
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables (RUST_LOG) from .env file
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = DashboardConfig::builder()
        .input_path(&args.input)
        .top_rated_limit(args.top)
        .revenue_limit(args.revenue_top)
        .preview_rows(args.preview_rows)
        .build()?;

    let mut dashboard = match Dashboard::load(config) {
        Ok(dashboard) => dashboard,
        Err(e) if e.is_missing_input() => {
            error!("{}", e);
            return Err(anyhow!(
                "Cleaned file '{}' not found. Run imdb-processing first.",
                args.input.display()
            ));
        }
        Err(e) => return Err(report_failure(e)),
    };

    if args.list_genres {
        for option in dashboard.options() {
            println!("{option}");
        }
        return Ok(());
    }

    select(&mut dashboard, &args.genre);
    show(&dashboard, args.json)?;

    if args.interactive {
        run_interactive(&mut dashboard, args.json)?;
    }

    Ok(())
}

/// Re-render after every line read from stdin.
fn run_interactive(dashboard: &mut Dashboard, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if !json {
            print!("\nGenre ({}): ", option_labels(dashboard));
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let selection = line.trim();
        if selection.eq_ignore_ascii_case("quit") || selection.eq_ignore_ascii_case("exit") {
            break;
        }

        select(dashboard, selection);
        show(dashboard, json)?;
    }

    Ok(())
}

fn select(dashboard: &mut Dashboard, selection: &str) {
    let Ok(filter) = selection.parse::<GenreFilter>();

    if !dashboard.options().contains(&filter) {
        warn!("Genre '{}' does not occur in the data; views will be empty", filter);
    }
    dashboard.select(filter);
}

fn show(dashboard: &Dashboard, json: bool) -> Result<()> {
    let view = dashboard.render();
    if json {
        println!("{}", serde_json::to_string(&view)?);
    } else {
        println!(
            "{}",
            render::render_text(&view, dashboard.config().chart_width)
        );
    }
    Ok(())
}

fn option_labels(dashboard: &Dashboard) -> String {
    dashboard
        .options()
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn report_failure(e: DashboardError) -> anyhow::Error {
    error!("Dashboard failed [{}]: {}", e.error_code(), e);
    anyhow!("Dashboard failed: {}", e)
}
