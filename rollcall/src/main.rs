//! rollcall - attendance summary views
//!
//! Thin command-line collaborator over the rollcall core: it loads a store
//! snapshot from JSON, derives the requested view, and prints it. All
//! durable logic lives in `rollcall-core`; this binary only owns process
//! concerns (arguments, config, logging, output formatting).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rollcall_core::report;
use rollcall_core::{Config, Store};

#[derive(Parser)]
#[command(name = "rollcall", version, about = "Attendance summary views over a store snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the seven-day attendance chart series
    Chart {
        /// Path to a store snapshot (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Emit the series as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the records that arrived earliest before their session start
    Early {
        /// Path to a store snapshot (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Override the configured number of records to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print aggregate attendance totals
    Summary {
        /// Path to a store snapshot (JSON)
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, stdout belongs to the views)
    let _log_guard =
        rollcall_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("rollcall starting up");

    match cli.command {
        Command::Chart { input, json } => print_chart(&input, json, &config),
        Command::Early { input, limit } => print_early(
            &input,
            limit.unwrap_or(config.reporting.early_arrivals_limit),
        ),
        Command::Summary { input } => print_summary(&input),
    }
}

/// Read a whole-store snapshot from disk.
fn load_store(path: &Path) -> Result<Store> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let store = Store::from_json_str(&raw).context("failed to parse snapshot")?;
    tracing::info!(
        path = %path.display(),
        records = store.attendance().len(),
        "Snapshot loaded"
    );
    Ok(store)
}

fn print_chart(path: &Path, as_json: bool, config: &Config) -> Result<()> {
    let store = load_store(path)?;
    let buckets = report::group_by_day(store.attendance());
    let mut series = report::to_chart_series(&buckets);

    // A deployment can opt into a fixed fallback headcount; without one,
    // days with no captured roster report an unknown expected count.
    if let Some(fallback) = config.reporting.default_expected {
        for point in &mut series {
            point.expected = point.expected.or(Some(fallback));
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!(
        "{:<4} {:>8} {:>8} {:>6} {:>9}",
        "day", "present", "absent", "late", "expected"
    );
    for point in &series {
        let expected = point
            .expected
            .map(|e| e.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:>8} {:>8} {:>6} {:>9}",
            point.day, point.present, point.absent, point.late, expected
        );
    }
    Ok(())
}

fn print_early(path: &Path, limit: usize) -> Result<()> {
    let store = load_store(path)?;
    let early = report::earliest_arrivals(store.attendance(), limit);

    if early.is_empty() {
        println!("no early arrivals");
        return Ok(());
    }
    for record in &early {
        let session_name = record
            .session
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("(unknown session)");
        println!(
            "{}  member {}  {}",
            record.arrived_at.format("%Y-%m-%d %H:%M"),
            record.member_id,
            session_name
        );
    }
    Ok(())
}

fn print_summary(path: &Path) -> Result<()> {
    let store = load_store(path)?;
    let summary = report::summarize(store.attendance());

    println!("records:  {}", summary.total);
    println!("present:  {}", summary.present);
    println!("absent:   {}", summary.absent);
    println!("late:     {}", summary.late);
    match summary.busiest_day {
        Some(day) => println!("busiest:  {}", day),
        None => println!("busiest:  -"),
    }
    Ok(())
}
