//! cronbit — parse a cron expression and list its upcoming occurrences.
//!
//! Prints the canonical form of the expression (ascending value enumeration
//! per field), then the next N occurrences from `--from` (default: now).

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use clap::Parser;
use tracing::warn;

use cronbit_core::Schedule;

/// Five-field cron expression inspector.
///
/// Parses `minute hour day-of-month month day-of-week`, prints the
/// canonical form, and lists upcoming occurrences at minute granularity.
/// Timestamps are naive (no timezone); matching is day-of-month only.
#[derive(Parser, Debug)]
#[command(name = "cronbit", version, about)]
struct Cli {
    /// Cron expression: minute hour day-of-month month day-of-week
    expression: String,

    /// Starting timestamp, "YYYY-MM-DD HH:MM" (default: now)
    #[arg(long)]
    from: Option<String>,

    /// Number of occurrences to print
    #[arg(long, default_value_t = 5)]
    count: usize,
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("unrecognized timestamp '{value}', expected YYYY-MM-DD HH:MM"))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let schedule: Schedule = cli
        .expression
        .parse()
        .with_context(|| format!("invalid expression '{}'", cli.expression))?;
    println!("{schedule}");

    let from = match cli.from.as_deref() {
        Some(value) => parse_timestamp(value)?,
        None => Utc::now().naive_utc(),
    };

    let mut printed = 0;
    for occurrence in schedule.upcoming(from).take(cli.count) {
        println!("{}", occurrence.format("%Y-%m-%d %H:%M"));
        printed += 1;
    }

    if printed < cli.count {
        // The carry cascade hit a day that does not exist in its month.
        warn!(
            expression = %cli.expression,
            "schedule stopped after {printed} occurrences: next date is not a valid calendar day"
        );
    }

    Ok(())
}
