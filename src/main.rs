//! # Hoops Insights
//!
//! Scrapes basketball-reference for a season's conference standings, the
//! current MVP tracker and one player's career totals, prints a summary of
//! each and renders charts.
//!
//! ## Usage
//!
//! ```sh
//! hoops_insights
//! hoops_insights --season 2023 --player curryst01 --json
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pipeline:
//! 1. **Fetching**: download the standings, MVP and player pages in turn
//! 2. **Extraction**: turn table rows into typed records with fixed selectors
//! 3. **Aggregation**: rank MVP candidates, de-duplicate seasons, compute deltas
//! 4. **Output**: stdout summaries, SVG charts and an optional JSON snapshot
//!
//! A non-200 response prints `Error: <status>` and ends the run without any
//! other output. A page whose layout no longer matches the selectors is fatal.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod stats;
mod utils;

use cli::Cli;
use config::Config;
use fetch::HttpSource;
use pipeline::{Plan, RunOutcome};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("hoops_insights starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::resolve(&args)?;
    let plan = Plan::from_config(&config)?;
    info!(
        season = plan.season,
        player = plan.player.as_ref().map(|(id, _)| id.as_str()),
        charts = plan.charts,
        json = plan.json,
        "Resolved run plan"
    );

    let source = HttpSource::new(&config.user_agent)?;
    let mut stdout = std::io::stdout().lock();
    let outcome = pipeline::run(&source, &plan, &mut stdout).await?;

    let elapsed = start_time.elapsed();
    match outcome {
        RunOutcome::Completed(_) => info!(?elapsed, "Execution complete"),
        RunOutcome::TransportFailed => info!(?elapsed, "Execution stopped after fetch failure"),
    }

    Ok(())
}
