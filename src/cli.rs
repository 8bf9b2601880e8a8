//! Command-line interface definitions for Hoops Insights.
//!
//! Every option is optional: a bare `hoops_insights` scrapes the default
//! season, prints standings, MVP odds and career totals, and writes charts.
//! Flags override values from the optional YAML config file.

use clap::Parser;

/// Command-line arguments for the Hoops Insights scraper.
///
/// # Examples
///
/// ```sh
/// # Default season, default player, charts in ./charts
/// hoops_insights
///
/// # Another season and player, JSON snapshot, no charts
/// hoops_insights --season 2023 --player curryst01 --json --no-charts
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Season end year to scrape (e.g. 2024 for 2023-24)
    #[arg(short, long)]
    pub season: Option<u16>,

    /// basketball-reference player id for the career section (e.g. jamesle01)
    #[arg(short, long)]
    pub player: Option<String>,

    /// Directory for chart and snapshot files
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long, env = "HOOPS_CONFIG")]
    pub config: Option<String>,

    /// Number of MVP candidates to show
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Write a JSON snapshot of everything scraped
    #[arg(long)]
    pub json: bool,

    /// Skip the MVP tracker page
    #[arg(long)]
    pub skip_mvp: bool,

    /// Skip the player career page
    #[arg(long)]
    pub skip_player: bool,
}
