//! The single scrape → print → chart flow.
//!
//! Pages are fetched one after another (standings, MVP tracker, player).
//! Nothing is printed or written until every enabled page has been fetched
//! and parsed, so a transport failure on the last page still leaves no
//! partial output behind.

use crate::config::Config;
use crate::error::{ConfigError, ScrapeError};
use crate::fetch::PageSource;
use crate::models::{Career, MvpCandidate, Snapshot};
use crate::outputs::{charts, json, text};
use crate::scrapers::mvp::fetch_candidates;
use crate::scrapers::player::fetch_career;
use crate::scrapers::standings::{fetch_standings, Standings};
use crate::stats::{top_candidates, CareerSeries};
use crate::utils::ensure_writable_dir;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Everything a run needs, resolved from [`Config`].
#[derive(Debug, Clone)]
pub struct Plan {
    pub season: u16,
    pub standings_url: String,
    pub mvp_url: Option<String>,
    /// Player id and page URL.
    pub player: Option<(String, String)>,
    pub top_n: usize,
    pub output_dir: PathBuf,
    pub charts: bool,
    pub json: bool,
}

impl Plan {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mvp_url = if config.mvp {
            Some(config.mvp_url()?)
        } else {
            None
        };
        let player = match (&config.player, config.player_url()?) {
            (Some(id), Some(url)) => Some((id.trim().to_string(), url)),
            _ => None,
        };
        Ok(Self {
            season: config.season,
            standings_url: config.standings_url()?,
            mvp_url,
            player,
            top_n: config.top_n,
            output_dir: config.output_path(),
            charts: config.charts,
            json: config.json,
        })
    }
}

/// Parsed records of one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub standings: Standings,
    /// Every tracker row, in page order.
    pub mvp_candidates: Vec<MvpCandidate>,
    /// The best `top_n` of `mvp_candidates`, highest probability first.
    pub mvp_top: Vec<MvpCandidate>,
    pub career: Option<Career>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(Report),
    /// A page could not be fetched; only the error line was printed.
    TransportFailed,
}

/// Fetch and parse every enabled page, in order.
#[instrument(level = "info", skip_all, fields(season = plan.season))]
pub async fn collect<S: PageSource>(source: &S, plan: &Plan) -> Result<Report, ScrapeError> {
    let standings = fetch_standings(source, &plan.standings_url).await?;

    let mvp_candidates = match &plan.mvp_url {
        Some(url) => fetch_candidates(source, url).await?,
        None => Vec::new(),
    };
    let mvp_top = top_candidates(&mvp_candidates, plan.top_n);

    let career = match &plan.player {
        Some((player_id, url)) => Some(Career {
            player_id: player_id.clone(),
            seasons: fetch_career(source, url).await?,
        }),
        None => None,
    };

    Ok(Report {
        standings,
        mvp_candidates,
        mvp_top,
        career,
    })
}

pub fn print_report<W: Write>(out: &mut W, report: &Report) -> std::io::Result<()> {
    text::write_standings(out, &report.standings.east, &report.standings.west)?;
    if !report.mvp_top.is_empty() {
        text::write_mvp(out, &report.mvp_top)?;
    }
    if let Some(career) = &report.career {
        text::write_career(out, &career.player_id, &career.seasons)?;
    }
    Ok(())
}

async fn write_charts(plan: &Plan, report: &Report) -> Result<(), ScrapeError> {
    let dir = &plan.output_dir;
    charts::write_standings(dir, &report.standings.east, &report.standings.west).await?;
    if !report.mvp_top.is_empty() {
        charts::write_mvp(dir, &report.mvp_top).await?;
    }
    if let Some(career) = report.career.as_ref().filter(|c| !c.seasons.is_empty()) {
        let series = CareerSeries::from_seasons(&career.seasons)?;
        charts::write_career(dir, &career.player_id, &series).await?;
    }
    Ok(())
}

/// Run the whole flow against `source`, printing to `out`.
///
/// Transport failures print `Error: …` and return
/// [`RunOutcome::TransportFailed`]; parse and I/O failures are returned as
/// errors.
pub async fn run<S: PageSource, W: Write>(
    source: &S,
    plan: &Plan,
    out: &mut W,
) -> Result<RunOutcome, ScrapeError> {
    let report = match collect(source, plan).await {
        Ok(report) => report,
        Err(e) if e.is_transport() => {
            error!(
                url = e.url().unwrap_or_default(),
                error = %e,
                "Fetch failed; nothing will be printed"
            );
            writeln!(out, "Error: {e}")?;
            return Ok(RunOutcome::TransportFailed);
        }
        Err(e) => return Err(e),
    };

    print_report(out, &report)?;

    if plan.charts || plan.json {
        ensure_writable_dir(&plan.output_dir).await?;
    }
    if plan.charts {
        write_charts(plan, &report).await?;
    }
    if plan.json {
        let snapshot = Snapshot {
            season: plan.season,
            generated_at: Local::now().to_rfc3339(),
            east: report.standings.east.clone(),
            west: report.standings.west.clone(),
            mvp: report.mvp_candidates.clone(),
            career: report.career.clone(),
        };
        json::write_snapshot(&snapshot, &plan.output_dir).await?;
    }

    info!(
        east = report.standings.east.len(),
        west = report.standings.west.len(),
        mvp = report.mvp_top.len(),
        seasons = report.career.as_ref().map_or(0, |c| c.seasons.len()),
        "Run complete"
    );
    Ok(RunOutcome::Completed(report))
}
