//! Chart assembly and file output.
//!
//! Turns finished records into [`SeriesChart`]/[`PieChart`] values and writes
//! the rendered SVG documents under the output directory:
//!
//! ```text
//! output_dir/
//! ├── standings.svg          # wins/losses, Eastern and Western panels
//! ├── mvp_stats.svg          # points/rebounds/assists of the top candidates
//! ├── mvp_probability.svg    # share of MVP probability among them, if any
//! ├── career_totals.svg      # season totals
//! └── career_deltas.svg      # season-over-season change
//! ```

use super::svg::{render_bars, render_lines, render_pie, PieChart, Series, SeriesChart};
use crate::error::ScrapeError;
use crate::models::{MvpCandidate, Team};
use crate::stats::{team_abbreviation, CareerSeries};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

pub const WINDOW_TITLE: &str = "Hoops Insights";

const WINS_COLOR: &str = "lightblue";
const LOSSES_COLOR: &str = "salmon";
const POINTS_COLOR: &str = "#4c72b0";
const REBOUNDS_COLOR: &str = "#55a868";
const ASSISTS_COLOR: &str = "#dd8452";

/// Wins and losses of one conference, labelled by team nickname.
pub fn standings_chart(teams: &[Team], conference_name: &str) -> SeriesChart {
    SeriesChart {
        title: format!("{conference_name} Conference Standings"),
        y_label: "Games".to_string(),
        labels: teams
            .iter()
            .map(|t| team_abbreviation(&t.name).to_string())
            .collect(),
        series: vec![
            Series::new("Wins", WINS_COLOR, teams.iter().map(|t| t.wins as f64).collect()),
            Series::new("Losses", LOSSES_COLOR, teams.iter().map(|t| t.losses as f64).collect()),
        ],
    }
}

/// Grouped per-game bars for each candidate.
///
/// # Returns
/// - `Err(ScrapeError::InvalidNumber)` if a per-game cell is not a number
pub fn mvp_stats_chart(candidates: &[MvpCandidate]) -> Result<SeriesChart, ScrapeError> {
    let per_game = candidates
        .iter()
        .map(MvpCandidate::per_game)
        .collect::<Result<Vec<_>, _>>()?;
    let column = |k: usize| per_game.iter().map(|row| row[k]).collect::<Vec<f64>>();

    Ok(SeriesChart {
        title: "MVP Candidates - Per Game".to_string(),
        y_label: "Per game".to_string(),
        labels: candidates.iter().map(|c| c.name.clone()).collect(),
        series: vec![
            Series::new("Points", POINTS_COLOR, column(0)),
            Series::new("Rebounds", REBOUNDS_COLOR, column(1)),
            Series::new("Assists", ASSISTS_COLOR, column(2)),
        ],
    })
}

/// Pie slices of the candidates' MVP probabilities, in ranking order.
pub fn mvp_probability_chart(candidates: &[MvpCandidate]) -> PieChart {
    PieChart {
        title: "MVP Probability".to_string(),
        labels: candidates.iter().map(|c| c.name.clone()).collect(),
        values: candidates.iter().map(|c| c.probability).collect(),
    }
}

/// Points, rebounds and assists per season as three lines.
///
/// # Arguments
/// * `series` - Season totals, or their deltas from [`CareerSeries::deltas`]
/// * `title` - Chart heading
/// * `y_label` - Vertical axis caption
pub fn career_chart(series: &CareerSeries, title: &str, y_label: &str) -> SeriesChart {
    let floats = |v: &[i64]| v.iter().map(|x| *x as f64).collect::<Vec<f64>>();
    SeriesChart {
        title: title.to_string(),
        y_label: y_label.to_string(),
        labels: series.seasons.clone(),
        series: vec![
            Series::new("Points", POINTS_COLOR, floats(&series.points)),
            Series::new("Rebounds", REBOUNDS_COLOR, floats(&series.rebounds)),
            Series::new("Assists", ASSISTS_COLOR, floats(&series.assists)),
        ],
    }
}

async fn write_svg(dir: &Path, name: &str, svg: String) -> Result<PathBuf, ScrapeError> {
    let path = dir.join(name);
    fs::write(&path, svg).await?;
    info!(path = %path.display(), "Wrote chart");
    Ok(path)
}

/// Render both conferences into `standings.svg`.
///
/// # Returns
/// Path of the written file.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_standings(dir: &Path, east: &[Team], west: &[Team]) -> Result<PathBuf, ScrapeError> {
    let svg = render_bars(
        WINDOW_TITLE,
        &[standings_chart(east, "Eastern"), standings_chart(west, "Western")],
    )?;
    write_svg(dir, "standings.svg", svg).await
}

/// Write `mvp_stats.svg` and, when any candidate has a probability above
/// zero, `mvp_probability.svg`.
///
/// # Arguments
/// * `dir` - Existing output directory
/// * `top` - Ranked candidates, best first
///
/// # Returns
/// Paths of the files written, stats chart first.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_mvp(dir: &Path, top: &[MvpCandidate]) -> Result<Vec<PathBuf>, ScrapeError> {
    let stats = render_bars(WINDOW_TITLE, &[mvp_stats_chart(top)?])?;
    let mut written = vec![write_svg(dir, "mvp_stats.svg", stats).await?];

    let probabilities = mvp_probability_chart(top);
    if probabilities.values.iter().sum::<f64>() > 0.0 {
        written.push(write_svg(dir, "mvp_probability.svg", render_pie(&probabilities)?).await?);
    } else {
        warn!(
            candidates = top.len(),
            "No MVP probability to chart; skipping mvp_probability.svg"
        );
    }
    Ok(written)
}

/// Write `career_totals.svg` and `career_deltas.svg` for `player`.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_career(dir: &Path, player: &str, series: &CareerSeries) -> Result<Vec<PathBuf>, ScrapeError> {
    let totals = render_lines(&career_chart(series, &format!("{player} - Career Totals"), "Total"))?;
    let deltas = render_lines(&career_chart(
        &series.deltas(),
        &format!("{player} - Change From Previous Season"),
        "Change",
    ))?;
    Ok(vec![
        write_svg(dir, "career_totals.svg", totals).await?,
        write_svg(dir, "career_deltas.svg", deltas).await?,
    ])
}
