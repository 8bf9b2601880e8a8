//! Derived metrics over extracted records.
//!
//! - MVP ranking: stable top-N by probability
//! - Career deltas: season-over-season finite differences
//! - Season de-duplication and team abbreviations for chart labels

use crate::error::ScrapeError;
use crate::models::{MvpCandidate, SeasonStats, SeasonTotals};
use itertools::Itertools;
use std::cmp::Ordering;

/// Number of candidates the MVP section shows by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Parse a tracker probability such as `"61.5%"` into `61.5`.
pub fn parse_probability(raw: &str) -> Result<f64, ScrapeError> {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix('%')
        .unwrap_or(trimmed)
        .trim()
        .parse::<f64>()
        .map_err(|_| ScrapeError::InvalidNumber {
            field: "probability",
            value: raw.to_string(),
        })
}

/// The `n` most likely candidates, highest probability first.
///
/// The sort is stable: equal probabilities keep their page order.
pub fn top_candidates(candidates: &[MvpCandidate], n: usize) -> Vec<MvpCandidate> {
    candidates
        .iter()
        .sorted_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        })
        .take(n)
        .cloned()
        .collect()
}

/// Season-over-season differences; the first season has no prior and maps to 0.
pub fn career_deltas(values: &[i64]) -> Vec<i64> {
    let mut deltas = Vec::with_capacity(values.len());
    if let Some(first) = values.first() {
        deltas.push(0);
        let mut prev = *first;
        for &v in &values[1..] {
            deltas.push(v - prev);
            prev = v;
        }
    }
    deltas
}

/// Drop every row whose season label was already seen.
pub fn dedup_seasons(rows: Vec<SeasonStats>) -> Vec<SeasonStats> {
    rows.into_iter()
        .unique_by(|row| row.season.clone())
        .collect()
}

/// Points, rebounds and assists as three chronological integer series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerSeries {
    pub seasons: Vec<String>,
    pub points: Vec<i64>,
    pub rebounds: Vec<i64>,
    pub assists: Vec<i64>,
}

impl CareerSeries {
    pub fn from_seasons(seasons: &[SeasonStats]) -> Result<Self, ScrapeError> {
        let mut series = CareerSeries::default();
        for season in seasons {
            let SeasonTotals {
                points,
                rebounds,
                assists,
            } = season.totals()?;
            series.seasons.push(season.season.clone());
            series.points.push(points);
            series.rebounds.push(rebounds);
            series.assists.push(assists);
        }
        Ok(series)
    }

    pub fn deltas(&self) -> CareerSeries {
        CareerSeries {
            seasons: self.seasons.clone(),
            points: career_deltas(&self.points),
            rebounds: career_deltas(&self.rebounds),
            assists: career_deltas(&self.assists),
        }
    }
}

/// Short chart label for a franchise: the last word of its name.
pub fn team_abbreviation(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}
