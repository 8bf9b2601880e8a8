//! Data models for scraped standings, MVP candidates and career totals.
//!
//! Every record is built from a single HTML row and never mutated afterwards:
//! - [`Team`]: one row of a conference standings table
//! - [`MvpCandidate`]: one row of the MVP tracker table
//! - [`SeasonStats`]: one row of a player's totals table
//! - [`Snapshot`]: everything one run extracted, for the JSON output

use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two standings groupings on the season page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    /// Id of the conference table on the season page.
    pub fn table_id(self) -> &'static str {
        match self {
            Conference::East => "confs_standings_E",
            Conference::West => "confs_standings_W",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Conference::East => "Eastern",
            Conference::West => "Western",
        }
    }
}

/// A team's line in a conference standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Full franchise name (e.g., "Boston Celtics").
    pub name: String,
    /// Seed within the conference.
    pub position: u32,
    pub wins: u32,
    pub losses: u32,
    /// Win-loss percentage on a 0–100 scale.
    pub win_loss_percentage: f64,
    /// Games behind the leader, verbatim (the leader shows "—").
    pub games_behind: String,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}W {}L - {:.1}%, {} GB",
            self.position,
            self.name,
            self.wins,
            self.losses,
            self.win_loss_percentage,
            self.games_behind
        )
    }
}

/// A player listed on the MVP tracker.
///
/// Per-game figures stay as the page prints them; only the probability is
/// numeric because it drives the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MvpCandidate {
    pub name: String,
    pub team: String,
    pub points: String,
    pub rebounds: String,
    pub assists: String,
    /// Award probability as a percentage in `[0, 100]`.
    pub probability: f64,
}

impl MvpCandidate {
    /// Points, rebounds and assists per game as numbers, for charting.
    pub fn per_game(&self) -> Result<[f64; 3], ScrapeError> {
        Ok([
            parse_decimal("points", &self.points)?,
            parse_decimal("rebounds", &self.rebounds)?,
            parse_decimal("assists", &self.assists)?,
        ])
    }
}

impl fmt::Display for MvpCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} PTS, {} REB, {} AST - {:.1}% MVP probability",
            self.name, self.team, self.points, self.rebounds, self.assists, self.probability
        )
    }
}

/// One season row of a player's totals table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    /// Season label such as "2019-20".
    pub season: String,
    pub age: String,
    pub team: String,
    pub games: String,
    pub points: String,
    pub rebounds: String,
    pub assists: String,
}

/// Integer totals of a season, coerced from the table text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonTotals {
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
}

impl SeasonStats {
    pub fn totals(&self) -> Result<SeasonTotals, ScrapeError> {
        Ok(SeasonTotals {
            points: parse_integer("points", &self.points)?,
            rebounds: parse_integer("rebounds", &self.rebounds)?,
            assists: parse_integer("assists", &self.assists)?,
        })
    }
}

impl fmt::Display for SeasonStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Age {} | {} | {} GP | {} PTS, {} REB, {} AST",
            self.season, self.age, self.team, self.games, self.points, self.rebounds, self.assists
        )
    }
}

/// Career section of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Career {
    pub player_id: String,
    pub seasons: Vec<SeasonStats>,
}

/// Everything a run extracted, as written to `snapshot.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub season: u16,
    /// Local time the run finished parsing, RFC 3339.
    pub generated_at: String,
    pub east: Vec<Team>,
    pub west: Vec<Team>,
    /// Every MVP tracker row in page order, not only the printed top N.
    pub mvp: Vec<MvpCandidate>,
    pub career: Option<Career>,
}

pub(crate) fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ScrapeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ScrapeError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

pub(crate) fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, ScrapeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ScrapeError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
