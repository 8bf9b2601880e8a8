//! Human-readable stdout summaries, one line per record.

use crate::models::{MvpCandidate, SeasonStats, Team};
use std::io::{self, Write};

pub const SEPARATOR: &str = "-------------------------------------------------------";

/// Print both conference tables, East first, split by [`SEPARATOR`].
///
/// # Arguments
/// * `out` - Destination, stdout in a normal run
/// * `east` - Eastern teams in page order
/// * `west` - Western teams in page order
pub fn write_standings<W: Write>(out: &mut W, east: &[Team], west: &[Team]) -> io::Result<()> {
    writeln!(out, "Eastern Conference standings")?;
    for team in east {
        writeln!(out, "{team}")?;
    }
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Western Conference standings")?;
    for team in west {
        writeln!(out, "{team}")?;
    }
    Ok(())
}

/// Print the ranked MVP candidates, numbered from 1.
pub fn write_mvp<W: Write>(out: &mut W, top: &[MvpCandidate]) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "MVP tracker - top {}", top.len())?;
    for (rank, candidate) in top.iter().enumerate() {
        writeln!(out, "{}. {candidate}", rank + 1)?;
    }
    Ok(())
}

/// Print one line per de-duplicated season of `player`.
pub fn write_career<W: Write>(out: &mut W, player: &str, seasons: &[SeasonStats]) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Career totals for {player}")?;
    for season in seasons {
        writeln!(out, "{season}")?;
    }
    Ok(())
}
