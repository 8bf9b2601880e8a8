//! Conference standings scraper.
//!
//! Reads the season page (`/leagues/NBA_{season}.html`). Both conference
//! tables live inside the `.section_wrapper.data_grid.standings_confs`
//! wrapper; each team is a `tr.full_table` row.

use super::{select_text, selector};
use crate::error::ScrapeError;
use crate::fetch::PageSource;
use crate::models::{Conference, Team};
use scraper::{ElementRef, Html};
use tracing::{info, instrument};

const WRAPPER: &str = ".section_wrapper.data_grid.standings_confs";
const ROWS: &str = "tbody tr.full_table";

/// Both conferences of one season, in page order.
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    pub east: Vec<Team>,
    pub west: Vec<Team>,
}

/// Fetch the season page and extract both conferences.
#[instrument(level = "info", skip(source))]
pub async fn fetch_standings<S: PageSource>(
    source: &S,
    url: &str,
) -> Result<Standings, ScrapeError> {
    let html = source.fetch(url).await?;
    parse_standings(&Html::parse_document(&html))
}

pub fn parse_standings(document: &Html) -> Result<Standings, ScrapeError> {
    Ok(Standings {
        east: parse_conference(document, Conference::East)?,
        west: parse_conference(document, Conference::West)?,
    })
}

/// Extract one conference table, one [`Team`] per `tr.full_table` row.
#[instrument(level = "debug", skip(document))]
pub fn parse_conference(document: &Html, conference: Conference) -> Result<Vec<Team>, ScrapeError> {
    let wrapper_sel = selector(WRAPPER)?;
    let wrapper = document
        .select(&wrapper_sel)
        .next()
        .ok_or_else(|| ScrapeError::missing(WRAPPER, "season page"))?;

    let table_css = format!("#{}", conference.table_id());
    let table_sel = selector(&table_css)?;
    let table = wrapper
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::missing(&table_css, WRAPPER))?;

    let teams = process_table(table)?;
    info!(
        conference = conference.display_name(),
        count = teams.len(),
        "Parsed standings"
    );
    Ok(teams)
}

/// Turn every `tbody tr.full_table` row of `table` into a [`Team`].
pub fn process_table(table: ElementRef<'_>) -> Result<Vec<Team>, ScrapeError> {
    let row_sel = selector(ROWS)?;
    table
        .select(&row_sel)
        .enumerate()
        .map(|(i, row)| parse_row(row, &format!("standings row {i}")))
        .collect()
}

fn parse_row(row: ElementRef<'_>, context: &str) -> Result<Team, ScrapeError> {
    let name = select_text(row, ".left a", context)?;

    let seed = select_text(row, ".seed", context)?;
    let position = strip_seed(&seed)
        .and_then(|inner| inner.trim().parse::<u32>().ok())
        .ok_or_else(|| ScrapeError::InvalidNumber {
            field: "position",
            value: seed.clone(),
        })?;

    let wins = parse_count("wins", &select_text(row, "[data-stat=\"wins\"]", context)?)?;
    let losses = parse_count("losses", &select_text(row, "[data-stat=\"losses\"]", context)?)?;

    let pct_text = select_text(row, "[data-stat=\"win_loss_pct\"]", context)?;
    let win_loss_percentage = fraction_to_percentage(&pct_text)?;

    let games_behind = select_text(row, "[data-stat=\"gb\"]", context)?;

    Ok(Team {
        name,
        position,
        wins,
        losses,
        win_loss_percentage,
        games_behind,
    })
}

/// Drop the single delimiter character on each side of a seed token.
///
/// `"(1)"` becomes `"1"`. Returns `None` when fewer than two characters
/// remain after trimming whitespace.
pub fn strip_seed(raw: &str) -> Option<&str> {
    let mut chars = raw.trim().chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

/// Rescale a `0..=1` win fraction such as `".732"` to a percentage.
pub fn fraction_to_percentage(raw: &str) -> Result<f64, ScrapeError> {
    raw.trim()
        .parse::<f64>()
        .map(|f| f * 100.0)
        .map_err(|_| ScrapeError::InvalidNumber {
            field: "win_loss_pct",
            value: raw.to_string(),
        })
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32, ScrapeError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ScrapeError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::tests::FakeSource;
    use std::fmt::Write;

    const EAST: [&str; 15] = [
        "Boston Celtics",
        "New York Knicks",
        "Milwaukee Bucks",
        "Cleveland Cavaliers",
        "Orlando Magic",
        "Indiana Pacers",
        "Philadelphia 76ers",
        "Miami Heat",
        "Chicago Bulls",
        "Atlanta Hawks",
        "Brooklyn Nets",
        "Toronto Raptors",
        "Charlotte Hornets",
        "Washington Wizards",
        "Detroit Pistons",
    ];

    fn conference_table(id: &str, teams: &[&str]) -> String {
        let mut html = String::new();
        writeln!(html, "<table id=\"{id}\"><thead><tr><th>Team</th></tr></thead><tbody>").unwrap();
        for (i, team) in teams.iter().enumerate() {
            let wins = 64 - i as u32 * 3;
            let losses = 82 - wins;
            writeln!(
                html,
                "<tr class=\"full_table\"><th class=\"left\" data-stat=\"team_name\">\
                 <a href=\"/teams/X/2024.html\">{team}</a><span class=\"seed\">&nbsp;({seed})</span></th>\
                 <td data-stat=\"wins\">{wins}</td><td data-stat=\"losses\">{losses}</td>\
                 <td data-stat=\"win_loss_pct\">{pct:.3}</td><td data-stat=\"gb\">{gb}</td></tr>",
                seed = i + 1,
                pct = wins as f64 / 82.0,
                gb = if i == 0 { "—".to_string() } else { format!("{}.0", i * 3) },
            )
            .unwrap();
        }
        writeln!(html, "</tbody></table>").unwrap();
        html
    }

    pub(crate) fn season_page(east: &[&str], west: &[&str]) -> String {
        format!(
            "<html><body>\
             <div class=\"section_wrapper data_grid standings_confs\">\
             <div class=\"data_grid_box\">{}</div><div class=\"data_grid_box\">{}</div>\
             </div></body></html>",
            conference_table("confs_standings_E", east),
            conference_table("confs_standings_W", west)
        )
    }

    pub(crate) fn small_season_page() -> String {
        season_page(&EAST[..2], &["Oklahoma City Thunder", "Denver Nuggets"])
    }

    #[test]
    fn test_strip_seed() {
        assert_eq!(strip_seed("(1)"), Some("1"));
        assert_eq!(strip_seed("[12]"), Some("12"));
        assert_eq!(strip_seed(" <7> "), Some("7"));
        assert_eq!(strip_seed("x"), None);
        assert_eq!(strip_seed(""), None);
    }

    #[test]
    fn test_fraction_to_percentage() {
        assert!((fraction_to_percentage("0.610").unwrap() - 61.0).abs() < 1e-9);
        assert!((fraction_to_percentage("0.732").unwrap() - 73.2).abs() < 1e-9);
        assert!((fraction_to_percentage(".500").unwrap() - 50.0).abs() < 1e-9);
        assert!(fraction_to_percentage("n/a").is_err());
    }

    #[test]
    fn test_fifteen_rows_in_document_order() {
        let doc = Html::parse_document(&season_page(&EAST, &EAST));
        let teams = parse_conference(&doc, Conference::East).unwrap();

        assert_eq!(teams.len(), 15);
        for (i, team) in teams.iter().enumerate() {
            assert_eq!(team.name, EAST[i]);
            assert_eq!(team.position, i as u32 + 1);
            assert_eq!(team.wins + team.losses, 82);
        }
        assert_eq!(teams[0].games_behind, "—");
        assert_eq!(teams[0].wins, 64);
        assert!((teams[0].win_loss_percentage - 78.0).abs() < 1e-9);
    }

    #[test]
    fn test_rows_without_full_table_class_are_skipped() {
        let page = small_season_page().replace(
            "</tbody></table>",
            "<tr class=\"thead\"><th>Division</th></tr></tbody></table>",
        );
        let doc = Html::parse_document(&page);
        let standings = parse_standings(&doc).unwrap();
        assert_eq!(standings.east.len(), 2);
        assert_eq!(standings.west[1].name, "Denver Nuggets");
    }

    #[test]
    fn test_missing_wrapper_is_fatal() {
        let doc = Html::parse_document("<html><body><table id=\"confs_standings_E\"></table></body></html>");
        assert!(matches!(
            parse_conference(&doc, Conference::East),
            Err(ScrapeError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_missing_cell_fails_the_row() {
        let page = small_season_page().replacen("<td data-stat=\"gb\">—</td>", "", 1);
        let doc = Html::parse_document(&page);
        let err = parse_conference(&doc, Conference::East).unwrap_err();
        assert!(err.to_string().contains("data-stat=\"gb\""));
    }

    #[tokio::test]
    async fn test_fetch_standings_through_source() {
        let url = "https://www.basketball-reference.com/leagues/NBA_2024.html";
        let source = FakeSource::default().with_page(url, &small_season_page());
        let standings = fetch_standings(&source, url).await.unwrap();
        assert_eq!(standings.east[0].name, "Boston Celtics");
        assert_eq!(standings.west[0].name, "Oklahoma City Thunder");
    }
}
