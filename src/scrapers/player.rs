//! Player career totals scraper.
//!
//! Reads the `#totals` table of a player page. A player traded mid-season
//! gets a combined "TOT" row followed by one row per team, all sharing the
//! same season label; only the first of those is kept.

use super::{select_text, selector, text_of};
use crate::error::ScrapeError;
use crate::fetch::PageSource;
use crate::models::SeasonStats;
use crate::stats::dedup_seasons;
use scraper::{ElementRef, Html};
use tracing::{debug, info, instrument};

const ROWS: &str = "table#totals tbody tr";
const SEASON: &str = "th[data-stat=\"season\"] a";
const TEAM_CELL: &str = "[data-stat=\"team_id\"]";
const TEAM_LINK: &str = "[data-stat=\"team_id\"] a";

/// Fetch a player page and extract the de-duplicated season totals.
#[instrument(level = "info", skip(source))]
pub async fn fetch_career<S: PageSource>(
    source: &S,
    url: &str,
) -> Result<Vec<SeasonStats>, ScrapeError> {
    let html = source.fetch(url).await?;
    parse_career(&Html::parse_document(&html))
}

/// Extract one [`SeasonStats`] per season, first row winning on duplicates.
pub fn parse_career(document: &Html) -> Result<Vec<SeasonStats>, ScrapeError> {
    let row_sel = selector(ROWS)?;
    let rows = document
        .select(&row_sel)
        .enumerate()
        .map(|(i, row)| parse_row(row, &format!("totals row {i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let total_rows = rows.len();
    let seasons = dedup_seasons(rows);
    info!(
        rows = total_rows,
        seasons = seasons.len(),
        "Parsed career totals"
    );
    Ok(seasons)
}

fn parse_row(row: ElementRef<'_>, context: &str) -> Result<SeasonStats, ScrapeError> {
    Ok(SeasonStats {
        season: select_text(row, SEASON, context)?,
        age: select_text(row, "[data-stat=\"age\"]", context)?,
        team: team_text(row, context)?,
        games: select_text(row, "[data-stat=\"g\"]", context)?,
        points: select_text(row, "[data-stat=\"pts\"]", context)?,
        rebounds: select_text(row, "[data-stat=\"trb\"]", context)?,
        assists: select_text(row, "[data-stat=\"ast\"]", context)?,
    })
}

/// Franchise link text, or the bare cell when the row has no link ("TOT").
fn team_text(row: ElementRef<'_>, context: &str) -> Result<String, ScrapeError> {
    let link_sel = selector(TEAM_LINK)?;
    if let Some(link) = row.select(&link_sel).next() {
        return Ok(text_of(link));
    }
    debug!(context, "No franchise link; using plain team cell");
    select_text(row, TEAM_CELL, context)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn season_row(season: &str, team: &str, linked: bool, pts: u32) -> String {
        let team_cell = if linked {
            format!("<a href=\"/teams/{team}/2020.html\">{team}</a>")
        } else {
            team.to_string()
        };
        format!(
            "<tr class=\"full_table\"><th data-stat=\"season\"><a href=\"/x.html\">{season}</a></th>\
             <td data-stat=\"age\">35</td><td data-stat=\"team_id\">{team_cell}</td>\
             <td data-stat=\"g\">67</td><td data-stat=\"trb\">525</td>\
             <td data-stat=\"ast\">684</td><td data-stat=\"pts\">{pts}</td></tr>"
        )
    }

    pub(crate) fn player_page(rows: &[String]) -> String {
        format!(
            "<html><body><table id=\"totals\"><thead><tr><th>Season</th></tr></thead>\
             <tbody>{}</tbody><tfoot><tr><th>Career</th></tr></tfoot></table></body></html>",
            rows.concat()
        )
    }

    #[test]
    fn test_parses_rows_in_order() {
        let page = player_page(&[
            season_row("2018-19", "LAL", true, 1505),
            season_row("2019-20", "LAL", true, 1698),
        ]);
        let seasons = parse_career(&Html::parse_document(&page)).unwrap();

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season, "2018-19");
        assert_eq!(seasons[1].points, "1698");
        assert_eq!(seasons[1].rebounds, "525");
        assert_eq!(seasons[1].team, "LAL");
    }

    #[test]
    fn test_duplicate_season_keeps_first_row() {
        let page = player_page(&[
            season_row("2019-20", "TOT", false, 2000),
            season_row("2019-20", "MIA", true, 1200),
            season_row("2019-20", "CLE", true, 800),
            season_row("2020-21", "CLE", true, 1500),
        ]);
        let seasons = parse_career(&Html::parse_document(&page)).unwrap();

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].team, "TOT");
        assert_eq!(seasons[0].points, "2000");
        assert_eq!(seasons[1].season, "2020-21");
    }

    #[test]
    fn test_unlinked_team_falls_back_to_cell_text() {
        let page = player_page(&[season_row("2003-04", "TOT", false, 1654)]);
        let seasons = parse_career(&Html::parse_document(&page)).unwrap();
        assert_eq!(seasons[0].team, "TOT");
    }

    #[test]
    fn test_missing_season_link_is_fatal() {
        let page = player_page(&[season_row("2003-04", "CLE", true, 1654)
            .replace("<a href=\"/x.html\">2003-04</a>", "2003-04")]);
        assert!(matches!(
            parse_career(&Html::parse_document(&page)),
            Err(ScrapeError::MissingElement { .. })
        ));
    }
}
