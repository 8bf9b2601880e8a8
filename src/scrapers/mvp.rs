//! MVP tracker scraper.
//!
//! The tracker table (`#players`) has no stable `data-stat` tags for the
//! columns we read, so cells are picked by position among the row's `td`
//! elements. The indices below track the page layout as of the 2024 season
//! and break silently if the site inserts a column.

use super::{selector, text_of};
use crate::error::ScrapeError;
use crate::fetch::PageSource;
use crate::models::MvpCandidate;
use crate::stats::parse_probability;
use scraper::{ElementRef, Html};
use tracing::{info, instrument};

const ROWS: &str = "table#players tbody tr";

const NAME_COL: usize = 0;
const TEAM_COL: usize = 1;
const REBOUNDS_COL: usize = 23;
const ASSISTS_COL: usize = 24;
const POINTS_COL: usize = 29;
const PROBABILITY_COL: usize = 31;

/// Fetch the tracker page and extract every listed candidate.
#[instrument(level = "info", skip(source))]
pub async fn fetch_candidates<S: PageSource>(
    source: &S,
    url: &str,
) -> Result<Vec<MvpCandidate>, ScrapeError> {
    let html = source.fetch(url).await?;
    parse_candidates(&Html::parse_document(&html))
}

/// Extract one [`MvpCandidate`] per tracker row, in page order.
pub fn parse_candidates(document: &Html) -> Result<Vec<MvpCandidate>, ScrapeError> {
    let row_sel = selector(ROWS)?;
    let candidates = document
        .select(&row_sel)
        .enumerate()
        .map(|(i, row)| parse_row(row, i))
        .collect::<Result<Vec<_>, _>>()?;

    info!(count = candidates.len(), "Parsed MVP candidates");
    Ok(candidates)
}

fn parse_row(row: ElementRef<'_>, index: usize) -> Result<MvpCandidate, ScrapeError> {
    let td = selector("td")?;
    let cells: Vec<String> = row.select(&td).map(text_of).collect();
    let cell = |col: usize| {
        cells
            .get(col)
            .cloned()
            .ok_or_else(|| ScrapeError::missing(&format!("td:nth({col})"), format!("MVP row {index}")))
    };

    let probability_text = cell(PROBABILITY_COL)?;
    let probability = parse_probability(&probability_text)?;

    Ok(MvpCandidate {
        name: cell(NAME_COL)?,
        team: cell(TEAM_COL)?,
        points: cell(POINTS_COL)?,
        rebounds: cell(REBOUNDS_COL)?,
        assists: cell(ASSISTS_COL)?,
        probability,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a tracker row with 32 `td` cells, filling the read columns.
    fn row(rank: usize, name: &str, team: &str, pts: &str, trb: &str, ast: &str, prob: &str) -> String {
        let mut cells = vec!["0".to_string(); 32];
        cells[NAME_COL] = format!("<a href=\"/players/x.html\">{name}</a>");
        cells[TEAM_COL] = team.to_string();
        cells[POINTS_COL] = pts.to_string();
        cells[REBOUNDS_COL] = trb.to_string();
        cells[ASSISTS_COL] = ast.to_string();
        cells[PROBABILITY_COL] = prob.to_string();
        let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
        format!("<tr><th data-stat=\"ranker\">{rank}</th>{tds}</tr>")
    }

    pub(crate) fn tracker_page(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .enumerate()
            .map(|(i, (name, team, prob))| row(i + 1, name, team, "27.1", "11.0", "8.3", prob))
            .collect();
        format!(
            "<html><body><table id=\"players\"><thead><tr><th>Rk</th></tr></thead>\
             <tbody>{body}</tbody></table></body></html>"
        )
    }

    #[test]
    fn test_positional_columns() {
        let page = format!(
            "<html><body><table id=\"players\"><tbody>{}</tbody></table></body></html>",
            row(1, "Nikola Jokić", "DEN", "26.4", "12.4", "9.0", "61.5%")
        );
        let candidates = parse_candidates(&Html::parse_document(&page)).unwrap();

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.name, "Nikola Jokić");
        assert_eq!(c.team, "DEN");
        assert_eq!(c.points, "26.4");
        assert_eq!(c.rebounds, "12.4");
        assert_eq!(c.assists, "9.0");
        assert!((c.probability - 61.5).abs() < 1e-9);
    }

    #[test]
    fn test_rows_keep_page_order() {
        let page = tracker_page(&[("A", "BOS", "10.0%"), ("B", "DEN", "50.0%"), ("C", "OKC", "40.0%")]);
        let names: Vec<String> = parse_candidates(&Html::parse_document(&page))
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_short_row_is_fatal() {
        let page = "<html><body><table id=\"players\"><tbody>\
                    <tr><td>Name</td><td>TEAM</td></tr></tbody></table></body></html>";
        let err = parse_candidates(&Html::parse_document(page)).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingElement { .. }));
    }
}
