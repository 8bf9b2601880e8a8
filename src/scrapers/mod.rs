//! Extractors for the three basketball-reference pages the tool reads.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Fetching**: `fetch_*` pulls the page through a [`PageSource`](crate::fetch::PageSource)
//! 2. **Parsing**: `parse_*` walks the parsed [`Html`](scraper::Html) with fixed selectors
//!
//! # Pages
//!
//! | Page | Module | Table | Rows |
//! |------|--------|-------|------|
//! | Season standings | [`standings`] | `#confs_standings_E` / `#confs_standings_W` | `tbody tr.full_table` |
//! | MVP tracker | [`mvp`] | `#players` | `tbody tr`, positional cells |
//! | Player page | [`player`] | `#totals` | `tbody tr` |
//!
//! Selectors are literal contracts with the page layout. A selector that
//! matches nothing is a [`ScrapeError::MissingElement`], never a default.

pub mod mvp;
pub mod player;
pub mod standings;

use crate::error::ScrapeError;
use scraper::{ElementRef, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css: css.to_string(),
        reason: e.to_string(),
    })
}

/// Concatenated text of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Text of the first descendant of `scope` matching `css`.
pub(crate) fn select_text(
    scope: ElementRef<'_>,
    css: &str,
    context: &str,
) -> Result<String, ScrapeError> {
    let sel = selector(css)?;
    scope
        .select(&sel)
        .next()
        .map(text_of)
        .ok_or_else(|| ScrapeError::missing(css, context))
}
