//! Error types shared by the fetch, scrape and output stages.
//!
//! Two classes of failure exist:
//!
//! - **Transport**: the page could not be fetched or came back with a non-200
//!   status. The run reports it and stops without emitting anything.
//! - **Shape**: a selector matched nothing or a cell did not hold the expected
//!   number. The page layout is trusted, so these abort the process.

use thiserror::Error;

/// Failure while rendering a chart from prepared series.
#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("chart `{title}` has nothing to plot")]
    Empty { title: String },

    #[error("series `{series}` in chart `{title}` has {actual} values, expected {expected}")]
    LengthMismatch {
        title: String,
        series: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: String, reason: String },

    #[error("no element matches `{selector}` in {context}")]
    MissingElement { selector: String, context: String },

    #[error("field `{field}` holds `{value}`, not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// True for failures that happened before any HTML was in hand.
    pub fn is_transport(&self) -> bool {
        matches!(self, ScrapeError::Status { .. } | ScrapeError::Transport { .. })
    }

    /// Page the failure belongs to, for transport failures.
    pub fn url(&self) -> Option<&str> {
        match self {
            ScrapeError::Status { url, .. } | ScrapeError::Transport { url, .. } => Some(url),
            _ => None,
        }
    }

    pub(crate) fn missing(selector: &str, context: impl Into<String>) -> Self {
        ScrapeError::MissingElement {
            selector: selector.to_string(),
            context: context.into(),
        }
    }
}

/// Failure while loading the optional YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid base url `{0}`")]
    BaseUrl(String),

    #[error("player id is empty")]
    EmptyPlayer,
}
