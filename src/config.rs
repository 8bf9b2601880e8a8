//! Run configuration: YAML file defaults merged with CLI overrides.
//!
//! ```yaml
//! season: 2024
//! base_url: https://www.basketball-reference.com
//! player: jamesle01
//! output_dir: charts
//! charts: true
//! json: false
//! top_n: 5
//! ```
//!
//! Every key is optional.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::stats::DEFAULT_TOP_N;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com";
const DEFAULT_USER_AGENT: &str = concat!("hoops_insights/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub season: u16,
    pub base_url: String,
    /// Player id for the career section; `None` disables it.
    pub player: Option<String>,
    pub output_dir: String,
    pub charts: bool,
    pub json: bool,
    pub mvp: bool,
    pub top_n: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            season: 2024,
            base_url: DEFAULT_BASE_URL.to_string(),
            player: Some("jamesle01".to_string()),
            output_dir: "charts".to_string(),
            charts: true,
            json: false,
            mvp: true,
            top_n: DEFAULT_TOP_N,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        info!(season = config.season, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Config file (if any) with CLI flags laid over it.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(season) = cli.season {
            self.season = season;
        }
        if let Some(player) = &cli.player {
            self.player = Some(player.clone());
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(top) = cli.top {
            self.top_n = top;
        }
        if cli.no_charts {
            self.charts = false;
        }
        if cli.json {
            self.json = true;
        }
        if cli.skip_mvp {
            self.mvp = false;
        }
        if cli.skip_player {
            self.player = None;
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|_| ConfigError::BaseUrl(self.base_url.clone()))
    }

    fn join(&self, path: &str) -> Result<String, ConfigError> {
        self.base()?
            .join(path)
            .map(String::from)
            .map_err(|_| ConfigError::BaseUrl(self.base_url.clone()))
    }

    /// Season page holding both conference standings tables.
    pub fn standings_url(&self) -> Result<String, ConfigError> {
        self.join(&format!("/leagues/NBA_{}.html", self.season))
    }

    pub fn mvp_url(&self) -> Result<String, ConfigError> {
        self.join("/friv/mvp.html")
    }

    /// Player page, filed under the first letter of the id.
    pub fn player_url(&self) -> Result<Option<String>, ConfigError> {
        let Some(id) = &self.player else {
            return Ok(None);
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(ConfigError::EmptyPlayer);
        }
        let initial: String = id.chars().take(1).collect();
        self.join(&format!("/players/{initial}/{id}.html")).map(Some)
    }
}
