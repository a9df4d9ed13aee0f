use crate::constants::{
    default_table_sources, DEFAULT_EMPTY_MARKERS, DEFAULT_LEAGUE, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_PROJECTIONS_URL, DEFAULT_PROP_SUFFIX, DEFAULT_SENTINEL, DEFAULT_TABLE_SELECTORS,
    DEFAULT_WAIT_BUDGET_MS,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub tables: TablesConfig,
    pub projections: ProjectionsConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Prometheus textfile written after each run
    pub textfile: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Serve sources from saved snapshots instead of the network
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            user_agent: concat!("props_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            snapshot_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    pub sources: Vec<String>,
    pub selectors: Vec<String>,
    pub wait_budget_ms: u64,
    pub poll_interval_ms: u64,
    pub prop_suffix: String,
    pub empty_markers: Vec<String>,
    pub sentinel: String,
    pub output: OutputConfig,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            sources: default_table_sources(),
            selectors: DEFAULT_TABLE_SELECTORS.iter().map(|s| s.to_string()).collect(),
            wait_budget_ms: DEFAULT_WAIT_BUDGET_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            prop_suffix: DEFAULT_PROP_SUFFIX.to_string(),
            empty_markers: DEFAULT_EMPTY_MARKERS.iter().map(|s| s.to_string()).collect(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            output: OutputConfig::Csv {
                path: PathBuf::from("output/sports_data.csv"),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionsConfig {
    pub api_url: String,
    pub league: String,
    pub output: OutputConfig,
}

impl Default for ProjectionsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PROJECTIONS_URL.to_string(),
            league: DEFAULT_LEAGUE.to_string(),
            output: OutputConfig::Csv {
                path: PathBuf::from("output/pp_odds.csv"),
            },
        }
    }
}

/// Where a pipeline publishes its table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputConfig {
    Csv {
        path: PathBuf,
    },
    Sheets {
        spreadsheet_id: String,
        worksheet: String,
        #[serde(default)]
        clear_range: Option<String>,
    },
    Stdout,
}

impl Config {
    /// Reads `path`; a missing file means built-in defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tables.selectors.is_empty() {
            return Err(ScraperError::Config("tables.selectors must not be empty".into()));
        }
        if self.projections.league.trim().is_empty() {
            return Err(ScraperError::Config("projections.league must not be empty".into()));
        }
        Ok(())
    }
}
