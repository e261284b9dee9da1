//! Config module.
//! Reads roster_config.json (league, player cache path, HTTP tuning, chemistry toggle).
//! Uses serde for JSON; every field has a default so partial files work.
//! Falls back to defaults when no file exists. `SLEEPER_LEAGUE_ID` overrides the league.

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "roster_config.json";
pub const LEAGUE_ENV: &str = "SLEEPER_LEAGUE_ID";

fn default_base_url() -> String {
    "https://api.sleeper.app/v1".to_string()
}

fn default_league_id() -> String {
    "1180234285068509184".to_string()
}

fn default_players_path() -> PathBuf {
    PathBuf::from("players.json")
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_league_id")]
    pub league_id: String,
    /// Local players.json used to resolve Sleeper player ids.
    #[serde(default = "default_players_path")]
    pub players_path: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after a failed request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_true")]
    pub chemistry_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            league_id: default_league_id(),
            players_path: default_players_path(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            chemistry_enabled: true,
        }
    }
}

impl AppConfig {
    /// Loads `path` if given (it must exist), otherwise `roster_config.json`
    /// in the working directory if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };
        if let Ok(league) = std::env::var(LEAGUE_ENV) {
            if !league.trim().is_empty() {
                config.league_id = league.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| RosterError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| RosterError::FileParsing {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
