//! Roster source facade - dispatches to the demo fixture or the live Sleeper loader.
//! - **Demo**: built-in all-Eagles lineup, no I/O
//! - **Live**: league rosters from the Sleeper API plus the local players.json

use crate::config::AppConfig;
use crate::error::Result;
use crate::roster::Roster;
use crate::sleeper::{load_players, SleeperClient};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Where the roster comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RosterSource {
    #[default]
    Demo,
    Live,
}

impl fmt::Display for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSource::Demo => write!(f, "Demo (built-in lineup)"),
            RosterSource::Live => write!(f, "Live (Sleeper API)"),
        }
    }
}

impl FromStr for RosterSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "demo" => Ok(RosterSource::Demo),
            "live" => Ok(RosterSource::Live),
            other => Err(format!("unknown roster source '{}'", other)),
        }
    }
}

/// Main entry point for loading a roster.
/// `owner` selects a Sleeper roster by owner id; ignored in demo mode.
pub async fn load_roster(source: RosterSource, config: &AppConfig, owner: Option<&str>) -> Result<Roster> {
    info!("Loading roster from {}", source);
    match source {
        RosterSource::Demo => Ok(crate::demo::demo_roster()),
        RosterSource::Live => {
            // players.json is large; parse it off the async runtime
            let path = config.players_path.clone();
            let players = tokio::task::spawn_blocking(move || load_players(&path)).await??;
            let client = SleeperClient::new(config)?;
            client.fetch_team(owner, &players).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn test_source_display() {
        assert_eq!(format!("{}", RosterSource::Demo), "Demo (built-in lineup)");
        assert_eq!(format!("{}", RosterSource::Live), "Live (Sleeper API)");
    }

    #[test]
    fn test_source_default_and_parse() {
        assert_eq!(RosterSource::default(), RosterSource::Demo);
        assert_eq!("LIVE".parse::<RosterSource>().unwrap(), RosterSource::Live);
        assert!("espn".parse::<RosterSource>().is_err());
    }

    #[tokio::test]
    async fn test_demo_needs_no_io() {
        let config = AppConfig {
            players_path: "/nonexistent/players.json".into(),
            ..AppConfig::default()
        };
        let roster = load_roster(RosterSource::Demo, &config, None).await.unwrap();
        assert_eq!(roster.len(), 13);
    }

    #[tokio::test]
    async fn test_live_without_player_file_fails_before_network() {
        let config = AppConfig {
            players_path: "/nonexistent/players.json".into(),
            ..AppConfig::default()
        };
        let err = load_roster(RosterSource::Live, &config, None).await.unwrap_err();
        assert!(matches!(err, RosterError::FileRead { .. }));
    }
}
