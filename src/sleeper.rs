//! Sleeper API roster loader.
//! Fetches league rosters over HTTP, resolves player ids against a local
//! players.json dump and builds a `Roster`.
//! Starters arrive as an ordered id list (QB, RB1, RB2, WR1, WR2, TE, Flex1, Flex2, K);
//! "0" marks an empty starter. Remaining roster players go to the bench.
//! Ids that cannot be resolved become empty slots, never errors.

use crate::config::AppConfig;
use crate::demo::photo_url;
use crate::error::{Result, RosterError};
use crate::roster::{can_play, Player, Position, Roster, SlotId};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

const RETRY_DELAY_MS: u64 = 500;
const EMPTY_STARTER: &str = "0";

/// Order in which Sleeper lists starters.
pub const STARTER_ORDER: [SlotId; 9] = [
    SlotId::QB,
    SlotId::RB1,
    SlotId::RB2,
    SlotId::WR1,
    SlotId::WR2,
    SlotId::TE,
    SlotId::Flex1,
    SlotId::Flex2,
    SlotId::K,
];

// *************** Response Types ***************

#[derive(Clone, Debug, Deserialize)]
pub struct SleeperRoster {
    #[serde(default)]
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SleeperUser {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }
}

/// One entry of players.json, keyed by player id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SleeperPlayer {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub search_rank: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub fantasy_points: Option<f64>,
}

impl SleeperPlayer {
    fn display_name(&self, id: &str) -> String {
        if let Some(name) = self.full_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => id.to_string(),
        }
    }

    /// Converts to a roster player in `slot`. `None` if the position is not
    /// a fantasy offense position or cannot play the slot.
    pub fn to_player(&self, id: &str, slot: SlotId) -> Option<Player> {
        let position: Position = self.position.as_deref()?.parse().ok()?;
        if !can_play(position, slot) {
            return None;
        }
        Some(Player {
            id: id.to_string(),
            name: self.display_name(id),
            position,
            slot,
            team: self.team.clone().unwrap_or_default(),
            college: self.college.clone(),
            points: self.fantasy_points.unwrap_or(0.0),
            photo_url: photo_url(id),
            rank: self.search_rank,
            status: self.status.clone(),
        })
    }
}

pub type PlayerIndex = HashMap<String, SleeperPlayer>;

// *************** Public API ***************

/// Reads the players.json dump.
pub fn load_players(path: &Path) -> Result<PlayerIndex> {
    let text = fs::read_to_string(path).map_err(|source| RosterError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let players: PlayerIndex = serde_json::from_str(&text).map_err(|source| RosterError::FileParsing {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

/// Picks the roster owned by `owner`, or the first roster when no owner is given.
pub fn select_roster<'a>(
    rosters: &'a [SleeperRoster],
    owner: Option<&str>,
    league_id: &str,
) -> Result<&'a SleeperRoster> {
    let first = rosters
        .first()
        .ok_or_else(|| RosterError::EmptyLeague(league_id.to_string()))?;
    let Some(owner) = owner else {
        return Ok(first);
    };
    rosters
        .iter()
        .find(|r| r.owner_id.as_deref() == Some(owner))
        .ok_or_else(|| RosterError::OwnerNotFound {
            owner: owner.to_string(),
            league: league_id.to_string(),
        })
}

/// Builds a roster from Sleeper ids. Unknown ids and ineligible players are
/// logged and left out.
pub fn build_roster(sleeper: &SleeperRoster, players: &PlayerIndex) -> Roster {
    let mut roster = Roster::new();
    let starters = sleeper.starters.as_deref().unwrap_or_default();

    for (id, slot) in starters.iter().zip(STARTER_ORDER) {
        if id == EMPTY_STARTER {
            continue;
        }
        place(&mut roster, id, slot, players);
    }

    let started: HashSet<&str> = starters.iter().map(String::as_str).collect();
    for id in sleeper.players.as_deref().unwrap_or_default() {
        if !started.contains(id.as_str()) {
            place(&mut roster, id, SlotId::Bench, players);
        }
    }

    debug!(
        "Built roster {} with {} players",
        sleeper.roster_id,
        roster.len()
    );
    roster
}

fn place(roster: &mut Roster, id: &str, slot: SlotId, players: &PlayerIndex) {
    let Some(entry) = players.get(id) else {
        warn!("Player {} not found in local player data", id);
        return;
    };
    match entry.to_player(id, slot) {
        Some(player) => {
            if let Err(e) = roster.assign(slot, player) {
                warn!("{}", e);
            }
        }
        None => warn!(
            "Player {} ({}) cannot fill {}",
            id,
            entry.position.as_deref().unwrap_or("?"),
            slot
        ),
    }
}

/// HTTP client for one Sleeper league.
pub struct SleeperClient {
    client: Client,
    base_url: String,
    league_id: String,
    max_retries: u32,
}

impl SleeperClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            league_id: config.league_id.clone(),
            max_retries: config.max_retries,
        })
    }

    pub fn league_id(&self) -> &str {
        &self.league_id
    }

    pub async fn rosters(&self) -> Result<Vec<SleeperRoster>> {
        let path = format!("league/{}/rosters", self.league_id);
        self.get_with_retry(&path).await
    }

    pub async fn users(&self) -> Result<Vec<SleeperUser>> {
        let path = format!("league/{}/users", self.league_id);
        self.get_with_retry(&path).await
    }

    /// Fetches the league, picks the owner's roster and resolves its players.
    pub async fn fetch_team(&self, owner: Option<&str>, players: &PlayerIndex) -> Result<Roster> {
        let rosters = self.rosters().await?;
        info!("Received {} rosters for league {}", rosters.len(), self.league_id);
        let chosen = select_roster(&rosters, owner, &self.league_id)?;
        Ok(build_roster(chosen, players))
    }

    async fn get_with_retry<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let attempts = self.max_retries + 1;
        let mut attempt = 1;
        loop {
            match self.get(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts => {
                    warn!("Sleeper request attempt {}/{} failed: {}", attempt, attempts, e);
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RosterError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

// *************** Tests ***************

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn index() -> PlayerIndex {
        let json = r#"{
            "4039": {"player_id": "4039", "full_name": "Jalen Hurts", "position": "QB", "team": "PHI", "college": "Oklahoma", "search_rank": 1},
            "147":  {"player_id": "147", "full_name": "A.J. Brown", "position": "WR", "team": "PHI", "college": "Ole Miss"},
            "515":  {"player_id": "515", "first_name": "Dallas", "last_name": "Goedert", "position": "TE", "team": "PHI"},
            "2307": {"player_id": "2307", "full_name": "Jake Elliott", "position": "K", "team": "PHI", "college": "Memphis"},
            "PHI":  {"player_id": "PHI", "position": "DEF", "team": "PHI"}
        }"#;
        serde_json::from_str(json).unwrap()
    }

    fn rosters() -> Vec<SleeperRoster> {
        let json = r#"[
            {"roster_id": 1, "owner_id": "u1", "starters": ["4039", "0", "0", "147", "0", "515", "0", "0", "2307"], "players": ["4039", "147", "515", "2307", "PHI", "999"]},
            {"roster_id": 2, "owner_id": "u2", "starters": null, "players": null}
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_starters_map_in_sleeper_order() {
        let rosters = rosters();
        let roster = build_roster(&rosters[0], &index());
        assert_eq!(roster.get(SlotId::QB).unwrap().name, "Jalen Hurts");
        assert_eq!(roster.get(SlotId::WR1).unwrap().id, "147");
        assert_eq!(roster.get(SlotId::TE).unwrap().name, "Dallas Goedert");
        assert_eq!(roster.get(SlotId::K).unwrap().college(), Some("Memphis"));
        assert!(roster.get(SlotId::RB1).is_none());
        assert!(roster.get(SlotId::Flex1).is_none());
    }

    #[test]
    fn test_unresolvable_players_stay_off_the_bench() {
        let rosters = rosters();
        let roster = build_roster(&rosters[0], &index());
        // "PHI" is a defense and "999" is unknown
        assert!(roster.bench().is_empty());
    }

    #[test]
    fn test_null_lists_build_empty_roster() {
        let rosters = rosters();
        assert!(build_roster(&rosters[1], &index()).is_empty());
    }

    #[test]
    fn test_select_roster_by_owner() {
        let rosters = rosters();
        assert_eq!(select_roster(&rosters, None, "L").unwrap().roster_id, 1);
        assert_eq!(select_roster(&rosters, Some("u2"), "L").unwrap().roster_id, 2);
        assert!(matches!(
            select_roster(&rosters, Some("nobody"), "L"),
            Err(RosterError::OwnerNotFound { .. })
        ));
        assert!(matches!(
            select_roster(&[], None, "L"),
            Err(RosterError::EmptyLeague(_))
        ));
    }

    #[test]
    fn test_to_player_rejects_ineligible_slot() {
        let players = index();
        assert!(players["2307"].to_player("2307", SlotId::Flex1).is_none());
        let wr = players["147"].to_player("147", SlotId::Flex2).unwrap();
        assert_eq!(wr.slot, SlotId::Flex2);
        assert_eq!(wr.photo_url, photo_url("147"));
    }

    #[test]
    fn test_load_players_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"1": {{"player_id": "1", "full_name": "A", "position": "RB"}}}}"#).unwrap();
        let players = load_players(file.path()).unwrap();
        assert_eq!(players.len(), 1);
        assert!(load_players(Path::new("/nonexistent/players.json")).is_err());
    }

    #[tokio::test]
    #[ignore = "requires network access to api.sleeper.app"]
    async fn test_real_league_rosters() {
        // Run with: cargo test test_real_league_rosters -- --ignored
        let client = SleeperClient::new(&AppConfig::default()).unwrap();
        let rosters = client.rosters().await;
        println!("Result: {:?}", rosters.as_ref().map(Vec::len));
        assert!(rosters.is_ok());
    }
}
