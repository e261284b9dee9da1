//! Roster model.
//! Lineup slots, real-world positions, players and the slot → player mapping.
//! The position-eligibility table lives here; the roster builder uses it to
//! reject placements such as a kicker in a Flex slot.

use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A named position in the fantasy lineup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotId {
    QB,
    RB1,
    RB2,
    WR1,
    WR2,
    Flex1,
    Flex2,
    TE,
    K,
    Bench,
}

impl SlotId {
    /// Every single-player starter slot, in display order.
    pub const STARTERS: [SlotId; 9] = [
        SlotId::QB,
        SlotId::RB1,
        SlotId::RB2,
        SlotId::WR1,
        SlotId::WR2,
        SlotId::Flex1,
        SlotId::Flex2,
        SlotId::TE,
        SlotId::K,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SlotId::QB => "QB",
            SlotId::RB1 => "RB1",
            SlotId::RB2 => "RB2",
            SlotId::WR1 => "WR1",
            SlotId::WR2 => "WR2",
            SlotId::Flex1 => "Flex1",
            SlotId::Flex2 => "Flex2",
            SlotId::TE => "TE",
            SlotId::K => "K",
            SlotId::Bench => "Bench",
        }
    }

    /// Positions allowed to occupy this slot.
    pub fn eligible_positions(self) -> &'static [Position] {
        use Position::*;
        match self {
            SlotId::QB => &[QB],
            SlotId::RB1 | SlotId::RB2 => &[RB],
            SlotId::WR1 | SlotId::WR2 => &[WR],
            SlotId::TE => &[TE],
            SlotId::Flex1 | SlotId::Flex2 => &[RB, WR, TE],
            SlotId::K => &[K],
            SlotId::Bench => &[QB, RB, WR, TE, K],
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlotId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slot = match s.trim().to_ascii_lowercase().as_str() {
            "qb" => SlotId::QB,
            "rb1" => SlotId::RB1,
            "rb2" => SlotId::RB2,
            "wr1" => SlotId::WR1,
            "wr2" => SlotId::WR2,
            "flex1" => SlotId::Flex1,
            "flex2" => SlotId::Flex2,
            "te" => SlotId::TE,
            "k" => SlotId::K,
            "bench" => SlotId::Bench,
            _ => return Err(RosterError::UnknownSlot(s.to_string())),
        };
        Ok(slot)
    }
}

/// A player's real-world football position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
}

impl Position {
    pub fn name(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            _ => Err(RosterError::UnknownPosition(s.to_string())),
        }
    }
}

/// Whether `position` may occupy `slot`.
pub fn can_play(position: Position, slot: SlotId) -> bool {
    slot.eligible_positions().contains(&position)
}

/// All slots (bench included) a player at `position` could be placed in.
pub fn valid_slots(position: Position) -> Vec<SlotId> {
    SlotId::STARTERS
        .iter()
        .copied()
        .chain(std::iter::once(SlotId::Bench))
        .filter(|slot| can_play(position, *slot))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub slot: SlotId,
    pub team: String,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Player {
    /// Non-empty college name, if any. Empty strings count as no college.
    pub fn college(&self) -> Option<&str> {
        self.college.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Non-empty team abbreviation, if any.
    pub fn team(&self) -> Option<&str> {
        let team = self.team.trim();
        (!team.is_empty()).then_some(team)
    }

    /// Copy of this player placed into another slot.
    pub fn placed(&self, slot: SlotId) -> Player {
        Player {
            slot,
            ..self.clone()
        }
    }
}

/// A lineup: one optional player per starter slot plus the bench.
/// Deserialized rosters go through [`Roster::assign`], so every placement is
/// eligible and each player's `slot` matches where it sits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRoster")]
pub struct Roster {
    starters: BTreeMap<SlotId, Player>,
    bench: Vec<Player>,
}

#[derive(Deserialize)]
struct RawRoster {
    #[serde(default)]
    starters: BTreeMap<SlotId, Player>,
    #[serde(default)]
    bench: Vec<Player>,
}

impl TryFrom<RawRoster> for Roster {
    type Error = RosterError;

    fn try_from(raw: RawRoster) -> Result<Self, Self::Error> {
        let mut roster = Roster::new();
        for (slot, player) in raw.starters {
            roster.assign(slot, player)?;
        }
        for player in raw.bench {
            roster.assign(SlotId::Bench, player)?;
        }
        Ok(roster)
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from players that already carry their slot.
    /// Fails on the first ineligible placement.
    pub fn from_players<I>(players: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = Player>,
    {
        let mut roster = Roster::new();
        for player in players {
            let slot = player.slot;
            roster.assign(slot, player)?;
        }
        Ok(roster)
    }

    /// Player in a starter slot. Always `None` for `Bench`.
    pub fn get(&self, slot: SlotId) -> Option<&Player> {
        self.starters.get(&slot)
    }

    pub fn is_occupied(&self, slot: SlotId) -> bool {
        match slot {
            SlotId::Bench => !self.bench.is_empty(),
            _ => self.starters.contains_key(&slot),
        }
    }

    pub fn bench(&self) -> &[Player] {
        &self.bench
    }

    /// Starters in slot order.
    pub fn starters(&self) -> impl Iterator<Item = (SlotId, &Player)> {
        self.starters.iter().map(|(slot, player)| (*slot, player))
    }

    /// Places `player` into `slot`, replacing any starter already there.
    /// Bench placements are appended. Returns the displaced starter.
    pub fn assign(&mut self, slot: SlotId, player: Player) -> Result<Option<Player>, RosterError> {
        if !can_play(player.position, slot) {
            return Err(RosterError::IneligiblePosition {
                player: player.name.clone(),
                position: player.position,
                slot,
            });
        }
        let player = player.placed(slot);
        if slot == SlotId::Bench {
            self.bench.push(player);
            return Ok(None);
        }
        Ok(self.starters.insert(slot, player))
    }

    pub fn remove(&mut self, slot: SlotId) -> Option<Player> {
        self.starters.remove(&slot)
    }

    /// Empties every starter slot and the bench.
    pub fn clear(&mut self) {
        self.starters.clear();
        self.bench.clear();
    }

    pub fn len(&self) -> usize {
        self.starters.len() + self.bench.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Case-insensitive substring filter over name, team, college and position.
/// An empty term returns the whole pool.
pub fn search<'a>(pool: &'a [Player], term: &str) -> Vec<&'a Player> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return pool.iter().collect();
    }
    pool.iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&term)
                || p.team.to_lowercase().contains(&term)
                || p.college().is_some_and(|c| c.to_lowercase().contains(&term))
                || p.position.name().to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn test_player(id: &str, position: Position, slot: SlotId, team: &str, college: &str) -> Player {
    Player {
        id: id.to_string(),
        name: format!("Player {}", id),
        position,
        slot,
        team: team.to_string(),
        college: Some(college.to_string()),
        points: 10.0,
        photo_url: String::new(),
        rank: None,
        status: None,
    }
}
