//! Demo roster: an all-Eagles lineup with four bench players.
//! Used when no live league is requested.

use crate::roster::{Player, Position, Roster, SlotId};
use tracing::debug;

const PHOTO_BASE: &str = "https://sleepercdn.com/content/nfl/players/thumb";

// (id, name, position, slot, college, rank)
const DEMO_PLAYERS: [(&str, &str, Position, SlotId, &str, u32); 13] = [
    ("4039", "Jalen Hurts", Position::QB, SlotId::QB, "Oklahoma", 1),
    ("642", "D'Andre Swift", Position::RB, SlotId::RB1, "Georgia", 15),
    ("4034", "Kenneth Gainwell", Position::RB, SlotId::RB2, "Memphis", 45),
    ("147", "A.J. Brown", Position::WR, SlotId::WR1, "Ole Miss", 5),
    ("4038", "DeVonta Smith", Position::WR, SlotId::WR2, "Alabama", 12),
    ("515", "Dallas Goedert", Position::TE, SlotId::TE, "South Dakota State", 8),
    ("4149", "Quez Watkins", Position::WR, SlotId::Flex1, "Southern Miss", 65),
    ("2257", "Olamide Zaccheaus", Position::WR, SlotId::Flex2, "Virginia", 85),
    ("2307", "Jake Elliott", Position::K, SlotId::K, "Memphis", 3),
    ("2309", "Marcus Mariota", Position::QB, SlotId::Bench, "Oregon", 25),
    ("4035", "Rashaad Penny", Position::RB, SlotId::Bench, "San Diego State", 35),
    ("4381", "Britain Covey", Position::WR, SlotId::Bench, "Utah", 95),
    ("5849", "Grant Calcaterra", Position::TE, SlotId::Bench, "SMU", 28),
];

pub fn photo_url(player_id: &str) -> String {
    format!("{}/{}.jpg", PHOTO_BASE, player_id)
}

/// Players of the demo lineup, each already placed in its slot.
pub fn demo_players() -> Vec<Player> {
    DEMO_PLAYERS
        .iter()
        .map(|&(id, name, position, slot, college, rank)| Player {
            id: id.to_string(),
            name: name.to_string(),
            position,
            slot,
            team: "PHI".to_string(),
            college: Some(college.to_string()),
            points: 0.0,
            photo_url: photo_url(id),
            rank: Some(rank),
            status: Some("Active".to_string()),
        })
        .collect()
}

pub fn demo_roster() -> Roster {
    let mut roster = Roster::new();
    for player in demo_players() {
        let slot = player.slot;
        // The fixture only holds eligible placements.
        if let Err(e) = roster.assign(slot, player) {
            debug!("Skipping demo player: {}", e);
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::compute_multiplier;

    #[test]
    fn test_demo_roster_is_full() {
        let roster = demo_roster();
        for slot in SlotId::STARTERS {
            assert!(roster.get(slot).is_some(), "{}", slot);
        }
        assert_eq!(roster.bench().len(), 4);
        assert_eq!(Roster::from_players(demo_players()).unwrap(), roster);
    }

    #[test]
    fn test_demo_multipliers() {
        let roster = demo_roster();
        // Same team everywhere: every neighbor is at least a weak bond.
        assert_eq!(compute_multiplier(&roster, SlotId::QB), 1.4);
        // Gainwell and Elliott both went to Memphis.
        assert_eq!(compute_multiplier(&roster, SlotId::RB2), 1.5);
        assert_eq!(compute_multiplier(&roster, SlotId::K), 1.5);
        assert_eq!(compute_multiplier(&roster, SlotId::Bench), 1.0);
    }

    #[test]
    fn test_photo_url() {
        assert_eq!(
            photo_url("4039"),
            "https://sleepercdn.com/content/nfl/players/thumb/4039.jpg"
        );
    }
}
