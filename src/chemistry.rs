//! Chemistry engine.
//! Scores each occupied lineup slot by how many adjacent players share its
//! team and/or college. Pure functions over a roster snapshot; a missing
//! player or unknown slot yields the neutral multiplier instead of an error.
//!
//! Bonuses are accumulated in whole tenths so the sum is exact before it is
//! turned back into a multiplier.

use crate::adjacency::{neighbors_in, Link, ADJACENCY};
use crate::roster::{Player, Roster, SlotId};
use serde::Serialize;

pub const NEUTRAL: f64 = 1.0;

/// Shared-attribute strength between two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bond {
    /// Same team and same college.
    Strong,
    /// Same team or same college, not both.
    Weak,
    None,
}

impl Bond {
    /// Bonus in tenths of a multiplier point.
    pub fn tenths(self) -> u32 {
        match self {
            Bond::Strong => 2,
            Bond::Weak => 1,
            Bond::None => 0,
        }
    }
}

/// Compares two players. Blank teams and colleges never match.
pub fn bond_between(a: &Player, b: &Player) -> Bond {
    let same_team = matches!((a.team(), b.team()), (Some(x), Some(y)) if x == y);
    let same_college = matches!((a.college(), b.college()), (Some(x), Some(y)) if x == y);
    match (same_team, same_college) {
        (true, true) => Bond::Strong,
        (true, false) | (false, true) => Bond::Weak,
        (false, false) => Bond::None,
    }
}

/// Bond between whoever sits in two slots, `None` when either is empty.
pub fn slot_bond(roster: &Roster, a: SlotId, b: SlotId) -> Option<Bond> {
    if a == b {
        return None;
    }
    Some(bond_between(roster.get(a)?, roster.get(b)?))
}

/// Rounds to one decimal place, halves away from zero.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Chemistry multiplier for `slot`: 1.0 plus 0.2 per strong-bond neighbor and
/// 0.1 per weak-bond neighbor.
pub fn compute_multiplier(roster: &Roster, slot: SlotId) -> f64 {
    multiplier_with(&ADJACENCY, roster, slot)
}

/// As [`compute_multiplier`], keyed by slot name. Unknown names score 1.0.
pub fn compute_multiplier_by_name(roster: &Roster, slot: &str) -> f64 {
    match slot.parse::<SlotId>() {
        Ok(slot) => compute_multiplier(roster, slot),
        Err(_) => NEUTRAL,
    }
}

pub(crate) fn multiplier_with(table: &[Link], roster: &Roster, slot: SlotId) -> f64 {
    if roster.get(slot).is_none() {
        return NEUTRAL;
    }
    let tenths: u32 = neighbors_in(table, slot)
        .filter_map(|other| slot_bond(roster, slot, other))
        .map(Bond::tenths)
        .sum();
    round_tenth(NEUTRAL + f64::from(tenths) / 10.0)
}

/// Chemistry settings. With chemistry disabled every slot scores 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chemistry {
    pub enabled: bool,
}

impl Default for Chemistry {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Chemistry {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn multiplier(&self, roster: &Roster, slot: SlotId) -> f64 {
        if !self.enabled {
            return NEUTRAL;
        }
        compute_multiplier(roster, slot)
    }

    /// Multiplier for every starter slot, in slot order.
    pub fn multipliers(&self, roster: &Roster) -> Vec<(SlotId, f64)> {
        SlotId::STARTERS
            .iter()
            .map(|slot| (*slot, self.multiplier(roster, *slot)))
            .collect()
    }

    /// Number of starter slots currently earning a bonus.
    pub fn active_count(&self, roster: &Roster) -> usize {
        self.multipliers(roster)
            .into_iter()
            .filter(|(_, m)| *m > NEUTRAL)
            .count()
    }

    /// Base points of the player in `slot` scaled by its multiplier.
    pub fn boosted_points(&self, roster: &Roster, slot: SlotId) -> Option<f64> {
        let player = roster.get(slot)?;
        Some(player.points * self.multiplier(roster, slot))
    }

    /// Sum of boosted points over all starters.
    pub fn team_total(&self, roster: &Roster) -> f64 {
        SlotId::STARTERS
            .iter()
            .filter_map(|slot| self.boosted_points(roster, *slot))
            .sum()
    }
}
