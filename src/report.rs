//! Chemistry report: per-slot multipliers, boosted points and projected
//! connectors for one roster, printable as text or JSON.

use crate::chemistry::Chemistry;
use crate::connections::{project_all, Edge};
use crate::layout::GeometryProvider;
use crate::roster::{Roster, SlotId};
use serde::Serialize;
use std::fmt::{self, Write as _};

#[derive(Debug, Serialize)]
pub struct SlotLine {
    pub slot: SlotId,
    pub player: Option<String>,
    pub team: Option<String>,
    pub college: Option<String>,
    pub multiplier: f64,
    pub points: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub chemistry_enabled: bool,
    pub slots: Vec<SlotLine>,
    pub bench: Vec<String>,
    pub active_multipliers: usize,
    pub team_total: f64,
    pub edges: Vec<Edge>,
}

impl Report {
    pub fn build<P>(roster: &Roster, chemistry: Chemistry, layout: &P) -> Self
    where
        P: GeometryProvider + ?Sized,
    {
        let slots = chemistry
            .multipliers(roster)
            .into_iter()
            .map(|(slot, multiplier)| {
                let player = roster.get(slot);
                SlotLine {
                    slot,
                    player: player.map(|p| p.name.clone()),
                    team: player.and_then(|p| p.team()).map(str::to_string),
                    college: player.and_then(|p| p.college()).map(str::to_string),
                    multiplier,
                    points: chemistry.boosted_points(roster, slot),
                }
            })
            .collect();

        // Connectors only mean something while chemistry is on.
        let edges = if chemistry.enabled {
            project_all(layout, roster)
        } else {
            Vec::new()
        };

        Report {
            chemistry_enabled: chemistry.enabled,
            slots,
            bench: roster.bench().iter().map(|p| p.name.clone()).collect(),
            active_multipliers: chemistry.active_count(roster),
            team_total: chemistry.team_total(roster),
            edges,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.chemistry_enabled { "ON" } else { "OFF" };
        writeln!(f, "Chemistry {} - {} active multipliers", status, self.active_multipliers)?;
        writeln!(f)?;
        for line in &self.slots {
            let mut who = line.player.clone().unwrap_or_else(|| "(empty)".to_string());
            if let Some(team) = &line.team {
                write!(who, " {}", team)?;
            }
            if let Some(college) = &line.college {
                write!(who, " - {}", college)?;
            }
            write!(f, "{:<6} {:<44} {:.1}x", line.slot.name(), who, line.multiplier)?;
            if let Some(points) = line.points {
                write!(f, "  {:.1} pts", points)?;
            }
            writeln!(f)?;
        }
        if !self.bench.is_empty() {
            writeln!(f, "Bench  {}", self.bench.join(", "))?;
        }
        writeln!(f, "Team total: {:.1} pts", self.team_total)?;

        if !self.edges.is_empty() {
            writeln!(f)?;
            for edge in &self.edges {
                let g = &edge.geometry;
                writeln!(
                    f,
                    "{:>5} - {:<5} ({:.0},{:.0}) -> ({:.0},{:.0})  {}",
                    edge.from.name(),
                    edge.to.name(),
                    g.x1,
                    g.y1,
                    g.x2,
                    g.y2,
                    g.color
                )?;
            }
        }
        Ok(())
    }
}
