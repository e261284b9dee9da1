//! Connection projector.
//! Turns measured card geometry into drawable line segments, one per
//! adjacency pair, colored by the bond between the two players.
//! Missing geometry omits the edge; nothing here can fail.

use crate::adjacency::{link_between, EdgeRoute, ADJACENCY};
use crate::chemistry::{slot_bond, Bond};
use crate::layout::{CardGeometry, GeometryProvider};
use crate::roster::{Roster, SlotId};
use serde::{Serialize, Serializer};
use std::fmt;

/// Lines stop this far inside the card edge.
const EDGE_EPSILON: f64 = 1.0;
/// Horizontal inset from the card's side for top-baseline anchors.
const TOP_INSET: f64 = 12.0;
/// Drop below the card's top edge for top-baseline anchors.
const TOP_DROP: f64 = 6.0;
/// Opacity factor for pairs with no bond.
const UNBONDED_OPACITY: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    /// Default line color for most pairs.
    pub const LINK: Rgba = Rgba::new(255, 255, 255, 0.6);
    pub const STRONG_BOND: Rgba = Rgba::new(255, 215, 0, 1.0);
    pub const WEAK_BOND: Rgba = Rgba::new(76, 175, 80, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Same color with its alpha scaled by `factor`.
    pub fn faded(self, factor: f32) -> Rgba {
        if self.is_transparent() {
            return Rgba::TRANSPARENT;
        }
        Rgba {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A drawable segment between two cards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Rgba,
}

impl EdgeGeometry {
    fn point(x: f64, y: f64, color: Rgba) -> Self {
        EdgeGeometry { x1: x, y1: y, x2: x, y2: y, color }
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// A projected adjacency edge with its endpoints' slots.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub from: SlotId,
    pub to: SlotId,
    pub bond: Bond,
    pub geometry: EdgeGeometry,
}

/// Line color for a bond. `fallback` is the pair's configured default.
pub fn bond_color(bond: Bond, fallback: Rgba) -> Rgba {
    match bond {
        Bond::Strong => Rgba::STRONG_BOND,
        Bond::Weak => Rgba::WEAK_BOND,
        Bond::None => fallback.faded(UNBONDED_OPACITY),
    }
}

/// Segment and color for the connector between `from_slot` and `to_slot`.
/// Returns `None` if either card has not been measured.
pub fn compute_edge(
    from: Option<&CardGeometry>,
    to: Option<&CardGeometry>,
    from_slot: SlotId,
    to_slot: SlotId,
    roster: &Roster,
) -> Option<EdgeGeometry> {
    let (from, to) = (from?, to?);
    let (default_color, route) = match link_between(from_slot, to_slot) {
        Some(link) => (link.default_color, link.route),
        None => (Rgba::LINK, EdgeRoute::Radial),
    };
    let bond = slot_bond(roster, from_slot, to_slot).unwrap_or(Bond::None);
    let color = bond_color(bond, default_color);

    if from.cx == to.cx && from.cy == to.cy {
        return Some(EdgeGeometry::point(from.cx, from.cy, color));
    }

    let edge = match route {
        EdgeRoute::Radial => radial(from, to, color),
        EdgeRoute::TopBaseline => top_baseline(from, to, color),
    };
    Some(edge)
}

/// Center-to-center line pulled in to each card's bounding radius.
fn radial(from: &CardGeometry, to: &CardGeometry, color: Rgba) -> EdgeGeometry {
    let (dx, dy) = (to.cx - from.cx, to.cy - from.cy);
    let dist = dx.hypot(dy);
    if dist == 0.0 {
        return EdgeGeometry::point(from.cx, from.cy, color);
    }
    let (ux, uy) = (dx / dist, dy / dist);
    let pull_from = (from.radius() - EDGE_EPSILON).max(0.0);
    let pull_to = (to.radius() - EDGE_EPSILON).max(0.0);

    // Overlapping cards leave no visible gap to draw in.
    if pull_from + pull_to >= dist {
        let t = pull_from / (pull_from + pull_to).max(f64::EPSILON);
        return EdgeGeometry::point(from.cx + dx * t, from.cy + dy * t, color);
    }

    EdgeGeometry {
        x1: from.cx + ux * pull_from,
        y1: from.cy + uy * pull_from,
        x2: to.cx - ux * pull_to,
        y2: to.cy - uy * pull_to,
        color,
    }
}

/// Connector anchored just under the top edge of both cards, on the side of
/// each card facing the other.
fn top_baseline(from: &CardGeometry, to: &CardGeometry, color: Rgba) -> EdgeGeometry {
    let anchor = |card: &CardGeometry, toward: f64| {
        let side = if toward >= card.cx { 1.0 } else { -1.0 };
        let reach = (card.width / 2.0 - TOP_INSET).max(0.0);
        (card.cx + side * reach, card.cy - card.height / 2.0 + TOP_DROP)
    };
    let (x1, y1) = anchor(from, to.cx);
    let (x2, y2) = anchor(to, from.cx);
    EdgeGeometry { x1, y1, x2, y2, color }
}

/// Projects every adjacency pair whose cards the provider can measure.
pub fn project_all<P>(provider: &P, roster: &Roster) -> Vec<Edge>
where
    P: GeometryProvider + ?Sized,
{
    ADJACENCY
        .iter()
        .filter_map(|link| {
            let from = provider.geometry(link.a);
            let to = provider.geometry(link.b);
            let geometry = compute_edge(from.as_ref(), to.as_ref(), link.a, link.b, roster)?;
            Some(Edge {
                from: link.a,
                to: link.b,
                bond: slot_bond(roster, link.a, link.b).unwrap_or(Bond::None),
                geometry,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MeasuredGeometry;
    use crate::roster::{test_player, Position};

    fn card(cx: f64, cy: f64) -> CardGeometry {
        CardGeometry::new(cx, cy, 100.0, 140.0)
    }

    fn wr_roster(a: (&str, &str), b: (&str, &str)) -> Roster {
        Roster::from_players([
            test_player("1", Position::WR, SlotId::WR1, a.0, a.1),
            test_player("2", Position::WR, SlotId::WR2, b.0, b.1),
        ])
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_missing_geometry_omits_edge() {
        let roster = Roster::new();
        let g = card(0.0, 0.0);
        assert!(compute_edge(None, Some(&g), SlotId::QB, SlotId::TE, &roster).is_none());
        assert!(compute_edge(Some(&g), None, SlotId::QB, SlotId::TE, &roster).is_none());
        assert!(compute_edge(None, None, SlotId::QB, SlotId::TE, &roster).is_none());
    }

    #[test]
    fn test_radial_endpoints_clip_to_card_radius() {
        let roster = Roster::new();
        let (a, b) = (card(0.0, 0.0), card(400.0, 0.0));
        let edge = compute_edge(Some(&a), Some(&b), SlotId::QB, SlotId::TE, &roster).unwrap();
        // radius 70, minus the one-pixel epsilon
        assert!(close(edge.x1, 69.0));
        assert!(close(edge.x2, 331.0));
        assert!(close(edge.y1, 0.0) && close(edge.y2, 0.0));
    }

    #[test]
    fn test_radial_diagonal_stays_on_center_line() {
        let roster = Roster::new();
        let (a, b) = (card(0.0, 0.0), card(300.0, 400.0));
        let edge = compute_edge(Some(&a), Some(&b), SlotId::QB, SlotId::RB1, &roster).unwrap();
        assert!(close(edge.x1, 69.0 * 0.6) && close(edge.y1, 69.0 * 0.8));
        assert!(close(edge.x2, 300.0 - 69.0 * 0.6) && close(edge.y2, 400.0 - 69.0 * 0.8));
    }

    #[test]
    fn test_zero_distance_is_degenerate_point() {
        let roster = Roster::new();
        let a = card(50.0, 60.0);
        let edge = compute_edge(Some(&a), Some(&a), SlotId::QB, SlotId::TE, &roster).unwrap();
        assert_eq!((edge.x1, edge.y1), (50.0, 60.0));
        assert_eq!((edge.x2, edge.y2), (50.0, 60.0));
        assert!(!edge.x1.is_nan() && !edge.y2.is_nan());
    }

    #[test]
    fn test_overlapping_cards_collapse() {
        let roster = Roster::new();
        let (a, b) = (card(0.0, 0.0), card(100.0, 0.0));
        let edge = compute_edge(Some(&a), Some(&b), SlotId::QB, SlotId::TE, &roster).unwrap();
        assert!(close(edge.length(), 0.0));
        assert!(close(edge.x1, 50.0));
    }

    #[test]
    fn test_wide_receivers_use_top_connector() {
        let roster = wr_roster(("PHI", "Alabama"), ("KC", "Georgia"));
        let (wr1, wr2) = (card(0.0, 200.0), card(800.0, 200.0));
        let edge = compute_edge(Some(&wr1), Some(&wr2), SlotId::WR1, SlotId::WR2, &roster).unwrap();
        // top edge at 200 - 70, dropped 6; inset 12 from the facing side
        assert!(close(edge.y1, 136.0) && close(edge.y2, 136.0));
        assert!(close(edge.x1, 38.0));
        assert!(close(edge.x2, 762.0));

        let reversed = compute_edge(Some(&wr2), Some(&wr1), SlotId::WR2, SlotId::WR1, &roster).unwrap();
        assert!(close(reversed.x1, 762.0) && close(reversed.x2, 38.0));
    }

    #[test]
    fn test_college_only_is_weak_color() {
        let roster = wr_roster(("PHI", "Alabama"), ("KC", "Alabama"));
        let (wr1, wr2) = (card(0.0, 0.0), card(800.0, 0.0));
        let edge = compute_edge(Some(&wr1), Some(&wr2), SlotId::WR1, SlotId::WR2, &roster).unwrap();
        assert_eq!(edge.color, Rgba::WEAK_BOND);
        assert_ne!(edge.color, Rgba::STRONG_BOND);
    }

    #[test]
    fn test_strong_and_unbonded_colors() {
        let strong = wr_roster(("PHI", "Alabama"), ("PHI", "Alabama"));
        let none = wr_roster(("PHI", "Alabama"), ("KC", "Georgia"));
        let (a, b) = (card(0.0, 0.0), card(800.0, 0.0));

        let edge = compute_edge(Some(&a), Some(&b), SlotId::WR1, SlotId::WR2, &strong).unwrap();
        assert_eq!(edge.color, Rgba::STRONG_BOND);

        // WR1-WR2 defaults to transparent and stays transparent when faded
        let edge = compute_edge(Some(&a), Some(&b), SlotId::WR1, SlotId::WR2, &none).unwrap();
        assert!(edge.color.is_transparent());

        // QB-TE uses the regular link color at reduced opacity
        let edge = compute_edge(Some(&a), Some(&b), SlotId::QB, SlotId::TE, &none).unwrap();
        assert_eq!(edge.color, Rgba::LINK.faded(UNBONDED_OPACITY));
        assert!(edge.color.a < Rgba::LINK.a);
    }

    #[test]
    fn test_unlinked_pair_falls_back_to_radial_link_color() {
        let roster = Roster::new();
        let (a, b) = (card(0.0, 0.0), card(400.0, 0.0));
        let edge = compute_edge(Some(&a), Some(&b), SlotId::QB, SlotId::K, &roster).unwrap();
        assert!(close(edge.x1, 69.0) && close(edge.x2, 331.0));
        assert!(close(edge.y1, 0.0) && close(edge.y2, 0.0));
        assert_eq!(edge.color, Rgba::LINK.faded(UNBONDED_OPACITY));
    }

    #[test]
    fn test_rgba_display() {
        assert_eq!(Rgba::STRONG_BOND.to_string(), "rgba(255, 215, 0, 1)");
    }

    #[test]
    fn test_project_all_skips_unmeasured_cards() {
        let roster = wr_roster(("PHI", "Alabama"), ("PHI", "Alabama"));
        let mut measured = MeasuredGeometry::default();
        measured.insert(SlotId::WR1, card(0.0, 0.0));
        measured.insert(SlotId::WR2, card(800.0, 0.0));
        measured.insert(SlotId::QB, card(400.0, 300.0));

        let edges = project_all(&measured, &roster);
        assert_eq!(edges.len(), 2);
        let wr = edges.iter().find(|e| e.to == SlotId::WR2 && e.from == SlotId::WR1).unwrap();
        assert_eq!(wr.bond, Bond::Strong);
        assert!(edges.iter().any(|e| e.from == SlotId::QB && e.to == SlotId::WR1));
    }
}
