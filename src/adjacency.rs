//! Static adjacency table between lineup slots.
//! Shared by the chemistry engine (which pairs earn a bonus) and the
//! connection projector (which pairs get a line, in what default color and
//! along which route).

use crate::connections::Rgba;
use crate::roster::SlotId;

/// How the connector between two cards is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeRoute {
    /// Center to center, clipped at each card's bounding radius.
    Radial,
    /// Across the top of both cards, used where a radial line would cross
    /// the cards sitting between the pair.
    TopBaseline,
}

/// One unordered pair of connected slots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: SlotId,
    pub b: SlotId,
    pub default_color: Rgba,
    pub route: EdgeRoute,
}

impl Link {
    const fn radial(a: SlotId, b: SlotId) -> Self {
        Link {
            a,
            b,
            default_color: Rgba::LINK,
            route: EdgeRoute::Radial,
        }
    }

    /// The slot at the other end, or `None` if `slot` is not on this link
    /// or the link is a self-loop.
    pub fn other(&self, slot: SlotId) -> Option<SlotId> {
        if self.a == self.b {
            return None;
        }
        if self.a == slot {
            Some(self.b)
        } else if self.b == slot {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn involves(&self, slot: SlotId) -> bool {
        self.a == slot || self.b == slot
    }
}

use SlotId::*;

pub static ADJACENCY: [Link; 18] = [
    Link::radial(QB, WR1),
    Link::radial(QB, RB1),
    Link::radial(QB, Flex1),
    Link::radial(QB, TE),
    Link::radial(RB1, RB2),
    Link::radial(RB1, Flex1),
    Link::radial(RB1, WR1),
    Link::radial(RB2, K),
    Link::radial(RB2, Flex2),
    Link::radial(RB2, WR2),
    Link::radial(WR1, Flex1),
    Link {
        a: WR1,
        b: WR2,
        default_color: Rgba::TRANSPARENT,
        route: EdgeRoute::TopBaseline,
    },
    Link::radial(WR2, K),
    Link::radial(WR2, Flex2),
    Link::radial(TE, K),
    Link::radial(TE, Flex1),
    Link::radial(TE, Flex2),
    Link::radial(K, Flex2),
];

/// Table entry for an unordered pair, if the two slots are connected.
pub fn link_between(a: SlotId, b: SlotId) -> Option<&'static Link> {
    ADJACENCY
        .iter()
        .find(|link| (link.a == a && link.b == b) || (link.a == b && link.b == a))
}

/// Slots connected to `slot`, skipping any self-loop.
pub fn neighbors(slot: SlotId) -> impl Iterator<Item = SlotId> {
    neighbors_in(&ADJACENCY, slot)
}

pub(crate) fn neighbors_in(table: &[Link], slot: SlotId) -> impl Iterator<Item = SlotId> + '_ {
    table.iter().filter_map(move |link| link.other(slot))
}
