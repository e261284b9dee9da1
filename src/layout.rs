//! Card geometry sources.
//! The projector never measures anything itself: it asks a
//! [`GeometryProvider`] for each slot's card. A renderer hands over a
//! [`MeasuredGeometry`] snapshot after layout; [`FormationLayout`] computes
//! a fixed field grid for reports and tests.

use crate::roster::SlotId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pixel box of a rendered slot card, by center and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
}

impl CardGeometry {
    pub fn new(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self { cx, cy, width, height }
    }

    /// Builds a box from its top-left corner, as DOM measurement reports it.
    pub fn from_rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left + width / 2.0, top + height / 2.0, width, height)
    }

    /// Half of the larger side.
    pub fn radius(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }
}

pub trait GeometryProvider {
    /// Geometry of the card in `slot`, or `None` if it is not rendered yet.
    fn geometry(&self, slot: SlotId) -> Option<CardGeometry>;
}

/// Externally measured card boxes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeasuredGeometry {
    cards: HashMap<SlotId, CardGeometry>,
}

impl MeasuredGeometry {
    pub fn insert(&mut self, slot: SlotId, card: CardGeometry) -> Option<CardGeometry> {
        self.cards.insert(slot, card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<(SlotId, CardGeometry)> for MeasuredGeometry {
    fn from_iter<T: IntoIterator<Item = (SlotId, CardGeometry)>>(iter: T) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl GeometryProvider for MeasuredGeometry {
    fn geometry(&self, slot: SlotId) -> Option<CardGeometry> {
        self.cards.get(&slot).copied()
    }
}

/// Fixed formation grid: kicker row, receiver row (WR1 Flex1 TE Flex2 WR2),
/// quarterback row and running-back row. Bench cards are not on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormationLayout {
    pub card_width: f64,
    pub card_height: f64,
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub margin: f64,
}

impl Default for FormationLayout {
    fn default() -> Self {
        Self {
            card_width: 120.0,
            card_height: 160.0,
            column_spacing: 180.0,
            row_spacing: 220.0,
            margin: 40.0,
        }
    }
}

impl FormationLayout {
    /// Grid cell (column, row) of each slot. Columns may be fractional.
    fn cell(slot: SlotId) -> Option<(f64, f64)> {
        let cell = match slot {
            SlotId::K => (4.0, 0.0),
            SlotId::WR1 => (0.0, 1.0),
            SlotId::Flex1 => (1.0, 1.0),
            SlotId::TE => (2.0, 1.0),
            SlotId::Flex2 => (3.0, 1.0),
            SlotId::WR2 => (4.0, 1.0),
            SlotId::QB => (1.5, 2.0),
            SlotId::RB1 => (1.0, 3.0),
            SlotId::RB2 => (3.0, 3.0),
            SlotId::Bench => return None,
        };
        Some(cell)
    }
}

impl GeometryProvider for FormationLayout {
    fn geometry(&self, slot: SlotId) -> Option<CardGeometry> {
        let (col, row) = Self::cell(slot)?;
        let cx = self.margin + self.card_width / 2.0 + col * self.column_spacing;
        let cy = self.margin + self.card_height / 2.0 + row * self.row_spacing;
        Some(CardGeometry::new(cx, cy, self.card_width, self.card_height))
    }
}
