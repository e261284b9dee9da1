//! Fantasy-football roster chemistry.
//!
//! Adjacent lineup slots whose players share a team and/or college earn a
//! score multiplier; the same comparison colors the connectors drawn between
//! their cards. Rosters come from a demo fixture or a Sleeper league.

pub mod adjacency;
pub mod chemistry;
pub mod config;
pub mod connections;
pub mod demo;
pub mod error;
pub mod layout;
pub mod logging;
pub mod report;
pub mod roster;
pub mod sleeper;
pub mod source;

pub use chemistry::{compute_multiplier, Bond, Chemistry};
pub use connections::{compute_edge, EdgeGeometry, Rgba};
pub use error::RosterError;
pub use layout::{CardGeometry, GeometryProvider};
pub use roster::{Player, Position, Roster, SlotId};
