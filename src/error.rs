use crate::roster::{Position, SlotId};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Unknown lineup slot: {0}")]
    UnknownSlot(String),

    #[error("Unknown player position: {0}")]
    UnknownPosition(String),

    #[error("{player} ({position}) cannot play {slot}")]
    IneligiblePosition {
        player: String,
        position: Position,
        slot: SlotId,
    },

    #[error("No rosters found in league {0}")]
    EmptyLeague(String),

    #[error("No roster owned by {owner} in league {league}")]
    OwnerNotFound { owner: String, league: String },

    #[error("Failed to read '{path}': {source}", path = path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sleeper API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
