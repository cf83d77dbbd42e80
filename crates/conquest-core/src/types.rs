//! Core type aliases used throughout the crate.

use serde::{Deserialize, Serialize};

/// Position of a territory in the registry (0-based, stable for a session).
pub type TerritoryIndex = usize;

/// Number of troops stationed on a territory.
///
/// Signed because the registry does not enforce a lower bound when a
/// territory is written; combat never drives a count below zero.
pub type TroopCount = i32;

/// Number of faces on an attack or defense die.
pub const DIE_FACES: u8 = 6;

/// Lifecycle of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Territories are still being registered.
    #[default]
    Setup,
    /// Mission assigned, attacks may be made.
    Playing,
    /// The mission was verified as complete.
    Won,
    /// The player stopped attacking before completing the mission.
    Abandoned,
}

impl GamePhase {
    /// Whether the session has reached a terminal phase.
    pub const fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Abandoned)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Setup => write!(f, "Setup"),
            GamePhase::Playing => write!(f, "Playing"),
            GamePhase::Won => write!(f, "Mission accomplished"),
            GamePhase::Abandoned => write!(f, "Abandoned"),
        }
    }
}
