//! A single parcel of the board.

use crate::types::TroopCount;
use serde::{Deserialize, Serialize};

/// Longest territory name accepted by default, in characters.
pub const MAX_NAME_LEN: usize = 29;

/// Longest faction label accepted by default, in characters.
pub const MAX_FACTION_LEN: usize = 9;

/// Length caps applied when a territory is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLimits {
    /// Maximum characters in a territory name.
    pub max_name_len: usize,
    /// Maximum characters in a faction label.
    pub max_faction_len: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LEN,
            max_faction_len: MAX_FACTION_LEN,
        }
    }
}

/// One territory on the map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Display name, fixed once registered.
    pub name: String,
    /// Controlling faction (army color). Changes only on conquest.
    pub faction: String,
    /// Troops stationed here.
    pub troop_count: TroopCount,
}

impl Territory {
    /// Create a populated territory.
    pub fn new(name: impl Into<String>, faction: impl Into<String>, troop_count: TroopCount) -> Self {
        Self {
            name: name.into(),
            faction: faction.into(),
            troop_count,
        }
    }

    /// Whether this slot has been filled in during setup.
    pub fn is_populated(&self) -> bool {
        !self.faction.is_empty()
    }

    /// Whether this territory has enough troops to launch an attack.
    pub fn can_attack(&self) -> bool {
        self.troop_count > 1
    }

    /// Whether this territory is controlled by `faction`.
    pub fn is_owned_by(&self, faction: &str) -> bool {
        self.faction == faction
    }
}

impl std::fmt::Display for Territory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {} troops)", self.name, self.faction, self.troop_count)
    }
}
