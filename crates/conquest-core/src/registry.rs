//! Fixed-size, ordered collection of territories.
//!
//! The registry is sized once when the session is set up. Slots are filled in
//! with [`Registry::set`] and afterwards only their fields change: no
//! territory is ever added or removed, so indices stay stable for the whole
//! game.

use crate::territory::{FieldLimits, Territory};
use crate::types::{TerritoryIndex, TroopCount};
use serde::{Deserialize, Serialize};

/// Errors raised while creating or writing the registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Territory count must be a positive integer")]
    InvalidSize,
    #[error("Index {index} is out of range (0..{len})")]
    InvalidIndex { index: TerritoryIndex, len: usize },
    #[error("Territory name must not be empty")]
    EmptyName,
    #[error("Faction must not be empty")]
    EmptyFaction,
    #[error("Territory name is longer than {max} characters")]
    NameTooLong { max: usize },
    #[error("Faction is longer than {max} characters")]
    FactionTooLong { max: usize },
}

/// The board: every territory in registration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    territories: Vec<Territory>,
}

impl Registry {
    /// Allocate a registry of exactly `size` empty territories.
    pub fn create(size: usize) -> Result<Self, RegistryError> {
        if size == 0 {
            return Err(RegistryError::InvalidSize);
        }
        Ok(Self {
            territories: vec![Territory::default(); size],
        })
    }

    /// Build a registry from already-populated territories (useful for testing).
    pub fn from_territories(territories: Vec<Territory>) -> Result<Self, RegistryError> {
        if territories.is_empty() {
            return Err(RegistryError::InvalidSize);
        }
        Ok(Self { territories })
    }

    /// Write one territory using the default length caps.
    pub fn set(
        &mut self,
        index: TerritoryIndex,
        name: &str,
        faction: &str,
        troop_count: TroopCount,
    ) -> Result<(), RegistryError> {
        self.set_with_limits(index, name, faction, troop_count, &FieldLimits::default())
    }

    /// Write one territory, validating text fields against `limits`.
    ///
    /// Troop counts are stored as given; callers that need a lower bound
    /// must check it before calling.
    pub fn set_with_limits(
        &mut self,
        index: TerritoryIndex,
        name: &str,
        faction: &str,
        troop_count: TroopCount,
        limits: &FieldLimits,
    ) -> Result<(), RegistryError> {
        let len = self.territories.len();
        validate_fields(name, faction, limits)?;
        let slot = self
            .territories
            .get_mut(index)
            .ok_or(RegistryError::InvalidIndex { index, len })?;
        *slot = Territory::new(name, faction, troop_count);
        Ok(())
    }

    /// Get a territory by index.
    pub fn get(&self, index: TerritoryIndex) -> Option<&Territory> {
        self.territories.get(index)
    }

    /// Get a territory by index, or an `InvalidIndex` error.
    pub fn try_get(&self, index: TerritoryIndex) -> Result<&Territory, RegistryError> {
        self.territories.get(index).ok_or(RegistryError::InvalidIndex {
            index,
            len: self.territories.len(),
        })
    }

    /// Mutable access to two distinct territories at once.
    ///
    /// Returns `None` if the indices are equal or either is out of range.
    pub fn pair_mut(
        &mut self,
        first: TerritoryIndex,
        second: TerritoryIndex,
    ) -> Option<(&mut Territory, &mut Territory)> {
        let len = self.territories.len();
        if first == second || first >= len || second >= len {
            return None;
        }
        if first < second {
            let (left, right) = self.territories.split_at_mut(second);
            Some((&mut left[first], &mut right[0]))
        } else {
            let (left, right) = self.territories.split_at_mut(first);
            Some((&mut right[0], &mut left[second]))
        }
    }

    /// All territories in registration order.
    pub fn all(&self) -> &[Territory] {
        &self.territories
    }

    /// Iterate over territories with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (TerritoryIndex, &Territory)> {
        self.territories.iter().enumerate()
    }

    /// Number of territories.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Always false for a registry built through `create`.
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Whether every slot has been filled in.
    pub fn is_populated(&self) -> bool {
        self.territories.iter().all(Territory::is_populated)
    }

    /// First territory in registration order.
    pub fn first(&self) -> Option<&Territory> {
        self.territories.first()
    }

    /// Last territory in registration order.
    pub fn last(&self) -> Option<&Territory> {
        self.territories.last()
    }

    /// Total troops across every territory held by `faction`.
    pub fn troops_of(&self, faction: &str) -> i64 {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(faction))
            .map(|t| i64::from(t.troop_count))
            .sum()
    }

    /// Territories held by `faction`.
    pub fn territories_of<'a>(&'a self, faction: &'a str) -> impl Iterator<Item = &'a Territory> {
        self.territories.iter().filter(move |t| t.is_owned_by(faction))
    }

    /// Distinct factions in first-seen order.
    pub fn factions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for territory in &self.territories {
            if territory.is_populated() && !seen.contains(&territory.faction.as_str()) {
                seen.push(&territory.faction);
            }
        }
        seen
    }

    /// Sum of all troops on the board.
    pub fn total_troops(&self) -> i64 {
        self.territories
            .iter()
            .map(|t| i64::from(t.troop_count))
            .sum()
    }
}

/// Check name and faction against the configured caps.
pub fn validate_fields(name: &str, faction: &str, limits: &FieldLimits) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if faction.trim().is_empty() {
        return Err(RegistryError::EmptyFaction);
    }
    if name.chars().count() > limits.max_name_len {
        return Err(RegistryError::NameTooLong {
            max: limits.max_name_len,
        });
    }
    if faction.chars().count() > limits.max_faction_len {
        return Err(RegistryError::FactionTooLong {
            max: limits.max_faction_len,
        });
    }
    Ok(())
}
