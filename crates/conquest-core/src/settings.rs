//! Game settings and configuration.

use crate::mission::MissionVerifier;
use crate::territory::FieldLimits;
use crate::types::TroopCount;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a game session.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Length caps for territory names and factions.
    pub limits: FieldLimits,
    /// Largest map the setup phase will allocate.
    pub max_territories: usize,
    /// Fixed random seed (None = seed from the clock).
    pub seed: Option<u64>,
    /// Player faction override. None = faction of the first territory.
    pub player_faction: Option<String>,
    /// Territory name counted by the "Alpha" mission.
    pub alpha_name: String,
    /// How many such territories must be held.
    pub alpha_target: usize,
    /// Troops needed for the total-troops mission.
    pub troop_target: i64,
    /// Faction the elimination mission targets.
    pub eliminate_faction: String,
    /// Garrison mission: troops per territory must exceed this.
    pub garrison_minimum: TroopCount,
}

impl GameSettings {
    /// Create default settings.
    pub fn new() -> Self {
        let canonical = MissionVerifier::new(String::new());
        Self {
            limits: FieldLimits::default(),
            max_territories: 100,
            seed: None,
            player_faction: None,
            alpha_name: canonical.alpha_name,
            alpha_target: canonical.alpha_target,
            troop_target: canonical.troop_target,
            eliminate_faction: canonical.eliminate_faction,
            garrison_minimum: canonical.garrison_minimum,
        }
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Validate settings and return the first problem found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.limits.max_name_len == 0 || self.limits.max_faction_len == 0 {
            return Err(SettingsError::ZeroLengthLimit);
        }
        if self.max_territories == 0 {
            return Err(SettingsError::NoTerritoryCapacity);
        }
        if self.alpha_name.is_empty() {
            return Err(SettingsError::EmptyAlphaName);
        }
        if self.alpha_target == 0 {
            return Err(SettingsError::InvalidAlphaTarget);
        }
        if self.troop_target <= 0 {
            return Err(SettingsError::InvalidTroopTarget);
        }
        if self.eliminate_faction.is_empty() {
            return Err(SettingsError::EmptyEliminateFaction);
        }
        if self.eliminate_faction.chars().count() > self.limits.max_faction_len {
            return Err(SettingsError::EliminateFactionTooLong);
        }
        if let Some(faction) = &self.player_faction {
            if faction.is_empty() || faction.chars().count() > self.limits.max_faction_len {
                return Err(SettingsError::InvalidPlayerFaction);
            }
        }
        Ok(())
    }

    /// Build the mission verifier for `player_faction` with these thresholds.
    pub fn verifier_for(&self, player_faction: impl Into<String>) -> MissionVerifier {
        MissionVerifier {
            player_faction: player_faction.into(),
            alpha_name: self.alpha_name.clone(),
            alpha_target: self.alpha_target,
            troop_target: self.troop_target,
            eliminate_faction: self.eliminate_faction.clone(),
            garrison_minimum: self.garrison_minimum,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from settings validation or loading.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Name and faction length limits must be positive")]
    ZeroLengthLimit,
    #[error("Maximum territory count must be positive")]
    NoTerritoryCapacity,
    #[error("Alpha mission territory name must not be empty")]
    EmptyAlphaName,
    #[error("Alpha mission target must be positive")]
    InvalidAlphaTarget,
    #[error("Troop mission target must be positive")]
    InvalidTroopTarget,
    #[error("Elimination mission faction must not be empty")]
    EmptyEliminateFaction,
    #[error("Elimination mission faction exceeds the faction length limit")]
    EliminateFactionTooLong,
    #[error("Player faction override is empty or too long")]
    InvalidPlayerFaction,
    #[error("Could not parse settings: {0}")]
    Parse(String),
    #[error("Could not read settings: {0}")]
    Io(String),
}
