//! Root session state: the board, the player's mission and the attack log.

use crate::combat::{resolve_attack, validate_attack, validate_attacker, AttackError, AttackOutcome};
use crate::mission::{MissionKind, MissionProgress, MissionVerifier};
use crate::randomness::RandomnessSource;
use crate::registry::{Registry, RegistryError};
use crate::settings::GameSettings;
use crate::territory::Territory;
use crate::types::{GamePhase, TerritoryIndex, TroopCount};
use serde::{Deserialize, Serialize};

/// One entry in the attack history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRecord {
    /// Turn on which the attack happened (starts at 1).
    pub turn: u32,
    /// Attacking territory index.
    pub attacker: TerritoryIndex,
    /// Defending territory index.
    pub defender: TerritoryIndex,
    /// Attacking territory name.
    pub attacker_name: String,
    /// Defending territory name.
    pub defender_name: String,
    /// Faction that attacked.
    pub attacker_faction: String,
    /// Faction that held the defender before the attack.
    pub defender_faction: String,
    /// What happened.
    pub outcome: AttackOutcome,
}

/// Totals reported when a session ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Phase the session ended in.
    pub phase: GamePhase,
    /// Mission drawn at start, if the session started.
    pub mission: Option<MissionKind>,
    /// Mission progress against the final map.
    pub progress: Option<MissionProgress>,
    /// Attacks resolved.
    pub attacks: usize,
    /// Attacks that took the defender.
    pub conquests: usize,
    /// Attacks the defender held.
    pub repelled: usize,
    /// Troops the player's attackers lost to failed attacks.
    pub troops_lost: TroopCount,
    /// Territories owned by the player at the end.
    pub territories_held: usize,
}

/// The complete state of a game.
///
/// Lifecycle: [`GameSession::new`] sizes the board in the `Setup` phase,
/// territories are filled with [`GameSession::set_territory`], then
/// [`GameSession::start`] fixes the player faction, draws the mission and
/// moves to `Playing`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    /// Configuration (immutable after start).
    pub settings: GameSettings,
    registry: Registry,
    mission: Option<MissionKind>,
    verifier: Option<MissionVerifier>,
    phase: GamePhase,
    turn: u32,
    history: Vec<AttackRecord>,
}

impl GameSession {
    /// Create a session with `size` empty territories.
    pub fn new(size: usize, settings: GameSettings) -> Result<Self, GameError> {
        if size > settings.max_territories {
            return Err(GameError::TooManyTerritories {
                max: settings.max_territories,
            });
        }
        let registry = Registry::create(size)?;
        Ok(Self::with_registry(registry, settings))
    }

    /// Create a session around an existing registry (useful for testing).
    pub fn with_registry(registry: Registry, settings: GameSettings) -> Self {
        Self {
            settings,
            registry,
            mission: None,
            verifier: None,
            phase: GamePhase::Setup,
            turn: 0,
            history: Vec::new(),
        }
    }

    /// Register one territory during setup.
    pub fn set_territory(
        &mut self,
        index: TerritoryIndex,
        name: &str,
        faction: &str,
        troop_count: TroopCount,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::InvalidPhase);
        }
        self.registry
            .set_with_limits(index, name, faction, troop_count, &self.settings.limits)?;
        Ok(())
    }

    /// Start the game, drawing a random mission.
    pub fn start(&mut self, rng: &mut impl RandomnessSource) -> Result<MissionKind, GameError> {
        self.check_ready()?;
        let mission = MissionKind::assign(rng);
        self.begin(mission)
    }

    /// Start the game with a chosen mission.
    pub fn start_with_mission(&mut self, mission: MissionKind) -> Result<MissionKind, GameError> {
        self.check_ready()?;
        self.begin(mission)
    }

    fn check_ready(&self) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::InvalidPhase);
        }
        if let Some(index) = self.registry.iter().position(|(_, t)| !t.is_populated()) {
            return Err(GameError::Unregistered(index));
        }
        Ok(())
    }

    fn begin(&mut self, mission: MissionKind) -> Result<MissionKind, GameError> {
        let player_faction = match &self.settings.player_faction {
            Some(faction) => faction.clone(),
            None => self
                .registry
                .first()
                .map(|t| t.faction.clone())
                .ok_or(GameError::Unregistered(0))?,
        };
        self.verifier = Some(self.settings.verifier_for(player_faction.as_str()));
        self.mission = Some(mission);
        self.phase = GamePhase::Playing;
        self.turn = 1;
        tracing::info!(
            territories = self.registry.len(),
            player = %player_faction,
            ?mission,
            "session started"
        );
        Ok(mission)
    }

    /// Check the mission. A satisfied mission ends the game as won.
    ///
    /// Returns true once the game has been won.
    pub fn check_mission(&mut self) -> bool {
        if self.phase == GamePhase::Playing && self.mission_satisfied() {
            self.phase = GamePhase::Won;
            tracing::info!(turn = self.turn, "mission accomplished");
        }
        self.phase == GamePhase::Won
    }

    /// Whether the mission is currently met, without changing phase.
    pub fn mission_satisfied(&self) -> bool {
        match (&self.verifier, self.mission) {
            (Some(verifier), Some(mission)) => verifier.is_satisfied(mission, &self.registry),
            _ => false,
        }
    }

    /// Check that `attacker` may launch an attack right now.
    pub fn validate_attacker(&self, attacker: TerritoryIndex) -> Result<&Territory, GameError> {
        self.ensure_playing()?;
        Ok(validate_attacker(&self.registry, attacker)?)
    }

    /// Validate and resolve one attack, recording it in the history.
    pub fn attack(
        &mut self,
        attacker: TerritoryIndex,
        defender: TerritoryIndex,
        rng: &mut impl RandomnessSource,
    ) -> Result<AttackOutcome, GameError> {
        self.ensure_playing()?;
        validate_attack(&self.registry, attacker, defender)?;

        let (attacking, defending) = self
            .registry
            .pair_mut(attacker, defender)
            .ok_or(GameError::Attack(AttackError::SelfAttack))?;

        let attacker_name = attacking.name.clone();
        let defender_name = defending.name.clone();
        let attacker_faction = attacking.faction.clone();
        let defender_faction = defending.faction.clone();

        let outcome = resolve_attack(attacking, defending, rng);

        self.history.push(AttackRecord {
            turn: self.turn,
            attacker,
            defender,
            attacker_name,
            defender_name,
            attacker_faction,
            defender_faction,
            outcome: outcome.clone(),
        });
        self.turn += 1;
        Ok(outcome)
    }

    /// The player stops attacking.
    pub fn abandon(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Abandoned;
            tracing::info!(turn = self.turn, "session abandoned");
        }
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Playing => Ok(()),
            GamePhase::Setup => Err(GameError::InvalidPhase),
            GamePhase::Won | GamePhase::Abandoned => Err(GameError::GameOver),
        }
    }

    /// The board.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The assigned mission (None before start).
    pub fn mission(&self) -> Option<MissionKind> {
        self.mission
    }

    /// The mission verifier (None before start).
    pub fn verifier(&self) -> Option<&MissionVerifier> {
        self.verifier.as_ref()
    }

    /// Faction the player controls (None before start).
    pub fn player_faction(&self) -> Option<&str> {
        self.verifier.as_ref().map(|v| v.player_faction.as_str())
    }

    /// Mission text using the configured thresholds.
    pub fn mission_text(&self) -> Option<String> {
        match (&self.verifier, self.mission) {
            (Some(verifier), Some(mission)) => Some(verifier.describe(mission)),
            _ => None,
        }
    }

    /// Current progress toward the mission.
    pub fn mission_progress(&self) -> Option<MissionProgress> {
        match (&self.verifier, self.mission) {
            (Some(verifier), Some(mission)) => Some(verifier.progress(mission, &self.registry)),
            _ => None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Current turn (0 during setup).
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every resolved attack, oldest first.
    pub fn history(&self) -> &[AttackRecord] {
        &self.history
    }

    /// Totals for the end-of-game report.
    pub fn summary(&self) -> SessionSummary {
        let conquests = self.history.iter().filter(|r| r.outcome.conquered).count();
        let troops_lost = self
            .history
            .iter()
            .filter(|r| r.outcome.attacker_lost_troop())
            .count() as TroopCount;
        let territories_held = self
            .player_faction()
            .map(|faction| self.registry.territories_of(faction).count())
            .unwrap_or(0);
        SessionSummary {
            phase: self.phase,
            mission: self.mission,
            progress: self.mission_progress(),
            attacks: self.history.len(),
            conquests,
            repelled: self.history.len() - conquests,
            troops_lost,
            territories_held,
        }
    }

    /// Serialize the full session to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Errors that can occur during session operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Attack(#[from] AttackError),
    #[error("Map too large: at most {max} territories are supported")]
    TooManyTerritories { max: usize },
    #[error("Territory {0} has not been registered")]
    Unregistered(TerritoryIndex),
    #[error("Invalid operation for current game phase")]
    InvalidPhase,
    #[error("The game is over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::ScriptedRandomness;

    fn started_session(territories: &[(&str, &str, i32)], mission: MissionKind) -> GameSession {
        let mut session = GameSession::new(territories.len(), GameSettings::default()).unwrap();
        for (i, &(name, faction, troops)) in territories.iter().enumerate() {
            session.set_territory(i, name, faction, troops).unwrap();
        }
        session.start_with_mission(mission).unwrap();
        session
    }

    #[test]
    fn test_new_session_in_setup() {
        let session = GameSession::new(3, GameSettings::default()).unwrap();
        assert_eq!(session.phase(), GamePhase::Setup);
        assert_eq!(session.turn(), 0);
        assert_eq!(session.mission(), None);
        assert_eq!(session.player_faction(), None);
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert_eq!(
            GameSession::new(0, GameSettings::default()).unwrap_err(),
            GameError::Registry(RegistryError::InvalidSize)
        );
        assert_eq!(
            GameSession::new(101, GameSettings::default()).unwrap_err(),
            GameError::TooManyTerritories { max: 100 }
        );
    }

    #[test]
    fn test_start_requires_every_territory() {
        let mut session = GameSession::new(2, GameSettings::default()).unwrap();
        session.set_territory(0, "A", "Blue", 5).unwrap();
        let mut rng = ScriptedRandomness::new();
        assert_eq!(session.start(&mut rng), Err(GameError::Unregistered(1)));
    }

    #[test]
    fn test_start_draws_mission_and_player_faction() {
        let mut session = GameSession::new(2, GameSettings::default()).unwrap();
        session.set_territory(0, "A", "Blue", 5).unwrap();
        session.set_territory(1, "B", "Red", 3).unwrap();
        let mut rng = ScriptedRandomness::new().and_picks([2]);

        let mission = session.start(&mut rng).unwrap();

        assert_eq!(mission, MissionKind::EliminateRed);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.turn(), 1);
        assert_eq!(session.player_faction(), Some("Blue"));
        assert_eq!(
            session.mission_text().as_deref(),
            Some("Eliminate all troops of the color 'Red'.")
        );
    }

    #[test]
    fn test_player_faction_override() {
        let settings = GameSettings {
            player_faction: Some("Red".to_string()),
            ..Default::default()
        };
        let mut session = GameSession::new(2, settings).unwrap();
        session.set_territory(0, "A", "Blue", 5).unwrap();
        session.set_territory(1, "B", "Red", 3).unwrap();
        session.start_with_mission(MissionKind::TotalTroops).unwrap();
        assert_eq!(session.player_faction(), Some("Red"));
    }

    #[test]
    fn test_setup_locked_after_start() {
        let mut session = started_session(&[("A", "Blue", 5), ("B", "Red", 3)], MissionKind::Garrison);
        assert_eq!(
            session.set_territory(0, "A", "Green", 5),
            Err(GameError::InvalidPhase)
        );
        assert_eq!(
            session.start_with_mission(MissionKind::Garrison),
            Err(GameError::InvalidPhase)
        );
    }

    #[test]
    fn test_attack_before_start_is_rejected() {
        let mut session = GameSession::new(2, GameSettings::default()).unwrap();
        let mut rng = ScriptedRandomness::with_dice([6, 1]);
        assert_eq!(session.attack(0, 1, &mut rng), Err(GameError::InvalidPhase));
    }

    #[test]
    fn test_attack_records_history() {
        let mut session =
            started_session(&[("A", "Blue", 10), ("B", "Red", 3)], MissionKind::FirstAndLast);
        let mut rng = ScriptedRandomness::with_dice([6, 1]);

        let outcome = session.attack(0, 1, &mut rng).unwrap();

        assert!(outcome.conquered);
        assert_eq!(session.turn(), 2);
        let record = &session.history()[0];
        assert_eq!(record.turn, 1);
        assert_eq!(record.attacker_name, "A");
        assert_eq!(record.defender_name, "B");
        assert_eq!(record.defender_faction, "Red");
        assert_eq!(session.registry().get(1).unwrap().faction, "Blue");
    }

    #[test]
    fn test_invalid_attacks_leave_state_untouched() {
        let mut session = started_session(
            &[("A", "Blue", 10), ("B", "Red", 1), ("C", "Blue", 2)],
            MissionKind::TotalTroops,
        );
        let snapshot = session.registry().clone();
        let mut rng = ScriptedRandomness::with_dice([6, 1, 6, 1, 6, 1]);

        assert_eq!(
            session.attack(0, 2, &mut rng),
            Err(GameError::Attack(AttackError::SelfAttack))
        );
        assert_eq!(
            session.attack(1, 0, &mut rng),
            Err(GameError::Attack(AttackError::InsufficientTroops { troops: 1 }))
        );
        assert_eq!(
            session.attack(0, 7, &mut rng),
            Err(GameError::Attack(AttackError::InvalidIndex { index: 7, len: 3 }))
        );
        assert_eq!(session.registry(), &snapshot);
        assert!(session.history().is_empty());
        // No dice were consumed by rejected attacks.
        assert_eq!(rng.remaining_dice(), 6);
    }

    #[test]
    fn test_check_mission_wins_and_locks() {
        let mut session =
            started_session(&[("A", "Blue", 10), ("B", "Red", 3)], MissionKind::EliminateRed);
        assert!(!session.check_mission());

        let mut rng = ScriptedRandomness::with_dice([5, 2]);
        session.attack(0, 1, &mut rng).unwrap();

        assert!(session.check_mission());
        assert_eq!(session.phase(), GamePhase::Won);
        assert_eq!(session.attack(0, 1, &mut rng), Err(GameError::GameOver));
    }

    #[test]
    fn test_abandon() {
        let mut session = started_session(&[("A", "Blue", 10), ("B", "Red", 3)], MissionKind::Garrison);
        session.abandon();
        assert_eq!(session.phase(), GamePhase::Abandoned);
        assert!(!session.check_mission());
        assert!(matches!(session.validate_attacker(0), Err(GameError::GameOver)));
    }

    #[test]
    fn test_summary_counts() {
        let mut session = started_session(
            &[("A", "Blue", 10), ("B", "Red", 3), ("C", "Red", 3)],
            MissionKind::TotalTroops,
        );
        let mut rng = ScriptedRandomness::with_dice([2, 2, 6, 1, 1, 6]);
        session.attack(0, 1, &mut rng).unwrap(); // repelled: A 10 -> 9
        session.attack(0, 1, &mut rng).unwrap(); // conquered: B gets 4, A keeps 5
        session.attack(0, 2, &mut rng).unwrap(); // repelled: A 5 -> 4
        session.abandon();

        let summary = session.summary();
        assert_eq!(summary.attacks, 3);
        assert_eq!(summary.conquests, 1);
        assert_eq!(summary.repelled, 2);
        assert_eq!(summary.troops_lost, 2);
        assert_eq!(summary.territories_held, 2);
        assert_eq!(summary.phase, GamePhase::Abandoned);
        assert_eq!(summary.progress.unwrap().summary, "8/15 troops");
    }

    #[test]
    fn test_session_json_roundtrip() {
        let session = started_session(&[("A", "Blue", 10), ("B", "Red", 3)], MissionKind::Garrison);
        let json = session.to_json().unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.registry(), session.registry());
        assert_eq!(back.mission(), Some(MissionKind::Garrison));
        assert_eq!(back.phase(), GamePhase::Playing);
    }
}
