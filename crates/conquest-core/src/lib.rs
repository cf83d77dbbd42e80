//! Conquest Core Library
//!
//! Game logic for Conquest, a single-player territory conquest game. The
//! player registers a map of territories, receives one random mission and
//! attacks enemy territories with dice until the mission is met.
//!
//! # Design Principles
//!
//! - **No I/O**: console handling lives in the `conquest-cli` crate
//! - **Injected randomness**: dice and mission draws go through
//!   [`RandomnessSource`], so tests can script every roll
//! - **Serializable**: all state can be dumped via serde

// Core modules
pub mod registry;
pub mod territory;
pub mod types;

// Dice and missions
pub mod combat;
pub mod mission;
pub mod randomness;

// Session state
pub mod session;
pub mod settings;

// Re-exports for convenience
pub use combat::{resolve_attack, validate_attack, validate_attacker, AttackError, AttackOutcome};
pub use mission::{MissionKind, MissionProgress, MissionVerifier};
pub use randomness::{RandomnessSource, ScriptedRandomness, SeededRandomness};
pub use registry::{Registry, RegistryError};
pub use session::{AttackRecord, GameError, GameSession, SessionSummary};
pub use settings::{GameSettings, SettingsError};
pub use territory::{FieldLimits, Territory, MAX_FACTION_LEN, MAX_NAME_LEN};
pub use types::*;
