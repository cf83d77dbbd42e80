//! Dice combat between two territories.
//!
//! Each attack rolls one die for the attacker and one for the defender.
//! The attacker must roll strictly higher to win; ties go to the defender.
//! A winning attacker moves half of its troops (rounded down) into the
//! conquered territory. A losing attacker gives up a single troop.
//!
//! [`resolve_attack`] trusts its inputs. Legality is checked beforehand with
//! [`validate_attack`], which the session always calls first.

use crate::randomness::RandomnessSource;
use crate::registry::Registry;
use crate::territory::Territory;
use crate::types::{TerritoryIndex, TroopCount};
use serde::{Deserialize, Serialize};

/// Result of a single attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Attacker's die.
    pub attack_roll: u8,
    /// Defender's die.
    pub defense_roll: u8,
    /// Whether the defender changed hands.
    pub conquered: bool,
    /// Troops moved into the conquered territory (0 if the defense held).
    pub troops_transferred: TroopCount,
    /// Attacker troops before the attack.
    pub attacker_troops_before: TroopCount,
    /// Defender troops before the attack.
    pub defender_troops_before: TroopCount,
    /// Attacker troops after the attack.
    pub attacker_troops: TroopCount,
    /// Defender troops after the attack.
    pub defender_troops: TroopCount,
}

impl AttackOutcome {
    /// Whether the attacker paid a troop for a failed attack.
    pub fn attacker_lost_troop(&self) -> bool {
        !self.conquered && self.attacker_troops < self.attacker_troops_before
    }

    /// Whether the defender held its ground.
    pub fn defense_held(&self) -> bool {
        !self.conquered
    }
}

/// Reasons an attacker/defender pair may not fight.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("Index {index} is out of range (0..{len})")]
    InvalidIndex { index: TerritoryIndex, len: usize },
    #[error("You cannot attack a territory of your own color")]
    SelfAttack,
    #[error("Not enough troops to attack ({troops}); at least 2 are required")]
    InsufficientTroops { troops: TroopCount },
}

/// Check that a territory exists and may launch an attack.
pub fn validate_attacker(registry: &Registry, attacker: TerritoryIndex) -> Result<&Territory, AttackError> {
    let territory = lookup(registry, attacker)?;
    if !territory.can_attack() {
        return Err(AttackError::InsufficientTroops {
            troops: territory.troop_count,
        });
    }
    Ok(territory)
}

/// Check every precondition of an attack.
///
/// Order: indices in range, attacker has more than one troop, defender is
/// held by a different faction. Attacking oneself is a same-color attack.
pub fn validate_attack(
    registry: &Registry,
    attacker: TerritoryIndex,
    defender: TerritoryIndex,
) -> Result<(), AttackError> {
    let attacking = validate_attacker(registry, attacker)?;
    let defending = lookup(registry, defender)?;
    if attacker == defender || attacking.faction == defending.faction {
        return Err(AttackError::SelfAttack);
    }
    Ok(())
}

fn lookup(registry: &Registry, index: TerritoryIndex) -> Result<&Territory, AttackError> {
    registry.get(index).ok_or(AttackError::InvalidIndex {
        index,
        len: registry.len(),
    })
}

/// Resolve one attack, mutating only the two territories passed in.
///
/// The attacker's die is rolled first, then the defender's.
pub fn resolve_attack(
    attacker: &mut Territory,
    defender: &mut Territory,
    rng: &mut impl RandomnessSource,
) -> AttackOutcome {
    let attack_roll = rng.roll_die();
    let defense_roll = rng.roll_die();

    let attacker_troops_before = attacker.troop_count;
    let defender_troops_before = defender.troop_count;

    let conquered = attack_roll > defense_roll;
    let troops_transferred = if conquered {
        let transferred = attacker.troop_count / 2;
        defender.faction.clone_from(&attacker.faction);
        defender.troop_count = transferred;
        attacker.troop_count -= transferred;
        transferred
    } else {
        if attacker.troop_count > 1 {
            attacker.troop_count -= 1;
        }
        0
    };

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attack_roll,
        defense_roll,
        conquered,
        troops_transferred,
        "attack resolved"
    );

    AttackOutcome {
        attack_roll,
        defense_roll,
        conquered,
        troops_transferred,
        attacker_troops_before,
        defender_troops_before,
        attacker_troops: attacker.troop_count,
        defender_troops: defender.troop_count,
    }
}
