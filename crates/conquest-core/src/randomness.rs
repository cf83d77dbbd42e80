//! Randomness capability for dice rolls and mission draws.
//!
//! Game logic never touches a global generator. Anything that needs chance
//! takes a [`RandomnessSource`], so a session can run on a seeded generator
//! in production and on a scripted sequence in tests.

use crate::types::DIE_FACES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for anything that can supply game randomness.
pub trait RandomnessSource {
    /// Roll one six-sided die, returning a value in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Pick an index uniformly in `0..n`. `n` must be positive.
    fn pick_index(&mut self, n: usize) -> usize;
}

impl<R: RandomnessSource + ?Sized> RandomnessSource for &mut R {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }

    fn pick_index(&mut self, n: usize) -> usize {
        (**self).pick_index(n)
    }
}

/// Production randomness: a `StdRng` seeded once per session.
#[derive(Clone, Debug)]
pub struct SeededRandomness {
    rng: StdRng,
    seed: u64,
}

impl SeededRandomness {
    /// Create a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the system clock.
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomnessSource for SeededRandomness {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }

    fn pick_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}

/// Seed derived from the current time, in nanoseconds since the Unix epoch.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x853c_49e6_748f_ea9b)
}

/// Replays pre-recorded dice and index picks (for testing).
///
/// Once a queue runs dry the source falls back to the lowest legal value:
/// a die of 1 and an index of 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandomness {
    dice: VecDeque<u8>,
    picks: VecDeque<usize>,
}

impl ScriptedRandomness {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the given die faces, consumed in order.
    pub fn with_dice(dice: impl IntoIterator<Item = u8>) -> Self {
        Self {
            dice: dice.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    /// Append index picks, consumed in order.
    pub fn and_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Queue one attack: attacker's die then defender's die.
    pub fn push_attack(&mut self, attack_roll: u8, defense_roll: u8) {
        self.dice.push_back(attack_roll);
        self.dice.push_back(defense_roll);
    }

    /// Queue one index pick.
    pub fn push_pick(&mut self, index: usize) {
        self.picks.push_back(index);
    }

    /// Dice left in the script.
    pub fn remaining_dice(&self) -> usize {
        self.dice.len()
    }
}

impl RandomnessSource for ScriptedRandomness {
    fn roll_die(&mut self) -> u8 {
        self.dice.pop_front().unwrap_or(1).clamp(1, DIE_FACES)
    }

    fn pick_index(&mut self, n: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        if n == 0 {
            0
        } else {
            pick.min(n - 1)
        }
    }
}
