//! Random sources that decide whether ambush points spring.

use quiztasy_core::AmbushRoll;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha generator producing reproducible percentage draws.
#[derive(Clone, Debug)]
pub struct SeededRoll {
    rng: ChaCha8Rng,
}

impl SeededRoll {
    /// Creates a generator seeded with the provided value.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl AmbushRoll for SeededRoll {
    fn roll_percent(&mut self) -> u8 {
        self.rng.gen_range(1..=100)
    }
}

/// Replays a fixed sequence of draws, wrapping around when exhausted.
///
/// An empty script always rolls 100, so only certain ambushes spring.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRoll {
    rolls: Vec<u8>,
    cursor: usize,
}

impl ScriptedRoll {
    /// Creates a source replaying `rolls` in order.
    #[must_use]
    pub fn new(rolls: impl Into<Vec<u8>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Creates a source that always produces the same draw.
    #[must_use]
    pub fn always(roll: u8) -> Self {
        Self::new(vec![roll])
    }

    /// Number of draws consumed so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl AmbushRoll for ScriptedRoll {
    fn roll_percent(&mut self) -> u8 {
        let roll = if self.rolls.is_empty() {
            100
        } else {
            self.rolls[self.cursor % self.rolls.len()]
        };
        self.cursor = self.cursor.saturating_add(1);
        roll.clamp(1, 100)
    }
}
