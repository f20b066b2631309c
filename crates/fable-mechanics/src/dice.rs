//! Dice and the rollers that throw them.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A die to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Twenty-sided die, used for every attack, dodge and escape roll.
    D20,
    /// A die with a custom number of sides, used for damage variance.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D20 => 20,
            Self::Custom(n) => n,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::D20 => write!(f, "d20"),
            Self::Custom(n) => write!(f, "d{n}"),
        }
    }
}

/// A source of die rolls.
///
/// Implementations return a value in `1..=die.sides()`. A die with fewer
/// than one side always rolls 1.
pub trait Roller {
    /// Roll one die.
    fn roll(&mut self, die: Die) -> u32;
}

/// Uniform rolls from a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    /// A roller that repeats the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Roller for RandomRoller {
    fn roll(&mut self, die: Die) -> u32 {
        self.rng.random_range(1..=die.sides().max(1))
    }
}

/// Replays a fixed list of rolls, for tests.
///
/// Each value is clamped into the die's range. Once the list runs out
/// every roll is 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    rolls: VecDeque<u32>,
}

impl ScriptedRoller {
    /// A roller that returns `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Roller for ScriptedRoller {
    fn roll(&mut self, die: Die) -> u32 {
        self.rolls
            .pop_front()
            .map_or(1, |value| value.clamp(1, die.sides().max(1)))
    }
}
