//! Random draws.
//!
//! Every probabilistic decision in the game (die rolls, room typing, damage, gold, start and boss
//! placement) goes through [`GameRng`]. The resolvers never draw on their own; the engine draws the
//! numbers up front and hands them over, which keeps each rule a plain function of its inputs.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::ThreadRng;

/// Number of faces on the action die.
pub const D20: u32 = 20;

/// Source of uniform random numbers.
pub trait GameRng {
    /// Uniform integer in `[low, high)`. Returns `low` when the range is empty.
    fn range(&mut self, low: u32, high: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Roll the action die, `1..=20`.
    fn d20(&mut self) -> u32 {
        self.range(1, D20 + 1)
    }

    /// Uniform integer in `[min, min + span)`.
    fn from_span(&mut self, min: u32, span: u32) -> u32 {
        self.range(min, min.saturating_add(span))
    }
}

/// Non-reproducible randomness backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadDice {
    rng: ThreadRng,
}

impl ThreadDice {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl GameRng for ThreadDice {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays queued values before falling back to real randomness.
///
/// Queued integers are clamped into the requested range, so a queued `15` answers a `d20()` with 15
/// and a `range(5, 15)` with 14.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    ints: VecDeque<u32>,
    units: VecDeque<f64>,
    fallback: ThreadDice,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue integer results, consumed in order by [`GameRng::range`].
    #[must_use]
    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    /// Queue float results, consumed in order by [`GameRng::unit`].
    #[must_use]
    pub fn with_units(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(values);
        self
    }

    pub fn push_int(&mut self, value: u32) {
        self.ints.push_back(value);
    }
}

impl GameRng for ScriptedDice {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        match self.ints.pop_front() {
            Some(value) => value.clamp(low, high - 1),
            None => self.fallback.range(low, high),
        }
    }

    fn unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(value) => value.clamp(0.0, 1.0 - f64::EPSILON),
            None => self.fallback.unit(),
        }
    }
}
