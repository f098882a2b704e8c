//! Health Module
//!
//! Bounded resource pools: player HP and MP, and the boss's health.
use std::cmp;

use serde::{Deserialize, Serialize};

/// A resource that ranges from zero to a fixed maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    max: u32,
    current: u32,
}
impl Pool {
    /// Create a full pool with the given maximum.
    pub fn new_at_max(max: u32) -> Pool {
        Pool { max, current: max }
    }

    /// Create a pool at an arbitrary level. `current` is clamped to `max`.
    pub fn new(current: u32, max: u32) -> Pool {
        Pool {
            max,
            current: cmp::min(current, max),
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Drain the pool. Saturates at zero. Returns the amount actually removed.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Refill the pool. Saturates at max. Returns the amount actually added.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = cmp::min(self.max, self.current.saturating_add(amount));
        self.current - before
    }
}
