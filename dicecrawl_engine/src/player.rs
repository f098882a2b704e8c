//! Player -- the adventurer's resources.
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::health::Pool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: Pool,
    pub mp: Pool,
    pub gold: u32,
}
impl Default for PlayerStats {
    fn default() -> PlayerStats {
        PlayerStats::new(&PlayerConfig::default())
    }
}
impl PlayerStats {
    /// Fresh stats: full HP and MP, empty purse.
    pub fn new(config: &PlayerConfig) -> PlayerStats {
        Self {
            hp: Pool::new_at_max(config.max_hp),
            mp: Pool::new_at_max(config.max_mp),
            gold: 0,
        }
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.hp.is_empty()
    }
}
