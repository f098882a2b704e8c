//! Game configuration.
//!
//! Every tuning knob of the dungeon lives in [`GameConfig`]. Values are read from a TOML file when
//! one is found and fall back field-by-field to the built-in defaults, so a config file only needs
//! to mention what it changes.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_paths::{data_path, user_config_dir};

/// Name of the config file looked up in the data and user config directories.
pub const CONFIG_FILE_NAME: &str = "dicecrawl.toml";

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DICECRAWL_CONFIG";

/// Problems found when validating a loaded configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid_size must be at least 2 (got {0})")]
    GridTooSmall(usize),
    #[error("room thresholds must satisfy 0 <= battle <= treasure <= trap <= 1 (got {battle}, {treasure}, {trap})")]
    BadThresholds { battle: f64, treasure: f64, trap: f64 },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("timing.resolve_delay_ms ({resolve}) must not exceed timing.dice_display_ms ({display})")]
    DiceHidesBeforeOutcome { resolve: u64, display: u64 },
}

/// Complete tuning for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub floor_level: u32,
    pub player: PlayerConfig,
    pub boss: BossConfig,
    pub rooms: RoomTable,
    pub rewards: RewardConfig,
    pub timing: TimingConfig,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            floor_level: 1,
            player: PlayerConfig::default(),
            boss: BossConfig::default(),
            rooms: RoomTable::default(),
            rewards: RewardConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

/// Starting (and maximum) player resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hp: u32,
    pub max_mp: u32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self { max_hp: 100, max_mp: 50 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_hp: u32,
    /// Damage dealt to the boss by one successful attack.
    pub attack_damage: u32,
    /// Gold granted when the boss falls.
    pub victory_gold: u32,
}
impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_hp: 50,
            attack_damage: 10,
            victory_gold: 500,
        }
    }
}

/// Cumulative upper bounds for typing a room from one uniform draw in `[0, 1)`.
///
/// A draw below `battle` makes a battle room, below `treasure` a treasure room, below `trap` a
/// trap room, and anything else an empty room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTable {
    pub battle: f64,
    pub treasure: f64,
    pub trap: f64,
}
impl Default for RoomTable {
    fn default() -> Self {
        Self {
            battle: 0.30,
            treasure: 0.50,
            trap: 0.65,
        }
    }
}

/// Gold and damage ranges. Each range is `[min, min + span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub treasure_min: u32,
    pub treasure_span: u32,
    pub loot_min: u32,
    pub loot_span: u32,
    pub damage_min: u32,
    pub damage_span: u32,
    pub trap_damage: u32,
    pub defend_heal: u32,
}
impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            treasure_min: 20,
            treasure_span: 50,
            loot_min: 10,
            loot_span: 20,
            damage_min: 5,
            damage_span: 10,
            trap_damage: 15,
            defend_heal: 5,
        }
    }
}

/// Pacing delays, in milliseconds of game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub arrival_delay_ms: u64,
    pub resolve_delay_ms: u64,
    pub dice_display_ms: u64,
    /// When false the REPL skips the real-time waits and resolves immediately.
    pub pacing: bool,
}
impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            arrival_delay_ms: 300,
            resolve_delay_ms: 1000,
            dice_display_ms: 2000,
            pacing: true,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text and validate it.
    ///
    /// # Errors
    /// - on malformed TOML or values rejected by [`GameConfig::validate`]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text).context("parsing game config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    ///
    /// # Errors
    /// - if the file cannot be read or fails to parse / validate
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("loading config from {}", path.display()))
    }

    /// Check that the values describe a playable dungeon.
    ///
    /// # Errors
    /// - [`ConfigError`] describing the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        let RoomTable { battle, treasure, trap } = self.rooms;
        let ordered = 0.0 <= battle && battle <= treasure && treasure <= trap && trap <= 1.0;
        if !ordered {
            return Err(ConfigError::BadThresholds { battle, treasure, trap });
        }
        if self.player.max_hp == 0 {
            return Err(ConfigError::Zero("player.max_hp"));
        }
        if self.boss.max_hp == 0 {
            return Err(ConfigError::Zero("boss.max_hp"));
        }
        if self.boss.attack_damage == 0 {
            return Err(ConfigError::Zero("boss.attack_damage"));
        }
        let TimingConfig {
            resolve_delay_ms,
            dice_display_ms,
            ..
        } = self.timing;
        if resolve_delay_ms > dice_display_ms {
            return Err(ConfigError::DiceHidesBeforeOutcome {
                resolve: resolve_delay_ms,
                display: dice_display_ms,
            });
        }
        Ok(())
    }
}

/// Candidate config files, most specific first.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(explicit));
    }
    if let Some(dir) = user_config_dir() {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    candidates.push(data_path(CONFIG_FILE_NAME));
    candidates
}

/// Load the first config file that exists, or the defaults when there is none.
///
/// # Errors
/// - if a config file exists but cannot be read, parsed or validated
pub fn load_config() -> Result<GameConfig> {
    for path in config_candidates() {
        if path.is_file() {
            info!("loading game config from {}", path.display());
            return GameConfig::from_file(&path);
        }
    }
    info!("no config file found, using built-in defaults");
    Ok(GameConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            grid_size = 7

            [boss]
            max_hp = 80
            "#,
        )
        .unwrap();
        assert_eq!(config.grid_size, 7);
        assert_eq!(config.boss.max_hp, 80);
        assert_eq!(config.boss.attack_damage, 10);
        assert_eq!(config.player, PlayerConfig::default());
        assert_eq!(config.timing.resolve_delay_ms, 1000);
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = GameConfig {
            grid_size: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::GridTooSmall(1)));
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let err = GameConfig::from_toml_str("[rooms]\nbattle = 0.6\ntreasure = 0.5\n").unwrap_err();
        assert!(err.to_string().contains("room thresholds"));
    }

    #[test]
    fn zero_boss_damage_is_rejected() {
        let mut config = GameConfig::default();
        config.boss.attack_damage = 0;
        assert_eq!(config.validate(), Err(ConfigError::Zero("boss.attack_damage")));
    }

    #[test]
    fn outcome_must_resolve_before_dice_hide() {
        let mut config = GameConfig::default();
        config.timing.resolve_delay_ms = 2500;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DiceHidesBeforeOutcome {
                resolve: 2500,
                display: 2000
            })
        );

        config.timing.resolve_delay_ms = 2000;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\npacing = false\n").unwrap();
        let config = GameConfig::from_file(file.path()).unwrap();
        assert!(!config.timing.pacing);
        assert_eq!(config.timing.arrival_delay_ms, 300);
    }

    #[test]
    fn missing_file_is_an_error_for_from_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::from_file(&dir.path().join("nope.toml")).is_err());
    }
}
