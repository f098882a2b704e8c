//! The authoritative game state.
//!
//! [`GameState`] is a plain value. Resolvers take `&GameState` and hand back a new one, so a
//! half-applied transition is never visible to anyone holding the old value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::dungeon::Dungeon;
use crate::health::Pool;
use crate::player::PlayerStats;
use crate::room::{Position, Room, RoomKind};

/// Phase of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Movement enabled, combat actions disabled.
    #[default]
    Exploration,
    /// Movement disabled; attack, defend and flee enabled.
    Combat,
    /// The boss is dead. Only reset is accepted.
    Victory,
    /// The player is dead. Only reset is accepted.
    GameOver,
}
impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::GameOver)
    }
}
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Exploration => "exploring",
            GameStatus::Combat => "in combat",
            GameStatus::Victory => "victory",
            GameStatus::GameOver => "game over",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerStats,
    pub dungeon: Dungeon,
    pub player_position: Position,
    pub status: GameStatus,
    pub floor_level: u32,
    /// Boss health lives here rather than on the boss room; there is only ever one boss.
    pub boss: Pool,
}
impl GameState {
    /// Initial state for a freshly generated dungeon.
    pub fn new(config: &GameConfig, dungeon: Dungeon, start: Position) -> Self {
        Self {
            player: PlayerStats::new(&config.player),
            dungeon,
            player_position: start,
            status: GameStatus::Exploration,
            floor_level: config.floor_level,
            boss: Pool::new_at_max(config.boss.max_hp),
        }
    }

    /// The room the player is standing in.
    pub fn current_room(&self) -> Option<&Room> {
        self.dungeon.room(self.player_position)
    }

    /// Kind of the player's current room, `Empty` if the position is somehow off the grid.
    pub fn current_kind(&self) -> RoomKind {
        self.current_room().map_or(RoomKind::Empty, |room| room.kind)
    }

    /// Read-only view handed to presentation code.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            hp: self.player.hp.current(),
            max_hp: self.player.hp.max(),
            mp: self.player.mp.current(),
            max_mp: self.player.mp.max(),
            gold: self.player.gold,
            grid: self.dungeon.rows().map(<[Room]>::to_vec).collect(),
            player_position: self.player_position,
            game_status: self.status,
            floor_level: self.floor_level,
            boss_hp: self.boss.current(),
            max_boss_hp: self.boss.max(),
        }
    }
}

/// Everything the view layer reads after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub gold: u32,
    /// Rows from north to south.
    pub grid: Vec<Vec<Room>>,
    pub player_position: Position,
    pub game_status: GameStatus,
    pub floor_level: u32,
    pub boss_hp: u32,
    pub max_boss_hp: u32,
}
impl Snapshot {
    pub fn room(&self, pos: Position) -> Option<&Room> {
        self.grid.get(pos.y).and_then(|row| row.get(pos.x))
    }

    /// Kind of the room under the player, for header art and the status line.
    pub fn current_kind(&self) -> RoomKind {
        self.room(self.player_position).map_or(RoomKind::Empty, |room| room.kind)
    }
}
