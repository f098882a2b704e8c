#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const DICECRAWL_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod chat;
pub mod combat;
pub mod command;
pub mod config;
pub mod data_paths;
pub mod dice;
pub mod dungeon;
pub mod engine;
pub mod event;
pub mod health;
pub mod movement;
pub mod player;
pub mod rejection;
pub mod repl;
pub mod rng;
pub mod room;
pub mod scheduler;
pub mod spinners;
pub mod state;
pub mod style;
pub mod view;

// Re-exports for convenience
pub use chat::{ChatLog, ChatMessage, Sender, Tone};
pub use combat::CombatAction;
pub use config::{GameConfig, load_config};
pub use dice::DiceResult;
pub use dungeon::Dungeon;
pub use engine::Engine;
pub use rejection::Rejection;
pub use repl::run_repl;
pub use room::{Direction, Position, Room, RoomKind};
pub use state::{GameState, GameStatus, Snapshot};
pub use view::{View, ViewItem};
