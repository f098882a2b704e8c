//! `repl::movement` module
//!
//! Contains the repl loop handler for moving between rooms.

use log::info;

use crate::engine::Engine;
use crate::room::Direction;

/// Move the player one room in `direction`.
///
/// A refused move is already explained in the chat log, so there is nothing more to show here.
pub fn move_handler(engine: &mut Engine, direction: Direction) {
    match engine.move_player(direction) {
        Ok(()) => info!("player moved {direction} to {}", engine.state().player_position),
        Err(rejection) => info!("move {direction} refused: {rejection:?}"),
    }
}
