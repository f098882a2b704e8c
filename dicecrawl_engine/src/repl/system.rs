//! `repl::system` module
//!
//! Contains repl loop handlers for commands that inspect or restart the game.

use anyhow::{Context, Result};
use log::info;

use crate::engine::Engine;
use crate::repl::{ChatCursor, ReplControl};
use crate::{View, ViewItem};

/// Show the command list.
pub fn help_handler(view: &mut View) {
    view.push(ViewItem::Help);
}

/// Show the fog-of-war mini-map.
pub fn map_handler(engine: &Engine, view: &mut View) {
    view.push(ViewItem::MiniMap(engine.snapshot()));
}

/// Show the status bar.
pub fn status_handler(engine: &Engine, view: &mut View) {
    view.push(ViewItem::StatusBar(engine.snapshot()));
}

/// Print the full snapshot as pretty JSON.
///
/// # Errors
/// - if the snapshot can't be serialized
pub fn snapshot_handler(engine: &Engine, view: &mut View) -> Result<()> {
    let json = serde_json::to_string_pretty(&engine.snapshot()).context("serializing game snapshot")?;
    view.push(ViewItem::SnapshotJson(json));
    Ok(())
}

/// Abandon the run and start over in a fresh dungeon.
pub fn reset_handler(engine: &mut Engine, view: &mut View, cursor: &mut ChatCursor) {
    engine.reset();
    cursor.rewind();
    view.push(ViewItem::EngineMessage("A new dungeon takes shape around you.".to_string()));
    view.push(ViewItem::StatusBar(engine.snapshot()));
}

/// Quit the game.
pub fn quit_handler(engine: &Engine, view: &mut View) -> ReplControl {
    let state = engine.state();
    info!(
        "player quit: status {:?}, {} gold, {} hp, at {}",
        state.status,
        state.player.gold,
        state.player.hp.current(),
        state.player_position
    );
    view.push(ViewItem::Farewell(engine.snapshot()));
    ReplControl::Quit
}
