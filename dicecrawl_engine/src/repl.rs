//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that drive the [`Engine`].

pub mod combat;
mod input;
pub mod movement;
pub mod system;

pub use combat::*;
pub use movement::*;
pub use system::*;

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::info;

use crate::command::{Command, parse_command};
use crate::engine::Engine;
use crate::style::GameStyle;
use crate::{View, ViewItem};

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Tracks which chat messages have already been shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChatCursor {
    seen: u64,
}
impl ChatCursor {
    /// Push every chat message not yet shown onto the view.
    pub fn catch_up(&mut self, engine: &Engine, view: &mut View) {
        let fresh = engine.chat().since(self.seen);
        view.push_chat(fresh);
        if let Some(last) = fresh.last() {
            self.seen = last.seq;
        }
    }

    /// Start over from the first message, after the log has been replaced.
    pub fn rewind(&mut self) {
        self.seen = 0;
    }
}

/// Run the main read–eval–print loop until the user quits.
///
/// Handles prompting, command parsing and dispatch, then lets the engine's
/// pending tasks play out before the next prompt.
///
/// # Errors
/// - Propagates failures from handlers, such as a snapshot that can't be serialized.
pub fn run_repl(engine: &mut Engine) -> Result<()> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;
    let mut view = View::new();
    let mut cursor = ChatCursor::default();
    let mut input_manager = InputManager::new();

    cursor.catch_up(engine, &mut view);
    view.push(ViewItem::StatusBar(engine.snapshot()));
    view.flush();

    loop {
        let prompt = prompt_text(engine).prompt_style().to_string();
        let input_event = if let Ok(event) = input_manager.read_line(&prompt) {
            event
        } else {
            view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
            view.flush();
            continue;
        };

        let input = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };
        if input.trim().is_empty() {
            continue;
        }

        let command = parse_command(&input);
        info!("command: {command:?}");
        match &command {
            Go(direction) => move_handler(engine, *direction),
            Act(label) => action_handler(engine, &mut view, label),
            Map => map_handler(engine, &mut view),
            Status => status_handler(engine, &mut view),
            Snapshot => snapshot_handler(engine, &mut view)?,
            Reset => reset_handler(engine, &mut view, &mut cursor),
            Help => help_handler(&mut view),
            Quit => {
                if let ReplControl::Quit = quit_handler(engine, &mut view) {
                    view.flush();
                    break;
                }
            },
            Unknown(text) => {
                view.push(ViewItem::Error(format!(
                    "Didn't quite catch \"{text}\". Type help for a list of commands."
                )));
            },
        }

        play_out(engine, &mut view, &mut cursor);
    }
    Ok(())
}

/// Show the immediate results of a command, then fire the engine's scheduled tasks one by one,
/// waiting out each delay when pacing is on.
pub fn play_out(engine: &mut Engine, view: &mut View, cursor: &mut ChatCursor) {
    cursor.catch_up(engine, view);
    view.flush();

    let mut fired = false;
    while let Some(due) = engine.next_due() {
        if engine.config().timing.pacing {
            thread::sleep(Duration::from_millis(due.saturating_sub(engine.now())));
        }
        engine.advance_to(due);
        cursor.catch_up(engine, view);
        view.flush();
        fired = true;
    }

    if fired {
        view.push(ViewItem::StatusBar(engine.snapshot()));
        if engine.state().status.is_terminal() {
            view.push(ViewItem::EngineMessage(
                "This run is over. Type reset to try a new dungeon, or quit to leave.".to_string(),
            ));
        }
        view.flush();
    }
}

fn prompt_text(engine: &Engine) -> String {
    let snapshot = engine.snapshot();
    format!(
        "\n[HP: {}/{}|Gold: {}|{}]>> ",
        snapshot.hp, snapshot.max_hp, snapshot.gold, snapshot.game_status
    )
}
