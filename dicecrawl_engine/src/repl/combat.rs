//! `repl::combat` module
//!
//! Contains the repl loop handler for combat actions.

use log::info;

use crate::engine::Engine;
use crate::{View, ViewItem};

/// Take a combat action and show the die as soon as it is rolled.
pub fn action_handler(engine: &mut Engine, view: &mut View, label: &str) {
    match engine.choose_action(label) {
        Ok(()) => {
            let dice = engine.dice();
            info!("action \"{label}\" rolled {}", dice.value);
            view.push(ViewItem::Dice(dice));
        },
        Err(rejection) => info!("action \"{label}\" refused: {rejection:?}"),
    }
}
