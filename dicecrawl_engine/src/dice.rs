//! The dice overlay signal.
//!
//! Shown when an action is rolled and hidden again by its own timer. Nothing in the rules reads it.

use serde::{Deserialize, Serialize};

use crate::combat::is_success;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceResult {
    pub value: u32,
    pub is_success: bool,
    pub visible: bool,
}
impl DiceResult {
    /// A visible result for `value`.
    pub fn shown(value: u32) -> Self {
        Self {
            value,
            is_success: is_success(value),
            visible: true,
        }
    }

    /// Hide the overlay, keeping the last value.
    pub fn hide(&mut self) {
        self.visible = false;
    }
}
