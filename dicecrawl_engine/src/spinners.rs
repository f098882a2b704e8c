//! Flavor text.
//!
//! Narration for quiet moments is picked at random from small spinners so repeated rooms don't read
//! identically. The rules never depend on which line comes up.

use std::collections::HashMap;

use gametools::spinners::{Spinner, Wedge};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinnerType {
    EmptyRoom,
    StartRoom,
    Ambush,
    BossEncounter,
    Footsteps,
}

pub trait SpinnerExt {
    fn from_strs(words: &[&str]) -> Self;
}
impl SpinnerExt for Spinner<String> {
    fn from_strs(words: &[&str]) -> Self {
        let wedges = words.iter().map(|w| Wedge::new((*w).to_string())).collect::<Vec<_>>();
        Spinner::new(wedges)
    }
}

/// The built-in narration tables.
pub fn default_spinners() -> HashMap<SpinnerType, Spinner<String>> {
    let mut spinners: HashMap<SpinnerType, Spinner<String>> = HashMap::new();
    spinners.insert(
        SpinnerType::EmptyRoom,
        Spinner::from_strs(&[
            "The room is silent. Dust drifts through a thin shaft of light.",
            "Nothing here but old bones and the smell of damp stone.",
            "Water drips somewhere in the dark. The room is empty.",
            "Scratches on the walls, but whatever made them is long gone.",
        ]),
    );
    spinners.insert(
        SpinnerType::StartRoom,
        Spinner::from_strs(&[
            "You are back at the entrance. The way out is sealed behind you.",
            "The familiar stones of the entrance hall. Safe, for now.",
        ]),
    );
    spinners.insert(
        SpinnerType::Ambush,
        Spinner::from_strs(&[
            "A monster lunges out of the shadows!",
            "Something snarls in the dark and charges you!",
            "Yellow eyes open in the gloom. A monster blocks your path!",
        ]),
    );
    spinners.insert(
        SpinnerType::BossEncounter,
        Spinner::from_strs(&[
            "The floor shakes. The master of this dungeon rises before you!",
            "A towering shape fills the chamber. The boss has found you!",
        ]),
    );
    spinners.insert(
        SpinnerType::Footsteps,
        Spinner::from_strs(&[
            "Your footsteps echo down the corridor...",
            "You creep forward, torch held high...",
            "You press on into the dark...",
        ]),
    );
    spinners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_spinner_type_has_text() {
        let spinners = default_spinners();
        for kind in [
            SpinnerType::EmptyRoom,
            SpinnerType::StartRoom,
            SpinnerType::Ambush,
            SpinnerType::BossEncounter,
            SpinnerType::Footsteps,
        ] {
            let line = spinners.get(&kind).and_then(Spinner::spin);
            assert!(line.is_some_and(|l| !l.is_empty()), "{kind:?} spun nothing");
        }
    }
}
