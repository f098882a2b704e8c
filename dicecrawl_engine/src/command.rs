//! Command module
//!
//! Describes possible commands typed at the prompt.
use variantly;

use crate::combat::CombatAction;
use crate::room::Direction;

/// Commands that can be entered by the player.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    /// Combat action, carried as typed so the chat echo keeps the player's wording.
    Act(String),
    Go(Direction),
    Help,
    Map,
    Quit,
    Reset,
    Snapshot,
    Status,
    Unknown(String),
}

/// Parses an input string and returns the matching `Command`.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["go" | "move" | "walk", dir] | [dir] if dir.parse::<Direction>().is_ok() => {
            dir.parse().map_or_else(|_| Command::Unknown(input.trim().to_string()), Command::Go)
        },
        ["map" | "m"] => Command::Map,
        ["status" | "stats" | "hp"] => Command::Status,
        ["snapshot" | "dump"] => Command::Snapshot,
        ["reset" | "restart"] | ["new", "game"] => Command::Reset,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        [word] if CombatAction::from_label(word).is_some() => Command::Act(input.trim().to_string()),
        _ => Command::Unknown(input.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directions_bare_and_with_verb() {
        assert_eq!(parse_command("n"), Command::Go(Direction::North));
        assert_eq!(parse_command("go east"), Command::Go(Direction::East));
        assert_eq!(parse_command("  West "), Command::Go(Direction::West));
        assert_eq!(parse_command("move s"), Command::Go(Direction::South));
        assert!(parse_command("w").is_go());
        assert!(!parse_command("map").is_go());
    }

    #[test]
    fn parses_combat_labels() {
        assert_eq!(parse_command("attack"), Command::Act("attack".into()));
        assert_eq!(parse_command("ป้องกัน"), Command::Act("ป้องกัน".into()));
        assert!(parse_command("flee").is_act());
    }

    #[test]
    fn parses_system_commands() {
        assert_eq!(parse_command("map"), Command::Map);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("new game"), Command::Reset);
        assert_eq!(parse_command("exit"), Command::Quit);
    }

    #[test]
    fn unknown_keeps_input() {
        assert_eq!(parse_command("go sideways"), Command::Unknown("go sideways".into()));
        assert!(parse_command("").is_unknown());
    }
}
