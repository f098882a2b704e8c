//! Fog of war and movement.
//!
//! Moving is the only thing that lifts the fog. The destination becomes visited, its neighbors
//! become revealed, and the player token moves, all on a copy of the state.

use log::info;

use crate::rejection::Rejection;
use crate::room::Direction;
use crate::state::{GameState, GameStatus};

/// Move the player one room in `direction`.
///
/// # Errors
/// - [`Rejection::GameFinished`] after victory or death
/// - [`Rejection::NotExploring`] during combat
/// - [`Rejection::OutOfBounds`] when the step would leave the grid
pub fn step(state: &GameState, direction: Direction) -> Result<GameState, Rejection> {
    match state.status {
        GameStatus::Exploration => {},
        GameStatus::Combat => return Err(Rejection::NotExploring),
        GameStatus::Victory | GameStatus::GameOver => return Err(Rejection::GameFinished),
    }

    let from = state.player_position;
    let to = from
        .step(direction, state.dungeon.size())
        .ok_or(Rejection::OutOfBounds(direction))?;

    let mut next = state.clone();
    next.dungeon.visit_and_reveal(to);
    next.player_position = to;
    info!("player moved {direction} from {from} to {to}");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::dungeon::Dungeon;
    use crate::room::{Position, RoomKind};

    fn state_at(x: usize, y: usize) -> GameState {
        let mut dungeon = Dungeon::new_empty(5);
        let start = Position::new(x, y);
        if let Some(room) = dungeon.room_mut(start) {
            room.kind = RoomKind::Start;
        }
        dungeon.visit_and_reveal(start);
        GameState::new(&GameConfig::default(), dungeon, start)
    }

    #[test]
    fn moving_visits_destination_and_reveals_neighbors() {
        let state = state_at(2, 2);
        let next = step(&state, Direction::North).unwrap();
        assert_eq!(next.player_position, Position::new(2, 1));

        let dest = next.dungeon.room(Position::new(2, 1)).unwrap();
        assert!(dest.visited() && dest.revealed());
        let beyond = next.dungeon.room(Position::new(2, 0)).unwrap();
        assert!(beyond.revealed());
        assert!(!beyond.visited());
    }

    #[test]
    fn prior_state_is_untouched() {
        let state = state_at(2, 2);
        let before = state.clone();
        let _next = step(&state, Direction::East).unwrap();
        assert_eq!(state, before);
        assert!(!state.dungeon.room(Position::new(3, 2)).unwrap().visited());
    }

    #[test]
    fn every_edge_rejects_the_outward_step() {
        for i in 0..5 {
            let cases = [
                (Position::new(i, 0), Direction::North),
                (Position::new(i, 4), Direction::South),
                (Position::new(0, i), Direction::West),
                (Position::new(4, i), Direction::East),
            ];
            for (pos, dir) in cases {
                let state = state_at(pos.x, pos.y);
                assert_eq!(step(&state, dir), Err(Rejection::OutOfBounds(dir)));
            }
        }
    }

    #[test]
    fn combat_blocks_movement() {
        let mut state = state_at(2, 2);
        state.status = GameStatus::Combat;
        assert_eq!(step(&state, Direction::North), Err(Rejection::NotExploring));
    }

    #[test]
    fn finished_games_block_movement() {
        let mut state = state_at(2, 2);
        state.status = GameStatus::GameOver;
        assert_eq!(step(&state, Direction::North), Err(Rejection::GameFinished));
        state.status = GameStatus::Victory;
        assert_eq!(step(&state, Direction::South), Err(Rejection::GameFinished));
    }
}
