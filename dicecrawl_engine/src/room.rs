//! Room definitions and grid coordinates.
//!
//! A room is one cell of the dungeon grid. Its kind decides what happens when the player walks in;
//! `visited` and `revealed` drive the fog of war.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a room holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Start,
    #[default]
    Empty,
    Battle,
    Treasure,
    Trap,
    Boss,
}
impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomKind::Start => "start",
            RoomKind::Empty => "empty",
            RoomKind::Battle => "battle",
            RoomKind::Treasure => "treasure",
            RoomKind::Trap => "trap",
            RoomKind::Boss => "boss",
        };
        f.write_str(name)
    }
}

/// One cell of the dungeon.
///
/// `visited` means the player has stood here; `revealed` means the fog has lifted. A visited room
/// is always revealed, which the setters below maintain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Room {
    pub kind: RoomKind,
    visited: bool,
    revealed: bool,
}
impl Room {
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            visited: false,
            revealed: false,
        }
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Mark the room as stood in. Also reveals it.
    pub fn visit(&mut self) {
        self.visited = true;
        self.revealed = true;
    }

    /// Lift the fog without visiting.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Consume the room's one-time content.
    pub fn clear(&mut self) {
        self.kind = RoomKind::Empty;
    }
}

/// Grid coordinates. `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}
impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The cell one step away, if it is inside a `size` × `size` grid.
    pub fn step(self, direction: Direction, size: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Position { x, y })
    }

    /// The in-bounds 4-directional neighbors.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().filter_map(move |dir| self.step(dir, size))
    }
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass directions for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}
impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Unit step on the grid: N (0,-1), S (0,+1), E (+1,0), W (-1,0).
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}
impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" | "up" => Ok(Direction::North),
            "s" | "south" | "down" => Ok(Direction::South),
            "e" | "east" | "right" => Ok(Direction::East),
            "w" | "west" | "left" => Ok(Direction::West),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}
