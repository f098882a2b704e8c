//! Dungeon grid and generator.
//!
//! The dungeon is a square grid of [`Room`]s stored row-major. 4-directional adjacency on a full
//! rectangle is connected, so generation never has to carve paths.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, RoomTable};
use crate::rng::GameRng;
use crate::room::{Position, Room, RoomKind};

/// A `size` × `size` grid of rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    size: usize,
    rooms: Vec<Room>,
}
impl Dungeon {
    /// A grid of unvisited, unrevealed empty rooms.
    pub fn new_empty(size: usize) -> Self {
        Self {
            size,
            rooms: vec![Room::default(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn room(&self, pos: Position) -> Option<&Room> {
        if self.contains(pos) {
            self.rooms.get(pos.y * self.size + pos.x)
        } else {
            None
        }
    }

    pub fn room_mut(&mut self, pos: Position) -> Option<&mut Room> {
        if self.contains(pos) {
            self.rooms.get_mut(pos.y * self.size + pos.x)
        } else {
            None
        }
    }

    /// Iterate rows from north to south.
    pub fn rows(&self) -> impl Iterator<Item = &[Room]> {
        self.rooms.chunks(self.size.max(1))
    }

    /// Iterate every room with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Room)> {
        let size = self.size;
        self.rooms
            .iter()
            .enumerate()
            .map(move |(idx, room)| (Position::new(idx % size, idx / size), room))
    }

    /// Number of rooms of the given kind.
    pub fn count_kind(&self, kind: RoomKind) -> usize {
        self.rooms.iter().filter(|room| room.kind == kind).count()
    }

    /// Where the boss waits, if it is still alive.
    pub fn boss_position(&self) -> Option<Position> {
        self.iter().find(|(_, room)| room.kind == RoomKind::Boss).map(|(pos, _)| pos)
    }

    /// Visit `pos` and reveal its in-bounds neighbors.
    pub fn visit_and_reveal(&mut self, pos: Position) {
        if let Some(room) = self.room_mut(pos) {
            room.visit();
        }
        for neighbor in pos.neighbors(self.size) {
            if let Some(room) = self.room_mut(neighbor) {
                room.reveal();
            }
        }
    }

    fn random_cell(&self, rng: &mut dyn GameRng) -> Position {
        let size = u32::try_from(self.size).unwrap_or(u32::MAX);
        Position::new(rng.range(0, size) as usize, rng.range(0, size) as usize)
    }
}

/// Type a room from one uniform draw in `[0, 1)`.
pub fn kind_for_draw(draw: f64, table: &RoomTable) -> RoomKind {
    if draw < table.battle {
        RoomKind::Battle
    } else if draw < table.treasure {
        RoomKind::Treasure
    } else if draw < table.trap {
        RoomKind::Trap
    } else {
        RoomKind::Empty
    }
}

/// Build a fresh dungeon for `level`. Returns the grid and the start position.
///
/// Start and boss cells are drawn uniformly (the boss by rejection sampling until it lands
/// elsewhere); every other cell is typed by [`kind_for_draw`]. The start room is visited and its
/// neighbors revealed.
pub fn generate(level: u32, config: &GameConfig, rng: &mut dyn GameRng) -> (Dungeon, Position) {
    let mut dungeon = Dungeon::new_empty(config.grid_size);

    let start = dungeon.random_cell(rng);
    let mut boss = dungeon.random_cell(rng);
    while boss == start {
        boss = dungeon.random_cell(rng);
    }

    for (idx, room) in dungeon.rooms.iter_mut().enumerate() {
        let pos = Position::new(idx % config.grid_size, idx / config.grid_size);
        room.kind = if pos == start {
            RoomKind::Start
        } else if pos == boss {
            RoomKind::Boss
        } else {
            kind_for_draw(rng.unit(), &config.rooms)
        };
    }
    dungeon.visit_and_reveal(start);

    info!(
        "generated floor {level}: {size}x{size}, start {start}, boss {boss}, {battles} battle / {treasure} treasure / {traps} trap rooms",
        size = config.grid_size,
        battles = dungeon.count_kind(RoomKind::Battle),
        treasure = dungeon.count_kind(RoomKind::Treasure),
        traps = dungeon.count_kind(RoomKind::Trap),
    );
    (dungeon, start)
}
