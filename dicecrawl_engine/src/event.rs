//! Room events.
//!
//! When the player arrives in a room, exactly one effect fires based on the room's kind. Treasure
//! and traps are consumed (the room turns empty). Battle and boss rooms start an encounter and stay
//! as they are until the encounter is won.

use log::info;

use crate::config::{GameConfig, RewardConfig};
use crate::rng::GameRng;
use crate::room::{Position, RoomKind};
use crate::state::{GameState, GameStatus};

/// Random numbers an arrival may need, drawn before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalRolls {
    pub treasure_gold: u32,
}
impl ArrivalRolls {
    pub fn draw(rng: &mut dyn GameRng, rewards: &RewardConfig) -> Self {
        Self {
            treasure_gold: rng.from_span(rewards.treasure_min, rewards.treasure_span),
        }
    }
}

/// What happened on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalEvent {
    /// Nothing here. Carries the kind so narration can tell the start room apart.
    Quiet(RoomKind),
    Treasure { gold: u32 },
    Trap { damage: u32, fatal: bool },
    Ambush,
    BossEncounter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub state: GameState,
    pub event: ArrivalEvent,
}

/// Fire the one-time effect of the room at `pos`.
pub fn resolve_arrival(state: &GameState, pos: Position, rolls: &ArrivalRolls, config: &GameConfig) -> Arrival {
    let mut next = state.clone();
    let kind = next.dungeon.room(pos).map_or(RoomKind::Empty, |room| room.kind);

    let event = match kind {
        RoomKind::Empty | RoomKind::Start => ArrivalEvent::Quiet(kind),
        RoomKind::Treasure => {
            next.player.add_gold(rolls.treasure_gold);
            clear_room(&mut next, pos);
            ArrivalEvent::Treasure {
                gold: rolls.treasure_gold,
            }
        },
        RoomKind::Trap => {
            let damage = next.player.hp.damage(config.rewards.trap_damage);
            clear_room(&mut next, pos);
            let fatal = next.player.is_dead();
            if fatal {
                next.status = GameStatus::GameOver;
            }
            ArrivalEvent::Trap { damage, fatal }
        },
        RoomKind::Battle => {
            next.status = GameStatus::Combat;
            ArrivalEvent::Ambush
        },
        RoomKind::Boss => {
            next.status = GameStatus::Combat;
            ArrivalEvent::BossEncounter
        },
    };
    info!("arrival at {pos} ({kind}): {event:?}, status now {:?}", next.status);
    Arrival { state: next, event }
}

fn clear_room(state: &mut GameState, pos: Position) {
    if let Some(room) = state.dungeon.room_mut(pos) {
        room.clear();
    }
}
