use dicecrawl_engine as dc;

use dc::combat::{ActionRolls, CombatAction, resolve_action};
use dc::health::Pool;
use dc::rng::ScriptedDice;
use dc::{Direction, Dungeon, Engine, GameConfig, GameState, GameStatus, Position, RoomKind, Sender};

/// Engine on a hand-built 5x5 floor, player on the start room at the center.
fn engine_with(rooms: &[(Position, RoomKind)], dice: ScriptedDice) -> Engine {
    let config = GameConfig::default();
    let start = Position::new(2, 2);
    let mut dungeon = Dungeon::new_empty(config.grid_size);
    for (pos, kind) in rooms.iter().chain([(start, RoomKind::Start)].iter()) {
        if let Some(room) = dungeon.room_mut(*pos) {
            room.kind = *kind;
        }
    }
    dungeon.visit_and_reveal(start);
    let state = GameState::new(&config, dungeon, start);
    Engine::with_state(config, state, Box::new(dice))
}

fn kind_at(engine: &Engine, pos: Position) -> RoomKind {
    engine.state().dungeon.room(pos).map(|room| room.kind).unwrap_or_default()
}

#[test]
fn scenario_a_treasure_room_pays_out_and_empties() {
    let north = Position::new(2, 1);
    let mut engine = engine_with(&[(north, RoomKind::Treasure)], ScriptedDice::new());

    engine.move_player(Direction::North).unwrap();
    engine.settle();

    let gold = engine.state().player.gold;
    assert!((20..70).contains(&gold), "gold {gold} outside [20,70)");
    assert_eq!(kind_at(&engine, north), RoomKind::Empty);
    assert_eq!(engine.state().status, GameStatus::Exploration);
}

#[test]
fn scenario_b_successful_flee_clears_battle_room() {
    let east = Position::new(3, 2);
    let mut engine = engine_with(&[(east, RoomKind::Battle)], ScriptedDice::new().with_ints([40, 15]));

    engine.move_player(Direction::East).unwrap();
    engine.settle();
    assert_eq!(engine.state().status, GameStatus::Combat);

    engine.choose_action("flee").unwrap();
    assert_eq!(engine.dice().value, 15);
    engine.settle();

    assert_eq!(kind_at(&engine, east), RoomKind::Empty);
    assert_eq!(engine.state().status, GameStatus::Exploration);
    let last = engine.chat().last().unwrap();
    assert_eq!(last.sender, Sender::Gm);
    assert!(last.text.contains("(Roll: 15)"));
}

#[test]
fn scenario_c_failed_action_at_low_hp_ends_the_game() {
    let config = GameConfig::default();
    let start = Position::new(0, 0);
    let mut dungeon = Dungeon::new_empty(5);
    if let Some(room) = dungeon.room_mut(start) {
        room.kind = RoomKind::Battle;
    }
    dungeon.visit_and_reveal(start);
    let mut state = GameState::new(&config, dungeon, start);
    state.status = GameStatus::Combat;
    state.player.hp = Pool::new(10, 100);

    let rolls = ActionRolls {
        die: 4,
        loot: 10,
        damage: 15,
    };
    let resolution = resolve_action(&state, CombatAction::Attack, &rolls, &config).unwrap();
    assert_eq!(resolution.state.player.hp.current(), 0);
    assert_eq!(resolution.state.status, GameStatus::GameOver);
    // the input state is untouched
    assert_eq!(state.player.hp.current(), 10);
}

#[test]
fn scenario_c_through_the_engine() {
    let south = Position::new(2, 3);
    let mut dice = ScriptedDice::new().with_ints([40]);
    // every round: roll 2, loot 10, heaviest hit (14)
    for _ in 0..8 {
        dice.push_int(2);
        dice.push_int(10);
        dice.push_int(14);
    }
    let mut engine = engine_with(&[(south, RoomKind::Battle)], dice);
    engine.move_player(Direction::South).unwrap();
    engine.settle();

    let mut rounds = 0;
    while engine.state().status == GameStatus::Combat {
        engine.choose_action("attack").unwrap();
        engine.settle();
        rounds += 1;
    }

    assert_eq!(rounds, 8);
    assert_eq!(engine.state().status, GameStatus::GameOver);
    assert_eq!(engine.state().player.hp.current(), 0);
    assert!(engine.chat().last().unwrap().text.contains("GAME OVER"));
    assert_eq!(engine.choose_action("attack"), Err(dc::Rejection::GameFinished));
}

#[test]
fn scenario_d_five_hits_slay_the_boss() {
    let west = Position::new(1, 2);
    let mut dice = ScriptedDice::new().with_ints([40]);
    for _ in 0..5 {
        dice.push_int(18);
        dice.push_int(10);
        dice.push_int(5);
    }
    let mut engine = engine_with(&[(west, RoomKind::Boss)], dice);

    engine.move_player(Direction::West).unwrap();
    engine.settle();
    assert_eq!(engine.state().status, GameStatus::Combat);

    for hit in 1..=5u32 {
        engine.choose_action("attack").unwrap();
        engine.settle();
        assert_eq!(engine.state().boss.current(), 50 - hit * 10);
        if hit < 5 {
            assert_eq!(engine.state().status, GameStatus::Combat);
            assert_eq!(kind_at(&engine, west), RoomKind::Boss);
        }
    }

    assert_eq!(engine.state().status, GameStatus::Victory);
    assert_eq!(kind_at(&engine, west), RoomKind::Empty);
    assert_eq!(engine.state().player.gold, 500);
}

#[test]
fn scenario_e_reset_after_game_over() {
    let north = Position::new(2, 1);
    let mut engine = engine_with(&[(north, RoomKind::Trap)], ScriptedDice::new());
    engine.move_player(Direction::North).unwrap();
    engine.settle();
    assert!(engine.state().player.hp.current() < 100);

    let mut state = engine.state().clone();
    state.status = GameStatus::GameOver;
    let mut engine = Engine::with_state(GameConfig::default(), state, Box::new(ScriptedDice::new()));
    assert!(engine.move_player(Direction::South).is_err());

    engine.reset();
    let state = engine.state();
    assert_eq!(state.dungeon.count_kind(RoomKind::Start), 1);
    assert_eq!(state.dungeon.count_kind(RoomKind::Boss), 1);
    assert_ne!(state.dungeon.boss_position(), Some(state.player_position));
    assert_eq!(state.player.hp.current(), state.player.hp.max());
    assert_eq!(state.player.gold, 0);
    assert_eq!(state.status, GameStatus::Exploration);
    assert_eq!(engine.chat().len(), 1);
    assert_eq!(engine.chat().messages()[0].sender, Sender::Gm);
}
