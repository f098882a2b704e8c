use dicecrawl_engine as dc;

use dc::command::{Command, parse_command};
use dc::dungeon::generate;
use dc::rng::{GameRng, ThreadDice};
use dc::{Direction, Engine, GameConfig, GameStatus, Position, Rejection, RoomKind};

fn assert_fog_invariant(engine: &Engine) {
    for (pos, room) in engine.state().dungeon.iter() {
        assert!(!room.visited() || room.revealed(), "room {pos} visited but not revealed");
    }
}

#[test]
fn generated_dungeons_have_one_start_and_one_boss() {
    let config = GameConfig::default();
    let mut rng = ThreadDice::new();
    for level in 1..=200 {
        let (dungeon, start) = generate(level, &config, &mut rng);
        assert_eq!(dungeon.count_kind(RoomKind::Start), 1);
        assert_eq!(dungeon.count_kind(RoomKind::Boss), 1);
        let boss = dungeon.boss_position().unwrap();
        assert_ne!(boss, start);
        let start_room = dungeon.room(start).unwrap();
        assert!(start_room.visited() && start_room.revealed());
        for neighbor in start.neighbors(dungeon.size()) {
            assert!(dungeon.room(neighbor).unwrap().revealed());
        }
    }
}

#[test]
fn random_walk_keeps_invariants() {
    let config = GameConfig::default();
    let max_hp = config.player.max_hp;
    let mut engine = Engine::new(config);
    let mut rng = ThreadDice::new();

    for _ in 0..300 {
        match engine.state().status {
            GameStatus::Exploration => {
                let dir = Direction::ALL[rng.range(0, 4) as usize];
                let before = engine.state().player_position;
                match engine.move_player(dir) {
                    Ok(()) => assert_ne!(engine.state().player_position, before),
                    Err(Rejection::OutOfBounds(_)) => assert_eq!(engine.state().player_position, before),
                    Err(other) => panic!("unexpected rejection {other:?}"),
                }
            },
            GameStatus::Combat => {
                let label = if engine.state().current_kind() == RoomKind::Boss {
                    "attack"
                } else {
                    ["attack", "defend", "flee"][rng.range(0, 3) as usize]
                };
                engine.choose_action(label).unwrap();
            },
            GameStatus::Victory | GameStatus::GameOver => engine.reset(),
        }
        engine.settle();

        let state = engine.state();
        assert!(state.player.hp.current() <= max_hp);
        assert!(state.dungeon.contains(state.player_position));
        assert_fog_invariant(&engine);
    }
}

#[test]
fn edge_moves_are_rejected_without_changes() {
    let mut engine = Engine::new(GameConfig::default());
    // walk to the north-west corner
    for dir in [Direction::North, Direction::West] {
        while engine.state().status == GameStatus::Exploration {
            let before = engine.state().clone();
            if engine.move_player(dir).is_err() {
                assert_eq!(engine.state(), &before);
                break;
            }
            engine.settle();
        }
    }
    if engine.state().status == GameStatus::Exploration {
        assert_eq!(engine.state().player_position, Position::new(0, 0));
        assert_eq!(engine.move_player(Direction::North), Err(Rejection::OutOfBounds(Direction::North)));
    }
}

#[test]
fn snapshot_serializes_with_camel_case_keys() {
    let engine = Engine::new(GameConfig::default());
    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["hp"], 100);
    assert_eq!(json["maxMp"], 50);
    assert_eq!(json["gameStatus"], "exploration");
    assert_eq!(json["maxBossHp"], 50);
    assert_eq!(json["grid"].as_array().unwrap().len(), 5);
}

#[test]
fn command_parse_feeds_engine() {
    assert_eq!(parse_command("go north"), Command::Go(Direction::North));
    assert_eq!(parse_command("หลบหนี"), Command::Act("หลบหนี".into()));
}
