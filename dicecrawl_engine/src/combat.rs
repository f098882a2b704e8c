//! Combat resolution.
//!
//! One d20 decides every combat action: above 10 succeeds, anything else fails and the monster hits
//! back. There are no modifiers. Regular monsters die to a single successful attack; the boss has
//! its own health pool and takes a fixed bite per hit.

use std::fmt;

use log::info;

use crate::config::{GameConfig, RewardConfig};
use crate::rejection::Rejection;
use crate::rng::GameRng;
use crate::room::RoomKind;
use crate::state::{GameState, GameStatus};

/// Rolls strictly above this succeed.
pub const SUCCESS_THRESHOLD: u32 = 10;

/// Whether a die value is a success.
pub fn is_success(die: u32) -> bool {
    die > SUCCESS_THRESHOLD
}

/// The three things a player can do in a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatAction {
    Attack,
    Defend,
    Flee,
}
impl CombatAction {
    /// Match a typed label. English verbs, one-letter shortcuts and the Thai button labels are all accepted.
    pub fn from_label(label: &str) -> Option<CombatAction> {
        match label.trim().to_lowercase().as_str() {
            "attack" | "a" | "fight" | "โจมตี" => Some(CombatAction::Attack),
            "defend" | "d" | "block" | "ป้องกัน" => Some(CombatAction::Defend),
            "flee" | "f" | "run" | "escape" | "หลบหนี" => Some(CombatAction::Flee),
            _ => None,
        }
    }
}
impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            CombatAction::Attack => "attack",
            CombatAction::Defend => "defend",
            CombatAction::Flee => "flee",
        };
        f.write_str(verb)
    }
}

/// Random numbers one action may need, drawn before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRolls {
    /// The d20.
    pub die: u32,
    /// Gold carried by a regular monster.
    pub loot: u32,
    /// Damage taken on failure.
    pub damage: u32,
}
impl ActionRolls {
    pub fn draw(rng: &mut dyn GameRng, rewards: &RewardConfig) -> Self {
        Self {
            die: rng.d20(),
            loot: rng.from_span(rewards.loot_min, rewards.loot_span),
            damage: rng.from_span(rewards.damage_min, rewards.damage_span),
        }
    }

    pub fn is_success(&self) -> bool {
        is_success(self.die)
    }
}

/// What an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    MonsterSlain { gold: u32 },
    BossWounded { damage: u32, remaining: u32 },
    BossSlain { gold: u32 },
    Defended { healed: u32 },
    Escaped,
    Hit { damage: u32, fatal: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: GameState,
    pub outcome: Outcome,
    pub die: u32,
}

/// Check whether `action` may be taken at all, before any die is rolled.
///
/// # Errors
/// - [`Rejection::GameFinished`] after victory or death
/// - [`Rejection::NotInCombat`] outside an encounter
/// - [`Rejection::BossBlocksEscape`] when fleeing from the boss
pub fn check_action(state: &GameState, action: CombatAction) -> Result<(), Rejection> {
    match state.status {
        GameStatus::Combat => {},
        GameStatus::Exploration => return Err(Rejection::NotInCombat),
        GameStatus::Victory | GameStatus::GameOver => return Err(Rejection::GameFinished),
    }
    if action == CombatAction::Flee && state.current_kind() == RoomKind::Boss {
        return Err(Rejection::BossBlocksEscape);
    }
    Ok(())
}

/// Resolve `action` with pre-drawn `rolls`. Pure: the same inputs always give the same result.
///
/// # Errors
/// - any rejection from [`check_action`]
pub fn resolve_action(
    state: &GameState,
    action: CombatAction,
    rolls: &ActionRolls,
    config: &GameConfig,
) -> Result<Resolution, Rejection> {
    check_action(state, action)?;

    let mut next = state.clone();
    let pos = next.player_position;
    let against_boss = next.current_kind() == RoomKind::Boss;

    let outcome = if rolls.is_success() {
        match action {
            CombatAction::Attack if against_boss => {
                let damage = next.boss.damage(config.boss.attack_damage);
                if next.boss.is_empty() {
                    clear_room(&mut next);
                    next.player.add_gold(config.boss.victory_gold);
                    next.status = GameStatus::Victory;
                    Outcome::BossSlain {
                        gold: config.boss.victory_gold,
                    }
                } else {
                    Outcome::BossWounded {
                        damage,
                        remaining: next.boss.current(),
                    }
                }
            },
            CombatAction::Attack => {
                clear_room(&mut next);
                next.player.add_gold(rolls.loot);
                next.status = GameStatus::Exploration;
                Outcome::MonsterSlain { gold: rolls.loot }
            },
            CombatAction::Defend => {
                let healed = next.player.hp.heal(config.rewards.defend_heal);
                Outcome::Defended { healed }
            },
            CombatAction::Flee => {
                clear_room(&mut next);
                next.status = GameStatus::Exploration;
                Outcome::Escaped
            },
        }
    } else {
        let damage = next.player.hp.damage(rolls.damage);
        let fatal = next.player.is_dead();
        if fatal {
            next.status = GameStatus::GameOver;
        }
        Outcome::Hit { damage, fatal }
    };

    info!(
        "{action} at {pos} rolled {} ({}): {outcome:?}, status now {:?}",
        rolls.die,
        if rolls.is_success() { "success" } else { "failure" },
        next.status
    );
    Ok(Resolution {
        state: next,
        outcome,
        die: rolls.die,
    })
}

fn clear_room(state: &mut GameState) {
    let pos = state.player_position;
    if let Some(room) = state.dungeon.room_mut(pos) {
        room.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Dungeon;
    use crate::health::Pool;
    use crate::room::Position;

    fn combat_in(kind: RoomKind) -> GameState {
        let mut dungeon = Dungeon::new_empty(5);
        let pos = Position::new(1, 1);
        if let Some(room) = dungeon.room_mut(pos) {
            room.kind = kind;
        }
        dungeon.visit_and_reveal(pos);
        let mut state = GameState::new(&GameConfig::default(), dungeon, pos);
        state.status = GameStatus::Combat;
        state
    }

    fn rolls(die: u32) -> ActionRolls {
        ActionRolls {
            die,
            loot: 17,
            damage: 9,
        }
    }

    #[test]
    fn threshold_is_strictly_above_ten() {
        assert!(!is_success(1));
        assert!(!is_success(10));
        assert!(is_success(11));
        assert!(is_success(20));
    }

    #[test]
    fn labels_parse() {
        assert_eq!(CombatAction::from_label("Attack"), Some(CombatAction::Attack));
        assert_eq!(CombatAction::from_label("โจมตี"), Some(CombatAction::Attack));
        assert_eq!(CombatAction::from_label("ป้องกัน"), Some(CombatAction::Defend));
        assert_eq!(CombatAction::from_label(" หลบหนี "), Some(CombatAction::Flee));
        assert_eq!(CombatAction::from_label("dance"), None);
    }

    #[test]
    fn successful_attack_kills_regular_monster() {
        let config = GameConfig::default();
        let state = combat_in(RoomKind::Battle);
        let res = resolve_action(&state, CombatAction::Attack, &rolls(15), &config).unwrap();
        assert_eq!(res.outcome, Outcome::MonsterSlain { gold: 17 });
        assert_eq!(res.state.player.gold, 17);
        assert_eq!(res.state.status, GameStatus::Exploration);
        assert_eq!(res.state.current_kind(), RoomKind::Empty);
    }

    #[test]
    fn successful_boss_attack_wounds_without_counterattack() {
        let config = GameConfig::default();
        let state = combat_in(RoomKind::Boss);
        let res = resolve_action(&state, CombatAction::Attack, &rolls(11), &config).unwrap();
        assert_eq!(res.outcome, Outcome::BossWounded { damage: 10, remaining: 40 });
        assert_eq!(res.state.status, GameStatus::Combat);
        assert_eq!(res.state.player.hp.current(), 100);
        assert_eq!(res.state.current_kind(), RoomKind::Boss);
    }

    #[test]
    fn last_boss_hit_wins_the_game() {
        let config = GameConfig::default();
        let mut state = combat_in(RoomKind::Boss);
        state.boss = Pool::new(10, 50);
        let res = resolve_action(&state, CombatAction::Attack, &rolls(20), &config).unwrap();
        assert_eq!(res.outcome, Outcome::BossSlain { gold: 500 });
        assert_eq!(res.state.status, GameStatus::Victory);
        assert_eq!(res.state.current_kind(), RoomKind::Empty);
        assert_eq!(res.state.player.gold, 500);
    }

    // Defending heals and keeps the encounter going; it never ends combat.
    #[test]
    fn defend_heals_and_stays_in_combat() {
        let config = GameConfig::default();
        let mut state = combat_in(RoomKind::Battle);
        state.player.hp = Pool::new(97, 100);
        let res = resolve_action(&state, CombatAction::Defend, &rolls(18), &config).unwrap();
        assert_eq!(res.outcome, Outcome::Defended { healed: 3 });
        assert_eq!(res.state.player.hp.current(), 100);
        assert_eq!(res.state.status, GameStatus::Combat);
        assert_eq!(res.state.current_kind(), RoomKind::Battle);
    }

    #[test]
    fn successful_flee_clears_room() {
        let config = GameConfig::default();
        let state = combat_in(RoomKind::Battle);
        let res = resolve_action(&state, CombatAction::Flee, &rolls(15), &config).unwrap();
        assert_eq!(res.outcome, Outcome::Escaped);
        assert_eq!(res.state.status, GameStatus::Exploration);
        assert_eq!(res.state.current_kind(), RoomKind::Empty);
    }

    #[test]
    fn flee_from_boss_is_rejected_before_rolling() {
        let config = GameConfig::default();
        let state = combat_in(RoomKind::Boss);
        assert_eq!(check_action(&state, CombatAction::Flee), Err(Rejection::BossBlocksEscape));
        assert_eq!(
            resolve_action(&state, CombatAction::Flee, &rolls(20), &config),
            Err(Rejection::BossBlocksEscape)
        );
    }

    #[test]
    fn failure_hurts_and_keeps_status() {
        let config = GameConfig::default();
        let state = combat_in(RoomKind::Battle);
        for action in [CombatAction::Attack, CombatAction::Defend, CombatAction::Flee] {
            let res = resolve_action(&state, action, &rolls(10), &config).unwrap();
            assert_eq!(res.outcome, Outcome::Hit { damage: 9, fatal: false });
            assert_eq!(res.state.player.hp.current(), 91);
            assert_eq!(res.state.status, GameStatus::Combat);
            assert_eq!(res.state.current_kind(), RoomKind::Battle);
        }
    }

    #[test]
    fn lethal_failure_ends_the_game() {
        let config = GameConfig::default();
        let mut state = combat_in(RoomKind::Battle);
        state.player.hp = Pool::new(10, 100);
        let forced = ActionRolls {
            die: 3,
            loot: 10,
            damage: 15,
        };
        let res = resolve_action(&state, CombatAction::Attack, &forced, &config).unwrap();
        assert_eq!(res.state.player.hp.current(), 0);
        assert_eq!(res.state.status, GameStatus::GameOver);
        assert_eq!(res.outcome, Outcome::Hit { damage: 10, fatal: true });
    }

    #[test]
    fn actions_outside_combat_are_rejected() {
        let config = GameConfig::default();
        let mut state = combat_in(RoomKind::Battle);
        state.status = GameStatus::Exploration;
        assert_eq!(
            resolve_action(&state, CombatAction::Attack, &rolls(15), &config),
            Err(Rejection::NotInCombat)
        );
        state.status = GameStatus::Victory;
        assert_eq!(
            resolve_action(&state, CombatAction::Defend, &rolls(15), &config),
            Err(Rejection::GameFinished)
        );
    }

    #[test]
    fn resolution_is_a_function_of_its_inputs() {
        let config = GameConfig::default();
        let state = combat_in(RoomKind::Boss);
        for die in 1..=20 {
            for action in [CombatAction::Attack, CombatAction::Defend] {
                let a = resolve_action(&state, action, &rolls(die), &config);
                let b = resolve_action(&state, action, &rolls(die), &config);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn drawn_rolls_are_in_range() {
        let mut rng = crate::rng::ThreadDice::new();
        let rewards = RewardConfig::default();
        for _ in 0..300 {
            let r = ActionRolls::draw(&mut rng, &rewards);
            assert!((1..=20).contains(&r.die));
            assert!((10..30).contains(&r.loot));
            assert!((5..15).contains(&r.damage));
        }
    }
}
