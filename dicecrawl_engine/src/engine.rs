//! The game state machine.
//!
//! [`Engine`] owns the one authoritative [`GameState`] together with the chat log, the dice
//! overlay and the task scheduler. Presentation code drives it through three commands
//! ([`Engine::move_player`], [`Engine::choose_action`], [`Engine::reset`]) and moves its clock
//! forward with [`Engine::advance_to`]; everything else is read-only.
//!
//! Commands take effect in two steps. The immediate part (position and fog of war, the player's
//! chat line, the dice overlay) happens inside the call. The consequence (the room's event, the
//! combat outcome) is scheduled a short delay later for pacing, and only one such consequence can
//! be pending at a time.

use std::collections::HashMap;

use gametools::Spinner;
use log::{info, warn};

use crate::chat::{ChatLog, Tone};
use crate::combat::{self, ActionRolls, CombatAction, Outcome};
use crate::config::GameConfig;
use crate::dice::DiceResult;
use crate::dungeon;
use crate::event::{self, ArrivalEvent, ArrivalRolls};
use crate::movement;
use crate::rejection::Rejection;
use crate::rng::{GameRng, ThreadDice};
use crate::room::{Direction, Position, RoomKind};
use crate::scheduler::{ScheduledTask, Scheduler, Task};
use crate::spinners::{SpinnerType, default_spinners};
use crate::state::{GameState, GameStatus, Snapshot};

const INTRO: &str = "Welcome to the realm of darkness... The door grinds shut behind you. \
                     Somewhere in this dungeon its master waits. Find it and destroy it.";

pub struct Engine {
    config: GameConfig,
    state: GameState,
    chat: ChatLog,
    dice: DiceResult,
    /// Counts rolls so a hide timer only takes down the die it was scheduled for.
    roll_seq: u64,
    scheduler: Scheduler,
    now_ms: u64,
    rng: Box<dyn GameRng>,
    spinners: HashMap<SpinnerType, Spinner<String>>,
}

impl Engine {
    /// Start a new game with thread-local randomness.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, Box::new(ThreadDice::new()))
    }

    /// Start a new game drawing from `rng`.
    pub fn with_rng(config: GameConfig, mut rng: Box<dyn GameRng>) -> Self {
        let (dungeon, start) = dungeon::generate(config.floor_level, &config, rng.as_mut());
        let state = GameState::new(&config, dungeon, start);
        Self::with_state(config, state, rng)
    }

    /// Start from a prepared state. The chat log begins with the introduction.
    pub fn with_state(config: GameConfig, state: GameState, rng: Box<dyn GameRng>) -> Self {
        let mut chat = ChatLog::new();
        chat.gm(INTRO, Tone::Info);
        info!(
            "engine ready: floor {}, player at {}",
            state.floor_level, state.player_position
        );
        Self {
            config,
            state,
            chat,
            dice: DiceResult::default(),
            roll_seq: 0,
            scheduler: Scheduler::new(),
            now_ms: 0,
            rng,
            spinners: default_spinners(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn dice(&self) -> DiceResult {
        self.dice
    }

    /// Current engine clock in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Clock time of the next scheduled task, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// True while an arrival or combat outcome is waiting to resolve.
    pub fn is_busy(&self) -> bool {
        self.scheduler.has_pending_resolution()
    }

    /// Move one room in `direction`.
    ///
    /// The position and fog of war update at once; the room's event fires after the arrival delay.
    ///
    /// # Errors
    /// Returns the [`Rejection`] (also posted to the chat log) when the move is not allowed.
    pub fn move_player(&mut self, direction: Direction) -> Result<(), Rejection> {
        if self.state.status.is_terminal() {
            return self.reject(Rejection::GameFinished);
        }
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        let next = match movement::step(&self.state, direction) {
            Ok(next) => next,
            Err(rejection) => return self.reject(rejection),
        };

        self.chat.player(format!("I head {direction}."));
        let footsteps = self.spin(SpinnerType::Footsteps, "You move on...");
        self.chat.gm(footsteps, Tone::Normal);
        self.state = next;
        let position = self.state.player_position;
        let rolls = ArrivalRolls::draw(self.rng.as_mut(), &self.config.rewards);
        self.scheduler.schedule_in(
            self.now_ms,
            self.config.timing.arrival_delay_ms,
            Task::ResolveArrival { position, rolls },
            Some(format!("arrival at {position}")),
        );
        Ok(())
    }

    /// Take a combat action named by `label` (`attack`, `defend`, `flee` or a localized label).
    ///
    /// The die is rolled and shown at once; the outcome resolves after the resolve delay and the
    /// dice overlay hides on its own timer.
    ///
    /// # Errors
    /// Returns the [`Rejection`] (also posted to the chat log) when the action is not allowed.
    pub fn choose_action(&mut self, label: &str) -> Result<(), Rejection> {
        if self.state.status.is_terminal() {
            return self.reject(Rejection::GameFinished);
        }
        let Some(action) = CombatAction::from_label(label) else {
            return self.reject(Rejection::UnknownAction(label.trim().to_string()));
        };
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        if let Err(rejection) = combat::check_action(&self.state, action) {
            return self.reject(rejection);
        }

        self.chat.player(format!("I choose: {}", label.trim()));
        let rolls = ActionRolls::draw(self.rng.as_mut(), &self.config.rewards);
        self.dice = DiceResult::shown(rolls.die);
        self.roll_seq += 1;
        let timing = self.config.timing;
        self.scheduler.schedule_in(
            self.now_ms,
            timing.dice_display_ms,
            Task::HideDice { roll: self.roll_seq },
            Some(format!("hide die ({})", rolls.die)),
        );
        self.scheduler.schedule_in(
            self.now_ms,
            timing.resolve_delay_ms,
            Task::ResolveAction {
                action,
                rolls,
                position: self.state.player_position,
            },
            Some(format!("resolve {action} (roll {})", rolls.die)),
        );
        Ok(())
    }

    /// Throw away the current run and start over in a new dungeon.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        let (dungeon, start) = dungeon::generate(self.config.floor_level, &self.config, self.rng.as_mut());
        self.state = GameState::new(&self.config, dungeon, start);
        self.dice = DiceResult::default();
        self.chat = ChatLog::new();
        self.chat.gm(INTRO, Tone::Info);
        info!("game reset: new dungeon, player at {start}");
    }

    /// Run every task due at or before `now_ms` and move the clock there. Returns how many ran.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(task.due_ms);
            self.run_task(task);
            fired += 1;
        }
        self.now_ms = self.now_ms.max(now_ms);
        fired
    }

    /// Move the clock forward by `ms`.
    pub fn advance_by(&mut self, ms: u64) -> usize {
        self.advance_to(self.now_ms.saturating_add(ms))
    }

    /// Run everything pending, however far ahead it is due.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            fired += self.advance_to(due);
        }
        fired
    }

    fn reject(&mut self, rejection: Rejection) -> Result<(), Rejection> {
        info!("command rejected: {rejection:?}");
        self.chat.system(rejection.to_string());
        Err(rejection)
    }

    fn run_task(&mut self, scheduled: ScheduledTask) {
        if scheduled.epoch != self.scheduler.epoch() {
            warn!("dropping task from old epoch {}: {:?}", scheduled.epoch, scheduled.task);
            return;
        }
        match scheduled.task {
            Task::HideDice { roll } if roll == self.roll_seq => self.dice.hide(),
            Task::HideDice { roll } => info!("roll {roll} already replaced by roll {}, die stays up", self.roll_seq),
            Task::ResolveArrival { position, rolls } => {
                if !self.still_at(position) {
                    return;
                }
                let arrival = event::resolve_arrival(&self.state, position, &rolls, &self.config);
                self.state = arrival.state;
                self.narrate_arrival(arrival.event);
            },
            Task::ResolveAction {
                action,
                rolls,
                position,
            } => {
                if !self.still_at(position) {
                    return;
                }
                match combat::resolve_action(&self.state, action, &rolls, &self.config) {
                    Ok(resolution) => {
                        self.state = resolution.state;
                        self.narrate_outcome(resolution.die, resolution.outcome);
                    },
                    Err(rejection) => warn!("dropping {action} resolution: {rejection:?}"),
                }
            },
        }
    }

    fn still_at(&self, position: Position) -> bool {
        let here = self.state.player_position;
        if here != position {
            warn!("dropping task issued at {position}: player is now at {here}");
        }
        here == position
    }

    fn spin(&self, kind: SpinnerType, default: &str) -> String {
        self.spinners
            .get(&kind)
            .and_then(Spinner::spin)
            .unwrap_or_else(|| default.to_string())
    }

    fn narrate_arrival(&mut self, event: ArrivalEvent) {
        match event {
            ArrivalEvent::Quiet(RoomKind::Start) => {
                let text = self.spin(SpinnerType::StartRoom, "You are back at the entrance.");
                self.chat.gm(text, Tone::Normal);
            },
            ArrivalEvent::Quiet(_) => {
                let text = self.spin(SpinnerType::EmptyRoom, "The room is empty.");
                self.chat.gm(text, Tone::Normal);
            },
            ArrivalEvent::Treasure { gold } => {
                self.chat
                    .gm(format!("You pry open a treasure chest and find {gold} gold!"), Tone::Success);
            },
            ArrivalEvent::Trap { damage, fatal } => {
                self.chat
                    .gm(format!("Click. A hidden trap springs! You lose {damage} HP."), Tone::Failure);
                if fatal {
                    self.game_over();
                }
            },
            ArrivalEvent::Ambush => {
                let text = self.spin(SpinnerType::Ambush, "A monster attacks!");
                self.chat.gm(format!("{text} Attack, defend or flee?"), Tone::Info);
            },
            ArrivalEvent::BossEncounter => {
                let text = self.spin(SpinnerType::BossEncounter, "The boss appears!");
                let boss = self.state.boss;
                self.chat.gm(
                    format!(
                        "{text} It has {}/{} HP. There is no running from this fight.",
                        boss.current(),
                        boss.max()
                    ),
                    Tone::Info,
                );
            },
        }
    }

    fn narrate_outcome(&mut self, die: u32, outcome: Outcome) {
        match outcome {
            Outcome::MonsterSlain { gold } => self.chat.gm(
                format!("Success! (Roll: {die}) You cut the monster down and loot {gold} gold!"),
                Tone::Success,
            ),
            Outcome::BossWounded { damage, remaining } => self.chat.gm(
                format!(
                    "Success! (Roll: {die}) Your blow lands for {damage} damage. The boss has {remaining}/{} HP left.",
                    self.state.boss.max()
                ),
                Tone::Success,
            ),
            Outcome::BossSlain { gold } => self.chat.gm(
                format!("Success! (Roll: {die}) The boss crashes to the ground! You claim {gold} gold. VICTORY!"),
                Tone::Success,
            ),
            Outcome::Defended { healed } => self.chat.gm(
                format!("Success! (Roll: {die}) You parry the attack and recover {healed} HP."),
                Tone::Success,
            ),
            Outcome::Escaped => self.chat.gm(
                format!("Success! (Roll: {die}) You slip away safely. The monster loses your trail."),
                Tone::Success,
            ),
            Outcome::Hit { damage, fatal } => {
                self.chat.gm(
                    format!("Failure! (Roll: {die}) The monster catches you off guard. You lose {damage} HP!"),
                    Tone::Failure,
                );
                if fatal {
                    self.game_over();
                }
            },
        }
    }

    fn game_over(&mut self) {
        debug_assert_eq!(self.state.status, GameStatus::GameOver);
        info!("player died with {} gold", self.state.player.gold);
        self.chat.gm(
            "Your wounds are too deep. The torch gutters out... GAME OVER.",
            Tone::Failure,
        );
    }
}
