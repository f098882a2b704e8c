//! Task Scheduler
//!
//! Turn pacing is modelled as tasks due at a point on the engine's millisecond clock: hiding the
//! dice overlay, resolving a combat action, and firing a room's arrival event. The queue is a
//! reversed binary heap, so tasks come out by due time and, for equal due times, in the order they
//! were scheduled.
//!
//! Resetting the game calls [`Scheduler::cancel_all`], which drops every pending task and starts a
//! new epoch. Nothing scheduled against the old dungeon can fire afterwards.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::info;

use crate::combat::{ActionRolls, CombatAction};
use crate::event::ArrivalRolls;
use crate::room::Position;

#[cfg(test)]
const PLACEHOLDER_THRESHOLD: usize = 4;
#[cfg(not(test))]
const PLACEHOLDER_THRESHOLD: usize = 64;

/// Work the engine performs when a task comes due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Cosmetic: take the dice overlay down, unless a later roll has replaced it.
    HideDice { roll: u64 },
    /// Apply a combat action rolled earlier, if the player is still where it was issued.
    ResolveAction {
        action: CombatAction,
        rolls: ActionRolls,
        position: Position,
    },
    /// Fire the arrival event for the room the player just entered.
    ResolveArrival { position: Position, rolls: ArrivalRolls },
}
impl Task {
    /// True for tasks that change the game state.
    pub fn is_resolution(&self) -> bool {
        !matches!(self, Task::HideDice { .. })
    }
}

/// A task bound to its due time and the epoch it was scheduled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due_ms: u64,
    pub epoch: u64,
    pub task: Task,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Reverse<(u64, usize)>>, /* (due_ms, task_idx) */
    tasks: Vec<Option<ScheduledTask>>,
    epoch: u64,
}
impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task `delay_ms` after `now`.
    pub fn schedule_in(&mut self, now: u64, delay_ms: u64, task: Task, note: Option<String>) {
        self.schedule_at(now.saturating_add(delay_ms), task, note);
    }

    /// Schedule a task for an absolute clock time.
    pub fn schedule_at(&mut self, due_ms: u64, task: Task, note: Option<String>) {
        let idx = self.tasks.len();
        let log_msg = match &note {
            Some(msg) => msg.as_str(),
            None => "<no note provided>",
        };
        info!("scheduling task (due {due_ms}ms, epoch {}): \"{log_msg}\"", self.epoch);
        self.heap.push(Reverse((due_ms, idx)));
        self.tasks.push(Some(ScheduledTask {
            due_ms,
            epoch: self.epoch,
            task,
            note,
        }));
    }

    /// Pop the next due task, if any.
    ///
    /// Returns `None` when the earliest task is still in the future.
    pub fn pop_due(&mut self, now: u64) -> Option<ScheduledTask> {
        let Reverse((due_ms, idx)) = self.heap.peek().copied()?;
        if now < due_ms {
            return None;
        }
        self.heap.pop();
        // "take" leaves a `None` placeholder so heap indices stay valid
        let task = self.tasks.get_mut(idx).and_then(Option::take);
        self.compact_if_needed();
        task
    }

    /// Clock time of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((due_ms, _))| *due_ms)
    }

    /// Drop every pending task and start a new epoch. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.heap.len();
        self.heap.clear();
        self.tasks.clear();
        self.epoch += 1;
        info!("scheduler: dropped {dropped} pending task(s), now in epoch {}", self.epoch);
        dropped
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Pending tasks in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().flatten()
    }

    /// True while a state-changing task is waiting to run.
    pub fn has_pending_resolution(&self) -> bool {
        self.pending().any(|t| t.task.is_resolution())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Rebuild the underlying storage when too many placeholders accumulate.
    fn compact_if_needed(&mut self) {
        let placeholder_count = self.tasks.iter().filter(|t| t.is_none()).count();
        if placeholder_count > PLACEHOLDER_THRESHOLD {
            let old_tasks = std::mem::take(&mut self.tasks);
            let mut index_map = vec![0; old_tasks.len()];
            for (old_idx, task) in old_tasks.into_iter().enumerate() {
                if task.is_none() {
                    continue;
                }
                index_map[old_idx] = self.tasks.len();
                self.tasks.push(task);
            }
            let mut new_heap = BinaryHeap::with_capacity(self.heap.len());
            while let Some(Reverse((due_ms, old_idx))) = self.heap.pop() {
                new_heap.push(Reverse((due_ms, index_map[old_idx])));
            }
            self.heap = new_heap;
        }
    }
}
