//! Cancellable delayed tasks on the game clock.
//!
//! Every timer in the game (spawn timer, hit sequence, level-up delay,
//! message expiry) is an entry in one `TaskQueue`. Tasks run on the control
//! thread when the engine drains them; a cancelled task never runs.

use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::types::EntityHandle;

/// Cancel token for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Work to perform when a task comes due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    /// Spawn timer firing.
    SpawnTick,
    /// Impact effects for a resolved hit.
    HitEffects {
        target: EntityHandle,
        kind: EntityKind,
    },
    /// Remove a hit entity and its impact marker.
    HitCleanup {
        target: EntityHandle,
        impact: Option<EntityHandle>,
    },
    /// Show the level-up celebration.
    LevelUpCelebration,
    HideLevelUpBanner,
    ClearMessage,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    due_secs: f64,
    task: Task,
}

/// Pending tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    pending: Vec<Scheduled>,
    next_id: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run `delay_secs` after `now`.
    pub fn schedule(&mut self, now: f64, delay_secs: f64, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due_secs: now + delay_secs.max(0.0),
            task,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Cancel everything. Returns the number of tasks dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn due_at(&self, id: TaskId) -> Option<f64> {
        self.pending.iter().find(|s| s.id == id).map(|s| s.due_secs)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending tasks matching `pred`.
    pub fn count_matching(&self, pred: impl Fn(&Task) -> bool) -> usize {
        self.pending.iter().filter(|s| pred(&s.task)).count()
    }

    /// Id that the next scheduled task will receive.
    ///
    /// Passing this to `pop_due` keeps tasks scheduled while draining from
    /// running in the same frame.
    pub fn horizon(&self) -> TaskId {
        TaskId(self.next_id)
    }

    /// Remove and return the earliest task due at or before `now` that was
    /// scheduled before `horizon`.
    pub fn pop_due(&mut self, now: f64, horizon: TaskId) -> Option<(TaskId, Task)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_secs <= now && s.id < horizon)
            .min_by(|(_, a), (_, b)| {
                a.due_secs
                    .total_cmp(&b.due_secs)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;
        let scheduled = self.pending.swap_remove(index);
        Some((scheduled.id, scheduled.task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut queue = TaskQueue::new();
        let late = queue.schedule(0.0, 0.5, Task::ClearMessage);
        let early = queue.schedule(0.0, 0.2, Task::HideLevelUpBanner);
        let horizon = queue.horizon();

        assert_eq!(queue.pop_due(0.1, horizon), None);
        assert_eq!(queue.pop_due(1.0, horizon).map(|(id, _)| id), Some(early));
        assert_eq!(queue.pop_due(1.0, horizon).map(|(id, _)| id), Some(late));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_run_in_scheduling_order() {
        let mut queue = TaskQueue::new();
        let first = queue.schedule(0.0, 1.0, Task::SpawnTick);
        let second = queue.schedule(0.0, 1.0, Task::ClearMessage);
        let horizon = queue.horizon();
        assert_eq!(queue.pop_due(1.0, horizon).map(|(id, _)| id), Some(first));
        assert_eq!(queue.pop_due(1.0, horizon).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let mut queue = TaskQueue::new();
        let id = queue.schedule(0.0, 0.1, Task::SpawnTick);
        assert!(queue.cancel(id));
        assert!(!queue.is_pending(id));
        assert!(!queue.cancel(id), "second cancel is a no-op");
        assert_eq!(queue.pop_due(10.0, queue.horizon()), None);
    }

    #[test]
    fn test_horizon_defers_tasks_scheduled_while_draining() {
        let mut queue = TaskQueue::new();
        queue.schedule(0.0, 0.0, Task::SpawnTick);
        let horizon = queue.horizon();
        assert!(queue.pop_due(0.0, horizon).is_some());

        // Scheduled during the drain with zero delay: waits for the next drain.
        queue.schedule(0.0, 0.0, Task::SpawnTick);
        assert_eq!(queue.pop_due(0.0, horizon), None);
        assert!(queue.pop_due(0.0, queue.horizon()).is_some());
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TaskQueue::new();
        queue.schedule(0.0, 1.0, Task::SpawnTick);
        queue.schedule(0.0, 2.0, Task::LevelUpCelebration);
        assert_eq!(queue.cancel_all(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_negative_delay_clamped() {
        let mut queue = TaskQueue::new();
        let id = queue.schedule(5.0, -1.0, Task::ClearMessage);
        assert_eq!(queue.due_at(id), Some(5.0));
    }
}
