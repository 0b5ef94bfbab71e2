//! Spawn scheduler: the single timer that drops targets and decoys into the world.
//!
//! States: Idle, Scheduled, Paused. At most one spawn task is pending at a
//! time; every (re)start cancels the previous one first.

use arniegeddon_core::config::SpawnCadence;
use arniegeddon_core::constants::*;
use arniegeddon_core::enums::EntityKind;

use crate::rng::SessionRng;
use crate::tasks::{Task, TaskId, TaskQueue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerState {
    Idle,
    Scheduled { task: TaskId, interval_secs: f64 },
    Paused,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    cadence: SpawnCadence,
    state: SchedulerState,
}

impl SpawnScheduler {
    pub fn new(cadence: SpawnCadence) -> Self {
        Self {
            cadence,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn cadence(&self) -> SpawnCadence {
        self.cadence
    }

    /// The pending spawn task, if any.
    pub fn active_task(&self) -> Option<TaskId> {
        match self.state {
            SchedulerState::Scheduled { task, .. } => Some(task),
            SchedulerState::Idle | SchedulerState::Paused => None,
        }
    }

    /// Cancel any pending timer and schedule a fresh one.
    pub fn start(
        &mut self,
        tasks: &mut TaskQueue,
        rng: &mut SessionRng,
        level: u32,
        now: f64,
    ) -> TaskId {
        self.invalidate(tasks);
        let interval_secs = match self.cadence {
            SpawnCadence::LevelScaled => interval_for(level, rng),
            SpawnCadence::Fixed { interval_secs } => interval_secs,
        };
        let task = tasks.schedule(now, interval_secs, Task::SpawnTick);
        self.state = SchedulerState::Scheduled {
            task,
            interval_secs,
        };
        task
    }

    /// Cancel the pending timer. Expiry of already spawned entities is unaffected.
    pub fn pause(&mut self, tasks: &mut TaskQueue) {
        self.invalidate(tasks);
        self.state = SchedulerState::Paused;
    }

    /// Restart with a freshly drawn interval.
    pub fn resume(
        &mut self,
        tasks: &mut TaskQueue,
        rng: &mut SessionRng,
        level: u32,
        now: f64,
    ) -> TaskId {
        self.start(tasks, rng, level, now)
    }

    pub fn stop(&mut self, tasks: &mut TaskQueue) {
        self.invalidate(tasks);
        self.state = SchedulerState::Idle;
    }

    /// Whether a fired task is the scheduler's live timer.
    pub fn owns(&self, task: TaskId) -> bool {
        self.active_task() == Some(task)
    }

    /// Schedule the next firing after the live timer fired.
    ///
    /// Level-scaled cadence draws a new interval for the current level;
    /// fixed cadence repeats its interval.
    pub fn rearm(
        &mut self,
        tasks: &mut TaskQueue,
        rng: &mut SessionRng,
        level: u32,
        now: f64,
    ) -> TaskId {
        self.start(tasks, rng, level, now)
    }

    fn invalidate(&mut self, tasks: &mut TaskQueue) {
        if let SchedulerState::Scheduled { task, .. } = self.state {
            tasks.cancel(task);
        }
    }
}

/// Spawn interval for `level`, strictly shrinking as the level rises.
pub fn interval_for(level: u32, rng: &mut SessionRng) -> f64 {
    let (min, max) = match level {
        0 | 1 => LEVEL_1_INTERVAL,
        2 => LEVEL_2_INTERVAL,
        _ => LEVEL_3_PLUS_INTERVAL,
    };
    rng.range(min, max)
}

/// One in `DECOY_ODDS` spawns is a decoy.
pub fn draw_spawn_kind(rng: &mut SessionRng) -> EntityKind {
    if rng.one_in(DECOY_ODDS) {
        EntityKind::DecoyTarget
    } else {
        EntityKind::PrimaryTarget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_bounds_per_level() {
        let mut rng = SessionRng::seeded(21);
        for _ in 0..5_000 {
            let l1 = interval_for(1, &mut rng);
            let l2 = interval_for(2, &mut rng);
            let l3 = interval_for(3, &mut rng);
            let l9 = interval_for(9, &mut rng);
            assert!((1.0..3.0).contains(&l1), "level 1: {l1}");
            assert!((0.5..2.0).contains(&l2), "level 2: {l2}");
            assert!((0.0..1.0).contains(&l3), "level 3: {l3}");
            assert!((0.0..1.0).contains(&l9), "level 9: {l9}");
        }
    }

    #[test]
    fn test_second_start_invalidates_first() {
        let mut tasks = TaskQueue::new();
        let mut rng = SessionRng::seeded(22);
        let mut scheduler = SpawnScheduler::new(SpawnCadence::LevelScaled);

        let first = scheduler.start(&mut tasks, &mut rng, 1, 0.0);
        let second = scheduler.start(&mut tasks, &mut rng, 1, 0.0);

        assert!(!tasks.is_pending(first));
        assert!(tasks.is_pending(second));
        assert!(scheduler.owns(second));
        assert_eq!(tasks.count_matching(|t| matches!(t, Task::SpawnTick)), 1);

        let horizon = tasks.horizon();
        let fired: Vec<TaskId> = std::iter::from_fn(|| tasks.pop_due(100.0, horizon))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(fired, vec![second]);
    }

    #[test]
    fn test_pause_cancels_and_resume_reschedules() {
        let mut tasks = TaskQueue::new();
        let mut rng = SessionRng::seeded(23);
        let mut scheduler = SpawnScheduler::new(SpawnCadence::LevelScaled);

        let first = scheduler.start(&mut tasks, &mut rng, 2, 0.0);
        scheduler.pause(&mut tasks);
        assert_eq!(scheduler.state(), SchedulerState::Paused);
        assert!(!tasks.is_pending(first));
        assert_eq!(scheduler.active_task(), None);

        let resumed = scheduler.resume(&mut tasks, &mut rng, 2, 5.0);
        let due = tasks.due_at(resumed).unwrap();
        assert!((5.5..7.0).contains(&due), "due at {due}");
    }

    #[test]
    fn test_pause_leaves_other_tasks_alone() {
        let mut tasks = TaskQueue::new();
        let mut rng = SessionRng::seeded(24);
        let mut scheduler = SpawnScheduler::new(SpawnCadence::LevelScaled);
        let other = tasks.schedule(0.0, 0.2, Task::ClearMessage);
        scheduler.start(&mut tasks, &mut rng, 1, 0.0);
        scheduler.pause(&mut tasks);
        assert!(tasks.is_pending(other));
    }

    #[test]
    fn test_fixed_cadence_repeats_interval() {
        let mut tasks = TaskQueue::new();
        let mut rng = SessionRng::seeded(25);
        let mut scheduler = SpawnScheduler::new(SpawnCadence::Fixed { interval_secs: 3.0 });
        assert_eq!(
            scheduler.cadence(),
            SpawnCadence::Fixed { interval_secs: 3.0 }
        );

        let first = scheduler.start(&mut tasks, &mut rng, 4, 0.0);
        assert_eq!(tasks.due_at(first), Some(3.0));
        let (fired, _) = tasks.pop_due(3.0, tasks.horizon()).unwrap();
        assert!(scheduler.owns(fired));
        let next = scheduler.rearm(&mut tasks, &mut rng, 4, 3.0);
        assert_eq!(tasks.due_at(next), Some(6.0));
    }

    #[test]
    fn test_stop_goes_idle() {
        let mut tasks = TaskQueue::new();
        let mut rng = SessionRng::seeded(26);
        let mut scheduler = SpawnScheduler::new(SpawnCadence::LevelScaled);
        scheduler.start(&mut tasks, &mut rng, 1, 0.0);
        scheduler.stop(&mut tasks);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_decoy_draw_rate() {
        let mut rng = SessionRng::seeded(27);
        let decoys = (0..20_000)
            .filter(|_| draw_spawn_kind(&mut rng) == EntityKind::DecoyTarget)
            .count();
        let rate = decoys as f64 / 20_000.0;
        assert!((0.17..0.23).contains(&rate), "decoy rate {rate}");
    }
}
