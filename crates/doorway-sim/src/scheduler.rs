//! Deadline scheduler for multi-tick work.
//!
//! Holds deferred actions (a delayed clap cue, a level load waiting on a
//! clip) keyed by the tick at which they resume. Tasks due on the same tick
//! run in the order they were scheduled.

use doorway_core::types::secs_to_ticks;

/// Work resumed by the engine when its tick comes due.
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredTask {
    PlayClip { clip: String, volume: f32 },
    LoadLevel { name: String },
    ClapRelease,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    due_tick: u64,
    seq: u64,
    task: DeferredTask,
}

#[derive(Debug, Clone, Default)]
pub struct TaskScheduler {
    pending: Vec<ScheduledTask>,
    next_seq: u64,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run on `due_tick`.
    pub fn schedule_at(&mut self, due_tick: u64, task: DeferredTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledTask {
            due_tick,
            seq,
            task,
        });
    }

    /// Schedule `task` to run `delay_secs` after `now_tick`, never earlier.
    pub fn schedule_after(&mut self, now_tick: u64, delay_secs: f64, dt: f64, task: DeferredTask) {
        self.schedule_at(now_tick.saturating_add(secs_to_ticks(delay_secs, dt)), task);
    }

    /// Remove and return every task due at or before `now_tick`.
    pub fn drain_due(&mut self, now_tick: u64) -> Vec<DeferredTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.due_tick <= now_tick);
        self.pending = pending;
        due.sort_by_key(|t| (t.due_tick, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{DeferredTask, TaskScheduler};
    use doorway_core::constants::DT;

    fn clip(name: &str) -> DeferredTask {
        DeferredTask::PlayClip {
            clip: name.to_string(),
            volume: 1.0,
        }
    }

    #[test]
    fn drains_only_due_tasks() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_at(5, clip("late"));
        scheduler.schedule_at(2, clip("early"));
        assert_eq!(scheduler.len(), 2);

        assert!(scheduler.drain_due(1).is_empty());
        assert_eq!(scheduler.drain_due(2), vec![clip("early")]);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.drain_due(10), vec![clip("late")]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn same_tick_keeps_schedule_order() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_after(0, 0.3, DT, clip("cue"));
        scheduler.schedule_after(0, 0.3, DT, DeferredTask::ClapRelease);
        assert!(scheduler.drain_due(17).is_empty());
        assert_eq!(
            scheduler.drain_due(18),
            vec![clip("cue"), DeferredTask::ClapRelease]
        );
    }

    #[test]
    fn far_deadline_saturates_instead_of_wrapping() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_after(u64::MAX - 5, 1e30, DT, clip("never"));
        scheduler.schedule_after(u64::MAX - 5, 60.0, DT, clip("late"));
        assert!(scheduler.drain_due(0).is_empty());
        assert!(scheduler.drain_due(u64::MAX - 1).is_empty());
        assert_eq!(scheduler.drain_due(u64::MAX), vec![clip("never"), clip("late")]);
    }
}
