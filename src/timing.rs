//! One-shot delayed tasks. State machines never own timers; they hand a
//! [`Schedule`] to a [`Scheduler`] and the host fires the task later through
//! `App::run`. Tasks are not cancellable; every task is idempotent.

/// Slide cross-fade duration. Must match the fade keyframes in the stylesheet.
pub const TRANSITION_MS: u32 = 450;
/// Prompt fade-out duration before the carousel is revealed.
pub const REVEAL_DELAY_MS: u32 = 1200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Clear the carousel's animating flag.
    EndTransition,
    /// Hide the prompt card and show the carousel.
    RevealCarousel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub delay_ms: u32,
    pub task: Task,
}

impl Schedule {
    pub fn new(delay_ms: u32, task: Task) -> Self {
        Self { delay_ms, task }
    }
}

pub trait Scheduler {
    fn schedule(&mut self, schedule: Schedule);
}

/// Collects schedules without running them. Useful when the caller wants to
/// decide how to run the tasks (tests, or batching before a render).
impl Scheduler for Vec<Schedule> {
    fn schedule(&mut self, schedule: Schedule) {
        self.push(schedule);
    }
}

/// Deterministic scheduler driven by an explicit clock, for native tests and
/// headless drivers.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    seq: u64,
    pending: Vec<(u64, u64, Task)>, // (due_ms, seq, task)
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock by `ms` and return the tasks that came due, in due
    /// order (ties keep scheduling order).
    pub fn advance(&mut self, ms: u64) -> Vec<Task> {
        self.now_ms += ms;
        let now = self.now_ms;
        let mut due: Vec<(u64, u64, Task)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, seq, _)| (at, seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, schedule: Schedule) {
        self.seq += 1;
        self.pending
            .push((self.now_ms + schedule.delay_ms as u64, self.seq, schedule.task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_fires_in_due_order() {
        let mut timers = ManualScheduler::new();
        timers.schedule(Schedule::new(1200, Task::RevealCarousel));
        timers.schedule(Schedule::new(450, Task::EndTransition));
        assert!(timers.advance(449).is_empty());
        assert_eq!(timers.advance(1), vec![Task::EndTransition]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.advance(10_000), vec![Task::RevealCarousel]);
        assert_eq!(timers.now_ms(), 10_450);
    }
}
