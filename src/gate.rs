//! Question prompt guarding the carousel.
//!
//! Unlocking is one-way: a correct submit flips `unlocked`, the prompt starts
//! fading, and after the reveal delay the prompt is removed and the carousel
//! shown.

use crate::timing::{Schedule, Scheduler, Task};

/// Case-insensitive, whitespace-trimmed comparison against the secret.
pub fn answer_matches(answer: &str, secret: &str) -> bool {
    answer.trim().to_lowercase() == secret.trim().to_lowercase()
}

#[derive(Clone, Debug)]
pub struct Gate {
    secret: String,
    reveal_delay_ms: u32,
    answer: String,
    unlocked: bool,
    prompt_visible: bool,
    carousel_visible: bool,
}

impl Gate {
    pub fn new(secret: impl Into<String>, reveal_delay_ms: u32) -> Self {
        Self {
            secret: secret.into(),
            reveal_delay_ms,
            answer: String::new(),
            unlocked: false,
            prompt_visible: true,
            carousel_visible: false,
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn carousel_visible(&self) -> bool {
        self.carousel_visible
    }

    pub fn set_answer(&mut self, text: impl Into<String>) {
        self.answer = text.into();
    }

    /// Returns true if this submit unlocked the gate. Submits after unlocking
    /// change nothing and schedule nothing.
    pub fn submit(&mut self, timers: &mut impl Scheduler) -> bool {
        if self.unlocked || !answer_matches(&self.answer, &self.secret) {
            return false;
        }
        self.unlocked = true;
        timers.schedule(Schedule::new(self.reveal_delay_ms, Task::RevealCarousel));
        true
    }

    /// Fired by [`Task::RevealCarousel`].
    pub fn reveal(&mut self) {
        if self.unlocked {
            self.prompt_visible = false;
            self.carousel_visible = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        assert!(answer_matches("  GuAlAla  ", "gualala"));
        assert!(answer_matches("Gualala", "gualala"));
        assert!(answer_matches("\tgualala\n", "gualala"));
        assert!(!answer_matches("gualala2", "gualala"));
        assert!(!answer_matches("", "gualala"));
        assert!(!answer_matches("gua lala", "gualala"));
    }

    #[test]
    fn wrong_answer_keeps_gate_locked() {
        let mut timers: Vec<Schedule> = Vec::new();
        let mut gate = Gate::new("gualala", 1200);
        gate.set_answer("gualala2");
        assert!(!gate.submit(&mut timers));
        gate.set_answer("");
        assert!(!gate.submit(&mut timers));
        assert!(!gate.is_unlocked());
        assert!(gate.prompt_visible());
        assert!(timers.is_empty());
    }

    #[test]
    fn correct_answer_unlocks_once_and_schedules_reveal() {
        let mut timers: Vec<Schedule> = Vec::new();
        let mut gate = Gate::new("gualala", 1200);
        gate.set_answer("  GuAlAla  ");
        assert_eq!(gate.answer(), "  GuAlAla  ");
        assert!(gate.submit(&mut timers));
        assert!(gate.is_unlocked());
        assert!(gate.prompt_visible());
        assert!(!gate.carousel_visible());
        assert_eq!(timers, vec![Schedule::new(1200, Task::RevealCarousel)]);

        gate.set_answer("nope");
        assert!(!gate.submit(&mut timers));
        assert!(gate.is_unlocked());
        assert_eq!(timers.len(), 1);

        gate.reveal();
        assert!(!gate.prompt_visible());
        assert!(gate.carousel_visible());
    }

    #[test]
    fn reveal_before_unlock_is_ignored() {
        let mut gate = Gate::new("gualala", 1200);
        gate.reveal();
        assert!(gate.prompt_visible());
        assert!(!gate.carousel_visible());
    }
}
