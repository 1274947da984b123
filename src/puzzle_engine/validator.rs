use serde::{Deserialize, Serialize};

/// Trials a puzzle must run before it can count as learned.
pub const MIN_TRIALS: u32 = 5;
/// Consecutive successes needed for mastery.
pub const REQUIRED_STREAK: u32 = 4;

/// Streak-based mastery check for puzzles 1-4.
///
/// The first trial of a puzzle is adversarial, so a learner that gets it
/// wrong still has to earn the whole streak afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryValidator {
    pub total_trials: u32,
    pub consecutive_successes: u32,
    pub failures: u32,
}

impl MasteryValidator {
    pub fn new() -> Self {
        MasteryValidator::default()
    }

    pub fn record_outcome(&mut self, success: bool) {
        self.total_trials += 1;
        if success {
            self.consecutive_successes += 1;
        } else {
            self.failures += 1;
            self.consecutive_successes = 0;
        }
    }

    pub fn has_learned(&self) -> bool {
        self.total_trials >= MIN_TRIALS && self.consecutive_successes >= REQUIRED_STREAK
    }

    /// Nothing recorded yet: the next trial should be adversarial.
    pub fn is_first_trial(&self) -> bool {
        self.total_trials == 0
    }

    pub fn reset(&mut self) {
        *self = MasteryValidator::default();
    }
}
