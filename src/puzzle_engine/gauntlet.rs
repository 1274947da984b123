use serde::{Deserialize, Serialize};

/// Trials that train the learner without being scored.
pub const WARMUP_TRIALS: u32 = 10;
/// Trials that count toward the final score.
pub const SCORED_TRIALS: u32 = 20;
pub const TOTAL_TRIALS: u32 = WARMUP_TRIALS + SCORED_TRIALS;

/// Warmup-then-scored evaluation for the final puzzle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauntlet {
    pub warmup_completed: u32,
    pub scored_completed: u32,
    pub correct: u32,
}

impl Gauntlet {
    pub fn new() -> Self {
        Gauntlet::default()
    }

    pub fn in_warmup(&self) -> bool {
        self.warmup_completed < WARMUP_TRIALS
    }

    /// Warmup outcomes are counted but never scored.
    pub fn record_outcome(&mut self, success: bool) {
        if self.in_warmup() {
            self.warmup_completed += 1;
        } else {
            self.scored_completed += 1;
            if success {
                self.correct += 1;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.scored_completed >= SCORED_TRIALS
    }

    /// Floor percentage of scored trials answered correctly; 0 before any.
    pub fn score_percent(&self) -> u32 {
        if self.scored_completed == 0 {
            return 0;
        }
        self.correct * 100 / self.scored_completed
    }

    pub fn trials_completed(&self) -> u32 {
        self.warmup_completed + self.scored_completed
    }

    pub fn reset(&mut self) {
        *self = Gauntlet::default();
    }
}
