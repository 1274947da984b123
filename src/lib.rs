//! # puzzle_gauntlet
//!
//! A deterministic trial engine for teaching a learner five small
//! "guess, get feedback, adapt" puzzles and deciding when each is mastered.
//!
//! ## How it works
//!
//! 1. Plug in one [`Learner`] per puzzle through a [`LearnerSet`]. The engine
//!    only calls `predict` and `learn`; how the learner works is its own
//!    business.
//! 2. Build a [`Game`] from a [`GameConfig`] (or [`Game::with_seed`]) and
//!    optionally register an observer for the event stream.
//! 3. Call [`Game::run_trial`] once per step, or let
//!    [`Game::run_full_demo`] drive all five puzzles with a trial budget.
//!
//! ## The puzzles
//!
//! | # | Puzzle | Rule | Done when |
//! |---|--------|------|-----------|
//! | 1 | Size comparison | bigger wins, color is noise | 5 trials, 4 in a row |
//! | 2 | Ranking | blue square > circle > other square | 5 trials, 4 in a row |
//! | 3 | Context | safe iff light and path differ | 5 trials, 4 in a row |
//! | 4 | Sequence | press A, then B | 5 attempts, 4 in a row |
//! | 5 | Gated comparison | light ON: bigger, OFF: smaller | 10 warmup + 20 scored |
//!
//! The first trial of puzzles 1 and 2 is adversarial: built so that an
//! untrained policy is likely to get it wrong.
//!
//! ## Key features
//!
//! - **Deterministic**: the same seed replays the same trials, draw for draw.
//! - **Typed events**: trial-start, choice-made, outcome, learning-note and
//!   puzzle-complete, delivered synchronously in order.
//! - **Non-convergence is a value**: `run_puzzle_to_completion` returns
//!   `Ok(None)` when the budget runs out; errors are reserved for broken
//!   learners and runaway rejection loops.
//!
//! ## Quick start
//!
//! ```rust
//! use puzzle_gauntlet::{Game, Learner, LearnerSet, PuzzleKind};
//!
//! /// Always answers "A" / "press A".
//! struct AlwaysA(usize, usize);
//!
//! impl Learner for AlwaysA {
//!     fn input_width(&self) -> usize { self.0 }
//!     fn output_width(&self) -> usize { self.1 }
//!     fn predict(&self, _inputs: &[u8]) -> Vec<u8> { vec![255; self.1] }
//!     fn learn(&mut self, _inputs: &[u8], _target: &[u8]) {}
//!     fn reset(&mut self, _seed: u32) {}
//!     fn parameter_count(&self) -> usize { 0 }
//!     fn model_size_bytes(&self) -> usize { 0 }
//! }
//!
//! let learners = LearnerSet::from_fn(|kind: PuzzleKind| {
//!     let (inputs, outputs) = kind.learner_widths();
//!     Box::new(AlwaysA(inputs, outputs)) as Box<dyn Learner>
//! })
//! .unwrap();
//!
//! let mut game = Game::with_seed(12345, learners);
//! game.set_observer(|event| println!("[{}] {}", event.kind, event.message));
//! let mastered = game.run_trial().unwrap();
//! println!("mastered after one trial: {mastered}");
//! ```

pub mod puzzle_engine;
pub mod snapshot;

// Convenience re-exports so callers can use `puzzle_gauntlet::Game`
// directly without reaching into `puzzle_engine::`.
pub use puzzle_engine::{
    Choice, EventKind, Game, GameConfig, GameEvent, GameState, Learner, LearnerSet,
    PuzzleError, PuzzleKind, Trial, XorShift32,
};
pub use snapshot::game_snapshot;

#[cfg(test)]
mod tests;
