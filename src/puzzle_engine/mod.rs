//! Core puzzle engine: trial generation, mastery tracking and orchestration.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: puzzle ids, choices, trials, events, config |
//! | `error`     | `PuzzleError`, the fatal error type |
//! | `rng`       | Seeded 32-bit xorshift generator (`rand::RngCore`) |
//! | `helpers`   | Range draws, capped rejection loop, learner encoding |
//! | `puzzles`   | One generator (or state machine) per puzzle |
//! | `validator` | Streak-based mastery check for puzzles 1-4 |
//! | `gauntlet`  | Warmup-then-scored evaluation for puzzle 5 |
//! | `history`   | Rolling window of recent trials for display |
//! | `learner`   | `Learner` trait and the per-puzzle `LearnerSet` |
//! | `game`      | `GameState` and the `Game` orchestrator |

pub mod error;
pub mod game;
pub mod gauntlet;
pub mod helpers;
pub mod history;
pub mod learner;
pub mod models;
pub mod puzzles;
pub mod rng;
pub mod validator;

// Re-export the public API surface so callers can use
// `puzzle_engine::Game` without reaching into sub-modules.
pub use error::PuzzleError;
pub use game::{Game, GameState, Observer};
pub use gauntlet::Gauntlet;
pub use history::{HistoryEntry, TrialHistory};
pub use learner::{Learner, LearnerSet};
pub use models::{Choice, EventKind, GameConfig, GameEvent, PuzzleKind, Trial};
pub use rng::XorShift32;
pub use validator::MasteryValidator;
