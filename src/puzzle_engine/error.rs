use thiserror::Error;

use crate::puzzle_engine::models::PuzzleKind;

/// Fatal engine errors. Failing to master a puzzle is not one of these;
/// non-convergence is reported as an ordinary return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("{puzzle}: rejection sampling gave up after {attempts} redraws")]
    RejectionCapExceeded { puzzle: PuzzleKind, attempts: usize },

    #[error(
        "{puzzle}: learner must take {expected_inputs} inputs and give {expected_outputs} outputs \
         (declared {inputs} -> {outputs})"
    )]
    LearnerShape {
        puzzle: PuzzleKind,
        expected_inputs: usize,
        expected_outputs: usize,
        inputs: usize,
        outputs: usize,
    },

    #[error("{puzzle}: learner predicted {got} outputs, expected {expected}")]
    PredictionWidth { puzzle: PuzzleKind, expected: usize, got: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}
