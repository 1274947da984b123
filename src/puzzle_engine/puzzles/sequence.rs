use serde::{Deserialize, Serialize};

use crate::puzzle_engine::models::Choice;

/// Input signal for "nothing pressed yet" (also used after a failure).
pub const NOTHING_PRESSED: i16 = 0;
/// Input signal for "A pressed, waiting for B".
pub const FIRST_PRESSED: i16 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SequenceState {
    #[default]
    Start,
    PressedFirst,
    Success,
    Fail,
}

/// "Press A, then B" door.
///
/// `Success` and `Fail` end the attempt; presses are refused until
/// [`SequencePuzzle::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencePuzzle {
    state: SequenceState,
}

impl SequencePuzzle {
    pub fn new() -> Self {
        SequencePuzzle::default()
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Returns whether the press was valid so far. A press in a terminal
    /// state is a no-op that returns `false`.
    pub fn press(&mut self, button: Choice) -> bool {
        match (self.state, button) {
            (SequenceState::Start, Choice::A) => {
                self.state = SequenceState::PressedFirst;
                true
            }
            (SequenceState::PressedFirst, Choice::B) => {
                self.state = SequenceState::Success;
                true
            }
            (SequenceState::Start, Choice::B) | (SequenceState::PressedFirst, Choice::A) => {
                self.state = SequenceState::Fail;
                false
            }
            (SequenceState::Success, _) | (SequenceState::Fail, _) => false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == SequenceState::Success
    }

    pub fn is_fail(&self) -> bool {
        self.state == SequenceState::Fail
    }

    pub fn in_progress(&self) -> bool {
        self.state == SequenceState::PressedFirst
    }

    pub fn reset(&mut self) {
        self.state = SequenceState::Start;
    }

    /// The only context the learner gets: whether A is already down.
    pub fn last_action_input(&self) -> i16 {
        match self.state {
            SequenceState::PressedFirst => FIRST_PRESSED,
            _ => NOTHING_PRESSED,
        }
    }
}
