//! The boundary to the decision-making component.
//!
//! The engine never looks inside a learner. It encodes each trial as input
//! bytes, reads the prediction back through a fixed threshold, and always
//! hands the labelled example back for training.

use std::fmt;

use crate::puzzle_engine::{
    error::PuzzleError,
    helpers::{interpret_bool, target_byte},
    models::{Choice, PuzzleKind},
};

pub trait Learner {
    fn input_width(&self) -> usize;
    fn output_width(&self) -> usize;

    /// Pure inference; must not change the model.
    fn predict(&self, inputs: &[u8]) -> Vec<u8>;

    fn learn(&mut self, inputs: &[u8], target: &[u8]);

    /// Reinitialise weights and forget any training history.
    fn reset(&mut self, seed: u32);

    fn parameter_count(&self) -> usize;
    fn model_size_bytes(&self) -> usize;
}

/// One learner per puzzle, indexed by [`PuzzleKind`].
pub struct LearnerSet {
    learners: [Box<dyn Learner>; 5],
}

impl LearnerSet {
    /// Build the set, checking every learner's widths against its puzzle.
    pub fn new(
        size: Box<dyn Learner>,
        ranking: Box<dyn Learner>,
        context: Box<dyn Learner>,
        sequence: Box<dyn Learner>,
        gated: Box<dyn Learner>,
    ) -> Result<Self, PuzzleError> {
        let set = LearnerSet { learners: [size, ranking, context, sequence, gated] };
        for kind in PuzzleKind::ALL {
            set.check_shape(kind)?;
        }
        Ok(set)
    }

    /// Build the set from a factory called once per puzzle, in play order.
    pub fn from_fn(mut make: impl FnMut(PuzzleKind) -> Box<dyn Learner>) -> Result<Self, PuzzleError> {
        let [p1, p2, p3, p4, p5] = PuzzleKind::ALL;
        LearnerSet::new(make(p1), make(p2), make(p3), make(p4), make(p5))
    }

    fn check_shape(&self, kind: PuzzleKind) -> Result<(), PuzzleError> {
        let learner = self.get(kind);
        let (expected_inputs, expected_outputs) = kind.learner_widths();
        let (inputs, outputs) = (learner.input_width(), learner.output_width());
        if (inputs, outputs) != (expected_inputs, expected_outputs) {
            return Err(PuzzleError::LearnerShape {
                puzzle: kind,
                expected_inputs,
                expected_outputs,
                inputs,
                outputs,
            });
        }
        Ok(())
    }

    pub fn get(&self, kind: PuzzleKind) -> &dyn Learner {
        self.learners[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: PuzzleKind) -> &mut dyn Learner {
        self.learners[kind.index()].as_mut()
    }

    /// Predict and verify the output width.
    pub fn predict(&self, kind: PuzzleKind, inputs: &[u8]) -> Result<Vec<u8>, PuzzleError> {
        let outputs = self.get(kind).predict(inputs);
        let expected = kind.learner_widths().1;
        if outputs.len() != expected {
            return Err(PuzzleError::PredictionWidth { puzzle: kind, expected, got: outputs.len() });
        }
        Ok(outputs)
    }

    /// Two-option puzzles: an output above the midpoint picks A.
    pub fn choose(&self, kind: PuzzleKind, inputs: &[u8]) -> Result<Choice, PuzzleError> {
        let outputs = self.predict(kind, inputs)?;
        Ok(Choice::from_is_a(interpret_bool(outputs[0])))
    }

    /// Teach a two-option puzzle which side was right.
    pub fn learn_choice(&mut self, kind: PuzzleKind, inputs: &[u8], correct: Choice) {
        self.get_mut(kind).learn(inputs, &[target_byte(correct.is_a())]);
    }

    pub fn total_model_bytes(&self) -> usize {
        self.learners.iter().map(|l| l.model_size_bytes()).sum()
    }

    pub fn total_parameters(&self) -> usize {
        self.learners.iter().map(|l| l.parameter_count()).sum()
    }
}

impl fmt::Debug for LearnerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for kind in PuzzleKind::ALL {
            let l = self.get(kind);
            list.entry(&format_args!(
                "{kind}: {}->{} ({} params)",
                l.input_width(),
                l.output_width(),
                l.parameter_count()
            ));
        }
        list.finish()
    }
}

/// Sequence puzzle: two scores, A wins ties.
pub fn choose_button(scores: &[u8]) -> Choice {
    Choice::from_is_a(scores[0] >= scores[1])
}

/// Sequence puzzle target: reinforce the pressed button when the press was
/// good, the other one when it failed.
pub fn sequence_target(pressed: Choice, success: bool) -> [u8; 2] {
    let reinforce_a = pressed.is_a() == success;
    [target_byte(reinforce_a), target_byte(!reinforce_a)]
}
