use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::{
    error::PuzzleError,
    helpers::{draw_flag, flag_value, scale_to_input},
    models::{Choice, PuzzleKind},
    puzzles::size::draw_size_pair,
};

/// Size comparison gated by a light: ON picks the larger, OFF the smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatedTrial {
    pub light_on: bool,
    pub size_a: i16,
    pub size_b: i16,
    pub correct_is_a: bool,
}

impl GatedTrial {
    pub fn correct(&self) -> Choice {
        Choice::from_is_a(self.correct_is_a)
    }

    /// Learner inputs: light, size A, size B.
    pub fn inputs(&self) -> [u8; 3] {
        [
            scale_to_input(flag_value(self.light_on)),
            scale_to_input(self.size_a),
            scale_to_input(self.size_b),
        ]
    }
}

pub fn generate<R: RngCore>(rng: &mut R) -> Result<GatedTrial, PuzzleError> {
    let light_on = draw_flag(rng);
    let (size_a, size_b) = draw_size_pair(rng, PuzzleKind::GatedComparison)?;
    let a_is_larger = size_a > size_b;
    Ok(GatedTrial {
        light_on,
        size_a,
        size_b,
        correct_is_a: if light_on { a_is_larger } else { !a_is_larger },
    })
}
