use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::{
    error::PuzzleError,
    helpers::{draw_in, redraw_until, scale_to_input},
    models::{Choice, PuzzleKind},
};

/// Smallest size gap a regular trial may present.
pub const MIN_SIZE_GAP: i16 = 20;

/// Two mushrooms: the larger one is safe, color is noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTrial {
    pub size_a: i16,
    pub size_b: i16,
    pub color_a: i16,
    pub color_b: i16,
    pub correct_is_a: bool,
}

impl SizeTrial {
    pub fn correct(&self) -> Choice {
        Choice::from_is_a(self.correct_is_a)
    }

    /// Learner inputs: size A, size B, color A, color B.
    pub fn inputs(&self) -> [u8; 4] {
        [
            scale_to_input(self.size_a),
            scale_to_input(self.size_b),
            scale_to_input(self.color_a),
            scale_to_input(self.color_b),
        ]
    }
}

/// Draw a pair of sizes in 32..=127 at least [`MIN_SIZE_GAP`] apart.
///
/// Shared with the gated puzzle. Only size B is redrawn.
pub fn draw_size_pair<R: RngCore>(rng: &mut R, puzzle: PuzzleKind) -> Result<(i16, i16), PuzzleError> {
    let size_a = draw_in(rng, 32, 96);
    let first_b = draw_in(rng, 32, 96);
    let size_b = redraw_until(
        rng,
        puzzle,
        first_b,
        |b| (size_a - *b).abs() >= MIN_SIZE_GAP,
        |r| draw_in(r, 32, 96),
    )?;
    Ok((size_a, size_b))
}

pub fn generate<R: RngCore>(rng: &mut R, adversarial: bool) -> Result<SizeTrial, PuzzleError> {
    if adversarial {
        return Ok(generate_adversarial(rng));
    }
    let (size_a, size_b) = draw_size_pair(rng, PuzzleKind::SizeComparison)?;
    let color_a = draw_in(rng, 0, 128);
    let color_b = draw_in(rng, 0, 128);
    Ok(SizeTrial { size_a, size_b, color_a, color_b, correct_is_a: size_a > size_b })
}

/// Large dull option A against small bright option B; A is always right.
/// A policy that mixes color into its choice tends to pick B.
fn generate_adversarial<R: RngCore>(rng: &mut R) -> SizeTrial {
    let size_a = draw_in(rng, 90, 38);
    let size_b = draw_in(rng, 32, 38);
    let color_a = draw_in(rng, 10, 30);
    let color_b = draw_in(rng, 90, 38);
    SizeTrial { size_a, size_b, color_a, color_b, correct_is_a: true }
}

pub fn color_name(color: i16) -> &'static str {
    match color {
        c if c < 16  => "red",
        c if c < 32  => "orange",
        c if c < 48  => "yellow",
        c if c < 64  => "green",
        c if c < 80  => "cyan",
        c if c < 96  => "blue",
        c if c < 112 => "purple",
        _            => "pink",
    }
}
