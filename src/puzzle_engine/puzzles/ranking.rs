use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::{
    error::PuzzleError,
    helpers::{draw_flag, draw_in, redraw_until, scale_to_input},
    models::{Choice, PuzzleKind},
};

pub const SQUARE: i16 = 0;
pub const CIRCLE: i16 = 127;

/// Colors below this are blue.
pub const BLUE_LIMIT: i16 = 26;

/// Two shapes ranked: blue square > any circle > other square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingTrial {
    pub color_a: i16,
    pub shape_a: i16,
    pub color_b: i16,
    pub shape_b: i16,
    pub correct_is_a: bool,
}

impl RankingTrial {
    pub fn correct(&self) -> Choice {
        Choice::from_is_a(self.correct_is_a)
    }

    /// `(color, shape)` of the chosen option.
    pub fn option(&self, choice: Choice) -> (i16, i16) {
        match choice {
            Choice::A => (self.color_a, self.shape_a),
            Choice::B => (self.color_b, self.shape_b),
        }
    }

    /// Learner inputs: color A, shape A, color B, shape B.
    pub fn inputs(&self) -> [u8; 4] {
        [
            scale_to_input(self.color_a),
            scale_to_input(self.shape_a),
            scale_to_input(self.color_b),
            scale_to_input(self.shape_b),
        ]
    }
}

pub fn is_circle(shape: i16) -> bool {
    shape > 64
}

pub fn is_blue(color: i16) -> bool {
    color < BLUE_LIMIT
}

/// 2 for a blue square, 1 for any circle, 0 for any other square.
pub fn rank(color: i16, shape: i16) -> u8 {
    if is_circle(shape) {
        1
    } else if is_blue(color) {
        2
    } else {
        0
    }
}

fn draw_shape<R: RngCore>(rng: &mut R) -> i16 {
    if draw_flag(rng) { CIRCLE } else { SQUARE }
}

pub fn generate<R: RngCore>(rng: &mut R, adversarial: bool) -> Result<RankingTrial, PuzzleError> {
    if adversarial {
        return Ok(generate_adversarial(rng));
    }
    let shape_a = draw_shape(rng);
    let first_shape_b = draw_shape(rng);
    let color_a = draw_in(rng, 0, 128);
    let first_color_b = draw_in(rng, 0, 128);

    let rank_a = rank(color_a, shape_a);
    let (color_b, shape_b) = redraw_until(
        rng,
        PuzzleKind::Ranking,
        (first_color_b, first_shape_b),
        |&(color, shape)| rank(color, shape) != rank_a,
        |r| {
            let color = draw_in(r, 0, 128);
            let shape = draw_shape(r);
            (color, shape)
        },
    )?;

    Ok(RankingTrial {
        color_a,
        shape_a,
        color_b,
        shape_b,
        correct_is_a: rank_a > rank(color_b, shape_b),
    })
}

/// Blue square A against a bright circle B. Circles usually win, so an
/// untrained policy favours B; the square is always right.
fn generate_adversarial<R: RngCore>(rng: &mut R) -> RankingTrial {
    let color_a = draw_in(rng, 5, 20);
    let color_b = draw_in(rng, 80, 48);
    RankingTrial { color_a, shape_a: SQUARE, color_b, shape_b: CIRCLE, correct_is_a: true }
}

pub fn shape_name(shape: i16) -> &'static str {
    if is_circle(shape) { "circle" } else { "square" }
}

pub fn color_name(color: i16) -> &'static str {
    match color {
        c if c < 26  => "blue",
        c if c < 52  => "green",
        c if c < 78  => "yellow",
        c if c < 104 => "red",
        _            => "purple",
    }
}

/// Describe a correct pick for the outcome event.
pub fn praise(color: i16, shape: i16) -> &'static str {
    match rank(color, shape) {
        2 => "SAFE! Blue square is the best choice.",
        1 => "SAFE! Circle is a good choice.",
        _ => "SAFE! Correct choice.",
    }
}
