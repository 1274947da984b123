//! Shared sampling and encoding helpers used by every puzzle.
//!
//! ## RNG ordering
//!
//! Each generator draws its fields in a fixed order and redraws only the
//! field named by its rejection loop.  Tests pin the resulting trials to a
//! seed, so reordering draws here or in a puzzle module is a breaking change.

use rand::RngCore;
use tracing::warn;

use crate::puzzle_engine::{error::PuzzleError, models::PuzzleKind};

/// Upper bound on redraws inside one rejection loop.
pub const MAX_REDRAWS: usize = 10_000;

/// Value in `lo..lo + span`, drawn as `lo + next % span`.
pub fn draw_in<R: RngCore>(rng: &mut R, lo: i16, span: u32) -> i16 {
    lo + (rng.next_u32() % span) as i16
}

/// Fair coin from the low bit of the next draw.
pub fn draw_flag<R: RngCore>(rng: &mut R) -> bool {
    rng.next_u32() % 2 == 1
}

/// Keep calling `redraw` until `accept` holds.
///
/// `current` is checked first, so an already-valid draw costs nothing.
/// More than [`MAX_REDRAWS`] redraws is a fatal error for `puzzle`.
pub fn redraw_until<R, T>(
    rng: &mut R,
    puzzle: PuzzleKind,
    mut current: T,
    accept: impl Fn(&T) -> bool,
    mut redraw: impl FnMut(&mut R) -> T,
) -> Result<T, PuzzleError>
where
    R: RngCore,
{
    let mut attempts = 0usize;
    while !accept(&current) {
        if attempts == MAX_REDRAWS {
            warn!(%puzzle, attempts, "rejection loop exhausted");
            return Err(PuzzleError::RejectionCapExceeded { puzzle, attempts });
        }
        attempts += 1;
        current = redraw(rng);
    }
    Ok(current)
}

/// Encode a boolean trial field the way magnitudes are encoded (0 or 127).
pub fn flag_value(flag: bool) -> i16 {
    if flag { 127 } else { 0 }
}

/// Map a trial value (0..=127) onto a learner input byte.
pub fn scale_to_input(value: i16) -> u8 {
    (i32::from(value) * 2).clamp(0, 255) as u8
}

/// Learner output bytes above the midpoint read as `true`.
pub fn interpret_bool(output: u8) -> bool {
    output > 128
}

/// Training target for a boolean label.
pub fn target_byte(label: bool) -> u8 {
    if label { 255 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle_engine::rng::XorShift32;

    #[test]
    fn draw_in_stays_in_range() {
        let mut rng = XorShift32::new(5);
        for _ in 0..5_000 {
            let v = draw_in(&mut rng, 32, 96);
            assert!((32..=127).contains(&v));
        }
    }

    #[test]
    fn redraw_until_accepts_valid_first_draw_without_drawing() {
        let mut rng = XorShift32::new(5);
        let before = rng.clone();
        let v = redraw_until(&mut rng, PuzzleKind::SizeComparison, 10, |v| *v == 10, |r| r.next() as i32)
            .unwrap();
        assert_eq!(v, 10);
        assert_eq!(rng, before);
    }

    #[test]
    fn redraw_until_reports_exhaustion() {
        let mut rng = XorShift32::new(5);
        let err = redraw_until(&mut rng, PuzzleKind::Ranking, 0u32, |_| false, |r| r.next())
            .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::RejectionCapExceeded { puzzle: PuzzleKind::Ranking, attempts: MAX_REDRAWS }
        );
    }

    #[test]
    fn encoding_matches_learner_contract() {
        assert_eq!(scale_to_input(0), 0);
        assert_eq!(scale_to_input(64), 128);
        assert_eq!(scale_to_input(127), 254);
        assert_eq!(scale_to_input(200), 255);
        assert_eq!(scale_to_input(-3), 0);
        assert!(!interpret_bool(128));
        assert!(interpret_bool(129));
        assert_eq!(target_byte(true), 255);
        assert_eq!(flag_value(true), 127);
    }
}
