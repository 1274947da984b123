//! Trial generators, one module per puzzle.
//!
//! Generators share the same shape:
//!
//! ```ignore
//! pub fn generate<R: RngCore>(rng: &mut R, adversarial: bool) -> Result<Trial, PuzzleError>
//! ```
//!
//! Only the first two puzzles have an adversarial mode. The context trial
//! cannot fail and returns its value directly; the sequence puzzle has no
//! generator at all, only a state machine.

/// P1: larger wins, color is noise
pub mod size;
/// P2: blue square > circle > other square
pub mod ranking;
/// P3: safe iff light != path
pub mod context;
/// P4: press A then B
pub mod sequence;
/// P5: light-gated size comparison
pub mod gated;
