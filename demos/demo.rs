//! Full run through all five puzzles.
//!
//! Run with: `cargo run --example demo [seed]`
//!
//! Set `RUST_LOG=puzzle_gauntlet=debug` to see per-trial logs alongside the
//! event stream.
//!
//! ## Key concepts demonstrated
//!
//! - `LearnerSet::from_fn`: one learner per puzzle, widths checked up front.
//! - `Game::set_observer`: every trial reports trial-start, choice-made,
//!   outcome and learning-note events, plus puzzle-complete on mastery.
//! - `Game::run_puzzle_to_completion`: returns `None` instead of looping
//!   forever when a learner cannot converge.
//! - `game_snapshot`: the JSON view a renderer would draw from.
//!
//! The learners here are scripted: each knows which feature matters but
//! starts with the sign backwards and flips it when corrected.

use std::collections::HashMap;

use puzzle_gauntlet::{
    game_snapshot, EventKind, Game, GameConfig, Learner, LearnerSet, PuzzleKind,
};
use tracing_subscriber::EnvFilter;

fn says_a(kind: PuzzleKind, x: &[u8]) -> bool {
    let rank = |color: u8, shape: u8| -> u8 {
        if shape > 128 { 1 } else if color < 52 { 2 } else { 0 }
    };
    match kind {
        PuzzleKind::SizeComparison  => x[0] > x[1],
        PuzzleKind::Ranking         => rank(x[0], x[1]) > rank(x[2], x[3]),
        PuzzleKind::Context         => (x[0] > 128) != (x[1] > 128),
        PuzzleKind::GatedComparison => (x[0] > 128) == (x[1] > x[2]),
        PuzzleKind::Sequence        => false,
    }
}

/// Knows the feature, not the sign.
struct SignFlipLearner {
    kind: PuzzleKind,
    inverted: bool,
}

impl Learner for SignFlipLearner {
    fn input_width(&self) -> usize { self.kind.learner_widths().0 }
    fn output_width(&self) -> usize { self.kind.learner_widths().1 }

    fn predict(&self, inputs: &[u8]) -> Vec<u8> {
        let a = says_a(self.kind, inputs) != self.inverted;
        vec![if a { 255 } else { 0 }]
    }

    fn learn(&mut self, inputs: &[u8], target: &[u8]) {
        let predicted = says_a(self.kind, inputs) != self.inverted;
        if (target[0] > 128) != predicted {
            self.inverted = !self.inverted;
        }
    }

    fn reset(&mut self, _seed: u32) { self.inverted = true; }
    fn parameter_count(&self) -> usize { 1 }
    fn model_size_bytes(&self) -> usize { 1 }
}

/// Remembers the last good button for each situation.
#[derive(Default)]
struct ButtonMemory {
    seen: HashMap<u8, Vec<u8>>,
}

impl Learner for ButtonMemory {
    fn input_width(&self) -> usize { 1 }
    fn output_width(&self) -> usize { 2 }

    fn predict(&self, inputs: &[u8]) -> Vec<u8> {
        self.seen.get(&inputs[0]).cloned().unwrap_or_else(|| vec![0, 255])
    }

    fn learn(&mut self, inputs: &[u8], target: &[u8]) {
        self.seen.insert(inputs[0], target.to_vec());
    }

    fn reset(&mut self, _seed: u32) { self.seen.clear(); }
    fn parameter_count(&self) -> usize { self.seen.len() * 2 }
    fn model_size_bytes(&self) -> usize { self.seen.len() * 3 }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(12345);

    let learners = LearnerSet::from_fn(|kind| match kind {
        PuzzleKind::Sequence => Box::new(ButtonMemory::default()) as Box<dyn Learner>,
        _ => Box::new(SignFlipLearner { kind, inverted: true }),
    })
    .expect("demo learners have the right widths");

    let mut game = Game::new(GameConfig::new(seed), learners).expect("default config is valid");
    game.set_observer(|event| {
        let marker = match event.kind {
            EventKind::TrialStart     => "──",
            EventKind::ChoiceMade     => "  →",
            EventKind::Outcome        => if event.success { "  ✓" } else { "  ✗" },
            EventKind::LearningNote   => "   ·",
            EventKind::PuzzleComplete => "★",
        };
        println!("{marker} {}", event.message);
    });

    println!();
    println!("══ Seed {seed} ══");
    loop {
        let puzzle = game.state().current_puzzle;
        println!();
        println!("━━ Puzzle {}: {} ({}) ━━", puzzle.number(), puzzle, puzzle.rule());
        match game.run_puzzle_to_completion(game.config().max_trials_per_puzzle) {
            Ok(Some(trials)) => println!("   done in {trials} trials"),
            Ok(None) => {
                println!("   did not converge; stopping");
                break;
            }
            Err(e) => {
                eprintln!("   engine error: {e}");
                break;
            }
        }
        if !game.next_puzzle() {
            break;
        }
    }

    println!();
    println!("══ Final state ══");
    let snapshot = game_snapshot(game.state());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("could not render snapshot: {e}"),
    }
}
