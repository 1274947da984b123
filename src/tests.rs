//! Unit tests for the `puzzle_gauntlet` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Convergence | Self-correcting learners master each puzzle in a known number of trials |
//! | Non-convergence | Frozen learners exhaust the budget and get `None` |
//! | Events | Order and kinds of the per-trial event stream; reset event |
//! | Determinism | Same seed → identical event stream |
//! | Flow | Puzzle advance, demo completion, gauntlet short-circuit |
//! | Errors | Rejection cap, bad prediction width, invalid config |
//! | Snapshot | JSON view reflects state and history |

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use rand::{Error, RngCore};

use crate::puzzle_engine::{
    gauntlet::{SCORED_TRIALS, TOTAL_TRIALS},
    helpers::{interpret_bool, target_byte, MAX_REDRAWS},
    puzzles::{ranking, size},
    EventKind, Game, GameConfig, GameEvent, Learner, LearnerSet, PuzzleError, PuzzleKind, Trial,
};
use crate::snapshot::game_snapshot;

// ── test learners ────────────────────────────────────────────────────────────

type Rule = fn(&[u8]) -> bool;

fn size_rule(x: &[u8]) -> bool {
    x[0] > x[1]
}

fn ranking_rule(x: &[u8]) -> bool {
    let rank = |color: u8, shape: u8| ranking::rank(i16::from(color / 2), i16::from(shape / 2));
    rank(x[0], x[1]) > rank(x[2], x[3])
}

fn context_rule(x: &[u8]) -> bool {
    interpret_bool(x[0]) != interpret_bool(x[1])
}

fn gated_rule(x: &[u8]) -> bool {
    interpret_bool(x[0]) == (x[1] > x[2])
}

fn rule_for(kind: PuzzleKind) -> Rule {
    match kind {
        PuzzleKind::SizeComparison  => size_rule,
        PuzzleKind::Ranking         => ranking_rule,
        PuzzleKind::Context         => context_rule,
        PuzzleKind::GatedComparison => gated_rule,
        PuzzleKind::Sequence        => unreachable!("sequence uses a table learner"),
    }
}

/// Knows the right feature but starts with the sign backwards; flips the
/// sign whenever a target disagrees. With `frozen` it never flips.
struct RuleLearner {
    widths: (usize, usize),
    rule: Rule,
    inverted: bool,
    frozen: bool,
}

impl RuleLearner {
    fn boxed(kind: PuzzleKind, inverted: bool, frozen: bool) -> Box<dyn Learner> {
        Box::new(RuleLearner { widths: kind.learner_widths(), rule: rule_for(kind), inverted, frozen })
    }

    fn says_true(&self, inputs: &[u8]) -> bool {
        (self.rule)(inputs) != self.inverted
    }
}

impl Learner for RuleLearner {
    fn input_width(&self) -> usize { self.widths.0 }
    fn output_width(&self) -> usize { self.widths.1 }

    fn predict(&self, inputs: &[u8]) -> Vec<u8> {
        vec![target_byte(self.says_true(inputs))]
    }

    fn learn(&mut self, inputs: &[u8], target: &[u8]) {
        if !self.frozen && interpret_bool(target[0]) != self.says_true(inputs) {
            self.inverted = !self.inverted;
        }
    }

    fn reset(&mut self, _seed: u32) {
        self.inverted = true;
    }

    fn parameter_count(&self) -> usize { 1 }
    fn model_size_bytes(&self) -> usize { 1 }
}

/// Remembers the last target per exact input; unseen inputs favour B.
#[derive(Default)]
struct TableLearner {
    table: HashMap<Vec<u8>, Vec<u8>>,
    frozen_output: Option<Vec<u8>>,
}

impl Learner for TableLearner {
    fn input_width(&self) -> usize { 1 }
    fn output_width(&self) -> usize { 2 }

    fn predict(&self, inputs: &[u8]) -> Vec<u8> {
        if let Some(out) = &self.frozen_output {
            return out.clone();
        }
        self.table.get(inputs).cloned().unwrap_or_else(|| vec![0, 255])
    }

    fn learn(&mut self, inputs: &[u8], target: &[u8]) {
        self.table.insert(inputs.to_vec(), target.to_vec());
    }

    fn reset(&mut self, _seed: u32) {
        self.table.clear();
    }

    fn parameter_count(&self) -> usize { self.table.len() * 2 }
    fn model_size_bytes(&self) -> usize { self.table.len() * 3 }
}

/// Learners that start wrong and correct themselves.
fn adaptive_learners() -> LearnerSet {
    LearnerSet::from_fn(|kind| match kind {
        PuzzleKind::Sequence => Box::new(TableLearner::default()) as Box<dyn Learner>,
        _ => RuleLearner::boxed(kind, true, false),
    })
    .unwrap()
}

/// Learners that are always wrong and never change.
fn hopeless_learners() -> LearnerSet {
    LearnerSet::from_fn(|kind| match kind {
        PuzzleKind::Sequence => Box::new(TableLearner {
            table: HashMap::new(),
            frozen_output: Some(vec![255, 0]),
        }) as Box<dyn Learner>,
        _ => RuleLearner::boxed(kind, true, true),
    })
    .unwrap()
}

fn recorder(game: &mut Game) -> Rc<RefCell<Vec<GameEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.set_observer(move |e| sink.borrow_mut().push(e.clone()));
    events
}

fn advance_to(game: &mut Game, target: PuzzleKind) {
    while game.state().current_puzzle != target {
        assert!(game.next_puzzle());
    }
}

// ── convergence ──────────────────────────────────────────────────────────────

#[test]
fn size_puzzle_converges_for_seed_12345() {
    let mut game = Game::with_seed(12345, adaptive_learners());
    let trials = game.run_puzzle_to_completion(1000).unwrap();
    // adversarial miss, then four in a row
    assert_eq!(trials, Some(5));
    assert!(game.state().puzzle_complete);
    assert_eq!(game.state().validator.failures, 1);
}

#[test]
fn each_puzzle_converges_in_expected_trials() {
    let mut game = Game::with_seed(12345, adaptive_learners());
    let mut counts = Vec::new();
    loop {
        counts.push(game.run_puzzle_to_completion(1000).unwrap());
        if !game.next_puzzle() {
            break;
        }
    }
    // sequence: one failed attempt, then four two-press successes
    assert_eq!(
        counts,
        vec![Some(5), Some(5), Some(5), Some(9), Some(TOTAL_TRIALS as usize)]
    );
    assert!(game.state().demo_complete);
}

#[test]
fn full_demo_completes_across_seeds() {
    for seed in [1u32, 42, 999, 0xDEAD_BEEF, 7] {
        let mut game = Game::with_seed(seed, adaptive_learners());
        assert!(game.run_full_demo(1000).unwrap(), "seed {seed}");
        let s = game.state();
        assert!(s.demo_complete);
        assert_eq!(s.current_puzzle, PuzzleKind::GatedComparison);
        assert_eq!(s.gauntlet.scored_completed, SCORED_TRIALS);
        assert_eq!(s.gauntlet.score_percent(), 100);
    }
}

#[test]
fn configured_demo_uses_config_budget() {
    let config = GameConfig { max_trials_per_puzzle: 3, ..GameConfig::new(5) };
    let mut game = Game::new(config, adaptive_learners()).unwrap();
    // five trials are the minimum for puzzle 1
    assert!(!game.run_configured_demo().unwrap());
    assert!(!game.state().demo_complete);
}

// ── non-convergence ──────────────────────────────────────────────────────────

#[test]
fn frozen_wrong_learner_exhausts_budget() {
    let mut game = Game::with_seed(12345, hopeless_learners());
    assert_eq!(game.run_puzzle_to_completion(1000).unwrap(), None);
    let v = game.state().validator;
    assert_eq!(v.total_trials, 1000);
    assert_eq!(v.failures, 1000);
    assert!(!game.state().puzzle_complete);
}

#[test]
fn sequence_learner_stuck_on_a_never_opens_the_door() {
    let mut game = Game::with_seed(3, hopeless_learners());
    advance_to(&mut game, PuzzleKind::Sequence);
    assert_eq!(game.run_puzzle_to_completion(1000).unwrap(), None);
    // A, A: every second press resolves an attempt as a failure
    assert_eq!(game.state().validator.failures, 500);
}

#[test]
fn full_demo_stops_at_first_stuck_puzzle() {
    let mut game = Game::with_seed(8, hopeless_learners());
    assert!(!game.run_full_demo(50).unwrap());
    assert_eq!(game.state().current_puzzle, PuzzleKind::SizeComparison);
    assert!(!game.state().demo_complete);
}

#[test]
fn gauntlet_finishes_even_when_every_answer_is_wrong() {
    let mut game = Game::with_seed(11, hopeless_learners());
    advance_to(&mut game, PuzzleKind::GatedComparison);
    assert_eq!(game.run_puzzle_to_completion(1000).unwrap(), Some(TOTAL_TRIALS as usize));
    assert_eq!(game.state().gauntlet.score_percent(), 0);
}

// ── events ───────────────────────────────────────────────────────────────────

#[test]
fn one_trial_emits_events_in_order() {
    let mut game = Game::with_seed(12345, adaptive_learners());
    let events = recorder(&mut game);
    assert!(!game.run_trial().unwrap());

    let events = events.borrow();
    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::TrialStart, EventKind::ChoiceMade, EventKind::Outcome, EventKind::LearningNote]
    );
    // the adversarial first trial fools the backwards learner
    assert!(!events[2].success);
    assert_eq!(events[2].message, "WRONG! Picked the smaller one.");
    assert_eq!(events[1].message, "Learner picks B (right)");
}

#[test]
fn mastery_emits_puzzle_complete_last() {
    let mut game = Game::with_seed(12345, adaptive_learners());
    let events = recorder(&mut game);
    game.run_puzzle_to_completion(100).unwrap();

    let events = events.borrow();
    let last = events.last().unwrap();
    assert_eq!(last.kind, EventKind::PuzzleComplete);
    assert!(last.message.contains("bigger"));
    let outcomes = events.iter().filter(|e| e.kind == EventKind::Outcome).count();
    assert_eq!(outcomes, 5);
}

#[test]
fn sequence_in_progress_press_is_a_good_outcome_but_not_recorded() {
    let mut game = Game::with_seed(1, adaptive_learners());
    advance_to(&mut game, PuzzleKind::Sequence);
    let events = recorder(&mut game);

    game.run_trial().unwrap(); // B first: fail
    game.run_trial().unwrap(); // A: in progress
    assert_eq!(game.state().validator.total_trials, 1);
    assert!(game.state().sequence.in_progress());

    let events = events.borrow();
    let outcomes: Vec<(&str, bool)> = events
        .iter()
        .filter(|e| e.kind == EventKind::Outcome)
        .map(|e| (e.message.as_str(), e.success))
        .collect();
    assert_eq!(outcomes, vec![("FAIL! Wrong order!", false), ("Good start, now press B", true)]);
}

#[test]
fn reset_puzzle_reseeds_learner_and_announces_reset() {
    struct Spy(Rc<Cell<Option<u32>>>);
    impl Learner for Spy {
        fn input_width(&self) -> usize { 4 }
        fn output_width(&self) -> usize { 1 }
        fn predict(&self, _inputs: &[u8]) -> Vec<u8> { vec![0] }
        fn learn(&mut self, _inputs: &[u8], _target: &[u8]) {}
        fn reset(&mut self, seed: u32) { self.0.set(Some(seed)); }
        fn parameter_count(&self) -> usize { 0 }
        fn model_size_bytes(&self) -> usize { 0 }
    }

    let seen = Rc::new(Cell::new(None));
    let spy = Rc::clone(&seen);
    let learners = LearnerSet::from_fn(move |kind| match kind {
        PuzzleKind::SizeComparison => Box::new(Spy(Rc::clone(&spy))) as Box<dyn Learner>,
        PuzzleKind::Sequence => Box::new(TableLearner::default()),
        _ => RuleLearner::boxed(kind, true, false),
    })
    .unwrap();

    let config = GameConfig { learner_seed: Some(77), ..GameConfig::new(12345) };
    let mut game = Game::new(config, learners).unwrap();
    let events = recorder(&mut game);
    game.run_trial().unwrap();
    game.run_trial().unwrap();
    game.reset_puzzle();

    assert_eq!(seen.get(), Some(77));
    assert!(game.state().validator.is_first_trial());
    assert!(game.state().history.is_empty());
    assert_eq!(game.state().last_trial, None);
    let events = events.borrow();
    assert_eq!(events.last().map(|e| (e.kind, e.message.as_str())), Some((EventKind::TrialStart, "--- RESET ---")));
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_replays_identical_event_stream() {
    let run = |seed: u32| {
        let mut game = Game::with_seed(seed, hopeless_learners());
        let events = recorder(&mut game);
        for _ in 0..50 {
            game.run_trial().unwrap();
        }
        let out = events.borrow().clone();
        out
    };
    assert_eq!(run(4242), run(4242));
    assert_ne!(run(4242), run(4243));
}

#[test]
fn first_trial_of_ranking_is_adversarial() {
    let mut game = Game::with_seed(99, adaptive_learners());
    advance_to(&mut game, PuzzleKind::Ranking);
    game.run_trial().unwrap();
    match game.state().last_trial {
        Some(Trial::Ranking(t)) => {
            assert_eq!(ranking::rank(t.color_a, t.shape_a), 2);
            assert_eq!(ranking::rank(t.color_b, t.shape_b), 1);
            assert!(t.correct_is_a);
        }
        other => panic!("expected a ranking trial, got {other:?}"),
    }
}

// ── flow ─────────────────────────────────────────────────────────────────────

#[test]
fn next_puzzle_walks_all_five_then_reports_done() {
    let mut game = Game::with_seed(1, adaptive_learners());
    let mut seen = vec![game.state().current_puzzle];
    while game.next_puzzle() {
        seen.push(game.state().current_puzzle);
    }
    assert_eq!(seen, PuzzleKind::ALL.to_vec());
    assert!(game.state().demo_complete);
    assert!(!game.next_puzzle());
    assert_eq!(game.state().current_puzzle, PuzzleKind::GatedComparison);
}

#[test]
fn completed_gauntlet_short_circuits_without_drawing() {
    let mut game = Game::with_seed(21, adaptive_learners());
    advance_to(&mut game, PuzzleKind::GatedComparison);
    for _ in 0..TOTAL_TRIALS {
        game.run_trial().unwrap();
    }
    let rng_before = game.state().rng.clone();
    assert!(game.run_trial().unwrap());
    assert_eq!(game.state().rng, rng_before);
    assert!(game.state().puzzle_complete);
}

#[test]
fn history_keeps_last_four_resolved_trials() {
    let mut game = Game::with_seed(6, hopeless_learners());
    for _ in 0..6 {
        game.run_trial().unwrap();
    }
    let numbers: Vec<u32> = game.state().history.entries().map(|e| e.trial).collect();
    assert_eq!(numbers, vec![3, 4, 5, 6]);
    assert!(game.state().history.entries().all(|e| !e.correct));
}

// ── errors ───────────────────────────────────────────────────────────────────

/// Returns the same word forever, so every redraw repeats the tie.
struct StuckRng;

impl RngCore for StuckRng {
    fn next_u32(&mut self) -> u32 { 7 }
    fn next_u64(&mut self) -> u64 { 7 }
    fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(7) }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[test]
fn runaway_rejection_loop_is_a_fatal_error() {
    let err = size::generate(&mut StuckRng, false).unwrap_err();
    assert_eq!(
        err,
        PuzzleError::RejectionCapExceeded { puzzle: PuzzleKind::SizeComparison, attempts: MAX_REDRAWS }
    );
    let err = ranking::generate(&mut StuckRng, false).unwrap_err();
    assert!(matches!(err, PuzzleError::RejectionCapExceeded { puzzle: PuzzleKind::Ranking, .. }));
}

#[test]
fn wrong_prediction_width_fails_before_recording() {
    struct Chatty;
    impl Learner for Chatty {
        fn input_width(&self) -> usize { 4 }
        fn output_width(&self) -> usize { 1 }
        fn predict(&self, _inputs: &[u8]) -> Vec<u8> { vec![1, 2, 3] }
        fn learn(&mut self, _inputs: &[u8], _target: &[u8]) {}
        fn reset(&mut self, _seed: u32) {}
        fn parameter_count(&self) -> usize { 0 }
        fn model_size_bytes(&self) -> usize { 0 }
    }

    let learners = LearnerSet::from_fn(|kind| match kind {
        PuzzleKind::SizeComparison => Box::new(Chatty) as Box<dyn Learner>,
        PuzzleKind::Sequence => Box::new(TableLearner::default()),
        _ => RuleLearner::boxed(kind, true, false),
    })
    .unwrap();
    let mut game = Game::with_seed(12345, learners);
    let err = game.run_trial().unwrap_err();
    assert_eq!(
        err,
        PuzzleError::PredictionWidth { puzzle: PuzzleKind::SizeComparison, expected: 1, got: 3 }
    );
    assert_eq!(game.state().validator.total_trials, 0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = GameConfig { history_len: 0, ..GameConfig::default() };
    assert!(matches!(Game::new(config, adaptive_learners()), Err(PuzzleError::Config(_))));
}

// ── snapshot ─────────────────────────────────────────────────────────────────

#[test]
fn snapshot_reflects_streak_progress() {
    let mut game = Game::with_seed(12345, adaptive_learners());
    for _ in 0..3 {
        game.run_trial().unwrap();
    }
    let snap = game_snapshot(game.state());
    assert_eq!(snap["puzzle"]["number"], 1);
    assert_eq!(snap["puzzle"]["title"], "SIZE");
    assert_eq!(snap["progress"]["kind"], "streak");
    assert_eq!(snap["progress"]["total_trials"], 3);
    assert_eq!(snap["progress"]["streak"], 2);
    assert_eq!(snap["last_trial"]["type"], "size");
    assert_eq!(snap["history"].as_array().map(Vec::len), Some(3));
    // newest first
    assert_eq!(snap["history"][0]["trial"], 3);
    assert_eq!(snap["model_bytes"], 4);
    assert_eq!(snap["parameters"], 4);
}

#[test]
fn snapshot_reports_gauntlet_phase() {
    let mut game = Game::with_seed(12345, adaptive_learners());
    advance_to(&mut game, PuzzleKind::GatedComparison);
    let snap = game_snapshot(game.state());
    assert_eq!(snap["progress"]["kind"], "gauntlet");
    assert_eq!(snap["progress"]["phase"], "warmup");
    assert!(snap["last_trial"].is_null());

    game.run_puzzle_to_completion(100).unwrap();
    let snap = game_snapshot(game.state());
    assert_eq!(snap["progress"]["phase"], "scored");
    assert_eq!(snap["progress"]["score_percent"], 100);
    assert_eq!(snap["puzzle_complete"], true);
}
