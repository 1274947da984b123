//! The orchestrator: runs one trial at a time, moves between puzzles and
//! reports every step to a single observer.
//!
//! ## One trial
//!
//! generate (rng) → predict (learner) → judge against the label → learn
//! (always, right or wrong) → record (validator or gauntlet) → emit events →
//! report whether the puzzle is done.
//!
//! A trial either runs to the end or fails before touching any counter, so
//! stopping between calls never leaves a half-recorded trial behind.

use tracing::{debug, info, warn};

use crate::puzzle_engine::{
    error::PuzzleError,
    gauntlet::{Gauntlet, SCORED_TRIALS, WARMUP_TRIALS},
    helpers::{interpret_bool, scale_to_input, target_byte},
    history::TrialHistory,
    learner::{choose_button, sequence_target, LearnerSet},
    models::{EventKind, GameConfig, GameEvent, PuzzleKind, Trial},
    puzzles::{
        context, gated, ranking,
        sequence::{SequencePuzzle, FIRST_PRESSED},
        size,
    },
    rng::XorShift32,
    validator::MasteryValidator,
};

/// Receives every event, synchronously and in order.
pub type Observer = Box<dyn FnMut(&GameEvent)>;

/// Everything one run owns. Renderers read it; only [`Game`] mutates it.
#[derive(Debug)]
pub struct GameState {
    pub current_puzzle: PuzzleKind,
    pub puzzle_complete: bool,
    pub demo_complete: bool,
    pub validator: MasteryValidator,
    pub gauntlet: Gauntlet,
    pub sequence: SequencePuzzle,
    pub learners: LearnerSet,
    pub rng: XorShift32,
    /// Last generated trial, for display only.
    pub last_trial: Option<Trial>,
    pub history: TrialHistory,
    /// `run_trial` calls since the current puzzle started.
    pub trials_run: u32,
}

impl GameState {
    pub fn new(seed: u32, learners: LearnerSet, history_len: usize) -> Self {
        GameState {
            current_puzzle: PuzzleKind::SizeComparison,
            puzzle_complete: false,
            demo_complete: false,
            validator: MasteryValidator::new(),
            gauntlet: Gauntlet::new(),
            sequence: SequencePuzzle::new(),
            learners,
            rng: XorShift32::new(seed),
            last_trial: None,
            history: TrialHistory::new(history_len),
            trials_run: 0,
        }
    }

    /// Clear progress on the current puzzle, including a half-pressed
    /// sequence. Learners keep their training.
    pub fn reset(&mut self) {
        self.validator.reset();
        self.gauntlet.reset();
        self.sequence.reset();
        self.puzzle_complete = false;
        self.history.clear();
        self.trials_run = 0;
    }

    /// Move to the next puzzle. After the last one, sets `demo_complete`
    /// and returns `false` without changing the current puzzle.
    pub fn next_puzzle(&mut self) -> bool {
        match self.current_puzzle.next() {
            Some(next) => {
                self.current_puzzle = next;
                self.reset();
                true
            }
            None => {
                self.demo_complete = true;
                false
            }
        }
    }

    pub fn total_model_bytes(&self) -> usize {
        self.learners.total_model_bytes()
    }
}

/// The lesson announced when a validator-driven puzzle is mastered.
pub fn lesson(kind: PuzzleKind) -> &'static str {
    match kind {
        PuzzleKind::SizeComparison  => "* Learned: pick the bigger one. Color doesn't matter.",
        PuzzleKind::Ranking         => "* Learned: circles are safe, but blue squares are even better.",
        PuzzleKind::Context         => "* Learned: the light changes which path is safe.",
        PuzzleKind::Sequence        => "* Learned: press A first, then press B.",
        PuzzleKind::GatedComparison => "* Learned: the light decides whether bigger or smaller wins.",
    }
}

pub struct Game {
    state: GameState,
    config: GameConfig,
    observer: Option<Observer>,
}

impl Game {
    pub fn new(config: GameConfig, learners: LearnerSet) -> Result<Self, PuzzleError> {
        config.validate()?;
        let seed = config.resolved_seed();
        info!(seed, "starting puzzle run");
        Ok(Game {
            state: GameState::new(seed, learners, config.history_len),
            config,
            observer: None,
        })
    }

    /// Deterministic run with default settings.
    pub fn with_seed(seed: u32, learners: LearnerSet) -> Self {
        let config = GameConfig::new(seed);
        Game {
            state: GameState::new(seed, learners, config.history_len),
            config,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl FnMut(&GameEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn emit(&mut self, kind: EventKind, message: impl Into<String>, success: bool) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&GameEvent { kind, message: message.into(), success });
        }
    }

    /// Run one trial of the current puzzle. `Ok(true)` once it is mastered.
    pub fn run_trial(&mut self) -> Result<bool, PuzzleError> {
        self.state.trials_run += 1;
        match self.state.current_puzzle {
            PuzzleKind::SizeComparison  => self.run_size_trial(),
            PuzzleKind::Ranking         => self.run_ranking_trial(),
            PuzzleKind::Context         => self.run_context_trial(),
            PuzzleKind::Sequence        => self.run_sequence_trial(),
            PuzzleKind::GatedComparison => self.run_gated_trial(),
        }
    }

    /// Start the current puzzle over with a freshly initialised learner.
    pub fn reset_puzzle(&mut self) {
        let kind = self.state.current_puzzle;
        let seed = self.config.learner_seed.unwrap_or_else(rand::random);
        self.state.reset();
        self.state.last_trial = None;
        self.state.learners.get_mut(kind).reset(seed);
        info!(puzzle = %kind, "puzzle reset");
        self.emit(EventKind::TrialStart, "--- RESET ---", false);
    }

    /// `false` once there is no puzzle left (and `demo_complete` is set).
    pub fn next_puzzle(&mut self) -> bool {
        let advanced = self.state.next_puzzle();
        if advanced {
            info!(puzzle = %self.state.current_puzzle, "advanced to next puzzle");
        } else {
            info!("all puzzles finished");
        }
        advanced
    }

    /// Run trials until the current puzzle is done or `max_trials` is spent.
    ///
    /// Returns the number of trials it took, or `None` if the learner never
    /// got there.
    pub fn run_puzzle_to_completion(&mut self, max_trials: usize) -> Result<Option<usize>, PuzzleError> {
        self.state.reset();
        for trial in 1..=max_trials {
            if self.run_trial()? {
                return Ok(Some(trial));
            }
        }
        warn!(puzzle = %self.state.current_puzzle, max_trials, "puzzle did not converge");
        Ok(None)
    }

    /// Run the current puzzle and every one after it. Stops at the first
    /// puzzle that does not converge and returns `false`.
    pub fn run_full_demo(&mut self, max_trials_per_puzzle: usize) -> Result<bool, PuzzleError> {
        loop {
            if self.run_puzzle_to_completion(max_trials_per_puzzle)?.is_none() {
                return Ok(false);
            }
            if !self.next_puzzle() {
                return Ok(true);
            }
        }
    }

    /// [`Game::run_full_demo`] with the configured per-puzzle budget.
    pub fn run_configured_demo(&mut self) -> Result<bool, PuzzleError> {
        self.run_full_demo(self.config.max_trials_per_puzzle)
    }

    // -- shared trial steps --------------------------------------------------

    fn note_learning(&mut self, detail: String) {
        self.emit(EventKind::LearningNote, format!("Training on: {detail}"), false);
    }

    fn emit_outcome(&mut self, correct: bool, right: &str, wrong: &str) {
        let message = if correct { right } else { wrong };
        self.emit(EventKind::Outcome, message, correct);
    }

    /// Record a resolved trial for puzzles 1-4 and check for mastery.
    fn settle(&mut self, correct: bool, summary: String) -> bool {
        let kind = self.state.current_puzzle;
        self.state.validator.record_outcome(correct);
        let v = self.state.validator;
        self.state.history.push(v.total_trials, correct, summary);
        debug!(
            puzzle = %kind,
            correct,
            total = v.total_trials,
            streak = v.consecutive_successes,
            "trial resolved"
        );
        if !v.has_learned() {
            return false;
        }
        self.state.puzzle_complete = true;
        info!(puzzle = %kind, trials = v.total_trials, failures = v.failures, "puzzle mastered");
        self.emit(EventKind::PuzzleComplete, lesson(kind), false);
        true
    }

    // -- puzzles ---------------------------------------------------------------

    fn run_size_trial(&mut self) -> Result<bool, PuzzleError> {
        let kind = PuzzleKind::SizeComparison;
        let adversarial = self.state.validator.is_first_trial();
        let trial = size::generate(&mut self.state.rng, adversarial)?;
        self.state.last_trial = Some(Trial::Size(trial));

        let inputs = trial.inputs();
        let picked = self.state.learners.choose(kind, &inputs)?;
        let correct = picked == trial.correct();

        self.emit(
            EventKind::TrialStart,
            format!(
                "Learner sees {}({}) vs {}({})",
                size::color_name(trial.color_a),
                trial.size_a,
                size::color_name(trial.color_b),
                trial.size_b
            ),
            false,
        );
        self.emit(EventKind::ChoiceMade, format!("Learner picks {picked} ({})", picked.side()), false);
        self.emit_outcome(correct, "CORRECT! The bigger one was safe.", "WRONG! Picked the smaller one.");

        self.state.learners.learn_choice(kind, &inputs, trial.correct());
        self.note_learning(format!("{} was the safe pick", trial.correct()));

        let summary = format!("{} vs {}, picked {picked}", trial.size_a, trial.size_b);
        Ok(self.settle(correct, summary))
    }

    fn run_ranking_trial(&mut self) -> Result<bool, PuzzleError> {
        let kind = PuzzleKind::Ranking;
        let adversarial = self.state.validator.is_first_trial();
        let trial = ranking::generate(&mut self.state.rng, adversarial)?;
        self.state.last_trial = Some(Trial::Ranking(trial));

        let inputs = trial.inputs();
        let picked = self.state.learners.choose(kind, &inputs)?;
        let correct = picked == trial.correct();
        let (picked_color, picked_shape) = trial.option(picked);

        self.emit(
            EventKind::TrialStart,
            format!(
                "Learner sees {} {} vs {} {}",
                ranking::color_name(trial.color_a),
                ranking::shape_name(trial.shape_a),
                ranking::color_name(trial.color_b),
                ranking::shape_name(trial.shape_b)
            ),
            false,
        );
        self.emit(
            EventKind::ChoiceMade,
            format!(
                "Learner picks {picked} ({} {})",
                ranking::color_name(picked_color),
                ranking::shape_name(picked_shape)
            ),
            false,
        );
        self.emit_outcome(correct, ranking::praise(picked_color, picked_shape), "DANGER! Wrong choice.");

        self.state.learners.learn_choice(kind, &inputs, trial.correct());
        self.note_learning(format!("{} ranked higher", trial.correct()));

        let summary = format!(
            "{} {} vs {} {}, picked {picked}",
            ranking::color_name(trial.color_a),
            ranking::shape_name(trial.shape_a),
            ranking::color_name(trial.color_b),
            ranking::shape_name(trial.shape_b)
        );
        Ok(self.settle(correct, summary))
    }

    fn run_context_trial(&mut self) -> Result<bool, PuzzleError> {
        let kind = PuzzleKind::Context;
        let trial = context::generate(&mut self.state.rng);
        self.state.last_trial = Some(Trial::Context(trial));

        let inputs = trial.inputs();
        let predicted_safe = interpret_bool(self.state.learners.predict(kind, &inputs)?[0]);
        let correct = predicted_safe == trial.is_safe;

        let light = if trial.light_on { "ON" } else { "OFF" };
        let path = if trial.choosing_right { "RIGHT" } else { "LEFT" };
        let verdict = |safe: bool| if safe { "SAFE" } else { "DANGER" };

        self.emit(EventKind::TrialStart, format!("Light is {light}, path is {path}"), false);
        self.emit(EventKind::ChoiceMade, format!("Learner predicts: {}", verdict(predicted_safe)), false);
        self.emit_outcome(correct, "Correct prediction!", "Wrong prediction!");

        self.state.learners.get_mut(kind).learn(&inputs, &[target_byte(trial.is_safe)]);
        self.note_learning(format!("light {light} + {path} is {}", verdict(trial.is_safe)));

        let summary = format!("light {light}, {path}: said {}", verdict(predicted_safe));
        Ok(self.settle(correct, summary))
    }

    fn run_sequence_trial(&mut self) -> Result<bool, PuzzleError> {
        let kind = PuzzleKind::Sequence;
        let last_action = self.state.sequence.last_action_input();
        let inputs = [scale_to_input(last_action)];
        let pressed = choose_button(&self.state.learners.predict(kind, &inputs)?);

        let waiting = if last_action == FIRST_PRESSED { "A is down" } else { "nothing pressed" };
        self.emit(EventKind::TrialStart, format!("Door is locked, {waiting}"), false);
        self.emit(EventKind::ChoiceMade, format!("Learner presses {pressed}"), false);

        self.state.sequence.press(pressed);
        self.state.last_trial = Some(Trial::Sequence { last_action, pressed });

        let sequence = self.state.sequence;
        let good = !sequence.is_fail();
        if sequence.is_success() {
            self.emit(EventKind::Outcome, "SUCCESS! Door opens!", true);
        } else if sequence.is_fail() {
            self.emit(EventKind::Outcome, "FAIL! Wrong order!", false);
        } else {
            self.emit(EventKind::Outcome, "Good start, now press B", true);
        }

        self.state.learners.get_mut(kind).learn(&inputs, &sequence_target(pressed, good));
        self.note_learning(format!(
            "{} after {waiting}",
            if good { format!("{pressed} was right") } else { format!("{pressed} was wrong") }
        ));

        if sequence.in_progress() {
            return Ok(false);
        }
        self.state.sequence.reset();
        let summary = if good { "A then B: door opened".to_string() } else { format!("pressed {pressed} out of order") };
        Ok(self.settle(good, summary))
    }

    fn run_gated_trial(&mut self) -> Result<bool, PuzzleError> {
        let kind = PuzzleKind::GatedComparison;
        if self.state.gauntlet.is_complete() {
            self.state.puzzle_complete = true;
            return Ok(true);
        }

        let trial = gated::generate(&mut self.state.rng)?;
        self.state.last_trial = Some(Trial::Gated(trial));

        let inputs = trial.inputs();
        let picked = self.state.learners.choose(kind, &inputs)?;
        let correct = picked == trial.correct();

        let g = self.state.gauntlet;
        let light = if trial.light_on { "ON" } else { "OFF" };
        let phase = if g.in_warmup() {
            format!("Warmup {}/{WARMUP_TRIALS}", g.warmup_completed + 1)
        } else {
            format!("Scored {}/{SCORED_TRIALS}", g.scored_completed + 1)
        };
        self.emit(
            EventKind::TrialStart,
            format!("{phase}: Light {light}, sizes {} vs {}", trial.size_a, trial.size_b),
            false,
        );
        self.emit(EventKind::ChoiceMade, format!("Learner picks {picked}"), false);
        self.emit_outcome(correct, "CORRECT!", "WRONG!");

        self.state.learners.learn_choice(kind, &inputs, trial.correct());
        self.note_learning(format!("light {light}, {} was right", trial.correct()));

        self.state.gauntlet.record_outcome(correct);
        let g = self.state.gauntlet;
        self.state.history.push(
            g.trials_completed(),
            correct,
            format!("{phase}, light {light}, picked {picked}"),
        );
        debug!(
            puzzle = %kind,
            correct,
            warmup = g.warmup_completed,
            scored = g.scored_completed,
            score = g.correct,
            "gauntlet trial resolved"
        );

        if !g.is_complete() {
            return Ok(false);
        }
        self.state.puzzle_complete = true;
        info!(puzzle = %kind, correct = g.correct, percent = g.score_percent(), "gauntlet complete");
        self.emit(
            EventKind::PuzzleComplete,
            format!(
                "GAUNTLET COMPLETE! Score: {}/{SCORED_TRIALS} ({}%)",
                g.correct,
                g.score_percent()
            ),
            false,
        );
        Ok(true)
    }
}

