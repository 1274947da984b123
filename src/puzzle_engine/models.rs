use std::fmt;
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::{
    error::PuzzleError,
    puzzles::{context::ContextTrial, gated::GatedTrial, ranking::RankingTrial, size::SizeTrial},
};

// ---------------------------------------------------------------------------
// Puzzle identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleKind {
    SizeComparison,
    Ranking,
    Context,
    Sequence,
    GatedComparison,
}

impl PuzzleKind {
    /// All five puzzles in play order.
    pub const ALL: [PuzzleKind; 5] = [
        PuzzleKind::SizeComparison,
        PuzzleKind::Ranking,
        PuzzleKind::Context,
        PuzzleKind::Sequence,
        PuzzleKind::GatedComparison,
    ];

    /// Zero-based position in [`PuzzleKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PuzzleKind::SizeComparison  => 0,
            PuzzleKind::Ranking         => 1,
            PuzzleKind::Context         => 2,
            PuzzleKind::Sequence        => 3,
            PuzzleKind::GatedComparison => 4,
        }
    }

    /// One-based puzzle number as shown to the viewer.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The puzzle after this one, or `None` after the last.
    pub fn next(self) -> Option<PuzzleKind> {
        PuzzleKind::ALL.get(self.index() + 1).copied()
    }

    /// Only the last puzzle is scored by the gauntlet instead of the validator.
    pub fn uses_gauntlet(self) -> bool {
        self == PuzzleKind::GatedComparison
    }

    /// Short screen title.
    pub fn title(self) -> &'static str {
        match self {
            PuzzleKind::SizeComparison  => "SIZE",
            PuzzleKind::Ranking         => "EXCEPTIONS",
            PuzzleKind::Context         => "CONTEXT",
            PuzzleKind::Sequence        => "SEQUENCE",
            PuzzleKind::GatedComparison => "GAUNTLET",
        }
    }

    /// The hidden rule the learner is expected to discover.
    pub fn rule(self) -> &'static str {
        match self {
            PuzzleKind::SizeComparison  => "Bigger is safe. Ignore color.",
            PuzzleKind::Ranking         => "Circle safe. Blue square best.",
            PuzzleKind::Context         => "Light ON flips the safe path.",
            PuzzleKind::Sequence        => "Press A, then B.",
            PuzzleKind::GatedComparison => "Light ON: bigger. Light OFF: smaller.",
        }
    }

    /// Input and output widths the learner for this puzzle must declare.
    pub fn learner_widths(self) -> (usize, usize) {
        match self {
            PuzzleKind::SizeComparison  => (4, 1),
            PuzzleKind::Ranking         => (4, 1),
            PuzzleKind::Context         => (2, 1),
            PuzzleKind::Sequence        => (1, 2),
            PuzzleKind::GatedComparison => (3, 1),
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PuzzleKind::SizeComparison  => "Size Comparison",
            PuzzleKind::Ranking         => "Shape & Color Ranking",
            PuzzleKind::Context         => "Context XOR",
            PuzzleKind::Sequence        => "Sequence Order",
            PuzzleKind::GatedComparison => "Light-Gated Comparison",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

/// Which of the two presented options was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub fn from_is_a(is_a: bool) -> Self {
        if is_a { Choice::A } else { Choice::B }
    }

    pub fn is_a(self) -> bool {
        self == Choice::A
    }

    pub fn side(self) -> &'static str {
        match self {
            Choice::A => "left",
            Choice::B => "right",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::A => write!(f, "A"),
            Choice::B => write!(f, "B"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trials
// ---------------------------------------------------------------------------

/// The most recent generated trial, kept on the game state for display.
///
/// The sequence puzzle has no generated value; its variant records the button
/// that was pressed and the automaton input the learner saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trial {
    Size(SizeTrial),
    Ranking(RankingTrial),
    Context(ContextTrial),
    Sequence { last_action: i16, pressed: Choice },
    Gated(GatedTrial),
}

impl Trial {
    pub fn puzzle(&self) -> PuzzleKind {
        match self {
            Trial::Size(_)          => PuzzleKind::SizeComparison,
            Trial::Ranking(_)       => PuzzleKind::Ranking,
            Trial::Context(_)       => PuzzleKind::Context,
            Trial::Sequence { .. }  => PuzzleKind::Sequence,
            Trial::Gated(_)         => PuzzleKind::GatedComparison,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    TrialStart,
    ChoiceMade,
    Outcome,
    LearningNote,
    PuzzleComplete,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::TrialStart     => "trial-start",
            EventKind::ChoiceMade     => "choice-made",
            EventKind::Outcome        => "outcome",
            EventKind::LearningNote   => "learning-note",
            EventKind::PuzzleComplete => "puzzle-complete",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub message: String,
    /// Only meaningful for [`EventKind::Outcome`]; `false` elsewhere.
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rng_seed: Option<u32>,
    pub learner_seed: Option<u32>,
    pub max_trials_per_puzzle: usize,
    pub history_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rng_seed: None,
            learner_seed: None,
            max_trials_per_puzzle: 1000,
            history_len: 4,
        }
    }
}

impl GameConfig {
    /// Deterministic config: everything default except the trial seed.
    pub fn new(seed: u32) -> Self {
        GameConfig { rng_seed: Some(seed), ..GameConfig::default() }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, PuzzleError> {
        let config: GameConfig =
            serde_json::from_str(raw).map_err(|e| PuzzleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.max_trials_per_puzzle == 0 {
            return Err(PuzzleError::Config("max_trials_per_puzzle must be at least 1".into()));
        }
        if self.history_len == 0 {
            return Err(PuzzleError::Config("history_len must be at least 1".into()));
        }
        Ok(())
    }

    /// The seed the trial RNG starts from: explicit seed, else entropy.
    pub fn resolved_seed(&self) -> u32 {
        self.rng_seed.unwrap_or_else(rand::random)
    }
}
