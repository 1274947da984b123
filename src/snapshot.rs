use serde_json::{json, Value};

use crate::puzzle_engine::{
    gauntlet::{SCORED_TRIALS, WARMUP_TRIALS},
    models::Trial,
    puzzles::{ranking, size},
    validator::{MIN_TRIALS, REQUIRED_STREAK},
    GameState,
};

/// Light flags as the screens print them.
fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Build the per-puzzle trial block, with display names resolved.
fn trial_block(trial: &Trial) -> Value {
    match trial {
        Trial::Size(t) => json!({
            "type": "size",
            "option_a": { "size": t.size_a, "color": t.color_a, "color_name": size::color_name(t.color_a) },
            "option_b": { "size": t.size_b, "color": t.color_b, "color_name": size::color_name(t.color_b) },
            "correct": t.correct().to_string()
        }),
        Trial::Ranking(t) => json!({
            "type": "ranking",
            "option_a": {
                "color": ranking::color_name(t.color_a),
                "shape": ranking::shape_name(t.shape_a),
                "rank": ranking::rank(t.color_a, t.shape_a)
            },
            "option_b": {
                "color": ranking::color_name(t.color_b),
                "shape": ranking::shape_name(t.shape_b),
                "rank": ranking::rank(t.color_b, t.shape_b)
            },
            "correct": t.correct().to_string()
        }),
        Trial::Context(t) => json!({
            "type": "context",
            "light": on_off(t.light_on),
            "path": if t.choosing_right { "RIGHT" } else { "LEFT" },
            "safe": t.is_safe
        }),
        Trial::Sequence { last_action, pressed } => json!({
            "type": "sequence",
            "last_action": last_action,
            "pressed": pressed.to_string()
        }),
        Trial::Gated(t) => json!({
            "type": "gated",
            "light": on_off(t.light_on),
            "size_a": t.size_a,
            "size_b": t.size_b,
            "correct": t.correct().to_string()
        }),
    }
}

/// Progress block: validator streak for puzzles 1-4, gauntlet for puzzle 5.
fn progress_block(state: &GameState) -> Value {
    if state.current_puzzle.uses_gauntlet() {
        let g = &state.gauntlet;
        json!({
            "kind": "gauntlet",
            "phase": if g.in_warmup() { "warmup" } else { "scored" },
            "warmup_completed": g.warmup_completed,
            "warmup_total": WARMUP_TRIALS,
            "scored_completed": g.scored_completed,
            "scored_total": SCORED_TRIALS,
            "correct": g.correct,
            "score_percent": g.score_percent()
        })
    } else {
        let v = &state.validator;
        json!({
            "kind": "streak",
            "total_trials": v.total_trials,
            "min_trials": MIN_TRIALS,
            "streak": v.consecutive_successes,
            "required_streak": REQUIRED_STREAK,
            "failures": v.failures,
            "learned": v.has_learned()
        })
    }
}

/// Read-only JSON view of a run for renderers and pacing layers.
///
/// Nothing here feeds back into the engine.
pub fn game_snapshot(state: &GameState) -> Value {
    let puzzle = state.current_puzzle;
    let history: Vec<Value> = state
        .history
        .entries()
        .rev()
        .map(|e| json!({ "trial": e.trial, "correct": e.correct, "summary": e.summary }))
        .collect();

    json!({
        "puzzle": {
            "number": puzzle.number(),
            "name": puzzle.to_string(),
            "title": puzzle.title(),
            "rule": puzzle.rule()
        },
        "puzzle_complete": state.puzzle_complete,
        "demo_complete": state.demo_complete,
        "trials_run": state.trials_run,
        "progress": progress_block(state),
        "last_trial": state.last_trial.as_ref().map(trial_block),
        "history": history,
        "model_bytes": state.total_model_bytes(),
        "parameters": state.learners.total_parameters()
    })
}
