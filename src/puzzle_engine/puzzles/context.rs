use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::helpers::{draw_flag, flag_value, scale_to_input};

/// A light and a path: the path is safe exactly when the two differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextTrial {
    pub light_on: bool,
    pub choosing_right: bool,
    pub is_safe: bool,
}

impl ContextTrial {
    /// Learner inputs: light, path.
    pub fn inputs(&self) -> [u8; 2] {
        [
            scale_to_input(flag_value(self.light_on)),
            scale_to_input(flag_value(self.choosing_right)),
        ]
    }
}

/// Every combination is valid, so there is no rejection loop.
pub fn generate<R: RngCore>(rng: &mut R) -> ContextTrial {
    let light_on = draw_flag(rng);
    let choosing_right = draw_flag(rng);
    ContextTrial { light_on, choosing_right, is_safe: light_on != choosing_right }
}
