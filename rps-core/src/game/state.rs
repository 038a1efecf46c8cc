//! Game State
//!
//! The turn-active flag and both score counters.

use serde::{Serialize, Deserialize};

use crate::core::choice::Outcome;

/// Scores and turn lock for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// True while no turn is in flight
    pub active: bool,

    /// Turns won by the user
    pub user_score: u32,

    /// Turns won by the opponent
    pub comp_score: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            active: true,
            user_score: 0,
            comp_score: 0,
        }
    }
}

impl GameState {
    /// Create the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state for a new turn.
    ///
    /// Returns `false` and changes nothing if a turn is already in flight.
    pub fn start_turn(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }

    /// Unlock the state and credit the outcome.
    pub fn end_turn(&mut self, outcome: Outcome) {
        self.active = true;
        match outcome {
            Outcome::Win => self.user_score += 1,
            Outcome::Lose => self.comp_score += 1,
            Outcome::Draw => {}
        }
    }

    /// Restore the initial state regardless of the active flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
