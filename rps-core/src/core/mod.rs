//! Core primitives.
//!
//! The rule engine and the random source. No game state lives here.

pub mod choice;
pub mod rng;

// Re-export core types
pub use choice::{Choice, ChoiceParseError, Outcome, determine_winner, emoji_for_name};
pub use rng::DeterministicRng;
