//! Gesture Rule Engine
//!
//! The three gestures, the outcome of comparing two of them, and the
//! fixed cyclic dominance rule: rock > scissors > paper > rock.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use thiserror::Error;

// =============================================================================
// CHOICE
// =============================================================================

/// A player's selected gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Choice {
    /// Closed fist
    Rock = 0,
    /// Open hand
    Paper = 1,
    /// Index and middle finger extended
    Scissors = 2,
}

impl Choice {
    /// All gestures in canonical order.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The gesture this one defeats.
    #[inline]
    pub fn defeats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Scissors => Choice::Paper,
            Choice::Paper => Choice::Rock,
        }
    }

    /// Check if this gesture beats another.
    #[inline]
    pub fn beats(self, other: Choice) -> bool {
        self.defeats() == other
    }

    /// Lowercase name, as used by the buttons and logs.
    pub fn name(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    /// Display symbol for this gesture.
    pub fn emoji(self) -> &'static str {
        match self {
            Choice::Rock => "✊",
            Choice::Paper => "✋",
            Choice::Scissors => "✌️",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gesture name not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gesture: {0:?}")]
pub struct ChoiceParseError(pub String);

impl FromStr for Choice {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            other => Err(ChoiceParseError(other.to_string())),
        }
    }
}

/// Emoji for a gesture name; unknown names are echoed back unchanged.
pub fn emoji_for_name(name: &str) -> String {
    match name.parse::<Choice>() {
        Ok(choice) => choice.emoji().to_string(),
        Err(_) => name.to_string(),
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of a turn from the user's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// User's gesture beat the opponent's
    Win,
    /// Opponent's gesture beat the user's
    Lose,
    /// Same gesture on both sides
    Draw,
}

impl Outcome {
    /// Style class toggled on the message element.
    pub fn css_class(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        }
    }
}

/// Resolve a turn.
#[inline]
pub fn determine_winner(user: Choice, comp: Choice) -> Outcome {
    if user == comp {
        Outcome::Draw
    } else if user.beats(comp) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

// =============================================================================
// TESTS
// =============================================================================
