//! Session Events
//!
//! Emitted by the session for the presentation layer and for logs.

use serde::{Serialize, Deserialize};

use super::stage::Side;
use super::turn::{TurnResult, TurnStarted};

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// A turn began; the reveal is scheduled
    TurnStarted(TurnStarted),

    /// Hands were removed from the stage
    HandsDetached,

    /// A freshly built, posed hand was put on the stage
    HandAttached {
        /// Where it went
        side: Side,
    },

    /// Building a hand failed; the turn still resolves
    HandError {
        /// Error text as shown to the user
        message: String,
    },

    /// The pending turn was revealed
    TurnRevealed(TurnResult),

    /// Scores cleared, stage emptied, pending reveal cancelled
    SessionReset,
}

impl TurnEvent {
    /// Serialize to a single-line JSON record.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choice::{Choice, Outcome};
    use crate::game::turn::TurnToken;

    #[test]
    fn test_json_shape() {
        let event = TurnEvent::TurnRevealed(TurnResult {
            token: TurnToken(3),
            user: Choice::Rock,
            comp: Choice::Scissors,
            outcome: Outcome::Win,
        });

        let value: serde_json::Value = serde_json::from_str(&event.to_json()).unwrap();
        assert_eq!(value["type"], "turn_revealed");
        assert_eq!(value["user"], "rock");
        assert_eq!(value["comp"], "scissors");
        assert_eq!(value["outcome"], "win");
        assert_eq!(value["token"], 3);
    }

    #[test]
    fn test_unit_variant_json() {
        let value: serde_json::Value = serde_json::from_str(&TurnEvent::SessionReset.to_json()).unwrap();
        assert_eq!(value["type"], "session_reset");
    }
}
