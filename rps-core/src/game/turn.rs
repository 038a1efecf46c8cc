//! Turn Controller
//!
//! One turn runs `Idle -> Thinking -> Showing`. The opponent is drawn when
//! the turn begins; the outcome is only computed when the reveal arrives.
//! Every turn gets a token, and a reveal carrying any token other than the
//! in-flight one is discarded, so a reset can never be undone by a late reveal.

use std::fmt;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::choice::{Choice, Outcome, determine_winner};
use super::opponent::{MoveSource, choose_opponent_move};
use super::state::GameState;

/// Identifier of one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnToken(pub u64);

impl fmt::Display for TurnToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A turn that has just begun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStarted {
    /// Token the reveal must carry
    pub token: TurnToken,
    /// User's gesture
    pub user: Choice,
    /// Opponent's gesture
    pub comp: Choice,
}

/// A revealed turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Token of the revealed turn
    pub token: TurnToken,
    /// User's gesture
    pub user: Choice,
    /// Opponent's gesture
    pub comp: Choice,
    /// Result for the user
    pub outcome: Outcome,
}

impl TurnResult {
    /// Text shown in the message area.
    pub fn message(&self) -> String {
        match self.outcome {
            Outcome::Win => format!("🎉 You Win! {} beats {}", self.user.emoji(), self.comp.emoji()),
            Outcome::Lose => format!("😢 You Lose! {} beats {}", self.comp.emoji(), self.user.emoji()),
            Outcome::Draw => format!("🤝 It's a Draw! Both chose {}", self.user.emoji()),
        }
    }

    /// Same text with gesture names and no emoji, for fonts without them.
    pub fn plain_message(&self) -> String {
        match self.outcome {
            Outcome::Win => format!("You Win! {} beats {}", self.user, self.comp),
            Outcome::Lose => format!("You Lose! {} beats {}", self.comp, self.user),
            Outcome::Draw => format!("It's a Draw! Both chose {}", self.user),
        }
    }
}

/// Where the controller is in the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No turn played yet, or just reset
    Idle,
    /// Turn in flight, waiting for the reveal
    Thinking {
        /// In-flight token
        token: TurnToken,
        /// User's gesture
        user: Choice,
        /// Opponent's gesture
        comp: Choice,
    },
    /// Last turn revealed, ready for the next
    Showing(TurnResult),
}

/// Turn request that was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    /// A turn is already waiting for its reveal
    #[error("turn already in progress")]
    TurnInProgress,

    /// The reveal does not belong to the in-flight turn
    #[error("stale reveal for turn {token}")]
    StaleToken {
        /// Token carried by the reveal
        token: TurnToken,
    },
}

/// Owns the game state and sequences turns.
#[derive(Clone, Debug)]
pub struct TurnController {
    state: GameState,
    phase: TurnPhase,
    next_token: u64,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnController {
    /// Fresh controller with zeroed scores.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            phase: TurnPhase::Idle,
            next_token: 1,
        }
    }

    /// Current scores and active flag.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Check if a turn is waiting for its reveal.
    pub fn is_thinking(&self) -> bool {
        matches!(self.phase, TurnPhase::Thinking { .. })
    }

    /// Token of the in-flight turn, if any.
    pub fn pending_token(&self) -> Option<TurnToken> {
        match self.phase {
            TurnPhase::Thinking { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Begin a turn with the user's gesture.
    pub fn begin<M: MoveSource + ?Sized>(
        &mut self,
        user: Choice,
        opponent: &mut M,
    ) -> Result<TurnStarted, TurnError> {
        if self.is_thinking() || !self.state.start_turn() {
            debug!("Turn in progress, ignoring {}", user);
            return Err(TurnError::TurnInProgress);
        }

        let token = TurnToken(self.next_token);
        self.next_token += 1;

        let comp = choose_opponent_move(opponent);
        self.phase = TurnPhase::Thinking { token, user, comp };

        info!("Turn {} started: {} vs {}", token, user, comp);
        Ok(TurnStarted { token, user, comp })
    }

    /// Reveal the in-flight turn.
    pub fn reveal(&mut self, token: TurnToken) -> Result<TurnResult, TurnError> {
        let TurnPhase::Thinking { token: current, user, comp } = self.phase else {
            warn!("Reveal {} arrived with no turn in flight", token);
            return Err(TurnError::StaleToken { token });
        };
        if current != token {
            warn!("Reveal {} does not match in-flight turn {}", token, current);
            return Err(TurnError::StaleToken { token });
        }

        let outcome = determine_winner(user, comp);
        self.state.end_turn(outcome);

        let result = TurnResult { token, user, comp, outcome };
        self.phase = TurnPhase::Showing(result);

        info!(
            "Turn {} result: {:?} (user {} - opponent {})",
            token, outcome, self.state.user_score, self.state.comp_score
        );
        Ok(result)
    }

    /// Back to a fresh game. Any in-flight token is retired.
    pub fn reset(&mut self) {
        if let Some(token) = self.pending_token() {
            info!("Reset retired turn {}", token);
        }
        self.state.reset();
        self.phase = TurnPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::opponent::ScriptedOpponent;

    #[test]
    fn test_full_turn() {
        let mut controller = TurnController::new();
        let mut opponent = ScriptedOpponent::always(Choice::Scissors);

        let started = controller.begin(Choice::Rock, &mut opponent).unwrap();
        assert_eq!(started.comp, Choice::Scissors);
        assert!(controller.is_thinking());
        assert!(!controller.state().active);

        let result = controller.reveal(started.token).unwrap();
        assert_eq!(result.outcome, Outcome::Win);
        assert!(controller.state().active);
        assert_eq!(controller.state().user_score, 1);
        assert_eq!(controller.state().comp_score, 0);
        assert_eq!(controller.phase(), TurnPhase::Showing(result));
    }

    #[test]
    fn test_reentrancy_guard() {
        let mut controller = TurnController::new();
        let mut opponent = ScriptedOpponent::new(vec![Choice::Paper, Choice::Rock]);

        let started = controller.begin(Choice::Rock, &mut opponent).unwrap();
        let phase_before = controller.phase();

        assert_eq!(
            controller.begin(Choice::Scissors, &mut opponent),
            Err(TurnError::TurnInProgress)
        );
        assert_eq!(controller.phase(), phase_before);

        // Guard must not consume an opponent move
        let result = controller.reveal(started.token).unwrap();
        assert_eq!(result.comp, Choice::Paper);
        let next = controller.begin(Choice::Rock, &mut opponent).unwrap();
        assert_eq!(next.comp, Choice::Rock);
    }

    #[test]
    fn test_stale_reveal_after_reset() {
        let mut controller = TurnController::new();
        let mut opponent = ScriptedOpponent::always(Choice::Paper);

        let stale = controller.begin(Choice::Rock, &mut opponent).unwrap();
        controller.reset();

        assert_eq!(
            controller.reveal(stale.token),
            Err(TurnError::StaleToken { token: stale.token })
        );
        assert_eq!(controller.state(), &GameState::default());
        assert_eq!(controller.phase(), TurnPhase::Idle);

        // A new turn after reset gets a new token, and the old one stays dead
        let fresh = controller.begin(Choice::Rock, &mut opponent).unwrap();
        assert_ne!(fresh.token, stale.token);
        assert!(controller.reveal(stale.token).is_err());
        assert_eq!(controller.reveal(fresh.token).unwrap().outcome, Outcome::Lose);
    }

    #[test]
    fn test_double_reveal_rejected() {
        let mut controller = TurnController::new();
        let mut opponent = ScriptedOpponent::always(Choice::Rock);

        let started = controller.begin(Choice::Paper, &mut opponent).unwrap();
        controller.reveal(started.token).unwrap();
        assert!(controller.reveal(started.token).is_err());
        assert_eq!(controller.state().user_score, 1);
    }

    #[test]
    fn test_messages() {
        let token = TurnToken(1);
        let win = TurnResult { token, user: Choice::Rock, comp: Choice::Scissors, outcome: Outcome::Win };
        let lose = TurnResult { token, user: Choice::Paper, comp: Choice::Scissors, outcome: Outcome::Lose };
        let draw = TurnResult { token, user: Choice::Paper, comp: Choice::Paper, outcome: Outcome::Draw };

        assert_eq!(win.message(), "🎉 You Win! ✊ beats ✌️");
        assert_eq!(lose.message(), "😢 You Lose! ✌️ beats ✋");
        assert_eq!(draw.message(), "🤝 It's a Draw! Both chose ✋");

        assert_eq!(win.plain_message(), "You Win! rock beats scissors");
        assert_eq!(lose.plain_message(), "You Lose! scissors beats paper");
        assert_eq!(draw.plain_message(), "It's a Draw! Both chose paper");
        for result in [win, lose, draw] {
            assert!(result.plain_message().is_ascii());
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut controller = TurnController::new();
        let mut opponent = ScriptedOpponent::always(Choice::Rock);
        controller.begin(Choice::Paper, &mut opponent).unwrap();

        controller.reset();
        let phase = controller.phase();
        let state = controller.state().clone();
        controller.reset();

        assert_eq!(controller.phase(), phase);
        assert_eq!(controller.state(), &state);
    }
}
