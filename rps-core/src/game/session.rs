//! Game Session
//!
//! Ties the turn controller, the opponent, the stage and the scoreboard
//! text together, and owns the countdown to the pending reveal. The
//! presentation layer calls `play`, `reset` and `advance`, then mirrors
//! `stage()` and `scoreboard()` and reacts to `drain_events()`.

use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::REVEAL_DELAY;
use crate::config::SessionConfig;
use crate::core::choice::{Choice, Outcome};
use super::events::TurnEvent;
use super::hand::{HandBlueprint, HandError, HandModel, USER_HAND_COLOR, OPPONENT_HAND_COLOR};
use super::opponent::{MoveSource, RandomOpponent};
use super::stage::{Side, Stage};
use super::state::GameState;
use super::turn::{TurnController, TurnPhase, TurnResult, TurnStarted, TurnToken};

/// Message shown before the first turn and after a reset.
pub const PROMPT_MESSAGE: &str = "Choose your move!";

/// Message shown while the opponent is "thinking".
pub const PLAYING_MESSAGE: &str = "Playing...";

/// Text sinks the presentation layer displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    /// Message / result area
    pub message: String,
    /// Result styling on the message, if any
    pub result_class: Option<Outcome>,
    /// User score counter text
    pub user_score: String,
    /// Opponent score counter text
    pub comp_score: String,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            message: PROMPT_MESSAGE.to_string(),
            result_class: None,
            user_score: "0".to_string(),
            comp_score: "0".to_string(),
        }
    }
}

/// Reveal waiting on its delay.
#[derive(Clone, Copy, Debug)]
struct PendingReveal {
    token: TurnToken,
    remaining: Duration,
}

/// One game: scores, hands on stage, and the turn in flight.
pub struct GameSession<M: MoveSource = RandomOpponent> {
    controller: TurnController,
    opponent: M,
    stage: Stage,
    scoreboard: Scoreboard,
    pending: Option<PendingReveal>,
    blueprint: HandBlueprint,
    events: Vec<TurnEvent>,
}

impl GameSession<RandomOpponent> {
    /// Session with a random opponent, seeded per the config.
    pub fn from_config(config: &SessionConfig) -> Self {
        let opponent = match config.seed {
            Some(seed) => {
                info!("Opponent seeded with {}", seed);
                RandomOpponent::seeded(seed)
            }
            None => RandomOpponent::from_entropy(),
        };
        Self::new(opponent)
    }
}

impl<M: MoveSource> GameSession<M> {
    /// Session against the given opponent.
    pub fn new(opponent: M) -> Self {
        Self {
            controller: TurnController::new(),
            opponent,
            stage: Stage::new(),
            scoreboard: Scoreboard::default(),
            pending: None,
            blueprint: HandBlueprint::default(),
            events: Vec::new(),
        }
    }

    /// Replace the blueprint hands are built from.
    pub fn with_blueprint(mut self, blueprint: HandBlueprint) -> Self {
        self.blueprint = blueprint;
        self
    }

    /// Scores and active flag.
    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    /// Current turn phase.
    pub fn phase(&self) -> TurnPhase {
        self.controller.phase()
    }

    /// Check if a turn is waiting for its reveal.
    pub fn is_thinking(&self) -> bool {
        self.controller.is_thinking()
    }

    /// Hands on screen.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Current display text.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Time left until the pending reveal.
    pub fn reveal_remaining(&self) -> Option<Duration> {
        self.pending.map(|p| p.remaining)
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<TurnEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a turn with the user's gesture.
    ///
    /// Ignored (returns `None`) while a turn is in flight.
    pub fn play(&mut self, choice: Choice) -> Option<TurnStarted> {
        let started = match self.controller.begin(choice, &mut self.opponent) {
            Ok(started) => started,
            Err(e) => {
                debug!("Ignoring {}: {}", choice, e);
                return None;
            }
        };

        self.scoreboard.message = PLAYING_MESSAGE.to_string();
        self.scoreboard.result_class = None;
        self.events.push(TurnEvent::TurnStarted(started));

        self.display_hands(started.user, started.comp);

        self.pending = Some(PendingReveal {
            token: started.token,
            remaining: REVEAL_DELAY,
        });

        Some(started)
    }

    /// Advance the clock by one frame.
    ///
    /// Counts the pending reveal down and fires it when due, then runs the
    /// idle spin if no turn is in flight.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TurnResult> {
        let result = self.tick_reveal(elapsed);
        self.stage.idle_step(elapsed.as_secs_f32(), self.controller.state().active);
        result
    }

    fn tick_reveal(&mut self, elapsed: Duration) -> Option<TurnResult> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(elapsed);
        if !pending.remaining.is_zero() {
            return None;
        }

        let token = pending.token;
        self.pending = None;

        match self.controller.reveal(token) {
            Ok(result) => {
                self.show_result(&result);
                self.events.push(TurnEvent::TurnRevealed(result));
                Some(result)
            }
            Err(e) => {
                debug!("Dropped reveal: {}", e);
                None
            }
        }
    }

    /// Clear scores, hands and text, and cancel any pending reveal.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            info!("Cancelled pending reveal for turn {}", pending.token);
        }
        self.controller.reset();
        self.detach_hands();
        self.scoreboard = Scoreboard::default();
        self.events.push(TurnEvent::SessionReset);
    }

    /// Show an error in place of the normal turn text.
    pub fn report_error(&mut self, err: &dyn fmt::Display) {
        let message = format!("Error: {err}");
        self.scoreboard.message = message.clone();
        self.events.push(TurnEvent::HandError { message });
    }

    /// Detach both hands, returning whether any were on stage.
    fn detach_hands(&mut self) -> bool {
        Side::BOTH
            .into_iter()
            .fold(false, |any, side| self.stage.detach_hand(side).is_some() || any)
    }

    fn display_hands(&mut self, user: Choice, comp: Choice) {
        if self.detach_hands() {
            self.events.push(TurnEvent::HandsDetached);
        }

        match self.build_posed_pair(user, comp) {
            Ok((user_hand, comp_hand)) => {
                self.stage.attach_hand(user_hand, Side::User);
                self.stage.attach_hand(comp_hand, Side::Opponent);
                self.events.push(TurnEvent::HandAttached { side: Side::User });
                self.events.push(TurnEvent::HandAttached { side: Side::Opponent });
                debug!("Hands created for {} vs {}", user, comp);
            }
            Err(e) => {
                error!("Error displaying hand gestures: {}", e);
                self.report_error(&e);
            }
        }
    }

    fn build_posed_pair(&self, user: Choice, comp: Choice) -> Result<(HandModel, HandModel), HandError> {
        let mut user_hand = self.blueprint.build(USER_HAND_COLOR)?;
        let mut comp_hand = self.blueprint.build(OPPONENT_HAND_COLOR)?;
        user_hand.apply_pose(user);
        comp_hand.apply_pose(comp);
        Ok((user_hand, comp_hand))
    }

    fn show_result(&mut self, result: &TurnResult) {
        let state = self.controller.state();
        self.scoreboard.message = result.message();
        self.scoreboard.result_class = Some(result.outcome);
        self.scoreboard.user_score = state.user_score.to_string();
        self.scoreboard.comp_score = state.comp_score.to_string();
    }
}
