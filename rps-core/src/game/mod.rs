//! Game Logic Module
//!
//! ## Module Structure
//!
//! - `opponent`: Opponent move sources
//! - `state`: Scores and the turn lock
//! - `hand`: Procedural hand model and gesture poses
//! - `stage`: Hands on screen, placements, idle spin
//! - `turn`: Turn state machine
//! - `session`: Reveal scheduling and scoreboard
//! - `events`: Events for the presentation layer

pub mod opponent;
pub mod state;
pub mod hand;
pub mod stage;
pub mod turn;
pub mod session;
pub mod events;

// Re-export key types
pub use opponent::{MoveSource, RandomOpponent, ScriptedOpponent, choose_opponent_move};
pub use state::GameState;
pub use hand::{HandModel, HandBlueprint, HandColor, HandError, HandPose, pose_for};
pub use stage::{Side, Stage, Placement};
pub use turn::{TurnController, TurnPhase, TurnResult, TurnStarted, TurnToken, TurnError};
pub use session::{GameSession, Scoreboard};
pub use events::TurnEvent;
