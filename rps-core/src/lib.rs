//! # RPS 3D Core
//!
//! Game logic for a rock-paper-scissors game with a procedural 3D hand
//! presentation. Nothing here depends on a renderer; the Bevy client in
//! `rps-bevy` mirrors the stage and scoreboard this crate maintains.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RPS CORE                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Pure primitives                           │
//! │  ├── choice.rs   - Gestures, outcomes, rule engine           │
//! │  └── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── opponent.rs - Uniform random / scripted opponent        │
//! │  ├── state.rs    - Scores and turn lock                      │
//! │  ├── hand.rs     - Procedural hand model and poses           │
//! │  ├── stage.rs    - Attached hands and idle spin              │
//! │  ├── turn.rs     - Turn state machine with tokens            │
//! │  ├── session.rs  - Reveal scheduling and scoreboard text     │
//! │  └── events.rs   - Events for the presentation layer         │
//! │                                                              │
//! │  config.rs       - Session configuration                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Turn Flow
//!
//! `play` locks the state, draws the opponent, builds and poses both hands
//! and schedules the reveal. `advance` counts the delay down and resolves
//! the turn. `reset` cancels the pending reveal, so a late timer can never
//! touch a cleared game.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

use std::time::Duration;

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use config::SessionConfig;
pub use crate::core::choice::{Choice, Outcome, determine_winner};
pub use crate::core::rng::DeterministicRng;
pub use game::hand::{HandModel, HandPose, pose_for};
pub use game::session::{GameSession, Scoreboard};
pub use game::state::GameState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Delay between a turn starting and its result being revealed.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Idle spin speed about Z (radians per second), 0.003 rad per frame at 60 Hz.
pub const IDLE_SPIN_RATE: f32 = 0.18;
