//! Game module - drives the core session from Bevy
//!
//! Input systems turn clicks into `PlayChoice` / `ResetGame`, the session
//! advances by the frame delta, and whatever the session emitted is
//! re-sent as `SessionEvent` for the scene and UI.

use bevy::prelude::*;
use rps_core::{Choice, GameSession, SessionConfig};
use rps_core::game::TurnEvent;

// ============================================================================
// GAME PLUGIN
// ============================================================================

/// Ordering of the per-frame game systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Buttons and keys produce requests
    Input,
    /// Requests applied, clock advanced, events forwarded
    Session,
    /// Scene and UI mirror the session
    Present,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .insert_resource(Session::from_env())

            // Events
            .add_event::<PlayChoice>()
            .add_event::<ResetGame>()
            .add_event::<SessionEvent>()

            .configure_sets(Update, (GameSet::Input, GameSet::Session, GameSet::Present).chain())
            .add_systems(Update, (
                handle_reset_requests,
                handle_play_requests,
                advance_session,
                forward_session_events,
            ).chain().in_set(GameSet::Session));
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// The one game session, owned by the app.
#[derive(Resource, Deref, DerefMut)]
pub struct Session(pub GameSession);

impl Session {
    /// Session seeded from `RPS_SEED` if set, else from entropy.
    fn from_env() -> Self {
        let config = SessionConfig::from_env().unwrap_or_else(|e| {
            warn!("{}; using a random seed", e);
            SessionConfig::default()
        });
        Self(GameSession::from_config(&config))
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// User picked a gesture.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayChoice(pub Choice);

/// User asked for a fresh game.
#[derive(Event, Debug, Clone, Copy)]
pub struct ResetGame;

/// Something the session did this frame.
#[derive(Event, Debug, Clone, Deref)]
pub struct SessionEvent(pub TurnEvent);

// ============================================================================
// SYSTEMS
// ============================================================================

fn handle_reset_requests(
    mut requests: EventReader<ResetGame>,
    mut session: ResMut<Session>,
) {
    if requests.read().count() > 0 {
        info!("Reset requested");
        session.reset();
    }
}

fn handle_play_requests(
    mut requests: EventReader<PlayChoice>,
    mut session: ResMut<Session>,
) {
    for PlayChoice(choice) in requests.read() {
        info!("{} chosen", choice);
        // Ignored by the session while a turn is in flight
        session.play(*choice);
    }
}

fn advance_session(
    time: Res<Time>,
    mut session: ResMut<Session>,
) {
    if let Some(result) = session.advance(time.delta()) {
        info!("Result: {:?}", result.outcome);
    }
}

pub(crate) fn forward_session_events(
    mut session: ResMut<Session>,
    mut events: EventWriter<SessionEvent>,
) {
    for event in session.drain_events() {
        debug!("session event {}", event.to_json());
        events.send(SessionEvent(event));
    }
}
