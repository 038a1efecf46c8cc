//! RPS 3D headless demo
//!
//! Plays a series of turns against the opponent with a simulated 60 Hz
//! frame clock and logs every event. Useful for checking turn flow and
//! scoring without a window.
//!
//! ```text
//! rps-core [--seed N] [--turns N] [--script rock,paper,...]
//! ```

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rps_core::{
    Choice, GameSession, SessionConfig, VERSION, REVEAL_DELAY,
    config::parse_seed,
    game::{MoveSource, RandomOpponent, ScriptedOpponent},
};

/// One frame at 60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);

/// Parsed command line.
struct DemoArgs {
    config: SessionConfig,
    turns: u32,
    script: Option<Vec<Choice>>,
}

fn parse_args() -> Result<DemoArgs> {
    let mut config = SessionConfig::from_env()?;
    let mut turns = 5;
    let mut script = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().with_context(|| format!("missing value for {arg}"));
        match arg.as_str() {
            "--seed" => config.seed = Some(parse_seed(&value()?)?),
            "--turns" => turns = value()?.parse().context("--turns expects a number")?,
            "--script" => {
                let choices = value()?
                    .split(',')
                    .map(|s| s.trim().parse::<Choice>())
                    .collect::<Result<Vec<_>, _>>()?;
                script = Some(choices);
            }
            other => bail!("unknown argument {other:?}"),
        }
    }

    Ok(DemoArgs { config, turns, script })
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("RPS 3D Core v{}", VERSION);
    info!("Reveal delay: {} ms", REVEAL_DELAY.as_millis());

    let args = parse_args()?;
    match args.script {
        Some(script) => {
            info!("Opponent script: {:?}", script);
            demo_session(GameSession::new(ScriptedOpponent::new(script)), args.turns)
        }
        None => {
            let session: GameSession<RandomOpponent> = GameSession::from_config(&args.config);
            demo_session(session, args.turns)
        }
    }
}

/// Play `turns` turns, cycling the user's gesture, then reset.
fn demo_session<M: MoveSource>(mut session: GameSession<M>, turns: u32) -> Result<()> {
    info!("=== Starting Demo Session ===");

    for t in 0..turns {
        let choice = Choice::ALL[t as usize % Choice::ALL.len()];

        if session.play(choice).is_none() {
            bail!("turn {} was refused", t + 1);
        }

        // Spam a second click mid-turn; it must be ignored
        session.advance(FRAME);
        session.play(Choice::Rock);

        while session.is_thinking() {
            session.advance(FRAME);
        }

        for event in session.drain_events() {
            info!("event {}", event.to_json());
        }
        info!("{}", session.scoreboard().message);
    }

    let state = session.state();
    info!("=== Final Score ===");
    info!("You {} - {} Opponent", state.user_score, state.comp_score);
    info!("State: {}", serde_json::to_string(state)?);

    session.reset();
    info!("After reset: {}", serde_json::to_string(session.state())?);
    Ok(())
}
