//! Posefire client binary.
//!
//! Plays a replay script against a match session and prints every message
//! the session sends to the game server as a JSON line on stdout.
//!
//! ```bash
//! posefire match.json
//! POSEFIRE_REPLAY=match.json POSEFIRE_WEAPON=sniper posefire
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use posefire_client::{ClientConfig, ReplayScript, logging, replay};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let log_file = logging::setup_logging(config.log_dir.as_deref(), config.session_id.as_deref())?;

    let replay_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.replay.clone())
        .context("Usage: posefire <replay.json> (or set POSEFIRE_REPLAY)")?;

    tracing::info!("Starting posefire client");
    tracing::info!("Shooter: {}", config.runtime.shooter_id);
    tracing::info!("Replay: {}", replay_path.display());

    let script = ReplayScript::from_path(&replay_path)?;
    let outcome = replay::run(&script, config.runtime, true).await?;

    let summary = serde_json::to_string(&outcome.summary)?;
    eprintln!("summary: {summary}");
    eprintln!("log: {}", log_file.display());

    tracing::info!("Client shutdown complete");
    Ok(())
}
