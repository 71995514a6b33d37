//! File logging for client sessions.
//!
//! Stdout carries the replay's network traffic, so log output goes to a
//! per-session file only.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/posefire/logs`
/// - Linux: `~/.cache/posefire/logs` (or `$XDG_CACHE_HOME/posefire/logs`)
/// - Windows: `%LOCALAPPDATA%\posefire\logs`
/// - Fallback: `/tmp/posefire/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "posefire")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/posefire"))
        .join("logs")
}

/// Session identifier derived from the wall clock.
pub fn generated_session_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{secs}")
}

/// Create (if needed) and return `<base>/<session_id>`.
pub fn session_log_dir(base: &Path, session_id: &str) -> Result<PathBuf> {
    let dir = base.join(session_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    Ok(dir)
}

/// Install the global subscriber writing to `<log_dir>/<session>/client.log`.
///
/// Returns the path of the log file.
pub fn setup_logging(log_dir: Option<&Path>, session_id: Option<&str>) -> Result<PathBuf> {
    let base = log_dir.map_or_else(default_log_dir, Path::to_path_buf);
    let session_id = session_id.map_or_else(generated_session_id, str::to_string);
    let session_dir = session_log_dir(&base, &session_id)?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    let log_file = session_dir.join("client.log");
    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", log_file.display());

    Ok(log_file)
}
