//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::{GameConfig, Viewport, Weapon};
use runtime::RuntimeConfig;

/// Configuration required to bootstrap a session and its surroundings.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Replay script to run when none is given on the command line.
    pub replay: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `POSEFIRE_SHOOTER_ID` - Identifier stamped on damage events
    /// - `POSEFIRE_VIEWPORT_WIDTH` / `POSEFIRE_VIEWPORT_HEIGHT` - Hit-detection frame (default: 640x480)
    /// - `POSEFIRE_FLIP_HORIZONTAL` - Mirror frames before estimation (default: false)
    /// - `POSEFIRE_WEAPON` - Weapon equipped on entry (default: pistol)
    /// - `POSEFIRE_SNIPER_RADIUS` / `POSEFIRE_PISTOL_RADIUS` / `POSEFIRE_SHOTGUN_RADIUS` - Radius overrides in pixels
    /// - `POSEFIRE_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `POSEFIRE_COMMAND_BUFFER` - Session command queue size (default: 32)
    /// - `POSEFIRE_REPLAY` - Replay script path
    /// - `POSEFIRE_LOG_DIR` - Log directory (default: platform-specific)
    /// - `POSEFIRE_SESSION_ID` - Session identifier for log files (default: auto-generated)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let runtime = &mut config.runtime;

        if let Some(id) = lookup("POSEFIRE_SHOOTER_ID").filter(|id| !id.is_empty()) {
            runtime.shooter_id = id;
        }

        if let (Some(width), Some(height)) = (
            read_env::<u32>(&lookup, "POSEFIRE_VIEWPORT_WIDTH"),
            read_env::<u32>(&lookup, "POSEFIRE_VIEWPORT_HEIGHT"),
        ) && width > 0
            && height > 0
        {
            runtime.game = GameConfig::with_viewport(Viewport::new(width, height));
        }

        if let Some(flip) = read_env::<bool>(&lookup, "POSEFIRE_FLIP_HORIZONTAL") {
            runtime.flip_horizontal = flip;
        }

        if let Some(weapon) = read_env::<Weapon>(&lookup, "POSEFIRE_WEAPON") {
            runtime.initial_weapon = weapon;
        }

        for weapon in [Weapon::Sniper, Weapon::Pistol, Weapon::Shotgun] {
            let key = format!("POSEFIRE_{}_RADIUS", weapon.as_ref().to_ascii_uppercase());
            if let Some(radius) = read_env::<f32>(&lookup, &key)
                && radius.is_finite()
                && radius > 0.0
            {
                runtime.arsenal.set_radius(weapon, radius);
            }
        }

        if let Some(capacity) = read_env::<usize>(&lookup, "POSEFIRE_EVENT_BUFFER") {
            runtime.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>(&lookup, "POSEFIRE_COMMAND_BUFFER") {
            runtime.command_buffer_size = capacity.max(1);
        }

        config.replay = lookup("POSEFIRE_REPLAY").map(PathBuf::from);
        config.log_dir = lookup("POSEFIRE_LOG_DIR").map(PathBuf::from);
        config.session_id = lookup("POSEFIRE_SESSION_ID");

        config
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
