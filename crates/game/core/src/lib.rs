//! Deterministic shot rules shared across clients.
//!
//! `game-core` defines the canonical hit-detection rules: keypoints produced by
//! pose estimation, the body regions they group into, weapon profiles, and the
//! cooldown gate that decides whether a shot may be taken at all. Everything
//! here is pure; the runtime owns time, I/O, and the network.
pub mod combat;
pub mod config;
pub mod cooldown;
pub mod pose;
pub mod weapon;

pub use combat::{
    HitOutcome, RegionHit, ShotAttempt, ZoneBands, collective_score, region_selection, resolve,
};
pub use config::{GameConfig, Viewport};
pub use cooldown::{CooldownGate, GateState, Millis, Reloading};
pub use pose::{BodyPart, BodyRegion, Keypoint, Point};
pub use weapon::{Arsenal, DefaultArsenal, RegionDamage, Weapon, WeaponProfile, WeaponTable};
