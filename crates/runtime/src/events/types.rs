//! Event types for different topics.

use game_core::{GateState, HitOutcome, Millis, Weapon};
use serde::{Deserialize, Serialize};

use crate::net::PlayerInfo;
use crate::roster::MatchPhase;

/// Events describing the life of individual shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShotEvent {
    /// The cooldown gate accepted a shot and estimation started.
    Accepted {
        shot_id: u64,
        weapon: Weapon,
        at: Millis,
    },

    /// A shot was attempted while reloading and dropped.
    Dropped { weapon: Weapon, remaining_ms: u64 },

    /// Estimation finished and the resolver produced an outcome.
    Resolved { shot_id: u64, outcome: HitOutcome },

    /// Estimation failed or found no body; the shot is spent.
    EstimationFailed { shot_id: u64, reason: String },

    /// Estimation finished after the match left the active phase.
    Discarded { shot_id: u64 },
}

/// Events describing match-level state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    RosterUpdated { players: Vec<PlayerInfo> },

    PhaseChanged { phase: MatchPhase },

    WeaponEquipped { weapon: Weapon, gate: GateState },
}
