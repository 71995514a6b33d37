//! What a shot attempt produced, as seen by the caller.
use game_core::RegionHit;
use serde::{Deserialize, Serialize};

use crate::net::DamageEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "result")]
pub enum ShotReport {
    /// Weapon still reloading; nothing was estimated or sent.
    Dropped { remaining_ms: u64 },

    /// Shot consumed without a hit (no qualifying region, estimation failed,
    /// or no body found).
    Missed,

    /// Shot landed and `event` was handed to the network channel.
    Hit { hit: RegionHit, event: DamageEvent },

    /// Estimation finished after the match left the active phase.
    Discarded,
}

impl ShotReport {
    pub fn damage(&self) -> Option<u32> {
        match self {
            Self::Hit { hit, .. } => Some(hit.damage),
            _ => None,
        }
    }

    pub fn was_accepted(&self) -> bool {
        !matches!(self, Self::Dropped { .. })
    }
}
