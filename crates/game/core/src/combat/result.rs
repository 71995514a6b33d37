//! Shot attempts and their outcomes.

use crate::config::Viewport;
use crate::pose::{BodyRegion, Keypoint};
use crate::weapon::WeaponProfile;

use super::resolve::resolve;

/// Region that absorbed a shot and the damage it takes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RegionHit {
    pub region: BodyRegion,
    pub damage: u32,
    /// Collective score of the winning region.
    pub collective_score: f32,
}

/// Result of resolving one shot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", tag = "kind"))]
pub enum HitOutcome {
    NoHit,
    Hit(RegionHit),
}

impl HitOutcome {
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Damage to report, if any.
    pub const fn damage(&self) -> Option<u32> {
        match self {
            Self::Hit(hit) => Some(hit.damage),
            Self::NoHit => None,
        }
    }

    pub const fn region(&self) -> Option<BodyRegion> {
        match self {
            Self::Hit(hit) => Some(hit.region),
            Self::NoHit => None,
        }
    }
}

/// One frame's keypoints paired with the weapon profile captured when the
/// shot was accepted. Consumed once by [`ShotAttempt::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShotAttempt {
    pub profile: WeaponProfile,
    pub keypoints: Vec<Keypoint>,
    pub viewport: Viewport,
}

impl ShotAttempt {
    pub fn new(profile: WeaponProfile, keypoints: Vec<Keypoint>, viewport: Viewport) -> Self {
        Self {
            profile,
            keypoints,
            viewport,
        }
    }

    pub fn resolve(self) -> HitOutcome {
        resolve(&self.profile, &self.keypoints, &self.viewport)
    }
}
