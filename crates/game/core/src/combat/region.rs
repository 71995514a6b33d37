//! Region selection, collective scores and vertical zone bands.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::pose::{BodyPart, BodyRegion, Keypoint};

/// Keypoints of one region that survived the confidence filter.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSelection {
    pub region: BodyRegion,
    pub keypoints: ArrayVec<Keypoint, { BodyRegion::MAX_MEMBERS }>,
    /// Mean score of `keypoints`, 0 when empty.
    pub score: f32,
}

impl RegionSelection {
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Whether the collective score clears the acceptance threshold.
    pub fn is_accepted(&self) -> bool {
        self.score > GameConfig::REGION_ACCEPTANCE
    }
}

/// Select the keypoints of `region` that count toward its collective score.
///
/// Only the first occurrence of each part label is considered; a duplicate
/// later in the list is ignored even when the first one was filtered out.
/// Scores at or below the minimum, or non-finite scores, never contribute.
pub fn region_selection(region: BodyRegion, keypoints: &[Keypoint]) -> RegionSelection {
    let mut seen: ArrayVec<BodyPart, { BodyRegion::MAX_MEMBERS }> = ArrayVec::new();
    let mut selected = ArrayVec::new();

    for keypoint in keypoints.iter().filter(|kp| region.contains(kp.part)) {
        if seen.contains(&keypoint.part) {
            continue;
        }
        seen.push(keypoint.part);

        if keypoint.score.is_finite() && keypoint.score > GameConfig::MIN_KEYPOINT_SCORE {
            selected.push(*keypoint);
        }
    }

    let score = mean_score(&selected);
    RegionSelection {
        region,
        keypoints: selected,
        score,
    }
}

/// Mean confidence of the region's qualifying keypoints.
pub fn collective_score(region: BodyRegion, keypoints: &[Keypoint]) -> f32 {
    region_selection(region, keypoints).score
}

fn mean_score(keypoints: &[Keypoint]) -> f32 {
    if keypoints.is_empty() {
        return 0.0;
    }
    let total: f32 = keypoints.iter().map(|kp| kp.score).sum();
    total / keypoints.len() as f32
}

/// Vertical bands assigning frame rows to regions.
///
/// ```text
/// 0 ─────────── head_max ─────────── torso_max ─────────── height
///     Head            Torso                 LowerBody
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneBands {
    pub head_max: f32,
    pub torso_max: f32,
}

impl ZoneBands {
    pub fn from_height(height: u32) -> Self {
        let height = height as f32;
        Self {
            head_max: height * GameConfig::HEAD_ZONE_RATIO,
            torso_max: height * GameConfig::TORSO_ZONE_RATIO,
        }
    }

    pub fn torso_min(&self) -> f32 {
        self.head_max
    }

    /// Whether row `y` lies in `region`'s band. NaN lies in no band.
    pub fn contains(&self, region: BodyRegion, y: f32) -> bool {
        match region {
            BodyRegion::Head => y < self.head_max,
            BodyRegion::Torso => y >= self.torso_min() && y < self.torso_max,
            BodyRegion::LowerBody => y >= self.torso_max,
        }
    }
}
