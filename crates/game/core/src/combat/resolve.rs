//! Hit resolution for a single frame.

use crate::config::Viewport;
use crate::pose::{BodyRegion, Keypoint};
use crate::weapon::WeaponProfile;

use super::region::{ZoneBands, region_selection};
use super::result::{HitOutcome, RegionHit};

/// Resolve a shot fired with `profile` against one frame of keypoints.
///
/// # Rules
///
/// ```text
/// candidate(region) = score(region) > 0.5
///                     and ∃ selected kp: |kp - crosshair| < radius
///                                        and kp.y in zone(region)
/// winner = max score(region) over candidates, earlier region on ties
/// damage = profile.damage[winner]
/// ```
///
/// The crosshair is the center of `viewport`; zone bands come from its
/// height. There is no way to aim off-center: callers pass the viewport,
/// never a crosshair point.
///
/// Regions are visited in [`BodyRegion::PRIORITY`] order and a later
/// region replaces the current best only with a strictly greater score.
///
/// Empty or malformed keypoints (non-finite coordinates or scores) resolve
/// to [`HitOutcome::NoHit`].
pub fn resolve(profile: &WeaponProfile, keypoints: &[Keypoint], viewport: &Viewport) -> HitOutcome {
    let crosshair = viewport.center();
    let zones = ZoneBands::from_height(viewport.height);

    let mut best: Option<(BodyRegion, f32)> = None;

    for region in BodyRegion::PRIORITY {
        let selection = region_selection(region, keypoints);
        if !selection.is_accepted() {
            continue;
        }

        // Every keypoint of a region compares with the same aggregate score,
        // so one in-reach keypoint is enough.
        let in_reach = selection.keypoints.iter().any(|kp| {
            kp.position.is_finite()
                && kp.position.distance(crosshair) < profile.radius
                && zones.contains(region, kp.position.y)
        });
        if !in_reach {
            continue;
        }

        if best.is_none_or(|(_, best_score)| selection.score > best_score) {
            best = Some((region, selection.score));
        }
    }

    match best {
        Some((region, collective_score)) => HitOutcome::Hit(RegionHit {
            region,
            damage: profile.damage.for_region(region),
            collective_score,
        }),
        None => HitOutcome::NoHit,
    }
}
