//! Hit resolution system.
//!
//! This module turns one frame of pose keypoints plus the fixed crosshair into
//! a damage value. All functions are deterministic and side-effect free; the
//! caller decides what to do with the outcome (emit it, play feedback).
//!
//! # Pipeline
//!
//! 1. **Selection**: per region, keep member keypoints scoring above
//!    [`GameConfig::MIN_KEYPOINT_SCORE`](crate::GameConfig::MIN_KEYPOINT_SCORE)
//! 2. **Aggregation**: collective score = mean of the selection
//! 3. **Geometry**: a selected keypoint must sit inside the weapon radius and
//!    inside its region's vertical zone band
//! 4. **Arbitration**: highest collective score wins, ties go to the region
//!    evaluated first (Head, Torso, LowerBody)
//! 5. **Damage**: looked up in the firing weapon's profile

pub mod region;
pub mod resolve;
pub mod result;

pub use region::{RegionSelection, ZoneBands, collective_score, region_selection};
pub use resolve::resolve;
pub use result::{HitOutcome, RegionHit, ShotAttempt};
