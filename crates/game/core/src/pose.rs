//! Pose-estimation vocabulary: labeled keypoints and the regions they form.
//!
//! Keypoints arrive fresh from the pose source for every shot and are never
//! stored. Labels use the 17-point COCO layout, written in camelCase the way
//! the estimation model reports them.

/// Point in frame pixel space (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Anatomical landmark label.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// A labeled landmark with its position and model confidence.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keypoint {
    pub part: BodyPart,
    pub position: Point,
    /// Model confidence in [0, 1].
    pub score: f32,
}

impl Keypoint {
    pub const fn new(part: BodyPart, position: Point, score: f32) -> Self {
        Self {
            part,
            position,
            score,
        }
    }
}

/// Grouping of keypoints used for aggregate scoring.
///
/// Torso and LowerBody both claim the hip labels, so one hip keypoint can
/// qualify two regions with different collective scores.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum BodyRegion {
    Head,
    Torso,
    LowerBody,
}

impl BodyRegion {
    /// Regions in tie-break priority order.
    pub const PRIORITY: [BodyRegion; 3] = [BodyRegion::Head, BodyRegion::Torso, BodyRegion::LowerBody];

    /// Largest membership set across regions.
    pub const MAX_MEMBERS: usize = 5;

    pub const fn members(&self) -> &'static [BodyPart] {
        match self {
            Self::Head => &[
                BodyPart::Nose,
                BodyPart::LeftEye,
                BodyPart::RightEye,
                BodyPart::LeftEar,
                BodyPart::RightEar,
            ],
            Self::Torso => &[
                BodyPart::LeftShoulder,
                BodyPart::RightShoulder,
                BodyPart::LeftHip,
                BodyPart::RightHip,
            ],
            Self::LowerBody => &[BodyPart::LeftHip, BodyPart::RightHip],
        }
    }

    pub fn contains(&self, part: BodyPart) -> bool {
        self.members().contains(&part)
    }
}
