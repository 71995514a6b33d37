use crate::pose::Point;

/// Balance constants for hit resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Hit-detection viewport. The crosshair sits at its center.
    pub viewport: Viewport,
}

impl GameConfig {
    // ===== resolver thresholds =====
    /// Keypoints scoring at or below this are dropped before aggregation.
    pub const MIN_KEYPOINT_SCORE: f32 = 0.3;
    /// A region's collective score must exceed this to register a hit.
    pub const REGION_ACCEPTANCE: f32 = 0.5;

    // ===== zone bands, as fractions of viewport height =====
    pub const HEAD_ZONE_RATIO: f32 = 0.5;
    pub const TORSO_ZONE_RATIO: f32 = 0.85;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VIEWPORT_WIDTH: u32 = 640;
    pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 480;

    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
        }
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self { viewport }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-size frame in which keypoints are reported.
///
/// The crosshair is the geometric center of this viewport, not of whatever
/// surface the frame is eventually scaled onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Crosshair position in frame pixels.
    pub fn center(&self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            GameConfig::DEFAULT_VIEWPORT_WIDTH,
            GameConfig::DEFAULT_VIEWPORT_HEIGHT,
        )
    }
}
