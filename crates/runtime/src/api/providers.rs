//! Asynchronous abstractions for the capabilities a match depends on.
//!
//! Runtime users plug in [`PoseSource`] and [`VideoFeed`] implementations so
//! a session can run against a live model and camera, recorded frames, or
//! test fixtures.
use async_trait::async_trait;
use game_core::Keypoint;

use super::errors::PoseError;

/// Reference to a captured video frame.
///
/// The runtime never inspects pixels; it only hands the reference from the
/// video feed to the pose source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRef {
    pub id: u64,
}

impl FrameRef {
    pub const fn new(id: u64) -> Self {
        Self { id }
    }
}

/// Pose-estimation capability.
///
/// Implementations can wrap:
/// - An inference model running on the current camera frame
/// - Recorded keypoint streams (replays)
/// - Scripted fixtures for tests
#[async_trait]
pub trait PoseSource: Send + Sync {
    /// Load or warm up the model. Called once while a match is initialized.
    async fn warm_up(&self) -> Result<(), PoseError> {
        Ok(())
    }

    /// Estimate keypoints for `frame`.
    ///
    /// `flip_horizontal` mirrors the frame before inference (front-facing
    /// cameras). An empty result means no body was found.
    async fn estimate(&self, frame: FrameRef, flip_horizontal: bool)
    -> Result<Vec<Keypoint>, PoseError>;
}

/// Source of the frame a shot is evaluated against.
pub trait VideoFeed: Send + Sync {
    /// Current frame, or `None` while the feed is not producing frames.
    fn current_frame(&self) -> Option<FrameRef>;
}
