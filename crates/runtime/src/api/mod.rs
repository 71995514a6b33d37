//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or infrastructure.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod report;

pub use errors::{
    InitError, InitFailure, InitStage, NetworkError, PoseError, Result, RuntimeError, ShotError,
};
pub use handle::MatchHandle;
pub use providers::{FrameRef, PoseSource, VideoFeed};
pub use report::ShotReport;
