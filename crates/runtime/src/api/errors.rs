//! Unified error types surfaced by the runtime API.
//!
//! Initialization failures carry the stage they happened in, shot rejections
//! carry the missing precondition, and worker plumbing failures are wrapped so
//! clients can bubble everything up through one [`RuntimeError`].
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Shot(#[from] ShotError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Reasons a shot is refused before the cooldown is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShotError {
    #[error("no active match")]
    MatchNotActive,

    #[error("network channel is disconnected")]
    Disconnected,

    #[error("video feed has no frame available")]
    NoVideoFrame,
}

/// Step of the match initialization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum InitStage {
    Network,
    PoseModel,
    Video,
}

#[derive(Debug, Error)]
#[error("match initialization failed at {stage} stage")]
pub struct InitError {
    pub stage: InitStage,
    #[source]
    pub source: InitFailure,
}

impl InitError {
    pub fn new(stage: InitStage, source: impl Into<InitFailure>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InitFailure {
    #[error("{0} not configured")]
    Missing(&'static str),

    #[error("network channel is not connected")]
    NotConnected,

    #[error(transparent)]
    Pose(#[from] PoseError),

    #[error("video feed produced no frame")]
    NoFrame,
}

/// Failures reported by a pose source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoseError {
    #[error("pose model is not loaded")]
    ModelNotLoaded,

    #[error("video frame {0} is not ready")]
    FrameNotReady(u64),

    #[error("pose inference failed: {0}")]
    Inference(String),
}

/// Failures reported by a network channel.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network channel is disconnected")]
    Disconnected,

    #[error("failed to encode message")]
    Encode(#[from] serde_json::Error),
}
