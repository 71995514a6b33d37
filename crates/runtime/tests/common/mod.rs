//! Shared fixtures for session tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use game_core::{BodyPart, Keypoint, Point};
use runtime::{
    Event, FrameRef, JsonChannel, MatchHandle, MatchRuntime, PoseError, PoseSource,
    RuntimeConfig, ServerMessage, ShotEvent, VideoFeed,
};
use tokio::sync::{Notify, broadcast, mpsc};

pub const SHOOTER: &str = "shooter-1";

pub fn keypoint(part: BodyPart, x: f32, y: f32, score: f32) -> Keypoint {
    Keypoint::new(part, Point::new(x, y), score)
}

/// Confident left shoulder right on the crosshair.
pub fn shoulder_on_crosshair() -> Vec<Keypoint> {
    vec![keypoint(BodyPart::LeftShoulder, 320.0, 240.0, 0.9)]
}

/// Confident nose 140 px above the crosshair.
pub fn nose_above_crosshair() -> Vec<Keypoint> {
    vec![keypoint(BodyPart::Nose, 320.0, 100.0, 0.9)]
}

/// Pose source that replays queued results, then reports no body.
#[derive(Default)]
pub struct ScriptedPose {
    queue: Mutex<VecDeque<Result<Vec<Keypoint>, PoseError>>>,
}

impl ScriptedPose {
    pub fn new(results: impl IntoIterator<Item = Result<Vec<Keypoint>, PoseError>>) -> Self {
        Self {
            queue: Mutex::new(results.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PoseSource for ScriptedPose {
    async fn estimate(
        &self,
        _frame: FrameRef,
        _flip_horizontal: bool,
    ) -> Result<Vec<Keypoint>, PoseError> {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Pose source that holds every estimate until released.
pub struct GatedPose {
    pub release: Arc<Notify>,
    keypoints: Vec<Keypoint>,
}

impl GatedPose {
    pub fn new(keypoints: Vec<Keypoint>) -> (Self, Arc<Notify>) {
        let release = Arc::new(Notify::new());
        let pose = Self {
            release: Arc::clone(&release),
            keypoints,
        };
        (pose, release)
    }
}

#[async_trait]
impl PoseSource for GatedPose {
    async fn estimate(
        &self,
        _frame: FrameRef,
        _flip_horizontal: bool,
    ) -> Result<Vec<Keypoint>, PoseError> {
        self.release.notified().await;
        Ok(self.keypoints.clone())
    }
}

/// Pose source that remembers the flip flag of every estimate.
#[derive(Clone, Default)]
pub struct RecordingPose {
    pub flips: Arc<Mutex<Vec<bool>>>,
}

#[async_trait]
impl PoseSource for RecordingPose {
    async fn estimate(
        &self,
        _frame: FrameRef,
        flip_horizontal: bool,
    ) -> Result<Vec<Keypoint>, PoseError> {
        self.flips.lock().unwrap().push(flip_horizontal);
        Ok(shoulder_on_crosshair())
    }
}

/// Pose source whose model never loads.
pub struct BrokenModel;

#[async_trait]
impl PoseSource for BrokenModel {
    async fn warm_up(&self) -> Result<(), PoseError> {
        Err(PoseError::ModelNotLoaded)
    }

    async fn estimate(
        &self,
        _frame: FrameRef,
        _flip_horizontal: bool,
    ) -> Result<Vec<Keypoint>, PoseError> {
        Err(PoseError::ModelNotLoaded)
    }
}

/// Video feed that can be switched off mid-session.
#[derive(Clone)]
pub struct SwitchableFeed {
    live: Arc<AtomicBool>,
}

impl SwitchableFeed {
    pub fn live() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn dark() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_live(&self, live: bool) {
        self.live.store(live, Ordering::SeqCst);
    }
}

impl VideoFeed for SwitchableFeed {
    fn current_frame(&self) -> Option<FrameRef> {
        self.live
            .load(Ordering::SeqCst)
            .then_some(FrameRef::new(1))
    }
}

pub struct Session {
    pub runtime: MatchRuntime,
    pub handle: MatchHandle,
    pub channel: JsonChannel,
    pub feed: SwitchableFeed,
    pub outbound: mpsc::Receiver<String>,
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig {
        shooter_id: SHOOTER.to_string(),
        ..RuntimeConfig::default()
    }
}

/// Build a session over `pose` without starting the match.
pub async fn session(pose: impl PoseSource + 'static) -> Session {
    session_with(pose, config(), 16).await
}

/// Build a session with explicit settings and outbound queue capacity.
pub async fn session_with(
    pose: impl PoseSource + 'static,
    config: RuntimeConfig,
    outbound_capacity: usize,
) -> Session {
    let (channel, outbound) = JsonChannel::new(outbound_capacity);
    let feed = SwitchableFeed::live();

    let runtime = MatchRuntime::builder()
        .config(config)
        .network(channel.clone())
        .pose_source(pose)
        .video_feed(feed.clone())
        .build()
        .await
        .expect("session should initialize");
    let handle = runtime.handle();

    Session {
        runtime,
        handle,
        channel,
        feed,
        outbound,
    }
}

/// Start the match on an already built session.
pub async fn start(session: Session) -> Session {
    session
        .handle
        .apply(ServerMessage::MatchStarted)
        .await
        .expect("match should start");
    session
}

/// Build a session over `pose` and start the match.
pub async fn active_session(pose: impl PoseSource + 'static) -> Session {
    start(session(pose).await).await
}

/// Wait until the worker has accepted a shot.
pub async fn wait_accepted(events: &mut broadcast::Receiver<Event>) -> u64 {
    loop {
        match events.recv().await.expect("shot topic should stay open") {
            Event::Shot(ShotEvent::Accepted { shot_id, .. }) => return shot_id,
            _ => continue,
        }
    }
}
