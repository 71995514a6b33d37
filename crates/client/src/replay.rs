//! Headless match replays.
//!
//! A replay script stands in for the camera, the pose model and the game
//! server: each step fires at a fixed offset from the start of the run and
//! either feeds a server message, switches weapons, or pulls the trigger on a
//! frame whose keypoints are given inline.
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use game_core::{Keypoint, Weapon};
use runtime::{
    FrameRef, JsonChannel, MatchRuntime, PoseError, PoseSource, RuntimeConfig, RuntimeError,
    ServerMessage, ShotReport, VideoFeed,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStep {
    /// Offset from the start of the replay.
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ReplayAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ReplayAction {
    /// Shorthand for a `matchStarted` server message.
    Start,
    Equip { weapon: Weapon },
    Shoot { keypoints: Vec<Keypoint> },
    Server { message: ServerMessage },
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut script: Self = serde_json::from_str(json).context("Invalid replay script")?;
        script.steps.sort_by_key(|step| step.at_ms);
        Ok(script)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Tally of what the replayed shots produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub dropped: u32,
    pub discarded: u32,
    pub refused: u32,
    pub damage_dealt: u32,
}

impl ReplaySummary {
    fn record(&mut self, report: &ShotReport) {
        self.shots += 1;
        match report {
            ShotReport::Hit { hit, .. } => {
                self.hits += 1;
                self.damage_dealt += hit.damage;
            }
            ShotReport::Missed => self.misses += 1,
            ShotReport::Dropped { .. } => self.dropped += 1,
            ShotReport::Discarded => self.discarded += 1,
        }
    }

    fn record_refused(&mut self) {
        self.shots += 1;
        self.refused += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    /// Outbound network messages, one JSON document per entry.
    pub outbound: Vec<String>,
    pub summary: ReplaySummary,
}

/// Video feed whose frame counter advances once per scripted shot.
#[derive(Clone, Default)]
struct ScriptedFeed {
    frame: Arc<AtomicU64>,
}

impl ScriptedFeed {
    fn advance(&self) -> FrameRef {
        FrameRef::new(self.frame.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl VideoFeed for ScriptedFeed {
    fn current_frame(&self) -> Option<FrameRef> {
        Some(FrameRef::new(self.frame.load(Ordering::SeqCst)))
    }
}

/// Pose source answering with the keypoints staged for each frame.
#[derive(Clone, Default)]
struct ScriptedPoseSource {
    frames: Arc<Mutex<HashMap<u64, Vec<Keypoint>>>>,
}

impl ScriptedPoseSource {
    async fn stage(&self, frame: FrameRef, keypoints: Vec<Keypoint>) {
        self.frames.lock().await.insert(frame.id, keypoints);
    }
}

#[async_trait]
impl PoseSource for ScriptedPoseSource {
    async fn estimate(
        &self,
        frame: FrameRef,
        _flip_horizontal: bool,
    ) -> Result<Vec<Keypoint>, PoseError> {
        self.frames
            .lock()
            .await
            .remove(&frame.id)
            .ok_or(PoseError::FrameNotReady(frame.id))
    }
}

fn collect_outbound(mut rx: mpsc::Receiver<String>, echo: bool) -> JoinHandle<Vec<String>> {
    tokio::spawn(async move {
        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            if echo {
                println!("{line}");
            }
            lines.push(line);
        }
        lines
    })
}

/// Play `script` against a fresh session.
///
/// With `echo` set, outbound messages are printed to stdout as they are sent.
pub async fn run(script: &ReplayScript, config: RuntimeConfig, echo: bool) -> Result<ReplayOutcome> {
    let (channel, outbound_rx) = JsonChannel::new(config.command_buffer_size.max(16));
    let collector = collect_outbound(outbound_rx, echo);

    let feed = ScriptedFeed::default();
    let pose = ScriptedPoseSource::default();

    let runtime = MatchRuntime::builder()
        .config(config)
        .network(channel)
        .pose_source(pose.clone())
        .video_feed(feed.clone())
        .build()
        .await
        .context("Failed to initialize match session")?;
    let handle = runtime.handle();

    let started = Instant::now();
    let mut summary = ReplaySummary::default();

    for (index, step) in script.steps.iter().enumerate() {
        tokio::time::sleep_until(started + Duration::from_millis(step.at_ms)).await;
        tracing::debug!(index, at_ms = step.at_ms, "replay step");

        match &step.action {
            ReplayAction::Start => handle.apply(ServerMessage::MatchStarted).await?,
            ReplayAction::Server { message } => handle.apply(message.clone()).await?,
            ReplayAction::Equip { weapon } => handle.equip(*weapon).await?,
            ReplayAction::Shoot { keypoints } => {
                let frame = feed.advance();
                pose.stage(frame, keypoints.clone()).await;

                match handle.shoot().await {
                    Ok(report) => {
                        tracing::info!(index, ?report, "shot settled");
                        summary.record(&report);
                    }
                    Err(RuntimeError::Shot(reason)) => {
                        tracing::warn!(index, %reason, "shot refused");
                        summary.record_refused();
                    }
                    Err(err) => return Err(err).context("Match session failed"),
                }
            }
        }
    }

    drop(handle);
    runtime.shutdown().await?;

    let outbound = collector
        .await
        .context("Outbound collector task failed")?;

    tracing::info!(?summary, "replay finished");
    Ok(ReplayOutcome { outbound, summary })
}
