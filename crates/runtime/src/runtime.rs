//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder whose `build()` runs the staged initialization pipeline.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use game_core::{Arsenal, GameConfig, Weapon, WeaponTable};

use crate::api::{
    InitError, InitFailure, InitStage, MatchHandle, PoseSource, Result, RuntimeError, VideoFeed,
};
use crate::events::EventBus;
use crate::net::NetworkChannel;
use crate::workers::{Command, SessionServices, SessionSettings, ShotWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Identifier stamped on outbound damage events.
    pub shooter_id: String,
    /// Mirror frames before estimation (front-facing cameras).
    pub flip_horizontal: bool,
    pub initial_weapon: Weapon,
    /// Radius overrides used when no weapon table is supplied.
    pub arsenal: Arsenal,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            shooter_id: "player".to_string(),
            flip_horizontal: false,
            initial_weapon: Weapon::default(),
            arsenal: Arsenal::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// A live match session.
///
/// Created when a match is entered and shut down when it is left; all
/// session state lives in the worker and dies with it.
pub struct MatchRuntime {
    handle: MatchHandle,
    worker: JoinHandle<()>,
}

impl MatchRuntime {
    /// Create a new runtime builder
    pub fn builder() -> MatchRuntimeBuilder {
        MatchRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> MatchHandle {
        self.handle.clone()
    }

    /// Shutdown the session
    ///
    /// The worker stops once every outstanding handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)?;
        info!("match session shut down");
        Ok(())
    }
}

/// Builder for [`MatchRuntime`].
#[derive(Default)]
pub struct MatchRuntimeBuilder {
    config: RuntimeConfig,
    network: Option<Arc<dyn NetworkChannel>>,
    pose_source: Option<Arc<dyn PoseSource>>,
    video_feed: Option<Arc<dyn VideoFeed>>,
    weapon_table: Option<Arc<dyn WeaponTable>>,
}

impl MatchRuntimeBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn network(mut self, network: impl NetworkChannel + 'static) -> Self {
        self.network = Some(Arc::new(network));
        self
    }

    pub fn pose_source(mut self, pose_source: impl PoseSource + 'static) -> Self {
        self.pose_source = Some(Arc::new(pose_source));
        self
    }

    pub fn video_feed(mut self, video_feed: impl VideoFeed + 'static) -> Self {
        self.video_feed = Some(Arc::new(video_feed));
        self
    }

    /// Replace the balance table. Defaults to the configured [`Arsenal`].
    pub fn weapon_table(mut self, table: impl WeaponTable + 'static) -> Self {
        self.weapon_table = Some(Arc::new(table));
        self
    }

    /// Run the initialization pipeline and start the session worker.
    ///
    /// Stages run in order (network, pose model, video) and the first
    /// failing one is reported in [`InitError::stage`].
    pub async fn build(self) -> Result<MatchRuntime> {
        let network = self
            .network
            .ok_or_else(|| InitError::new(InitStage::Network, InitFailure::Missing("network")))?;
        if !network.is_connected() {
            return Err(InitError::new(InitStage::Network, InitFailure::NotConnected).into());
        }
        info!(stage = %InitStage::Network, "init stage complete");

        let pose = self.pose_source.ok_or_else(|| {
            InitError::new(InitStage::PoseModel, InitFailure::Missing("pose source"))
        })?;
        pose.warm_up()
            .await
            .map_err(|err| InitError::new(InitStage::PoseModel, err))?;
        info!(stage = %InitStage::PoseModel, "init stage complete");

        let video = self
            .video_feed
            .ok_or_else(|| InitError::new(InitStage::Video, InitFailure::Missing("video feed")))?;
        if video.current_frame().is_none() {
            return Err(InitError::new(InitStage::Video, InitFailure::NoFrame).into());
        }
        info!(stage = %InitStage::Video, "init stage complete");

        let weapons: Arc<dyn WeaponTable> = match self.weapon_table {
            Some(table) => table,
            None => Arc::new(self.config.arsenal.clone()),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = MatchHandle::new(command_tx, event_bus.clone());

        let settings = SessionSettings {
            shooter_id: self.config.shooter_id,
            viewport: self.config.game.viewport,
            flip_horizontal: self.config.flip_horizontal,
            initial_weapon: self.config.initial_weapon,
        };
        let services = SessionServices {
            network,
            pose,
            video,
            weapons,
        };

        let worker = ShotWorker::new(settings, services, command_rx, event_bus);
        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(MatchRuntime { handle, worker })
    }
}
