//! Shot worker that owns the cooldown gate, equipped weapon and match state.
//!
//! Receives commands from [`MatchHandle`](crate::MatchHandle), spawns pose
//! estimation for accepted shots, resolves the results and publishes events
//! to the EventBus.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use game_core::{
    CooldownGate, GateState, HitOutcome, Keypoint, Millis, ShotAttempt, Viewport, Weapon,
    WeaponProfile, WeaponTable,
};

use crate::api::{FrameRef, PoseError, PoseSource, Result, ShotError, ShotReport, VideoFeed};
use crate::events::{EventBus, MatchEvent, ShotEvent};
use crate::net::{ClientMessage, DamageEvent, NetworkChannel, ServerMessage};
use crate::roster::{MatchState, StateChange};

/// Commands that can be sent to the shot worker
pub enum Command {
    /// Pull the trigger. Replies once the shot is settled.
    Shoot {
        reply: oneshot::Sender<Result<ShotReport>>,
    },
    Equip {
        weapon: Weapon,
        reply: oneshot::Sender<()>,
    },
    Equipped { reply: oneshot::Sender<Weapon> },
    GateState { reply: oneshot::Sender<GateState> },
    /// Fold an inbound server message into the match state.
    Apply {
        message: ServerMessage,
        reply: oneshot::Sender<()>,
    },
    /// Query the current match state (read-only).
    QueryState { reply: oneshot::Sender<MatchState> },
}

/// Capabilities a session needs, validated by the init pipeline.
pub struct SessionServices {
    pub network: Arc<dyn NetworkChannel>,
    pub pose: Arc<dyn PoseSource>,
    pub video: Arc<dyn VideoFeed>,
    pub weapons: Arc<dyn WeaponTable>,
}

/// Per-session settings the worker reads on every shot.
pub struct SessionSettings {
    pub shooter_id: String,
    pub viewport: Viewport,
    pub flip_horizontal: bool,
    pub initial_weapon: Weapon,
}

/// Estimation result routed back to the worker.
struct Completion {
    shot_id: u64,
    profile: WeaponProfile,
    viewport: Viewport,
    keypoints: std::result::Result<Vec<Keypoint>, PoseError>,
    reply: oneshot::Sender<Result<ShotReport>>,
}

/// Background task that processes session commands.
pub struct ShotWorker {
    state: MatchState,
    gate: CooldownGate,
    equipped: Weapon,
    next_shot_id: u64,
    epoch: Instant,
    settings: SessionSettings,
    services: SessionServices,
    command_rx: mpsc::Receiver<Command>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    event_bus: EventBus,
}

impl ShotWorker {
    pub fn new(
        settings: SessionSettings,
        services: SessionServices,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            shooter_id = %settings.shooter_id,
            weapon = %settings.initial_weapon,
            width = settings.viewport.width,
            height = settings.viewport.height,
            "ShotWorker initialized"
        );

        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            state: MatchState::new(),
            gate: CooldownGate::new(),
            equipped: settings.initial_weapon,
            next_shot_id: 0,
            epoch: Instant::now(),
            settings,
            services,
            command_rx,
            completion_tx,
            completion_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(done) = self.completion_rx.recv() => {
                    self.handle_completion(done);
                }
            }
        }
        debug!("ShotWorker stopped");
    }

    /// Milliseconds since the session started.
    fn now(&self) -> Millis {
        let elapsed = self.epoch.elapsed().as_millis();
        Millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Shoot { reply } => self.handle_shoot(reply),
            Command::Equip { weapon, reply } => {
                self.equipped = weapon;
                self.event_bus.publish(MatchEvent::WeaponEquipped {
                    weapon,
                    gate: self.gate.state(self.now()),
                });
                debug!(%weapon, "weapon equipped");
                if reply.send(()).is_err() {
                    debug!("Equip reply channel closed (caller dropped)");
                }
            }
            Command::Equipped { reply } => {
                if reply.send(self.equipped).is_err() {
                    debug!("Equipped reply channel closed (caller dropped)");
                }
            }
            Command::GateState { reply } => {
                if reply.send(self.gate.state(self.now())).is_err() {
                    debug!("GateState reply channel closed (caller dropped)");
                }
            }
            Command::Apply { message, reply } => {
                self.handle_server_message(message);
                if reply.send(()).is_err() {
                    debug!("Apply reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_server_message(&mut self, message: ServerMessage) {
        match self.state.apply(message) {
            StateChange::Roster => {
                self.event_bus.publish(MatchEvent::RosterUpdated {
                    players: self.state.players.clone(),
                });
            }
            StateChange::Phase => {
                info!(phase = ?self.state.phase, "match phase changed");
                self.event_bus.publish(MatchEvent::PhaseChanged {
                    phase: self.state.phase.clone(),
                });
            }
        }
    }

    fn check_preconditions(&self) -> std::result::Result<FrameRef, ShotError> {
        if !self.state.is_active() {
            return Err(ShotError::MatchNotActive);
        }
        if !self.services.network.is_connected() {
            return Err(ShotError::Disconnected);
        }
        self.services
            .video
            .current_frame()
            .ok_or(ShotError::NoVideoFrame)
    }

    fn handle_shoot(&mut self, reply: oneshot::Sender<Result<ShotReport>>) {
        let frame = match self.check_preconditions() {
            Ok(frame) => frame,
            Err(err) => {
                debug!(%err, "shot refused");
                if reply.send(Err(err.into())).is_err() {
                    debug!("Shoot reply channel closed (caller dropped)");
                }
                return;
            }
        };

        let now = self.now();
        let weapon = self.equipped;
        let profile = self.services.weapons.profile(weapon);

        if let Err(reloading) = self.gate.try_fire(now, profile.cooldown_ms) {
            debug!(%weapon, remaining_ms = reloading.remaining_ms, "shot dropped");
            self.event_bus.publish(ShotEvent::Dropped {
                weapon,
                remaining_ms: reloading.remaining_ms,
            });
            let report = ShotReport::Dropped {
                remaining_ms: reloading.remaining_ms,
            };
            if reply.send(Ok(report)).is_err() {
                debug!("Shoot reply channel closed (caller dropped)");
            }
            return;
        }

        let shot_id = self.next_shot_id;
        self.next_shot_id += 1;
        debug!(shot_id, %weapon, at = %now, frame = frame.id, "shot accepted");
        self.event_bus.publish(ShotEvent::Accepted {
            shot_id,
            weapon,
            at: now,
        });

        let pose = Arc::clone(&self.services.pose);
        let completion_tx = self.completion_tx.clone();
        let viewport = self.settings.viewport;
        let flip = self.settings.flip_horizontal;

        tokio::spawn(async move {
            let keypoints = pose.estimate(frame, flip).await;
            let done = Completion {
                shot_id,
                profile,
                viewport,
                keypoints,
                reply,
            };
            if completion_tx.send(done).is_err() {
                debug!(shot_id, "worker stopped before estimation finished");
            }
        });
    }

    fn handle_completion(&mut self, done: Completion) {
        let Completion {
            shot_id,
            profile,
            viewport,
            keypoints,
            reply,
        } = done;

        let report = self.settle(shot_id, profile, viewport, keypoints);
        if reply.send(Ok(report)).is_err() {
            debug!(shot_id, "Shoot reply channel closed (caller dropped)");
        }
    }

    fn settle(
        &mut self,
        shot_id: u64,
        profile: WeaponProfile,
        viewport: Viewport,
        keypoints: std::result::Result<Vec<Keypoint>, PoseError>,
    ) -> ShotReport {
        if !self.state.is_active() {
            info!(shot_id, phase = ?self.state.phase, "discarding shot result");
            self.event_bus.publish(ShotEvent::Discarded { shot_id });
            return ShotReport::Discarded;
        }

        let keypoints = match keypoints {
            Ok(keypoints) if keypoints.is_empty() => {
                warn!(shot_id, "pose estimation found no body");
                self.event_bus.publish(ShotEvent::EstimationFailed {
                    shot_id,
                    reason: "no body detected".to_string(),
                });
                return ShotReport::Missed;
            }
            Ok(keypoints) => keypoints,
            Err(err) => {
                warn!(shot_id, %err, "pose estimation failed");
                self.event_bus.publish(ShotEvent::EstimationFailed {
                    shot_id,
                    reason: err.to_string(),
                });
                return ShotReport::Missed;
            }
        };

        let outcome = ShotAttempt::new(profile, keypoints, viewport).resolve();
        self.event_bus.publish(ShotEvent::Resolved {
            shot_id,
            outcome,
        });

        let hit = match outcome {
            HitOutcome::NoHit => {
                debug!(shot_id, weapon = %profile.weapon, "shot missed");
                return ShotReport::Missed;
            }
            HitOutcome::Hit(hit) => hit,
        };

        info!(
            shot_id,
            weapon = %profile.weapon,
            region = %hit.region,
            damage = hit.damage,
            score = hit.collective_score,
            "shot hit"
        );

        let event = DamageEvent {
            shooter_id: self.settings.shooter_id.clone(),
            damage: hit.damage,
        };
        self.emit(shot_id, event.clone().into());

        ShotReport::Hit { hit, event }
    }

    /// Hand `message` to the network channel on its own task.
    ///
    /// The worker never waits on the server; a failed send is logged and
    /// the shot keeps its outcome.
    fn emit(&self, shot_id: u64, message: ClientMessage) {
        let network = Arc::clone(&self.services.network);
        tokio::spawn(async move {
            if let Err(err) = network.send(message).await {
                warn!(shot_id, %err, "failed to send damage event");
            }
        });
    }
}
