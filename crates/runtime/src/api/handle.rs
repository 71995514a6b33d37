//! Cloneable façade for issuing commands to a match session.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! shooting, switching weapons, feeding server messages and streaming events
//! from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GateState, Weapon};

use super::errors::{Result, RuntimeError};
use super::report::ShotReport;
use crate::events::{Event, EventBus, Topic};
use crate::net::ServerMessage;
use crate::roster::MatchState;
use crate::workers::Command;

/// Client-facing handle to interact with a running match.
#[derive(Clone)]
pub struct MatchHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl MatchHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Pull the trigger.
    ///
    /// Resolves once the shot is fully settled: dropped by the cooldown,
    /// resolved against the estimated pose, or discarded. Precondition
    /// failures come back as [`RuntimeError::Shot`] and leave the cooldown
    /// untouched.
    pub async fn shoot(&self) -> Result<ShotReport> {
        self.request(|reply| Command::Shoot { reply }).await?
    }

    /// Equip `weapon`. Shots already in flight keep the profile they were
    /// fired with.
    pub async fn equip(&self, weapon: Weapon) -> Result<()> {
        self.request(|reply| Command::Equip { weapon, reply }).await
    }

    pub async fn equipped(&self) -> Result<Weapon> {
        self.request(|reply| Command::Equipped { reply }).await
    }

    /// Cooldown state as of now.
    pub async fn gate_state(&self) -> Result<GateState> {
        self.request(|reply| Command::GateState { reply }).await
    }

    /// Feed an inbound message from the game server.
    pub async fn apply(&self, message: ServerMessage) -> Result<()> {
        self.request(|reply| Command::Apply { message, reply })
            .await
    }

    /// Query the current match state (read-only snapshot).
    pub async fn match_state(&self) -> Result<MatchState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Shot` - Shot acceptance, drops and resolution
    /// - `Topic::Match` - Roster, phase and weapon changes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut shots = handle.subscribe(Topic::Shot);
    /// while let Ok(event) = shots.recv().await {
    ///     // Play hit markers, update HUD, etc.
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
