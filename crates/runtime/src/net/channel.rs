//! Outbound channel abstraction.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::messages::ClientMessage;
use crate::api::NetworkError;

/// Connection to the game server as seen by a match session.
#[async_trait]
pub trait NetworkChannel: Send + Sync {
    fn is_connected(&self) -> bool;

    async fn send(&self, message: ClientMessage) -> Result<(), NetworkError>;
}

/// Channel that encodes messages as JSON lines onto an mpsc queue.
///
/// The receiving half is whatever actually talks to the server (a socket
/// writer, stdout in replays, or a test).
#[derive(Clone, Debug)]
pub struct JsonChannel {
    tx: mpsc::Sender<String>,
    connected: Arc<AtomicBool>,
}

impl JsonChannel {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let channel = Self {
            tx,
            connected: Arc::new(AtomicBool::new(true)),
        };
        (channel, rx)
    }

    /// Mark the channel as disconnected. Shared by every clone.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

#[async_trait]
impl NetworkChannel for JsonChannel {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire) && !self.tx.is_closed()
    }

    async fn send(&self, message: ClientMessage) -> Result<(), NetworkError> {
        if !self.is_connected() {
            return Err(NetworkError::Disconnected);
        }

        let line = serde_json::to_string(&message)?;
        self.tx
            .send(line)
            .await
            .map_err(|_| NetworkError::Disconnected)
    }
}
