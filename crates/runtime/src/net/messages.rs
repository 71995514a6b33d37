//! JSON messages exchanged with the game server.
//!
//! Every message is an object tagged by a `type` field with camelCase keys.
use serde::{Deserialize, Serialize};

/// Damage dealt by a resolved shot. Health bookkeeping is server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageEvent {
    pub shooter_id: String,
    pub damage: u32,
}

/// Outbound messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Damage(DamageEvent),
}

impl From<DamageEvent> for ClientMessage {
    fn from(event: DamageEvent) -> Self {
        ClientMessage::Damage(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub health: u32,
    pub ready: bool,
}

/// Inbound messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Full roster; replaces whatever was known before.
    Players { players: Vec<PlayerInfo> },
    MatchStarted,
    GameOver { winner: String },
}
