//! Match state mirrored from the game server.
use serde::{Deserialize, Serialize};

use crate::net::{PlayerInfo, ServerMessage};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum MatchPhase {
    #[default]
    Waiting,
    Active,
    Over { winner: String },
}

/// What a server message changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Roster,
    Phase,
}

/// Roster and phase of the current match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: Vec<PlayerInfo>,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an inbound message into the state.
    pub fn apply(&mut self, message: ServerMessage) -> StateChange {
        match message {
            ServerMessage::Players { players } => {
                self.players = players;
                StateChange::Roster
            }
            ServerMessage::MatchStarted => {
                self.phase = MatchPhase::Active;
                StateChange::Phase
            }
            ServerMessage::GameOver { winner } => {
                self.phase = MatchPhase::Over { winner };
                StateChange::Phase
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == MatchPhase::Active
    }

    pub fn player(&self, id: &str) -> Option<&PlayerInfo> {
        self.players.iter().find(|p| p.id == id)
    }
}
