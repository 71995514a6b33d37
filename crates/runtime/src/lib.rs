//! Match session orchestration for the pose-driven shooter.
//!
//! This crate wires the pure shot rules from `game-core` to the collaborators
//! that live outside it: the pose-estimation model, the video feed, and the
//! game server connection. Consumers build a [`MatchRuntime`] when a match is
//! entered, drive it through the cloneable [`MatchHandle`], and shut it down
//! when the match is left.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and its staged builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for presentation layers
//! - [`net`] defines the wire messages and the network channel abstraction
//! - [`roster`] tracks server-authoritative match state
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod events;
pub mod net;
pub mod roster;
pub mod runtime;

mod workers;

pub use api::{
    FrameRef, InitError, InitFailure, InitStage, MatchHandle, NetworkError, PoseError, PoseSource,
    Result, RuntimeError, ShotError, ShotReport, VideoFeed,
};
pub use events::{Event, EventBus, MatchEvent, ShotEvent, Topic};
pub use net::{ClientMessage, DamageEvent, JsonChannel, NetworkChannel, PlayerInfo, ServerMessage};
pub use roster::{MatchPhase, MatchState, StateChange};
pub use runtime::{MatchRuntime, MatchRuntimeBuilder, RuntimeConfig};
