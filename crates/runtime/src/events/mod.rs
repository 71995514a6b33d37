//! Topic-based event bus for session events.
//!
//! Events are published to specific topics, and consumers (HUD, audio, hit
//! markers) subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{MatchEvent, ShotEvent};
