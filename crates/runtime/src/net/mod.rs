//! Game-server plumbing: wire messages and the channel they travel on.

mod channel;
mod messages;

pub use channel::{JsonChannel, NetworkChannel};
pub use messages::{ClientMessage, DamageEvent, PlayerInfo, ServerMessage};
