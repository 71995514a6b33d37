//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{MatchEvent, ShotEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Shot lifecycle (accepted, dropped, resolved)
    Shot,
    /// Match state (roster, phase, equipment)
    Match,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Shot(ShotEvent),
    Match(MatchEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Shot(_) => Topic::Shot,
            Event::Match(_) => Topic::Match,
        }
    }
}

impl From<ShotEvent> for Event {
    fn from(event: ShotEvent) -> Self {
        Event::Shot(event)
    }
}

impl From<MatchEvent> for Event {
    fn from(event: MatchEvent) -> Self {
        Event::Match(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    shot_events: broadcast::Sender<Event>,
    match_events: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            shot_events: broadcast::channel(capacity).0,
            match_events: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Shot => &self.shot_events,
            Topic::Match => &self.match_events,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Weapon;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut shots = bus.subscribe(Topic::Shot);
        let mut matches = bus.subscribe(Topic::Match);

        bus.publish(ShotEvent::Dropped {
            weapon: Weapon::Pistol,
            remaining_ms: 50,
        });

        assert_eq!(shots.recv().await.unwrap().topic(), Topic::Shot);
        assert!(matches.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(MatchEvent::RosterUpdated { players: vec![] });
    }
}
