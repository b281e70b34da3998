//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{DiagnosticEvent, EntityEvent, MessageEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn completion and input requests
    Turn,
    /// Player-facing messages
    Message,
    /// Spawns and despawns
    Entity,
    /// Stuck actors and aborted turns
    Diagnostic,
}

impl Topic {
    pub const COUNT: usize = 4;
    pub const ALL: [Topic; Self::COUNT] = [Topic::Turn, Topic::Message, Topic::Entity, Topic::Diagnostic];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Turn(TurnEvent),
    Message(MessageEvent),
    Entity(EntityEvent),
    Diagnostic(DiagnosticEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Message(_) => Topic::Message,
            Event::Entity(_) => Topic::Entity,
            Event::Diagnostic(_) => Topic::Diagnostic,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are indexed by topic discriminant.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; Topic::COUNT]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = std::array::from_fn(|_| broadcast::channel(capacity.max(1)).0);

        Self {
            channels: Arc::new(channels),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        &self.channels[topic as usize]
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

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
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
    use game_core::EntityId;

    #[test]
    fn events_only_reach_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut messages = bus.subscribe(Topic::Message);
        let mut turns = bus.subscribe(Topic::Turn);

        bus.publish(Event::Message(MessageEvent {
            source: None,
            text: "hello".into(),
        }));

        assert!(matches!(
            messages.try_recv(),
            Ok(Event::Message(MessageEvent { text, .. })) if text == "hello"
        ));
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn world_events_map_to_topics() {
        let stuck: Event = game_core::WorldEvent::ActorStuck {
            entity: EntityId::next(),
            tries: 10,
            lineage: vec!["Walk", "MoveTo"],
        }
        .into();

        assert_eq!(stuck.topic(), Topic::Diagnostic);
        assert_eq!(
            Event::from(game_core::WorldEvent::Turn { turn: 3 }),
            Event::Turn(TurnEvent::Completed { turn: 3 })
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new().publish(Event::Turn(TurnEvent::Reset));
    }
}
