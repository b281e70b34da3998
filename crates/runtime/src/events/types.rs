//! Event payloads republished from the world's queue.

use game_core::{EntityId, WorldEvent};
use serde::{Deserialize, Serialize};

use super::bus::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Every entity acted; `turn` is the new turn count.
    Completed { turn: u64 },
    /// The scheduler paused on an interactive actor.
    AwaitingInput { entity: EntityId },
    /// The world was rebuilt from its scenario.
    Reset,
}

/// Player-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub source: Option<EntityId>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityEvent {
    Spawned { entity: EntityId, kind: String },
    Despawned { entity: EntityId, kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticEvent {
    /// An alternate chain hit the attempt limit; `lineage` lists the action
    /// names from the first attempt to the last.
    ActorStuck {
        entity: EntityId,
        tries: u32,
        lineage: Vec<String>,
    },
    /// A configuration error aborted an entity's turn.
    TurnAborted { code: String, message: String },
}

impl From<WorldEvent> for Event {
    fn from(event: WorldEvent) -> Self {
        match event {
            WorldEvent::Turn { turn } => Event::Turn(TurnEvent::Completed { turn }),
            WorldEvent::Message { source, text } => Event::Message(MessageEvent { source, text }),
            WorldEvent::Spawned { entity, kind } => {
                Event::Entity(EntityEvent::Spawned { entity, kind })
            }
            WorldEvent::Despawned { entity, kind } => {
                Event::Entity(EntityEvent::Despawned { entity, kind })
            }
            WorldEvent::ActorStuck {
                entity,
                tries,
                lineage,
            } => Event::Diagnostic(DiagnosticEvent::ActorStuck {
                entity,
                tries,
                lineage: lineage.into_iter().map(str::to_string).collect(),
            }),
        }
    }
}
