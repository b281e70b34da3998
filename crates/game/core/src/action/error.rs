//! Action execution errors.
//!
//! These signal misconfigured actor/action pairings or broken tables. An
//! action that merely cannot succeed returns a failed
//! [`ActionResult`](super::ActionResult) instead.

use crate::common::EntityId;
use crate::error::{ErrorSeverity, GameError};
use crate::tile::TileTypeId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The performer lacks a component the action declares.
    #[error("{action} requires {component} on entity {entity}")]
    MissingComponent {
        entity: EntityId,
        action: &'static str,
        component: &'static str,
    },

    #[error("entity {0} is not spawned")]
    ActorNotSpawned(EntityId),

    #[error("tile type {0} is not registered")]
    UnknownTileType(TileTypeId),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotSpawned(_) => ErrorSeverity::Validation,
            Self::MissingComponent { .. } => ErrorSeverity::Internal,
            Self::UnknownTileType(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingComponent { .. } => "ACTION_MISSING_COMPONENT",
            Self::ActorNotSpawned(_) => "ACTION_ACTOR_NOT_SPAWNED",
            Self::UnknownTileType(_) => "ACTION_UNKNOWN_TILE_TYPE",
        }
    }
}
