//! Common error infrastructure for game-core.
//!
//! The engine separates two kinds of failure:
//!
//! - **Configuration errors** ([`ConfigError`], [`crate::ActionError`]): broken data
//!   tables or wiring (unknown ids, missing required components). These are
//!   hard errors surfaced at load or construction time.
//! - **Gameplay outcomes**: an action that cannot succeed right now. These
//!   are ordinary [`crate::ActionResult`] values and never appear here.

use crate::tile::TileTypeId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown entity id passed by a caller
    Validation,

    /// Unexpected state inconsistency or misconfigured data.
    ///
    /// Examples: component attached without its requirement, action
    /// performed by an entity that lacks a required component
    Internal,

    /// The engine cannot continue with the loaded content.
    ///
    /// Examples: entity type references an unregistered component
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while building entities, components and behaviours from
/// registered data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("entity type \"{0}\" is not registered")]
    UnknownEntityType(String),

    #[error("entity type \"{parent}\" is not registered (while resolving \"{root}\")")]
    UnknownAncestor { root: String, parent: String },

    #[error("component \"{0}\" is not registered")]
    UnknownComponent(String),

    #[error("behaviour \"{0}\" is not registered")]
    UnknownBehaviour(String),

    #[error("tile type {0} is not registered")]
    UnknownTileType(TileTypeId),

    #[error("can't add {component} to an entity without {required}")]
    MissingRequirement {
        component: &'static str,
        required: &'static str,
    },

    #[error("starting equipment contains itself: {0}")]
    EquipmentCycle(String),

    #[error("invalid params for {owner}: {reason}")]
    InvalidParams { owner: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid_params(owner: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            owner: owner.into(),
            reason: reason.into(),
        }
    }
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingRequirement { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntityType(_) => "CONFIG_UNKNOWN_ENTITY_TYPE",
            Self::UnknownAncestor { .. } => "CONFIG_UNKNOWN_ANCESTOR",
            Self::UnknownComponent(_) => "CONFIG_UNKNOWN_COMPONENT",
            Self::UnknownBehaviour(_) => "CONFIG_UNKNOWN_BEHAVIOUR",
            Self::UnknownTileType(_) => "CONFIG_UNKNOWN_TILE_TYPE",
            Self::MissingRequirement { .. } => "CONFIG_MISSING_REQUIREMENT",
            Self::EquipmentCycle(_) => "CONFIG_EQUIPMENT_CYCLE",
            Self::InvalidParams { .. } => "CONFIG_INVALID_PARAMS",
        }
    }
}
