//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, world construction and the
//! scheduler so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ConfigError, WorldError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a registry to be configured before building")]
    MissingRegistry,

    #[error("no player is spawned to receive input")]
    NoPlayer,

    #[error("failed to build the world")]
    Scenario(#[source] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),
}
