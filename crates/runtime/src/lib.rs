//! Runtime orchestration for the turn-based simulation.
//!
//! This crate wraps a [`game_core::World`] in a background task and exposes
//! it through a cloneable [`RuntimeHandle`]. Consumers embed [`Runtime`] to
//! submit player actions, step the scheduler, subscribe to events and read
//! [`WorldView`] snapshots.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`scenario`] populates a fresh world (sandbox or loaded map)
//! - [`view`] builds read-only snapshots for renderers
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod scenario;
pub mod view;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, StepReport};
pub use events::{DiagnosticEvent, EntityEvent, Event, EventBus, MessageEvent, Topic, TurnEvent};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scenario::Scenario;
pub use view::{EntityView, TileView, WorldView};
