//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting player actions, stepping the scheduler or streaming events
//! from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Action, EntityId, Position, TileTypeId};
use serde::{Deserialize, Serialize};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::view::WorldView;
use crate::workers::Command;

/// How far a submit or step call advanced the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Turns completed during the call.
    pub turns: u32,
    /// The interactive entity the world is now waiting on, if any.
    pub awaiting: Option<EntityId>,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Hand the player its next action, then run the scheduler until input
    /// is needed again.
    pub async fn submit(&self, action: impl Action + 'static) -> Result<StepReport> {
        let action = Box::new(action);
        self.request(|reply| Command::Submit { action, reply })
            .await?
    }

    /// Run the scheduler without new input, up to the configured number of
    /// turns or until an interactive actor needs input.
    pub async fn step(&self) -> Result<StepReport> {
        self.request(|reply| Command::Step { reply }).await?
    }

    /// Rebuild the world from the runtime's scenario.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await?
    }

    pub async fn set_cursor(&self, cursor: Option<Position>) -> Result<()> {
        self.request(|reply| Command::SetCursor { cursor, reply })
            .await
    }

    /// Advance the tile type at `(x, y)` to the next registered one.
    pub async fn cycle_tile(&self, x: i32, y: i32) -> Result<Option<TileTypeId>> {
        self.request(|reply| Command::CycleTile { x, y, reply })
            .await
    }

    /// Query a read-only snapshot of the world
    pub async fn query_view(&self) -> Result<WorldView> {
        self.request(|reply| Command::QueryView { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Completed turns and input requests
    /// - `Topic::Message` - Player-facing text
    /// - `Topic::Entity` - Spawns and despawns
    /// - `Topic::Diagnostic` - Stuck actors and aborted turns
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
