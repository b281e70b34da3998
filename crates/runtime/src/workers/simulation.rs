//! Simulation worker that owns the authoritative [`game_core::World`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives
//! [`World::update`], and republishes the world's queued events on the
//! [`EventBus`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use game_core::{BoxedAction, GameConfig, GameError, Position, Registry, StepOutcome, TileTypeId, World};

use crate::api::{Result, RuntimeError, StepReport};
use crate::events::{DiagnosticEvent, Event, EventBus, TurnEvent};
use crate::scenario::Scenario;
use crate::view::WorldView;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Give the player its next action and advance.
    Submit {
        action: BoxedAction,
        reply: oneshot::Sender<Result<StepReport>>,
    },
    /// Advance without new input.
    Step {
        reply: oneshot::Sender<Result<StepReport>>,
    },
    /// Rebuild the world from the scenario.
    Reset { reply: oneshot::Sender<Result<()>> },
    SetCursor {
        cursor: Option<Position>,
        reply: oneshot::Sender<()>,
    },
    CycleTile {
        x: i32,
        y: i32,
        reply: oneshot::Sender<Option<TileTypeId>>,
    },
    /// Snapshot the world (read-only).
    QueryView { reply: oneshot::Sender<WorldView> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    world: World,
    game_config: GameConfig,
    registry: Arc<Registry>,
    scenario: Scenario,
    turns_per_step: u32,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker with a freshly populated world.
    pub fn new(
        game_config: GameConfig,
        registry: Arc<Registry>,
        scenario: Scenario,
        turns_per_step: u32,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Result<Self> {
        let world = build_world(&game_config, &registry, &scenario)?;
        let mut worker = Self {
            world,
            game_config,
            registry,
            scenario,
            turns_per_step: turns_per_step.max(1),
            command_rx,
            event_bus,
        };
        worker.publish_world_events();
        Ok(worker)
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit { action, reply } => {
                let result = self.submit(action);
                let _ = reply.send(result);
            }
            Command::Step { reply } => {
                let result = self.advance();
                let _ = reply.send(result);
            }
            Command::Reset { reply } => {
                let result = self.reset();
                let _ = reply.send(result);
            }
            Command::SetCursor { cursor, reply } => {
                self.world.set_cursor(cursor);
                let _ = reply.send(());
            }
            Command::CycleTile { x, y, reply } => {
                let kind = self.world.cycle_tile(x, y);
                debug!(x, y, ?kind, "tile cycled");
                let _ = reply.send(kind);
            }
            Command::QueryView { reply } => {
                let _ = reply.send(WorldView::capture(&self.world));
            }
        }
    }

    fn submit(&mut self, action: BoxedAction) -> Result<StepReport> {
        let player = self
            .world
            .player()
            .filter(|&id| self.world.entity(id).is_some())
            .ok_or(RuntimeError::NoPlayer)?;

        debug!(%player, action = action.name(), "input submitted");
        self.world.set_next_action(player, action)?;
        self.advance()
    }

    /// Runs the scheduler until an interactive actor needs input, bounded by
    /// `turns_per_step` completed turns.
    fn advance(&mut self) -> Result<StepReport> {
        let mut report = StepReport::default();

        while report.turns < self.turns_per_step {
            let outcome = self.world.update();
            self.publish_world_events();

            match outcome {
                Ok(StepOutcome::Completed { .. }) => report.turns += 1,
                Ok(StepOutcome::AwaitingInput { entity }) => {
                    self.event_bus
                        .publish(Event::Turn(TurnEvent::AwaitingInput { entity }));
                    report.awaiting = Some(entity);
                    break;
                }
                Err(error) => {
                    error!(code = error.error_code(), %error, "turn aborted");
                    self.event_bus
                        .publish(Event::Diagnostic(DiagnosticEvent::TurnAborted {
                            code: error.error_code().to_string(),
                            message: error.to_string(),
                        }));
                    return Err(error.into());
                }
            }
        }

        Ok(report)
    }

    fn reset(&mut self) -> Result<()> {
        self.world = build_world(&self.game_config, &self.registry, &self.scenario)?;
        self.event_bus.publish(Event::Turn(TurnEvent::Reset));
        self.publish_world_events();
        Ok(())
    }

    fn publish_world_events(&mut self) {
        for event in self.world.drain_events() {
            self.event_bus.publish(event);
        }
    }
}

/// Builds and populates a world. Without a configured seed every build
/// draws a fresh one.
fn build_world(config: &GameConfig, registry: &Arc<Registry>, scenario: &Scenario) -> Result<World> {
    let mut config = config.clone();
    let seed = *config.seed.get_or_insert_with(rand::random);
    info!(seed, "building world");

    let mut world = World::new(config, Arc::clone(registry));
    scenario
        .populate(&mut world)
        .map_err(RuntimeError::Scenario)?;
    Ok(world)
}
