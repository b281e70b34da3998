//! Turn scheduling.
//!
//! A game turn walks every entity that was spawned when the turn began, in
//! entity-table order. Each entity gets its before-turn hook, then (if it is
//! an actor) asks its behaviour for actions until one resolves, then its
//! after-turn hook.
//!
//! The turn is resumable: when an interactive actor has no action yet,
//! [`World::update`] returns [`StepOutcome::AwaitingInput`] and keeps its
//! place. The next call continues with that same actor without repeating
//! any hook.

use tracing::{debug, warn};

use super::{World, WorldError, WorldEvent};
use crate::action::{ActionResult, Attempt, BoxedAction};
use crate::behaviour::Decision;
use crate::common::EntityId;
use crate::component::Actor;

/// Result of one [`World::update`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every entity took its turn; `turn` is the new turn count.
    Completed { turn: u64 },
    /// The turn is paused on an interactive actor with no pending action.
    AwaitingInput { entity: EntityId },
}

/// Position within an in-progress turn.
#[derive(Debug)]
pub(super) struct TurnCursor {
    queue: Vec<EntityId>,
    index: usize,
    /// Whether `queue[index]` already received its before-turn hook.
    began: bool,
}

impl TurnCursor {
    fn new(queue: Vec<EntityId>) -> Self {
        Self {
            queue,
            index: 0,
            began: false,
        }
    }

    fn current(&self) -> Option<EntityId> {
        self.queue.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
        self.began = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnProgress {
    Done,
    AwaitingInput,
}

enum Decided {
    /// No actor capability, or an actor without a behaviour.
    Passive,
    NotReady { interactive: bool },
    Action { action: BoxedAction, interactive: bool },
}

impl World {
    /// Advances the game by one turn, or as far as the next missing input.
    ///
    /// Entities spawned during a turn act from the next turn on; entities
    /// despawned before their slot are skipped. A configuration error aborts
    /// the offending entity's turn (its after-turn hook is skipped) and is
    /// returned; the next call carries on with the following entity.
    pub fn update(&mut self) -> Result<StepOutcome, WorldError> {
        let mut cursor = match self.turn.take() {
            Some(cursor) => cursor,
            None => {
                debug!(turn = self.turns + 1, entities = self.entities.len(), "turn started");
                TurnCursor::new(self.entities.keys().copied().collect())
            }
        };

        while let Some(id) = cursor.current() {
            let Some(entity) = self.entities.get_mut(&id) else {
                cursor.advance();
                continue;
            };
            if !cursor.began {
                entity.on_before_turn();
                cursor.began = true;
            }

            match self.take_turn(id) {
                Ok(TurnProgress::Done) => {}
                Ok(TurnProgress::AwaitingInput) => {
                    self.turn = Some(cursor);
                    return Ok(StepOutcome::AwaitingInput { entity: id });
                }
                Err(error) => {
                    warn!(%id, %error, "turn aborted");
                    cursor.advance();
                    self.turn = Some(cursor);
                    return Err(error);
                }
            }

            if let Some(entity) = self.entities.get_mut(&id) {
                entity.on_after_turn();
            }
            cursor.advance();
        }

        self.turns += 1;
        self.remains.clear();
        self.events.push_back(WorldEvent::Turn { turn: self.turns });
        Ok(StepOutcome::Completed { turn: self.turns })
    }

    /// The actor the current turn is waiting on, if any.
    pub fn awaiting_input(&self) -> Option<EntityId> {
        self.turn
            .as_ref()
            .filter(|cursor| cursor.began)
            .and_then(TurnCursor::current)
    }

    fn take_turn(&mut self, id: EntityId) -> Result<TurnProgress, WorldError> {
        loop {
            let (action, interactive) = match self.decide(id) {
                Decided::Passive => return Ok(TurnProgress::Done),
                Decided::NotReady { interactive: true } => {
                    return Ok(TurnProgress::AwaitingInput);
                }
                Decided::NotReady { interactive: false } => {
                    debug!(%id, "behaviour produced no action");
                    return Ok(TurnProgress::Done);
                }
                Decided::Action {
                    action,
                    interactive,
                } => (action, interactive),
            };

            let Some(result) = self.resolve(id, action)? else {
                return Ok(TurnProgress::Done);
            };

            if interactive {
                if let Some(text) = result.message() {
                    self.message(Some(id), text.to_string());
                }
            }

            // A rejected player action is not a turn: ask for another one.
            if result.is_ok() || !interactive || !self.entities.contains_key(&id) {
                return Ok(TurnProgress::Done);
            }
        }
    }

    fn decide(&mut self, id: EntityId) -> Decided {
        let Some(mut behaviour) = self
            .entities
            .get_mut(&id)
            .and_then(|entity| entity.get_mut::<Actor>())
            .and_then(Actor::take_behaviour)
        else {
            return Decided::Passive;
        };
        let interactive = behaviour.is_interactive();

        let action = self.entities.get(&id).and_then(|entity| {
            let mut decision = Decision {
                entity,
                map: &self.map,
                rng: &mut self.rng,
            };
            behaviour.next_action(&mut decision)
        });

        if let Some(actor) = self
            .entities
            .get_mut(&id)
            .and_then(|entity| entity.get_mut::<Actor>())
        {
            actor.restore_behaviour(behaviour);
        }

        match action {
            Some(action) => Decided::Action {
                action,
                interactive,
            },
            None => Decided::NotReady { interactive },
        }
    }

    /// Performs `action`, chasing alternates for at most
    /// `max_action_tries` attempts. `None` means the chain was abandoned.
    fn resolve(
        &mut self,
        id: EntityId,
        action: BoxedAction,
    ) -> Result<Option<ActionResult>, WorldError> {
        let max_tries = self.config.max_action_tries.max(1);
        let mut attempt = Attempt::new(action);
        let mut tries = 0;

        loop {
            tries += 1;
            let name = attempt.action.name();
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.on_before_action(name);
            }

            let result = attempt.action.perform(id, self)?;

            let Some(entity) = self.entities.get_mut(&id) else {
                return Ok(Some(result));
            };
            entity.on_after_action(name, result.is_ok());

            match result {
                ActionResult::Alternate(alternate) => {
                    attempt = attempt.alternate(alternate);
                    if tries >= max_tries {
                        let lineage = attempt.lineage();
                        warn!(%id, tries, ?lineage, "actor might be stuck");
                        self.events.push_back(WorldEvent::ActorStuck {
                            entity: id,
                            tries,
                            lineage,
                        });
                        return Ok(None);
                    }
                }
                result => return Ok(Some(result)),
            }
        }
    }
}
