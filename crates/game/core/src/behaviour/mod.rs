//! Behaviours decide what an actor does next.
//!
//! A behaviour is bound to one entity while that entity is spawned and is
//! asked for an action once per decision. Returning `None` means "not ready":
//! for interactive behaviours the scheduler pauses until input arrives.
mod player;
mod reactive;
mod registry;
mod state_machine;

pub use player::PlayerBehaviour;
pub use reactive::{RestBehaviour, Wander};
pub use registry::{BehaviourFactory, BehaviourRegistry};
pub use state_machine::{MAX_TRANSITIONS, Patrol, PatrolState, StateMachine, drive};

use std::any::Any;
use std::fmt;

use crate::action::BoxedAction;
use crate::common::EntityId;
use crate::entity::Entity;
use crate::random::Rng;
use crate::tile::TileMap;

/// Read-only view of the world handed to a behaviour while it decides.
pub struct Decision<'a> {
    pub entity: &'a Entity,
    pub map: &'a TileMap,
    pub rng: &'a mut Rng,
}

pub trait Behaviour: Any + Send + fmt::Debug {
    fn name(&self) -> &'static str;

    fn bind(&mut self, entity: EntityId);

    fn unbind(&mut self);

    fn bound(&self) -> Option<EntityId>;

    fn next_action(&mut self, decision: &mut Decision<'_>) -> Option<BoxedAction>;

    /// Interactive behaviours get their actions from outside the engine and
    /// are asked again after a rejected action.
    fn is_interactive(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
