use std::any::Any;

use super::{Behaviour, Decision};
use crate::action::{BoxedAction, Direction, MoveBy, Rest};
use crate::common::EntityId;
use crate::entity::Params;
use crate::error::ConfigError;

/// Always rests.
#[derive(Clone, Debug, Default)]
pub struct RestBehaviour {
    entity: Option<EntityId>,
}

impl RestBehaviour {
    pub const NAME: &'static str = "Rest";
}

impl Behaviour for RestBehaviour {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bind(&mut self, entity: EntityId) {
        self.entity = Some(entity);
    }

    fn unbind(&mut self) {
        self.entity = None;
    }

    fn bound(&self) -> Option<EntityId> {
        self.entity
    }

    fn next_action(&mut self, _decision: &mut Decision<'_>) -> Option<BoxedAction> {
        Some(Box::new(Rest))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Random 4-directional steps, staying put included.
///
/// Weights are `[stay, north, east, south, west]`; the default is uniform.
#[derive(Clone, Debug)]
pub struct Wander {
    weights: [u32; 5],
    entity: Option<EntityId>,
}

impl Wander {
    pub const NAME: &'static str = "Wander";
    const KEYS: [&'static str; 5] = ["stay", "north", "east", "south", "west"];

    pub fn new(weights: [u32; 5]) -> Self {
        Self {
            weights,
            entity: None,
        }
    }

    /// Reads optional per-direction weights, e.g. `{"stay": 3, "north": 1}`.
    /// Unlisted directions keep weight 1.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let mut weights = [1; 5];
        for (weight, key) in weights.iter_mut().zip(Self::KEYS) {
            if let Some(value) = params.uint(Self::NAME, key)? {
                *weight = value;
            }
        }
        Ok(Self::new(weights))
    }

    pub fn weights(&self) -> [u32; 5] {
        self.weights
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::new([1; 5])
    }
}

impl Behaviour for Wander {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bind(&mut self, entity: EntityId) {
        self.entity = Some(entity);
    }

    fn unbind(&mut self) {
        self.entity = None;
    }

    fn bound(&self) -> Option<EntityId> {
        self.entity
    }

    fn next_action(&mut self, decision: &mut Decision<'_>) -> Option<BoxedAction> {
        let direction = match decision.rng.weighted(&self.weights) {
            Some(1) => Direction::North,
            Some(2) => Direction::East,
            Some(3) => Direction::South,
            Some(4) => Direction::West,
            _ => return Some(Box::new(Rest)),
        };
        let (dx, dy) = direction.delta();
        Some(Box::new(MoveBy { dx, dy }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
