use std::any::Any;
use std::fmt;

use tracing::warn;

use super::{Behaviour, Decision};
use crate::action::{BoxedAction, MoveBy, Rest};
use crate::common::EntityId;
use crate::entity::Params;
use crate::error::ConfigError;

/// Upper bound on state transitions within one decision.
pub const MAX_TRANSITIONS: usize = 16;

/// A behaviour expressed as named states.
///
/// Running a state either yields an action, which ends the decision, or
/// transitions to another state and yields `None`, in which case the new
/// state runs immediately within the same decision.
pub trait StateMachine {
    type State: Copy + PartialEq + fmt::Debug;

    fn state(&self) -> Self::State;

    fn transition(&mut self, state: Self::State);

    fn run_state(&mut self, decision: &mut Decision<'_>) -> Option<BoxedAction>;
}

/// Runs states until one produces an action, giving up after
/// [`MAX_TRANSITIONS`] transitions.
pub fn drive<M>(machine: &mut M, decision: &mut Decision<'_>) -> Option<BoxedAction>
where
    M: StateMachine + ?Sized,
{
    for _ in 0..=MAX_TRANSITIONS {
        if let Some(action) = machine.run_state(decision) {
            return Some(action);
        }
    }
    None
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum PatrolState {
    Idle,
    MoveNorth,
    MoveSouth,
}

/// Walks north and south between two rows.
#[derive(Clone, Debug)]
pub struct Patrol {
    state: PatrolState,
    min_y: i32,
    max_y: i32,
    entity: Option<EntityId>,
}

impl Patrol {
    pub const NAME: &'static str = "Patrol";
    pub const DEFAULT_MIN_Y: i32 = 1;
    pub const DEFAULT_MAX_Y: i32 = 10;

    pub fn new(min_y: i32, max_y: i32) -> Self {
        Self {
            state: PatrolState::Idle,
            min_y,
            max_y,
            entity: None,
        }
    }

    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let min_y = Self::row(params, "min_y")?.unwrap_or(Self::DEFAULT_MIN_Y);
        let max_y = Self::row(params, "max_y")?.unwrap_or(Self::DEFAULT_MAX_Y);
        Ok(Self::new(min_y, max_y))
    }

    fn row(params: &Params, key: &str) -> Result<Option<i32>, ConfigError> {
        params
            .uint(Self::NAME, key)?
            .map(|y| {
                i32::try_from(y).map_err(|_| {
                    ConfigError::invalid_params(Self::NAME, format!("\"{key}\" is out of range"))
                })
            })
            .transpose()
    }
}

impl Default for Patrol {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_Y, Self::DEFAULT_MAX_Y)
    }
}

impl StateMachine for Patrol {
    type State = PatrolState;

    fn state(&self) -> PatrolState {
        self.state
    }

    fn transition(&mut self, state: PatrolState) {
        self.state = state;
    }

    fn run_state(&mut self, decision: &mut Decision<'_>) -> Option<BoxedAction> {
        let y = decision.entity.position.y;
        match self.state {
            PatrolState::Idle if y <= self.min_y => self.transition(PatrolState::MoveSouth),
            PatrolState::Idle => self.transition(PatrolState::MoveNorth),
            PatrolState::MoveNorth if y <= self.min_y => self.transition(PatrolState::MoveSouth),
            PatrolState::MoveNorth => return Some(Box::new(MoveBy { dx: 0, dy: -1 })),
            PatrolState::MoveSouth if y >= self.max_y => self.transition(PatrolState::MoveNorth),
            PatrolState::MoveSouth => return Some(Box::new(MoveBy { dx: 0, dy: 1 })),
        }
        None
    }
}

impl Behaviour for Patrol {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bind(&mut self, entity: EntityId) {
        self.entity = Some(entity);
    }

    fn unbind(&mut self) {
        self.entity = None;
        self.state = PatrolState::Idle;
    }

    fn bound(&self) -> Option<EntityId> {
        self.entity
    }

    fn next_action(&mut self, decision: &mut Decision<'_>) -> Option<BoxedAction> {
        drive(self, decision).or_else(|| {
            warn!(
                entity = ?self.entity,
                state = ?self.state,
                "patrol could not settle on an action, resting"
            );
            Some(Box::new(Rest))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Position;
    use crate::entity::Entity;
    use crate::random::Rng;
    use crate::tile::TileMap;

    fn decide(patrol: &mut Patrol, y: i32) -> String {
        let entity = Entity::new("Guard").at(Position::new(0, y));
        let map = TileMap::new(1, 12);
        let mut rng = Rng::seeded(1);
        let mut decision = Decision {
            entity: &entity,
            map: &map,
            rng: &mut rng,
        };
        format!("{:?}", patrol.next_action(&mut decision).unwrap())
    }

    #[test]
    fn turns_around_at_the_bounds() {
        let mut patrol = Patrol::new(1, 3);

        assert_eq!(decide(&mut patrol, 2), "MoveBy { dx: 0, dy: -1 }");
        assert_eq!(patrol.state(), PatrolState::MoveNorth);

        assert_eq!(decide(&mut patrol, 1), "MoveBy { dx: 0, dy: 1 }");
        assert_eq!(patrol.state(), PatrolState::MoveSouth);

        assert_eq!(decide(&mut patrol, 3), "MoveBy { dx: 0, dy: -1 }");
        assert_eq!(patrol.state(), PatrolState::MoveNorth);
    }

    #[test]
    fn degenerate_bounds_fall_back_to_rest() {
        let mut patrol = Patrol::new(5, 5);

        assert_eq!(decide(&mut patrol, 5), "Rest");
    }

    #[test]
    fn rows_beyond_the_map_range_are_rejected() {
        let params = Params::map([("min_y", Params::Int(2)), ("max_y", Params::Int(7))]);
        let patrol = Patrol::from_params(&params).unwrap();
        assert_eq!((patrol.min_y, patrol.max_y), (2, 7));

        let params = Params::map([("max_y", Params::Int(i64::from(u32::MAX)))]);
        assert!(matches!(
            Patrol::from_params(&params),
            Err(ConfigError::InvalidParams { .. })
        ));
    }
}
