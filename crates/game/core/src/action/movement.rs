use tracing::debug;

use super::{Action, ActionError, ActionResult, Attack};
use crate::common::{EntityId, Position};
use crate::component::{Requirement, Stats};
use crate::world::World;

/// Cardinal direction; north is `y - 1`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Offset covered by `count` steps in this direction.
    pub const fn steps(self, count: i32) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (dx * count, dy * count)
    }
}

fn position_of(world: &World, actor: EntityId) -> Result<Position, ActionError> {
    world
        .entity(actor)
        .map(|entity| entity.position)
        .ok_or(ActionError::ActorNotSpawned(actor))
}

/// Why a move onto `(x, y)` would fail, if it would.
fn blocked(world: &World, x: i32, y: i32) -> Result<Option<&'static str>, ActionError> {
    let Some(tile) = world.map().get(x, y) else {
        return Ok(Some("There's nothing here!"));
    };
    let tile_type = world
        .registry()
        .tiles
        .get(tile.kind)
        .ok_or(ActionError::UnknownTileType(tile.kind))?;
    Ok((!tile_type.walkable).then_some("You can't move there"))
}

/// Does nothing, successfully.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rest;

impl Action for Rest {
    fn name(&self) -> &'static str {
        "Rest"
    }

    fn apply(&self, _actor: EntityId, _world: &mut World) -> Result<ActionResult, ActionError> {
        Ok(ActionResult::succeed())
    }
}

/// Moves to an absolute cell if its tile is walkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTo {
    pub x: i32,
    pub y: i32,
}

impl Action for MoveTo {
    fn name(&self) -> &'static str {
        "MoveTo"
    }

    fn apply(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError> {
        if let Some(reason) = blocked(world, self.x, self.y)? {
            return Ok(ActionResult::fail(reason));
        }

        let entity = world
            .entity_mut(actor)
            .ok_or(ActionError::ActorNotSpawned(actor))?;
        entity.position = Position::new(self.x, self.y);
        Ok(ActionResult::succeed())
    }
}

/// Relative move; resolves into [`MoveTo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveBy {
    pub dx: i32,
    pub dy: i32,
}

impl Action for MoveBy {
    fn name(&self) -> &'static str {
        "MoveBy"
    }

    fn apply(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError> {
        let from = position_of(world, actor)?;
        let to = from.offset(self.dx, self.dy);
        Ok(ActionResult::alternate(MoveTo { x: to.x, y: to.y }))
    }
}

/// One step in a direction: attacks whatever living thing stands there,
/// otherwise moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walk(pub Direction);

impl Action for Walk {
    fn name(&self) -> &'static str {
        "Walk"
    }

    fn apply(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError> {
        let (dx, dy) = self.0.delta();
        let to = position_of(world, actor)?.offset(dx, dy);

        let target = world
            .entities_at(to.x, to.y)
            .find(|entity| entity.id() != actor && entity.has::<Stats>())
            .map(|entity| entity.id());

        Ok(match target {
            Some(target) => ActionResult::alternate(Attack { target }),
            None => ActionResult::alternate(MoveTo { x: to.x, y: to.y }),
        })
    }
}

/// A long step that costs stamina. Without enough stamina it degrades into
/// an ordinary [`Walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dodge(pub Direction);

impl Dodge {
    const REQUIRES: &'static [Requirement] = &[Requirement::of::<Stats>(Stats::NAME)];
}

impl Action for Dodge {
    fn name(&self) -> &'static str {
        "Dodge"
    }

    fn requires(&self) -> &'static [Requirement] {
        Self::REQUIRES
    }

    fn apply(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError> {
        let cost = world.config().dodge_stamina_cost;
        let stride = world.config().dodge_stride;
        let stamina = world
            .entity(actor)
            .and_then(|entity| entity.get::<Stats>())
            .map(Stats::stamina)
            .unwrap_or_default();

        if stamina < cost {
            debug!(%actor, stamina, cost, "not enough stamina to dodge");
            return Ok(ActionResult::alternate(Walk(self.0)));
        }

        let (dx, dy) = self.0.steps(stride);
        let to = position_of(world, actor)?.offset(dx, dy);
        // Stamina is only spent on a landing that will succeed.
        if let Some(reason) = blocked(world, to.x, to.y)? {
            return Ok(ActionResult::fail(reason));
        }

        world.change_stamina(actor, -i64::from(cost));
        Ok(ActionResult::alternate(MoveTo { x: to.x, y: to.y }))
    }
}
