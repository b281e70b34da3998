//! The world: map, entities and the turn scheduler.
//!
//! [`World`] exclusively owns every spawned entity and the tile map. State
//! changes happen through [`World::update`], which runs the turn scheduler,
//! and through the actions it performs. Hosts observe the world through the
//! queued [`WorldEvent`]s and read-only accessors.

mod scheduler;
#[cfg(test)]
mod tests;

pub use scheduler::StepOutcome;

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use tracing::debug;

use crate::action::{Action, ActionError, ActionResult, BoxedAction};
use crate::behaviour::PlayerBehaviour;
use crate::common::{EntityId, Position};
use crate::component::{Actor, Event, Stats};
use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::{ConfigError, ErrorSeverity, GameError};
use crate::random::Rng;
use crate::registry::Registry;
use crate::tile::{TileMap, TileTypeId};

use scheduler::TurnCursor;

/// Notifications queued for the host, drained with [`World::drain_events`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// A game turn finished; `turn` is the new turn count.
    Turn { turn: u64 },
    /// Player-facing text.
    Message {
        source: Option<EntityId>,
        text: String,
    },
    Spawned { entity: EntityId, kind: String },
    Despawned { entity: EntityId, kind: String },
    /// An alternate chain hit the attempt limit and the turn was forfeited.
    ActorStuck {
        entity: EntityId,
        tries: u32,
        lineage: Vec<&'static str>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("entity {0} is not spawned")]
    UnknownEntity(EntityId),

    #[error("entity {0} does not accept input")]
    NotInteractive(EntityId),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) | Self::NotInteractive(_) => ErrorSeverity::Validation,
            Self::Action(error) => error.severity(),
            Self::Config(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "WORLD_UNKNOWN_ENTITY",
            Self::NotInteractive(_) => "WORLD_NOT_INTERACTIVE",
            Self::Action(error) => error.error_code(),
            Self::Config(error) => error.error_code(),
        }
    }
}

#[derive(Debug)]
pub struct World {
    config: GameConfig,
    registry: Arc<Registry>,
    map: TileMap,
    entities: BTreeMap<EntityId, Entity>,
    /// Entities despawned during the current turn, kept readable until it ends.
    remains: Vec<Entity>,
    rng: Rng,
    events: VecDeque<WorldEvent>,
    turns: u64,
    cursor: Option<Position>,
    player: Option<EntityId>,
    turn: Option<TurnCursor>,
}

impl World {
    pub fn new(config: GameConfig, registry: Arc<Registry>) -> Self {
        let map = TileMap::new(config.map_width, config.map_height);
        let rng = Rng::seeded(config.seed.unwrap_or_default());
        Self {
            config,
            registry,
            map,
            entities: BTreeMap::new(),
            remains: Vec::new(),
            rng,
            events: VecDeque::new(),
            turns: 0,
            cursor: None,
            player: None,
            turn: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    /// Replaces the map wholesale, e.g. with one loaded from disk.
    pub fn set_map(&mut self, map: TileMap) {
        self.map = map;
    }

    pub fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Completed turns.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Resolves glyphs for the whole map.
    pub fn autotile(&mut self) {
        self.map.autotile(&self.registry.tiles, &mut self.rng);
    }

    /// Editor helper: advances the tile type at `(x, y)` and re-autotiles
    /// around it.
    pub fn cycle_tile(&mut self, x: i32, y: i32) -> Option<TileTypeId> {
        let type_count = u16::try_from(self.registry.tiles.len()).unwrap_or(u16::MAX);
        self.map
            .cycle_tile(x, y, type_count, &self.registry.tiles, &mut self.rng)
    }

    /// Builds an entity from the registry without spawning it.
    pub fn create(&self, type_id: &str) -> Result<Entity, ConfigError> {
        self.registry.create_entity(type_id)
    }

    /// Builds and spawns an entity of `type_id` at `position`.
    pub fn spawn_type(&mut self, type_id: &str, position: Position) -> Result<EntityId, ConfigError> {
        let entity = self.create(type_id)?.at(position);
        Ok(self.spawn(entity))
    }

    /// Takes ownership of `entity` and activates it. The first interactive
    /// actor spawned becomes the player.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = entity.id();
        entity.set_spawned(true);
        entity.on_enter();

        if self.player.is_none() && entity.get::<Actor>().is_some_and(Actor::is_interactive) {
            self.player = Some(id);
        }

        debug!(%id, kind = entity.kind(), position = %entity.position, "spawned");
        self.events.push_back(WorldEvent::Spawned {
            entity: id,
            kind: entity.kind().to_string(),
        });
        self.entities.insert(id, entity);
        id
    }

    /// Removes an entity from play. It stays readable through
    /// [`World::find`] until the current turn ends.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(mut entity) = self.entities.remove(&id) else {
            return false;
        };
        entity.on_exit();
        entity.set_spawned(false);

        debug!(%id, kind = entity.kind(), "despawned");
        self.events.push_back(WorldEvent::Despawned {
            entity: id,
            kind: entity.kind().to_string(),
        });
        self.remains.push(entity);
        true
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Like [`World::entity`], but also sees entities despawned this turn.
    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .get(&id)
            .or_else(|| self.remains.iter().find(|entity| entity.id() == id))
    }

    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.entities.get_mut(&id) {
            Some(entity) => Some(entity),
            None => self.remains.iter_mut().find(|entity| entity.id() == id),
        }
    }

    /// Spawned entities in table order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Entity> {
        let position = Position::new(x, y);
        self.entities
            .values()
            .filter(move |entity| entity.position == position)
    }

    pub fn entity_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities_at(x, y).next()
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn set_player(&mut self, id: EntityId) {
        self.player = Some(id);
    }

    /// The player entity, alive or despawned this turn.
    pub fn player_entity(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.find(id))
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<Position>) {
        self.cursor = cursor;
    }

    pub fn entity_at_cursor(&self) -> Option<&Entity> {
        self.cursor
            .and_then(|cursor| self.entity_at(cursor.x, cursor.y))
    }

    pub fn entities_at_cursor(&self) -> Vec<&Entity> {
        match self.cursor {
            Some(cursor) => self.entities_at(cursor.x, cursor.y).collect(),
            None => Vec::new(),
        }
    }

    /// Delivers an event to a spawned or just-despawned entity.
    pub fn send(&mut self, id: EntityId, event: impl Into<Event>) -> bool {
        match self.find_mut(id) {
            Some(entity) => {
                entity.send(event);
                true
            }
            None => false,
        }
    }

    /// Adjusts hit points, returning the new value and whether this change
    /// depleted them. Depleting them sends [`Event::Death`] and despawns the
    /// entity straight away.
    pub fn change_hitpoints(&mut self, id: EntityId, amount: i64) -> Option<(u32, bool)> {
        let entity = self.entities.get_mut(&id)?;
        let stats = entity.get_mut::<Stats>()?;
        let depleted = stats.adjust_hitpoints(amount);
        let hitpoints = stats.hitpoints();

        if depleted {
            entity.send(Event::Death);
            debug!(%id, kind = entity.kind(), "died");
            self.despawn(id);
        }
        Some((hitpoints, depleted))
    }

    pub fn change_stamina(&mut self, id: EntityId, amount: i64) -> Option<u32> {
        let stats = self.entities.get_mut(&id)?.get_mut::<Stats>()?;
        stats.adjust_stamina(amount);
        Some(stats.stamina())
    }

    /// Performs a single action without chasing alternates.
    pub fn perform(&mut self, actor: EntityId, action: &dyn Action) -> Result<ActionResult, WorldError> {
        Ok(action.perform(actor, self)?)
    }

    /// Hands the next action to an interactive actor.
    pub fn set_next_action(&mut self, id: EntityId, action: BoxedAction) -> Result<(), WorldError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?;
        let player = entity
            .get_mut::<Actor>()
            .and_then(Actor::behaviour_mut)
            .and_then(|behaviour| behaviour.as_any_mut().downcast_mut::<PlayerBehaviour>())
            .ok_or(WorldError::NotInteractive(id))?;
        player.set_next_action(action);
        Ok(())
    }

    pub fn message(&mut self, source: Option<EntityId>, text: impl Into<String>) {
        self.events.push_back(WorldEvent::Message {
            source,
            text: text.into(),
        });
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        self.events.drain(..).collect()
    }
}
