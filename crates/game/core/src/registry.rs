//! The registries an engine session is built from.

use tracing::trace;

use crate::behaviour::{Behaviour, BehaviourRegistry};
use crate::component::{Component, ComponentRegistry};
use crate::entity::{Entity, EntityTypeRegistry, Params};
use crate::error::ConfigError;
use crate::tile::TileRegistry;

/// Tile types, entity types and the component/behaviour factories.
///
/// Loaded once before any entity is constructed, then shared read-only.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub tiles: TileRegistry,
    pub entities: EntityTypeRegistry,
    pub components: ComponentRegistry,
    pub behaviours: BehaviourRegistry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tile and entity tables with every builtin component and
    /// behaviour factory registered.
    pub fn with_builtins() -> Self {
        Self {
            tiles: TileRegistry::new(),
            entities: EntityTypeRegistry::new(),
            components: ComponentRegistry::with_builtins(),
            behaviours: BehaviourRegistry::with_builtins(),
        }
    }

    /// Builds an entity of type `type_id`, attaching its inherited
    /// components in resolution order.
    pub fn create_entity(&self, type_id: &str) -> Result<Entity, ConfigError> {
        let resolved = self.entities.resolve(type_id)?;
        let mut entity = Entity::from_resolved(&resolved);

        for (component_id, params) in &resolved.components {
            let component = self.create_component(component_id, params)?;
            entity.add(component)?;
        }

        trace!(id = %entity.id(), kind = type_id, "entity created");
        Ok(entity)
    }

    pub fn create_component(
        &self,
        id: &str,
        params: &Params,
    ) -> Result<Box<dyn Component>, ConfigError> {
        self.components.create(id, params, self)
    }

    pub fn create_behaviour(
        &self,
        id: &str,
        params: &Params,
    ) -> Result<Box<dyn Behaviour>, ConfigError> {
        self.behaviours.create(id, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Actor, Equipment, Souls, Stats};
    use crate::entity::EntityType;

    fn registry() -> Registry {
        let mut registry = Registry::with_builtins();
        registry.entities.register([
            EntityType::new("Creature")
                .component("Actor", "Rest".into())
                .component("Stats", Params::map([("hitpoints", Params::Int(3))])),
            EntityType::new("Human").extends(["Creature"]).glyph(80).color(23),
            EntityType::new("Player")
                .extends(["Human"])
                .color(1)
                .component("Actor", "Player".into())
                .component("Equipment", Params::map([("left_hand", "Sword".into())]))
                .component("Souls", Params::Int(0)),
            EntityType::new("Sword")
                .component("Holdable", Params::Int(2))
                .component("Equipable", "wield".into()),
            EntityType::new("Broken").component("Stats", Params::None),
            EntityType::new("Typo").component("Stat", Params::None),
            EntityType::new("Mimic")
                .component("Actor", "Rest".into())
                .component("Equipment", Params::map([("left_hand", "Mimic".into())])),
            EntityType::new("Knight")
                .component("Actor", "Rest".into())
                .component("Equipment", Params::map([("right_hand", "Squire".into())])),
            EntityType::new("Squire")
                .component("Actor", "Rest".into())
                .component("Equipment", Params::map([("left_hand", "Knight".into())])),
        ]);
        registry
    }

    #[test]
    fn builds_inherited_components_in_order() {
        let registry = registry();

        let player = registry.create_entity("Player").unwrap();

        assert!(player.is("Creature") && player.is("Human") && player.is("Player"));
        assert_eq!((player.glyph, player.color), (80, 1));
        assert_eq!(
            player.component_names().collect::<Vec<_>>(),
            ["Actor", "Stats", "Equipment", "Souls"]
        );
        assert!(player.get::<Actor>().unwrap().is_interactive());
        assert_eq!(player.get::<Stats>().map(Stats::hitpoints), Some(3));
        assert_eq!(player.get::<Souls>().map(Souls::value), Some(0));
        let sword = player.get::<Equipment>().and_then(Equipment::selected_item);
        assert_eq!(sword.map(Entity::kind), Some("Sword"));
    }

    #[test]
    fn construction_errors_are_loud() {
        let registry = registry();

        assert!(matches!(
            registry.create_entity("Broken"),
            Err(ConfigError::MissingRequirement {
                component: "Stats",
                required: "Actor",
            })
        ));
        assert!(matches!(
            registry.create_entity("Typo"),
            Err(ConfigError::UnknownComponent(id)) if id == "Stat"
        ));
        assert!(matches!(
            registry.create_behaviour("Dance", &Params::None),
            Err(ConfigError::UnknownBehaviour(_))
        ));
    }

    #[test]
    fn self_equipping_types_are_rejected() {
        let registry = registry();

        assert!(matches!(
            registry.create_entity("Mimic"),
            Err(ConfigError::EquipmentCycle(path)) if path == "Mimic -> Mimic"
        ));
        assert!(matches!(
            registry.create_entity("Knight"),
            Err(ConfigError::EquipmentCycle(path)) if path == "Squire -> Knight -> Squire"
        ));
    }
}
