//! Content compiled into the binary from the crate's `data/` directory.
//!
//! Lets hosts and tests start a session without locating a data directory
//! on disk.

use game_core::{GameConfig, Registry};

use crate::loaders::factory::check_components;
use crate::loaders::{ConfigLoader, EntityLoader, LoadResult, MapData, MapLoader, TileLoader};

pub const CONFIG: &str = include_str!("../data/config.toml");
pub const TILES: &str = include_str!("../data/tiles.ron");
pub const ENTITIES: &str = include_str!("../data/entities.ron");

const MAPS: &[(&str, &str)] = &[("arena", include_str!("../data/maps/arena.ron"))];

pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn registry() -> LoadResult<Registry> {
    let mut registry = Registry::with_builtins();
    registry.tiles = TileLoader::parse(TILES)?;
    registry.entities = EntityLoader::parse(ENTITIES)?;
    check_components(&registry)?;
    Ok(registry)
}

/// Names of the bundled maps.
pub fn maps() -> impl Iterator<Item = &'static str> {
    MAPS.iter().map(|(name, _)| *name)
}

pub fn map(name: &str) -> LoadResult<MapData> {
    let (_, source) = MAPS
        .iter()
        .find(|(map_name, _)| *map_name == name)
        .ok_or_else(|| anyhow::anyhow!("Unknown bundled map \"{}\"", name))?;
    MapLoader::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Actor, Entity, Equipment, EquipmentSlot, Souls, Stats};

    #[test]
    fn every_bundled_type_builds() {
        let registry = registry().unwrap();

        for id in registry.entities.ids() {
            registry
                .create_entity(id)
                .unwrap_or_else(|e| panic!("{id}: {e}"));
        }
    }

    #[test]
    fn player_is_equipped_and_interactive() {
        let registry = registry().unwrap();

        let player = registry.create_entity("Player").unwrap();

        assert!(player.is("Creature"));
        assert_eq!((player.glyph, player.color, player.z), (80, 1, 3));
        assert!(player.get::<Actor>().unwrap().is_interactive());
        assert_eq!(player.get::<Stats>().map(Stats::max_stamina), Some(3));
        assert_eq!(player.get::<Souls>().map(Souls::value), Some(0));
        let equipment = player.get::<Equipment>().unwrap();
        assert_eq!(
            equipment.item(EquipmentSlot::LeftHand).map(Entity::kind),
            Some("Sword")
        );
        assert_eq!(
            equipment.item(EquipmentSlot::Consumable).map(Entity::kind),
            Some("Potion")
        );
    }

    #[test]
    fn bundled_maps_use_known_tiles() {
        let registry = registry().unwrap();

        for name in maps() {
            let data = map(name).unwrap();
            MapLoader::validate(&data.map, &registry.tiles).unwrap();
            for spawn in &data.spawns {
                assert!(registry.entities.contains(&spawn.kind), "{}", spawn.kind);
            }
        }
        assert!(map("nowhere").is_err());
    }

    #[test]
    fn bundled_config_parses() {
        let config = config().unwrap();

        assert_eq!(config.max_action_tries, GameConfig::DEFAULT_MAX_ACTION_TRIES);
    }
}
