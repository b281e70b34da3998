//! Content factory for building registries from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, Registry};

use crate::loaders::{ConfigLoader, EntityLoader, LoadResult, MapData, MapLoader, TileLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tiles.ron
/// ├── entities.ron
/// └── maps/
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Build a registry with the builtin factories plus the tile and entity
    /// catalogs from `tiles.ron` and `entities.ron`.
    pub fn load_registry(&self) -> LoadResult<Registry> {
        let mut registry = Registry::with_builtins();
        registry.tiles = TileLoader::load(&self.data_dir.join("tiles.ron"))?;
        registry.entities = EntityLoader::load(&self.data_dir.join("entities.ron"))?;
        check_components(&registry)?;
        Ok(registry)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapData> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Every component an entity type names must have a registered factory.
pub(crate) fn check_components(registry: &Registry) -> LoadResult<()> {
    for id in registry.entities.ids() {
        let Some(entity_type) = registry.entities.get(id) else {
            continue;
        };
        for (component, _) in &entity_type.components {
            if !registry.components.contains(component) {
                anyhow::bail!("Entity type \"{}\" uses unknown component \"{}\"", id, component);
            }
        }
    }
    Ok(())
}
