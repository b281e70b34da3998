//! Entity type catalog loader.

use std::path::Path;

use game_core::{EntityType, EntityTypeRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Entity catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCatalog {
    pub entities: Vec<EntityType>,
}

/// Loader for entity types from RON files.
pub struct EntityLoader;

impl EntityLoader {
    /// Load entity types from a RON file.
    ///
    /// Parents may be declared after their children; every `extends` entry
    /// is checked against the whole catalog once it has been read.
    pub fn load(path: &Path) -> LoadResult<EntityTypeRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EntityTypeRegistry> {
        let catalog: EntityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse entity catalog RON: {}", e))?;

        let mut registry = EntityTypeRegistry::new();
        for entity_type in catalog.entities {
            if registry.contains(&entity_type.id) {
                anyhow::bail!("Duplicate entity type \"{}\"", entity_type.id);
            }
            registry.register([entity_type]);
        }

        for id in registry.ids() {
            registry
                .resolve(id)
                .map_err(|e| anyhow::anyhow!("Invalid entity type \"{}\": {}", id, e))?;
        }

        Ok(registry)
    }
}
