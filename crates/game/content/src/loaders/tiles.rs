//! Tile type catalog loader.

use std::path::Path;

use game_core::{TileRegistry, TileType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Tile catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileCatalog {
    pub tiles: Vec<TileType>,
}

/// Loader for tile types from RON files.
pub struct TileLoader;

impl TileLoader {
    pub fn load(path: &Path) -> LoadResult<TileRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog, rejecting duplicate ids.
    pub fn parse(content: &str) -> LoadResult<TileRegistry> {
        let catalog: TileCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tile catalog RON: {}", e))?;

        let mut registry = TileRegistry::new();
        for tile_type in catalog.tiles {
            if registry.get(tile_type.id).is_some() {
                anyhow::bail!("Duplicate tile type id {}", tile_type.id);
            }
            registry.register([tile_type]);
        }

        Ok(registry)
    }
}
