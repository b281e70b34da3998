//! Content loaders for reading game data from files.
//!
//! Each loader has a `load(path)` entry point for files on disk and a
//! `parse(text)` one for data that is already in memory (the bundled
//! tables in [`crate::bundled`]).

pub mod config;
pub mod entities;
pub mod factory;
pub mod map;
pub mod tiles;

pub use config::ConfigLoader;
pub use entities::{EntityCatalog, EntityLoader};
pub use factory::ContentFactory;
pub use map::{MapData, MapLoader, Spawn};
pub use tiles::{TileCatalog, TileLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
