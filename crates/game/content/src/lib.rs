//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Tile types (data-driven via RON)
//! - Entity types with inheritance (data-driven via RON)
//! - Map layouts and spawn points (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod bundled;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EntityCatalog, EntityLoader, MapData, MapLoader, Spawn,
    TileCatalog, TileLoader,
};
