//! Tile grid and autotiling.
//!
//! [`TileType`] entries are static data registered once at startup;
//! [`Tile`] values live in the [`TileMap`]'s flat storage and carry the
//! glyph chosen by autotiling (or an editor override).
mod map;
mod types;

pub use map::{NeighbourMask, TileMap};
pub use types::{Tile, TileRegistry, TileType, TileTypeId};
