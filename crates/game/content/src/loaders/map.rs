//! Map data loader.
//!
//! Maps are drawn as rows of characters; a legend maps each character to a
//! tile type id. Spawn points name entity types placed once the map loads.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{Position, Tile, TileMap, TileRegistry, TileTypeId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    legend: BTreeMap<char, u16>,
    rows: Vec<String>,
    #[serde(default)]
    spawns: Vec<(String, i32, i32)>, // (entity type, x, y)
}

/// An entity type to place on a freshly loaded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub kind: String,
    pub position: Position,
}

/// Terrain plus initial spawn points.
#[derive(Debug, Clone)]
pub struct MapData {
    pub map: TileMap,
    pub spawns: Vec<Spawn>,
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a map. A space leaves the cell empty.
    ///
    /// Every row must be as wide as the first one and every character other
    /// than a space must appear in the legend.
    pub fn parse(content: &str) -> LoadResult<MapData> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let height = data.rows.len();
        let width = data.rows.first().map_or(0, |row| row.chars().count());
        let mut map = TileMap::new(width as u32, height as u32);

        for (y, row) in data.rows.iter().enumerate() {
            if row.chars().count() != width {
                anyhow::bail!(
                    "Map row {} has {} columns, expected {}",
                    y,
                    row.chars().count(),
                    width
                );
            }
            for (x, symbol) in row.chars().enumerate() {
                if symbol == ' ' {
                    continue;
                }
                let kind = data
                    .legend
                    .get(&symbol)
                    .ok_or_else(|| anyhow::anyhow!("Unknown map symbol '{}' at ({}, {})", symbol, x, y))?;
                map.set(x as i32, y as i32, Tile::of(*kind));
            }
        }

        let mut spawns = Vec::with_capacity(data.spawns.len());
        for (kind, x, y) in data.spawns {
            if !map.contains(x, y) {
                anyhow::bail!("Spawn \"{}\" at ({}, {}) is outside the map", kind, x, y);
            }
            spawns.push(Spawn {
                kind,
                position: Position::new(x, y),
            });
        }

        Ok(MapData { map, spawns })
    }

    /// Checks that every tile on `map` has a registered type.
    pub fn validate(map: &TileMap, tiles: &TileRegistry) -> LoadResult<()> {
        for (x, y, tile) in map.tiles() {
            if tiles.get(tile.kind).is_none() {
                anyhow::bail!("Unknown tile type {} at ({}, {})", tile.kind, x, y);
            }
        }
        Ok(())
    }
}

impl MapData {
    /// Tile type at a position, if the cell is filled.
    pub fn kind_at(&self, x: i32, y: i32) -> Option<TileTypeId> {
        self.map.get(x, y).map(|tile| tile.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r####"(
        legend: {'.': 0, '#': 2},
        rows: [
            "###",
            "#. ",
        ],
        spawns: [("Rat", 1, 1)],
    )"####;

    #[test]
    fn parses_rows_and_spawns() {
        let data = MapLoader::parse(SMALL).unwrap();

        assert_eq!((data.map.width(), data.map.height()), (3, 2));
        assert_eq!(data.kind_at(0, 0), Some(TileTypeId(2)));
        assert_eq!(data.kind_at(1, 1), Some(TileTypeId(0)));
        assert_eq!(data.kind_at(2, 1), None);
        assert_eq!(
            data.spawns,
            [Spawn {
                kind: "Rat".into(),
                position: Position::new(1, 1),
            }]
        );
    }

    #[test]
    fn rejects_ragged_rows_and_unknown_symbols() {
        let ragged = r#"(legend: {'.': 0}, rows: ["..", "."])"#;
        let unknown = r#"(legend: {'.': 0}, rows: [".x"])"#;
        let outside = r#"(legend: {'.': 0}, rows: [".."], spawns: [("Rat", 5, 0)])"#;

        assert!(MapLoader::parse(ragged).is_err());
        assert!(MapLoader::parse(unknown).is_err());
        assert!(MapLoader::parse(outside).is_err());
    }

    #[test]
    fn validates_tile_types() {
        let data = MapLoader::parse(SMALL).unwrap();
        let mut tiles = TileRegistry::new();
        tiles.register([game_core::TileType::new(0, "Floor", 1, 8)]);

        assert!(MapLoader::validate(&data.map, &tiles).is_err());

        tiles.register([game_core::TileType::new(2, "Wall", 32, 9)]);
        assert!(MapLoader::validate(&data.map, &tiles).is_ok());
    }
}
