//! Scenario system for map setup and entity placement.
//!
//! A scenario turns an empty [`World`] into a playable one. The sandbox
//! draws a walled arena procedurally; map scenarios copy terrain and spawn
//! points loaded by `game-content`.

use game_content::MapData;
use game_core::{ConfigError, Position, Tile, World};
use tracing::debug;

const FLOOR: u16 = 0;
const WATER: u16 = 1;
const WALL: u16 = 2;

/// Cells turned to water in the sandbox. Cells outside the map are ignored.
const WATER_PATCH: [(i32, i32); 7] = [
    (7, 8),
    (10, 10),
    (10, 11),
    (11, 10),
    (11, 11),
    (12, 11),
    (11, 12),
];

/// How a fresh world is populated.
#[derive(Clone, Debug)]
pub enum Scenario {
    /// Floor bordered by walls, a patch of water, the player at (3, 3) and
    /// `wanderers` wandering humans at random cells.
    Sandbox { wanderers: usize },
    /// Terrain and spawns from a map file.
    Map(MapData),
}

impl Default for Scenario {
    fn default() -> Self {
        Self::sandbox()
    }
}

impl Scenario {
    pub const PLAYER_TYPE: &'static str = "Player";
    pub const WANDERER_TYPE: &'static str = "Wanderer";
    pub const SANDBOX_WANDERERS: usize = 20;
    pub const SANDBOX_PLAYER_POSITION: Position = Position::new(3, 3);
    pub const SANDBOX_PLAYER_Z: i32 = 3;

    pub fn sandbox() -> Self {
        Self::Sandbox {
            wanderers: Self::SANDBOX_WANDERERS,
        }
    }

    pub fn from_map(data: MapData) -> Self {
        Self::Map(data)
    }

    /// Fills `world` and resolves every tile glyph.
    pub fn populate(&self, world: &mut World) -> Result<(), ConfigError> {
        match self {
            Self::Sandbox { wanderers } => populate_sandbox(world, *wanderers),
            Self::Map(data) => populate_map(world, data),
        }
    }
}

fn populate_sandbox(world: &mut World, wanderers: usize) -> Result<(), ConfigError> {
    let (width, height) = (world.map().width() as i32, world.map().height() as i32);

    let map = world.map_mut();
    for x in 0..width {
        for y in 0..height {
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            map.set(x, y, Tile::of(if border { WALL } else { FLOOR }));
        }
    }
    for (x, y) in WATER_PATCH {
        map.set(x, y, Tile::of(WATER));
    }

    let inner_width = u32::try_from(width - 2).unwrap_or(0);
    let inner_height = u32::try_from(height - 2).unwrap_or(0);
    for _ in 0..wanderers {
        let x = 1 + world.rng_mut().int(inner_width) as i32;
        let y = 1 + world.rng_mut().int(inner_height) as i32;
        world.spawn_type(Scenario::WANDERER_TYPE, Position::new(x, y))?;
    }

    world.autotile();

    let mut player = world
        .create(Scenario::PLAYER_TYPE)?
        .at(Scenario::SANDBOX_PLAYER_POSITION);
    player.z = Scenario::SANDBOX_PLAYER_Z;
    world.spawn(player);

    debug!(wanderers, width, height, "sandbox populated");
    Ok(())
}

fn populate_map(world: &mut World, data: &MapData) -> Result<(), ConfigError> {
    let tiles = &world.registry().tiles;
    if let Some((_, _, tile)) = data.map.tiles().find(|(_, _, tile)| tiles.get(tile.kind).is_none()) {
        return Err(ConfigError::UnknownTileType(tile.kind));
    }

    world.set_map(data.map.clone());
    for spawn in &data.spawns {
        world.spawn_type(&spawn.kind, spawn.position)?;
    }
    world.autotile();

    debug!(spawns = data.spawns.len(), "map populated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use game_core::{GameConfig, TileTypeId};

    fn world() -> World {
        let registry = game_content::bundled::registry().unwrap();
        World::new(GameConfig::new().with_seed(7), Arc::new(registry))
    }

    #[test]
    fn sandbox_is_walled_and_populated() {
        let mut world = world();

        Scenario::sandbox().populate(&mut world).unwrap();

        assert_eq!(world.len(), Scenario::SANDBOX_WANDERERS + 1);
        assert_eq!(world.map().get(0, 0).map(|t| t.kind), Some(TileTypeId(WALL)));
        assert_eq!(world.map().get(9, 4).map(|t| t.kind), Some(TileTypeId(WALL)));
        assert_eq!(world.map().get(7, 8).map(|t| t.kind), Some(TileTypeId(WATER)));
        assert!(world.map().tiles().all(|(_, _, tile)| tile.glyph.is_some()));

        let player = world.player_entity().unwrap();
        assert_eq!(player.position, Scenario::SANDBOX_PLAYER_POSITION);
        assert_eq!(player.z, Scenario::SANDBOX_PLAYER_Z);
        assert!(
            world
                .entities()
                .all(|e| e.position.x > 0 && e.position.y > 0 && e.position.x < 9 && e.position.y < 9)
        );
    }

    #[test]
    fn map_scenario_spawns_listed_types() {
        let mut world = world();
        let data = game_content::bundled::map("arena").unwrap();

        Scenario::from_map(data.clone()).populate(&mut world).unwrap();

        assert_eq!(world.len(), data.spawns.len());
        assert_eq!(world.player_entity().map(|p| p.position), Some(Position::new(2, 6)));
        assert_eq!(world.map().width(), data.map.width());
    }

    #[test]
    fn map_with_unregistered_tiles_is_rejected() {
        let mut world = world();
        let data = game_content::MapLoader::parse(
            r#"(legend: {'.': 0, '?': 99}, rows: ["..", ".?"], spawns: [("Player", 0, 0)])"#,
        )
        .unwrap();

        let error = Scenario::from_map(data).populate(&mut world).unwrap_err();

        assert_eq!(error, ConfigError::UnknownTileType(TileTypeId(99)));
        assert!(world.is_empty());
    }
}
