//! Read-only world snapshots for renderers and other collaborators.

use game_core::{
    Describe, Entity, EntityId, Position, Souls, Stats, TileTypeId, World,
};
use serde::{Deserialize, Serialize};

/// A resolved map cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub kind: TileTypeId,
    pub name: String,
    pub glyph: u32,
    pub color: u32,
    pub walkable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: String,
    /// Describe name, falling back to the type id.
    pub name: String,
    pub description: Option<String>,
    pub position: Position,
    pub z: i32,
    pub glyph: u32,
    pub color: u32,
    /// `(current, max)` for entities with stats.
    pub hitpoints: Option<(u32, u32)>,
    pub stamina: Option<(u32, u32)>,
    pub souls: Option<u32>,
}

impl EntityView {
    fn of(entity: &Entity) -> Self {
        let describe = entity.get::<Describe>();
        let stats = entity.get::<Stats>();
        Self {
            id: entity.id(),
            kind: entity.kind().to_string(),
            name: describe.map_or_else(|| entity.kind().to_string(), |d| d.name.clone()),
            description: describe.and_then(|d| d.description.clone()),
            position: entity.position,
            z: entity.z,
            glyph: entity.glyph,
            color: entity.color,
            hitpoints: stats.map(|s| (s.hitpoints(), s.max_hitpoints())),
            stamina: stats.map(|s| (s.stamina(), s.max_stamina())),
            souls: entity.get::<Souls>().map(Souls::value),
        }
    }
}

/// Snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldView {
    pub width: u32,
    pub height: u32,
    pub turns: u64,
    /// Row-major, `None` for empty cells.
    pub tiles: Vec<Option<TileView>>,
    /// Sorted by draw order (lowest `z` first).
    pub entities: Vec<EntityView>,
    pub player: Option<EntityId>,
    pub cursor: Option<Position>,
}

impl WorldView {
    pub fn capture(world: &World) -> Self {
        let map = world.map();
        let registry = world.registry();

        let mut tiles = vec![None; (map.width() * map.height()) as usize];
        for (x, y, tile) in map.tiles() {
            let Some(tile_type) = registry.tiles.get(tile.kind) else {
                continue;
            };
            tiles[(y as u32 * map.width() + x as u32) as usize] = Some(TileView {
                kind: tile.kind,
                name: tile_type.name.clone(),
                glyph: tile.glyph.unwrap_or(tile_type.glyph),
                color: tile.color.unwrap_or(tile_type.color),
                walkable: tile_type.walkable,
            });
        }

        let mut entities: Vec<_> = world.entities().map(EntityView::of).collect();
        entities.sort_by_key(|entity| entity.z);

        Self {
            width: map.width(),
            height: map.height(),
            turns: world.turns(),
            tiles,
            entities,
            player: world.player().filter(|&id| world.entity(id).is_some()),
            cursor: world.cursor(),
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&TileView> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.tiles[(y as u32 * self.width + x as u32) as usize].as_ref()
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Entities on a cell, topmost first.
    pub fn entities_at(&self, x: i32, y: i32) -> impl Iterator<Item = &EntityView> {
        let position = Position::new(x, y);
        self.entities
            .iter()
            .rev()
            .filter(move |entity| entity.position == position)
    }

    pub fn player_view(&self) -> Option<&EntityView> {
        self.player.and_then(|id| self.entity(id))
    }

    pub fn at_cursor(&self) -> Vec<&EntityView> {
        match self.cursor {
            Some(cursor) => self.entities_at(cursor.x, cursor.y).collect(),
            None => Vec::new(),
        }
    }
}
