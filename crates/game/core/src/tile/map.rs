use crate::common::Position;
use crate::random::Rng;

use super::{Tile, TileRegistry, TileTypeId};

bitflags::bitflags! {
    /// Same-type neighbours of a tile. The bit layout doubles as the glyph
    /// offset from the tile type's base glyph.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NeighbourMask: u8 {
        const NORTH = 1 << 3;
        const EAST = 1 << 2;
        const SOUTH = 1 << 1;
        const WEST = 1 << 0;
    }
}

/// Fixed-size grid of optional tiles stored row-major in a flat vector.
///
/// Coordinates outside `[0, width) x [0, height)` read as empty and writes
/// to them are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<Option<Tile>>,
}

impl TileMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(x as usize + y as usize * self.width as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).and_then(|index| self.tiles[index].as_ref())
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).and_then(|index| self.tiles[index].as_mut())
    }

    pub fn at(&self, position: Position) -> Option<&Tile> {
        self.get(position.x, position.y)
    }

    /// Writes a tile, returning the stored tile. Out of range is a no-op
    /// returning `None`.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> Option<&Tile> {
        let index = self.index(x, y)?;
        self.tiles[index] = Some(tile);
        self.tiles[index].as_ref()
    }

    /// Empties a cell, returning the tile that was there.
    pub fn clear(&mut self, x: i32, y: i32) -> Option<Tile> {
        let index = self.index(x, y)?;
        self.tiles[index].take()
    }

    pub fn fill(&mut self, tile: Tile) {
        self.tiles.iter_mut().for_each(|slot| *slot = Some(tile));
    }

    /// Iterates over occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().filter_map(move |(index, slot)| {
            slot.as_ref()
                .map(|tile| ((index % width) as i32, (index / width) as i32, tile))
        })
    }

    fn same_kind(&self, x: i32, y: i32, kind: TileTypeId) -> bool {
        self.get(x, y).is_some_and(|tile| tile.kind == kind)
    }

    /// Mask of the four orthogonal neighbours sharing `kind`.
    pub fn neighbour_mask(&self, x: i32, y: i32, kind: TileTypeId) -> NeighbourMask {
        let mut mask = NeighbourMask::empty();
        mask.set(NeighbourMask::NORTH, self.same_kind(x, y - 1, kind));
        mask.set(NeighbourMask::EAST, self.same_kind(x + 1, y, kind));
        mask.set(NeighbourMask::SOUTH, self.same_kind(x, y + 1, kind));
        mask.set(NeighbourMask::WEST, self.same_kind(x - 1, y, kind));
        mask
    }

    /// Resolves glyphs for the whole map.
    pub fn autotile(&mut self, registry: &TileRegistry, rng: &mut Rng) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (x1, y1) = (self.width as i32 - 1, self.height as i32 - 1);
        self.autotile_region(0, 0, x1, y1, registry, rng);
    }

    /// Resolves glyphs inside the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    ///
    /// Variant types get a random variant glyph once and keep it; autotile
    /// types get `glyph + mask`. Tiles of unknown types, or of types that are
    /// neither, are left alone.
    pub fn autotile_region(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        registry: &TileRegistry,
        rng: &mut Rng,
    ) {
        let (x0, y0) = (x0.max(0), y0.max(0));
        let (x1, y1) = (
            x1.min(self.width as i32 - 1),
            y1.min(self.height as i32 - 1),
        );

        for y in y0..=y1 {
            for x in x0..=x1 {
                let Some(&tile) = self.get(x, y) else {
                    continue;
                };
                let Some(tile_type) = registry.get(tile.kind) else {
                    continue;
                };

                let glyph = if tile_type.variants > 0 {
                    if tile.glyph.is_some() {
                        continue;
                    }
                    tile_type.glyph + rng.int(tile_type.variants)
                } else if tile_type.autotile {
                    // The font lays out autotile glyphs so the mask is an index offset.
                    tile_type.glyph + u32::from(self.neighbour_mask(x, y, tile.kind).bits())
                } else {
                    continue;
                };

                if let Some(tile) = self.get_mut(x, y) {
                    tile.glyph = Some(glyph);
                }
            }
        }
    }

    /// Advances the tile at `(x, y)` to the next type id (wrapping at
    /// `type_count`), clears its glyph and re-autotiles the neighbourhood.
    pub fn cycle_tile(
        &mut self,
        x: i32,
        y: i32,
        type_count: u16,
        registry: &TileRegistry,
        rng: &mut Rng,
    ) -> Option<TileTypeId> {
        if type_count == 0 {
            return None;
        }
        let tile = self.get_mut(x, y)?;
        tile.glyph = None;
        tile.kind = TileTypeId((tile.kind.0 + 1) % type_count);
        let kind = tile.kind;

        self.autotile_region(x - 1, y - 1, x + 1, y + 1, registry, rng);
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileType;

    const FLOOR: u16 = 0;
    const WATER: u16 = 1;
    const WALL: u16 = 2;

    fn registry() -> TileRegistry {
        let mut registry = TileRegistry::new();
        registry.register([
            TileType::new(FLOOR, "Floor", 1, 8).walkable().with_variants(5),
            TileType::new(WATER, "Water", 16, 5).autotiled(),
            TileType::new(WALL, "Wall", 32, 9).autotiled(),
        ]);
        registry
    }

    fn floor_map(width: u32, height: u32) -> TileMap {
        let mut map = TileMap::new(width, height);
        map.fill(Tile::of(FLOOR));
        map
    }

    #[test]
    fn surrounded_block_center_matches_all_neighbours() {
        let registry = registry();
        let mut rng = Rng::seeded(1);
        let mut map = floor_map(7, 7);
        for y in 2..=4 {
            for x in 2..=4 {
                map.set(x, y, Tile::of(WATER));
            }
        }

        map.autotile(&registry, &mut rng);

        assert_eq!(map.neighbour_mask(3, 3, TileTypeId(WATER)).bits(), 0b1111);
        assert_eq!(map.get(3, 3).unwrap().glyph, Some(16 + 15));
        // Top-left corner only touches east and south.
        assert_eq!(map.get(2, 2).unwrap().glyph, Some(16 + 0b0110));
    }

    #[test]
    fn isolated_tile_has_empty_mask() {
        let registry = registry();
        let mut rng = Rng::seeded(1);
        let mut map = floor_map(5, 5);
        map.set(2, 2, Tile::of(WALL));

        map.autotile(&registry, &mut rng);

        assert_eq!(map.neighbour_mask(2, 2, TileTypeId(WALL)), NeighbourMask::empty());
        assert_eq!(map.get(2, 2).unwrap().glyph, Some(32));
    }

    #[test]
    fn variant_glyphs_are_assigned_once() {
        let registry = registry();
        let mut rng = Rng::seeded(99);
        let mut map = floor_map(6, 6);

        map.autotile(&registry, &mut rng);
        let first: Vec<_> = map.tiles().map(|(_, _, tile)| tile.glyph).collect();
        assert!(first.iter().all(|glyph| matches!(glyph, Some(g) if (1..6).contains(g))));

        for _ in 0..5 {
            map.autotile(&registry, &mut rng);
        }
        let second: Vec<_> = map.tiles().map(|(_, _, tile)| tile.glyph).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let mut map = floor_map(3, 3);
        let before = map.clone();

        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MIN, i32::MAX)] {
            assert!(map.get(x, y).is_none());
            assert!(map.set(x, y, Tile::of(WALL)).is_none());
            assert!(map.clear(x, y).is_none());
        }

        assert_eq!(map, before);
    }

    #[test]
    fn unknown_types_are_left_untouched() {
        let registry = registry();
        let mut rng = Rng::seeded(5);
        let mut map = TileMap::new(2, 1);
        map.set(0, 0, Tile::of(77));
        map.set(1, 0, Tile::of(77));

        map.autotile(&registry, &mut rng);

        assert!(map.tiles().all(|(_, _, tile)| tile.glyph.is_none()));
    }

    #[test]
    fn region_only_touches_requested_bounds() {
        let registry = registry();
        let mut rng = Rng::seeded(5);
        let mut map = TileMap::new(6, 1);
        for x in 0..6 {
            map.set(x, 0, Tile::of(WALL));
        }

        map.autotile_region(0, 0, 1, 0, &registry, &mut rng);

        assert_eq!(map.get(0, 0).unwrap().glyph, Some(32 + 0b0100));
        assert_eq!(map.get(1, 0).unwrap().glyph, Some(32 + 0b0101));
        assert_eq!(map.get(4, 0).unwrap().glyph, None);
    }

    #[test]
    fn cycling_a_tile_refreshes_its_neighbours() {
        let registry = registry();
        let mut rng = Rng::seeded(5);
        let mut map = floor_map(3, 1);
        map.set(0, 0, Tile::of(WALL));
        map.autotile(&registry, &mut rng);
        assert_eq!(map.get(0, 0).unwrap().glyph, Some(32));

        // Floor -> Water -> Wall
        map.cycle_tile(1, 0, 3, &registry, &mut rng);
        let kind = map.cycle_tile(1, 0, 3, &registry, &mut rng);

        assert_eq!(kind, Some(TileTypeId(WALL)));
        assert_eq!(map.get(0, 0).unwrap().glyph, Some(32 + 0b0100));
        assert_eq!(map.get(1, 0).unwrap().glyph, Some(32 + 0b0001));
    }
}
