use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a registered tile type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TileTypeId(pub u16);

impl fmt::Display for TileTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable descriptor shared by every tile of one kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileType {
    pub id: TileTypeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Base glyph. Variant and autotile offsets are added to it.
    pub glyph: u32,
    pub color: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walkable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub autotile: bool,
    /// Number of alternative glyphs following `glyph` in the font.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variants: u32,
}

impl TileType {
    pub fn new(id: u16, name: impl Into<String>, glyph: u32, color: u32) -> Self {
        Self {
            id: TileTypeId(id),
            name: name.into(),
            glyph,
            color,
            walkable: false,
            autotile: false,
            variants: 0,
        }
    }

    pub fn walkable(mut self) -> Self {
        self.walkable = true;
        self
    }

    pub fn autotiled(mut self) -> Self {
        self.autotile = true;
        self
    }

    pub fn with_variants(mut self, variants: u32) -> Self {
        self.variants = variants;
        self
    }
}

/// One cell of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileTypeId,
    /// Resolved glyph; `None` until autotiling (or an editor) assigns one.
    pub glyph: Option<u32>,
    pub color: Option<u32>,
}

impl Tile {
    pub const fn new(kind: TileTypeId) -> Self {
        Self {
            kind,
            glyph: None,
            color: None,
        }
    }

    pub const fn of(kind: u16) -> Self {
        Self::new(TileTypeId(kind))
    }
}

/// Registry of tile types keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileRegistry {
    types: BTreeMap<TileTypeId, TileType>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) tile types.
    pub fn register(&mut self, types: impl IntoIterator<Item = TileType>) {
        for tile_type in types {
            self.types.insert(tile_type.id, tile_type);
        }
    }

    pub fn get(&self, id: TileTypeId) -> Option<&TileType> {
        self.types.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
