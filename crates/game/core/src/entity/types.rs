use std::collections::BTreeMap;

use super::Params;
use super::inheritance::{self, ResolvedType};
use crate::error::ConfigError;

/// Display attributes an entity type may override.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    pub glyph: Option<u32>,
    pub color: Option<u32>,
    pub z: Option<i32>,
}

impl Attributes {
    /// Overlays `other` on top of `self`; set fields in `other` win.
    pub fn merge(&mut self, other: &Attributes) {
        self.glyph = other.glyph.or(self.glyph);
        self.color = other.color.or(self.color);
        self.z = other.z.or(self.z);
    }
}

/// Data-driven entity template.
///
/// `extends` names zero or more parent types. Components are kept in
/// declaration order because that order is the order they get attached in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityType {
    pub id: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "one_or_many")
    )]
    pub extends: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub glyph: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub z: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub components: Vec<(String, Params)>,
}

impl EntityType {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn extends<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn glyph(mut self, glyph: u32) -> Self {
        self.glyph = Some(glyph);
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    pub fn component(mut self, id: impl Into<String>, params: Params) -> Self {
        self.components.push((id.into(), params));
        self
    }

    pub fn attributes(&self) -> Attributes {
        Attributes {
            glyph: self.glyph,
            color: self.color,
            z: self.z,
        }
    }
}

#[cfg(feature = "serde")]
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(parent) => vec![parent],
        OneOrMany::Many(parents) => parents,
    })
}

/// Entity types keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityTypeRegistry {
    types: BTreeMap<String, EntityType>,
}

impl EntityTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) entity types.
    pub fn register(&mut self, types: impl IntoIterator<Item = EntityType>) {
        for entity_type in types {
            self.types.insert(entity_type.id.clone(), entity_type);
        }
    }

    pub fn get(&self, id: &str) -> Option<&EntityType> {
        self.types.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Flattens `id` and its ancestors into one effective type.
    pub fn resolve(&self, id: &str) -> Result<ResolvedType, ConfigError> {
        inheritance::resolve(self, id)
    }
}
