use std::collections::BTreeMap;
use std::fmt;

use super::{
    Actor, Component, Consumable, Describe, Equipable, Equipment, Holdable, Souls, Stats,
};
use crate::entity::Params;
use crate::error::ConfigError;
use crate::registry::Registry;

/// Builds a component from its data-table params.
///
/// The full [`Registry`] is passed so factories can build nested entities
/// (equipment items) or behaviours (actors).
pub type ComponentFactory = fn(&Params, &Registry) -> Result<Box<dyn Component>, ConfigError>;

/// Component constructors keyed by id.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: BTreeMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every component this crate defines.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Actor::NAME, |params, registry| {
            Ok(Box::new(Actor::from_params(params, registry)?))
        });
        registry.register(Stats::NAME, |params, _| Ok(Box::new(Stats::from_params(params)?)));
        registry.register(Equipment::NAME, |params, registry| {
            Ok(Box::new(Equipment::from_params(params, registry)?))
        });
        registry.register(Holdable::NAME, |params, _| {
            Ok(Box::new(Holdable::from_params(params)?))
        });
        registry.register(Equipable::NAME, |params, _| {
            Ok(Box::new(Equipable::from_params(params)?))
        });
        registry.register(Consumable::NAME, |params, _| {
            Ok(Box::new(Consumable::from_params(params)?))
        });
        registry.register(Souls::NAME, |params, _| Ok(Box::new(Souls::from_params(params)?)));
        registry.register(Describe::NAME, |params, _| {
            Ok(Box::new(Describe::from_params(params)?))
        });
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, factory: ComponentFactory) {
        self.factories.insert(id.into(), factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(
        &self,
        id: &str,
        params: &Params,
        registry: &Registry,
    ) -> Result<Box<dyn Component>, ConfigError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ConfigError::UnknownComponent(id.to_string()))?;
        factory(params, registry)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
