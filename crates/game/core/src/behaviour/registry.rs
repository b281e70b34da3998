use std::collections::BTreeMap;
use std::fmt;

use super::{Behaviour, Patrol, PlayerBehaviour, RestBehaviour, Wander};
use crate::entity::Params;
use crate::error::ConfigError;

pub type BehaviourFactory = fn(&Params) -> Result<Box<dyn Behaviour>, ConfigError>;

/// Behaviour constructors keyed by id.
#[derive(Clone, Default)]
pub struct BehaviourRegistry {
    factories: BTreeMap<String, BehaviourFactory>,
}

impl BehaviourRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RestBehaviour::NAME, |_| Ok(Box::new(RestBehaviour::default())));
        registry.register(Wander::NAME, |params| Ok(Box::new(Wander::from_params(params)?)));
        registry.register(Patrol::NAME, |params| Ok(Box::new(Patrol::from_params(params)?)));
        registry.register(PlayerBehaviour::NAME, |_| {
            Ok(Box::new(PlayerBehaviour::default()))
        });
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, factory: BehaviourFactory) {
        self.factories.insert(id.into(), factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn create(&self, id: &str, params: &Params) -> Result<Box<dyn Behaviour>, ConfigError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ConfigError::UnknownBehaviour(id.to_string()))?;
        factory(params)
    }
}

impl fmt::Debug for BehaviourRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
