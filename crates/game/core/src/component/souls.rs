use std::any::Any;

use super::{Actor, Component, Requirement};
use crate::entity::Params;
use crate::error::ConfigError;

/// Soul currency carried by an actor and paid out to its killer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Souls {
    value: u32,
}

impl Souls {
    pub const NAME: &'static str = "Souls";
    const REQUIRES: &'static [Requirement] = &[Requirement::of::<Actor>(Actor::NAME)];

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let value = params.uint_or_bare(Self::NAME, "value")?.unwrap_or(0);
        Ok(Self::new(value))
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value;
    }

    pub fn add(&mut self, amount: u32) {
        self.value = self.value.saturating_add(amount);
    }

    /// Empties the purse, returning what it held.
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.value)
    }
}

impl Component for Souls {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn requires(&self) -> &'static [Requirement] {
        Self::REQUIRES
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
