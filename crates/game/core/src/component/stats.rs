use std::any::Any;

use super::{Actor, Component, Event, Requirement};
use crate::entity::Params;
use crate::error::ConfigError;

/// Hit points and stamina, each clamped to `[0, max]`.
///
/// Stamina regenerates by `stamina_regen` after every turn. Hit point
/// depletion is reported to the caller, which owns the death side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    hitpoints: u32,
    max_hitpoints: u32,
    stamina: u32,
    max_stamina: u32,
    stamina_regen: u32,
}

impl Stats {
    pub const NAME: &'static str = "Stats";
    const REQUIRES: &'static [Requirement] = &[Requirement::of::<Actor>(Actor::NAME)];

    /// Both values start full.
    pub fn new(hitpoints: u32, stamina: u32) -> Self {
        Self {
            hitpoints,
            max_hitpoints: hitpoints,
            stamina,
            max_stamina: stamina,
            stamina_regen: 0,
        }
    }

    pub fn with_regen(mut self, stamina_regen: u32) -> Self {
        self.stamina_regen = stamina_regen;
        self
    }

    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let hitpoints = params.uint(Self::NAME, "hitpoints")?.unwrap_or(1);
        let stamina = params.uint(Self::NAME, "stamina")?.unwrap_or(0);
        let regen = params.uint(Self::NAME, "stamina_regen")?.unwrap_or(0);
        Ok(Self::new(hitpoints, stamina).with_regen(regen))
    }

    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    pub fn max_hitpoints(&self) -> u32 {
        self.max_hitpoints
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> u32 {
        self.max_stamina
    }

    pub fn stamina_regen(&self) -> u32 {
        self.stamina_regen
    }

    pub fn is_dead(&self) -> bool {
        self.hitpoints == 0
    }

    /// Sets hit points, returning `true` if this transition depleted them.
    pub fn set_hitpoints(&mut self, value: i64) -> bool {
        let was_alive = self.hitpoints > 0;
        self.hitpoints = clamp(value, self.max_hitpoints);
        was_alive && self.hitpoints == 0
    }

    pub fn adjust_hitpoints(&mut self, amount: i64) -> bool {
        self.set_hitpoints(i64::from(self.hitpoints) + amount)
    }

    pub fn set_stamina(&mut self, value: i64) {
        self.stamina = clamp(value, self.max_stamina);
    }

    pub fn adjust_stamina(&mut self, amount: i64) {
        self.set_stamina(i64::from(self.stamina) + amount);
    }
}

fn clamp(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

impl Component for Stats {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn requires(&self) -> &'static [Requirement] {
        Self::REQUIRES
    }

    fn on_event(&mut self, event: &Event) {
        if *event == Event::AfterTurn && self.stamina_regen > 0 {
            self.adjust_stamina(i64::from(self.stamina_regen));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_clamped() {
        let mut stats = Stats::new(5, 3);

        assert!(!stats.adjust_hitpoints(10));
        assert_eq!(stats.hitpoints(), 5);

        stats.adjust_stamina(-10);
        assert_eq!(stats.stamina(), 0);
    }

    #[test]
    fn depletion_is_reported_once() {
        let mut stats = Stats::new(2, 0);

        assert!(!stats.adjust_hitpoints(-1));
        assert!(stats.adjust_hitpoints(-5));
        assert!(stats.is_dead());
        assert!(!stats.adjust_hitpoints(-1));
    }

    #[test]
    fn stamina_regenerates_after_turn() {
        let mut stats = Stats::new(1, 3).with_regen(1);
        stats.set_stamina(0);

        stats.on_event(&Event::BeforeTurn);
        assert_eq!(stats.stamina(), 0);

        for _ in 0..5 {
            stats.on_event(&Event::AfterTurn);
        }
        assert_eq!(stats.stamina(), 3);
    }
}
