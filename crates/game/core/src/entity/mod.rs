//! Entities and their data-driven types.
//!
//! An [`Entity`] is a bag of components plus the handful of display fields
//! a renderer needs. Its shape comes from an [`EntityType`] resolved through
//! multi-parent inheritance (see [`inheritance`]).
pub mod inheritance;
mod params;
mod types;

pub use inheritance::ResolvedType;
pub use params::Params;
pub use types::{Attributes, EntityType, EntityTypeRegistry};

use std::any::{Any, TypeId};
use std::collections::BTreeSet;

use crate::common::{EntityId, Position};
use crate::component::{Component, Event};
use crate::error::ConfigError;

#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    kind: String,
    ancestors: BTreeSet<String>,
    pub position: Position,
    pub z: i32,
    pub glyph: u32,
    pub color: u32,
    components: Vec<Box<dyn Component>>,
    active: bool,
    spawned: bool,
}

impl Entity {
    /// Creates a bare entity with no components.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            id: EntityId::next(),
            ancestors: BTreeSet::from([kind.clone()]),
            kind,
            position: Position::ORIGIN,
            z: 0,
            glyph: 0,
            color: 0,
            components: Vec::new(),
            active: false,
            spawned: false,
        }
    }

    /// Creates a component-less entity carrying the resolved type's
    /// attributes. Components are attached separately by the registry.
    pub fn from_resolved(resolved: &ResolvedType) -> Self {
        let mut entity = Self::new(resolved.id.clone());
        entity.ancestors = resolved.ancestors.iter().cloned().collect();
        entity.glyph = resolved.attributes.glyph.unwrap_or_default();
        entity.color = resolved.attributes.color.unwrap_or_default();
        entity.z = resolved.attributes.z.unwrap_or_default();
        entity
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Resolved type id.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// True when the entity's type is `type_name` or inherits from it.
    pub fn is(&self, type_name: &str) -> bool {
        self.ancestors.contains(type_name)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    pub(crate) fn set_spawned(&mut self, spawned: bool) {
        self.spawned = spawned;
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn distance(&self, other: &Entity) -> f64 {
        self.position.distance(other.position)
    }

    /// Attaches a component after checking its requirements.
    ///
    /// A component whose required components are not already attached is
    /// rejected and the entity is left unchanged.
    pub fn add(&mut self, mut component: Box<dyn Component>) -> Result<(), ConfigError> {
        if let Some(missing) = component
            .requires()
            .iter()
            .find(|requirement| !self.has_type((requirement.type_id)()))
        {
            return Err(ConfigError::MissingRequirement {
                component: component.name(),
                required: missing.name,
            });
        }

        component.on_attach(self.id);
        if self.active {
            component.on_enter();
        }
        self.components.push(component);
        Ok(())
    }

    /// Detaches the first component of type `T`.
    pub fn remove<T: Component>(&mut self) -> Option<Box<dyn Component>> {
        let index = self.position_of(TypeId::of::<T>())?;
        let mut component = self.components.remove(index);
        if self.active {
            component.on_exit();
        }
        Some(component)
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| component.as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<T>())
    }

    pub fn has<T: Component>(&self) -> bool {
        self.has_type(TypeId::of::<T>())
    }

    pub fn has_type(&self, type_id: TypeId) -> bool {
        self.position_of(type_id).is_some()
    }

    fn position_of(&self, type_id: TypeId) -> Option<usize> {
        self.components
            .iter()
            .position(|component| Any::type_id(component.as_any()) == type_id)
    }

    /// Names of attached components, in attach order.
    pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(|component| component.name())
    }

    /// Delivers an event to every component in attach order.
    pub fn send(&mut self, event: impl Into<Event>) {
        let event = event.into();
        for component in &mut self.components {
            component.on_event(&event);
        }
    }

    pub fn on_enter(&mut self) {
        self.active = true;
        for component in &mut self.components {
            component.on_enter();
        }
    }

    pub fn on_exit(&mut self) {
        self.active = false;
        for component in &mut self.components {
            component.on_exit();
        }
    }

    pub fn on_before_turn(&mut self) {
        self.send(Event::BeforeTurn);
    }

    pub fn on_after_turn(&mut self) {
        self.send(Event::AfterTurn);
    }

    pub fn on_before_action(&mut self, action: &'static str) {
        self.send(Event::BeforeAction { action });
    }

    pub fn on_after_action(&mut self, action: &'static str, succeeded: bool) {
        self.send(Event::AfterAction { action, succeeded });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Actor, Holdable, Souls, Stats};
    use crate::behaviour::RestBehaviour;

    fn actor() -> Box<dyn Component> {
        Box::new(Actor::new(Box::new(RestBehaviour::default())))
    }

    #[test]
    fn rejects_components_with_missing_requirements() {
        let mut entity = Entity::new("Rat");

        let error = entity.add(Box::new(Stats::new(3, 3))).unwrap_err();

        assert_eq!(
            error,
            ConfigError::MissingRequirement {
                component: "Stats",
                required: "Actor",
            }
        );
        assert!(!entity.has::<Stats>());
        assert_eq!(error.to_string(), "can't add Stats to an entity without Actor");
    }

    #[test]
    fn typed_lookup_finds_attached_components() {
        let mut entity = Entity::new("Rat");
        entity.add(actor()).unwrap();
        entity.add(Box::new(Souls::new(4))).unwrap();

        assert!(entity.has::<Actor>());
        assert!(!entity.has::<Holdable>());
        assert_eq!(entity.get::<Souls>().map(Souls::value), Some(4));

        entity.get_mut::<Souls>().unwrap().add(2);
        assert_eq!(entity.get::<Souls>().map(Souls::value), Some(6));
        assert_eq!(entity.component_names().collect::<Vec<_>>(), ["Actor", "Souls"]);
    }

    #[test]
    fn events_reach_every_component() {
        let mut entity = Entity::new("Rat");
        entity.add(actor()).unwrap();
        entity.add(Box::new(Stats::new(5, 4).with_regen(2))).unwrap();
        entity.get_mut::<Stats>().unwrap().adjust_stamina(-4);

        entity.send("after-turn");

        assert_eq!(entity.get::<Stats>().map(Stats::stamina), Some(2));
    }

    #[test]
    fn components_added_while_active_are_entered() {
        let mut entity = Entity::new("Rat");
        entity.on_enter();
        entity.add(actor()).unwrap();

        let bound = entity
            .get::<Actor>()
            .and_then(Actor::behaviour)
            .and_then(|behaviour| behaviour.bound());
        assert_eq!(bound, Some(entity.id()));

        entity.remove::<Actor>().unwrap();
        assert!(!entity.has::<Actor>());
    }
}
