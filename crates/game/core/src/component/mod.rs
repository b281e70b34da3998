//! Components: attachable capabilities of an entity.
//!
//! Components are trait objects built by string id through the
//! [`ComponentRegistry`]. Each declares the components it depends on as a
//! static [`Requirement`] list, checked when it is attached.
mod actor;
mod describe;
mod equipment;
mod event;
mod registry;
mod souls;
mod stats;

pub use actor::{Actor, PreviousAction};
pub use describe::Describe;
pub use equipment::{Consumable, EquipKind, Equipable, Equipment, EquipmentSlot, Holdable};
pub use event::Event;
pub use registry::{ComponentFactory, ComponentRegistry};
pub use souls::Souls;
pub use stats::Stats;

use std::any::{Any, TypeId};
use std::fmt;

use crate::common::EntityId;

/// A capability attached to exactly one entity.
pub trait Component: Any + Send + fmt::Debug {
    /// Registry id, also used in diagnostics.
    fn name(&self) -> &'static str;

    /// Components that must already be attached.
    fn requires(&self) -> &'static [Requirement] {
        &[]
    }

    /// Called once when attached, with the owning entity's id.
    fn on_attach(&mut self, _owner: EntityId) {}

    fn on_enter(&mut self) {}

    fn on_exit(&mut self) {}

    fn on_event(&mut self, _event: &Event) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A dependency on another component type, named for error messages.
#[derive(Clone, Copy)]
pub struct Requirement {
    pub name: &'static str,
    pub type_id: fn() -> TypeId,
}

impl Requirement {
    pub const fn of<T: Component>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>,
        }
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
