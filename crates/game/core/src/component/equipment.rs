use std::any::Any;
use std::str::FromStr;

use strum::IntoEnumIterator;

use super::{Actor, Component, Requirement};
use crate::common::EntityId;
use crate::entity::{Entity, Params};
use crate::error::ConfigError;
use crate::registry::Registry;

/// Equipment slots in display order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    #[default]
    LeftHand,
    RightHand,
    Consumable,
    Castable,
}

impl EquipmentSlot {
    const fn index(self) -> usize {
        self as usize
    }
}

/// How an item is used once equipped.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum EquipKind {
    Wield,
    Consume,
    Cast,
}

/// Items held by an actor, one per slot, with one slot selected.
#[derive(Debug, Default)]
pub struct Equipment {
    slots: [Option<Entity>; <EquipmentSlot as strum::EnumCount>::COUNT],
    selected: EquipmentSlot,
}

impl Equipment {
    pub const NAME: &'static str = "Equipment";
    const REQUIRES: &'static [Requirement] = &[Requirement::of::<Actor>(Actor::NAME)];

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the starting items named per slot, e.g. `{"left_hand": "Sword"}`.
    pub fn from_params(params: &Params, registry: &Registry) -> Result<Self, ConfigError> {
        let mut equipment = Self::new();
        for slot in EquipmentSlot::iter() {
            if let Some(type_id) = params.text(Self::NAME, slot.into())? {
                Self::check_nesting(registry, type_id, &mut Vec::new())?;
                equipment.slots[slot.index()] = Some(registry.create_entity(type_id)?);
            }
        }
        Ok(equipment)
    }

    /// Fails if building `type_id` would lead back to a type already on
    /// `path` through starting equipment.
    fn check_nesting(
        registry: &Registry,
        type_id: &str,
        path: &mut Vec<String>,
    ) -> Result<(), ConfigError> {
        if path.iter().any(|seen| seen == type_id) {
            path.push(type_id.to_string());
            return Err(ConfigError::EquipmentCycle(path.join(" -> ")));
        }

        let resolved = registry.entities.resolve(type_id)?;
        let Some(params) = resolved.component(Self::NAME) else {
            return Ok(());
        };
        path.push(type_id.to_string());
        for slot in EquipmentSlot::iter() {
            if let Some(item) = params.text(Self::NAME, slot.into())? {
                Self::check_nesting(registry, item, path)?;
            }
        }
        path.pop();
        Ok(())
    }

    pub fn selected_slot(&self) -> EquipmentSlot {
        self.selected
    }

    pub fn select_slot(&mut self, slot: EquipmentSlot) {
        self.selected = slot;
    }

    pub fn item(&self, slot: EquipmentSlot) -> Option<&Entity> {
        self.slots[slot.index()].as_ref()
    }

    pub fn selected_item(&self) -> Option<&Entity> {
        self.item(self.selected)
    }

    pub fn items(&self) -> impl Iterator<Item = (EquipmentSlot, &Entity)> {
        EquipmentSlot::iter().filter_map(|slot| self.item(slot).map(|item| (slot, item)))
    }

    /// Default slot for an item, or `None` if it cannot be equipped.
    ///
    /// Wielded items go to the left hand unless it is taken.
    pub fn slot_for_item(&self, item: &Entity) -> Option<EquipmentSlot> {
        if !item.has::<Holdable>() {
            return None;
        }
        let slot = match item.get::<Equipable>()?.kind {
            EquipKind::Consume => EquipmentSlot::Consumable,
            EquipKind::Cast => EquipmentSlot::Castable,
            EquipKind::Wield if self.item(EquipmentSlot::LeftHand).is_none() => {
                EquipmentSlot::LeftHand
            }
            EquipKind::Wield => EquipmentSlot::RightHand,
        };
        Some(slot)
    }

    /// Equips an item in its default slot, returning whatever it displaced.
    ///
    /// Items that are not holdable and equipable are handed back as `Err`.
    pub fn equip(&mut self, item: Entity) -> Result<Option<Entity>, Entity> {
        let Some(slot) = self.slot_for_item(&item) else {
            return Err(item);
        };
        let previous = self.unequip(slot);
        self.slots[slot.index()] = Some(item);
        Ok(previous)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Entity> {
        self.slots[slot.index()].take()
    }

    /// Slot currently holding the item with `id`.
    pub fn slot_of(&self, id: EntityId) -> Option<EquipmentSlot> {
        self.items()
            .find_map(|(slot, item)| (item.id() == id).then_some(slot))
    }
}

impl Component for Equipment {
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

/// Something that can be carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holdable {
    pub weight: u32,
}

impl Holdable {
    pub const NAME: &'static str = "Holdable";

    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let weight = params.uint_or_bare(Self::NAME, "weight")?.unwrap_or(0);
        Ok(Self { weight })
    }
}

impl Component for Holdable {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Something that can occupy an equipment slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equipable {
    pub kind: EquipKind,
}

impl Equipable {
    pub const NAME: &'static str = "Equipable";
    const REQUIRES: &'static [Requirement] = &[Requirement::of::<Holdable>(Holdable::NAME)];

    pub fn new(kind: EquipKind) -> Self {
        Self { kind }
    }

    /// Accepts `"wield"` or `{"kind": "wield"}`.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let kind = match params {
            Params::Text(kind) => kind.as_str(),
            other => other
                .text(Self::NAME, "kind")?
                .ok_or_else(|| ConfigError::invalid_params(Self::NAME, "missing \"kind\""))?,
        };
        EquipKind::from_str(kind)
            .map(Self::new)
            .map_err(|_| ConfigError::invalid_params(Self::NAME, format!("unknown kind \"{kind}\"")))
    }
}

impl Component for Equipable {
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

/// An item with a limited number of uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Consumable {
    uses: u32,
    max_uses: u32,
}

impl Consumable {
    pub const NAME: &'static str = "Consumable";
    const REQUIRES: &'static [Requirement] = &[Requirement::of::<Equipable>(Equipable::NAME)];

    pub fn new(uses: u32) -> Self {
        Self {
            uses,
            max_uses: uses,
        }
    }

    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let uses = params.uint_or_bare(Self::NAME, "uses")?.unwrap_or(1);
        Ok(Self::new(uses))
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn max_uses(&self) -> u32 {
        self.max_uses
    }

    /// Spends one use; `false` once exhausted.
    pub fn consume(&mut self) -> bool {
        if self.uses == 0 {
            return false;
        }
        self.uses -= 1;
        true
    }
}

impl Component for Consumable {
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
