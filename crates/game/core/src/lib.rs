//! Turn-based roguelike engine core.
//!
//! `game-core` owns the rules of the simulation: a tile grid with
//! autotiling, entities composed from data-driven components, actions that
//! resolve into results (or alternates), behaviours that pick actions, and
//! the [`World`] that schedules turns. All state mutation flows through
//! [`World::update`] and the actions it performs; rendering and input live
//! outside this crate.
pub mod action;
pub mod behaviour;
pub mod common;
pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod random;
pub mod registry;
pub mod tile;
pub mod world;

pub use action::{
    Action, ActionError, ActionResult, Attack, Attempt, BoxedAction, Direction, Dodge, MoveBy,
    MoveTo, Rest, Walk,
};
pub use behaviour::{
    Behaviour, BehaviourRegistry, Decision, Patrol, PatrolState, PlayerBehaviour, RestBehaviour,
    StateMachine, Wander,
};
pub use common::{EntityId, Position};
pub use component::{
    Actor, Component, ComponentRegistry, Consumable, Describe, EquipKind, Equipable, Equipment,
    EquipmentSlot, Event, Holdable, PreviousAction, Requirement, Souls, Stats,
};
pub use config::GameConfig;
pub use entity::{Attributes, Entity, EntityType, EntityTypeRegistry, Params, ResolvedType};
pub use error::{ConfigError, ErrorSeverity, GameError};
pub use random::{Dice, DiceError, Rng};
pub use registry::Registry;
pub use tile::{NeighbourMask, Tile, TileMap, TileRegistry, TileType, TileTypeId};
pub use world::{StepOutcome, World, WorldError, WorldEvent};
