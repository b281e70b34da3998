use std::any::Any;

use super::{Component, Event};
use crate::behaviour::Behaviour;
use crate::common::EntityId;
use crate::entity::Params;
use crate::error::ConfigError;
use crate::registry::Registry;

/// Name and outcome of the last action an actor performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviousAction {
    pub name: &'static str,
    pub succeeded: bool,
}

/// Marks an entity as turn-taking and owns its behaviour.
///
/// The scheduler borrows the behaviour out with [`Actor::take_behaviour`]
/// while it decides, and puts it back afterwards.
#[derive(Debug)]
pub struct Actor {
    behaviour: Option<Box<dyn Behaviour>>,
    owner: Option<EntityId>,
    previous: Option<PreviousAction>,
}

impl Actor {
    pub const NAME: &'static str = "Actor";

    pub fn new(behaviour: Box<dyn Behaviour>) -> Self {
        Self {
            behaviour: Some(behaviour),
            owner: None,
            previous: None,
        }
    }

    /// Accepts either a bare behaviour id (`"Wander"`) or
    /// `{"behaviour": "Wander", "params": ...}`.
    pub fn from_params(params: &Params, registry: &Registry) -> Result<Self, ConfigError> {
        let behaviour = match params {
            Params::Text(id) => registry.create_behaviour(id, &Params::None)?,
            Params::Map(entries) => {
                let id = params
                    .text(Self::NAME, "behaviour")?
                    .ok_or_else(|| ConfigError::invalid_params(Self::NAME, "missing \"behaviour\""))?;
                let nested = entries.get("params").cloned().unwrap_or_default();
                registry.create_behaviour(id, &nested)?
            }
            other => {
                return Err(ConfigError::invalid_params(
                    Self::NAME,
                    format!("expected a behaviour id, found {other:?}"),
                ));
            }
        };
        Ok(Self::new(behaviour))
    }

    pub fn behaviour(&self) -> Option<&dyn Behaviour> {
        self.behaviour.as_deref()
    }

    pub fn behaviour_mut(&mut self) -> Option<&mut (dyn Behaviour + 'static)> {
        self.behaviour.as_deref_mut()
    }

    pub fn take_behaviour(&mut self) -> Option<Box<dyn Behaviour>> {
        self.behaviour.take()
    }

    pub fn restore_behaviour(&mut self, behaviour: Box<dyn Behaviour>) {
        self.behaviour = Some(behaviour);
    }

    /// Replaces the behaviour, rebinding if the actor is attached.
    pub fn set_behaviour(&mut self, mut behaviour: Box<dyn Behaviour>) {
        if let Some(mut old) = self.behaviour.take() {
            old.unbind();
        }
        if let Some(owner) = self.owner {
            behaviour.bind(owner);
        }
        self.behaviour = Some(behaviour);
    }

    pub fn is_interactive(&self) -> bool {
        self.behaviour
            .as_ref()
            .is_some_and(|behaviour| behaviour.is_interactive())
    }

    pub fn previous_action(&self) -> Option<PreviousAction> {
        self.previous
    }
}

impl Component for Actor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn on_attach(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    fn on_enter(&mut self) {
        if let (Some(behaviour), Some(owner)) = (self.behaviour.as_mut(), self.owner) {
            behaviour.bind(owner);
        }
    }

    fn on_exit(&mut self) {
        if let Some(behaviour) = self.behaviour.as_mut() {
            behaviour.unbind();
        }
    }

    fn on_event(&mut self, event: &Event) {
        if let Event::AfterAction { action, succeeded } = *event {
            self.previous = Some(PreviousAction {
                name: action,
                succeeded,
            });
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
