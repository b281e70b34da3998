//! Actions and the result protocol.
//!
//! An [`Action`] is one attempted change to the world. Performing it yields
//! an [`ActionResult`]: success, an ordinary failure, or an alternate action
//! the scheduler should attempt instead. Alternates let a high-level intent
//! (walk north) settle into a concrete effect (move, attack) based on what
//! is in the way when it resolves.
//!
//! [`ActionError`] is reserved for wiring mistakes, such as an action whose
//! required component the performer does not have.

mod combat;
mod error;
mod movement;

pub use combat::Attack;
pub use error::ActionError;
pub use movement::{Direction, Dodge, MoveBy, MoveTo, Rest, Walk};

use std::fmt;

use crate::common::EntityId;
use crate::component::Requirement;
use crate::world::World;

pub type BoxedAction = Box<dyn Action>;

pub trait Action: Send + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Components the performer must have.
    fn requires(&self) -> &'static [Requirement] {
        &[]
    }

    /// Action-specific logic. Call [`Action::perform`] instead, which checks
    /// requirements first.
    fn apply(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError>;

    fn perform(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError> {
        let entity = world
            .entity(actor)
            .ok_or(ActionError::ActorNotSpawned(actor))?;

        if let Some(missing) = self
            .requires()
            .iter()
            .find(|requirement| !entity.has_type((requirement.type_id)()))
        {
            return Err(ActionError::MissingComponent {
                entity: actor,
                action: self.name(),
                component: missing.name,
            });
        }

        self.apply(actor, world)
    }
}

/// Outcome of performing an action.
#[derive(Debug)]
pub enum ActionResult {
    Succeeded { message: Option<String> },
    Failed { message: Option<String> },
    /// Not final: the scheduler should attempt this action instead.
    Alternate(BoxedAction),
}

impl ActionResult {
    pub fn succeed() -> Self {
        Self::Succeeded { message: None }
    }

    pub fn succeed_with(message: impl Into<String>) -> Self {
        Self::Succeeded {
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Failed {
            message: Some(message.into()),
        }
    }

    pub fn fail_silently() -> Self {
        Self::Failed { message: None }
    }

    pub fn alternate(action: impl Action + 'static) -> Self {
        Self::Alternate(Box::new(action))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn is_alternate(&self) -> bool {
        matches!(self, Self::Alternate(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded { message } | Self::Failed { message } => message.as_deref(),
            Self::Alternate(_) => None,
        }
    }

    pub fn alternate_action(&self) -> Option<&dyn Action> {
        match self {
            Self::Alternate(action) => Some(action.as_ref()),
            _ => None,
        }
    }
}

/// An action together with the chain of actions it replaced.
///
/// The scheduler wraps each alternate around the attempt it came from, so
/// a stuck chain can be reported in full.
#[derive(Debug)]
pub struct Attempt {
    pub action: BoxedAction,
    pub parent: Option<Box<Attempt>>,
}

impl Attempt {
    pub fn new(action: BoxedAction) -> Self {
        Self {
            action,
            parent: None,
        }
    }

    /// Records `action` as an alternate of this attempt.
    pub fn alternate(self, action: BoxedAction) -> Self {
        Self {
            action,
            parent: Some(Box::new(self)),
        }
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Action names from the original intent to this attempt.
    pub fn lineage(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ancestors().map(|attempt| attempt.action.name()).collect();
        names.reverse();
        names
    }

    fn ancestors(&self) -> impl Iterator<Item = &Attempt> {
        std::iter::successors(Some(self), |attempt| attempt.parent.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_remember_their_lineage() {
        let walk = Attempt::new(Box::new(Walk(Direction::North)));
        let attempt = walk.alternate(Box::new(MoveTo { x: 1, y: 1 }));

        assert_eq!(attempt.depth(), 2);
        assert_eq!(attempt.lineage(), ["Walk", "MoveTo"]);
        assert_eq!(attempt.parent.as_ref().map(|parent| parent.action.name()), Some("Walk"));
    }

    #[test]
    fn results_expose_messages() {
        assert!(ActionResult::succeed().is_ok());
        assert_eq!(ActionResult::fail("no").message(), Some("no"));
        assert!(ActionResult::alternate(Rest).is_alternate());
        assert_eq!(ActionResult::fail_silently().message(), None);
    }
}
