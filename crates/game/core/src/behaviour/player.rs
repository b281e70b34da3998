use std::any::Any;

use super::{Behaviour, Decision};
use crate::action::BoxedAction;
use crate::common::EntityId;

/// Behaviour driven from outside the engine.
///
/// Input handling stores one pending action with
/// [`PlayerBehaviour::set_next_action`]; the scheduler takes it, leaving the
/// slot empty until the next input.
#[derive(Debug, Default)]
pub struct PlayerBehaviour {
    pending: Option<BoxedAction>,
    entity: Option<EntityId>,
}

impl PlayerBehaviour {
    pub const NAME: &'static str = "Player";

    /// Replaces any action still waiting to be taken.
    pub fn set_next_action(&mut self, action: BoxedAction) {
        self.pending = Some(action);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Behaviour for PlayerBehaviour {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bind(&mut self, entity: EntityId) {
        self.entity = Some(entity);
    }

    fn unbind(&mut self) {
        self.entity = None;
        self.pending = None;
    }

    fn bound(&self) -> Option<EntityId> {
        self.entity
    }

    fn next_action(&mut self, _decision: &mut Decision<'_>) -> Option<BoxedAction> {
        self.pending.take()
    }

    fn is_interactive(&self) -> bool {
        true
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
    use crate::action::Rest;
    use crate::entity::Entity;
    use crate::random::Rng;
    use crate::tile::TileMap;

    #[test]
    fn pending_action_is_taken_once() {
        let entity = Entity::new("Player");
        let map = TileMap::new(1, 1);
        let mut rng = Rng::seeded(1);
        let mut player = PlayerBehaviour::default();
        let mut decision = Decision {
            entity: &entity,
            map: &map,
            rng: &mut rng,
        };

        assert!(player.next_action(&mut decision).is_none());

        player.set_next_action(Box::new(Rest));
        assert!(player.has_pending());
        assert!(player.next_action(&mut decision).is_some());
        assert!(player.next_action(&mut decision).is_none());
    }
}
