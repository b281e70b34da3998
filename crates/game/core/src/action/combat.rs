use tracing::debug;

use super::{Action, ActionError, ActionResult};
use crate::common::EntityId;
use crate::component::{Describe, Equipment, Event, Souls};
use crate::world::World;

/// Melee attack with the attacker's selected item.
///
/// Damage and stamina cost are flat values from the game config; the
/// selected weapon only gates whether an attack is possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attack {
    pub target: EntityId,
}

impl Action for Attack {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn apply(&self, actor: EntityId, world: &mut World) -> Result<ActionResult, ActionError> {
        let attacker = world
            .entity(actor)
            .ok_or(ActionError::ActorNotSpawned(actor))?;
        let armed = attacker
            .get::<Equipment>()
            .and_then(Equipment::selected_item)
            .is_some();
        if !armed {
            return Ok(ActionResult::fail("You have nothing to attack with"));
        }

        let Some(target) = world.entity(self.target) else {
            return Ok(ActionResult::fail("There's nothing to attack"));
        };
        let name = target
            .get::<Describe>()
            .map_or_else(|| target.kind().to_string(), |describe| describe.name.clone());

        let damage = i64::from(world.config().attack_damage);
        let cost = i64::from(world.config().attack_stamina_cost);

        world.send(actor, Event::BeforeAttack { target: self.target });
        world.send(self.target, Event::BeforeAttacked { attacker: actor });

        world.change_stamina(actor, -cost);
        let killed = world
            .change_hitpoints(self.target, -damage)
            .is_some_and(|(_, depleted)| depleted);

        world.send(actor, Event::AfterAttack { target: self.target });
        world.send(self.target, Event::AfterAttacked { attacker: actor });

        if !killed {
            return Ok(ActionResult::succeed_with(format!("You hit the {name}")));
        }

        world.send(actor, Event::Killed { victim: self.target });
        let souls = world
            .find_mut(self.target)
            .and_then(|target| target.get_mut::<Souls>())
            .map(Souls::take)
            .unwrap_or_default();
        if let Some(purse) = world
            .entity_mut(actor)
            .and_then(|attacker| attacker.get_mut::<Souls>())
        {
            purse.add(souls);
        }
        debug!(%actor, target = %self.target, souls, "kill");

        Ok(ActionResult::succeed_with(format!("You killed the {name}")))
    }
}
