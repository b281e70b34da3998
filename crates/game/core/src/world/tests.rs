use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::*;
use crate::action::{Attack, Dodge, MoveTo, Rest, Walk, Direction};
use crate::component::{Component, Souls};
use crate::entity::{EntityType, Params};
use crate::tile::{Tile, TileType};

const FLOOR: u16 = 0;
const WALL: u16 = 2;

fn registry() -> Arc<Registry> {
    let mut registry = Registry::with_builtins();
    registry.tiles.register([
        TileType::new(FLOOR, "Floor", 1, 8).walkable().with_variants(5),
        TileType::new(1, "Water", 16, 5).autotiled(),
        TileType::new(WALL, "Wall", 32, 9).autotiled(),
    ]);
    registry.entities.register([
        EntityType::new("Creature")
            .component("Actor", "Rest".into())
            .component("Stats", Params::map([("hitpoints", Params::Int(1))])),
        EntityType::new("Player")
            .extends(["Creature"])
            .component("Actor", "Player".into())
            .component(
                "Stats",
                Params::map([("hitpoints", Params::Int(3)), ("stamina", Params::Int(3))]),
            )
            .component("Equipment", Params::map([("left_hand", "Sword".into())]))
            .component("Souls", Params::Int(0)),
        EntityType::new("Rat")
            .extends(["Creature"])
            .component("Souls", Params::Int(5))
            .component("Describe", "Rat".into()),
        EntityType::new("Ghost")
            .component("Stats", Params::map([("hitpoints", Params::Int(0))]))
            .component("Souls", Params::Int(5)),
        EntityType::new("Statue").component("Actor", "Rest".into()),
        EntityType::new("Sword")
            .component("Holdable", Params::Int(2))
            .component("Equipable", "wield".into()),
    ]);
    Arc::new(registry)
}

/// 10x10 floor with a wall at (3, 2) and the player at (3, 3).
fn sandbox() -> (World, EntityId) {
    let mut world = World::new(GameConfig::default().with_seed(7), registry());
    world.map_mut().fill(Tile::of(FLOOR));
    world.map_mut().set(3, 2, Tile::of(WALL));
    world.autotile();
    let player = world.spawn_type("Player", Position::new(3, 3)).unwrap();
    (world, player)
}

fn stats(world: &World, id: EntityId) -> &Stats {
    world.find(id).and_then(|entity| entity.get::<Stats>()).unwrap()
}

#[derive(Debug)]
struct Ping(Arc<AtomicU32>);

#[derive(Debug)]
struct Pong(Arc<AtomicU32>);

impl Action for Ping {
    fn name(&self) -> &'static str {
        "Ping"
    }

    fn apply(&self, _actor: EntityId, _world: &mut World) -> Result<ActionResult, ActionError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(ActionResult::alternate(Pong(self.0.clone())))
    }
}

impl Action for Pong {
    fn name(&self) -> &'static str {
        "Pong"
    }

    fn apply(&self, _actor: EntityId, _world: &mut World) -> Result<ActionResult, ActionError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(ActionResult::alternate(Ping(self.0.clone())))
    }
}

#[derive(Debug, Default)]
struct TurnCounter {
    before: u32,
    after: u32,
}

impl Component for TurnCounter {
    fn name(&self) -> &'static str {
        "TurnCounter"
    }

    fn on_event(&mut self, event: &Event) {
        match event {
            Event::BeforeTurn => self.before += 1,
            Event::AfterTurn => self.after += 1,
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn alternating_pair_stops_after_max_tries() {
    let (mut world, player) = sandbox();
    let performed = Arc::new(AtomicU32::new(0));
    world
        .set_next_action(player, Box::new(Ping(performed.clone())))
        .unwrap();

    let outcome = world.update().unwrap();

    assert_eq!(outcome, StepOutcome::Completed { turn: 1 });
    assert_eq!(performed.load(Ordering::SeqCst), GameConfig::DEFAULT_MAX_ACTION_TRIES);
    let stuck = world
        .drain_events()
        .into_iter()
        .find_map(|event| match event {
            WorldEvent::ActorStuck { entity, tries, .. } => Some((entity, tries)),
            _ => None,
        });
    assert_eq!(stuck, Some((player, GameConfig::DEFAULT_MAX_ACTION_TRIES)));
}

#[test]
fn retry_bound_follows_config() {
    let mut world = World::new(GameConfig::default().with_max_action_tries(3), registry());
    let player = world.spawn_type("Player", Position::new(0, 0)).unwrap();
    let performed = Arc::new(AtomicU32::new(0));
    world
        .set_next_action(player, Box::new(Ping(performed.clone())))
        .unwrap();

    world.update().unwrap();

    assert_eq!(performed.load(Ordering::SeqCst), 3);
}

#[test]
fn moving_into_a_wall_fails_in_place() {
    let (mut world, player) = sandbox();

    let result = world.perform(player, &MoveTo { x: 3, y: 2 }).unwrap();

    assert!(!result.is_ok());
    assert_eq!(result.message(), Some("You can't move there"));
    assert_eq!(world.entity(player).unwrap().position, Position::new(3, 3));
}

#[test]
fn walking_into_a_wall_reports_and_waits_for_new_input() {
    let (mut world, player) = sandbox();
    world.set_next_action(player, Box::new(Walk(Direction::North))).unwrap();

    let outcome = world.update().unwrap();

    assert_eq!(outcome, StepOutcome::AwaitingInput { entity: player });
    assert!(world.drain_events().contains(&WorldEvent::Message {
        source: Some(player),
        text: "You can't move there".into(),
    }));
    assert_eq!(world.entity(player).unwrap().position, Position::new(3, 3));

    world.set_next_action(player, Box::new(Walk(Direction::South))).unwrap();
    assert_eq!(world.update().unwrap(), StepOutcome::Completed { turn: 1 });
    assert_eq!(world.entity(player).unwrap().position, Position::new(3, 4));
}

#[test]
fn moving_off_the_map_finds_nothing() {
    let (mut world, player) = sandbox();

    let result = world.perform(player, &MoveTo { x: -1, y: 3 }).unwrap();

    assert_eq!(result.message(), Some("There's nothing here!"));
}

#[test]
fn killing_transfers_souls() {
    let (mut world, player) = sandbox();
    let rat = world.spawn_type("Rat", Position::new(3, 4)).unwrap();

    let result = world.perform(player, &Attack { target: rat }).unwrap();

    assert_eq!(result.message(), Some("You killed the Rat"));
    assert!(world.entity(rat).is_none());
    assert_eq!(stats(&world, rat).hitpoints(), 0);
    let souls = |id| world.find(id).and_then(|e| e.get::<Souls>()).map(Souls::value);
    assert_eq!(souls(player), Some(5));
    assert_eq!(souls(rat), Some(0));
    assert_eq!(stats(&world, player).stamina(), 2);
}

#[test]
fn target_without_hitpoints_is_never_killed_again() {
    let (mut world, player) = sandbox();
    let ghost = world.spawn_type("Ghost", Position::new(3, 4)).unwrap();

    for _ in 0..2 {
        let result = world.perform(player, &Attack { target: ghost }).unwrap();
        assert_eq!(result.message(), Some("You hit the Ghost"));
    }

    assert!(world.entity(ghost).is_some());
    let souls = world.find(player).and_then(|e| e.get::<Souls>()).map(Souls::value);
    assert_eq!(souls, Some(0));
}

#[test]
fn surviving_target_is_only_hit() {
    let (mut world, player) = sandbox();
    let other = world.spawn_type("Player", Position::new(3, 4)).unwrap();

    let result = world.perform(player, &Attack { target: other }).unwrap();

    assert_eq!(result.message(), Some("You hit the Player"));
    assert_eq!(stats(&world, other).hitpoints(), 2);
}

#[test]
fn attacking_without_a_weapon_fails() {
    let (mut world, _) = sandbox();
    let rat = world.spawn_type("Rat", Position::new(5, 5)).unwrap();
    let victim = world.spawn_type("Rat", Position::new(5, 6)).unwrap();

    let result = world.perform(rat, &Attack { target: victim }).unwrap();

    assert_eq!(result.message(), Some("You have nothing to attack with"));
    assert!(world.entity(victim).is_some());
}

#[test]
fn walking_into_a_creature_attacks_it() {
    let (mut world, player) = sandbox();
    let rat = world.spawn_type("Rat", Position::new(3, 4)).unwrap();
    world.set_next_action(player, Box::new(Walk(Direction::South))).unwrap();

    assert_eq!(world.update().unwrap(), StepOutcome::Completed { turn: 1 });

    assert!(world.entity(rat).is_none());
    assert!(world.find(rat).is_none(), "remains are cleared when the turn ends");
    assert_eq!(world.entity(player).unwrap().position, Position::new(3, 3));
    let events = world.drain_events();
    assert!(events.contains(&WorldEvent::Message {
        source: Some(player),
        text: "You killed the Rat".into(),
    }));
    assert!(events.contains(&WorldEvent::Despawned {
        entity: rat,
        kind: "Rat".into(),
    }));
}

#[test]
fn dodge_without_stamina_degrades_to_walk() {
    let (mut world, player) = sandbox();
    world.change_stamina(player, -10);

    let result = world.perform(player, &Dodge(Direction::South)).unwrap();

    let alternate = result.alternate_action().map(|action| format!("{action:?}"));
    assert_eq!(alternate.as_deref(), Some("Walk(South)"));
    assert_eq!(stats(&world, player).stamina(), 0);
}

#[test]
fn dodge_with_stamina_covers_two_tiles() {
    let (mut world, player) = sandbox();

    let result = world.perform(player, &Dodge(Direction::South)).unwrap();

    let alternate = result.alternate_action().map(|action| format!("{action:?}"));
    assert_eq!(alternate.as_deref(), Some("MoveTo { x: 3, y: 5 }"));
    assert_eq!(stats(&world, player).stamina(), 2);
}

#[test]
fn dodge_into_a_wall_keeps_stamina_and_waits_for_input() {
    let (mut world, player) = sandbox();
    world.entity_mut(player).unwrap().position = Position::new(3, 4);
    world.set_next_action(player, Box::new(Dodge(Direction::North))).unwrap();

    let outcome = world.update().unwrap();

    assert_eq!(outcome, StepOutcome::AwaitingInput { entity: player });
    assert_eq!(stats(&world, player).stamina(), 3);
    assert_eq!(world.entity(player).unwrap().position, Position::new(3, 4));
    assert!(world.drain_events().contains(&WorldEvent::Message {
        source: Some(player),
        text: "You can't move there".into(),
    }));
}

#[test]
fn dodge_off_the_map_keeps_stamina() {
    let (mut world, player) = sandbox();
    world.entity_mut(player).unwrap().position = Position::new(0, 1);

    let result = world.perform(player, &Dodge(Direction::North)).unwrap();

    assert_eq!(result.message(), Some("There's nothing here!"));
    assert_eq!(stats(&world, player).stamina(), 3);
}

#[test]
fn actions_check_required_components() {
    let (mut world, _) = sandbox();
    let statue = world.spawn_type("Statue", Position::new(1, 1)).unwrap();

    let error = world.perform(statue, &Dodge(Direction::East)).unwrap_err();

    assert_eq!(
        error,
        WorldError::Action(ActionError::MissingComponent {
            entity: statue,
            action: "Dodge",
            component: "Stats",
        })
    );
}

#[test]
fn waiting_for_input_resumes_without_repeating_hooks() {
    let mut world = World::new(GameConfig::default(), registry());
    world.map_mut().fill(Tile::of(FLOOR));
    let mut player = world.create("Player").unwrap();
    player.add(Box::new(TurnCounter::default())).unwrap();
    let player = world.spawn(player);
    let counter = |world: &World| {
        let counter = world.entity(player).and_then(|e| e.get::<TurnCounter>()).unwrap();
        (counter.before, counter.after)
    };

    assert_eq!(world.update().unwrap(), StepOutcome::AwaitingInput { entity: player });
    assert_eq!(world.update().unwrap(), StepOutcome::AwaitingInput { entity: player });
    assert_eq!(world.awaiting_input(), Some(player));
    assert_eq!(counter(&world), (1, 0));

    world.set_next_action(player, Box::new(Rest)).unwrap();

    assert_eq!(world.update().unwrap(), StepOutcome::Completed { turn: 1 });
    assert_eq!(counter(&world), (1, 1));
    assert_eq!(world.awaiting_input(), None);
}

#[test]
fn passive_entities_still_get_turn_hooks() {
    let mut world = World::new(GameConfig::default(), registry());
    let mut rock = Entity::new("Rock");
    rock.add(Box::new(TurnCounter::default())).unwrap();
    let rock = world.spawn(rock);

    world.update().unwrap();
    world.update().unwrap();

    let counter = world.entity(rock).and_then(|e| e.get::<TurnCounter>()).unwrap();
    assert_eq!((counter.before, counter.after), (2, 2));
    assert_eq!(world.turns(), 2);
}

#[test]
fn input_is_only_accepted_by_interactive_actors() {
    let (mut world, _) = sandbox();
    let statue = world.spawn_type("Statue", Position::new(1, 1)).unwrap();

    assert_eq!(
        world.set_next_action(statue, Box::new(Rest)),
        Err(WorldError::NotInteractive(statue))
    );
    assert_eq!(
        world.set_next_action(EntityId(u32::MAX), Box::new(Rest)),
        Err(WorldError::UnknownEntity(EntityId(u32::MAX)))
    );
}

#[test]
fn first_interactive_actor_becomes_the_player() {
    let (mut world, player) = sandbox();
    world.spawn_type("Player", Position::new(5, 5)).unwrap();

    assert_eq!(world.player(), Some(player));
}
