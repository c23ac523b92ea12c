use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use quiztasy_core::{AmbushId, Command, Event, LevelId, MapLayout, MapPoint, PathwayId};
use quiztasy_world::{self as world, query, ScriptedRoll, SeededRoll, World};

#[test]
fn scripted_replay_is_reproducible() {
    let first = replay(World::new(&layout(), ScriptedRoll::new([70, 20, 90, 5])).expect("layout"));
    let second =
        replay(World::new(&layout(), ScriptedRoll::new([70, 20, 90, 5])).expect("layout"));

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn scripted_replay_triggers_expected_ambushes() {
    let outcome =
        replay(World::new(&layout(), ScriptedRoll::new([70, 20, 90, 5])).expect("layout"));

    // Arriving at level 1 draws 70 (miss); level 2 draws 20 (hit on the
    // near ambush); level 3 draws 90 against the 80% ambush (miss).
    assert_eq!(outcome.ambushes, vec![AmbushId::new(1)]);
    assert_eq!(
        outcome.completed,
        vec![LevelId::new(1), LevelId::new(2), LevelId::new(3)]
    );
}

#[test]
fn seeded_replay_is_reproducible() {
    let first = replay(World::new(&layout(), SeededRoll::new(0x0051_7a5e)).expect("layout"));
    let second = replay(World::new(&layout(), SeededRoll::new(0x0051_7a5e)).expect("layout"));

    assert_eq!(first, second);
}

fn layout() -> MapLayout {
    MapLayout::new(MapPoint::new(20, 20), 7)
        .with_level(1, MapPoint::new(140, 60))
        .with_level(2, MapPoint::new(260, 30))
        .with_level(3, MapPoint::new(390, 110))
        .with_pathway("crossing", MapPoint::new(330, 180), &[2, 3])
        .with_ambush(MapPoint::new(150, 70), 40)
        .with_ambush(MapPoint::new(255, 40), 25)
        .with_ambush(MapPoint::new(380, 100), 80)
}

fn scripted_commands() -> Vec<Command> {
    vec![
        Command::MoveToLevel {
            level: LevelId::new(2),
        },
        Command::MoveToLevel {
            level: LevelId::new(1),
        },
        Command::MoveToLevel {
            level: LevelId::new(2),
        },
        Command::MoveToPathway {
            pathway: PathwayId::new("crossing"),
        },
        Command::MoveToLevel {
            level: LevelId::new(3),
        },
    ]
}

fn replay(mut world: World) -> ReplayOutcome {
    let mut events = Vec::new();

    for command in scripted_commands() {
        world::apply(&mut world, command, &mut events);
        while query::is_moving(&world) {
            world::apply(&mut world, Command::Tick, &mut events);
        }
    }

    let ambushes = events
        .iter()
        .filter_map(|event| match event {
            Event::AmbushTriggered { ambush, .. } => Some(*ambush),
            _ => None,
        })
        .collect();

    ReplayOutcome {
        completed: query::completed_levels(&world),
        ambushes,
        final_position: query::player_position(&world),
        events,
    }
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    completed: Vec<LevelId>,
    ambushes: Vec<AmbushId>,
    final_position: MapPoint,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.completed.hash(&mut hasher);
        self.ambushes.hash(&mut hasher);
        self.final_position.hash(&mut hasher);
        self.events.hash(&mut hasher);
        hasher.finish()
    }
}
