use quiztasy_core::{
    Anchor, Command, Event, LevelId, MapLayout, MapPoint, MoveRejection, MoveRequest, PathwayId,
};
use quiztasy_world::{self as world, query, ScriptedRoll, World};

fn branching_layout() -> MapLayout {
    MapLayout::new(MapPoint::new(0, 0), 5)
        .with_level(1, MapPoint::new(100, 0))
        .with_level(2, MapPoint::new(200, 0))
        .with_level(3, MapPoint::new(300, 0))
        .with_level(4, MapPoint::new(300, 100))
        .with_level(7, MapPoint::new(700, 0))
        .with_pathway("fork", MapPoint::new(250, 50), &[2, 3, 4])
        .with_pathway("ridge", MapPoint::new(400, 100), &[4, 7])
        .with_pathway("lake", MapPoint::new(600, 300), &[7])
        .with_ambush(MapPoint::new(200, 10), 50)
}

fn build(roll: ScriptedRoll) -> World {
    World::new(&branching_layout(), roll).expect("branching layout is valid")
}

fn travel(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    while query::is_moving(world) {
        world::apply(world, Command::Tick, &mut events);
    }
    events
}

fn to_level(id: u32) -> Command {
    Command::MoveToLevel {
        level: LevelId::new(id),
    }
}

fn to_pathway(id: &str) -> Command {
    Command::MoveToPathway {
        pathway: PathwayId::new(id),
    }
}

fn ambushes_in(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::AmbushTriggered { .. }))
        .count()
}

#[derive(Debug, PartialEq)]
struct Observed {
    anchor: Anchor,
    position: MapPoint,
    moving: bool,
    path: Vec<MapPoint>,
    completed: Vec<LevelId>,
    triggered: Vec<bool>,
}

fn observe(world: &World) -> Observed {
    Observed {
        anchor: query::anchor(world).clone(),
        position: query::player_position(world),
        moving: query::is_moving(world),
        path: query::remaining_path(world),
        completed: query::completed_levels(world),
        triggered: query::ambushes(world)
            .into_iter()
            .map(|ambush| ambush.triggered)
            .collect(),
    }
}

#[test]
fn every_reached_level_is_completed_once_the_path_drains() {
    let mut world = build(ScriptedRoll::always(100));

    for id in 1..=3 {
        let events = travel(&mut world, to_level(id));
        let level = query::level(&world, LevelId::new(id)).expect("level exists");

        assert!(level.completed, "level {id} should be completed");
        assert!(!query::is_moving(&world));
        assert_eq!(query::player_position(&world), level.position);
        assert!(events.contains(&Event::LevelCompleted {
            level: LevelId::new(id)
        }));
    }

    assert_eq!(
        query::completed_levels(&world),
        vec![LevelId::new(1), LevelId::new(2), LevelId::new(3)]
    );
}

#[test]
fn non_adjacent_level_is_rejected_without_side_effects() {
    let mut world = build(ScriptedRoll::always(100));
    for id in 1..=3 {
        let _ = travel(&mut world, to_level(id));
    }
    let before = observe(&world);

    let mut events = Vec::new();
    let accepted = world.attempt_move_to_level(LevelId::new(7), &mut events);

    assert!(!accepted);
    assert_eq!(observe(&world), before);
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            request: MoveRequest::Level(LevelId::new(7)),
            reason: MoveRejection::NotAdjacent,
        }]
    );
}

#[test]
fn unknown_targets_are_rejected() {
    let mut world = build(ScriptedRoll::default());
    let mut events = Vec::new();

    assert!(!world.attempt_move_to_level(LevelId::new(5), &mut events));
    assert!(!world.attempt_move_to_pathway(&PathwayId::new("cave"), &mut events));
    assert_eq!(
        events,
        vec![
            Event::MoveRejected {
                request: MoveRequest::Level(LevelId::new(5)),
                reason: MoveRejection::UnknownLevel,
            },
            Event::MoveRejected {
                request: MoveRequest::Pathway(PathwayId::new("cave")),
                reason: MoveRejection::UnknownPathway,
            },
        ]
    );
}

#[test]
fn pathways_gate_branching_routes() {
    let mut world = build(ScriptedRoll::always(100));
    let mut events = Vec::new();

    assert!(!world.attempt_move_to_pathway(&PathwayId::new("fork"), &mut events));

    for id in 1..=4 {
        let _ = travel(&mut world, to_level(id));
    }

    let _ = travel(&mut world, to_pathway("ridge"));
    assert_eq!(
        query::anchor(&world),
        &Anchor::AtPathway(PathwayId::new("ridge"))
    );
    assert_eq!(query::player_position(&world), MapPoint::new(400, 100));

    let _ = travel(&mut world, to_level(7));
    assert!(query::level(&world, LevelId::new(7))
        .expect("level exists")
        .completed);

    let _ = travel(&mut world, to_pathway("lake"));
    assert_eq!(
        query::anchor(&world),
        &Anchor::AtPathway(PathwayId::new("lake"))
    );

    events.clear();
    assert!(!world.attempt_move_to_level(LevelId::new(4), &mut events));
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            request: MoveRequest::Level(LevelId::new(4)),
            reason: MoveRejection::NotConnected,
        }]
    );
}

#[test]
fn pathway_hops_require_shared_connections() {
    let mut world = build(ScriptedRoll::always(100));
    for id in 1..=4 {
        let _ = travel(&mut world, to_level(id));
    }
    let _ = travel(&mut world, to_pathway("ridge"));
    let _ = travel(&mut world, to_level(7));
    let _ = travel(&mut world, to_pathway("lake"));
    let before = observe(&world);

    let mut events = Vec::new();
    assert!(!world.attempt_move_to_pathway(&PathwayId::new("fork"), &mut events));
    assert_eq!(observe(&world), before);
    assert_eq!(
        events,
        vec![Event::MoveRejected {
            request: MoveRequest::Pathway(PathwayId::new("fork")),
            reason: MoveRejection::NotConnected,
        }]
    );

    let _ = travel(&mut world, to_pathway("ridge"));
    assert!(world.attempt_move_to_pathway(&PathwayId::new("fork"), &mut events));
}

#[test]
fn pathways_are_never_completed() {
    let mut world = build(ScriptedRoll::always(100));
    for id in 1..=2 {
        let _ = travel(&mut world, to_level(id));
    }

    let events = travel(&mut world, to_pathway("fork"));

    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::LevelCompleted { .. })));
    assert!(events.contains(&Event::MoveCompleted {
        anchor: Anchor::AtPathway(PathwayId::new("fork")),
        position: MapPoint::new(250, 50),
    }));
}

#[test]
fn ambush_fires_on_arrival_and_never_again() {
    let mut world = build(ScriptedRoll::always(1));

    let first = travel(&mut world, to_level(1));
    assert_eq!(ambushes_in(&first), 0);

    let arrival = travel(&mut world, to_level(2));
    assert_eq!(ambushes_in(&arrival), 1);
    assert!(query::ambushes(&world)[0].triggered);

    let _ = travel(&mut world, to_level(1));
    let revisit = travel(&mut world, to_level(2));
    assert_eq!(ambushes_in(&revisit), 0);
    assert!(query::ambushes(&world)[0].triggered);
}

#[test]
fn ambush_is_only_checked_at_the_end_of_a_move() {
    let layout = MapLayout::new(MapPoint::new(0, 0), 5)
        .with_level(1, MapPoint::new(200, 0))
        .with_ambush(MapPoint::new(100, 0), 100);
    let mut world = World::new(&layout, ScriptedRoll::always(1)).expect("valid layout");

    let events = travel(&mut world, to_level(1));

    assert_eq!(ambushes_in(&events), 0);
    assert!(!query::ambushes(&world)[0].triggered);
}

#[test]
fn ambush_outcome_follows_the_scripted_rolls() {
    for (roll, expected) in [(50, 1), (51, 0), (1, 1), (100, 0)] {
        let mut world = build(ScriptedRoll::always(roll));
        let _ = travel(&mut world, to_level(1));
        let events = travel(&mut world, to_level(2));
        assert_eq!(ambushes_in(&events), expected, "roll {roll}");
    }
}

#[test]
fn tick_while_idle_is_a_noop() {
    let mut world = build(ScriptedRoll::always(1));
    let before = observe(&world);

    let mut events = Vec::new();
    for _ in 0..5 {
        world::apply(&mut world, Command::Tick, &mut events);
    }

    assert!(events.is_empty());
    assert_eq!(observe(&world), before);
}

#[test]
fn completion_events_follow_the_final_step() {
    let mut world = build(ScriptedRoll::always(1));
    let _ = travel(&mut world, to_level(1));

    let events = travel(&mut world, to_level(2));
    let tail: Vec<_> = events.iter().rev().take(4).rev().cloned().collect();

    assert_eq!(
        tail,
        vec![
            Event::PlayerStepped {
                position: MapPoint::new(200, 0)
            },
            Event::LevelCompleted {
                level: LevelId::new(2)
            },
            Event::MoveCompleted {
                anchor: Anchor::AtLevel(LevelId::new(2)),
                position: MapPoint::new(200, 0),
            },
            Event::AmbushTriggered {
                ambush: quiztasy_core::AmbushId::new(0),
                position: MapPoint::new(200, 10),
            },
        ]
    );
}
