#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map navigation state for Quiztasy.
//!
//! The world owns the level graph, the player's anchor and continuous
//! position, the queued movement path, and the ambush points. It is mutated
//! only through [`apply`] (or the equivalent `attempt_*`, `tick` and
//! `cancel_move` methods) on the caller's frame loop, and reports outcomes as
//! [`Event`] values.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use quiztasy_core::{
    layout::MAX_COORDINATE, AmbushId, AmbushRoll, Anchor, Command, Event, LevelId, MapLayout,
    MapPoint, MoveRejection, MoveRequest, PathwayId,
};
use tracing::{debug, info};

mod ambush;
mod error;
pub mod path;
mod roll;

pub use error::LayoutError;
pub use roll::{ScriptedRoll, SeededRoll};

use ambush::AmbushPoint;

/// Represents the authoritative navigation state of the world map.
#[derive(Debug)]
pub struct World {
    levels: BTreeMap<LevelId, Level>,
    pathways: BTreeMap<PathwayId, Pathway>,
    ambushes: Vec<AmbushPoint>,
    ambush_radius: f64,
    speed: u32,
    player: Player,
    roll: Box<dyn AmbushRoll>,
}

impl World {
    /// Builds a world from the provided layout, drawing ambush rolls from `roll`.
    ///
    /// The player starts anchored at the home node, positioned at the layout's
    /// start coordinate.
    pub fn new(layout: &MapLayout, roll: impl AmbushRoll + 'static) -> Result<Self, LayoutError> {
        if layout.speed == 0 {
            return Err(LayoutError::ZeroSpeed);
        }

        if layout.ambush_radius.is_nan() || layout.ambush_radius <= 0.0 {
            return Err(LayoutError::InvalidAmbushRadius(layout.ambush_radius));
        }

        let nodes = std::iter::once(layout.start)
            .chain(layout.levels.iter().map(|level| level.position))
            .chain(layout.pathways.iter().map(|pathway| pathway.position))
            .chain(layout.ambushes.iter().map(|ambush| ambush.position));
        for point in nodes {
            if !within_bounds(point) {
                return Err(LayoutError::CoordinateOutOfRange(point));
            }
        }

        let mut levels = BTreeMap::new();
        for entry in &layout.levels {
            if entry.id.is_home() {
                return Err(LayoutError::ReservedLevelId);
            }
            let level = Level {
                position: entry.position,
                completed: false,
            };
            if levels.insert(entry.id, level).is_some() {
                return Err(LayoutError::DuplicateLevel(entry.id));
            }
        }

        let mut pathways = BTreeMap::new();
        for entry in &layout.pathways {
            for level in &entry.connections {
                if !level.is_home() && !levels.contains_key(level) {
                    return Err(LayoutError::UnknownConnection {
                        pathway: entry.id.clone(),
                        level: *level,
                    });
                }
            }
            let pathway = Pathway {
                position: entry.position,
                connections: entry.connections.iter().copied().collect(),
            };
            if pathways.insert(entry.id.clone(), pathway).is_some() {
                return Err(LayoutError::DuplicatePathway(entry.id.clone()));
            }
        }

        let mut ambushes = Vec::with_capacity(layout.ambushes.len());
        for (index, entry) in layout.ambushes.iter().enumerate() {
            if entry.chance > 100 {
                return Err(LayoutError::ChanceOutOfRange {
                    index,
                    chance: entry.chance,
                });
            }
            let id = AmbushId::new(u32::try_from(index).unwrap_or(u32::MAX));
            ambushes.push(AmbushPoint::new(id, entry.position, entry.chance));
        }

        Ok(Self {
            levels,
            pathways,
            ambushes,
            ambush_radius: layout.ambush_radius,
            speed: layout.speed,
            player: Player::at_home(layout.start),
            roll: Box::new(roll),
        })
    }

    /// Attempts to start a move towards `level`, returning whether it was accepted.
    ///
    /// From a level anchor only the neighbouring ids are reachable (home leads
    /// to level 1); from a pathway anchor the level must be one of the
    /// pathway's connections. Rejections leave the world untouched.
    pub fn attempt_move_to_level(&mut self, level: LevelId, out_events: &mut Vec<Event>) -> bool {
        match self.level_move_target(level) {
            Ok(target) => {
                self.begin_move(Anchor::AtLevel(level), target, out_events);
                true
            }
            Err(reason) => {
                debug!(level = level.get(), %reason, "level move rejected");
                out_events.push(Event::MoveRejected {
                    request: MoveRequest::Level(level),
                    reason,
                });
                false
            }
        }
    }

    /// Attempts to start a move towards `pathway`, returning whether it was accepted.
    ///
    /// From a level anchor the pathway must connect to that level; from a
    /// pathway anchor both pathways must share at least one connection.
    pub fn attempt_move_to_pathway(
        &mut self,
        pathway: &PathwayId,
        out_events: &mut Vec<Event>,
    ) -> bool {
        match self.pathway_move_target(pathway) {
            Ok(target) => {
                self.begin_move(Anchor::AtPathway(pathway.clone()), target, out_events);
                true
            }
            Err(reason) => {
                debug!(pathway = pathway.as_str(), %reason, "pathway move rejected");
                out_events.push(Event::MoveRejected {
                    request: MoveRequest::Pathway(pathway.clone()),
                    reason,
                });
                false
            }
        }
    }

    /// Advances the movement animation by one frame. Does nothing while idle.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.moving {
            return;
        }

        if let Some(next) = self.player.path.pop_front() {
            self.player.position = next;
            out_events.push(Event::PlayerStepped { position: next });
        }

        if self.player.path.is_empty() {
            self.finish_move(out_events);
        }
    }

    /// Abandons the movement in flight, keeping the committed anchor.
    ///
    /// The destination level is not completed and no ambush check runs.
    pub fn cancel_move(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.moving {
            return;
        }

        self.player.path.clear();
        self.player.moving = false;
        debug!(anchor = %self.player.anchor, position = %self.player.position, "move cancelled");
        out_events.push(Event::MoveCancelled {
            anchor: self.player.anchor.clone(),
            position: self.player.position,
        });
    }

    fn level_move_target(&self, level: LevelId) -> Result<MapPoint, MoveRejection> {
        if self.player.moving {
            return Err(MoveRejection::AlreadyMoving);
        }

        let target = self
            .levels
            .get(&level)
            .ok_or(MoveRejection::UnknownLevel)?;

        match &self.player.anchor {
            Anchor::AtPathway(current) => {
                let connected = self
                    .pathways
                    .get(current)
                    .is_some_and(|pathway| pathway.connections.contains(&level));
                if !connected {
                    return Err(MoveRejection::NotConnected);
                }
            }
            Anchor::AtLevel(current) => {
                if !levels_adjacent(*current, level) {
                    return Err(MoveRejection::NotAdjacent);
                }
            }
        }

        Ok(target.position)
    }

    fn pathway_move_target(&self, pathway: &PathwayId) -> Result<MapPoint, MoveRejection> {
        if self.player.moving {
            return Err(MoveRejection::AlreadyMoving);
        }

        let target = self
            .pathways
            .get(pathway)
            .ok_or(MoveRejection::UnknownPathway)?;

        let connected = match &self.player.anchor {
            Anchor::AtLevel(current) => target.connections.contains(current),
            Anchor::AtPathway(current) => self.pathways.get(current).is_some_and(|origin| {
                !origin.connections.is_disjoint(&target.connections)
            }),
        };

        if !connected {
            return Err(MoveRejection::NotConnected);
        }

        Ok(target.position)
    }

    fn begin_move(&mut self, destination: Anchor, target: MapPoint, out_events: &mut Vec<Event>) {
        let from = self.player.position;
        let waypoints = path::interpolate(from, target, self.speed);

        self.player.anchor = destination.clone();
        out_events.push(Event::MoveStarted {
            from,
            destination,
            target,
            waypoints: waypoints.len(),
        });

        if waypoints.is_empty() {
            self.player.position = target;
            self.finish_move(out_events);
        } else {
            self.player.path = waypoints.into();
            self.player.moving = true;
        }
    }

    fn finish_move(&mut self, out_events: &mut Vec<Event>) {
        self.player.moving = false;

        if let Anchor::AtLevel(id) = &self.player.anchor {
            if !id.is_home() {
                if let Some(level) = self.levels.get_mut(id) {
                    if !level.completed {
                        level.completed = true;
                        info!(level = id.get(), "level completed");
                        out_events.push(Event::LevelCompleted { level: *id });
                    }
                }
            }
        }

        out_events.push(Event::MoveCompleted {
            anchor: self.player.anchor.clone(),
            position: self.player.position,
        });

        if let Some((ambush, position)) = ambush::spring_first(
            &mut self.ambushes,
            self.player.position,
            self.ambush_radius,
            self.roll.as_mut(),
        ) {
            info!(ambush = ambush.get(), %position, "ambush triggered");
            out_events.push(Event::AmbushTriggered { ambush, position });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveToLevel { level } => {
            let _ = world.attempt_move_to_level(level, out_events);
        }
        Command::MoveToPathway { pathway } => {
            let _ = world.attempt_move_to_pathway(&pathway, out_events);
        }
        Command::Tick => world.tick(out_events),
        Command::CancelMove => world.cancel_move(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use quiztasy_core::{
        AmbushSnapshot, Anchor, LevelId, LevelSnapshot, MapPoint, PathwaySnapshot,
    };

    use super::World;

    /// Continuous player position, possibly between nodes.
    #[must_use]
    pub fn player_position(world: &World) -> MapPoint {
        world.player.position
    }

    /// Node the player is anchored at; the destination while a move is animated.
    #[must_use]
    pub fn anchor(world: &World) -> &Anchor {
        &world.player.anchor
    }

    /// Reports whether a movement is being animated.
    #[must_use]
    pub fn is_moving(world: &World) -> bool {
        world.player.moving
    }

    /// Waypoints still queued for the movement in flight.
    #[must_use]
    pub fn remaining_path(world: &World) -> Vec<MapPoint> {
        world.player.path.iter().copied().collect()
    }

    /// Movement speed in map pixels per tick.
    #[must_use]
    pub fn speed(world: &World) -> u32 {
        world.speed
    }

    /// Distance under which ambush points are evaluated.
    #[must_use]
    pub fn ambush_radius(world: &World) -> f64 {
        world.ambush_radius
    }

    /// Snapshot of a single level, if it exists.
    #[must_use]
    pub fn level(world: &World, id: LevelId) -> Option<LevelSnapshot> {
        world.levels.get(&id).map(|level| level.snapshot(id))
    }

    /// Snapshots of every level in ascending id order.
    #[must_use]
    pub fn levels(world: &World) -> Vec<LevelSnapshot> {
        world
            .levels
            .iter()
            .map(|(id, level)| level.snapshot(*id))
            .collect()
    }

    /// Identifiers of completed levels in ascending order.
    #[must_use]
    pub fn completed_levels(world: &World) -> Vec<LevelId> {
        world
            .levels
            .iter()
            .filter(|(_, level)| level.completed)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Snapshots of every pathway in ascending id order.
    #[must_use]
    pub fn pathways(world: &World) -> Vec<PathwaySnapshot> {
        world
            .pathways
            .iter()
            .map(|(id, pathway)| PathwaySnapshot {
                id: id.clone(),
                position: pathway.position,
                connections: pathway.connections.iter().copied().collect(),
            })
            .collect()
    }

    /// Snapshots of every ambush point in definition order.
    #[must_use]
    pub fn ambushes(world: &World) -> Vec<AmbushSnapshot> {
        world.ambushes.iter().map(|ambush| ambush.snapshot()).collect()
    }
}

#[derive(Clone, Debug)]
struct Level {
    position: MapPoint,
    completed: bool,
}

impl Level {
    fn snapshot(&self, id: LevelId) -> quiztasy_core::LevelSnapshot {
        quiztasy_core::LevelSnapshot {
            id,
            position: self.position,
            completed: self.completed,
        }
    }
}

#[derive(Clone, Debug)]
struct Pathway {
    position: MapPoint,
    connections: BTreeSet<LevelId>,
}

#[derive(Clone, Debug)]
struct Player {
    position: MapPoint,
    anchor: Anchor,
    path: VecDeque<MapPoint>,
    moving: bool,
}

impl Player {
    fn at_home(position: MapPoint) -> Self {
        Self {
            position,
            anchor: Anchor::AtLevel(LevelId::HOME),
            path: VecDeque::new(),
            moving: false,
        }
    }
}

fn within_bounds(point: MapPoint) -> bool {
    let range = -MAX_COORDINATE..=MAX_COORDINATE;
    range.contains(&point.x()) && range.contains(&point.y())
}

fn levels_adjacent(current: LevelId, target: LevelId) -> bool {
    (current.is_home() && target.get() == 1) || current.get().abs_diff(target.get()) == 1
}
