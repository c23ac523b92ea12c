#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Quiztasy map engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative navigation world, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. The static map description
//! consumed at start-up lives in [`layout`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod layout;

pub use layout::{AmbushLayout, LevelLayout, MapLayout, PathwayLayout};

/// Commands that express all permissible navigation mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player travel to the provided level.
    MoveToLevel {
        /// Level the player wants to reach.
        level: LevelId,
    },
    /// Requests that the player travel to the provided pathway junction.
    MoveToPathway {
        /// Pathway the player wants to reach.
        pathway: PathwayId,
    },
    /// Advances the movement animation by a single frame.
    Tick,
    /// Abandons the movement currently in flight.
    CancelMove,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a move was accepted and the anchor was committed.
    MoveStarted {
        /// Continuous position the player departed from.
        from: MapPoint,
        /// Anchor the player is now considered to be at.
        destination: Anchor,
        /// Coordinate of the destination node.
        target: MapPoint,
        /// Number of waypoints queued for the animation.
        waypoints: usize,
    },
    /// Reports that a move request was disallowed. State is unchanged.
    MoveRejected {
        /// Move that was requested.
        request: MoveRequest,
        /// Specific reason the request failed.
        reason: MoveRejection,
    },
    /// Indicates that the player advanced along the queued path.
    PlayerStepped {
        /// Continuous position after the step.
        position: MapPoint,
    },
    /// Marks a level as completed for the first time.
    LevelCompleted {
        /// Level that became completed.
        level: LevelId,
    },
    /// Signals that the player arrived at the committed anchor.
    MoveCompleted {
        /// Anchor the player arrived at.
        anchor: Anchor,
        /// Final continuous position.
        position: MapPoint,
    },
    /// Announces that an ambush point sprang on the player.
    AmbushTriggered {
        /// Ambush point that fired.
        ambush: AmbushId,
        /// Coordinate of the ambush point.
        position: MapPoint,
    },
    /// Confirms that the movement in flight was abandoned.
    MoveCancelled {
        /// Anchor that remains committed after cancellation.
        anchor: Anchor,
        /// Continuous position where the player stopped.
        position: MapPoint,
    },
}

/// Move request echoed back when the world rejects it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveRequest {
    /// Request targeting a level.
    Level(LevelId),
    /// Request targeting a pathway.
    Pathway(PathwayId),
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// A movement is still being animated.
    AlreadyMoving,
    /// No level with the requested identifier exists.
    UnknownLevel,
    /// No pathway with the requested identifier exists.
    UnknownPathway,
    /// The target level is not adjacent to the current level anchor.
    NotAdjacent,
    /// The current anchor shares no connection with the target.
    NotConnected,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AlreadyMoving => "player is already moving",
            Self::UnknownLevel => "level does not exist",
            Self::UnknownPathway => "pathway does not exist",
            Self::NotAdjacent => "level is not adjacent to the current level",
            Self::NotConnected => "target is not connected to the current anchor",
        };
        f.write_str(text)
    }
}

/// Unique identifier assigned to a level.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LevelId(u32);

impl LevelId {
    /// Synthetic start node the player occupies before entering any level.
    pub const HOME: LevelId = LevelId(0);

    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the identifier names the synthetic start node.
    #[must_use]
    pub const fn is_home(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}

/// Unique identifier assigned to a pathway junction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathwayId(String);

impl PathwayId {
    /// Creates a new pathway identifier from the provided token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Token naming the pathway.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pathway {}", self.0)
    }
}

/// Identifier of an ambush point, allocated in definition order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AmbushId(u32);

impl AmbushId {
    /// Creates a new ambush identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location in map space measured in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapPoint {
    x: i32,
    y: i32,
}

impl MapPoint {
    /// Creates a new map-space point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: MapPoint) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Node the player is considered to be at between moves.
///
/// While a move is animated the anchor already names the destination.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Anchored at a level, or at the home node when the id is zero.
    AtLevel(LevelId),
    /// Anchored at a pathway junction.
    AtPathway(PathwayId),
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLevel(level) if level.is_home() => f.write_str("home"),
            Self::AtLevel(level) => write!(f, "{level}"),
            Self::AtPathway(pathway) => write!(f, "{pathway}"),
        }
    }
}

/// Source of the percentage draws that decide whether an ambush springs.
pub trait AmbushRoll: fmt::Debug {
    /// Draws a uniformly distributed percentage in `1..=100`.
    fn roll_percent(&mut self) -> u8;
}

/// Immutable representation of a single level used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSnapshot {
    /// Identifier of the level.
    pub id: LevelId,
    /// Coordinate of the level node.
    pub position: MapPoint,
    /// Whether the player finished a movement into the level.
    pub completed: bool,
}

/// Immutable representation of a single pathway used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathwaySnapshot {
    /// Identifier of the pathway.
    pub id: PathwayId,
    /// Coordinate of the junction node.
    pub position: MapPoint,
    /// Levels reachable from the junction, in ascending order.
    pub connections: Vec<LevelId>,
}

/// Immutable representation of a single ambush point used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmbushSnapshot {
    /// Identifier of the ambush point.
    pub id: AmbushId,
    /// Coordinate of the ambush point.
    pub position: MapPoint,
    /// Trigger chance expressed as a percentage.
    pub chance: u8,
    /// Whether the ambush already sprang.
    pub triggered: bool,
}
