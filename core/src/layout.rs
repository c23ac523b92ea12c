//! Static map description consumed when the navigation world is created.
//!
//! Layouts are plain data: adapters usually deserialise them from TOML, tests
//! assemble them with the `with_*` builders. Structural validation happens in
//! the world crate when the layout is turned into live state.

use serde::{Deserialize, Serialize};

use crate::{LevelId, MapPoint, PathwayId};

/// Layout format version understood by this crate.
pub const SUPPORTED_LAYOUT_VERSION: u32 = 1;

/// Proximity radius used when a layout does not specify one.
pub const DEFAULT_AMBUSH_RADIUS: f64 = 30.0;

/// Largest absolute coordinate a layout node may use.
///
/// Movement paths hold one waypoint per tick, so the bound caps a single path
/// at a few million points even at one pixel per tick.
pub const MAX_COORDINATE: i32 = 1 << 20;

/// Complete static description of a world map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Format version of the layout document.
    pub version: u32,
    /// Coordinate of the synthetic home node.
    pub start: MapPoint,
    /// Movement speed measured in map pixels per tick.
    pub speed: u32,
    /// Distance under which an ambush point is considered in range.
    #[serde(default = "default_ambush_radius")]
    pub ambush_radius: f64,
    /// Completable level nodes.
    #[serde(default)]
    pub levels: Vec<LevelLayout>,
    /// Junction nodes linking levels together.
    #[serde(default)]
    pub pathways: Vec<PathwayLayout>,
    /// Hidden ambush points, evaluated in listed order.
    #[serde(default)]
    pub ambushes: Vec<AmbushLayout>,
}

impl MapLayout {
    /// Creates an empty layout anchored at `start` moving at `speed`.
    #[must_use]
    pub fn new(start: MapPoint, speed: u32) -> Self {
        Self {
            version: SUPPORTED_LAYOUT_VERSION,
            start,
            speed,
            ambush_radius: DEFAULT_AMBUSH_RADIUS,
            levels: Vec::new(),
            pathways: Vec::new(),
            ambushes: Vec::new(),
        }
    }

    /// Appends a level node.
    #[must_use]
    pub fn with_level(mut self, id: u32, position: MapPoint) -> Self {
        self.levels.push(LevelLayout {
            id: LevelId::new(id),
            position,
        });
        self
    }

    /// Appends a pathway node connected to the listed level ids.
    #[must_use]
    pub fn with_pathway(
        mut self,
        id: impl Into<String>,
        position: MapPoint,
        connections: &[u32],
    ) -> Self {
        self.pathways.push(PathwayLayout {
            id: PathwayId::new(id),
            position,
            connections: connections.iter().copied().map(LevelId::new).collect(),
        });
        self
    }

    /// Appends an ambush point firing with `chance` percent probability.
    #[must_use]
    pub fn with_ambush(mut self, position: MapPoint, chance: u8) -> Self {
        self.ambushes.push(AmbushLayout { position, chance });
        self
    }

    /// Overrides the ambush proximity radius.
    #[must_use]
    pub fn with_ambush_radius(mut self, radius: f64) -> Self {
        self.ambush_radius = radius;
        self
    }
}

/// Level entry within a [`MapLayout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Identifier of the level; zero is reserved for the home node.
    pub id: LevelId,
    /// Coordinate of the level node.
    pub position: MapPoint,
}

/// Pathway entry within a [`MapLayout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayLayout {
    /// Identifier of the pathway.
    pub id: PathwayId,
    /// Coordinate of the junction node.
    pub position: MapPoint,
    /// Levels the junction connects to.
    #[serde(default)]
    pub connections: Vec<LevelId>,
}

/// Ambush entry within a [`MapLayout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbushLayout {
    /// Coordinate of the ambush point.
    pub position: MapPoint,
    /// Trigger probability expressed as a percentage.
    pub chance: u8,
}

fn default_ambush_radius() -> f64 {
    DEFAULT_AMBUSH_RADIUS
}
