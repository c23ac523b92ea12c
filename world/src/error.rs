//! Errors raised while turning a layout into live world state.

use quiztasy_core::{layout::MAX_COORDINATE, LevelId, MapPoint, PathwayId};
use thiserror::Error;

/// Reasons a [`MapLayout`](quiztasy_core::MapLayout) cannot back a world.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The movement speed was zero.
    #[error("movement speed must be positive")]
    ZeroSpeed,
    /// A node lies outside the supported coordinate range.
    #[error("node at {0} lies outside +-{max}", max = MAX_COORDINATE)]
    CoordinateOutOfRange(MapPoint),
    /// The ambush radius was zero, negative, or not a number.
    #[error("ambush radius must be positive, got {0}")]
    InvalidAmbushRadius(f64),
    /// A level used the identifier reserved for the home node.
    #[error("level id 0 is reserved for the home node")]
    ReservedLevelId,
    /// Two levels shared an identifier.
    #[error("{0} is defined more than once")]
    DuplicateLevel(LevelId),
    /// Two pathways shared an identifier.
    #[error("{0} is defined more than once")]
    DuplicatePathway(PathwayId),
    /// A pathway listed a level that does not exist.
    #[error("{pathway} connects to unknown {level}")]
    UnknownConnection {
        /// Pathway declaring the connection.
        pathway: PathwayId,
        /// Level that could not be found.
        level: LevelId,
    },
    /// An ambush chance exceeded one hundred percent.
    #[error("ambush #{index} has chance {chance}, expected at most 100")]
    ChanceOutOfRange {
        /// Position of the ambush in the layout.
        index: usize,
        /// Chance that was supplied.
        chance: u8,
    },
}
