//! Parsing of the scripted route and viewport flags.

use std::{error::Error, fmt, str::FromStr};

use glam::IVec2;
use quiztasy_core::{Command, LevelId, PathwayId};

/// Separates the target kind from its identifier within a route token.
const KIND_DELIMITER: char = ':';

/// Single hop of a scripted route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RouteStep {
    /// Travel to the level with the provided id.
    Level(LevelId),
    /// Travel to the pathway with the provided id.
    Pathway(PathwayId),
}

impl RouteStep {
    /// Navigation command requesting this hop.
    #[must_use]
    pub(crate) fn command(&self) -> Command {
        match self {
            Self::Level(level) => Command::MoveToLevel { level: *level },
            Self::Pathway(pathway) => Command::MoveToPathway {
                pathway: pathway.clone(),
            },
        }
    }
}

impl FromStr for RouteStep {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RouteError::EmptyStep);
        }

        let (kind, id) = trimmed
            .split_once(KIND_DELIMITER)
            .ok_or_else(|| RouteError::MissingKind(trimmed.to_owned()))?;
        let id = id.trim();

        match kind.trim() {
            "level" => id
                .parse::<u32>()
                .map(|value| Self::Level(LevelId::new(value)))
                .map_err(|_| RouteError::InvalidLevel(id.to_owned())),
            "pathway" if !id.is_empty() => Ok(Self::Pathway(PathwayId::new(id))),
            "pathway" => Err(RouteError::EmptyPathway),
            other => Err(RouteError::UnknownKind(other.to_owned())),
        }
    }
}

/// Errors that can occur while parsing route and viewport flags.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RouteError {
    /// A route token was empty.
    EmptyStep,
    /// A route token did not name its target kind.
    MissingKind(String),
    /// A route token used an unsupported target kind.
    UnknownKind(String),
    /// A level id could not be parsed.
    InvalidLevel(String),
    /// A pathway token carried no identifier.
    EmptyPathway,
    /// The viewport dimensions could not be parsed.
    InvalidViewport(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStep => write!(f, "route contains an empty step"),
            Self::MissingKind(step) => {
                write!(f, "route step '{step}' must look like level:N or pathway:ID")
            }
            Self::UnknownKind(kind) => write!(f, "route target kind '{kind}' is not supported"),
            Self::InvalidLevel(id) => write!(f, "could not parse level id '{id}'"),
            Self::EmptyPathway => write!(f, "pathway route step is missing its id"),
            Self::InvalidViewport(dimensions) => {
                write!(f, "could not parse viewport dimensions '{dimensions}'")
            }
        }
    }
}

impl Error for RouteError {}

/// Parses `WIDTHxHEIGHT` viewport dimensions.
pub(crate) fn parse_viewport(dimensions: &str) -> Result<IVec2, RouteError> {
    let invalid = || RouteError::InvalidViewport(dimensions.to_owned());
    let (width, height) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let width = width.trim().parse::<i32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<i32>().map_err(|_| invalid())?;

    if width <= 0 || height <= 0 {
        return Err(invalid());
    }

    Ok(IVec2::new(width, height))
}
