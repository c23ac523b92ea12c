//! Loading of map layouts from TOML documents on disk.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use glam::IVec2;
use quiztasy_core::{layout::SUPPORTED_LAYOUT_VERSION, MapLayout};

/// Space left around the outermost node when sizing the map for the camera.
const MAP_MARGIN: i32 = 100;

/// Reads and parses the layout stored at `path`.
pub(crate) fn load(path: &Path) -> Result<MapLayout> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read map layout at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid map layout at {}", path.display()))
}

/// Parses a layout document, rejecting unsupported format versions.
pub(crate) fn parse(contents: &str) -> Result<MapLayout> {
    let layout: MapLayout =
        toml::from_str(contents).context("failed to parse map layout toml contents")?;
    if layout.version != SUPPORTED_LAYOUT_VERSION {
        bail!(
            "unsupported map layout version {}; expected {}",
            layout.version,
            SUPPORTED_LAYOUT_VERSION
        );
    }
    Ok(layout)
}

/// Size of the map image implied by the layout's outermost nodes.
#[must_use]
pub(crate) fn map_extent(layout: &MapLayout) -> IVec2 {
    let nodes = std::iter::once(layout.start)
        .chain(layout.levels.iter().map(|level| level.position))
        .chain(layout.pathways.iter().map(|pathway| pathway.position))
        .chain(layout.ambushes.iter().map(|ambush| ambush.position));

    let furthest = nodes.fold(IVec2::ZERO, |extent, point| {
        extent.max(IVec2::new(point.x(), point.y()))
    });
    furthest + IVec2::splat(MAP_MARGIN)
}
