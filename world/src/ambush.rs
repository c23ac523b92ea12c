//! One-shot probabilistic ambush points.

use quiztasy_core::{AmbushId, AmbushRoll, AmbushSnapshot, MapPoint};

#[derive(Clone, Debug)]
pub(crate) struct AmbushPoint {
    id: AmbushId,
    position: MapPoint,
    chance: u8,
    triggered: bool,
}

impl AmbushPoint {
    pub(crate) fn new(id: AmbushId, position: MapPoint, chance: u8) -> Self {
        Self {
            id,
            position,
            chance,
            triggered: false,
        }
    }

    pub(crate) fn snapshot(&self) -> AmbushSnapshot {
        AmbushSnapshot {
            id: self.id,
            position: self.position,
            chance: self.chance,
            triggered: self.triggered,
        }
    }
}

/// Springs the first armed ambush in range of `position`, in definition order.
///
/// One draw is taken per armed candidate inside `radius` until a draw lands at
/// or below the candidate's chance. Sprung points stay triggered forever.
pub(crate) fn spring_first(
    ambushes: &mut [AmbushPoint],
    position: MapPoint,
    radius: f64,
    roll: &mut dyn AmbushRoll,
) -> Option<(AmbushId, MapPoint)> {
    for ambush in ambushes.iter_mut() {
        if ambush.triggered {
            continue;
        }

        if ambush.position.distance(position) >= radius {
            continue;
        }

        if roll.roll_percent() <= ambush.chance {
            ambush.triggered = true;
            return Some((ambush.id, ambush.position));
        }
    }

    None
}
