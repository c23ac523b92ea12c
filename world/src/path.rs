//! Straight-line movement paths through map space.
//!
//! Paths do not follow the pathway graph; the player walks the direct line
//! between the departure position and the destination node, even when that
//! line crosses terrain.

use quiztasy_core::MapPoint;

/// Interpolates the waypoints walked from `start` to `end` at `speed` pixels per tick.
///
/// The step count is the larger axis delta divided by `speed`. A zero step
/// count yields an empty path so the move can complete immediately. Otherwise
/// the path holds `steps + 1` points, starting at `start` and ending exactly at
/// `end`; intermediate coordinates use truncating integer division. A zero
/// speed is treated as one pixel per tick.
#[must_use]
pub fn interpolate(start: MapPoint, end: MapPoint, speed: u32) -> Vec<MapPoint> {
    let dx = i64::from(end.x()) - i64::from(start.x());
    let dy = i64::from(end.y()) - i64::from(start.y());
    let speed = i64::from(speed.max(1));
    let steps = dx.abs().max(dy.abs()) / speed;

    if steps == 0 {
        return Vec::new();
    }

    (0..=steps)
        .map(|step| {
            MapPoint::new(
                offset(start.x(), dx, step, steps),
                offset(start.y(), dy, step, steps),
            )
        })
        .collect()
}

fn offset(origin: i32, delta: i64, step: i64, steps: i64) -> i32 {
    let value = i64::from(origin) + delta * step / steps;
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_path_has_steps_plus_one_points() {
        let path = interpolate(MapPoint::new(0, 0), MapPoint::new(100, 100), 5);

        assert_eq!(path.len(), 21);
        assert_eq!(path.first(), Some(&MapPoint::new(0, 0)));
        assert_eq!(path.last(), Some(&MapPoint::new(100, 100)));
        assert_eq!(path[1], MapPoint::new(5, 5));
    }

    #[test]
    fn coincident_endpoints_produce_empty_path() {
        let point = MapPoint::new(42, -7);
        assert!(interpolate(point, point, 5).is_empty());
    }

    #[test]
    fn distance_shorter_than_speed_produces_empty_path() {
        let path = interpolate(MapPoint::new(0, 0), MapPoint::new(4, 3), 5);
        assert!(path.is_empty());
    }

    #[test]
    fn uneven_division_still_ends_on_destination() {
        let start = MapPoint::new(3, 11);
        let end = MapPoint::new(-58, 97);
        for speed in [1, 3, 7, 13, 40] {
            let path = interpolate(start, end, speed);
            assert_eq!(path.last(), Some(&end), "speed {speed} missed the end");
            assert_eq!(path.first(), Some(&start));
        }
    }

    #[test]
    fn intermediate_points_truncate_toward_zero() {
        let path = interpolate(MapPoint::new(0, 0), MapPoint::new(-10, 5), 3);

        // steps = 10 / 3 = 3; y offsets are 5 * i / 3 truncated.
        assert_eq!(
            path,
            vec![
                MapPoint::new(0, 0),
                MapPoint::new(-3, 1),
                MapPoint::new(-6, 3),
                MapPoint::new(-10, 5),
            ]
        );
    }

    #[test]
    fn zero_speed_falls_back_to_single_pixel_steps() {
        let path = interpolate(MapPoint::new(0, 0), MapPoint::new(3, 0), 0);
        assert_eq!(path.len(), 4);
    }
}
