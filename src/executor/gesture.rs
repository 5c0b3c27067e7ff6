//! Waypoint synthesis for drag gestures.
//!
//! Everything here is pure: the solver hands the resulting paths to the
//! device and performs the settle step itself.

use crate::errors::{MowerError, MowerResult};
use crate::perception::types::Coordinate;

/// Sideways displacement of the detour legs of a no-inertia swipe.
pub const DETOUR_OFFSET: i32 = 100;
/// Duration of each detour leg.
pub const DETOUR_LEG_MS: u64 = 200;
/// Hold before the finger is lifted at the end of a no-inertia swipe.
pub const NO_INERTIA_UP_WAIT_MS: u64 = 500;

/// A multi-leg path with one duration per leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedPath {
    pub points: Vec<Coordinate>,
    pub durations_ms: Vec<u64>,
    pub up_wait_ms: u64,
}

/// `[start, start + movement]`.
pub fn straight(start: Coordinate, movement: Coordinate) -> Vec<Coordinate> {
    vec![start, start + movement]
}

/// Accumulates relative movements into absolute waypoints.
pub fn chain(start: Coordinate, movements: &[Coordinate]) -> Vec<Coordinate> {
    let mut points = Vec::with_capacity(movements.len() + 1);
    points.push(start);
    let mut cursor = start;
    for &movement in movements {
        cursor = cursor + movement;
        points.push(cursor);
    }
    points
}

/// Builds a swipe whose momentum is spent on a perpendicular detour.
///
/// The touch first steps [`DETOUR_OFFSET`] px sideways, travels the real
/// movement, then steps back onto the movement axis. The transport's
/// smoothing acts on the detour legs, so the page stops exactly where the
/// middle leg ends. The middle leg lasts `duration_ms * distance / 100`.
pub fn no_inertia(
    start: Coordinate,
    movement: Coordinate,
    duration_ms: u64,
) -> MowerResult<SegmentedPath> {
    let (points, distance) = if movement.x == 0 {
        (
            vec![
                start,
                Coordinate::new(start.x + DETOUR_OFFSET, start.y),
                Coordinate::new(start.x + DETOUR_OFFSET, start.y + movement.y),
                Coordinate::new(start.x, start.y + movement.y),
            ],
            movement.y.unsigned_abs(),
        )
    } else if movement.y == 0 {
        (
            vec![
                start,
                Coordinate::new(start.x, start.y + DETOUR_OFFSET),
                Coordinate::new(start.x + movement.x, start.y + DETOUR_OFFSET),
                Coordinate::new(start.x + movement.x, start.y),
            ],
            movement.x.unsigned_abs(),
        )
    } else {
        return Err(MowerError::Gesture(format!(
            "no-inertia swipe must be vertical or horizontal, got ({}, {})",
            movement.x, movement.y
        )));
    };

    Ok(SegmentedPath {
        points,
        durations_ms: vec![
            DETOUR_LEG_MS,
            duration_ms * u64::from(distance) / 100,
            DETOUR_LEG_MS,
        ],
        up_wait_ms: NO_INERTIA_UP_WAIT_MS,
    })
}
