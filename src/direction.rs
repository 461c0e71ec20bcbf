//! Snapping of target bearings onto the four movement directions.
//!
//! The movement keys of the game are skewed against the screen axes, so each
//! direction has a fixed bearing rather than a multiple of 90 degrees.

use crate::geometry::bearing;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction in resolution order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Fixed bearing in degrees, 0 = east, counter-clockwise positive
    pub const fn bearing(&self) -> f64 {
        match self {
            Direction::Up => 25.0,
            Direction::Right => 335.0,
            Direction::Down => 205.0,
            Direction::Left => 155.0,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of resolving a displacement vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// Continuous bearing of the displacement in `[0, 360)`
    pub bearing: f64,
    /// Bearing of the chosen direction
    pub snapped_bearing: f64,
    pub direction: Direction,
}

/// Resolve an image-space displacement to the closest movement direction.
///
/// The angular difference is the raw absolute difference with no wraparound at
/// 0/360: due east is 25 from `Up` and 335 from `Right`, so it resolves to `Up`.
/// Ties go to the earlier direction in [`Direction::ALL`].
pub fn resolve(dx: f64, dy: f64) -> Heading {
    let bearing = bearing(dx, dy);

    let mut best = Direction::Up;
    let mut best_diff = f64::INFINITY;
    for direction in Direction::ALL {
        let diff = (bearing - direction.bearing()).abs();
        if diff < best_diff {
            best_diff = diff;
            best = direction;
        }
    }

    Heading {
        bearing,
        snapped_bearing: best.bearing(),
        direction: best,
    }
}
