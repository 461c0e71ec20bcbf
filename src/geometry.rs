//! Pixel-space geometry helpers.
//!
//! Image coordinates grow right and down. Bearings are in degrees with 0° pointing
//! east and angles growing counter-clockwise, so the vertical axis is flipped when
//! converting between the two.

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate inside a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Displacement from `self` to `other` in image coordinates
    pub fn offset_to(&self, other: Point) -> (f64, f64) {
        ((other.x - self.x) as f64, (other.y - self.y) as f64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

/// Euclidean distance between two pixel coordinates
pub fn pixel_distance(a: Point, b: Point) -> f64 {
    distance((a.x as f64, a.y as f64), (b.x as f64, b.y as f64))
}

/// Bearing of an image-space displacement, normalized to `[0, 360)`
pub fn bearing(dx: f64, dy: f64) -> f64 {
    let degrees = (-dy).atan2(dx).to_degrees();
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// End point of a ray of `length` pixels from `origin` along `bearing_deg`
pub fn ray_endpoint(origin: Point, bearing_deg: f64, length: f64) -> (f64, f64) {
    let radians = bearing_deg.to_radians();
    (
        origin.x as f64 + length * radians.cos(),
        origin.y as f64 - length * radians.sin(),
    )
}

/// Perpendicular distance from `point` to the infinite line through `start` and `end`.
///
/// Returns `None` when the two line points coincide.
pub fn point_to_line_distance(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> Option<f64> {
    let length = distance(start, end);
    if length <= f64::EPSILON {
        return None;
    }

    let numerator = ((end.1 - start.1) * point.0 - (end.0 - start.0) * point.1 + end.0 * start.1
        - end.1 * start.0)
        .abs();
    Some(numerator / length)
}
