mod circle;
mod target;

#[cfg(test)]
mod tests;

pub use circle::{min_enclosing_circle, Circle};
pub use target::{select_nearest, TargetCandidate, TargetDetector};
