//! Per-tick movement and attack decisions.
//!
//! A movement key is pressed every tick a target is visible. The attack modifier
//! is held only when the target sat still between two consecutive ticks while
//! inside striking range and lies close to one of the direction lines.

use crate::config::EngagementConfig;
use crate::detector::TargetCandidate;
use crate::direction::{self, Direction, Heading};
use crate::error::Result;
use crate::geometry::{point_to_line_distance, ray_endpoint, Point};
use crate::input::{GameKey, InputInjector};
use crate::state::{ControlState, EngagementState};

use std::time::Instant;
use tracing::{info, trace};

/// Outcome of one engagement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// No target, or sitting
    Idle,
    /// Moving toward the target without attacking
    Travel { heading: Heading },
    /// Moving and holding the attack modifier
    Engage {
        heading: Heading,
        /// Direction line the target is closest to
        line: Direction,
        line_distance: f64,
    },
}

impl Decision {
    pub fn heading(&self) -> Option<Heading> {
        match self {
            Decision::Idle => None,
            Decision::Travel { heading } | Decision::Engage { heading, .. } => Some(*heading),
        }
    }
}

pub struct EngagementController {
    config: EngagementConfig,
    center: Point,
    previous_target: Option<Point>,
}

impl EngagementController {
    pub fn new(config: EngagementConfig, center: Point) -> Self {
        Self {
            config,
            center,
            previous_target: None,
        }
    }

    pub fn previous_target(&self) -> Option<Point> {
        self.previous_target
    }

    /// Run one tick of the decision protocol
    pub fn step<I: InputInjector + ?Sized>(
        &mut self,
        target: Option<&TargetCandidate>,
        sitting: bool,
        state: &mut ControlState,
        input: &mut I,
        now: Instant,
    ) -> Result<Decision> {
        let target = match target {
            Some(target) if !sitting => target,
            _ => {
                input.release_key(GameKey::Modifier)?;
                state.engagement.set_unless_sitting(EngagementState::Idle);
                return Ok(Decision::Idle);
            }
        };

        let centroid = target.centroid;
        let (dx, dy) = self.center.offset_to(centroid);
        let dist = dx.hypot(dy);
        let stable = dist < self.config.under_distance && self.previous_target == Some(centroid);

        let engage_line = if stable {
            self.closest_line(centroid)
        } else {
            None
        };

        let heading = direction::resolve(dx, dy);
        let decision = match engage_line {
            Some((line, line_distance)) => {
                info!(
                    "Target at ({}, {}), holding {} key. Distance: {:.1}",
                    centroid.x,
                    centroid.y,
                    GameKey::Modifier,
                    dist
                );
                input.hold_key(GameKey::Modifier)?;
                state.modifier_latch.mark(now);
                state.engagement = EngagementState::Engaging;
                Decision::Engage {
                    heading,
                    line,
                    line_distance,
                }
            }
            None => {
                input.release_key(GameKey::Modifier)?;
                state
                    .engagement
                    .set_unless_sitting(EngagementState::Traveling);
                Decision::Travel { heading }
            }
        };

        info!("Moving {}", GameKey::Move(heading.direction));
        input.press_key(GameKey::Move(heading.direction))?;

        self.previous_target = Some(centroid);
        Ok(decision)
    }

    /// First direction line, in resolution order, within the hold distance
    fn closest_line(&self, target: Point) -> Option<(Direction, f64)> {
        let start = (self.center.x as f64, self.center.y as f64);
        let point = (target.x as f64, target.y as f64);

        Direction::ALL.into_iter().find_map(|direction| {
            let end = ray_endpoint(self.center, direction.bearing(), self.config.line_length);
            match point_to_line_distance(point, start, end) {
                Some(distance) if distance < self.config.ctrl_hold_distance => {
                    Some((direction, distance))
                }
                Some(_) => None,
                None => {
                    trace!("Skipping degenerate {} line", direction);
                    None
                }
            }
        })
    }
}
