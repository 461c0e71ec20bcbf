use crate::config::HealthConfig;
use crate::error::Result;
use crate::input::{GameKey, InputInjector};
use crate::memory::MemoryReader;
use crate::state::{ControlState, EngagementState};

use std::time::Instant;
use tracing::{debug, info};

/// Result of one health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTransition {
    None,
    SatDown { health: i32 },
    StoodUp { health: i32 },
}

/// Sits down to regenerate when health runs low and stands up once it recovers.
///
/// Sitting is suppressed for a short window after the attack modifier was held so
/// an attack in progress is not interrupted.
pub struct HealthMonitor {
    config: HealthConfig,
    sitting: bool,
    last_health: Option<i32>,
}

impl HealthMonitor {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            config,
            sitting: false,
            last_health: None,
        }
    }

    pub fn is_sitting(&self) -> bool {
        self.sitting
    }

    /// Most recent reading, for status reporting only
    pub fn last_health(&self) -> Option<i32> {
        self.last_health
    }

    /// Read health and apply at most one transition.
    ///
    /// Sitting down pauses for the configured grace delay between releasing the
    /// held keys and pressing the sit toggle.
    pub async fn step<M, I>(
        &mut self,
        memory: &mut M,
        input: &mut I,
        state: &mut ControlState,
        now: Instant,
    ) -> Result<HealthTransition>
    where
        M: MemoryReader + ?Sized,
        I: InputInjector + ?Sized,
    {
        let health = memory.read_i32(self.config.address)?;
        self.last_health = Some(health);

        let ctrl_held_recently = state
            .modifier_latch
            .held_within(now, self.config.recent_hold_window());

        if health < self.config.low_threshold && !ctrl_held_recently {
            let mut transition = HealthTransition::None;
            if !self.sitting {
                info!("Health is low ({}), sitting down.", health);
                self.sitting = true;
                input.release_all()?;
                tokio::time::sleep(self.config.sit_grace()).await;
                input.press_key(GameKey::Sit)?;
                transition = HealthTransition::SatDown { health };
            }
            state.engagement = EngagementState::SittingForHeals {
                health,
                target: self.config.high_threshold,
            };
            return Ok(transition);
        }

        if health > self.config.high_threshold && self.sitting {
            info!("Health is above threshold ({}), standing up.", health);
            self.sitting = false;
            input.press_key(GameKey::Sit)?;
            state.engagement = EngagementState::Idle;
            return Ok(HealthTransition::StoodUp { health });
        }

        if health < self.config.low_threshold && !self.sitting {
            debug!(
                "Health {} is low but the attack modifier was held recently, not sitting",
                health
            );
        }

        Ok(HealthTransition::None)
    }
}
