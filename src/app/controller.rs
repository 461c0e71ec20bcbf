use super::types::TickReport;
use crate::calibration::Calibration;
use crate::capture::FrameSource;
use crate::config::{ColorbotConfig, ControlConfig};
use crate::detector::{select_nearest, TargetDetector};
use crate::engagement::EngagementController;
use crate::error::Result;
use crate::health::HealthMonitor;
use crate::input::InputInjector;
use crate::memory::MemoryReader;
use crate::state::ControlState;

use std::time::Instant;
use tracing::{debug, info};

/// Single-threaded capture, detect, decide and act loop.
///
/// Owns the calibration, the shared control state and the three capabilities it
/// drives. Components only see the slices of state they need for each step.
pub struct ControlLoop<S, M, I>
where
    S: FrameSource,
    M: MemoryReader,
    I: InputInjector,
{
    pub(super) control: ControlConfig,
    pub(super) calibration: Calibration,
    pub(super) detector: TargetDetector,
    pub(super) engagement: EngagementController,
    pub(super) health: HealthMonitor,
    pub(super) state: ControlState,
    pub(super) source: S,
    pub(super) memory: M,
    pub(super) input: I,
    pub(super) ticks: u64,
}

impl<S, M, I> ControlLoop<S, M, I>
where
    S: FrameSource,
    M: MemoryReader,
    I: InputInjector,
{
    /// Build a loop from complete calibration and the capability backends
    pub fn new(
        config: &ColorbotConfig,
        calibration: Calibration,
        source: S,
        memory: M,
        input: I,
    ) -> Self {
        info!(
            "Creating control loop for region {} centered at ({}, {})",
            calibration.region, calibration.center.x, calibration.center.y
        );

        Self {
            control: config.control.clone(),
            detector: TargetDetector::new(calibration.color_range),
            engagement: EngagementController::new(
                config.engagement.clone(),
                calibration.center,
            ),
            health: HealthMonitor::new(config.health.clone()),
            calibration,
            state: ControlState::default(),
            source,
            memory,
            input,
            ticks: 0,
        }
    }

    /// Run a single capture → detect → engage → health iteration
    pub async fn tick(&mut self) -> Result<TickReport> {
        let frame = self.source.capture(&self.calibration.region)?;
        let now = Instant::now();

        let candidates = self.detector.detect(&frame, self.calibration.center);
        let target = select_nearest(&candidates).cloned();
        if let Some(target) = &target {
            debug!(
                "Selected target at ({}, {}) r={:.1} dist={:.1} out of {} candidate(s)",
                target.centroid.x,
                target.centroid.y,
                target.radius,
                target.distance,
                candidates.len()
            );
        }

        let decision = self.engagement.step(
            target.as_ref(),
            self.health.is_sitting(),
            &mut self.state,
            &mut self.input,
            now,
        )?;

        let transition = self
            .health
            .step(&mut self.memory, &mut self.input, &mut self.state, now)
            .await?;

        self.ticks += 1;
        debug!(
            "Tick {} frame {}: {:?}, status: {}",
            self.ticks,
            frame.id,
            decision,
            self.state.engagement
        );

        Ok(TickReport {
            tick: self.ticks,
            frame_id: frame.id,
            candidates: candidates.len(),
            target,
            decision,
            health: self.health.last_health(),
            transition,
            state: self.state.engagement,
        })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_sitting(&self) -> bool {
        self.health.is_sitting()
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}
