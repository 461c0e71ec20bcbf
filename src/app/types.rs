use crate::detector::TargetCandidate;
use crate::engagement::Decision;
use crate::health::HealthTransition;
use crate::state::EngagementState;

use tokio::sync::oneshot;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub frame_id: u64,
    /// Number of color blobs found in the frame
    pub candidates: usize,
    /// Selected nearest target
    pub target: Option<TargetCandidate>,
    pub decision: Decision,
    pub health: Option<i32>,
    pub transition: HealthTransition,
    pub state: EngagementState,
}

/// Why the control loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    Signal(String),
    TickLimit(u64),
}

/// Final tally returned by a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: ShutdownReason,
    pub ticks: u64,
}

impl RunSummary {
    /// Replace a bare cancellation with the signal that caused it, if one arrived
    pub fn with_signal(mut self, signal: &mut oneshot::Receiver<ShutdownReason>) -> Self {
        if matches!(self.reason, ShutdownReason::Signal(_)) {
            if let Ok(reason) = signal.try_recv() {
                self.reason = reason;
            }
        }
        self
    }
}
