pub mod app;
pub mod calibration;
pub mod capture;
pub mod color;
pub mod config;
pub mod detector;
pub mod direction;
pub mod engagement;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod health;
pub mod input;
pub mod memory;
pub mod state;

pub use app::{spawn_signal_handlers, ControlLoop, RunSummary, ShutdownReason, TickReport};
pub use calibration::{Calibration, CalibrationSource, ConfigCalibration};
pub use capture::{FrameSource, ImageSequenceSource, StaticSource};
pub use color::{ColorRange, Hsv};
pub use config::ColorbotConfig;
pub use detector::{TargetCandidate, TargetDetector};
pub use direction::{Direction, Heading};
pub use engagement::{Decision, EngagementController};
pub use error::{ColorbotError, Result};
pub use frame::{Frame, Region};
pub use geometry::Point;
pub use health::{HealthMonitor, HealthTransition};
pub use input::{GameKey, InputInjector, LoggingInjector};
pub use memory::{MemoryReader, ScriptedMemoryReader};
pub use state::{ControlState, EngagementState};
