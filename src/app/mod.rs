mod controller;
mod runtime;
mod shutdown;
mod types;


pub use controller::ControlLoop;
pub use runtime::spawn_signal_handlers;
pub use types::{RunSummary, ShutdownReason, TickReport};
