use super::types::{RunSummary, ShutdownReason};
use super::ControlLoop;
use crate::capture::FrameSource;
use crate::error::Result;
use crate::input::InputInjector;
use crate::memory::MemoryReader;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

impl<S, M, I> ControlLoop<S, M, I>
where
    S: FrameSource,
    M: MemoryReader,
    I: InputInjector,
{
    /// Tick at the configured cadence until cancelled, the tick limit is reached,
    /// or a capability fails.
    ///
    /// Cancellation is only observed between ticks. Held keys are released on every
    /// exit path.
    pub async fn run(
        &mut self,
        cancel: CancellationToken,
        max_ticks: Option<u64>,
    ) -> Result<RunSummary> {
        info!(
            "Control loop running every {:?}",
            self.control.tick_interval()
        );

        let outcome = self.run_ticks(&cancel, max_ticks).await;
        self.release_held_keys();

        match outcome {
            Ok(reason) => {
                info!("Control loop stopped after {} tick(s): {:?}", self.ticks, reason);
                Ok(RunSummary {
                    reason,
                    ticks: self.ticks,
                })
            }
            Err(e) => {
                error!("Control loop halted after {} tick(s): {}", self.ticks, e);
                Err(e)
            }
        }
    }

    async fn run_ticks(
        &mut self,
        cancel: &CancellationToken,
        max_ticks: Option<u64>,
    ) -> Result<ShutdownReason> {
        let interval = self.control.tick_interval();

        loop {
            if cancel.is_cancelled() {
                return Ok(ShutdownReason::Signal("cancelled".to_string()));
            }
            if let Some(limit) = max_ticks {
                if self.ticks >= limit {
                    return Ok(ShutdownReason::TickLimit(limit));
                }
            }

            self.tick().await?;

            tokio::select! {
                _ = cancel.cancelled() => {
                    return Ok(ShutdownReason::Signal("cancelled".to_string()));
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}

/// Cancel `cancel` on SIGINT or SIGTERM
pub fn spawn_signal_handlers(cancel: CancellationToken) -> oneshot::Receiver<ShutdownReason> {
    let (sender, receiver) = oneshot::channel();

    tokio::spawn(async move {
        let reason = wait_for_signal().await;
        info!("Received {} signal", reason);
        let _ = sender.send(ShutdownReason::Signal(reason.to_string()));
        cancel.cancel();
    });

    receiver
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            }
        }
        Err(e) => {
            error!("Failed to register SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            "SIGINT"
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "SIGINT"
}
