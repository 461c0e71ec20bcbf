use super::ControlLoop;
use crate::capture::FrameSource;
use crate::input::{GameKey, InputInjector};
use crate::memory::MemoryReader;

use tracing::{info, warn};

impl<S, M, I> ControlLoop<S, M, I>
where
    S: FrameSource,
    M: MemoryReader,
    I: InputInjector,
{
    /// Best-effort release of the modifier and every movement key.
    ///
    /// Each key is attempted even if an earlier release fails.
    pub fn release_held_keys(&mut self) -> usize {
        let mut failures = 0;
        for key in GameKey::HOLDABLE {
            if let Err(e) = self.input.release_key(key) {
                warn!("Failed to release {} key: {}", key, e);
                failures += 1;
            }
        }

        if failures == 0 {
            info!("Released all held keys");
        }
        failures
    }
}
