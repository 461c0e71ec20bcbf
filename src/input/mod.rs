mod injector;
mod mock;
#[cfg(all(target_os = "linux", feature = "uinput"))]
mod uinput;

pub use injector::{GameKey, InputInjector, LoggingInjector};
pub use mock::{KeyAction, RecordingInjector};
#[cfg(all(target_os = "linux", feature = "uinput"))]
pub use uinput::UinputInjector;
