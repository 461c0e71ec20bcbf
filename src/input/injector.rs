use crate::direction::Direction;
use crate::error::Result;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Logical game key, mapped to a platform key code by each backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Held while attacking
    Modifier,
    /// Toggles sitting
    Sit,
    Move(Direction),
}

impl GameKey {
    /// Every key a backend must be able to emit
    pub const ALL: [GameKey; 6] = [
        GameKey::Modifier,
        GameKey::Sit,
        GameKey::Move(Direction::Up),
        GameKey::Move(Direction::Right),
        GameKey::Move(Direction::Down),
        GameKey::Move(Direction::Left),
    ];

    /// Keys that may be left held down between ticks
    pub const HOLDABLE: [GameKey; 5] = [
        GameKey::Modifier,
        GameKey::Move(Direction::Up),
        GameKey::Move(Direction::Right),
        GameKey::Move(Direction::Down),
        GameKey::Move(Direction::Left),
    ];
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKey::Modifier => f.write_str("CTRL"),
            GameKey::Sit => f.write_str("SIT"),
            GameKey::Move(direction) => write!(f, "{}", direction.label().to_uppercase()),
        }
    }
}

/// Synthetic keyboard input. Calls are synchronous and fire-and-forget.
pub trait InputInjector {
    /// Press without releasing
    fn hold_key(&mut self, key: GameKey) -> Result<()>;

    fn release_key(&mut self, key: GameKey) -> Result<()>;

    /// How long `press_key` keeps the key down
    fn press_duration(&self) -> Duration {
        Duration::from_millis(50)
    }

    /// A single short key press
    fn press_key(&mut self, key: GameKey) -> Result<()> {
        self.hold_key(key)?;
        std::thread::sleep(self.press_duration());
        self.release_key(key)
    }

    /// Release the modifier and every movement key
    fn release_all(&mut self) -> Result<()> {
        for key in GameKey::HOLDABLE {
            self.release_key(key)?;
        }
        Ok(())
    }
}

impl<T: InputInjector + ?Sized> InputInjector for Box<T> {
    fn hold_key(&mut self, key: GameKey) -> Result<()> {
        (**self).hold_key(key)
    }

    fn release_key(&mut self, key: GameKey) -> Result<()> {
        (**self).release_key(key)
    }

    fn press_duration(&self) -> Duration {
        (**self).press_duration()
    }

    fn press_key(&mut self, key: GameKey) -> Result<()> {
        (**self).press_key(key)
    }

    fn release_all(&mut self) -> Result<()> {
        (**self).release_all()
    }
}

/// Dry-run backend that only logs what it would send
#[derive(Debug, Default)]
pub struct LoggingInjector;

impl LoggingInjector {
    pub fn new() -> Self {
        Self
    }
}

impl InputInjector for LoggingInjector {
    fn hold_key(&mut self, key: GameKey) -> Result<()> {
        info!("[dry-run] hold {}", key);
        Ok(())
    }

    fn release_key(&mut self, key: GameKey) -> Result<()> {
        debug!("[dry-run] release {}", key);
        Ok(())
    }

    fn press_key(&mut self, key: GameKey) -> Result<()> {
        info!("[dry-run] press {}", key);
        Ok(())
    }
}
