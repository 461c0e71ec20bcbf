use super::{GameKey, InputInjector};
use crate::direction::Direction;
use crate::error::{InputError, Result};

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use std::time::Duration;
use tracing::info;

const KEY_DOWN: i32 = 1;
const KEY_UP: i32 = 0;

/// Virtual keyboard backed by `/dev/uinput`
pub struct UinputInjector {
    device: VirtualDevice,
    press_duration: Duration,
}

impl UinputInjector {
    pub fn new(press_duration: Duration) -> Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for key in GameKey::ALL {
            keys.insert(key_code(key));
        }

        let device = VirtualDeviceBuilder::new()
            .and_then(|builder| builder.name("colorbot virtual keyboard").with_keys(&keys))
            .and_then(|builder| builder.build())
            .map_err(|e| InputError::DeviceUnavailable(format!("/dev/uinput: {}", e)))?;

        info!("Created uinput virtual keyboard");
        Ok(Self {
            device,
            press_duration,
        })
    }

    fn emit(&mut self, key: GameKey, value: i32) -> Result<()> {
        let event = InputEvent::new(EventType::KEY, key_code(key).code(), value);
        self.device
            .emit(&[event])
            .map_err(|e| InputError::Emit(format!("{} ({}): {}", key, value, e)))?;
        Ok(())
    }
}

/// Numeric keypad for movement, left control to attack, F11 to sit
fn key_code(key: GameKey) -> Key {
    match key {
        GameKey::Modifier => Key::KEY_LEFTCTRL,
        GameKey::Sit => Key::KEY_F11,
        GameKey::Move(Direction::Up) => Key::KEY_KP8,
        GameKey::Move(Direction::Right) => Key::KEY_KP6,
        GameKey::Move(Direction::Down) => Key::KEY_KP2,
        GameKey::Move(Direction::Left) => Key::KEY_KP4,
    }
}

impl InputInjector for UinputInjector {
    fn hold_key(&mut self, key: GameKey) -> Result<()> {
        self.emit(key, KEY_DOWN)
    }

    fn release_key(&mut self, key: GameKey) -> Result<()> {
        self.emit(key, KEY_UP)
    }

    fn press_duration(&self) -> Duration {
        self.press_duration
    }
}
