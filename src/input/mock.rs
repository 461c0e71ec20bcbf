use super::{GameKey, InputInjector};
use crate::direction::Direction;
use crate::error::Result;

/// Key event recorded by [`RecordingInjector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press(GameKey),
    Hold(GameKey),
    Release(GameKey),
}

/// Input backend for tests that records every call instead of sending it
#[derive(Debug, Default)]
pub struct RecordingInjector {
    actions: Vec<KeyAction>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[KeyAction] {
        &self.actions
    }

    /// Number of short presses of `key`
    pub fn presses(&self, key: GameKey) -> usize {
        self.actions
            .iter()
            .filter(|action| **action == KeyAction::Press(key))
            .count()
    }

    /// Directions of every movement press, in order
    pub fn moves(&self) -> Vec<Direction> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                KeyAction::Press(GameKey::Move(direction)) => Some(*direction),
                _ => None,
            })
            .collect()
    }
}

impl InputInjector for RecordingInjector {
    fn hold_key(&mut self, key: GameKey) -> Result<()> {
        self.actions.push(KeyAction::Hold(key));
        Ok(())
    }

    fn release_key(&mut self, key: GameKey) -> Result<()> {
        self.actions.push(KeyAction::Release(key));
        Ok(())
    }

    fn press_key(&mut self, key: GameKey) -> Result<()> {
        self.actions.push(KeyAction::Press(key));
        Ok(())
    }
}
