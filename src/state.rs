use std::fmt;
use std::time::{Duration, Instant};

/// What the bot is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngagementState {
    #[default]
    Idle,
    Traveling,
    Engaging,
    SittingForHeals {
        health: i32,
        target: i32,
    },
}

impl EngagementState {
    pub fn is_sitting(&self) -> bool {
        matches!(self, EngagementState::SittingForHeals { .. })
    }

    /// Set a new state unless sitting for heals, which only the health monitor clears
    pub fn set_unless_sitting(&mut self, next: EngagementState) {
        if !self.is_sitting() {
            *self = next;
        }
    }
}

impl fmt::Display for EngagementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementState::Idle => f.write_str("Idle"),
            EngagementState::Traveling => f.write_str("Traveling to mob"),
            EngagementState::Engaging => f.write_str("Attacking mob"),
            EngagementState::SittingForHeals { health, target } => {
                write!(f, "Sitting for heals ({}/{})", health, target)
            }
        }
    }
}

/// Timestamp of the last time the attack modifier was held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierLatch {
    held_at: Option<Instant>,
}

impl ModifierLatch {
    pub fn mark(&mut self, now: Instant) {
        self.held_at = Some(now);
    }

    pub fn held_at(&self) -> Option<Instant> {
        self.held_at
    }

    /// Whether the modifier was held no more than `window` before `now`
    pub fn held_within(&self, now: Instant, window: Duration) -> bool {
        self.held_at
            .is_some_and(|held| now.saturating_duration_since(held) <= window)
    }
}

/// Mutable state shared by the engagement controller and the health monitor
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    pub engagement: EngagementState,
    pub modifier_latch: ModifierLatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(EngagementState::Idle.to_string(), "Idle");
        assert_eq!(EngagementState::Traveling.to_string(), "Traveling to mob");
        assert_eq!(EngagementState::Engaging.to_string(), "Attacking mob");
        assert_eq!(
            EngagementState::SittingForHeals {
                health: 100,
                target: 280
            }
            .to_string(),
            "Sitting for heals (100/280)"
        );
    }

    #[test]
    fn test_sitting_is_sticky() {
        let mut state = EngagementState::SittingForHeals {
            health: 90,
            target: 280,
        };
        state.set_unless_sitting(EngagementState::Traveling);
        assert!(state.is_sitting());

        let mut state = EngagementState::Engaging;
        state.set_unless_sitting(EngagementState::Idle);
        assert_eq!(state, EngagementState::Idle);
    }

    #[test]
    fn test_modifier_latch_window() {
        let start = Instant::now();
        let mut latch = ModifierLatch::default();
        assert!(!latch.held_within(start, Duration::from_secs(3)));

        latch.mark(start);
        assert!(latch.held_within(start, Duration::from_secs(3)));
        assert!(latch.held_within(start + Duration::from_secs(3), Duration::from_secs(3)));
        assert!(!latch.held_within(
            start + Duration::from_millis(3001),
            Duration::from_secs(3)
        ));
    }
}
