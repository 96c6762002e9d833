//! Keyboard twist emulation.
//!
//! Produces the pinch-twist event stream from two held keys so UI can be
//! exercised without hand tracking.

use super::pinch_twist::PinchTwistEvent;

/// Per-frame state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Up,
    /// Went down this frame.
    Pressed,
    Held,
    /// Went up this frame.
    Released,
}

impl KeyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Pressed => "pressed",
            Self::Held => "held",
            Self::Released => "released",
        }
    }

    pub fn parse(s: &str) -> Option<KeyState> {
        match s {
            "up" => Some(Self::Up),
            "pressed" => Some(Self::Pressed),
            "held" => Some(Self::Held),
            "released" => Some(Self::Released),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardTwistConfig {
    /// Normalized twist per second while a key is down.
    pub increment_per_second: f32,
}

impl Default for KeyboardTwistConfig {
    fn default() -> Self {
        Self {
            increment_per_second: 0.5,
        }
    }
}

/// Accumulates a twist value from right/left key states.
#[derive(Debug, Clone)]
pub struct KeyboardTwist {
    pub config: KeyboardTwistConfig,
    /// Unclamped accumulator; reported values are clamped.
    value: f32,
}

impl KeyboardTwist {
    pub fn new(config: KeyboardTwistConfig) -> Self {
        Self { config, value: 0.0 }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Process one frame. The right key is handled before the left.
    pub fn update(&mut self, right: KeyState, left: KeyState, dt: f32) -> Vec<PinchTwistEvent> {
        let mut events = Vec::new();
        self.apply_key(right, 1.0, dt, &mut events);
        self.apply_key(left, -1.0, dt, &mut events);
        events
    }

    fn apply_key(&mut self, state: KeyState, sign: f32, dt: f32, events: &mut Vec<PinchTwistEvent>) {
        if state == KeyState::Pressed {
            self.value = 0.0;
            events.push(PinchTwistEvent::Started);
        }

        if matches!(state, KeyState::Pressed | KeyState::Held) {
            self.value += dt * self.config.increment_per_second * sign;
            events.push(PinchTwistEvent::Updated {
                value: self.value.clamp(-1.0, 1.0),
            });
        }

        if state == KeyState::Released {
            events.push(PinchTwistEvent::Ended);
        }
    }
}
