//! Slider driven by twist deltas.

use tracing::debug;

use crate::gesture::pinch_twist::PinchTwistEvent;
use crate::gesture::GestureListener;

#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    /// Slider units per normalized twist unit.
    pub sensitivity: f32,
    /// Twist deltas smaller than this are ignored.
    pub deadzone: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            deadzone: 0.0025,
        }
    }
}

/// Moves a 0..1 slider by the change in twist since the last update.
#[derive(Debug, Clone)]
pub struct SliderDriver {
    pub config: SliderConfig,
    value: f32,
    /// Raw twist value mirrored for debug display.
    debug_value: f32,
    active: bool,
    last_twist: f32,
}

impl SliderDriver {
    pub fn new(config: SliderConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial.clamp(0.0, 1.0),
            debug_value: 0.0,
            active: false,
            last_twist: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn debug_value(&self) -> f32 {
        self.debug_value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle(&mut self, event: &PinchTwistEvent) {
        match *event {
            PinchTwistEvent::Started => {
                self.active = true;
                self.last_twist = 0.0;
            }
            PinchTwistEvent::Ended => {
                self.active = false;
            }
            PinchTwistEvent::Updated { value } => {
                self.debug_value = value;
                if !self.active {
                    return;
                }
                let delta = value - self.last_twist;
                self.last_twist = value;
                if delta.abs() < self.config.deadzone {
                    return;
                }
                self.value = (self.value + delta * self.config.sensitivity).clamp(0.0, 1.0);
                debug!(delta, value = self.value, "Slider moved");
            }
        }
    }
}

impl GestureListener<PinchTwistEvent> for SliderDriver {
    fn on_event(&mut self, event: &PinchTwistEvent) -> anyhow::Result<()> {
        self.handle(event);
        Ok(())
    }
}
