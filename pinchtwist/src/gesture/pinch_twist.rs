//! Pinch-and-twist gesture recognition.
//!
//! Turns per-frame pinch strength and hand orientation into discrete
//! start/update/end events.  Pinch strength is gated with separate start
//! and release thresholds; the twist angle is measured about the hand's
//! forward axis relative to the orientation captured when the pinch began,
//! deadbanded, normalized to [-1, 1] and only reported when it moves by
//! more than a minimum step.

use tracing::debug;

use super::observer::{GestureListener, ListenerId, Listeners};
use crate::error::ConfigError;
use crate::hand::bones::FingertipRefs;
use crate::hand::math::Vec3;
use crate::hand::source::{FrameSample, SkeletonSource, TrackingSource};

/// Floor for the max-angle divisor.
const MIN_TWIST_DIVISOR_DEG: f32 = 1e-3;

// ── Events ─────────────────────────────────────────────────

/// Events emitted by the pinch-twist recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchTwistEvent {
    /// Pinch held and twist passed the minimum angle.
    Started,
    /// Signed normalized twist, -1.0..=1.0 (right positive).
    Updated { value: f32 },
    /// Pinch released or tracking lost after a `Started`.
    Ended,
}

impl PinchTwistEvent {
    /// Event name for s-expression output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "twist-started",
            Self::Updated { .. } => "twist-updated",
            Self::Ended => "twist-ended",
        }
    }

    /// Format as an event s-expression.
    pub fn to_sexp(&self) -> String {
        match self {
            Self::Updated { value } => {
                format!("(:type :event :event :{} :value {:.3})", self.as_str(), value)
            }
            _ => format!("(:type :event :event :{})", self.as_str()),
        }
    }
}

// ── Config ─────────────────────────────────────────────────

/// Thresholds for pinch-twist recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct PinchTwistConfig {
    /// Pinch strength required to begin tracking a twist.
    pub pinch_start_strength: f32,
    /// Pinch strength below which the gesture ends.
    pub pinch_release_strength: f32,
    /// Treat low-confidence tracking like lost tracking.
    pub require_high_confidence: bool,
    /// Twist (degrees) that maps to 1.0.
    pub max_twist_angle_deg: f32,
    /// Twist (degrees) needed before the gesture starts.
    pub min_angle_to_twist_deg: f32,
    /// Minimum change in normalized value before an update is emitted.
    pub min_delta_normalized_to_fire: f32,
    /// Twist (degrees) below which the angle is treated as zero.
    pub angle_deadband_deg: f32,
}

impl Default for PinchTwistConfig {
    fn default() -> Self {
        Self {
            pinch_start_strength: 0.7,
            pinch_release_strength: 0.3,
            require_high_confidence: true,
            max_twist_angle_deg: 90.0,
            min_angle_to_twist_deg: 5.0,
            min_delta_normalized_to_fire: 0.01,
            angle_deadband_deg: 1.0,
        }
    }
}

impl PinchTwistConfig {
    /// Check tunable ranges and relationships.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("pinch-start", self.pinch_start_strength),
            ("pinch-release", self.pinch_release_strength),
            ("max-twist-angle", self.max_twist_angle_deg),
            ("min-angle-to-twist", self.min_angle_to_twist_deg),
            ("min-delta", self.min_delta_normalized_to_fire),
            ("angle-deadband", self.angle_deadband_deg),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for &(field, value) in &fields[..2] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        if self.pinch_start_strength < self.pinch_release_strength {
            return Err(ConfigError::StartBelowRelease {
                start: self.pinch_start_strength,
                release: self.pinch_release_strength,
            });
        }

        if self.max_twist_angle_deg <= 0.0 {
            return Err(ConfigError::NonPositiveMaxTwist(self.max_twist_angle_deg));
        }

        for &(field, value) in &fields[3..] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }

    /// Render as an s-expression plist.
    pub fn to_sexp(&self) -> String {
        format!(
            "(:pinch-start {:.2} :pinch-release {:.2} :require-high-confidence {} :max-twist-angle {:.1} :min-angle-to-twist {:.1} :min-delta {:.3} :angle-deadband {:.1})",
            self.pinch_start_strength,
            self.pinch_release_strength,
            if self.require_high_confidence { "t" } else { "nil" },
            self.max_twist_angle_deg,
            self.min_angle_to_twist_deg,
            self.min_delta_normalized_to_fire,
            self.angle_deadband_deg,
        )
    }
}

// ── State ──────────────────────────────────────────────────

/// Recognizer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwistPhase {
    Idle,
    /// Pinch held, twist not yet past the minimum angle.
    Pinching,
    ActiveTwist,
}

impl TwistPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pinching => "pinching",
            Self::ActiveTwist => "active-twist",
        }
    }
}

/// Pinch-twist state machine.
#[derive(Debug, Clone)]
pub struct PinchTwistRecognizer {
    config: PinchTwistConfig,
    phase: TwistPhase,
    /// Up vector captured when the pinch began; the twist's zero point.
    reference_up: Vec3,
    last_reported: f32,
    raised_start: bool,
    tips: FingertipRefs,
}

impl PinchTwistRecognizer {
    /// Create a recognizer, rejecting invalid configuration.
    pub fn new(config: PinchTwistConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: TwistPhase::Idle,
            reference_up: Vec3::UP,
            last_reported: 0.0,
            raised_start: false,
            tips: FingertipRefs::new(),
        })
    }

    pub fn config(&self) -> &PinchTwistConfig {
        &self.config
    }

    pub fn phase(&self) -> TwistPhase {
        self.phase
    }

    /// Last normalized value reported through `Updated`.
    pub fn last_reported(&self) -> f32 {
        self.last_reported
    }

    pub fn tips_resolved(&self) -> bool {
        self.tips.is_resolved()
    }

    /// Advance one tick.
    ///
    /// The skeleton is only consulted while the fingertips are unresolved.
    /// Events come back in emission order: `Started`, then at most one
    /// `Updated`, or a lone `Ended`.
    pub fn process<S: SkeletonSource + ?Sized>(
        &mut self,
        sample: &FrameSample,
        skeleton: &S,
    ) -> Vec<PinchTwistEvent> {
        let mut events = Vec::new();

        if !self.tips.is_resolved() {
            self.tips.resolve(skeleton);
        }

        if !sample.tracking_valid
            || (self.config.require_high_confidence && !sample.high_confidence)
        {
            if self.phase != TwistPhase::Idle {
                debug!(
                    phase = self.phase.as_str(),
                    valid = sample.tracking_valid,
                    high_confidence = sample.high_confidence,
                    "Pinch-twist: tracking degraded, releasing"
                );
            }
            self.end_gesture(&mut events);
            return events;
        }

        let pinch = sample.pinch_strength;
        match self.phase {
            TwistPhase::Idle => {
                if pinch >= self.config.pinch_start_strength && self.tips.is_resolved() {
                    self.reference_up = sample.up;
                    self.last_reported = 0.0;
                    self.raised_start = false;
                    self.phase = TwistPhase::Pinching;
                    debug!(pinch, "Pinch-twist: pinch started");
                }
            }
            TwistPhase::Pinching => {
                if pinch < self.config.pinch_release_strength {
                    self.end_gesture(&mut events);
                } else if self.twist_angle_deg(sample).abs() >= self.config.min_angle_to_twist_deg {
                    if !self.raised_start {
                        self.raised_start = true;
                        events.push(PinchTwistEvent::Started);
                        debug!("Pinch-twist: twist started");
                    }
                    self.phase = TwistPhase::ActiveTwist;
                    // Same sample feeds the first update.
                    self.update_twist(sample, &mut events);
                }
            }
            TwistPhase::ActiveTwist => {
                if pinch < self.config.pinch_release_strength {
                    self.end_gesture(&mut events);
                } else {
                    self.update_twist(sample, &mut events);
                }
            }
        }

        events
    }

    /// Abandon any gesture in progress (e.g. when the host disables the
    /// recognizer). Returns `Ended` if a twist had started.
    pub fn reset(&mut self) -> Vec<PinchTwistEvent> {
        let mut events = Vec::new();
        self.end_gesture(&mut events);
        events
    }

    /// Signed twist from the reference orientation, degrees.
    fn twist_angle_deg(&self, sample: &FrameSample) -> f32 {
        self.reference_up.signed_angle_deg(sample.up, sample.forward)
    }

    fn update_twist(&mut self, sample: &FrameSample, events: &mut Vec<PinchTwistEvent>) {
        let mut delta_deg = self.twist_angle_deg(sample);
        if delta_deg.abs() < self.config.angle_deadband_deg {
            delta_deg = 0.0;
        }

        let divisor = self.config.max_twist_angle_deg.max(MIN_TWIST_DIVISOR_DEG);
        let abs_norm = (delta_deg.abs() / divisor).clamp(0.0, 1.0);
        let sign = if delta_deg < 0.0 { -1.0 } else { 1.0 };
        let signed_norm = (sign * abs_norm).clamp(-1.0, 1.0);

        if (signed_norm - self.last_reported).abs() >= self.config.min_delta_normalized_to_fire {
            self.last_reported = signed_norm;
            events.push(PinchTwistEvent::Updated { value: signed_norm });
        }
    }

    /// Return to Idle, emitting `Ended` if this episode emitted `Started`.
    fn end_gesture(&mut self, events: &mut Vec<PinchTwistEvent>) {
        if self.phase == TwistPhase::ActiveTwist && self.raised_start {
            events.push(PinchTwistEvent::Ended);
            debug!("Pinch-twist: twist ended");
        }
        self.phase = TwistPhase::Idle;
        self.raised_start = false;
        self.last_reported = 0.0;
    }

    /// Generate s-expression for status reporting.
    pub fn status_sexp(&self) -> String {
        format!(
            "(:phase :{} :tips-resolved {} :last-value {:.3})",
            self.phase.as_str(),
            if self.tips.is_resolved() { "t" } else { "nil" },
            self.last_reported,
        )
    }
}

// ── Event source ───────────────────────────────────────────

/// Recognizer plus listener fan-out, sampled from a tracking source.
pub struct PinchTwistSource {
    recognizer: PinchTwistRecognizer,
    listeners: Listeners<PinchTwistEvent>,
}

impl PinchTwistSource {
    pub fn new(config: PinchTwistConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            recognizer: PinchTwistRecognizer::new(config)?,
            listeners: Listeners::new(),
        })
    }

    pub fn recognizer(&self) -> &PinchTwistRecognizer {
        &self.recognizer
    }

    pub fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: GestureListener<PinchTwistEvent> + 'static,
    {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Reset the recognizer, dispatching `Ended` if a twist was active.
    pub fn reset(&mut self) -> Vec<PinchTwistEvent> {
        let events = self.recognizer.reset();
        if !events.is_empty() {
            self.listeners.dispatch(&events);
        }
        events
    }

    /// Sample, recognize and dispatch one tick. Returns the events.
    pub fn tick<T, S>(&mut self, tracking: &T, skeleton: &S) -> Vec<PinchTwistEvent>
    where
        T: TrackingSource + ?Sized,
        S: SkeletonSource + ?Sized,
    {
        let sample = FrameSample::capture(tracking);
        let events = self.recognizer.process(&sample, skeleton);
        if !events.is_empty() {
            self.listeners.dispatch(&events);
        }
        events
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn scenario_config() -> PinchTwistConfig {
    PinchTwistConfig {
        pinch_start_strength: 0.7,
        pinch_release_strength: 0.3,
        require_high_confidence: true,
        max_twist_angle_deg: 90.0,
        min_angle_to_twist_deg: 5.0,
        min_delta_normalized_to_fire: 0.01,
        angle_deadband_deg: 1.0,
    }
}

/// Sample with up rotated `twist_deg` about +Z from +Y.
#[cfg(test)]
fn twisted(pinch: f32, twist_deg: f32) -> FrameSample {
    let rad = twist_deg.to_radians();
    FrameSample {
        pinch_strength: pinch,
        up: Vec3::new(-rad.sin(), rad.cos(), 0.0),
        forward: Vec3::FORWARD,
        tracking_valid: true,
        high_confidence: true,
    }
}

// ── Tests ──────────────────────────────────────────────────
