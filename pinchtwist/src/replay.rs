//! Scripted replay of hand and keyboard input.
//!
//! Stands in for the XR runtime: each script line is a plist describing
//! one tick of input, and every resulting event is written out as an
//! s-expression.
//!
//! ```text
//! ; pinch, then twist right
//! (:type :frame :pinch 0.8 :twist 0)
//! (:type :frame :twist 10)
//! (:type :frame :pinch 0.2)
//! (:type :key :key :right :state :pressed :dt 0.1)
//! (:type :microgesture :gesture :swipe-left)
//! ```
//!
//! Frame fields not given keep their previous value. A frame may also
//! move one skeleton joint with `:joint :index-tip :at (x y z)`.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::Context;
use lexpr::Value;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::gesture::keyboard::{KeyState, KeyboardTwist};
use crate::gesture::microgesture::{Microgesture, MoveInputMapper, NavCommand};
use crate::gesture::observer::{Listeners, Shared};
use crate::gesture::pinch_twist::{PinchTwistEvent, PinchTwistSource};
use crate::hand::math::Vec3;
use crate::hand::skeleton::{Hand, HandJoint, HandSkeleton, JointPose};
use crate::hand::source::{Finger, OrientationRef, TrackingConfidence, TrackingSource};
use crate::sexp::{format_event, get_bool, get_float, get_keyword, get_vec3};
use crate::ui::feedback::ConfidenceIndicator;
use crate::ui::slider::SliderDriver;

/// Frame time for key lines without `:dt`.
const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Initial slider position.
const SLIDER_START: f32 = 0.5;

// ── Scripted hand ──────────────────────────────────────────

/// Tracking state set by script lines.
#[derive(Debug, Clone)]
pub struct ScriptedHand {
    pub pinch: f32,
    pub up: Vec3,
    pub forward: Vec3,
    pub valid: bool,
    pub high_confidence: bool,
    pub skeleton: HandSkeleton,
}

impl ScriptedHand {
    pub fn new(hand: Hand) -> Self {
        let orientation = OrientationRef::default();
        Self {
            pinch: 0.0,
            up: orientation.up,
            forward: orientation.forward,
            valid: true,
            high_confidence: true,
            skeleton: HandSkeleton::new(hand),
        }
    }

    /// Roll the hand `deg` degrees about +Z, starting from up = +Y.
    pub fn set_twist(&mut self, deg: f32) {
        let rad = deg.to_radians();
        self.up = Vec3::new(-rad.sin(), rad.cos(), 0.0);
        self.forward = Vec3::FORWARD;
    }

    fn apply_frame(&mut self, value: &Value) {
        if let Some(p) = get_float(value, "pinch") {
            self.pinch = p as f32;
        }
        if let Some(deg) = get_float(value, "twist") {
            self.set_twist(deg as f32);
        } else {
            if let Some(up) = get_vec3(value, "up") {
                self.up = up;
            }
            if let Some(forward) = get_vec3(value, "forward") {
                self.forward = forward;
            }
        }
        if let Some(valid) = get_bool(value, "valid") {
            self.valid = valid;
        }
        if let Some(high) = get_bool(value, "high-confidence") {
            self.high_confidence = high;
        }
        if let Some(bones) = get_bool(value, "bones") {
            self.skeleton.bones_available = bones;
        }
        if let Some(name) = get_keyword(value, "joint") {
            match (HandJoint::parse(&name), get_vec3(value, "at")) {
                (Some(joint), Some(position)) => {
                    let pose = JointPose {
                        position,
                        ..*self.skeleton.joint(joint)
                    };
                    self.skeleton.set_joint(joint, pose);
                }
                _ => warn!("frame :joint {} needs a known joint and :at (x y z)", name),
            }
        }
    }

    /// Position of one skeleton joint.
    pub fn joint_position(&self, joint: HandJoint) -> Vec3 {
        self.skeleton.joint(joint).position
    }
}

impl TrackingSource for ScriptedHand {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_high_confidence(&self) -> bool {
        self.high_confidence
    }

    fn pinch_strength(&self, finger: Finger) -> f32 {
        match finger {
            Finger::Index => self.pinch,
            _ => 0.0,
        }
    }

    fn orientation(&self) -> OrientationRef {
        OrientationRef {
            up: self.up,
            forward: self.forward,
        }
    }
}

// ── Replay ─────────────────────────────────────────────────

/// Counters reported at the end of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub ticks: u64,
    pub events: u64,
    pub skipped_lines: u64,
}

/// Which input produced a twist event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TwistInput {
    Hand,
    Keyboard,
}

impl TwistInput {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Hand => "hand",
            Self::Keyboard => "keyboard",
        }
    }
}

/// Hand, keyboard and microgesture inputs wired to a shared slider.
pub struct Replay {
    hand: ScriptedHand,
    source: PinchTwistSource,
    keyboard: KeyboardTwist,
    keyboard_listeners: Listeners<PinchTwistEvent>,
    slider: Rc<RefCell<SliderDriver>>,
    mover: MoveInputMapper,
    confidence: ConfidenceIndicator<&'static str>,
    stats: ReplayStats,
}

impl Replay {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let slider = Rc::new(RefCell::new(SliderDriver::new(
            config.slider.clone(),
            SLIDER_START,
        )));

        let mut source = PinchTwistSource::new(config.twist.clone())?;
        source.add_listener(Shared::new(&slider));

        let mut keyboard_listeners = Listeners::new();
        keyboard_listeners.add(Shared::new(&slider));

        Ok(Self {
            hand: ScriptedHand::new(Hand::Right),
            source,
            keyboard: KeyboardTwist::new(config.keyboard.clone()),
            keyboard_listeners,
            slider,
            mover: MoveInputMapper::new(),
            confidence: ConfidenceIndicator::new("high-confidence", "low-confidence"),
            stats: ReplayStats::default(),
        })
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    pub fn slider_value(&self) -> f32 {
        self.slider.borrow().value()
    }

    pub fn source(&self) -> &PinchTwistSource {
        &self.source
    }

    pub fn hand(&self) -> &ScriptedHand {
        &self.hand
    }

    /// Run a whole script.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<ReplayStats> {
        for (idx, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read script line {}", idx + 1))?;
            self.step(idx + 1, &line, out)?;
        }
        out.flush().context("failed to flush replay output")?;

        info!(
            ticks = self.stats.ticks,
            events = self.stats.events,
            skipped = self.stats.skipped_lines,
            slider = self.slider_value(),
            "Replay finished"
        );
        Ok(self.stats)
    }

    /// Process one script line. Only output errors are returned.
    pub fn step<W: Write>(&mut self, line_no: usize, line: &str, out: &mut W) -> anyhow::Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            return Ok(());
        }

        let value = match lexpr::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(line = line_no, "malformed s-expression: {}", e);
                self.stats.skipped_lines += 1;
                return Ok(());
            }
        };

        let lines = match get_keyword(&value, "type").as_deref() {
            Some("frame") => self.frame(&value),
            Some("key") => self.key(line_no, &value),
            Some("microgesture") => self.microgesture(line_no, &value),
            other => {
                warn!(line = line_no, "unknown replay entry type: {:?}", other);
                None
            }
        };

        let Some(lines) = lines else {
            self.stats.skipped_lines += 1;
            return Ok(());
        };
        for msg in lines {
            writeln!(out, "{}", msg).context("failed to write event")?;
            self.stats.events += 1;
        }
        Ok(())
    }

    fn frame(&mut self, value: &Value) -> Option<Vec<String>> {
        self.hand.apply_frame(value);
        self.stats.ticks += 1;
        let tick = self.stats.ticks;

        let mut lines = Vec::new();
        if let Some(material) = self.confidence.update(self.hand.confidence()) {
            let level = match self.hand.confidence() {
                TrackingConfidence::High => "high",
                TrackingConfidence::Low => "low",
            };
            let tick = tick.to_string();
            lines.push(format_event(
                "confidence",
                &[("tick", &tick), ("level", &format!(":{}", level)), ("material", &format!(":{}", material))],
            ));
        }

        let events = self.source.tick(&self.hand, &self.hand.skeleton);
        lines.extend(
            events
                .iter()
                .map(|e| self.twist_line(tick, TwistInput::Hand, e)),
        );
        Some(lines)
    }

    fn key(&mut self, line_no: usize, value: &Value) -> Option<Vec<String>> {
        let state = get_keyword(value, "state").as_deref().and_then(KeyState::parse);
        let Some(state) = state else {
            warn!(line = line_no, "key entry needs :state :pressed|:held|:released|:up");
            return None;
        };
        let (right, left) = match get_keyword(value, "key").as_deref() {
            Some("right") => (state, KeyState::Up),
            Some("left") => (KeyState::Up, state),
            other => {
                warn!(line = line_no, "key entry needs :key :right|:left, got {:?}", other);
                return None;
            }
        };
        let dt = get_float(value, "dt").map(|d| d as f32).unwrap_or(DEFAULT_DT);

        self.stats.ticks += 1;
        let tick = self.stats.ticks;
        let events = self.keyboard.update(right, left, dt);
        let failures = self.keyboard_listeners.dispatch(&events);
        if failures > 0 {
            debug!(failures, "Keyboard listeners failed");
        }
        Some(
            events
                .iter()
                .map(|e| self.twist_line(tick, TwistInput::Keyboard, e))
                .collect(),
        )
    }

    fn microgesture(&mut self, line_no: usize, value: &Value) -> Option<Vec<String>> {
        let gesture = get_keyword(value, "gesture")
            .as_deref()
            .and_then(Microgesture::parse);
        let Some(gesture) = gesture else {
            warn!(line = line_no, "microgesture entry needs a known :gesture");
            return None;
        };

        let v = self.mover.apply(gesture);
        let mut fields = vec![("gesture", format!(":{}", gesture.as_str()))];
        if let Some(command) = NavCommand::from_microgesture(gesture) {
            fields.push(("command", format!(":{}", command.as_str())));
        }
        fields.push(("move", format!("({:.1} {:.1})", v.x, v.y)));

        let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        Some(vec![format_event("microgesture", &fields)])
    }

    fn twist_line(&self, tick: u64, input: TwistInput, event: &PinchTwistEvent) -> String {
        let tick = tick.to_string();
        let source = format!(":{}", input.as_str());
        let slider = format!("{:.3}", self.slider_value());
        match event {
            PinchTwistEvent::Updated { value } => {
                let value = format!("{:.3}", value);
                format_event(
                    event.as_str(),
                    &[("tick", &tick), ("source", &source), ("value", &value), ("slider", &slider)],
                )
            }
            _ => format_event(
                event.as_str(),
                &[("tick", &tick), ("source", &source), ("slider", &slider)],
            ),
        }
    }
}
