//! Collaborator contracts for the hand-tracking runtime.
//!
//! The XR runtime is opaque: recognizers only see what these traits
//! expose, sampled once per tick.

use super::math::{Quat, Vec3};

/// Finger whose pinch strength is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// Coarse tracking confidence reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingConfidence {
    Low,
    High,
}

impl TrackingConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Orientation reference for twist measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationRef {
    /// Direction whose rotation is measured.
    pub up: Vec3,
    /// Twist axis.
    pub forward: Vec3,
}

impl Default for OrientationRef {
    fn default() -> Self {
        Self {
            up: Vec3::UP,
            forward: Vec3::FORWARD,
        }
    }
}

/// Per-frame hand state provider.
pub trait TrackingSource {
    /// Whether the runtime currently has valid data for this hand.
    fn is_valid(&self) -> bool;

    fn is_high_confidence(&self) -> bool;

    /// Pinch strength of `finger` against the thumb, 0.0-1.0.
    fn pinch_strength(&self, finger: Finger) -> f32;

    fn orientation(&self) -> OrientationRef;

    fn confidence(&self) -> TrackingConfidence {
        if self.is_high_confidence() {
            TrackingConfidence::High
        } else {
            TrackingConfidence::Low
        }
    }
}

/// Opaque reference to a bone inside a skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneHandle(pub usize);

/// A named bone as listed by the skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Runtime bone identifier (e.g. "Hand_ThumbTip").
    pub id: String,
    /// Scene node name.
    pub name: String,
    pub handle: BoneHandle,
}

/// World-space pose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Skeleton bone lookup.
pub trait SkeletonSource {
    /// Bones in skeleton order. May be empty while the runtime initializes.
    fn bones(&self) -> Vec<Bone>;

    /// Current pose of a bone, if the handle is still valid.
    fn bone_pose(&self, handle: BoneHandle) -> Option<Pose>;
}

/// One tick's worth of input for the pinch-twist recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub pinch_strength: f32,
    pub up: Vec3,
    pub forward: Vec3,
    pub tracking_valid: bool,
    pub high_confidence: bool,
}

impl FrameSample {
    /// Sample a tracking source (index-finger pinch).
    pub fn capture<T: TrackingSource + ?Sized>(source: &T) -> Self {
        let orientation = source.orientation();
        Self {
            pinch_strength: source.pinch_strength(Finger::Index),
            up: orientation.up,
            forward: orientation.forward,
            tracking_valid: source.is_valid(),
            high_confidence: source.is_high_confidence(),
        }
    }
}

impl Default for FrameSample {
    fn default() -> Self {
        let orientation = OrientationRef::default();
        Self {
            pinch_strength: 0.0,
            up: orientation.up,
            forward: orientation.forward,
            tracking_valid: true,
            high_confidence: true,
        }
    }
}
