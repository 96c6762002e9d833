//! In-memory hand skeleton.
//!
//! Models the 26 joints of a tracked hand and exposes them through
//! [`SkeletonSource`], so recognizers can resolve fingertips by bone id
//! the same way they would against the XR runtime's skeleton.

use super::math::{Quat, Vec3};
use super::source::{Bone, BoneHandle, Pose, SkeletonSource};

// ── Joint definitions ──────────────────────────────────────

/// The 26 hand joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandJoint {
    Palm,
    Wrist,
    ThumbMetacarpal,
    ThumbProximal,
    ThumbDistal,
    ThumbTip,
    IndexMetacarpal,
    IndexProximal,
    IndexIntermediate,
    IndexDistal,
    IndexTip,
    MiddleMetacarpal,
    MiddleProximal,
    MiddleIntermediate,
    MiddleDistal,
    MiddleTip,
    RingMetacarpal,
    RingProximal,
    RingIntermediate,
    RingDistal,
    RingTip,
    LittleMetacarpal,
    LittleProximal,
    LittleIntermediate,
    LittleDistal,
    LittleTip,
}

/// Total number of joints per hand.
pub const JOINT_COUNT: usize = 26;

/// All joints in skeleton order.
pub const ALL_JOINTS: [HandJoint; JOINT_COUNT] = [
    HandJoint::Palm,
    HandJoint::Wrist,
    HandJoint::ThumbMetacarpal,
    HandJoint::ThumbProximal,
    HandJoint::ThumbDistal,
    HandJoint::ThumbTip,
    HandJoint::IndexMetacarpal,
    HandJoint::IndexProximal,
    HandJoint::IndexIntermediate,
    HandJoint::IndexDistal,
    HandJoint::IndexTip,
    HandJoint::MiddleMetacarpal,
    HandJoint::MiddleProximal,
    HandJoint::MiddleIntermediate,
    HandJoint::MiddleDistal,
    HandJoint::MiddleTip,
    HandJoint::RingMetacarpal,
    HandJoint::RingProximal,
    HandJoint::RingIntermediate,
    HandJoint::RingDistal,
    HandJoint::RingTip,
    HandJoint::LittleMetacarpal,
    HandJoint::LittleProximal,
    HandJoint::LittleIntermediate,
    HandJoint::LittleDistal,
    HandJoint::LittleTip,
];

impl HandJoint {
    /// Convert joint enum to array index (0-25).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Kebab-case name used in scripts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Palm => "palm",
            Self::Wrist => "wrist",
            Self::ThumbMetacarpal => "thumb-metacarpal",
            Self::ThumbProximal => "thumb-proximal",
            Self::ThumbDistal => "thumb-distal",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMetacarpal => "index-metacarpal",
            Self::IndexProximal => "index-proximal",
            Self::IndexIntermediate => "index-intermediate",
            Self::IndexDistal => "index-distal",
            Self::IndexTip => "index-tip",
            Self::MiddleMetacarpal => "middle-metacarpal",
            Self::MiddleProximal => "middle-proximal",
            Self::MiddleIntermediate => "middle-intermediate",
            Self::MiddleDistal => "middle-distal",
            Self::MiddleTip => "middle-tip",
            Self::RingMetacarpal => "ring-metacarpal",
            Self::RingProximal => "ring-proximal",
            Self::RingIntermediate => "ring-intermediate",
            Self::RingDistal => "ring-distal",
            Self::RingTip => "ring-tip",
            Self::LittleMetacarpal => "little-metacarpal",
            Self::LittleProximal => "little-proximal",
            Self::LittleIntermediate => "little-intermediate",
            Self::LittleDistal => "little-distal",
            Self::LittleTip => "little-tip",
        }
    }

    /// Runtime-style bone identifier (e.g. "Hand_ThumbTip").
    pub fn bone_id(&self) -> String {
        format!("Hand_{:?}", self)
    }

    /// Parse a kebab-case joint name.
    pub fn parse(s: &str) -> Option<HandJoint> {
        ALL_JOINTS.iter().copied().find(|j| j.as_str() == s)
    }
}

// ── Hand enum ──────────────────────────────────────────────

/// Which hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// ── Joint pose ─────────────────────────────────────────────

/// Pose data for a single joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    /// Position in meters.
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

// ── Hand skeleton ──────────────────────────────────────────

/// Complete skeleton data for one hand.
#[derive(Debug, Clone)]
pub struct HandSkeleton {
    /// Which hand this skeleton represents.
    pub hand: Hand,
    /// 26 joint poses indexed by HandJoint.
    joints: [JointPose; JOINT_COUNT],
    /// When false the skeleton lists no bones (runtime still initializing).
    pub bones_available: bool,
}

impl HandSkeleton {
    /// Create a new skeleton with default joint poses.
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            joints: [JointPose::default(); JOINT_COUNT],
            bones_available: true,
        }
    }

    pub fn joint(&self, joint: HandJoint) -> &JointPose {
        &self.joints[joint.index()]
    }

    pub fn set_joint(&mut self, joint: HandJoint, pose: JointPose) {
        self.joints[joint.index()] = pose;
    }
}

impl SkeletonSource for HandSkeleton {
    fn bones(&self) -> Vec<Bone> {
        if !self.bones_available {
            return Vec::new();
        }
        ALL_JOINTS
            .iter()
            .map(|joint| Bone {
                id: joint.bone_id(),
                name: format!("{}-{}", self.hand.as_str(), joint.as_str()),
                handle: BoneHandle(joint.index()),
            })
            .collect()
    }

    fn bone_pose(&self, handle: BoneHandle) -> Option<Pose> {
        let joint = self.joints.get(handle.0)?;
        Some(Pose {
            position: joint.position,
            rotation: joint.orientation,
        })
    }
}

/// Create a test joint at a given position.
#[cfg(test)]
pub(crate) fn test_joint(x: f32, y: f32, z: f32) -> JointPose {
    JointPose {
        position: Vec3::new(x, y, z),
        orientation: Quat::IDENTITY,
    }
}

// ── Tests ──────────────────────────────────────────────────
