//! Hand subsystem: tracking contracts, skeleton data and pose helpers.
//!
//! Provides:
//! - `source`: `TrackingSource` / `SkeletonSource` traits and `FrameSample`
//! - `skeleton`: 26-joint in-memory `HandSkeleton`
//! - `bones`: lazy fingertip resolution
//! - `follower`: bone follower with offsets
//! - `math`: vector/quaternion helpers

pub mod bones;
pub mod follower;
pub mod math;
pub mod skeleton;
pub mod source;

pub use bones::FingertipRefs;
pub use math::{Quat, Vec2, Vec3};
pub use skeleton::{Hand, HandJoint, HandSkeleton, JointPose};
pub use source::{
    Bone, BoneHandle, Finger, FrameSample, OrientationRef, Pose, SkeletonSource,
    TrackingConfidence, TrackingSource,
};
