//! Attach an object to a skeleton bone with position/rotation offsets.

use tracing::debug;

use super::math::{Quat, Vec3};
use super::source::{BoneHandle, Pose, SkeletonSource, TrackingSource};

/// Configuration for following a bone.
#[derive(Debug, Clone)]
pub struct BoneFollowerConfig {
    /// Bone identifier to follow (exact match, e.g. "Hand_IndexTip").
    pub bone_id: String,
    pub follow_position: bool,
    pub follow_rotation: bool,
    /// Added to the bone position.
    pub position_offset: Vec3,
    /// Euler offset in degrees, applied after the bone rotation.
    pub rotation_offset_deg: Vec3,
}

impl Default for BoneFollowerConfig {
    fn default() -> Self {
        Self {
            bone_id: "Hand_IndexTip".to_string(),
            follow_position: true,
            follow_rotation: true,
            position_offset: Vec3::ZERO,
            rotation_offset_deg: Vec3::ZERO,
        }
    }
}

/// Follows a bone once tracking is trustworthy.
#[derive(Debug, Clone)]
pub struct BoneFollower {
    pub config: BoneFollowerConfig,
    target: Option<BoneHandle>,
}

impl BoneFollower {
    pub fn new(config: BoneFollowerConfig) -> Self {
        Self {
            config,
            target: None,
        }
    }

    pub fn target(&self) -> Option<BoneHandle> {
        self.target
    }

    /// Compute the follower's pose for this tick.
    ///
    /// `current` is the follower's present pose; components that are not
    /// followed are carried over from it. Returns `None` while tracking is
    /// not valid and high confidence, or while the bone is unresolved.
    pub fn update<T, S>(&mut self, tracking: &T, skeleton: &S, current: Pose) -> Option<Pose>
    where
        T: TrackingSource + ?Sized,
        S: SkeletonSource + ?Sized,
    {
        if !tracking.is_valid() || !tracking.is_high_confidence() {
            return None;
        }

        if self.target.is_none() {
            self.target = skeleton
                .bones()
                .into_iter()
                .find(|b| b.id == self.config.bone_id)
                .map(|b| b.handle);
            if let Some(handle) = self.target {
                debug!(bone = %self.config.bone_id, ?handle, "Bone follower bound");
            }
        }

        let bone = skeleton.bone_pose(self.target?)?;
        let mut pose = current;
        if self.config.follow_position {
            pose.position = bone.position + self.config.position_offset;
        }
        if self.config.follow_rotation {
            pose.rotation = bone.rotation * Quat::from_euler_deg(self.config.rotation_offset_deg);
        }
        Some(pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::skeleton::{Hand, HandJoint, HandSkeleton, JointPose};
    use crate::hand::source::{Finger, OrientationRef};

    struct FakeTracking {
        valid: bool,
        high: bool,
    }

    impl TrackingSource for FakeTracking {
        fn is_valid(&self) -> bool {
            self.valid
        }
        fn is_high_confidence(&self) -> bool {
            self.high
        }
        fn pinch_strength(&self, _finger: Finger) -> f32 {
            0.0
        }
        fn orientation(&self) -> OrientationRef {
            OrientationRef::default()
        }
    }

    fn skeleton_with_index_tip() -> HandSkeleton {
        let mut skel = HandSkeleton::new(Hand::Right);
        skel.set_joint(
            HandJoint::IndexTip,
            JointPose {
                position: Vec3::new(0.1, 1.2, 0.3),
                orientation: Quat::from_axis_angle_deg(Vec3::FORWARD, 90.0),
            },
        );
        skel
    }

    #[test]
    fn test_follow_with_offsets() {
        let skel = skeleton_with_index_tip();
        let tracking = FakeTracking { valid: true, high: true };
        let mut follower = BoneFollower::new(BoneFollowerConfig {
            position_offset: Vec3::new(0.0, 0.1, 0.0),
            rotation_offset_deg: Vec3::new(0.0, 0.0, -90.0),
            ..Default::default()
        });

        let pose = follower.update(&tracking, &skel, Pose::default()).unwrap();
        assert!((pose.position.y - 1.3).abs() < 1e-4);
        // 90 then -90 about Z cancels out.
        let up = pose.rotation.up();
        assert!((up.y - 1.0).abs() < 1e-4, "got {:?}", up);
        assert_eq!(follower.target(), Some(BoneHandle(HandJoint::IndexTip.index())));
    }

    #[test]
    fn test_low_confidence_holds() {
        let skel = skeleton_with_index_tip();
        let tracking = FakeTracking { valid: true, high: false };
        let mut follower = BoneFollower::new(BoneFollowerConfig::default());
        assert!(follower.update(&tracking, &skel, Pose::default()).is_none());
        assert!(follower.target().is_none());
    }

    #[test]
    fn test_position_only() {
        let skel = skeleton_with_index_tip();
        let tracking = FakeTracking { valid: true, high: true };
        let mut follower = BoneFollower::new(BoneFollowerConfig {
            follow_rotation: false,
            ..Default::default()
        });
        let current = Pose {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        };
        let pose = follower.update(&tracking, &skel, current).unwrap();
        assert_eq!(pose.rotation, Quat::IDENTITY);
        assert!((pose.position.x - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_bone() {
        let skel = skeleton_with_index_tip();
        let tracking = FakeTracking { valid: true, high: true };
        let mut follower = BoneFollower::new(BoneFollowerConfig {
            bone_id: "Hand_SixthTip".to_string(),
            ..Default::default()
        });
        assert!(follower.update(&tracking, &skel, Pose::default()).is_none());
    }
}
