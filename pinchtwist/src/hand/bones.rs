//! Lazy thumb/index fingertip resolution against a skeleton.

use tracing::{debug, warn};

use super::source::{BoneHandle, SkeletonSource};

const THUMB_TIP_MARKER: &str = "ThumbTip";
const INDEX_TIP_MARKER: &str = "IndexTip";

/// Thumb and index fingertip references.
///
/// Each tip is bound to the first bone whose id or name contains its
/// marker. A bound tip stays bound; once both are bound the skeleton is
/// never queried again.
#[derive(Debug, Clone, Default)]
pub struct FingertipRefs {
    thumb: Option<BoneHandle>,
    index: Option<BoneHandle>,
    warned: bool,
}

impl FingertipRefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thumb(&self) -> Option<BoneHandle> {
        self.thumb
    }

    pub fn index(&self) -> Option<BoneHandle> {
        self.index
    }

    pub fn is_resolved(&self) -> bool {
        self.thumb.is_some() && self.index.is_some()
    }

    /// Try to bind missing tips. Returns true when both are bound.
    pub fn resolve<S: SkeletonSource + ?Sized>(&mut self, skeleton: &S) -> bool {
        if self.is_resolved() {
            return true;
        }

        let bones = skeleton.bones();
        if bones.is_empty() {
            debug!("Fingertips: skeleton has no bones yet, deferring");
            return false;
        }

        let mut thumb = None;
        let mut index = None;
        for bone in &bones {
            let matches = |marker: &str| bone.id.contains(marker) || bone.name.contains(marker);
            if thumb.is_none() && matches(THUMB_TIP_MARKER) {
                thumb = Some(bone.handle);
            }
            if index.is_none() && matches(INDEX_TIP_MARKER) {
                index = Some(bone.handle);
            }
            if thumb.is_some() && index.is_some() {
                break;
            }
        }

        if self.thumb.is_none() {
            self.thumb = thumb;
        }
        if self.index.is_none() {
            self.index = index;
        }

        if self.is_resolved() {
            debug!(thumb = ?self.thumb, index = ?self.index, "Fingertips resolved");
            true
        } else {
            if !self.warned {
                warn!(
                    thumb = self.thumb.is_some(),
                    index = self.index.is_some(),
                    "Could not resolve fingertips from skeleton, will retry"
                );
                self.warned = true;
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::source::{Bone, Pose};
    use std::cell::Cell;

    /// Skeleton listing a fixed set of bones and counting queries.
    struct FakeSkeleton {
        bones: Vec<Bone>,
        queries: Cell<usize>,
    }

    impl FakeSkeleton {
        fn new(names: &[(&str, &str)]) -> Self {
            let bones = names
                .iter()
                .enumerate()
                .map(|(i, (id, name))| Bone {
                    id: id.to_string(),
                    name: name.to_string(),
                    handle: BoneHandle(i),
                })
                .collect();
            Self {
                bones,
                queries: Cell::new(0),
            }
        }
    }

    impl SkeletonSource for FakeSkeleton {
        fn bones(&self) -> Vec<Bone> {
            self.queries.set(self.queries.get() + 1);
            self.bones.clone()
        }

        fn bone_pose(&self, _handle: BoneHandle) -> Option<Pose> {
            None
        }
    }

    #[test]
    fn test_resolve_by_id() {
        let skel = FakeSkeleton::new(&[
            ("Hand_Wrist", "wrist"),
            ("Hand_ThumbTip", "a"),
            ("Hand_IndexTip", "b"),
        ]);
        let mut tips = FingertipRefs::new();
        assert!(tips.resolve(&skel));
        assert_eq!(tips.thumb(), Some(BoneHandle(1)));
        assert_eq!(tips.index(), Some(BoneHandle(2)));
    }

    #[test]
    fn test_resolve_by_name() {
        let skel = FakeSkeleton::new(&[("7", "L_ThumbTip_marker"), ("8", "L_IndexTip_marker")]);
        let mut tips = FingertipRefs::new();
        assert!(tips.resolve(&skel));
        assert_eq!(tips.thumb(), Some(BoneHandle(0)));
    }

    #[test]
    fn test_first_match_wins() {
        let skel = FakeSkeleton::new(&[
            ("Hand_ThumbTip", ""),
            ("Hand_ThumbTip", "dup"),
            ("Hand_IndexTip", ""),
        ]);
        let mut tips = FingertipRefs::new();
        tips.resolve(&skel);
        assert_eq!(tips.thumb(), Some(BoneHandle(0)));
    }

    #[test]
    fn test_empty_skeleton_defers() {
        let skel = FakeSkeleton::new(&[]);
        let mut tips = FingertipRefs::new();
        assert!(!tips.resolve(&skel));
        assert!(!tips.resolve(&skel));
        assert_eq!(skel.queries.get(), 2);
    }

    #[test]
    fn test_missing_tip_retried_and_partial_kept() {
        let partial = FakeSkeleton::new(&[("Hand_ThumbTip", "")]);
        let mut tips = FingertipRefs::new();
        assert!(!tips.resolve(&partial));
        assert_eq!(tips.thumb(), Some(BoneHandle(0)));
        assert!(tips.index().is_none());

        let full = FakeSkeleton::new(&[("x", ""), ("Hand_ThumbTip", ""), ("Hand_IndexTip", "")]);
        assert!(tips.resolve(&full));
        // Already bound thumb is kept.
        assert_eq!(tips.thumb(), Some(BoneHandle(0)));
        assert_eq!(tips.index(), Some(BoneHandle(2)));
    }

    #[test]
    fn test_not_queried_once_resolved() {
        let skel = FakeSkeleton::new(&[("Hand_ThumbTip", ""), ("Hand_IndexTip", "")]);
        let mut tips = FingertipRefs::new();
        tips.resolve(&skel);
        tips.resolve(&skel);
        tips.resolve(&skel);
        assert_eq!(skel.queries.get(), 1);
    }
}
