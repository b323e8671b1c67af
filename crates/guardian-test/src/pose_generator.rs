//! Pose Generator - synthetic detector output
//!
//! Each posture is a fixed skeleton in normalized image coordinates. Jitter
//! perturbs every joint uniformly; the default amplitude keeps each pose
//! well inside its classification region.

use guardian_core::{Joint, Landmark, LandmarkSet, PostureLabel, TOPOLOGY_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Knee offset of the walking stride
const WALKING_KNEE_DX: f32 = 0.08;
/// Knee offset of a seated subject
const SITTING_KNEE_DX: f32 = 0.2;

pub struct PoseGenerator {
    rng: StdRng,
    /// Maximum per-coordinate perturbation
    jitter: f32,
}

impl PoseGenerator {
    pub fn new(seed: u64) -> Self {
        PoseGenerator {
            rng: StdRng::seed_from_u64(seed),
            jitter: 0.004,
        }
    }

    /// Exact skeletons, no randomness
    pub fn exact() -> Self {
        Self::new(0).with_jitter(0.0)
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    /// Skeleton for `posture`. A fall ends on the floor, so it renders laying.
    pub fn pose(&mut self, posture: PostureLabel) -> LandmarkSet {
        match posture {
            PostureLabel::Standing => self.upright(0.0),
            PostureLabel::Walking => self.upright(WALKING_KNEE_DX),
            PostureLabel::Sitting => self.upright(SITTING_KNEE_DX),
            PostureLabel::Laying | PostureLabel::Falling => self.laying(),
        }
    }

    pub fn standing(&mut self) -> LandmarkSet {
        self.pose(PostureLabel::Standing)
    }

    pub fn walking(&mut self) -> LandmarkSet {
        self.pose(PostureLabel::Walking)
    }

    pub fn sitting(&mut self) -> LandmarkSet {
        self.pose(PostureLabel::Sitting)
    }

    pub fn laying(&mut self) -> LandmarkSet {
        let mut set = LandmarkSet::new(vec![Landmark::at(0.5, 0.8); TOPOLOGY_SIZE]);
        set.set_joint(Joint::Nose, Landmark::at(0.1, 0.8));
        set.set_joint(Joint::LeftShoulder, Landmark::at(0.2, 0.79));
        set.set_joint(Joint::RightShoulder, Landmark::at(0.2, 0.81));
        set.set_joint(Joint::LeftHip, Landmark::at(0.5, 0.79));
        set.set_joint(Joint::RightHip, Landmark::at(0.5, 0.81));
        set.set_joint(Joint::LeftKnee, Landmark::at(0.7, 0.79));
        set.set_joint(Joint::RightKnee, Landmark::at(0.7, 0.81));
        set.set_joint(Joint::LeftAnkle, Landmark::at(0.9, 0.79));
        set.set_joint(Joint::RightAnkle, Landmark::at(0.9, 0.81));
        self.perturb(set)
    }

    /// First `len` joints of a standing skeleton (occluded lower body)
    pub fn truncated(&mut self, len: usize) -> LandmarkSet {
        let full = self.standing();
        LandmarkSet::new(full.iter().take(len).copied().collect())
    }

    fn upright(&mut self, knee_dx: f32) -> LandmarkSet {
        let mut set = LandmarkSet::new(vec![Landmark::at(0.5, 0.3); TOPOLOGY_SIZE]);
        set.set_joint(Joint::Nose, Landmark::at(0.5, 0.1));
        set.set_joint(Joint::LeftShoulder, Landmark::at(0.45, 0.25));
        set.set_joint(Joint::RightShoulder, Landmark::at(0.55, 0.25));
        set.set_joint(Joint::LeftHip, Landmark::at(0.47, 0.5));
        set.set_joint(Joint::RightHip, Landmark::at(0.53, 0.5));
        set.set_joint(Joint::LeftKnee, Landmark::at(0.47 + knee_dx, 0.7));
        set.set_joint(Joint::RightKnee, Landmark::at(0.53 + knee_dx, 0.7));
        set.set_joint(Joint::LeftAnkle, Landmark::at(0.47, 0.9));
        set.set_joint(Joint::RightAnkle, Landmark::at(0.53, 0.9));
        self.perturb(set)
    }

    fn perturb(&mut self, set: LandmarkSet) -> LandmarkSet {
        if self.jitter == 0.0 {
            return set;
        }
        let j = self.jitter;
        let landmarks = set
            .iter()
            .map(|lm| {
                let dx = self.rng.gen_range(-j..=j);
                let dy = self.rng.gen_range(-j..=j);
                Landmark::new(lm.x + dx, lm.y + dy, lm.z, lm.visibility)
            })
            .collect();
        LandmarkSet::new(landmarks)
    }
}
