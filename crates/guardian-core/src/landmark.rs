//! Body landmarks - the per-frame output of the pose model
//!
//! A landmark set is ordered: index N is always the same body joint.
//! The topology is the 33-point BlazePose/MediaPipe skeleton.

use serde::{Deserialize, Serialize};

/// Joint identifier within the 33-point pose topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Joint {
    // Face
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,

    // Upper body
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,

    // Lower body
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Number of joints in the topology
pub const TOPOLOGY_SIZE: usize = 33;

/// Floats per landmark in the flat wire layout (x, y, z, visibility)
pub const LANDMARK_STRIDE: usize = 4;

impl Joint {
    /// Index of this joint within a landmark set
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of joints
    pub fn count() -> usize {
        TOPOLOGY_SIZE
    }
}

/// A single landmark in normalized image space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Model confidence that the joint is visible (0-1)
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

fn default_visibility() -> f32 {
    1.0
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Landmark on the image plane with full confidence
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 1.0)
    }

    /// Exponential blend: `self * alpha + previous * (1 - alpha)`, every field
    pub fn blend(&self, previous: &Landmark, alpha: f32) -> Landmark {
        let keep = 1.0 - alpha;
        Landmark {
            x: self.x * alpha + previous.x * keep,
            y: self.y * alpha + previous.y * keep,
            z: self.z * alpha + previous.z * keep,
            visibility: self.visibility * alpha + previous.visibility * keep,
        }
    }

    /// Every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
            && self.visibility.is_finite()
    }

    /// Midpoint on the image plane
    pub fn midpoint(&self, other: &Landmark) -> (f32, f32) {
        ((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Ordered landmarks for one tracked person in one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build from a flat `[x, y, z, visibility, ...]` buffer.
    /// Returns `None` when the buffer is not a whole number of landmarks.
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.is_empty() || data.len() % LANDMARK_STRIDE != 0 {
            return None;
        }
        let landmarks = data
            .chunks_exact(LANDMARK_STRIDE)
            .map(|c| Landmark::new(c[0], c[1], c[2], c[3]))
            .collect();
        Some(Self { landmarks })
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Does the set cover the whole topology?
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= TOPOLOGY_SIZE
    }

    pub fn is_finite(&self) -> bool {
        self.landmarks.iter().all(Landmark::is_finite)
    }

    /// Landmark for a joint, if the set is long enough to contain it
    pub fn joint(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks.get(joint.index())
    }

    /// Replace a joint's landmark (no-op if out of range)
    pub fn set_joint(&mut self, joint: Joint, landmark: Landmark) {
        if let Some(slot) = self.landmarks.get_mut(joint.index()) {
            *slot = landmark;
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.landmarks.iter()
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.landmarks
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self::new(landmarks)
    }
}

impl<'a> IntoIterator for &'a LandmarkSet {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.landmarks.iter()
    }
}
