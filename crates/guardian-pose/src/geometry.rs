//! Geometric signals over a landmark set
//!
//! All angles are in degrees. Image-space y grows downward, which does
//! not matter here since only absolute deltas are used.

use guardian_core::{Joint, Landmark, LandmarkSet};

/// Bend reported for a leg whose joints are missing or degenerate
pub const MAX_LEG_BEND: f32 = 180.0;

const EPSILON: f32 = 1e-4;

/// Scalar/boolean signals the classifier decides on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureSignals {
    /// Torso inclination from horizontal (90 = upright), if computable
    pub torso_angle: Option<f32>,
    /// Silhouette is wider than tall by the flatness ratio
    pub flat: bool,
    /// Bend of the straighter leg (0 = straight, 180 = folded/unknown)
    pub leg_bend: f32,
}

impl PostureSignals {
    pub fn compute(landmarks: &LandmarkSet, flatness_ratio: f32) -> Self {
        PostureSignals {
            torso_angle: torso_angle(landmarks),
            flat: is_flat(landmarks, flatness_ratio),
            leg_bend: leg_bend(landmarks),
        }
    }
}

/// Angle between the hip→shoulder midpoint vector and the horizontal.
///
/// `None` when a shoulder or hip is missing, or the two midpoints coincide.
pub fn torso_angle(landmarks: &LandmarkSet) -> Option<f32> {
    let ls = landmarks.joint(Joint::LeftShoulder)?;
    let rs = landmarks.joint(Joint::RightShoulder)?;
    let lh = landmarks.joint(Joint::LeftHip)?;
    let rh = landmarks.joint(Joint::RightHip)?;

    let (sx, sy) = ls.midpoint(rs);
    let (hx, hy) = lh.midpoint(rh);
    let dx = (sx - hx).abs();
    let dy = (sy - hy).abs();

    if dx < EPSILON && dy < EPSILON {
        return None;
    }
    Some(dy.atan2(dx).to_degrees())
}

/// Bounding box over every joint: `(width, height)`
pub fn bounding_box(landmarks: &LandmarkSet) -> Option<(f32, f32)> {
    let mut iter = landmarks.iter();
    let first = iter.next()?;
    let init = (first.x, first.x, first.y, first.y);

    let (min_x, max_x, min_y, max_y) = iter.fold(init, |(x0, x1, y0, y1), lm| {
        (x0.min(lm.x), x1.max(lm.x), y0.min(lm.y), y1.max(lm.y))
    });
    Some((max_x - min_x, max_y - min_y))
}

/// Horizontal silhouette: `width > height * ratio`.
/// Only a complete set is ever considered flat.
pub fn is_flat(landmarks: &LandmarkSet, ratio: f32) -> bool {
    if !landmarks.is_complete() {
        return false;
    }
    match bounding_box(landmarks) {
        Some((width, height)) => width > height * ratio,
        None => false,
    }
}

/// Interior angle at `vertex` between `a` and `b` (180 = straight line).
///
/// Law-of-cosines form: `acos(v1·v2 / (|v1| |v2|))`.
pub fn interior_angle(a: &Landmark, vertex: &Landmark, b: &Landmark) -> Option<f32> {
    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (b.x - vertex.x, b.y - vertex.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < EPSILON || mag2 < EPSILON {
        return None;
    }

    let cos_angle = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Bend of one leg: `180 - interior knee angle`, or [`MAX_LEG_BEND`]
pub fn knee_bend(landmarks: &LandmarkSet, hip: Joint, knee: Joint, ankle: Joint) -> f32 {
    let angle = landmarks.joint(hip).and_then(|h| {
        let k = landmarks.joint(knee)?;
        let a = landmarks.joint(ankle)?;
        interior_angle(h, k, a)
    });
    match angle {
        Some(interior) => 180.0 - interior,
        None => MAX_LEG_BEND,
    }
}

/// Bend of the straighter leg
pub fn leg_bend(landmarks: &LandmarkSet) -> f32 {
    let left = knee_bend(landmarks, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle);
    let right = knee_bend(landmarks, Joint::RightHip, Joint::RightKnee, Joint::RightAnkle);
    left.min(right)
}
