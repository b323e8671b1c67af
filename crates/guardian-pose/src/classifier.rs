//! Posture Classifier - first-match decision over geometric signals
//!
//! Decision order:
//! 1. torso below the laying angle, or flat silhouette → Laying
//! 2. torso upright and leg straight → Standing
//! 3. torso upright and leg moderately bent → Walking
//! 4. anything else → Sitting

use guardian_core::{LandmarkSet, PostureLabel};
use serde::{Deserialize, Serialize};

use crate::PostureSignals;

/// Classifier thresholds (degrees unless noted)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Torso angles below this read as horizontal
    pub laying_torso_max: f32,
    /// Torso angles at or above this read as upright
    pub upright_torso_min: f32,
    /// Leg bend below this reads as a straight support leg
    pub straight_leg_max: f32,
    /// Leg bend below this (and at or above `straight_leg_max`) reads as mid-stride
    pub walking_leg_max: f32,
    /// Width-to-height ratio above which the silhouette is horizontal (unitless)
    pub flatness_ratio: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        ClassifierThresholds {
            laying_torso_max: 25.0,
            upright_torso_min: 60.0,
            straight_leg_max: 25.0,
            walking_leg_max: 65.0,
            flatness_ratio: 1.4,
        }
    }
}

/// Stateless posture classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct PostureClassifier {
    thresholds: ClassifierThresholds,
}

impl PostureClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        PostureClassifier { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Signals for a landmark set under these thresholds
    pub fn signals(&self, landmarks: &LandmarkSet) -> PostureSignals {
        PostureSignals::compute(landmarks, self.thresholds.flatness_ratio)
    }

    /// Classify a (smoothed) landmark set. Never returns `Falling`.
    pub fn classify(&self, landmarks: &LandmarkSet) -> PostureLabel {
        self.decide(&self.signals(landmarks))
    }

    /// Decision rule over precomputed signals
    pub fn decide(&self, signals: &PostureSignals) -> PostureLabel {
        let t = &self.thresholds;

        let horizontal = signals.torso_angle.is_some_and(|a| a < t.laying_torso_max);
        if horizontal || signals.flat {
            return PostureLabel::Laying;
        }

        let upright = signals.torso_angle.is_some_and(|a| a >= t.upright_torso_min);
        if upright && signals.leg_bend < t.straight_leg_max {
            return PostureLabel::Standing;
        }
        if upright && signals.leg_bend < t.walking_leg_max {
            return PostureLabel::Walking;
        }

        PostureLabel::Sitting
    }
}
