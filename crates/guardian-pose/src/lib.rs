//! Guardian Pose - from raw landmarks to a posture label
//!
//! # Pipeline
//!
//! Landmarks → Smoother (EMA) → Geometry signals → Classifier
//!
//! - Smoother: suppresses per-frame jitter, resets on person loss
//! - Geometry: torso verticality, silhouette flatness, knee bend
//! - Classifier: first-match decision over the signals
//!
//! The classifier never produces `Falling`; that label is derived later
//! from the transition history.

pub mod classifier;
pub mod geometry;
pub mod smoother;

pub use classifier::*;
pub use geometry::*;
pub use smoother::*;
