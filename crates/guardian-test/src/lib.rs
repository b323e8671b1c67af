//! Guardian Test Harness - pipeline validation
//!
//! This crate provides:
//! - Synthetic landmark sets per posture, with seeded jitter
//! - Scripted scenarios driven through a full monitoring session
//! - End-to-end checks of the pipeline's behavioral guarantees

pub mod integration;
pub mod pose_generator;
pub mod scenario;

pub use pose_generator::*;
pub use scenario::*;
