//! Guardian Core - Fundamental types and primitives
//!
//! This crate defines the types shared by the monitoring pipeline:
//! - Identifiers (SessionId, EventId)
//! - Video time (VideoTime)
//! - Body landmarks and the joint topology
//! - Posture labels
//! - Simulation events and video configuration

pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod landmark;
pub mod posture;
pub mod time;

pub use config::*;
pub use error::*;
pub use event::*;
pub use id::*;
pub use landmark::*;
pub use posture::*;
pub use time::*;
