//! Guardian Time - video time and simulated time
//!
//! This crate implements the two timelines of a session:
//! - Playback clock: elapsed video seconds (real video or built-in timer)
//! - Simulated clock: calendar time, `anchor + video_secs * speed` minutes
//!
//! The simulated clock is anchored once per session and is a pure
//! function of video time afterwards, so it cannot drift.

pub mod clock;
pub mod format;
pub mod playback;

pub use clock::*;
pub use format::*;
pub use playback::*;
