//! Time primitives
//!
//! Two timelines meet in the pipeline:
//! - Video time: elapsed playback seconds, monotonic within a session
//! - Simulated time: a calendar timestamp derived from video time by the
//!   session's speed factor (see guardian-time)

use std::ops::{Add, Sub};
use std::time::Duration;

/// Video time - elapsed playback position
/// Represented as microseconds since the start of the clip
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VideoTime(pub u64);

impl VideoTime {
    pub const ZERO: VideoTime = VideoTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        VideoTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        VideoTime(millis.saturating_mul(1000))
    }

    /// Negative and non-finite inputs collapse to zero
    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            VideoTime((secs * 1_000_000.0) as u64)
        } else {
            VideoTime::ZERO
        }
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Whole elapsed seconds (floor)
    #[inline]
    pub fn whole_secs(self) -> u64 {
        self.0 / 1_000_000
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        VideoTime(self.0.saturating_add(duration_micros(duration)))
    }
}

impl Add<Duration> for VideoTime {
    type Output = VideoTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<VideoTime> for VideoTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: VideoTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl From<Duration> for VideoTime {
    fn from(d: Duration) -> Self {
        VideoTime(duration_micros(d))
    }
}

/// Microseconds in `d`, saturating at `u64::MAX`
#[inline]
fn duration_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl std::fmt::Debug for VideoTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tv({:.3}s)", self.as_secs_f64())
    }
}
