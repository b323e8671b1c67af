//! Playback clock - elapsed video position, play/pause and end of clip
//!
//! Two sources drive the position:
//! - Video: the host reports the decoder's current time each frame
//! - Timer: no video is attached; the clock advances in 1 s steps

use std::time::Duration;

use guardian_core::VideoTime;

/// Clip length used when no video is attached
pub const DEFAULT_TIMER_DURATION: Duration = Duration::from_secs(5 * 60);

/// Timer step
pub const TIMER_STEP: Duration = Duration::from_secs(1);

/// What drives the playback position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSource {
    Video,
    Timer,
}

/// Playback clock
/// INVARIANT: position never moves backwards within a session
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    source: PlaybackSource,
    position: VideoTime,
    /// Known clip length (unknown for video until metadata loads)
    duration: Option<VideoTime>,
    playing: bool,
    ended: bool,
}

impl PlaybackClock {
    /// Clock driven by a real video; duration arrives with its metadata
    pub fn video() -> Self {
        PlaybackClock {
            source: PlaybackSource::Video,
            position: VideoTime::ZERO,
            duration: None,
            playing: true,
            ended: false,
        }
    }

    /// Clock driven by the built-in 1 s timer
    pub fn timer(duration: Duration) -> Self {
        PlaybackClock {
            source: PlaybackSource::Timer,
            position: VideoTime::ZERO,
            duration: Some(VideoTime::from(duration)),
            playing: true,
            ended: false,
        }
    }

    pub fn source(&self) -> PlaybackSource {
        self.source
    }

    pub fn position(&self) -> VideoTime {
        self.position
    }

    pub fn duration(&self) -> Option<VideoTime> {
        self.duration
    }

    /// Record the clip length (video metadata loaded)
    pub fn set_duration(&mut self, duration: VideoTime) {
        self.duration = Some(duration);
    }

    pub fn is_playing(&self) -> bool {
        self.playing && !self.ended
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Toggle play/pause, returning the new playing state
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.is_playing()
    }

    /// Mark the clip finished
    pub fn end(&mut self) {
        self.ended = true;
        self.playing = false;
    }

    /// Report the decoder position. Earlier positions are ignored.
    /// Returns the (monotonic) position in effect.
    pub fn update_position(&mut self, position: VideoTime) -> VideoTime {
        if self.ended {
            return self.position;
        }
        if position > self.position {
            self.position = position;
        }
        if self.duration.is_some_and(|d| d > VideoTime::ZERO && self.position >= d) {
            self.end();
        }
        self.position
    }

    /// Advance the timer by one step while playing.
    /// Reaching the duration ends playback.
    pub fn tick_timer(&mut self) -> VideoTime {
        if !self.is_playing() {
            return self.position;
        }
        if let Some(duration) = self.duration {
            if self.position >= duration {
                self.end();
                return self.position;
            }
        }
        self.position = self.position + TIMER_STEP;
        self.position
    }
}

/// Detects whole-second boundaries in a monotonic position stream
#[derive(Debug, Clone, Default)]
pub struct SecondTicker {
    last: Option<u64>,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of whole seconds crossed since the previous call.
    /// The first observation establishes the baseline and reports 0.
    pub fn advance(&mut self, position: VideoTime) -> u64 {
        let now = position.whole_secs();
        match self.last {
            Some(last) if now > last => {
                self.last = Some(now);
                now - last
            }
            Some(_) => 0,
            None => {
                self.last = Some(now);
                0
            }
        }
    }
}
