//! Display formatting for durations and playback positions

use guardian_core::VideoTime;

/// Unit label appended to duration texts (hours)
pub const DURATION_UNIT: &str = "ชั่วโมง";

/// Total simulated minutes as `"H.MM <unit>"`, e.g. `"1.05 ชั่วโมง"`
pub fn format_duration_text(sim_minutes: f64) -> String {
    let total = if sim_minutes.is_finite() && sim_minutes > 0.0 {
        sim_minutes.floor() as u64
    } else {
        0
    };
    format!("{}.{:02} {}", total / 60, total % 60, DURATION_UNIT)
}

/// Playback position as `"MM:SS"` (minutes keep growing past 59)
pub fn format_video_time(t: VideoTime) -> String {
    let secs = t.whole_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Playback progress in percent, clamped to `0..=100`.
/// A zero-length clip reads as the position over one second.
pub fn progress_percent(position: VideoTime, duration: VideoTime) -> f64 {
    let total = duration.as_secs_f64();
    let total = if total > 0.0 { total } else { 1.0 };
    (position.as_secs_f64() / total * 100.0).clamp(0.0, 100.0)
}
