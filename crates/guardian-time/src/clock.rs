//! Simulated clock - maps video time onto a calendar

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use guardian_core::{GuardianError, GuardianResult, VideoConfig, VideoTime};

/// Simulated seconds per real second at speed factor 1
pub const SIM_SECONDS_PER_REAL_SECOND: f64 = 60.0;

/// Formatted simulated timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimStamp {
    /// "HH:MM" (24-hour)
    pub time: String,
    /// "YYYY-MM-DD"
    pub date: String,
}

/// Simulated clock (one real/video second = `speed` simulated minutes)
///
/// Works on naive local date-times: decomposition into calendar fields
/// never passes through UTC, so midnight rollovers land on the right day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    anchor: NaiveDateTime,
    speed: f64,
}

impl SimulatedClock {
    /// Create a clock from an explicit anchor
    pub fn new(anchor: NaiveDateTime, speed: f64) -> GuardianResult<Self> {
        if !speed.is_finite() || speed < 1.0 {
            return Err(GuardianError::InvalidSpeedFactor(speed));
        }
        Ok(SimulatedClock { anchor, speed })
    }

    /// Anchor a clock at the configured start time and date.
    /// A parse failure is fatal to the session.
    pub fn anchor(config: &VideoConfig) -> GuardianResult<Self> {
        let time = parse_start_time(&config.start_time)?;
        let date = parse_date(&config.date)?;
        Self::new(date.and_time(time), config.speed)
    }

    pub fn anchor_time(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Simulated minutes elapsed at video time `t`
    pub fn sim_minutes(&self, t: VideoTime) -> f64 {
        t.as_secs_f64() * self.speed
    }

    /// Simulated seconds that pass per real second
    pub fn sim_seconds_per_second(&self) -> f64 {
        self.speed * SIM_SECONDS_PER_REAL_SECOND
    }

    /// Simulated date-time at video time `t` (saturates at the calendar end)
    pub fn at(&self, t: VideoTime) -> NaiveDateTime {
        let offset_ms = (self.sim_minutes(t) * 60_000.0).round();
        // i64::MAX / 4 stays well inside TimeDelta's range
        let offset_ms = offset_ms.clamp(0.0, (i64::MAX / 4) as f64) as i64;

        TimeDelta::try_milliseconds(offset_ms)
            .and_then(|delta| self.anchor.checked_add_signed(delta))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Formatted "HH:MM" + "YYYY-MM-DD" at video time `t`
    pub fn stamp(&self, t: VideoTime) -> SimStamp {
        let at = self.at(t);
        SimStamp {
            time: at.format("%H:%M").to_string(),
            date: at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Parse "HH:MM" (24-hour)
pub fn parse_start_time(s: &str) -> GuardianResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| GuardianError::InvalidStartTime(s.to_string()))
}

/// Parse "YYYY-MM-DD"
pub fn parse_date(s: &str) -> GuardianResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| GuardianError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clock(start: &str, date: &str, speed: f64) -> SimulatedClock {
        SimulatedClock::anchor(&VideoConfig::new(start, date, speed)).unwrap()
    }

    #[test]
    fn test_anchor_stamp() {
        let clock = clock("08:00", "2021-12-19", 1.0);
        let stamp = clock.stamp(VideoTime::ZERO);
        assert_eq!(stamp.time, "08:00");
        assert_eq!(stamp.date, "2021-12-19");
    }

    #[test]
    fn test_speed_one_ten_seconds() {
        let clock = clock("08:00", "2021-12-19", 1.0);
        assert_eq!(clock.stamp(VideoTime::from_secs_f64(10.0)).time, "08:10");
    }

    #[test]
    fn test_speed_sixty_is_an_hour_per_second() {
        let clock = clock("08:00", "2021-12-19", 60.0);
        let delta = clock.at(VideoTime::from_secs_f64(1.0)) - clock.at(VideoTime::ZERO);
        assert_eq!(delta, TimeDelta::minutes(60));
        assert_eq!(clock.stamp(VideoTime::from_secs_f64(1.0)).time, "09:00");
    }

    #[test]
    fn test_midnight_rollover_uses_local_calendar() {
        let clock = clock("23:50", "2021-12-31", 1.0);
        let stamp = clock.stamp(VideoTime::from_secs_f64(15.0));
        assert_eq!(stamp.time, "00:05");
        assert_eq!(stamp.date, "2022-01-01");
    }

    #[test]
    fn test_invalid_start_time() {
        let err = SimulatedClock::anchor(&VideoConfig::new("8 o'clock", "2021-12-19", 1.0));
        assert_eq!(err, Err(GuardianError::InvalidStartTime("8 o'clock".into())));

        let err = SimulatedClock::anchor(&VideoConfig::new("25:00", "2021-12-19", 1.0));
        assert!(matches!(err, Err(GuardianError::InvalidStartTime(_))));
    }

    #[test]
    fn test_invalid_date() {
        let err = SimulatedClock::anchor(&VideoConfig::new("08:00", "2021-02-30", 1.0));
        assert!(matches!(err, Err(GuardianError::InvalidDate(_))));
    }

    #[test]
    fn test_invalid_speed() {
        for speed in [0.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            let err = SimulatedClock::anchor(&VideoConfig::new("08:00", "2021-12-19", speed));
            assert!(matches!(err, Err(GuardianError::InvalidSpeedFactor(_))));
        }
    }

    #[test]
    fn test_sim_seconds_per_second() {
        assert_eq!(clock("08:00", "2021-12-19", 1.0).sim_seconds_per_second(), 60.0);
        assert_eq!(clock("08:00", "2021-12-19", 5.0).sim_seconds_per_second(), 300.0);
    }

    #[test]
    fn test_saturates_far_in_future() {
        let clock = clock("08:00", "2021-12-19", 1_000_000.0);
        let far = VideoTime::from_micros(u64::MAX);
        assert_eq!(clock.at(far), NaiveDateTime::MAX);
    }

    proptest! {
        #[test]
        fn prop_monotonic(
            a in 0u64..10_000_000_000,
            b in 0u64..10_000_000_000,
            speed in 1.0f64..120.0,
        ) {
            let clock = clock("08:00", "2021-12-19", speed);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (earlier, later) = (VideoTime::from_micros(lo), VideoTime::from_micros(hi));
            prop_assert!(clock.at(earlier) <= clock.at(later));
        }
    }
}
