//! Sitting Monitor - prolonged-sitting wellness alert
//!
//! Accumulates simulated sitting time on whole-second ticks. Crossing the
//! threshold raises one notification per sitting streak; any other posture
//! ends the streak.

use std::time::{Duration, Instant};

use guardian_core::PostureLabel;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const WELLNESS_TITLE: &str = "ระวังออฟฟิศซินโดรมถามหานะครับ! ⚠️";
pub const WELLNESS_MESSAGE: &str = "ลุกขึ้นหมุนหัวไหล่และสะบัดข้อมือสัก 2-3 นาทีดีไหมครับ? 💪";

/// Upper bound on how long an alert may stay on screen
pub const MAX_NOTIFICATION_DISPLAY_SECS: u64 = 3600;

/// Sitting monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SittingConfig {
    /// Continuous simulated sitting before the alert
    pub threshold_minutes: f64,
    /// Wall-clock seconds the alert stays visible
    pub notification_display_secs: u64,
}

impl Default for SittingConfig {
    fn default() -> Self {
        SittingConfig {
            threshold_minutes: 45.0,
            notification_display_secs: 6,
        }
    }
}

impl SittingConfig {
    pub fn threshold_secs(&self) -> f64 {
        self.threshold_minutes * 60.0
    }

    /// Display time, clamped to `MAX_NOTIFICATION_DISPLAY_SECS`
    pub fn display_duration(&self) -> Duration {
        Duration::from_secs(self.notification_display_secs.min(MAX_NOTIFICATION_DISPLAY_SECS))
    }
}

/// A raised wellness alert
#[derive(Debug, Clone, PartialEq)]
pub struct WellnessNotification {
    pub title: &'static str,
    pub message: &'static str,
    /// Simulated minutes seated when raised
    pub sitting_minutes: f64,
    pub raised_at: Instant,
    pub expires_at: Instant,
}

impl WellnessNotification {
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Per-session sitting accumulator
#[derive(Debug, Clone)]
pub struct SittingMonitor {
    config: SittingConfig,
    /// Simulated seconds in the current streak
    accumulated: f64,
    notified: bool,
    notification: Option<WellnessNotification>,
}

impl SittingMonitor {
    pub fn new(config: SittingConfig) -> Self {
        SittingMonitor {
            config,
            accumulated: 0.0,
            notified: false,
            notification: None,
        }
    }

    /// Account for `elapsed_secs` whole real seconds spent in `posture`.
    /// Returns the notification if this tick raised one.
    pub fn tick(
        &mut self,
        posture: PostureLabel,
        elapsed_secs: u64,
        sim_secs_per_sec: f64,
        now: Instant,
    ) -> Option<WellnessNotification> {
        if posture != PostureLabel::Sitting {
            if self.accumulated > 0.0 {
                debug!(
                    posture = posture.as_str(),
                    seated_secs = self.accumulated,
                    "sitting streak ended"
                );
            }
            self.accumulated = 0.0;
            self.notified = false;
            return None;
        }

        self.accumulated += elapsed_secs as f64 * sim_secs_per_sec;

        if self.notified || self.accumulated < self.config.threshold_secs() {
            return None;
        }

        self.notified = true;
        let notification = WellnessNotification {
            title: WELLNESS_TITLE,
            message: WELLNESS_MESSAGE,
            sitting_minutes: self.accumulated / 60.0,
            raised_at: now,
            expires_at: now.checked_add(self.config.display_duration()).unwrap_or(now),
        };
        warn!(
            sitting_minutes = notification.sitting_minutes,
            "prolonged sitting detected"
        );
        self.notification = Some(notification.clone());
        Some(notification)
    }

    /// Seated simulated seconds in the current streak
    pub fn accumulated_secs(&self) -> f64 {
        self.accumulated
    }

    pub fn has_notified(&self) -> bool {
        self.notified
    }

    /// The alert, if still on screen at `now`
    pub fn visible_notification(&self, now: Instant) -> Option<&WellnessNotification> {
        self.notification.as_ref().filter(|n| n.is_visible(now))
    }

    pub fn dismiss(&mut self) {
        self.notification = None;
    }
}

impl Default for SittingMonitor {
    fn default() -> Self {
        Self::new(SittingConfig::default())
    }
}
