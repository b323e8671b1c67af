//! Video configuration - the external input anchoring a session

use serde::{Deserialize, Serialize};

use crate::PostureLabel;

/// Playback configuration for one camera/video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub camera_name: String,
    /// Simulated start of day, "HH:MM"
    pub start_time: String,
    /// Simulated start date, "YYYY-MM-DD"
    pub date: String,
    /// Simulated minutes per real second
    #[serde(alias = "speedFactor")]
    pub speed: f64,
    /// Scripted event for offline analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<PostureLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_date: Option<String>,
}

impl VideoConfig {
    pub fn new(start_time: impl Into<String>, date: impl Into<String>, speed: f64) -> Self {
        VideoConfig {
            id: String::new(),
            camera_name: String::new(),
            start_time: start_time.into(),
            date: date.into(),
            speed,
            event_type: None,
            video_url: None,
            thumbnail_url: None,
            duration_text: None,
            original_date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_event_type(mut self, kind: PostureLabel) -> Self {
        self.event_type = Some(kind);
        self
    }

    /// Does playback come from a real video (vs. the built-in timer)?
    pub fn has_video(&self) -> bool {
        self.video_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Apply a display update produced by a running session
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(start_time) = &update.start_time {
            self.start_time = start_time.clone();
        }
        if let Some(date) = &update.date {
            if self.original_date.is_none() {
                self.original_date = Some(self.date.clone());
            }
            self.date = date.clone();
        }
        if let Some(duration_text) = &update.duration_text {
            self.duration_text = Some(duration_text.clone());
        }
    }
}

/// Partial display update for a [`VideoConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
}

impl ConfigUpdate {
    pub fn duration_only(duration_text: impl Into<String>) -> Self {
        ConfigUpdate {
            duration_text: Some(duration_text.into()),
            ..Default::default()
        }
    }

    /// Would applying this update change `config`?
    pub fn changes(&self, config: &VideoConfig) -> bool {
        self.start_time.as_ref().is_some_and(|s| *s != config.start_time)
            || self.date.as_ref().is_some_and(|d| *d != config.date)
            || self
                .duration_text
                .as_ref()
                .is_some_and(|d| Some(d) != config.duration_text.as_ref())
    }
}
