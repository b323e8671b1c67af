//! Offline clip analysis
//!
//! Produces the scripted summary for a configured clip without running
//! detection: the configured event type is reported at 45 s of video.

use guardian_core::{GuardianResult, PostureLabel, SimulationEvent, VideoConfig, VideoTime};
use guardian_time::SimulatedClock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Video position at which the scripted event is reported
pub const SCRIPTED_EVENT_AT: VideoTime = VideoTime(45_000_000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub events: Vec<SimulationEvent>,
}

fn summary(kind: PostureLabel, timestamp: &str) -> Option<String> {
    let text = match kind {
        PostureLabel::Sitting => "Prolonged sitting detected across the clip. Continuous \
             desk work raises the risk of office syndrome; a movement reminder is recommended."
            .to_string(),
        PostureLabel::Falling => format!(
            "Abnormal event detected: a fall at {timestamp} in the clip. This is a critical \
             event; a snapshot was recorded and an alert raised immediately."
        ),
        PostureLabel::Laying => "Subject detected laying down. This may be normal rest or a \
             health emergency; laying time will be monitored against the limit."
            .to_string(),
        PostureLabel::Standing | PostureLabel::Walking => return None,
    };
    Some(text)
}

/// Scripted analysis for `config.event_type`.
/// Types other than sitting, falling and laying yield an empty result.
pub fn analyze_config(config: &VideoConfig) -> GuardianResult<AnalysisResult> {
    let stamp = SimulatedClock::anchor(config)?.stamp(SCRIPTED_EVENT_AT);

    let Some(kind) = config.event_type else {
        return Ok(AnalysisResult {
            summary: String::new(),
            events: Vec::new(),
        });
    };
    let Some(summary) = summary(kind, &stamp.time) else {
        return Ok(AnalysisResult {
            summary: String::new(),
            events: Vec::new(),
        });
    };

    debug!(event_type = kind.as_str(), timestamp = %stamp.time, "scripted analysis");

    let event = SimulationEvent::new(kind, stamp.time, stamp.date, "", "");
    Ok(AnalysisResult {
        summary,
        events: vec![event],
    })
}
