//! Simulation event records
//!
//! One event is created per confirmed posture transition. Records are
//! immutable once built and are only ever appended to a log.

use serde::{Deserialize, Serialize};

use crate::{EventId, PostureLabel};

/// A confirmed posture transition, stamped in simulated time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: PostureLabel,
    /// Simulated wall time, "HH:MM" (24-hour)
    pub timestamp: String,
    /// Simulated calendar date, "YYYY-MM-DD"
    pub date: String,
    pub description: String,
    /// Encoded frame snapshot; empty when capture failed
    pub snapshot_url: String,
    pub is_critical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl SimulationEvent {
    /// Create an event with a fresh identity
    pub fn new(
        kind: PostureLabel,
        timestamp: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        snapshot_url: impl Into<String>,
    ) -> Self {
        SimulationEvent {
            id: EventId::generate(),
            kind,
            timestamp: timestamp.into(),
            date: date.into(),
            description: description.into(),
            snapshot_url: snapshot_url.into(),
            is_critical: kind.is_critical(),
            duration: None,
        }
    }

    /// Attach a human-readable duration ("2 hrs", "30 mins")
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn has_snapshot(&self) -> bool {
        !self.snapshot_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_is_critical() {
        let event = SimulationEvent::new(PostureLabel::Falling, "08:10", "2021-12-19", "x", "");
        assert!(event.is_critical);
        assert!(!event.has_snapshot());

        let event = SimulationEvent::new(PostureLabel::Laying, "08:10", "2021-12-19", "x", "");
        assert!(!event.is_critical);
    }

    #[test]
    fn test_wire_field_names() {
        let event = SimulationEvent::new(
            PostureLabel::Sitting,
            "09:30",
            "2021-12-19",
            "Subject is in a stable sitting posture",
            "data:image/jpeg;base64,AAAA",
        );
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "sitting");
        assert_eq!(value["timestamp"], "09:30");
        assert_eq!(value["snapshotUrl"], "data:image/jpeg;base64,AAAA");
        assert_eq!(value["isCritical"], false);
        assert!(value.get("duration").is_none());
    }

    #[test]
    fn test_with_duration() {
        let event = SimulationEvent::new(PostureLabel::Sitting, "09:30", "2021-12-19", "", "")
            .with_duration("30 mins");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["duration"], "30 mins");
    }
}
