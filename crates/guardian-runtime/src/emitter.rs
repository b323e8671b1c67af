//! Event Emitter - turns confirmed transitions into stamped records

use guardian_core::{PostureLabel, SimulationEvent, VideoTime};
use guardian_time::SimulatedClock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Snapshot capture failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("No frame available")]
    NoFrame,

    #[error("Overlay drawing failed: {0}")]
    Draw(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),
}

/// Source of encoded frame snapshots (a data URL or storage key)
pub trait SnapshotSource {
    fn capture(&mut self) -> Result<String, SnapshotError>;
}

/// Source used when no renderer is attached
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshot;

impl SnapshotSource for NoSnapshot {
    fn capture(&mut self) -> Result<String, SnapshotError> {
        Ok(String::new())
    }
}

impl<F> SnapshotSource for F
where
    F: FnMut() -> Result<String, SnapshotError>,
{
    fn capture(&mut self) -> Result<String, SnapshotError> {
        self()
    }
}

/// Human-readable description for a confirmed posture
pub fn describe(label: PostureLabel) -> &'static str {
    match label {
        PostureLabel::Falling => "Sudden postural collapse detected (Critical)",
        PostureLabel::Standing => "Subject is in a stable upright position",
        PostureLabel::Walking => "Subject is moving in the supervised area",
        PostureLabel::Sitting => "Subject is in a stable sitting posture",
        PostureLabel::Laying => "Subject is resting in a horizontal position",
    }
}

/// An event plus whether its snapshot had to be dropped
#[derive(Debug, Clone)]
pub struct Emitted {
    pub event: SimulationEvent,
    pub snapshot_error: Option<SnapshotError>,
}

/// Builds events against the session's simulated clock
#[derive(Debug, Clone)]
pub struct EventEmitter {
    clock: SimulatedClock,
}

impl EventEmitter {
    pub fn new(clock: SimulatedClock) -> Self {
        EventEmitter { clock }
    }

    pub fn clock(&self) -> &SimulatedClock {
        &self.clock
    }

    /// Create the event for a confirmed `label` at video time `t`.
    /// A failed snapshot is logged and leaves `snapshot_url` empty.
    pub fn emit(
        &self,
        label: PostureLabel,
        t: VideoTime,
        snapshot: &mut dyn SnapshotSource,
    ) -> Emitted {
        let stamp = self.clock.stamp(t);

        let (snapshot_url, snapshot_error) = match snapshot.capture() {
            Ok(url) => (url, None),
            Err(e) => {
                warn!(posture = label.as_str(), error = %e, "snapshot capture failed");
                (String::new(), Some(e))
            }
        };

        let event =
            SimulationEvent::new(label, stamp.time, stamp.date, describe(label), snapshot_url);

        info!(
            event_id = %event.id,
            posture = label.as_str(),
            timestamp = %event.timestamp,
            date = %event.date,
            critical = event.is_critical,
            "event emitted"
        );

        Emitted {
            event,
            snapshot_error,
        }
    }
}

/// Append-only record of emitted events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<SimulationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&SimulationEvent> {
        self.events.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulationEvent> {
        self.events.iter()
    }

    pub fn critical(&self) -> impl Iterator<Item = &SimulationEvent> {
        self.events.iter().filter(|e| e.is_critical)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a SimulationEvent;
    type IntoIter = std::slice::Iter<'a, SimulationEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_core::VideoConfig;

    fn emitter() -> EventEmitter {
        let config = VideoConfig::new("08:00", "2021-12-19", 1.0);
        EventEmitter::new(SimulatedClock::anchor(&config).unwrap())
    }

    #[test]
    fn test_emit_falling() {
        let emitted =
            emitter().emit(PostureLabel::Falling, VideoTime::from_millis(10_000), &mut NoSnapshot);
        let event = emitted.event;

        assert_eq!(event.kind, PostureLabel::Falling);
        assert_eq!(event.timestamp, "08:10");
        assert_eq!(event.date, "2021-12-19");
        assert!(event.is_critical);
        assert_eq!(event.description, describe(PostureLabel::Falling));
        assert!(emitted.snapshot_error.is_none());
    }

    #[test]
    fn test_only_falling_is_critical() {
        let e = emitter();
        for &label in PostureLabel::all() {
            let event = e.emit(label, VideoTime::ZERO, &mut NoSnapshot).event;
            assert_eq!(event.is_critical, label == PostureLabel::Falling);
        }
    }

    #[test]
    fn test_snapshot_failure_swallowed() {
        let mut failing = || -> Result<String, SnapshotError> { Err(SnapshotError::NoFrame) };
        let emitted = emitter().emit(PostureLabel::Sitting, VideoTime::ZERO, &mut failing);

        assert_eq!(emitted.event.snapshot_url, "");
        assert!(!emitted.event.has_snapshot());
        assert_eq!(emitted.snapshot_error, Some(SnapshotError::NoFrame));
    }

    #[test]
    fn test_snapshot_attached() {
        let mut source =
            || -> Result<String, SnapshotError> { Ok("data:image/jpeg;base64,AAAA".into()) };
        let event = emitter().emit(PostureLabel::Walking, VideoTime::ZERO, &mut source).event;
        assert!(event.has_snapshot());
    }

    #[test]
    fn test_event_ids_unique() {
        let e = emitter();
        let a = e.emit(PostureLabel::Sitting, VideoTime::ZERO, &mut NoSnapshot).event;
        let b = e.emit(PostureLabel::Sitting, VideoTime::ZERO, &mut NoSnapshot).event;
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_log() {
        let e = emitter();
        let mut log = EventLog::new();
        assert!(log.is_empty());

        for label in [PostureLabel::Sitting, PostureLabel::Falling, PostureLabel::Laying] {
            log.append(e.emit(label, VideoTime::ZERO, &mut NoSnapshot).event);
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.critical().count(), 1);
        assert_eq!(log.last().map(|e| e.kind), Some(PostureLabel::Laying));

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(3));
        assert_eq!(json[1]["type"], "falling");
    }
}
