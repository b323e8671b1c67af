//! End-to-end Integration Test Suite
//!
//! Verifies the complete monitoring flow:
//! - Fast fall confirmation against debounced transitions
//! - Event stamping on the simulated clock
//! - Prolonged-sitting alerts
//! - Session isolation

use guardian_core::{PostureLabel, SimulationEvent};
use guardian_runtime::{FrameInput, MonitorSession, SessionOutput};

use crate::PoseGenerator;

/// Feed `(posture, video_secs)` frames and return the events they produced
pub fn drive(
    session: &mut MonitorSession,
    generator: &mut PoseGenerator,
    frames: &[(PostureLabel, f64)],
) -> Vec<SimulationEvent> {
    for &(posture, t) in frames {
        session.tick(FrameInput::detected(generator.pose(posture), t));
    }
    session
        .drain_outputs()
        .into_iter()
        .filter_map(|o| match o {
            SessionOutput::Event(e) => Some(e),
            _ => None,
        })
        .collect()
}

/// `count` frames of `posture` starting at `from`, one per `step` seconds
pub fn frames(
    posture: PostureLabel,
    from: f64,
    step: f64,
    count: usize,
) -> Vec<(PostureLabel, f64)> {
    (0..count).map(|i| (posture, from + step * i as f64)).collect()
}
