//! Scenario Simulator - scripted footage through a full session
//!
//! A scenario is a sequence of segments (a held posture, an empty room,
//! or a paused stretch) sampled at a fixed frame rate. Wall-clock time
//! advances in lockstep with video time.

use std::time::{Duration, Instant};

use guardian_core::{ConfigUpdate, GuardianResult, PostureLabel, SimulationEvent, VideoConfig};
use guardian_runtime::{
    FrameInput, MonitorSession, RuntimeConfig, SessionOutput, SessionStats, TickOutcome,
};
use tracing::debug;

use crate::PoseGenerator;

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Subject holds `posture` for `secs`
    Hold { posture: PostureLabel, secs: f64 },
    /// Nobody in frame for `secs`
    Absent { secs: f64 },
    /// Playback paused while `frames` frames arrive
    Paused { frames: usize },
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub fps: f64,
    pub segments: Vec<Segment>,
}

impl Scenario {
    pub fn new(fps: f64) -> Self {
        Scenario {
            fps: if fps > 0.0 { fps } else { 1.0 },
            segments: Vec::new(),
        }
    }

    pub fn hold(mut self, posture: PostureLabel, secs: f64) -> Self {
        self.segments.push(Segment::Hold { posture, secs });
        self
    }

    pub fn absent(mut self, secs: f64) -> Self {
        self.segments.push(Segment::Absent { secs });
        self
    }

    pub fn paused(mut self, frames: usize) -> Self {
        self.segments.push(Segment::Paused { frames });
        self
    }

    /// Total video seconds covered
    pub fn duration_secs(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Hold { secs, .. } | Segment::Absent { secs } => *secs,
                Segment::Paused { .. } => 0.0,
            })
            .sum()
    }
}

/// Everything a scenario run produced
#[derive(Clone, Debug, Default)]
pub struct ScenarioReport {
    pub events: Vec<SimulationEvent>,
    pub postures: Vec<PostureLabel>,
    pub updates: Vec<ConfigUpdate>,
    pub wellness_alerts: usize,
    pub ended: bool,
    pub stats: SessionStats,
}

impl ScenarioReport {
    pub fn event_kinds(&self) -> Vec<PostureLabel> {
        self.events.iter().map(|e| e.kind).collect()
    }

    pub fn falls(&self) -> usize {
        self.events.iter().filter(|e| e.is_critical).count()
    }
}

/// Drives a [`MonitorSession`] with generated poses
pub struct ScenarioRunner {
    session: MonitorSession,
    generator: PoseGenerator,
    wall_origin: Instant,
    /// Video position of the next frame
    cursor: f64,
}

impl ScenarioRunner {
    pub fn new(video: VideoConfig, config: RuntimeConfig, seed: u64) -> GuardianResult<Self> {
        Ok(ScenarioRunner {
            session: MonitorSession::start(video, config)?,
            generator: PoseGenerator::new(seed),
            wall_origin: Instant::now(),
            cursor: 0.0,
        })
    }

    pub fn session(&self) -> &MonitorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut MonitorSession {
        &mut self.session
    }

    /// Play `scenario` from the current cursor and collect the outputs
    pub fn run(&mut self, scenario: &Scenario) -> ScenarioReport {
        let step = 1.0 / scenario.fps;
        let mut report = ScenarioReport::default();

        for segment in &scenario.segments {
            match *segment {
                Segment::Hold { posture, secs } => {
                    for _ in 0..frame_count(secs, scenario.fps) {
                        let pose = self.generator.pose(posture);
                        self.feed(FrameInput::detected(pose, self.cursor));
                        self.cursor += step;
                    }
                }
                Segment::Absent { secs } => {
                    for _ in 0..frame_count(secs, scenario.fps) {
                        self.feed(FrameInput::absent(self.cursor));
                        self.cursor += step;
                    }
                }
                Segment::Paused { frames } => {
                    self.session.pause();
                    for _ in 0..frames {
                        let pose = self.generator.laying();
                        let outcome = self.feed(FrameInput::detected(pose, self.cursor));
                        debug_assert_eq!(outcome, TickOutcome::Paused);
                    }
                    self.session.resume();
                }
            }
            self.collect(&mut report);
        }

        report.ended = self.session.is_ended();
        report.stats = self.session.stats().clone();
        debug!(
            events = report.events.len(),
            frames = report.stats.frames_processed,
            "scenario finished"
        );
        report
    }

    fn feed(&mut self, input: FrameInput) -> TickOutcome {
        let wall = self.wall_origin + Duration::from_secs_f64(self.cursor.max(0.0));
        self.session.tick(input.at_wall(wall))
    }

    fn collect(&mut self, report: &mut ScenarioReport) {
        while let Some(output) = self.session.pop_output() {
            match output {
                SessionOutput::Event(event) => report.events.push(event),
                SessionOutput::PostureChanged(posture) => report.postures.push(posture),
                SessionOutput::ConfigUpdate(update) => report.updates.push(update),
                SessionOutput::Wellness(_) => report.wellness_alerts += 1,
                SessionOutput::Ended(_) => report.ended = true,
            }
        }
    }
}

fn frame_count(secs: f64, fps: f64) -> usize {
    (secs * fps).round().max(0.0) as usize
}
