//! Monitor Session - per-camera runtime loop

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use guardian_core::{
    ConfigUpdate, GuardianResult, LandmarkSet, PostureLabel, SessionId, SimulationEvent,
    VideoConfig, VideoTime,
};
use guardian_pose::{LandmarkSmoother, PostureClassifier};
use guardian_time::{
    format_duration_text, progress_percent, PlaybackClock, PlaybackSource, SecondTicker, SimStamp,
    SimulatedClock,
};
use tracing::{debug, info, warn};

use crate::{
    EventEmitter, EventLog, NoSnapshot, Observation, PostureHistory, PostureStabilizer,
    RuntimeConfig, SittingMonitor, SnapshotSource, Transition, WellnessNotification,
};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    SessionId::new(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
}

/// One frame from the pose detector
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// `None` when no person was detected
    pub landmarks: Option<LandmarkSet>,
    /// Playback position of the frame
    pub video_time: VideoTime,
    /// Wall clock at capture (drives notification expiry)
    pub wall_time: Instant,
}

impl FrameInput {
    pub fn new(landmarks: Option<LandmarkSet>, video_elapsed_secs: f64) -> Self {
        FrameInput {
            landmarks,
            video_time: VideoTime::from_secs_f64(video_elapsed_secs),
            wall_time: Instant::now(),
        }
    }

    pub fn detected(landmarks: LandmarkSet, video_elapsed_secs: f64) -> Self {
        Self::new(Some(landmarks), video_elapsed_secs)
    }

    pub fn absent(video_elapsed_secs: f64) -> Self {
        Self::new(None, video_elapsed_secs)
    }

    pub fn at_wall(mut self, wall_time: Instant) -> Self {
        self.wall_time = wall_time;
        self
    }
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutput {
    Event(SimulationEvent),
    PostureChanged(PostureLabel),
    ConfigUpdate(ConfigUpdate),
    Wellness(WellnessNotification),
    Ended(SessionId),
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session already ended; nothing processed
    Ended,
    /// Playback paused; frame ignored
    Paused,
    /// Clock advanced without a frame (timer mode)
    Advanced,
    /// No person in frame; smoother reset
    Absent,
    Observed(Observation),
}

impl TickOutcome {
    pub fn transition(&self) -> Option<Transition> {
        match self {
            TickOutcome::Observed(obs) => obs.transition,
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionStats {
    pub ticks: u64,
    pub frames_processed: u64,
    pub frames_paused: u64,
    pub frames_after_end: u64,
    pub absent_frames: u64,
    pub events_emitted: u64,
    pub critical_events: u64,
    pub snapshot_failures: u64,
    pub wellness_alerts: u64,
    pub config_updates: u64,
    pub outputs_popped: u64,
    pub outputs_dropped: u64,
    pub last_tick_duration: Duration,
}

/// Monitoring session for one camera
///
/// Owns every piece of per-session state; starting a new session (or
/// [`restart`](Self::restart)) discards all of it.
pub struct MonitorSession {
    id: SessionId,
    /// Display copy of the camera config; only derived fields change
    video: VideoConfig,
    config: RuntimeConfig,
    emitter: EventEmitter,
    playback: PlaybackClock,
    ticker: SecondTicker,
    smoother: LandmarkSmoother,
    classifier: PostureClassifier,
    stabilizer: PostureStabilizer,
    sitting: SittingMonitor,
    log: EventLog,
    snapshot: Box<dyn SnapshotSource>,
    outputs: VecDeque<SessionOutput>,
    stats: SessionStats,
    ended: bool,
}

impl MonitorSession {
    /// Start a session. Fails on an unparseable start time or date, or an
    /// invalid speed factor.
    pub fn start(video: VideoConfig, config: RuntimeConfig) -> GuardianResult<Self> {
        config.validate()?;
        let clock = SimulatedClock::anchor(&video)?;

        let playback = if video.has_video() {
            PlaybackClock::video()
        } else {
            PlaybackClock::timer(Duration::from_secs(config.timer_duration_secs))
        };

        let session = MonitorSession {
            id: next_session_id(),
            emitter: EventEmitter::new(clock),
            playback,
            ticker: SecondTicker::new(),
            smoother: LandmarkSmoother::from_config(&config.smoother),
            classifier: PostureClassifier::new(config.classifier),
            stabilizer: PostureStabilizer::new(config.stabilizer),
            sitting: SittingMonitor::new(config.sitting),
            log: EventLog::new(),
            snapshot: Box::new(NoSnapshot),
            outputs: VecDeque::new(),
            stats: SessionStats::default(),
            ended: false,
            video,
            config,
        };

        info!(
            session = %session.id,
            camera = %session.video.camera_name,
            start_time = %session.video.start_time,
            date = %session.video.date,
            speed = session.video.speed,
            source = ?session.playback.source(),
            "session started"
        );
        Ok(session)
    }

    /// Attach a snapshot renderer
    pub fn with_snapshot_source<S: SnapshotSource + 'static>(mut self, source: S) -> Self {
        self.snapshot = Box::new(source);
        self
    }

    /// Replace this session with a fresh one for `video`.
    /// The runtime config and snapshot source carry over; nothing else does.
    pub fn restart(&mut self, video: VideoConfig) -> GuardianResult<()> {
        let mut next = Self::start(video, self.config.clone())?;
        next.snapshot = std::mem::replace(&mut self.snapshot, Box::new(NoSnapshot));

        if !self.ended {
            info!(session = %self.id, replaced_by = %next.id, "session replaced");
        }
        *self = next;
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn video_config(&self) -> &VideoConfig {
        &self.video
    }

    pub fn runtime_config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulatedClock {
        self.emitter.clock()
    }

    pub fn playback(&self) -> &PlaybackClock {
        &self.playback
    }

    pub fn position(&self) -> VideoTime {
        self.playback.position()
    }

    /// Simulated wall time at the current playback position
    pub fn simulated_now(&self) -> SimStamp {
        self.clock().stamp(self.playback.position())
    }

    /// Playback progress, 0..=100 (0 while the duration is unknown)
    pub fn progress(&self) -> f64 {
        self.playback
            .duration()
            .map_or(0.0, |d| progress_percent(self.playback.position(), d))
    }

    pub fn confirmed_posture(&self) -> PostureLabel {
        self.stabilizer.confirmed()
    }

    pub fn history(&self) -> &PostureHistory {
        self.stabilizer.history()
    }

    /// Simulated seconds in the current sitting streak
    pub fn sitting_secs(&self) -> f64 {
        self.sitting.accumulated_secs()
    }

    pub fn visible_notification(&self, now: Instant) -> Option<&WellnessNotification> {
        self.sitting.visible_notification(now)
    }

    pub fn dismiss_notification(&mut self) {
        self.sitting.dismiss();
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn is_playing(&self) -> bool {
        !self.ended && self.playback.is_playing()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Video metadata arrived: record the clip length and publish the
    /// total simulated duration.
    pub fn video_loaded(&mut self, duration_secs: f64) {
        if self.ended {
            return;
        }
        self.playback.set_duration(VideoTime::from_secs_f64(duration_secs));

        let total_minutes = duration_secs.max(0.0) * self.clock().speed();
        let update = ConfigUpdate::duration_only(format_duration_text(total_minutes));
        debug!(session = %self.id, duration_secs, "video metadata loaded");
        self.publish_update(update);
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            self.playback.pause();
            info!(session = %self.id, position = ?self.playback.position(), "paused");
        }
    }

    pub fn resume(&mut self) {
        if !self.ended && !self.playback.is_playing() {
            self.playback.play();
            info!(session = %self.id, position = ?self.playback.position(), "resumed");
        }
    }

    /// Returns whether playback is now running
    pub fn toggle_playback(&mut self) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
        self.is_playing()
    }

    /// Finalize the session. Later ticks are counted and ignored.
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.playback.end();
        self.smoother.reset();

        info!(
            session = %self.id,
            position = ?self.playback.position(),
            events = self.stats.events_emitted,
            frames = self.stats.frames_processed,
            "session ended"
        );
        self.push_output(SessionOutput::Ended(self.id));
    }

    /// Process one detector frame
    pub fn tick(&mut self, input: FrameInput) -> TickOutcome {
        let started = Instant::now();
        self.stats.ticks += 1;

        if self.ended {
            self.stats.frames_after_end += 1;
            return TickOutcome::Ended;
        }
        if !self.playback.is_playing() {
            self.stats.frames_paused += 1;
            return TickOutcome::Paused;
        }

        let position = self.playback.update_position(input.video_time);

        // 1. Whole-second bookkeeping
        self.on_clock(position, input.wall_time);

        // 2. Detection
        let outcome = self.process_frame(input.landmarks.as_ref(), position);

        // 3. End of clip
        if self.playback.is_ended() {
            self.end();
        }

        self.stats.last_tick_duration = started.elapsed();
        outcome
    }

    /// Advance the built-in timer by one step (no video attached)
    pub fn advance_timer(&mut self, wall_time: Instant) -> TickOutcome {
        self.stats.ticks += 1;

        if self.ended {
            self.stats.frames_after_end += 1;
            return TickOutcome::Ended;
        }
        if self.playback.source() != PlaybackSource::Timer {
            warn!(session = %self.id, "timer advanced on a video-driven session");
            return TickOutcome::Advanced;
        }
        if !self.playback.is_playing() {
            self.stats.frames_paused += 1;
            return TickOutcome::Paused;
        }

        let position = self.playback.tick_timer();
        if self.playback.is_ended() {
            self.end();
            return TickOutcome::Ended;
        }

        self.on_clock(position, wall_time);
        TickOutcome::Advanced
    }

    /// Pop the next output
    pub fn pop_output(&mut self) -> Option<SessionOutput> {
        let output = self.outputs.pop_front();
        if output.is_some() {
            self.stats.outputs_popped += 1;
        }
        output
    }

    /// Drain every pending output
    pub fn drain_outputs(&mut self) -> Vec<SessionOutput> {
        self.stats.outputs_popped += self.outputs.len() as u64;
        self.outputs.drain(..).collect()
    }

    pub fn pending_outputs(&self) -> usize {
        self.outputs.len()
    }

    fn on_clock(&mut self, position: VideoTime, wall_time: Instant) {
        let first = self.stats.config_updates == 0;
        let crossed = self.ticker.advance(position);
        if crossed == 0 && !first {
            return;
        }

        if crossed > 0 {
            let rate = self.clock().sim_seconds_per_second();
            let posture = self.stabilizer.confirmed();
            if let Some(notification) = self.sitting.tick(posture, crossed, rate, wall_time) {
                self.stats.wellness_alerts += 1;
                self.push_output(SessionOutput::Wellness(notification));
            }
        }

        let stamp = self.clock().stamp(position);
        let update = ConfigUpdate {
            start_time: Some(stamp.time),
            date: Some(stamp.date),
            duration_text: Some(format_duration_text(self.clock().sim_minutes(position))),
        };
        self.publish_update(update);
    }

    fn process_frame(
        &mut self,
        landmarks: Option<&LandmarkSet>,
        position: VideoTime,
    ) -> TickOutcome {
        let Some(smoothed) = self.smoother.smooth(landmarks) else {
            self.stats.absent_frames += 1;
            return TickOutcome::Absent;
        };
        self.stats.frames_processed += 1;

        let raw = self.classifier.classify(&smoothed);
        let observation = self.stabilizer.observe(raw);

        if let Some(transition) = observation.transition {
            self.confirm(transition, position);
        }
        TickOutcome::Observed(observation)
    }

    fn confirm(&mut self, transition: Transition, position: VideoTime) {
        info!(
            session = %self.id,
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            position = ?position,
            "posture confirmed"
        );

        let emitted = self.emitter.emit(transition.to, position, &mut *self.snapshot);
        if emitted.snapshot_error.is_some() {
            self.stats.snapshot_failures += 1;
        }

        let event = emitted.event;
        self.stats.events_emitted += 1;
        if event.is_critical {
            self.stats.critical_events += 1;
        }

        self.log.append(event.clone());
        self.push_output(SessionOutput::Event(event));
        self.push_output(SessionOutput::PostureChanged(transition.to));
    }

    fn publish_update(&mut self, update: ConfigUpdate) {
        if !update.changes(&self.video) {
            return;
        }
        self.video.apply(&update);
        self.stats.config_updates += 1;
        self.push_output(SessionOutput::ConfigUpdate(update));
    }

    fn push_output(&mut self, output: SessionOutput) {
        if self.outputs.len() >= self.config.max_outputs {
            self.outputs.pop_front();
            self.stats.outputs_dropped += 1;
        }
        self.outputs.push_back(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnapshotError;
    use guardian_core::{GuardianError, Joint, Landmark, TOPOLOGY_SIZE};

    fn upright(knee_dx: f32) -> LandmarkSet {
        let mut set = LandmarkSet::new(vec![Landmark::at(0.5, 0.3); TOPOLOGY_SIZE]);
        set.set_joint(Joint::Nose, Landmark::at(0.5, 0.1));
        set.set_joint(Joint::LeftShoulder, Landmark::at(0.45, 0.25));
        set.set_joint(Joint::RightShoulder, Landmark::at(0.55, 0.25));
        set.set_joint(Joint::LeftHip, Landmark::at(0.47, 0.5));
        set.set_joint(Joint::RightHip, Landmark::at(0.53, 0.5));
        set.set_joint(Joint::LeftKnee, Landmark::at(0.47 + knee_dx, 0.7));
        set.set_joint(Joint::RightKnee, Landmark::at(0.53 + knee_dx, 0.7));
        set.set_joint(Joint::LeftAnkle, Landmark::at(0.47, 0.9));
        set.set_joint(Joint::RightAnkle, Landmark::at(0.53, 0.9));
        set
    }

    fn standing() -> LandmarkSet {
        upright(0.0)
    }

    fn sitting() -> LandmarkSet {
        upright(0.2)
    }

    fn laying() -> LandmarkSet {
        let mut set = LandmarkSet::new(vec![Landmark::at(0.5, 0.8); TOPOLOGY_SIZE]);
        set.set_joint(Joint::LeftShoulder, Landmark::at(0.2, 0.79));
        set.set_joint(Joint::RightShoulder, Landmark::at(0.2, 0.81));
        set.set_joint(Joint::LeftHip, Landmark::at(0.5, 0.79));
        set.set_joint(Joint::RightHip, Landmark::at(0.5, 0.81));
        set
    }

    fn video() -> VideoConfig {
        VideoConfig::new("08:00", "2021-12-19", 1.0).with_video_url("file:///clip.mp4")
    }

    fn session() -> MonitorSession {
        MonitorSession::start(video(), RuntimeConfig::unsmoothed()).unwrap()
    }

    fn events(outputs: &[SessionOutput]) -> Vec<&SimulationEvent> {
        outputs
            .iter()
            .filter_map(|o| match o {
                SessionOutput::Event(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_rejects_bad_config() {
        let bad_time = VideoConfig::new("8 o'clock", "2021-12-19", 1.0);
        assert!(matches!(
            MonitorSession::start(bad_time, RuntimeConfig::default()),
            Err(GuardianError::InvalidStartTime(_))
        ));

        let bad_date = VideoConfig::new("08:00", "19/12/2021", 1.0);
        assert!(matches!(
            MonitorSession::start(bad_date, RuntimeConfig::default()),
            Err(GuardianError::InvalidDate(_))
        ));

        let bad_speed = VideoConfig::new("08:00", "2021-12-19", 0.5);
        assert!(matches!(
            MonitorSession::start(bad_speed, RuntimeConfig::default()),
            Err(GuardianError::InvalidSpeedFactor(_))
        ));
    }

    #[test]
    fn test_session_ids_unique() {
        let a = session();
        let b = session();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_fall_emits_one_critical_event() {
        let mut s = session();
        for t in [7.0, 8.0, 9.0] {
            assert!(s.tick(FrameInput::detected(standing(), t)).transition().is_none());
        }
        let outcome = s.tick(FrameInput::detected(laying(), 10.0));
        assert_eq!(outcome.transition().map(|t| t.to), Some(PostureLabel::Falling));

        let outputs = s.drain_outputs();
        let events = events(&outputs);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PostureLabel::Falling);
        assert_eq!(events[0].timestamp, "08:10");
        assert!(events[0].is_critical);
        assert!(outputs.contains(&SessionOutput::PostureChanged(PostureLabel::Falling)));

        assert_eq!(s.events().len(), 1);
        assert_eq!(s.stats().critical_events, 1);
    }

    #[test]
    fn test_absent_person_resets_smoother_only() {
        let mut s = session();
        for t in [0.1, 0.2, 0.3] {
            s.tick(FrameInput::detected(sitting(), t));
        }
        assert_eq!(s.confirmed_posture(), PostureLabel::Sitting);

        assert_eq!(s.tick(FrameInput::absent(0.4)), TickOutcome::Absent);
        assert_eq!(s.history().len(), 3);
        assert_eq!(s.confirmed_posture(), PostureLabel::Sitting);
        assert_eq!(s.stats().absent_frames, 1);
    }

    #[test]
    fn test_pause_preserves_state() {
        let mut s = session();
        for t in [0.1, 0.2, 0.3] {
            s.tick(FrameInput::detected(sitting(), t));
        }
        s.pause();
        assert!(!s.is_playing());

        for t in [0.4, 0.5, 0.6] {
            assert_eq!(s.tick(FrameInput::detected(laying(), t)), TickOutcome::Paused);
        }
        assert_eq!(s.stats().frames_paused, 3);
        assert_eq!(s.history().len(), 3);
        assert_eq!(s.confirmed_posture(), PostureLabel::Sitting);

        assert!(s.toggle_playback());
        assert!(matches!(
            s.tick(FrameInput::detected(sitting(), 0.7)),
            TickOutcome::Observed(_)
        ));
        assert_eq!(s.history().len(), 4);
    }

    #[test]
    fn test_sitting_alert_at_speed_one() {
        let mut s = session();
        let t0 = Instant::now();
        for t in [0.1, 0.2, 0.3] {
            s.tick(FrameInput::detected(sitting(), t).at_wall(t0));
        }
        s.drain_outputs();

        for sec in 1..=44 {
            s.tick(FrameInput::detected(sitting(), sec as f64).at_wall(t0));
        }
        assert!(s.visible_notification(t0).is_none());

        s.tick(FrameInput::detected(sitting(), 45.0).at_wall(t0));
        assert_eq!(s.sitting_secs(), 2700.0);
        assert!(s
            .drain_outputs()
            .iter()
            .any(|o| matches!(o, SessionOutput::Wellness(_))));
        assert!(s.visible_notification(t0).is_some());
        assert!(s.visible_notification(t0 + Duration::from_secs(6)).is_none());
    }

    #[test]
    fn test_config_update_each_second() {
        let mut s = session();
        s.tick(FrameInput::absent(0.0));
        s.tick(FrameInput::absent(0.5));
        s.tick(FrameInput::absent(1.0));

        let updates: Vec<_> = s
            .drain_outputs()
            .into_iter()
            .filter_map(|o| match o {
                SessionOutput::ConfigUpdate(u) => Some(u),
                _ => None,
            })
            .collect();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].start_time.as_deref(), Some("08:00"));
        assert_eq!(updates[0].duration_text.as_deref(), Some("0.00 ชั่วโมง"));
        assert_eq!(updates[1].start_time.as_deref(), Some("08:01"));
        assert_eq!(updates[1].duration_text.as_deref(), Some("0.01 ชั่วโมง"));
        assert_eq!(s.video_config().start_time, "08:01");
    }

    #[test]
    fn test_video_loaded_and_ended() {
        let mut s = session();
        s.video_loaded(90.0);
        let outputs = s.drain_outputs();
        assert_eq!(
            outputs,
            vec![SessionOutput::ConfigUpdate(ConfigUpdate::duration_only("1.30 ชั่วโมง"))]
        );

        s.tick(FrameInput::absent(45.0));
        assert_eq!(s.progress(), 50.0);

        s.tick(FrameInput::absent(90.0));
        assert!(s.is_ended());
        assert!(s.drain_outputs().contains(&SessionOutput::Ended(s.id())));

        assert_eq!(s.tick(FrameInput::detected(laying(), 91.0)), TickOutcome::Ended);
        assert_eq!(s.stats().frames_after_end, 1);
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_positions_never_rewind() {
        let mut s = session();
        s.tick(FrameInput::absent(5.0));
        s.tick(FrameInput::absent(2.0));
        assert_eq!(s.position(), VideoTime::from_millis(5000));
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut s = session();
        s.end();
        s.end();
        let ended = s
            .drain_outputs()
            .into_iter()
            .filter(|o| matches!(o, SessionOutput::Ended(_)))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_snapshot_failure_counted() {
        let failing =
            || -> Result<String, SnapshotError> { Err(SnapshotError::Encode("png".into())) };
        let mut s = session().with_snapshot_source(failing);
        s.tick(FrameInput::detected(laying(), 1.0));

        assert_eq!(s.stats().snapshot_failures, 1);
        assert_eq!(s.events().last().map(|e| e.snapshot_url.as_str()), Some(""));
    }

    #[test]
    fn test_restart_resets_state() {
        let mut s = session();
        let t0 = Instant::now();
        for sec in 0..10 {
            s.tick(FrameInput::detected(sitting(), sec as f64).at_wall(t0));
        }
        assert!(s.sitting_secs() > 0.0);
        let old = s.id();

        s.restart(VideoConfig::new("21:00", "2022-03-01", 2.0)).unwrap();
        assert_ne!(s.id(), old);
        assert_eq!(s.sitting_secs(), 0.0);
        assert!(s.history().is_empty());
        assert_eq!(s.confirmed_posture(), PostureStabilizer::INITIAL);
        assert!(s.events().is_empty());
        assert_eq!(s.pending_outputs(), 0);
        assert_eq!(s.playback().source(), PlaybackSource::Timer);
    }

    #[test]
    fn test_timer_mode_runs_to_end() {
        let config = RuntimeConfig {
            timer_duration_secs: 3,
            ..RuntimeConfig::unsmoothed()
        };
        let video = VideoConfig::new("08:00", "2021-12-19", 1.0);
        let mut s = MonitorSession::start(video, config).unwrap();
        let now = Instant::now();

        assert_eq!(s.advance_timer(now), TickOutcome::Advanced);
        assert_eq!(s.advance_timer(now), TickOutcome::Advanced);
        assert_eq!(s.advance_timer(now), TickOutcome::Advanced);
        assert_eq!(s.simulated_now().time, "08:03");
        assert_eq!(s.advance_timer(now), TickOutcome::Ended);
        assert!(s.is_ended());
    }

    #[test]
    fn test_output_queue_bounded() {
        let config = RuntimeConfig {
            max_outputs: 2,
            ..RuntimeConfig::unsmoothed()
        };
        let mut s = MonitorSession::start(video(), config).unwrap();
        for sec in 0..5 {
            s.tick(FrameInput::absent(sec as f64));
        }
        assert_eq!(s.pending_outputs(), 2);
        assert_eq!(s.stats().outputs_dropped, 3);
        assert!(s.pop_output().is_some());
        assert_eq!(s.stats().outputs_popped, 1);
    }
}
