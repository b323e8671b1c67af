//! Guardian Replay
//!
//! Drives a monitoring session from:
//! - a JSONL recording of detector output
//! - a scripted scenario of synthetic poses
//!
//! Events are printed to stdout as JSON lines; logs go through tracing.

mod cli;
mod recording;

use anyhow::{Context, Result};
use clap::Parser;
use guardian_core::VideoConfig;
use guardian_runtime::{
    analyze_config, init_logging, FrameInput, LogFormat, MonitorSession, RuntimeConfig,
    SessionOutput, SessionStats,
};
use guardian_test::ScenarioRunner;
use guardian_time::format_video_time;
use tracing::{info, warn};

use cli::{Cli, Commands};
use recording::{load_recording, load_video_config, parse_script};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if cli.verbose {
        config.logging.level = "debug".into();
    }
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    init_logging(&config.logging);

    match cli.command {
        Commands::Replay {
            video,
            recording,
            duration,
        } => {
            let video = load_video_config(&video)?;
            let frames = load_recording(&recording)?;
            run_replay(video, config, frames, duration)
        }
        Commands::Simulate {
            video,
            script,
            fps,
            seed,
        } => {
            let video = load_video_config(&video)?;
            let scenario = parse_script(&script, fps)?;
            run_simulate(video, config, &scenario, seed)
        }
        Commands::Analyze { video } => {
            let video = load_video_config(&video)?;
            let result = analyze_config(&video).context("analyzing video config")?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn run_replay(
    video: VideoConfig,
    config: RuntimeConfig,
    frames: Vec<recording::RecordedFrame>,
    duration: Option<f64>,
) -> Result<()> {
    banner(&video);

    let mut session = MonitorSession::start(video, config).context("starting session")?;
    if let Some(duration) = duration {
        session.video_loaded(duration);
    }

    info!(frames = frames.len(), "replaying recording");
    for frame in frames {
        session.tick(FrameInput::new(frame.landmarks, frame.t));
        print_outputs(&mut session)?;
        if session.is_ended() {
            break;
        }
    }

    let position = session.position();
    let progress = session.progress();
    session.end();
    print_outputs(&mut session)?;
    print_stats(session.stats());
    println!("position: {} ({progress:.1}%)", format_video_time(position));
    Ok(())
}

fn run_simulate(
    video: VideoConfig,
    config: RuntimeConfig,
    scenario: &guardian_test::Scenario,
    seed: u64,
) -> Result<()> {
    banner(&video);

    let mut runner = ScenarioRunner::new(video, config, seed).context("starting session")?;
    info!(
        segments = scenario.segments.len(),
        secs = scenario.duration_secs(),
        "running scenario"
    );
    let report = runner.run(scenario);

    for event in &report.events {
        println!("{}", serde_json::to_string(event)?);
    }
    if report.wellness_alerts > 0 {
        println!("wellness alerts: {}", report.wellness_alerts);
    }
    print_stats(&report.stats);
    Ok(())
}

fn print_outputs(session: &mut MonitorSession) -> Result<()> {
    let at = format_video_time(session.position());
    while let Some(output) = session.pop_output() {
        match output {
            SessionOutput::Event(event) => {
                info!(at = %at, kind = event.kind.as_str(), "event");
                println!("{}", serde_json::to_string(&event)?);
            }
            SessionOutput::Wellness(n) => {
                warn!(minutes = n.sitting_minutes, "{}", n.title);
                println!("⚠  {} {}", n.title, n.message);
            }
            SessionOutput::Ended(id) => info!(session = %id, "replay finished"),
            SessionOutput::PostureChanged(_) | SessionOutput::ConfigUpdate(_) => {}
        }
    }
    Ok(())
}

fn banner(video: &VideoConfig) {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           Guardian Replay                                  ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!(
        "camera: {}  start: {} {}  speed: x{}",
        if video.camera_name.is_empty() { "-" } else { video.camera_name.as_str() },
        video.date,
        video.start_time,
        video.speed
    );
    println!();
}

fn print_stats(stats: &SessionStats) {
    println!();
    println!(
        "frames: {} processed, {} absent, {} paused",
        stats.frames_processed, stats.absent_frames, stats.frames_paused
    );
    println!(
        "events: {} ({} critical), snapshot failures: {}",
        stats.events_emitted, stats.critical_events, stats.snapshot_failures
    );
}
