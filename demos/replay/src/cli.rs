//! Command-Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Guardian Replay - feed pose streams through the monitoring pipeline
#[derive(Parser, Debug)]
#[command(name = "guardian-replay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug-level output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Runtime config (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSONL landmark recording
    Replay {
        /// Camera/video config (JSON)
        #[arg(long)]
        video: PathBuf,

        /// One `{"t": secs, "landmarks": [...] | null}` object per line
        #[arg(short, long)]
        recording: PathBuf,

        /// Clip length in seconds (as reported by video metadata)
        #[arg(long)]
        duration: Option<f64>,
    },

    /// Run a scripted scenario of synthetic poses
    Simulate {
        /// Camera/video config (JSON)
        #[arg(long)]
        video: PathBuf,

        /// Segments such as `standing:3,absent:1,laying:2`
        #[arg(short, long)]
        script: String,

        /// Frames per second
        #[arg(long, default_value = "10")]
        fps: f64,

        /// Jitter seed
        #[arg(long, default_value = "1")]
        seed: u64,
    },

    /// Print the scripted analysis for a video config
    Analyze {
        /// Camera/video config (JSON)
        #[arg(long)]
        video: PathBuf,
    },
}
