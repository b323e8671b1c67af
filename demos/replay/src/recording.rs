//! Recorded detector output and scenario scripts

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use guardian_core::{LandmarkSet, PostureLabel, VideoConfig};
use guardian_test::Scenario;
use serde::Deserialize;

/// One line of a JSONL recording
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    /// Video position, seconds
    pub t: f64,
    #[serde(default)]
    pub landmarks: Option<LandmarkSet>,
}

pub fn load_video_config(path: &Path) -> Result<VideoConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Parse a recording; blank lines are skipped
pub fn parse_recording(content: &str) -> Result<Vec<RecordedFrame>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("recording line {}", i + 1))
        })
        .collect()
}

pub fn load_recording(path: &Path) -> Result<Vec<RecordedFrame>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_recording(&content)
}

/// Parse `posture:secs` segments separated by commas. `absent` means an
/// empty room.
pub fn parse_script(script: &str, fps: f64) -> Result<Scenario> {
    let mut scenario = Scenario::new(fps);

    for part in script.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((name, secs)) = part.split_once(':') else {
            bail!("segment `{part}` is not `posture:secs`");
        };
        let secs: f64 = secs
            .trim()
            .parse()
            .with_context(|| format!("segment `{part}` has a bad duration"))?;
        if !(secs.is_finite() && secs >= 0.0) {
            bail!("segment `{part}` has a negative duration");
        }

        scenario = if name.trim().eq_ignore_ascii_case("absent") {
            scenario.absent(secs)
        } else {
            let posture: PostureLabel = name
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown posture `{name}`"))?;
            scenario.hold(posture, secs)
        };
    }
    Ok(scenario)
}
