//! Runtime configuration
//!
//! Every section has defaults, so a TOML file only needs the keys it
//! overrides:
//!
//! ```toml
//! [smoother]
//! alpha = 0.5
//!
//! [sitting]
//! threshold_minutes = 30.0
//! ```

use std::fs;
use std::path::Path;

use guardian_core::{GuardianError, GuardianResult};
use guardian_pose::{ClassifierThresholds, SmootherConfig};
use serde::{Deserialize, Serialize};

use crate::{LoggingConfig, SittingConfig, StabilizerConfig, MAX_NOTIFICATION_DISPLAY_SECS};

/// Session runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub smoother: SmootherConfig,
    pub classifier: ClassifierThresholds,
    pub stabilizer: StabilizerConfig,
    pub sitting: SittingConfig,
    pub logging: LoggingConfig,
    /// Clip length in timer mode (no video attached), seconds
    pub timer_duration_secs: u64,
    /// Maximum queued outputs before the oldest are dropped
    pub max_outputs: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            smoother: SmootherConfig::default(),
            classifier: ClassifierThresholds::default(),
            stabilizer: StabilizerConfig::default(),
            sitting: SittingConfig::default(),
            logging: LoggingConfig::default(),
            timer_duration_secs: guardian_time::DEFAULT_TIMER_DURATION.as_secs(),
            max_outputs: 1000,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> GuardianResult<Self> {
        let config: RuntimeConfig =
            toml::from_str(content).map_err(|e| GuardianError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> GuardianResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| GuardianError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> GuardianResult<String> {
        toml::to_string_pretty(self).map_err(|e| GuardianError::InvalidConfig(e.to_string()))
    }

    /// Configuration with smoothing disabled (every frame taken verbatim)
    pub fn unsmoothed() -> Self {
        RuntimeConfig {
            smoother: SmootherConfig { alpha: 1.0 },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> GuardianResult<()> {
        let alpha = self.smoother.alpha;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(GuardianError::InvalidConfig(format!(
                "smoother.alpha must be within [0, 1], got {alpha}"
            )));
        }

        let s = &self.stabilizer;
        if s.window == 0 || s.window > s.capacity {
            return Err(GuardianError::InvalidConfig(format!(
                "stabilizer.window must be within [1, capacity={}], got {}",
                s.capacity, s.window
            )));
        }

        let c = &self.classifier;
        if c.laying_torso_max > c.upright_torso_min {
            return Err(GuardianError::InvalidConfig(
                "classifier.laying_torso_max exceeds upright_torso_min".into(),
            ));
        }
        if c.straight_leg_max > c.walking_leg_max {
            return Err(GuardianError::InvalidConfig(
                "classifier.straight_leg_max exceeds walking_leg_max".into(),
            ));
        }

        if !(self.sitting.threshold_minutes.is_finite() && self.sitting.threshold_minutes > 0.0) {
            return Err(GuardianError::InvalidConfig(
                "sitting.threshold_minutes must be positive".into(),
            ));
        }

        let display = self.sitting.notification_display_secs;
        if display > MAX_NOTIFICATION_DISPLAY_SECS {
            return Err(GuardianError::InvalidConfig(format!(
                "sitting.notification_display_secs must be at most \
                 {MAX_NOTIFICATION_DISPLAY_SECS}, got {display}"
            )));
        }

        if self.max_outputs == 0 {
            return Err(GuardianError::InvalidConfig("max_outputs must be non-zero".into()));
        }
        Ok(())
    }
}
