//! Error types for the monitoring pipeline

use thiserror::Error;

/// Core Guardian errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardianError {
    // Anchoring errors (fatal to starting a session)
    #[error("Invalid start time {0:?}: expected HH:MM")]
    InvalidStartTime(String),

    #[error("Invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid speed factor {0}: must be a finite number >= 1")]
    InvalidSpeedFactor(f64),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Guardian operations
pub type GuardianResult<T> = Result<T, GuardianError>;
