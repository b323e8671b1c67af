//! Posture Stabilizer - debounces raw classifications
//!
//! A raw label must win `window` consecutive frames before it replaces the
//! confirmed posture. The single exception is a fall: a `laying` frame
//! observed while the confirmed posture is upright is promoted to
//! `falling` and confirmed on that same frame.

use std::collections::VecDeque;

use guardian_core::PostureLabel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stabilizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Labels retained in history
    pub capacity: usize,
    /// Consecutive agreeing labels needed to confirm
    pub window: usize,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        StabilizerConfig {
            capacity: 5,
            window: 3,
        }
    }
}

/// Bounded FIFO of recent candidate labels
#[derive(Debug, Clone)]
pub struct PostureHistory {
    entries: VecDeque<PostureLabel>,
    capacity: usize,
}

impl PostureHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        PostureHistory {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a label, evicting the oldest when full
    pub fn push(&mut self, label: PostureLabel) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(label);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<PostureLabel> {
        self.entries.back().copied()
    }

    /// Do the newest `n` entries all equal `label`? False if fewer than `n`.
    pub fn tail_agrees(&self, n: usize, label: PostureLabel) -> bool {
        n > 0 && self.entries.len() >= n && self.entries.iter().rev().take(n).all(|&l| l == label)
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = PostureLabel> + '_ {
        self.entries.iter().copied()
    }
}

/// A confirmed posture change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PostureLabel,
    pub to: PostureLabel,
}

/// Result of feeding one raw label through the stabilizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub raw: PostureLabel,
    /// Raw label after fall promotion
    pub candidate: PostureLabel,
    pub stable: bool,
    pub transition: Option<Transition>,
}

/// Debouncer holding the last confirmed posture
#[derive(Debug, Clone)]
pub struct PostureStabilizer {
    history: PostureHistory,
    window: usize,
    confirmed: PostureLabel,
}

impl PostureStabilizer {
    /// Posture assumed before any frame has been confirmed
    pub const INITIAL: PostureLabel = PostureLabel::Standing;

    pub fn new(config: StabilizerConfig) -> Self {
        let history = PostureHistory::new(config.capacity);
        let window = config.window.clamp(1, history.capacity());
        PostureStabilizer {
            history,
            window,
            confirmed: Self::INITIAL,
        }
    }

    pub fn confirmed(&self) -> PostureLabel {
        self.confirmed
    }

    pub fn history(&self) -> &PostureHistory {
        &self.history
    }

    /// Feed one raw classification
    pub fn observe(&mut self, raw: PostureLabel) -> Observation {
        let candidate = if raw == PostureLabel::Laying && self.confirmed.is_upright() {
            PostureLabel::Falling
        } else {
            raw
        };

        self.history.push(candidate);

        let stable = candidate == PostureLabel::Falling
            || self.history.tail_agrees(self.window, candidate);

        let transition = if stable && candidate != self.confirmed {
            let from = std::mem::replace(&mut self.confirmed, candidate);
            Some(Transition {
                from,
                to: candidate,
            })
        } else {
            None
        };

        debug!(
            raw = raw.as_str(),
            candidate = candidate.as_str(),
            stable,
            confirmed = self.confirmed.as_str(),
            "posture observed"
        );

        Observation {
            raw,
            candidate,
            stable,
            transition,
        }
    }
}

impl Default for PostureStabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}
