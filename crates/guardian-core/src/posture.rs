//! Posture vocabulary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Posture label
///
/// `Falling` is never produced by geometry alone: it is derived when a
/// laying frame directly follows a confirmed upright state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureLabel {
    Standing,
    Walking,
    Sitting,
    Laying,
    Falling,
}

impl PostureLabel {
    /// All labels in order
    pub fn all() -> &'static [PostureLabel] {
        &[
            PostureLabel::Standing,
            PostureLabel::Walking,
            PostureLabel::Sitting,
            PostureLabel::Laying,
            PostureLabel::Falling,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostureLabel::Standing => "standing",
            PostureLabel::Walking => "walking",
            PostureLabel::Sitting => "sitting",
            PostureLabel::Laying => "laying",
            PostureLabel::Falling => "falling",
        }
    }

    /// Standing or walking
    pub fn is_upright(&self) -> bool {
        matches!(self, PostureLabel::Standing | PostureLabel::Walking)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, PostureLabel::Falling)
    }
}

impl fmt::Display for PostureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostureLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostureLabel::all()
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown posture label: {s}"))
    }
}
