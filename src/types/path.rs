//! Response path definitions and router output

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::RouteReason;

/// The three communication paths SAI can respond on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePath {
    /// Soft pacing, validation first, no pushing
    Gentle,
    /// Balanced reflection, names what it sees
    Honest,
    /// Concrete steps, minimal padding
    Direct,
}

impl ResponsePath {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            ResponsePath::Gentle => "\x1b[36m", // Cyan
            ResponsePath::Honest => "\x1b[33m", // Yellow
            ResponsePath::Direct => "\x1b[35m", // Magenta
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for path
    pub fn emoji(&self) -> &'static str {
        match self {
            ResponsePath::Gentle => "🌿",
            ResponsePath::Honest => "🪞",
            ResponsePath::Direct => "🎯",
        }
    }

    /// Parse from the lowercase wire form
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gentle" => Some(ResponsePath::Gentle),
            "honest" => Some(ResponsePath::Honest),
            "direct" => Some(ResponsePath::Direct),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponsePath::Gentle => "gentle",
            ResponsePath::Honest => "honest",
            ResponsePath::Direct => "direct",
        };
        write!(f, "{}", name)
    }
}

/// Per-category score breakdown from the router
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSignals {
    /// Gentle trigger score (crisis/overwhelm/dissociation/trauma, weight 3.0 each)
    pub gentle: f64,
    /// Direct trigger score (weight 2.0 each)
    pub direct: f64,
    /// Honest trigger score (weight 2.0 each)
    pub honest: f64,
    /// Sentence fragments counted in the message
    pub fragments: usize,
    /// Message length in chars (after trim)
    pub chars: usize,
    /// Message contained a question mark
    pub question: bool,
}

impl PathSignals {
    /// Create zero signals
    pub fn zero() -> Self {
        Self::default()
    }

    /// Score for a given path category
    pub fn score_for(&self, path: ResponsePath) -> f64 {
        match path {
            ResponsePath::Gentle => self.gentle,
            ResponsePath::Honest => self.honest,
            ResponsePath::Direct => self.direct,
        }
    }
}

/// Router decision for one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Chosen path
    pub path: ResponsePath,
    /// Why this path was chosen
    pub reason: RouteReason,
    /// Confidence in the choice (0.0-1.0)
    pub confidence: f64,
    /// Score breakdown behind the choice
    pub signals: PathSignals,
}

impl PathConfig {
    /// Create new config
    pub fn new(path: ResponsePath, reason: RouteReason, confidence: f64, signals: PathSignals) -> Self {
        Self {
            timestamp: Utc::now(),
            path,
            reason,
            confidence,
            signals,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.path.color_code();
        let reset = ResponsePath::color_reset();
        let emoji = self.path.emoji();

        format!(
            "{}{} path={} | confidence={:.2} | {}{}",
            color,
            emoji,
            self.path,
            self.confidence,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "path={} | confidence={:.2} | reason={}",
            self.path,
            self.confidence,
            self.reason.code()
        )
    }
}
