//! Distress level and tracker output

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::TrackerReason;

/// Coarse emotional-state estimate used to gate safety behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistressLevel {
    Low,
    Medium,
    High,
}

impl DistressLevel {
    /// One level down (Low stays Low)
    pub fn step_down(&self) -> Self {
        match self {
            DistressLevel::High => DistressLevel::Medium,
            DistressLevel::Medium => DistressLevel::Low,
            DistressLevel::Low => DistressLevel::Low,
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            DistressLevel::Low => "\x1b[32m",    // Green
            DistressLevel::Medium => "\x1b[33m", // Yellow
            DistressLevel::High => "\x1b[31m",   // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for level
    pub fn emoji(&self) -> &'static str {
        match self {
            DistressLevel::Low => "🟢",
            DistressLevel::Medium => "🟡",
            DistressLevel::High => "🔴",
        }
    }
}

impl std::fmt::Display for DistressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DistressLevel::Low => "low",
            DistressLevel::Medium => "medium",
            DistressLevel::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// Kind of self-triggered check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInKind {
    /// Soft "still with you" nudge at medium distress
    Gentle,
    /// Active intervention ping at high distress
    Intervention,
}

impl std::fmt::Display for CheckInKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckInKind::Gentle => "gentle",
            CheckInKind::Intervention => "intervention",
        };
        write!(f, "{}", name)
    }
}

/// Tracker output for one update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Current distress level
    pub level: DistressLevel,
    /// Stress score that produced this update
    pub score: f64,
    /// How long the calm hold has accumulated (milliseconds)
    pub calm_ms: u64,
    /// Reason for current level
    pub reason: TrackerReason,
    /// Check-in fired by this update, if any
    pub check_in: Option<CheckInKind>,
}

impl TrackerOutput {
    /// Create new output
    pub fn new(
        level: DistressLevel,
        score: f64,
        calm_ms: u64,
        reason: TrackerReason,
        check_in: Option<CheckInKind>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            score,
            calm_ms,
            reason,
            check_in,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.level.color_code();
        let reset = DistressLevel::color_reset();
        let emoji = self.level.emoji();

        format!(
            "{}{} distress={} | score={:.0} | calm={:.1}s | {}{}",
            color,
            emoji,
            self.level,
            self.score,
            self.calm_ms as f64 / 1000.0,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "distress={} | score={:.0} | calm={:.1}s | reason={}",
            self.level,
            self.score,
            self.calm_ms as f64 / 1000.0,
            self.reason.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_down() {
        assert_eq!(DistressLevel::High.step_down(), DistressLevel::Medium);
        assert_eq!(DistressLevel::Medium.step_down(), DistressLevel::Low);
        assert_eq!(DistressLevel::Low.step_down(), DistressLevel::Low);
    }

    #[test]
    fn test_ordering() {
        assert!(DistressLevel::Low < DistressLevel::Medium);
        assert!(DistressLevel::Medium < DistressLevel::High);
    }

    #[test]
    fn test_wire_form() {
        let json = serde_json::to_string(&DistressLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
