//! Stress analysis types and signals

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::{
    STRESS_BAND_CALM, STRESS_BAND_MILD, STRESS_BAND_MODERATE, STRESS_BAND_HIGH,
    STRESS_POINTS_CRISIS, STRESS_POINTS_TRAUMA, STRESS_POINTS_DISSOCIATION,
    STRESS_POINTS_OVERWHELM, STRESS_POINTS_AGITATION,
};

/// Five-band stress estimate for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Calm,
    Mild,
    Moderate,
    High,
    Crisis,
}

impl StressLevel {
    /// Band a 0-100 score into a level
    pub fn from_score(score: f64) -> Self {
        if score < STRESS_BAND_CALM {
            StressLevel::Calm
        } else if score < STRESS_BAND_MILD {
            StressLevel::Mild
        } else if score < STRESS_BAND_MODERATE {
            StressLevel::Moderate
        } else if score < STRESS_BAND_HIGH {
            StressLevel::High
        } else {
            StressLevel::Crisis
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            StressLevel::Calm => "\x1b[32m",     // Green
            StressLevel::Mild => "\x1b[36m",     // Cyan
            StressLevel::Moderate => "\x1b[33m", // Yellow
            StressLevel::High => "\x1b[31m",     // Red
            StressLevel::Crisis => "\x1b[91m",   // Bright red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StressLevel::Calm => "calm",
            StressLevel::Mild => "mild",
            StressLevel::Moderate => "moderate",
            StressLevel::High => "high",
            StressLevel::Crisis => "crisis",
        };
        write!(f, "{}", name)
    }
}

/// Trigger pattern families that contribute to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerCategory {
    Crisis,
    Trauma,
    Dissociation,
    Overwhelm,
    Agitation,
}

impl TriggerCategory {
    /// Score contribution when this category matches
    pub fn points(&self) -> f64 {
        match self {
            TriggerCategory::Crisis => STRESS_POINTS_CRISIS,
            TriggerCategory::Trauma => STRESS_POINTS_TRAUMA,
            TriggerCategory::Dissociation => STRESS_POINTS_DISSOCIATION,
            TriggerCategory::Overwhelm => STRESS_POINTS_OVERWHELM,
            TriggerCategory::Agitation => STRESS_POINTS_AGITATION,
        }
    }
}

impl std::fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerCategory::Crisis => "crisis",
            TriggerCategory::Trauma => "trauma",
            TriggerCategory::Dissociation => "dissociation",
            TriggerCategory::Overwhelm => "overwhelm",
            TriggerCategory::Agitation => "agitation",
        };
        write!(f, "{}", name)
    }
}

/// What SAI should do next, given the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendedAction {
    Monitor,
    GentleCheckin,
    Intervene,
    CrisisProtocol,
}

impl RecommendedAction {
    /// Map a stress level to its default action
    pub fn for_level(level: StressLevel) -> Self {
        match level {
            StressLevel::Calm | StressLevel::Mild => RecommendedAction::Monitor,
            StressLevel::Moderate => RecommendedAction::GentleCheckin,
            StressLevel::High => RecommendedAction::Intervene,
            StressLevel::Crisis => RecommendedAction::CrisisProtocol,
        }
    }
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecommendedAction::Monitor => "monitor",
            RecommendedAction::GentleCheckin => "gentle-checkin",
            RecommendedAction::Intervene => "intervene",
            RecommendedAction::CrisisProtocol => "crisis-protocol",
        };
        write!(f, "{}", name)
    }
}

/// Raw contributions behind a stress score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressSignals {
    /// Points from trigger category matches
    pub trigger_points: f64,
    /// Points from rapid-fire message frequency
    pub frequency_points: f64,
    /// Points from repetitive content
    pub repetition_points: f64,
    /// Points from all-caps shouting
    pub caps_points: f64,
    /// Points from fragmented sentences
    pub fragmentation_points: f64,
    /// Points from voice prosody deviation
    pub voice_points: f64,
}

impl StressSignals {
    /// Create zero signals
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total raw points (pre-clamp)
    pub fn total(&self) -> f64 {
        self.trigger_points
            + self.frequency_points
            + self.repetition_points
            + self.caps_points
            + self.fragmentation_points
            + self.voice_points
    }
}

/// Stress analysis for one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressAnalysis {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Banded level
    pub level: StressLevel,
    /// Numeric score (0-100)
    pub score: f64,
    /// Trigger categories that matched
    pub triggers: Vec<TriggerCategory>,
    /// What to do next
    pub action: RecommendedAction,
    /// Contribution breakdown
    pub signals: StressSignals,
}

impl StressAnalysis {
    /// Build an analysis from raw signals, clamping and banding the score
    pub fn from_signals(signals: StressSignals, triggers: Vec<TriggerCategory>) -> Self {
        let score = signals.total().clamp(0.0, 100.0);
        let level = StressLevel::from_score(score);
        Self {
            timestamp: Utc::now(),
            level,
            score,
            triggers,
            action: RecommendedAction::for_level(level),
            signals,
        }
    }

    /// Neutral default for absent input
    pub fn calm() -> Self {
        Self::from_signals(StressSignals::zero(), Vec::new())
    }

    /// Did a crisis trigger fire?
    pub fn has_crisis_trigger(&self) -> bool {
        self.triggers.contains(&TriggerCategory::Crisis)
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "stress={:.0} | level={} | action={}",
            self.score, self.level, self.action
        )
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{}stress={:.0} | level={} | action={}{}",
            self.level.color_code(),
            self.score,
            self.level,
            self.action,
            StressLevel::color_reset()
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bands() {
        assert_eq!(StressLevel::from_score(0.0), StressLevel::Calm);
        assert_eq!(StressLevel::from_score(19.9), StressLevel::Calm);
        assert_eq!(StressLevel::from_score(20.0), StressLevel::Mild);
        assert_eq!(StressLevel::from_score(45.0), StressLevel::Moderate);
        assert_eq!(StressLevel::from_score(70.0), StressLevel::High);
        assert_eq!(StressLevel::from_score(80.0), StressLevel::Crisis);
        assert_eq!(StressLevel::from_score(100.0), StressLevel::Crisis);
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(RecommendedAction::for_level(StressLevel::Calm), RecommendedAction::Monitor);
        assert_eq!(RecommendedAction::for_level(StressLevel::Mild), RecommendedAction::Monitor);
        assert_eq!(RecommendedAction::for_level(StressLevel::Moderate), RecommendedAction::GentleCheckin);
        assert_eq!(RecommendedAction::for_level(StressLevel::High), RecommendedAction::Intervene);
        assert_eq!(RecommendedAction::for_level(StressLevel::Crisis), RecommendedAction::CrisisProtocol);
    }

    #[test]
    fn test_score_clamped() {
        let signals = StressSignals {
            trigger_points: 90.0,
            frequency_points: 30.0,
            ..Default::default()
        };
        let analysis = StressAnalysis::from_signals(signals, vec![TriggerCategory::Crisis]);
        assert_eq!(analysis.score, 100.0);
        assert_eq!(analysis.level, StressLevel::Crisis);
    }

    #[test]
    fn test_calm_default() {
        let analysis = StressAnalysis::calm();
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.level, StressLevel::Calm);
        assert_eq!(analysis.action, RecommendedAction::Monitor);
        assert!(analysis.triggers.is_empty());
    }

    #[test]
    fn test_action_wire_form() {
        let json = serde_json::to_string(&RecommendedAction::CrisisProtocol).unwrap();
        assert_eq!(json, "\"crisis-protocol\"");
        let json = serde_json::to_string(&RecommendedAction::GentleCheckin).unwrap();
        assert_eq!(json, "\"gentle-checkin\"");
    }
}
