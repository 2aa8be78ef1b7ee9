//! Reason codes for routing decisions and tracker transitions

use serde::{Deserialize, Serialize};

/// Why the router picked a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum RouteReason {
    // =========================================================================
    // P100: Overrides
    // =========================================================================
    /// High distress level forces the gentle path
    P101_DISTRESS_OVERRIDE,
    /// Crisis phrase in the message forces the gentle path
    P102_CRISIS_OVERRIDE,
    /// Explicit manual preference honored
    P103_MANUAL_PREFERENCE,

    // =========================================================================
    // P200: Scored selections
    // =========================================================================
    /// Gentle triggers outscored the other categories
    P201_GENTLE_TRIGGERS,
    /// Direct triggers outscored the other categories
    P202_DIRECT_TRIGGERS,
    /// Honest triggers outscored the other categories
    P203_HONEST_TRIGGERS,
    /// Tie between top categories, defaulted to honest
    P204_TIE_DEFAULT_HONEST,

    // =========================================================================
    // P300: Fallbacks
    // =========================================================================
    /// Nothing matched, neutral honest default
    P301_NEUTRAL_DEFAULT,
}

impl RouteReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::P101_DISTRESS_OVERRIDE => "P101_DISTRESS_OVERRIDE",
            Self::P102_CRISIS_OVERRIDE => "P102_CRISIS_OVERRIDE",
            Self::P103_MANUAL_PREFERENCE => "P103_MANUAL_PREFERENCE",
            Self::P201_GENTLE_TRIGGERS => "P201_GENTLE_TRIGGERS",
            Self::P202_DIRECT_TRIGGERS => "P202_DIRECT_TRIGGERS",
            Self::P203_HONEST_TRIGGERS => "P203_HONEST_TRIGGERS",
            Self::P204_TIE_DEFAULT_HONEST => "P204_TIE_DEFAULT_HONEST",
            Self::P301_NEUTRAL_DEFAULT => "P301_NEUTRAL_DEFAULT",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::P101_DISTRESS_OVERRIDE => "High distress, staying gentle",
            Self::P102_CRISIS_OVERRIDE => "Crisis language detected, staying gentle",
            Self::P103_MANUAL_PREFERENCE => "Using your chosen style",
            Self::P201_GENTLE_TRIGGERS => "Message asks for softness",
            Self::P202_DIRECT_TRIGGERS => "Message asks for directness",
            Self::P203_HONEST_TRIGGERS => "Message asks for honest reflection",
            Self::P204_TIE_DEFAULT_HONEST => "Mixed signals, defaulting to honest",
            Self::P301_NEUTRAL_DEFAULT => "No strong signal, defaulting to honest",
        }
    }

    /// Did an override (distress/crisis) pre-empt scoring?
    pub fn is_override(&self) -> bool {
        matches!(self, Self::P101_DISTRESS_OVERRIDE | Self::P102_CRISIS_OVERRIDE)
    }
}

impl std::fmt::Display for RouteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Why the tracker is at (or moved to) its current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum TrackerReason {
    // =========================================================================
    // T100: Steady states
    // =========================================================================
    /// Level is LOW, nothing elevated
    T101_STATE_LOW,
    /// Level is MEDIUM, watching
    T102_STATE_MEDIUM,
    /// Level is HIGH, safety behavior active
    T103_STATE_HIGH,

    // =========================================================================
    // T200: Escalations
    // =========================================================================
    /// Score crossed the medium threshold
    T201_ESCALATE_TO_MEDIUM,
    /// Score crossed the high threshold
    T202_ESCALATE_TO_HIGH,
    /// Crisis trigger escalated straight to high
    T203_CRISIS_ESCALATION,

    // =========================================================================
    // T300: Recovery
    // =========================================================================
    /// Calm accumulating toward de-escalation
    T301_CALM_ACCUMULATING,
    /// Calm hold reached, stepped down one level
    T302_DEESCALATED,
    /// Elevated score reset the calm hold
    T303_CALM_RESET,
}

impl TrackerReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::T101_STATE_LOW => "T101_STATE_LOW",
            Self::T102_STATE_MEDIUM => "T102_STATE_MEDIUM",
            Self::T103_STATE_HIGH => "T103_STATE_HIGH",
            Self::T201_ESCALATE_TO_MEDIUM => "T201_ESCALATE_TO_MEDIUM",
            Self::T202_ESCALATE_TO_HIGH => "T202_ESCALATE_TO_HIGH",
            Self::T203_CRISIS_ESCALATION => "T203_CRISIS_ESCALATION",
            Self::T301_CALM_ACCUMULATING => "T301_CALM_ACCUMULATING",
            Self::T302_DEESCALATED => "T302_DEESCALATED",
            Self::T303_CALM_RESET => "T303_CALM_RESET",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::T101_STATE_LOW => "Settled",
            Self::T102_STATE_MEDIUM => "Somewhat elevated",
            Self::T103_STATE_HIGH => "Highly elevated",
            Self::T201_ESCALATE_TO_MEDIUM => "Stress rising",
            Self::T202_ESCALATE_TO_HIGH => "Stress high",
            Self::T203_CRISIS_ESCALATION => "Crisis signal, escalating",
            Self::T301_CALM_ACCUMULATING => "Settling down",
            Self::T302_DEESCALATED => "Stepped down a level",
            Self::T303_CALM_RESET => "Calm interrupted",
        }
    }
}

impl std::fmt::Display for TrackerReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
