//! SAI companion engine
//!
//! Pipeline: message → StressDetector → EmotionalStateTracker → PathRouter → guidance

pub mod core;
pub mod types;

// =============================================================================
// PATH ROUTER WEIGHTS
// =============================================================================

/// Weight per matched gentle trigger family (crisis/overwhelm/dissociation/trauma)
pub const PATH_WEIGHT_GENTLE: f64 = 3.0;

/// Weight per matched direct trigger family (requests for directness/action)
pub const PATH_WEIGHT_DIRECT: f64 = 2.0;

/// Weight per matched honest trigger family (decision-support language)
pub const PATH_WEIGHT_HONEST: f64 = 2.0;

/// Secondary heuristic bonus (short message / question mark / fragmentation)
pub const PATH_BONUS_SECONDARY: f64 = 0.5;

/// Message shorter than this many chars counts as "short" (direct bonus)
pub const SHORT_MESSAGE_CHARS: usize = 20;

/// More than this many sentence fragments adds the gentle bonus
pub const FRAGMENT_BONUS_THRESHOLD: usize = 3;

/// Confidence formula: min(cap, base + score * slope)
pub const PATH_CONFIDENCE_BASE: f64 = 0.5;
pub const PATH_CONFIDENCE_SLOPE: f64 = 0.1;
pub const PATH_CONFIDENCE_CAP: f64 = 0.95;

/// Confidence when nothing matched (neutral honest default)
pub const PATH_CONFIDENCE_NEUTRAL: f64 = 0.6;

/// Confidence when high distress forces the gentle path
pub const PATH_CONFIDENCE_DISTRESS: f64 = 0.95;

/// Confidence for an explicit manual preference
pub const PATH_CONFIDENCE_MANUAL: f64 = 1.0;

// =============================================================================
// STRESS SCORING - trigger and behavioral contributions (score space 0-100)
// =============================================================================

/// Contribution per trigger category
pub const STRESS_POINTS_CRISIS: f64 = 40.0;
pub const STRESS_POINTS_TRAUMA: f64 = 25.0;
pub const STRESS_POINTS_DISSOCIATION: f64 = 20.0;
pub const STRESS_POINTS_OVERWHELM: f64 = 15.0;
pub const STRESS_POINTS_AGITATION: f64 = 10.0;

/// Contribution per behavioral signal (rapid-fire, repetition, caps, fragmentation)
pub const STRESS_POINTS_BEHAVIORAL: f64 = 10.0;

/// Messages per minute above which input counts as rapid-fire
pub const RAPID_FIRE_PER_MIN: f64 = 6.0;

/// Maximum contribution of voice prosody deviation
pub const STRESS_POINTS_VOICE_MAX: f64 = 15.0;

// =============================================================================
// STRESS LEVEL BANDS (upper bounds, score 0-100)
// =============================================================================

pub const STRESS_BAND_CALM: f64 = 20.0;
pub const STRESS_BAND_MILD: f64 = 40.0;
pub const STRESS_BAND_MODERATE: f64 = 60.0;
pub const STRESS_BAND_HIGH: f64 = 80.0;

// =============================================================================
// EMOTIONAL STATE TRACKER
// =============================================================================

/// Score at which Low escalates to Medium
pub const ESCALATE_MEDIUM_SCORE: f64 = 35.0;

/// Score at which any level escalates to High
pub const ESCALATE_HIGH_SCORE: f64 = 60.0;

/// Scores below this count toward the sustained-calm hold
pub const CALM_SCORE: f64 = 25.0;

/// Sustained calm required before de-escalating one level (milliseconds)
pub const CALM_HOLD_MS: u64 = 30_000;

/// Elevated level must be stable this long before a check-in fires (milliseconds)
pub const CHECKIN_HOLD_MS: u64 = 20_000;

/// Behavioral sliding window size (messages)
pub const BEHAVIOR_WINDOW_LEN: usize = 20;

/// Persisted state older than this is discarded on load (seconds)
pub const STATE_STALE_SECS: i64 = 12 * 60 * 60;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
