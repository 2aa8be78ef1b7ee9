//! Emotional state tracker: hysteresis over stress scores
//!
//! Transitions:
//! - LOW → MEDIUM: score ≥ 35
//! - any → HIGH: score ≥ 60, or a crisis trigger (immediate)
//! - step down one level: score < 25 sustained for 30 s; any elevated
//!   score resets the hold
//!
//! Escalation is instant, de-escalation is slow. Check-ins fire once per
//! elevation after the level has been stable past the check-in hold.

use std::time::Instant;

use crate::{CALM_HOLD_MS, CALM_SCORE, CHECKIN_HOLD_MS, ESCALATE_HIGH_SCORE, ESCALATE_MEDIUM_SCORE};
use crate::types::{CheckInKind, DistressLevel, StressAnalysis, TrackerOutput, TrackerReason};

/// Emotional state tracker, one per session
#[derive(Debug)]
pub struct EmotionalStateTracker {
    /// Current level
    level: DistressLevel,
    /// When current level began
    level_since: Instant,
    /// Last stress score seen
    last_score: f64,
    /// When sustained-calm conditions started
    calm_since: Option<Instant>,
    /// Check-in already fired for this elevation?
    check_in_sent: bool,
    /// Sustained calm required to step down (milliseconds)
    calm_hold_ms: u64,
    /// Stability required before a check-in fires (milliseconds)
    checkin_hold_ms: u64,
    /// Number of updates
    update_count: u64,
}

impl Default for EmotionalStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionalStateTracker {
    /// Create new tracker at LOW with default holds
    pub fn new() -> Self {
        Self::starting_at(DistressLevel::Low)
    }

    /// Create tracker seeded from a persisted level
    pub fn starting_at(level: DistressLevel) -> Self {
        Self {
            level,
            level_since: Instant::now(),
            last_score: 0.0,
            calm_since: None,
            check_in_sent: false,
            calm_hold_ms: CALM_HOLD_MS,
            checkin_hold_ms: CHECKIN_HOLD_MS,
            update_count: 0,
        }
    }

    /// Create tracker with custom hold durations
    pub fn with_holds(calm_hold_ms: u64, checkin_hold_ms: u64) -> Self {
        Self {
            calm_hold_ms,
            checkin_hold_ms,
            ..Self::new()
        }
    }

    /// Update with a stress analysis, return output with level and reason
    pub fn update(&mut self, analysis: &StressAnalysis) -> TrackerOutput {
        let now = Instant::now();
        let score = analysis.score;
        self.last_score = score;
        self.update_count += 1;

        // Track the calm hold
        if score < CALM_SCORE {
            if self.calm_since.is_none() {
                self.calm_since = Some(now);
            }
        } else {
            self.calm_since = None;
        }

        let calm_ms = self.calm_ms_at(now);
        let (new_level, reason) =
            self.compute_transition(score, analysis.has_crisis_trigger(), calm_ms);

        if new_level != self.level {
            let escalated = new_level > self.level;
            self.level = new_level;
            self.level_since = now;
            if escalated || new_level == DistressLevel::Low {
                // Fresh elevation re-arms the check-in; full recovery clears it
                self.check_in_sent = false;
            }
            // Calm accumulated buys one step only
            if reason == TrackerReason::T302_DEESCALATED {
                self.calm_since = Some(now);
            }
        }

        let check_in = self.arm_check_in(now);
        TrackerOutput::new(self.level, score, self.calm_ms_at(now), reason, check_in)
    }

    /// Compute level transition from score, crisis flag, and calm hold
    fn compute_transition(
        &self,
        score: f64,
        crisis: bool,
        calm_ms: u64,
    ) -> (DistressLevel, TrackerReason) {
        // Crisis triggers jump straight to HIGH from anywhere
        if crisis && self.level != DistressLevel::High {
            return (DistressLevel::High, TrackerReason::T203_CRISIS_ESCALATION);
        }

        match self.level {
            DistressLevel::Low => {
                if score >= ESCALATE_HIGH_SCORE {
                    (DistressLevel::High, TrackerReason::T202_ESCALATE_TO_HIGH)
                } else if score >= ESCALATE_MEDIUM_SCORE {
                    (DistressLevel::Medium, TrackerReason::T201_ESCALATE_TO_MEDIUM)
                } else {
                    (DistressLevel::Low, TrackerReason::T101_STATE_LOW)
                }
            }

            DistressLevel::Medium => {
                if score >= ESCALATE_HIGH_SCORE {
                    (DistressLevel::High, TrackerReason::T202_ESCALATE_TO_HIGH)
                } else if calm_ms >= self.calm_hold_ms {
                    (DistressLevel::Low, TrackerReason::T302_DEESCALATED)
                } else if score < CALM_SCORE {
                    (DistressLevel::Medium, TrackerReason::T301_CALM_ACCUMULATING)
                } else {
                    (DistressLevel::Medium, TrackerReason::T102_STATE_MEDIUM)
                }
            }

            DistressLevel::High => {
                if calm_ms >= self.calm_hold_ms {
                    (DistressLevel::Medium, TrackerReason::T302_DEESCALATED)
                } else if score < CALM_SCORE {
                    (DistressLevel::High, TrackerReason::T301_CALM_ACCUMULATING)
                } else {
                    (DistressLevel::High, TrackerReason::T103_STATE_HIGH)
                }
            }
        }
    }

    /// Fire at most one check-in per elevation, once stable past the hold
    fn arm_check_in(&mut self, now: Instant) -> Option<CheckInKind> {
        if self.level == DistressLevel::Low || self.check_in_sent {
            return None;
        }
        let stable_ms = now.duration_since(self.level_since).as_millis() as u64;
        if stable_ms < self.checkin_hold_ms {
            return None;
        }
        self.check_in_sent = true;
        match self.level {
            DistressLevel::Medium => Some(CheckInKind::Gentle),
            DistressLevel::High => Some(CheckInKind::Intervention),
            DistressLevel::Low => None,
        }
    }

    fn calm_ms_at(&self, now: Instant) -> u64 {
        self.calm_since
            .map(|s| now.duration_since(s).as_millis() as u64)
            .unwrap_or(0)
    }

    /// Get current level
    pub fn level(&self) -> DistressLevel {
        self.level
    }

    /// Get last score
    pub fn last_score(&self) -> f64 {
        self.last_score
    }

    /// Get calm hold duration in milliseconds
    pub fn calm_ms(&self) -> u64 {
        self.calm_ms_at(Instant::now())
    }

    /// Get update count
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Get current output without updating
    pub fn current_output(&self) -> TrackerOutput {
        let reason = match self.level {
            DistressLevel::Low => TrackerReason::T101_STATE_LOW,
            DistressLevel::Medium => TrackerReason::T102_STATE_MEDIUM,
            DistressLevel::High => TrackerReason::T103_STATE_HIGH,
        };
        TrackerOutput::new(self.level, self.last_score, self.calm_ms(), reason, None)
    }

    /// Reset tracker to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================
