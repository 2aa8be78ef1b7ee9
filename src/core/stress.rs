//! Stress detector: scores one message against triggers, behavior, and voice
//!
//! Score space is 0-100, banded into calm/mild/moderate/high/crisis.
//! Absence of data yields a calm default; nothing here returns an error.

use std::collections::HashSet;
use std::time::Instant;

use crate::{RAPID_FIRE_PER_MIN, STRESS_POINTS_BEHAVIORAL, STRESS_POINTS_VOICE_MAX};
use crate::core::triggers;
use crate::types::{
    BehavioralPattern, BehaviorWindow, Message, StressAnalysis, StressSignals, VoiceMetrics,
};

/// Token overlap above which a message counts as repetitive
const REPETITION_JACCARD: f64 = 0.6;

/// Fraction of uppercase letters above which a message counts as shouted
const CAPS_FRACTION: f64 = 0.7;

/// Minimum letters before the caps heuristic applies
const CAPS_MIN_LETTERS: usize = 4;

/// Stress detector
#[derive(Debug, Default)]
pub struct StressDetector {
    last_text: Option<String>,
}

impl StressDetector {
    /// Create new detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the behavioral pattern for a message and push it onto the window
    pub fn observe(&mut self, message: &Message, window: &mut BehaviorWindow) -> BehavioralPattern {
        let text = message.text.trim();

        let repetitive = self
            .last_text
            .as_deref()
            .map(|prev| token_jaccard(prev, text) >= REPETITION_JACCARD)
            .unwrap_or(false);

        let pattern = BehavioralPattern {
            frequency: window.messages_per_minute(),
            length: text.chars().count(),
            repetitive,
            all_caps: is_shouted(text),
            fragmented: is_fragmented(text),
            timestamp: message.timestamp,
            arrived: message.arrived.or_else(|| Some(Instant::now())),
        };

        self.last_text = Some(text.to_string());
        window.push(pattern.clone());
        pattern
    }

    /// Analyze a message in the context of the window and optional voice reading
    pub fn analyze(
        &self,
        message: &Message,
        window: &BehaviorWindow,
        voice: Option<&VoiceMetrics>,
    ) -> StressAnalysis {
        let text = message.text.trim();
        if text.is_empty() && window.is_empty() {
            return StressAnalysis::calm();
        }

        let matched = triggers::scan_triggers(text);
        let trigger_points: f64 = matched.iter().map(|t| t.points()).sum();

        let mut signals = StressSignals {
            trigger_points,
            ..StressSignals::zero()
        };

        // Behavioral contributions, each worth up to one behavioral unit
        let frequency = window.messages_per_minute();
        if frequency > RAPID_FIRE_PER_MIN {
            signals.frequency_points = STRESS_POINTS_BEHAVIORAL;
        }
        if window.latest().map(|p| p.repetitive).unwrap_or(false) {
            signals.repetition_points = STRESS_POINTS_BEHAVIORAL;
        }
        if window.latest().map(|p| p.all_caps).unwrap_or(false) {
            signals.caps_points = STRESS_POINTS_BEHAVIORAL;
        }
        if window.latest().map(|p| p.fragmented).unwrap_or(false) {
            signals.fragmentation_points = STRESS_POINTS_BEHAVIORAL;
        }

        // Voice prosody, scaled into its own budget
        if let Some(voice) = voice {
            signals.voice_points = voice.deviation() * STRESS_POINTS_VOICE_MAX;
        }

        StressAnalysis::from_signals(signals, matched)
    }

    /// Observe and analyze in one step (the usual per-message call)
    pub fn process(
        &mut self,
        message: &Message,
        window: &mut BehaviorWindow,
        voice: Option<&VoiceMetrics>,
    ) -> (BehavioralPattern, StressAnalysis) {
        let pattern = self.observe(message, window);
        let analysis = self.analyze(message, window, voice);
        (pattern, analysis)
    }

    /// Forget the previous message (new session)
    pub fn reset(&mut self) {
        self.last_text = None;
    }
}

/// Jaccard overlap of lowercase word sets
fn token_jaccard(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let set_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let set_b: HashSet<&str> = b_lower.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Mostly-uppercase heuristic
fn is_shouted(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() < CAPS_MIN_LETTERS {
        return false;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters.len() as f64 >= CAPS_FRACTION
}

/// More fragment segments than complete ones
fn is_fragmented(text: &str) -> bool {
    let segments: Vec<&str> = text
        .split(|c| matches!(c, '.' | '!' | '?' | '\n' | '…'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() < 2 {
        return false;
    }
    let fragments = segments
        .iter()
        .filter(|s| s.split_whitespace().count() < 4)
        .count();
    fragments * 2 > segments.len()
}

// =============================================================================
// TESTS
// =============================================================================
