//! Adaptive response guidance
//!
//! Turns a routing decision plus the current stress picture into concrete
//! shaping: tone, pacing, sentence budget, and the prompt lines to weave
//! in. Template choice is rotated by message count so repeated check-ins
//! do not read identically; no randomness, same inputs give same output.

use crate::types::{
    CheckInKind, CommunicationProfile, PathConfig, ResponseGuidance, ResponsePath,
    StressAnalysis, StressLevel, Tone,
};

/// Base pacing per path (milliseconds between response chunks)
const PACING_GENTLE_MS: u64 = 1800;
const PACING_HONEST_MS: u64 = 1200;
const PACING_DIRECT_MS: u64 = 600;

/// Extra pacing at elevated stress
const PACING_ELEVATED_BONUS_MS: u64 = 600;

/// Sentence budgets per path (words)
const SENTENCE_BUDGET_GENTLE: usize = 12;
const SENTENCE_BUDGET_HONEST: usize = 18;
const SENTENCE_BUDGET_DIRECT: usize = 14;

/// Reduced budget when plain language is requested
const SENTENCE_BUDGET_PLAIN: usize = 9;

/// Gentle check-in lines, rotated
const CHECKINS_GENTLE: &[&str] = &[
    "Still here with you. No rush.",
    "We can slow down whenever you want.",
    "Just checking in. How is this landing?",
];

/// Intervention check-in lines, rotated
const CHECKINS_INTERVENTION: &[&str] = &[
    "I'm noticing a lot of weight in what you're sharing. Can we pause together for a moment?",
    "Before we go on, let's take one slow breath. I'm right here.",
    "This sounds really heavy. Would it help to ground for a minute?",
];

/// Grounding lines for elevated states, rotated
const GROUNDING_LINES: &[&str] = &[
    "Feel your feet on the floor for a second.",
    "Name one thing you can see right now.",
    "Try one slow breath out, longer than the breath in.",
];

/// Guidance builder
#[derive(Debug, Default)]
pub struct GuidanceBuilder;

impl GuidanceBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self
    }

    /// Build shaping guidance for one response
    pub fn guidance(
        &self,
        config: &PathConfig,
        stress: &StressAnalysis,
        profile: &CommunicationProfile,
        check_in: Option<CheckInKind>,
        message_count: u64,
    ) -> ResponseGuidance {
        let tone = self.tone(config.path, stress.level, profile);
        let pacing_ms = self.pacing(config.path, stress.level, profile);
        let max_sentence_words = self.sentence_budget(config.path, profile);

        let check_in_prompt = check_in.map(|kind| {
            let bank = match kind {
                CheckInKind::Gentle => CHECKINS_GENTLE,
                CheckInKind::Intervention => CHECKINS_INTERVENTION,
            };
            rotate(bank, message_count).to_string()
        });

        let grounding_prompt = if stress.level >= StressLevel::High {
            Some(rotate(GROUNDING_LINES, message_count).to_string())
        } else {
            None
        };

        ResponseGuidance {
            tone,
            pacing_ms,
            max_sentence_words,
            prefer_structure: profile.visual_first || config.path == ResponsePath::Direct,
            check_in_prompt,
            grounding_prompt,
        }
    }

    /// Tone follows the path; sensory sensitivity and high stress soften it
    fn tone(&self, path: ResponsePath, level: StressLevel, profile: &CommunicationProfile) -> Tone {
        if level >= StressLevel::High || profile.sensory_sensitive {
            return Tone::Soothing;
        }
        match path {
            ResponsePath::Gentle => Tone::Soothing,
            ResponsePath::Honest => Tone::Steady,
            ResponsePath::Direct => Tone::Brisk,
        }
    }

    /// Pacing follows the path, slows under stress and reduced-pace profiles
    fn pacing(&self, path: ResponsePath, level: StressLevel, profile: &CommunicationProfile) -> u64 {
        let mut ms = match path {
            ResponsePath::Gentle => PACING_GENTLE_MS,
            ResponsePath::Honest => PACING_HONEST_MS,
            ResponsePath::Direct => PACING_DIRECT_MS,
        };
        if level >= StressLevel::Moderate {
            ms += PACING_ELEVATED_BONUS_MS;
        }
        if profile.reduced_pace {
            ms *= 2;
        }
        ms
    }

    /// Words per sentence; plain language tightens every path
    fn sentence_budget(&self, path: ResponsePath, profile: &CommunicationProfile) -> usize {
        if profile.plain_language {
            return SENTENCE_BUDGET_PLAIN;
        }
        match path {
            ResponsePath::Gentle => SENTENCE_BUDGET_GENTLE,
            ResponsePath::Honest => SENTENCE_BUDGET_HONEST,
            ResponsePath::Direct => SENTENCE_BUDGET_DIRECT,
        }
    }
}

/// Deterministic rotation through a template bank
fn rotate(bank: &[&'static str], count: u64) -> &'static str {
    bank[(count as usize) % bank.len()]
}

// =============================================================================
// TESTS
// =============================================================================
