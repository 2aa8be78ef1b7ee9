//! Response guidance types
//!
//! The engine does not generate reply text itself; it hands the caller
//! a guidance record that shapes tone, pacing, and prompts.

use serde::{Deserialize, Serialize};

/// Tone bucket for the rendered response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Warm, validating, unhurried
    Soothing,
    /// Plain, present, reflective
    Steady,
    /// Brisk, concrete, action-first
    Brisk,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tone::Soothing => "soothing",
            Tone::Steady => "steady",
            Tone::Brisk => "brisk",
        };
        write!(f, "{}", name)
    }
}

/// Accessibility/communication preferences carried per session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunicationProfile {
    /// Short words, no idiom, one idea per sentence
    #[serde(default)]
    pub plain_language: bool,
    /// Longer pauses between response chunks
    #[serde(default)]
    pub reduced_pace: bool,
    /// Prefer structure/lists over prose
    #[serde(default)]
    pub visual_first: bool,
    /// Avoid exclamations and intensity spikes
    #[serde(default)]
    pub sensory_sensitive: bool,
}

impl CommunicationProfile {
    /// Any adjustment active?
    pub fn is_adjusted(&self) -> bool {
        self.plain_language || self.reduced_pace || self.visual_first || self.sensory_sensitive
    }
}

/// Shaping record for one response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseGuidance {
    /// Tone bucket
    pub tone: Tone,
    /// Delay between response chunks (milliseconds)
    pub pacing_ms: u64,
    /// Budget per sentence (words)
    pub max_sentence_words: usize,
    /// Prefer structured/list output
    pub prefer_structure: bool,
    /// Check-in line to weave in, when one is due
    pub check_in_prompt: Option<String>,
    /// Grounding line for elevated states
    pub grounding_prompt: Option<String>,
}
