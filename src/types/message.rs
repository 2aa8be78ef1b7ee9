//! Message model and behavioral sliding window
//!
//! One BehavioralPattern per message, retained as a bounded window
//! (last 20) so the stress detector can see short-term trends.

use std::collections::VecDeque;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::BEHAVIOR_WINDOW_LEN;

/// A single user utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Raw text as typed/transcribed
    pub text: String,
    /// Wall-clock arrival time
    pub timestamp: DateTime<Utc>,
    /// Monotonic arrival time (not serialized)
    #[serde(skip)]
    pub arrived: Option<Instant>,
}

impl Message {
    /// Create a new message stamped now
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
            arrived: Some(Instant::now()),
        }
    }

    /// Word count of the trimmed text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Per-message behavioral signal derived against the window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehavioralPattern {
    /// Messages per minute over the window at arrival time
    pub frequency: f64,
    /// Character length (after trim)
    pub length: usize,
    /// High token overlap with the previous message
    pub repetitive: bool,
    /// Message is shouted (mostly uppercase letters)
    pub all_caps: bool,
    /// Message is mostly sentence fragments
    pub fragmented: bool,
    /// Wall-clock time of the underlying message
    pub timestamp: DateTime<Utc>,
    /// Monotonic arrival time (not serialized)
    #[serde(skip)]
    pub arrived: Option<Instant>,
}

impl BehavioralPattern {
    /// Age in milliseconds
    pub fn age_ms(&self) -> u64 {
        self.arrived
            .map(|t| Instant::now().duration_since(t).as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Bounded sliding window of recent behavioral patterns
#[derive(Debug)]
pub struct BehaviorWindow {
    patterns: VecDeque<BehavioralPattern>,
    capacity: usize,
}

impl Default for BehaviorWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorWindow {
    /// Create window with default capacity (20)
    pub fn new() -> Self {
        Self::with_capacity(BEHAVIOR_WINDOW_LEN)
    }

    /// Create window with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            patterns: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Add a pattern, dropping the oldest past capacity
    pub fn push(&mut self, pattern: BehavioralPattern) {
        self.patterns.push_back(pattern);
        while self.patterns.len() > self.capacity {
            self.patterns.pop_front();
        }
    }

    /// Get all patterns (oldest first)
    pub fn patterns(&self) -> impl Iterator<Item = &BehavioralPattern> {
        self.patterns.iter()
    }

    /// Most recent pattern
    pub fn latest(&self) -> Option<&BehavioralPattern> {
        self.patterns.back()
    }

    /// Get pattern count
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Messages per minute across the window's monotonic span.
    /// Under two entries there is no span, so 0.0.
    pub fn messages_per_minute(&self) -> f64 {
        if self.patterns.len() < 2 {
            return 0.0;
        }
        let first = self.patterns.front().and_then(|p| p.arrived);
        let last = self.patterns.back().and_then(|p| p.arrived);
        match (first, last) {
            (Some(a), Some(b)) => {
                let span_secs = b.duration_since(a).as_secs_f64();
                if span_secs <= 0.0 {
                    // Burst within the clock's resolution
                    return self.patterns.len() as f64 * 60.0;
                }
                (self.patterns.len() as f64 - 1.0) / span_secs * 60.0
            }
            _ => 0.0,
        }
    }

    /// Fraction of windowed messages flagged repetitive
    pub fn repetition_ratio(&self) -> f64 {
        self.flag_ratio(|p| p.repetitive)
    }

    /// Fraction of windowed messages flagged fragmented
    pub fn fragmentation_ratio(&self) -> f64 {
        self.flag_ratio(|p| p.fragmented)
    }

    /// Fraction of windowed messages flagged all-caps
    pub fn caps_ratio(&self) -> f64 {
        self.flag_ratio(|p| p.all_caps)
    }

    /// Average message length in the window
    pub fn average_length(&self) -> f64 {
        if self.patterns.is_empty() {
            return 0.0;
        }
        let sum: usize = self.patterns.iter().map(|p| p.length).sum();
        sum as f64 / self.patterns.len() as f64
    }

    fn flag_ratio(&self, f: impl Fn(&BehavioralPattern) -> bool) -> f64 {
        if self.patterns.is_empty() {
            return 0.0;
        }
        let hits = self.patterns.iter().filter(|p| f(p)).count();
        hits as f64 / self.patterns.len() as f64
    }

    /// Clear all patterns
    pub fn clear(&mut self) {
        self.patterns.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
