//! Prosody-derived voice metrics
//!
//! Supplied externally (speech pipeline); merged into stress scoring
//! when present. All fields optional - partial readings are normal.

use serde::{Deserialize, Serialize};

/// Resting baselines for deviation scoring
pub const BASELINE_PITCH_HZ: f64 = 165.0;
pub const BASELINE_PACE_WPM: f64 = 140.0;
pub const BASELINE_VOLUME: f64 = 0.5;

/// A prosody reading for one utterance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceMetrics {
    /// Fundamental frequency (Hz)
    pub pitch: Option<f64>,
    /// Speaking pace (words per minute)
    pub pace: Option<f64>,
    /// Normalized loudness (0.0-1.0)
    pub volume: Option<f64>,
}

impl VoiceMetrics {
    /// All three readings present?
    pub fn is_complete(&self) -> bool {
        self.pitch.is_some() && self.pace.is_some() && self.volume.is_some()
    }

    /// Any reading present?
    pub fn has_signal(&self) -> bool {
        self.pitch.is_some() || self.pace.is_some() || self.volume.is_some()
    }

    /// Aggregate deviation from resting baselines (0.0-1.0).
    /// Each present reading contributes its fractional excursion above
    /// baseline; missing readings contribute nothing.
    pub fn deviation(&self) -> f64 {
        let mut total = 0.0;
        let mut parts = 0;

        if let Some(pitch) = self.pitch {
            total += ((pitch - BASELINE_PITCH_HZ) / BASELINE_PITCH_HZ).max(0.0).min(1.0);
            parts += 1;
        }
        if let Some(pace) = self.pace {
            total += ((pace - BASELINE_PACE_WPM) / BASELINE_PACE_WPM).max(0.0).min(1.0);
            parts += 1;
        }
        if let Some(volume) = self.volume {
            total += ((volume - BASELINE_VOLUME) / (1.0 - BASELINE_VOLUME)).max(0.0).min(1.0);
            parts += 1;
        }

        if parts == 0 {
            return 0.0;
        }
        (total / parts as f64).clamp(0.0, 1.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics_no_deviation() {
        let voice = VoiceMetrics::default();
        assert!(!voice.has_signal());
        assert_eq!(voice.deviation(), 0.0);
    }

    #[test]
    fn test_resting_voice_low_deviation() {
        let voice = VoiceMetrics {
            pitch: Some(BASELINE_PITCH_HZ),
            pace: Some(BASELINE_PACE_WPM),
            volume: Some(BASELINE_VOLUME),
        };
        assert!(voice.is_complete());
        assert!(voice.deviation() < 0.01);
    }

    #[test]
    fn test_agitated_voice_high_deviation() {
        let voice = VoiceMetrics {
            pitch: Some(280.0),
            pace: Some(230.0),
            volume: Some(0.95),
        };
        assert!(voice.deviation() > 0.5);
    }

    #[test]
    fn test_deviation_bounded() {
        let voice = VoiceMetrics {
            pitch: Some(2000.0),
            pace: Some(900.0),
            volume: Some(1.0),
        };
        assert!(voice.deviation() <= 1.0);
    }

    #[test]
    fn test_partial_reading() {
        let voice = VoiceMetrics {
            pitch: None,
            pace: Some(210.0),
            volume: None,
        };
        assert!(voice.has_signal());
        assert!(!voice.is_complete());
        assert!(voice.deviation() > 0.0);
    }
}
