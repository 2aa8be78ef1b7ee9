//! Path router: picks gentle/honest/direct per message
//!
//! Precedence:
//! - distress HIGH → gentle (beats everything, including manual preference)
//! - crisis phrase → gentle (beats manual preference)
//! - manual preference → honored as-is
//! - otherwise weighted trigger scoring, ties default to honest

use crate::{
    FRAGMENT_BONUS_THRESHOLD, PATH_BONUS_SECONDARY, PATH_CONFIDENCE_BASE,
    PATH_CONFIDENCE_CAP, PATH_CONFIDENCE_DISTRESS, PATH_CONFIDENCE_MANUAL,
    PATH_CONFIDENCE_NEUTRAL, PATH_CONFIDENCE_SLOPE, PATH_WEIGHT_DIRECT,
    PATH_WEIGHT_GENTLE, PATH_WEIGHT_HONEST, SHORT_MESSAGE_CHARS,
};
use crate::core::triggers;
use crate::types::{DistressLevel, PathConfig, PathSignals, ResponsePath, RouteReason};

/// Response path router
#[derive(Debug, Default)]
pub struct PathRouter;

impl PathRouter {
    /// Create new router
    pub fn new() -> Self {
        Self
    }

    /// Route a message to a path. Pure and deterministic; never fails.
    pub fn detect(
        &self,
        text: &str,
        current_distress: Option<DistressLevel>,
        manual_path: Option<ResponsePath>,
    ) -> PathConfig {
        let text = text.trim();
        let signals = self.score(text);

        // High distress forces gentle, over any manual preference
        if current_distress == Some(DistressLevel::High) {
            return PathConfig::new(
                ResponsePath::Gentle,
                RouteReason::P101_DISTRESS_OVERRIDE,
                PATH_CONFIDENCE_DISTRESS,
                signals,
            );
        }

        // Crisis language forces gentle, over any manual preference
        if triggers::has_crisis(text) {
            let confidence = Self::confidence(signals.gentle);
            return PathConfig::new(
                ResponsePath::Gentle,
                RouteReason::P102_CRISIS_OVERRIDE,
                confidence,
                signals,
            );
        }

        // Manual preference is otherwise authoritative
        if let Some(path) = manual_path {
            return PathConfig::new(
                path,
                RouteReason::P103_MANUAL_PREFERENCE,
                PATH_CONFIDENCE_MANUAL,
                signals,
            );
        }

        self.pick(signals)
    }

    /// Score a message against all three categories
    fn score(&self, text: &str) -> PathSignals {
        if text.is_empty() {
            return PathSignals::zero();
        }

        let mut gentle = triggers::gentle_family_hits(text) as f64 * PATH_WEIGHT_GENTLE;
        let mut direct = if triggers::has_direct_request(text) {
            PATH_WEIGHT_DIRECT
        } else {
            0.0
        };
        let mut honest = if triggers::has_decision_language(text) {
            PATH_WEIGHT_HONEST
        } else {
            0.0
        };

        let chars = text.chars().count();
        let question = text.contains('?');
        let fragments = count_fragments(text);

        // Secondary heuristics
        if chars < SHORT_MESSAGE_CHARS {
            direct += PATH_BONUS_SECONDARY;
        }
        if question {
            honest += PATH_BONUS_SECONDARY;
        }
        if fragments > FRAGMENT_BONUS_THRESHOLD {
            gentle += PATH_BONUS_SECONDARY;
        }

        PathSignals {
            gentle,
            direct,
            honest,
            fragments,
            chars,
            question,
        }
    }

    /// Pick the winning category from scores
    fn pick(&self, signals: PathSignals) -> PathConfig {
        let max = signals.gentle.max(signals.direct).max(signals.honest);

        if max <= 0.0 {
            return PathConfig::new(
                ResponsePath::Honest,
                RouteReason::P301_NEUTRAL_DEFAULT,
                PATH_CONFIDENCE_NEUTRAL,
                signals,
            );
        }

        let at_max = [
            (ResponsePath::Gentle, signals.gentle),
            (ResponsePath::Direct, signals.direct),
            (ResponsePath::Honest, signals.honest),
        ]
        .iter()
        .filter(|(_, s)| (*s - max).abs() < f64::EPSILON)
        .count();

        let confidence = Self::confidence(max);

        // Any tie for the top score falls back to honest
        if at_max > 1 {
            return PathConfig::new(
                ResponsePath::Honest,
                RouteReason::P204_TIE_DEFAULT_HONEST,
                confidence,
                signals,
            );
        }

        let (path, reason) = if (signals.gentle - max).abs() < f64::EPSILON {
            (ResponsePath::Gentle, RouteReason::P201_GENTLE_TRIGGERS)
        } else if (signals.direct - max).abs() < f64::EPSILON {
            (ResponsePath::Direct, RouteReason::P202_DIRECT_TRIGGERS)
        } else {
            (ResponsePath::Honest, RouteReason::P203_HONEST_TRIGGERS)
        };

        PathConfig::new(path, reason, confidence, signals)
    }

    /// confidence = min(cap, base + score * slope)
    fn confidence(score: f64) -> f64 {
        (PATH_CONFIDENCE_BASE + score * PATH_CONFIDENCE_SLOPE).min(PATH_CONFIDENCE_CAP)
    }
}

/// Count sentence fragments: punctuation-delimited segments under 4 words
fn count_fragments(text: &str) -> usize {
    text.split(|c| matches!(c, '.' | '!' | '?' | '\n' | '…'))
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .filter(|seg| seg.split_whitespace().count() < 4)
        .count()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_neutral_default() {
        let router = PathRouter::new();
        let config = router.detect("", None, None);
        assert_eq!(config.path, ResponsePath::Honest);
        assert_eq!(config.reason, RouteReason::P301_NEUTRAL_DEFAULT);
        assert_eq!(config.confidence, PATH_CONFIDENCE_NEUTRAL);
    }

    #[test]
    fn test_crisis_forces_gentle() {
        let router = PathRouter::new();
        let config = router.detect("I want to die", None, None);
        assert_eq!(config.path, ResponsePath::Gentle);
        assert_eq!(config.reason, RouteReason::P102_CRISIS_OVERRIDE);
    }

    #[test]
    fn test_crisis_beats_manual_preference() {
        let router = PathRouter::new();
        let config = router.detect(
            "just be blunt, I can't go on anymore",
            None,
            Some(ResponsePath::Direct),
        );
        assert_eq!(config.path, ResponsePath::Gentle);
        assert_eq!(config.reason, RouteReason::P102_CRISIS_OVERRIDE);
    }

    #[test]
    fn test_high_distress_forces_gentle() {
        let router = PathRouter::new();
        // Content asks for directness, distress wins anyway
        let config = router.detect(
            "just tell me what to do",
            Some(DistressLevel::High),
            Some(ResponsePath::Direct),
        );
        assert_eq!(config.path, ResponsePath::Gentle);
        assert_eq!(config.reason, RouteReason::P101_DISTRESS_OVERRIDE);
        assert!((config.confidence - PATH_CONFIDENCE_DISTRESS).abs() < 1e-9);
    }

    #[test]
    fn test_manual_preference_honored() {
        let router = PathRouter::new();
        let config = router.detect(
            "thinking about my week",
            Some(DistressLevel::Medium),
            Some(ResponsePath::Direct),
        );
        assert_eq!(config.path, ResponsePath::Direct);
        assert_eq!(config.reason, RouteReason::P103_MANUAL_PREFERENCE);
        assert_eq!(config.confidence, PATH_CONFIDENCE_MANUAL);
    }

    #[test]
    fn test_overwhelm_routes_gentle() {
        let router = PathRouter::new();
        let config = router.detect(
            "everything is falling apart and I'm so overwhelmed by all of it",
            None,
            None,
        );
        assert_eq!(config.path, ResponsePath::Gentle);
        assert_eq!(config.reason, RouteReason::P201_GENTLE_TRIGGERS);
    }

    #[test]
    fn test_direct_request_routes_direct() {
        let router = PathRouter::new();
        let config = router.detect(
            "no sugarcoating please, give me steps for getting out of this rut",
            None,
            None,
        );
        assert_eq!(config.path, ResponsePath::Direct);
        assert_eq!(config.reason, RouteReason::P202_DIRECT_TRIGGERS);
    }

    #[test]
    fn test_decision_language_routes_honest() {
        let router = PathRouter::new();
        let config = router.detect(
            "I'm torn between staying and leaving, help me think it through please",
            None,
            None,
        );
        assert_eq!(config.path, ResponsePath::Honest);
        assert_eq!(config.reason, RouteReason::P203_HONEST_TRIGGERS);
    }

    #[test]
    fn test_short_message_direct_bonus() {
        let router = PathRouter::new();
        // Short, no trigger matches, no question: only the direct bonus scores
        let config = router.detect("rough day", None, None);
        assert_eq!(config.path, ResponsePath::Direct);
        assert!(config.signals.direct > 0.0);
    }

    #[test]
    fn test_question_honest_bonus() {
        let router = PathRouter::new();
        let config = router.detect(
            "do you ever wonder why mornings feel heavier than evenings?",
            None,
            None,
        );
        assert_eq!(config.path, ResponsePath::Honest);
        assert!(config.signals.question);
    }

    #[test]
    fn test_fragmented_gentle_bonus() {
        let router = PathRouter::new();
        let config = router.detect(
            "can't. just can't. too many things. everything at once. not today.",
            None,
            None,
        );
        assert!(config.signals.fragments > FRAGMENT_BONUS_THRESHOLD);
        assert_eq!(config.path, ResponsePath::Gentle);
    }

    #[test]
    fn test_tie_defaults_honest() {
        let router = PathRouter::new();
        // Short (+0.5 direct) and a question (+0.5 honest), nothing else
        let config = router.detect("now what?", None, None);
        assert_eq!(config.path, ResponsePath::Honest);
        assert_eq!(config.reason, RouteReason::P204_TIE_DEFAULT_HONEST);
    }

    #[test]
    fn test_confidence_bounds() {
        let router = PathRouter::new();
        let inputs = [
            "",
            "hi",
            "I want to die and I'm overwhelmed and nothing feels real",
            "just tell me what to do?",
            "should I move cities or stay near family, what do you think?",
        ];
        for text in inputs {
            let config = router.detect(text, None, None);
            assert!(
                (0.0..=1.0).contains(&config.confidence),
                "confidence out of range for {:?}: {}",
                text,
                config.confidence
            );
        }
    }

    #[test]
    fn test_confidence_capped() {
        let router = PathRouter::new();
        // Three gentle families → score 9.0 → formula would give 1.4, cap at 0.95
        let config = router.detect(
            "I'm overwhelmed, the flashbacks keep coming back, nothing feels real",
            None,
            None,
        );
        assert!(config.confidence <= PATH_CONFIDENCE_CAP + 1e-9);
    }

    #[test]
    fn test_determinism() {
        let router = PathRouter::new();
        let text = "I'm torn between two jobs and everything is too much for me";
        let a = router.detect(text, Some(DistressLevel::Medium), None);
        let b = router.detect(text, Some(DistressLevel::Medium), None);
        assert_eq!(a.path, b.path);
        assert_eq!(a.reason, b.reason);
        assert!((a.confidence - b.confidence).abs() < 1e-12);
    }

    #[test]
    fn test_fragment_counting() {
        assert_eq!(count_fragments(""), 0);
        assert_eq!(count_fragments("This is a complete ordinary sentence."), 0);
        assert_eq!(count_fragments("can't. won't. shouldn't."), 3);
        assert_eq!(count_fragments("ok… fine… whatever… sure… done…"), 5);
    }
}
