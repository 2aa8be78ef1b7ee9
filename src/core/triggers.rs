//! Trigger pattern sets shared by the router and the stress detector
//!
//! All patterns are word-bounded. The riskiest phrases ("give up",
//! "end it") require first-person context to cut false positives.

use lazy_static::lazy_static;
use regex::Regex;
use crate::types::TriggerCategory;

lazy_static! {
    // =========================================================================
    // Gentle trigger families (router weight 3.0 each)
    // =========================================================================
    static ref RE_CRISIS: Regex = Regex::new(
        r"(?i)\b(want(s)? to die|wish i was dead|kill (myself|me)|end (it all|my life)|hurt (myself|me)|harm (myself|me)|no (reason|point) (to live|in living)|can't go on|better off without me|don't want to (be here|live|exist) anymore|giving up on everything|give up on everything)\b"
    ).unwrap();

    static ref RE_OVERWHELM: Regex = Regex::new(
        r"(?i)\b(overwhelmed|overwhelming|too much for me|it's all too much|can't (cope|handle|take) (this|it|anymore)|can't breathe|drowning in|falling apart|breaking down|shutting down|everything is crashing)\b"
    ).unwrap();

    static ref RE_DISSOCIATION: Regex = Regex::new(
        r"(?i)\b(not real|nothing (feels|seems) real|(don't|doesn't) feel real|feel(ing)? (numb|empty|hollow|far away|foggy|blank)|outside my body|watching myself|disconnected from (myself|everything|my body)|floating away)\b"
    ).unwrap();

    static ref RE_TRAUMA: Regex = Regex::new(
        r"(?i)\b(flashback(s)?|nightmare(s)? again|triggered me|keeps? (coming|flooding) back|can't stop (remembering|seeing it|reliving)|what (happened|they did) to me|it happened again)\b"
    ).unwrap();

    // =========================================================================
    // Agitation (stress scoring only, not a routing family)
    // =========================================================================
    static ref RE_AGITATION: Regex = Regex::new(
        r"(?i)\b(angry|furious|rage|livid|pissed( off)?|hate (this|everything|myself)|so frustrated|fed up|sick of (this|it|everything)|want to scream)\b"
    ).unwrap();

    // =========================================================================
    // Direct triggers (router weight 2.0)
    // =========================================================================
    static ref RE_DIRECT: Regex = Regex::new(
        r"(?i)\b(just tell me|be (direct|straight|blunt)( with me)?|give it to me straight|straight answer|what should i do|tell me what to do|no sugar ?coating|stop sugar ?coating|cut to the chase|get to the point|skip the fluff|give me (steps|a plan)|how do i fix)\b"
    ).unwrap();

    // =========================================================================
    // Honest triggers (router weight 2.0)
    // =========================================================================
    static ref RE_HONEST: Regex = Regex::new(
        r"(?i)\b(should i|what do you (think|really think)|is it (a good idea|worth it|the right call)|help me (decide|choose|figure out|think (this|it) through)|pros and cons|weigh(ing)? (my )?options|torn between|can't decide|not sure (if|whether)|am i (wrong|overreacting|being unfair))\b"
    ).unwrap();
}

/// Does the text contain a crisis phrase?
pub fn has_crisis(text: &str) -> bool {
    RE_CRISIS.is_match(text)
}

/// Does the text contain a direct-request phrase?
pub fn has_direct_request(text: &str) -> bool {
    RE_DIRECT.is_match(text)
}

/// Does the text contain decision-support language?
pub fn has_decision_language(text: &str) -> bool {
    RE_HONEST.is_match(text)
}

/// Number of gentle trigger families the text matches (0-4)
pub fn gentle_family_hits(text: &str) -> usize {
    [&*RE_CRISIS, &*RE_OVERWHELM, &*RE_DISSOCIATION, &*RE_TRAUMA]
        .iter()
        .filter(|re| re.is_match(text))
        .count()
}

/// Scan text against all stress trigger categories
pub fn scan_triggers(text: &str) -> Vec<TriggerCategory> {
    let mut hits = Vec::new();
    if RE_CRISIS.is_match(text) {
        hits.push(TriggerCategory::Crisis);
    }
    if RE_TRAUMA.is_match(text) {
        hits.push(TriggerCategory::Trauma);
    }
    if RE_DISSOCIATION.is_match(text) {
        hits.push(TriggerCategory::Dissociation);
    }
    if RE_OVERWHELM.is_match(text) {
        hits.push(TriggerCategory::Overwhelm);
    }
    if RE_AGITATION.is_match(text) {
        hits.push(TriggerCategory::Agitation);
    }
    hits
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_phrases() {
        assert!(has_crisis("I want to die"));
        assert!(has_crisis("some days I just can't go on"));
        assert!(has_crisis("they'd be better off without me"));
        assert!(!has_crisis("the deadline is brutal this week"));
    }

    #[test]
    fn test_give_up_needs_context() {
        // Bare "give up" is not a crisis phrase
        assert!(!has_crisis("I might give up coffee"));
        assert!(has_crisis("I'm giving up on everything"));
    }

    #[test]
    fn test_end_it_needs_context() {
        assert!(!has_crisis("let's end it here for today"));
        assert!(has_crisis("I want to end it all"));
    }

    #[test]
    fn test_gentle_family_count() {
        assert_eq!(gentle_family_hits("nice weather today"), 0);
        assert_eq!(gentle_family_hits("I'm so overwhelmed"), 1);
        assert_eq!(
            gentle_family_hits("I'm overwhelmed and nothing feels real and the flashbacks keep coming back"),
            3
        );
    }

    #[test]
    fn test_direct_and_honest() {
        assert!(has_direct_request("just tell me what's wrong"));
        assert!(has_direct_request("what should I do"));
        assert!(has_decision_language("should I take the job?"));
        assert!(has_decision_language("I'm torn between two options"));
        assert!(!has_direct_request("I had a quiet day"));
    }

    #[test]
    fn test_scan_categories() {
        let hits = scan_triggers("I'm furious and overwhelmed");
        assert!(hits.contains(&TriggerCategory::Agitation));
        assert!(hits.contains(&TriggerCategory::Overwhelm));
        assert!(!hits.contains(&TriggerCategory::Crisis));
    }
}
