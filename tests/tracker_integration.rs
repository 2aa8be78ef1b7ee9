//! Integration tests for the emotional state tracker
//!
//! Exercises hysteresis with shortened holds and the coupling between
//! tracked distress and path routing.

use std::thread::sleep;
use std::time::Duration;

use sai::core::{EmotionalStateTracker, PathRouter, StressDetector};
use sai::types::{
    BehaviorWindow, CheckInKind, DistressLevel, Message, ResponsePath, StressAnalysis,
    StressSignals,
};

fn analysis(score: f64) -> StressAnalysis {
    StressAnalysis::from_signals(
        StressSignals {
            trigger_points: score,
            ..StressSignals::zero()
        },
        Vec::new(),
    )
}

// =============================================================================
// Hysteresis: fast up, slow down
// =============================================================================

#[test]
fn test_escalates_immediately_recovers_slowly() {
    let mut tracker = EmotionalStateTracker::with_holds(80, 10_000);

    // One bad message escalates
    let output = tracker.update(&analysis(70.0));
    assert_eq!(output.level, DistressLevel::High);

    // A single calm message does not de-escalate
    let output = tracker.update(&analysis(5.0));
    assert_eq!(output.level, DistressLevel::High);

    // Sustained calm steps down one level at a time
    sleep(Duration::from_millis(120));
    let output = tracker.update(&analysis(5.0));
    assert_eq!(output.level, DistressLevel::Medium);

    sleep(Duration::from_millis(120));
    let output = tracker.update(&analysis(5.0));
    assert_eq!(output.level, DistressLevel::Low);
}

#[test]
fn test_spike_restarts_recovery() {
    let mut tracker = EmotionalStateTracker::with_holds(100, 10_000);
    tracker.update(&analysis(70.0));
    tracker.update(&analysis(5.0));
    sleep(Duration::from_millis(60));

    // Spike halfway through the hold
    tracker.update(&analysis(55.0));
    sleep(Duration::from_millis(60));

    // Hold restarted, not yet paid out
    let output = tracker.update(&analysis(5.0));
    assert_eq!(output.level, DistressLevel::High);
}

// =============================================================================
// Check-ins
// =============================================================================

#[test]
fn test_check_in_fires_once_per_elevation() {
    let mut tracker = EmotionalStateTracker::with_holds(60_000, 40);
    tracker.update(&analysis(40.0));
    sleep(Duration::from_millis(70));

    let output = tracker.update(&analysis(40.0));
    assert_eq!(output.check_in, Some(CheckInKind::Gentle));

    let output = tracker.update(&analysis(40.0));
    assert_eq!(output.check_in, None);
}

#[test]
fn test_new_elevation_rearms_check_in() {
    let mut tracker = EmotionalStateTracker::with_holds(60_000, 30);
    tracker.update(&analysis(40.0));
    sleep(Duration::from_millis(60));
    let output = tracker.update(&analysis(40.0));
    assert_eq!(output.check_in, Some(CheckInKind::Gentle));

    // Escalating to HIGH is a fresh elevation
    tracker.update(&analysis(75.0));
    sleep(Duration::from_millis(60));
    let output = tracker.update(&analysis(75.0));
    assert_eq!(output.check_in, Some(CheckInKind::Intervention));
}

// =============================================================================
// Coupling with the router
// =============================================================================

#[test]
fn test_tracked_high_distress_gates_routing() {
    let router = PathRouter::new();
    let mut detector = StressDetector::new();
    let mut tracker = EmotionalStateTracker::new();
    let mut window = BehaviorWindow::new();

    // A crisis message drives the tracker to HIGH
    let crisis = Message::new("I can't go on, everything is too much for me");
    let (_, stress) = detector.process(&crisis, &mut window, None);
    let tracked = tracker.update(&stress);
    assert_eq!(tracked.level, DistressLevel::High);

    // The next message asks for directness; the level still forces gentle
    let next = Message::new("just tell me what to do");
    let (_, stress) = detector.process(&next, &mut window, None);
    let tracked = tracker.update(&stress);
    let config = router.detect(&next.text, Some(tracked.level), Some(ResponsePath::Direct));
    assert_eq!(config.path, ResponsePath::Gentle);
}

#[test]
fn test_settled_session_routes_by_content() {
    let router = PathRouter::new();
    let mut detector = StressDetector::new();
    let mut tracker = EmotionalStateTracker::new();
    let mut window = BehaviorWindow::new();

    let message = Message::new("should I take the earlier train tomorrow?");
    let (_, stress) = detector.process(&message, &mut window, None);
    let tracked = tracker.update(&stress);

    assert_eq!(tracked.level, DistressLevel::Low);
    let config = router.detect(&message.text, Some(tracked.level), None);
    assert_eq!(config.path, ResponsePath::Honest);
}
