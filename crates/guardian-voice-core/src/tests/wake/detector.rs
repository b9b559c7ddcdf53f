use crate::{Detection, WakeDetector, WakePhrase, WakeState};

use std::time::Duration;

use tokio::time::Instant;

fn detector() -> WakeDetector {
    WakeDetector::new(
        WakePhrase::new("socorro", "anjo"),
        Duration::from_millis(2000),
        Duration::from_millis(5000),
    )
}

/// WHAT: Two-utterance phrase inside the window triggers once
/// WHY: Core scenario: "preciso de socorro" then "chame o anjo" 1.5s later
#[test]
fn given_first_then_second_within_window_when_detecting_then_triggers() {
    // Given: Fresh detector
    let mut detector = detector();
    let t0 = Instant::now();

    // When: First utterance at t=0, second at t=1500ms
    let first = detector.on_utterance("Preciso de socorro", t0);
    let second = detector.on_utterance("Chame o anjo!", t0 + Duration::from_millis(1500));

    // Then: Armed, then triggered
    assert_eq!(first, Detection::Armed);
    assert_eq!(second, Detection::Triggered);
    assert_eq!(detector.state(), WakeState::Idle);
}

/// WHAT: Second utterance after the window does not trigger
/// WHY: Core scenario variant at t=2500ms
#[test]
fn given_first_then_second_after_window_when_detecting_then_stale_and_idle() {
    // Given: Detector armed at t=0
    let mut detector = detector();
    let t0 = Instant::now();
    detector.on_utterance("preciso de socorro", t0);

    // When: Second utterance at t=2500ms
    let second = detector.on_utterance("chame o anjo", t0 + Duration::from_millis(2500));

    // Then: No match, idle
    assert_eq!(second, Detection::Stale);
    assert_eq!(detector.state(), WakeState::Idle);
}

/// WHAT: A second match inside the debounce interval is suppressed
/// WHY: At most one dispatch per debounce window
#[test]
fn given_recent_trigger_when_phrase_repeated_then_suppressed() {
    // Given: Detector that just triggered
    let mut detector = detector();
    let t0 = Instant::now();
    assert_eq!(detector.on_utterance("socorro anjo", t0), Detection::Triggered);

    // When: Phrase repeated 3 seconds later, then again 6 seconds later
    let repeat = detector.on_utterance("socorro anjo", t0 + Duration::from_secs(3));
    let later = detector.on_utterance("socorro anjo", t0 + Duration::from_secs(6));

    // Then: Suppressed, then allowed
    assert_eq!(repeat, Detection::Suppressed);
    assert_eq!(later, Detection::Triggered);
}

/// WHAT: Whitespace-only utterances are ignored
/// WHY: Empty partials must not touch state
#[test]
fn given_armed_when_blank_utterance_then_ignored_and_still_armed() {
    let mut detector = detector();
    let t0 = Instant::now();
    detector.on_utterance("socorro", t0);

    let detection = detector.on_utterance("   ...  ", t0 + Duration::from_millis(100));

    assert_eq!(detection, Detection::Ignored);
    assert!(matches!(detector.state(), WakeState::Armed { .. }));
}

/// WHAT: Disarm keeps debounce history, reset clears it
/// WHY: Gate disable drops progress without re-allowing an immediate duplicate
#[test]
fn given_triggered_when_disarming_vs_resetting_then_debounce_differs() {
    // Given: Detector that just triggered
    let mut detector = detector();
    let t0 = Instant::now();
    detector.on_utterance("socorro anjo", t0);

    // When: Disarmed only
    detector.disarm();

    // Then: Duplicate still suppressed
    assert_eq!(detector.on_utterance("socorro anjo", t0), Detection::Suppressed);

    // When: Fully reset
    detector.reset();

    // Then: Fires again
    assert_eq!(detector.on_utterance("socorro anjo", t0), Detection::Triggered);
}
