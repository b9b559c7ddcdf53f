use crate::{Transition, WakeMachine, WakePhrase, WakeState};

use std::time::Duration;

use tokio::time::Instant;

const WINDOW: Duration = Duration::from_millis(2000);

fn machine() -> WakeMachine {
    WakeMachine::new(WakePhrase::new("socorro", "anjo"), WINDOW)
}

/// WHAT: Idle machine ignores speech without the first token
/// WHY: Ordinary conversation must never arm the machine
#[test]
fn given_idle_when_hearing_unrelated_speech_then_stays_idle() {
    // Given: Idle machine
    let mut machine = machine();
    let t0 = Instant::now();

    // When: Hearing speech without the first token (even with the second)
    let a = machine.feed("bom dia", t0);
    let b = machine.feed("o anjo chegou", t0);

    // Then: Nothing changes
    assert_eq!(a, Transition::Ignored);
    assert_eq!(b, Transition::Ignored);
    assert_eq!(machine.state(), WakeState::Idle);
    assert!(machine.expiry_deadline().is_none());
}

/// WHAT: Both tokens in one utterance match immediately
/// WHY: Users often say the whole phrase in one breath
#[test]
fn given_any_state_when_both_tokens_in_order_then_matches() {
    // Given: Idle machine and an armed machine
    let mut idle = machine();
    let mut armed = machine();
    let t0 = Instant::now();
    armed.feed("socorro", t0);

    // When: Hearing both tokens in order
    let from_idle = idle.feed("socorro me ajuda anjo", t0);
    let from_armed = armed.feed("socorro anjo", t0 + Duration::from_millis(10));

    // Then: Both match and return to idle
    assert_eq!(from_idle, Transition::Matched);
    assert_eq!(from_armed, Transition::Matched);
    assert_eq!(idle.state(), WakeState::Idle);
    assert_eq!(armed.state(), WakeState::Idle);
}

/// WHAT: Second token only needs to start after the end of the first
/// WHY: Recognizers sometimes join the phrase into one word
#[test]
fn given_idle_when_tokens_joined_or_overlapping_then_match_only_after_first_ends() {
    // Given: Default phrase, and one whose second token is a suffix of the first
    let mut joined = machine();
    let mut overlapping = WakeMachine::new(WakePhrase::new("socorro", "orro"), WINDOW);
    let t0 = Instant::now();

    // When
    let from_joined = joined.feed("socorroanjo", t0);
    let from_overlap = overlapping.feed("socorro", t0);

    // Then: Joined word takes the fast path, overlap inside the first token only arms
    assert_eq!(from_joined, Transition::Matched);
    assert_eq!(from_overlap, Transition::Armed { expires_at: t0 + WINDOW });
}

/// WHAT: Tokens in the wrong order do not match in a single utterance
/// WHY: The phrase is ordered
#[test]
fn given_idle_when_tokens_reversed_then_only_arms() {
    // Given: Idle machine
    let mut machine = machine();
    let t0 = Instant::now();

    // When: Second token comes before the first
    let transition = machine.feed("anjo socorro", t0);

    // Then: Armed by the first token, no match
    assert_eq!(transition, Transition::Armed { expires_at: t0 + WINDOW });
    assert_eq!(machine.expiry_deadline(), Some(t0 + WINDOW));
}

/// WHAT: Second token exactly at the window edge still matches
/// WHY: Boundary is inclusive
#[test]
fn given_armed_when_second_token_at_window_edge_then_matches() {
    // Given: Machine armed at t0
    let mut machine = machine();
    let t0 = Instant::now();
    machine.feed("socorro", t0);

    // When: Second token at exactly t0 + window
    let transition = machine.feed("anjo", t0 + WINDOW);

    // Then: Match
    assert_eq!(transition, Transition::Matched);
}

/// WHAT: Second token one millisecond past the window is stale
/// WHY: Window is bounded; late tokens reset instead of matching
#[test]
fn given_armed_when_second_token_after_window_then_stale_and_idle() {
    // Given: Machine armed at t0
    let mut machine = machine();
    let t0 = Instant::now();
    machine.feed("socorro", t0);

    // When: Second token at t0 + window + 1ms
    let transition = machine.feed("anjo", t0 + WINDOW + Duration::from_millis(1));

    // Then: Stale, back to idle
    assert!(matches!(transition, Transition::Stale { .. }));
    assert_eq!(machine.state(), WakeState::Idle);
}

/// WHAT: Unrelated speech while armed keeps the machine armed
/// WHY: Partial results arrive constantly and must not cancel progress
#[test]
fn given_armed_when_hearing_noise_then_still_armed() {
    // Given: Armed machine
    let mut machine = machine();
    let t0 = Instant::now();
    machine.feed("socorro", t0);

    // When: Unrelated speech inside the window
    let transition = machine.feed("socorro por favor", t0 + Duration::from_millis(500));

    // Then: Still armed with the original timestamp
    assert_eq!(transition, Transition::StillArmed);
    assert_eq!(machine.state(), WakeState::Armed { armed_at: t0 });
}

/// WHAT: Expiry resets only once the deadline has passed
/// WHY: The pending expiry deadline forces idle after the window
#[test]
fn given_armed_when_expiring_then_resets_at_deadline_only() {
    // Given: Armed machine
    let mut machine = machine();
    let t0 = Instant::now();
    machine.feed("socorro", t0);

    // When/Then: Too early does nothing, at the deadline it resets
    assert!(!machine.expire(t0 + Duration::from_millis(1999)));
    assert!(machine.expire(t0 + WINDOW));
    assert_eq!(machine.state(), WakeState::Idle);
    assert!(machine.expiry_deadline().is_none());
}

/// WHAT: Inert phrase ignores all input
/// WHY: Blank tokens fail safe
#[test]
fn given_inert_phrase_when_feeding_then_always_ignored() {
    // Given: Machine with a blank first token
    let mut machine = WakeMachine::new(WakePhrase::new("", "anjo"), WINDOW);

    // When: Feeding text that contains the second token
    let transition = machine.feed("anjo", Instant::now());

    // Then: Ignored
    assert_eq!(transition, Transition::Ignored);
}

/// WHAT: Replacing the phrase drops progress
/// WHY: An armed window for old tokens must not complete with new ones
#[test]
fn given_armed_when_phrase_replaced_then_idle() {
    let mut machine = machine();
    machine.feed("socorro", Instant::now());

    machine.set_phrase(WakePhrase::new("ajuda", "agora"));

    assert_eq!(machine.state(), WakeState::Idle);
    assert_eq!(machine.phrase().first(), "ajuda");
}
