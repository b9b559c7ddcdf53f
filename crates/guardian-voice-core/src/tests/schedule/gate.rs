use crate::{GateTransition, HibernationGate};

/// WHAT: First evaluation always transitions
/// WHY: Startup must push the initial state to the controller
#[test]
fn given_fresh_gate_when_applying_then_transitions() {
    let mut enabled = HibernationGate::new();
    let mut disabled = HibernationGate::new();

    assert_eq!(enabled.apply(true), Some(GateTransition::Enable));
    assert_eq!(disabled.apply(false), Some(GateTransition::Disable));
}

/// WHAT: Repeating the same outcome does nothing
/// WHY: Each cycle must not restart the recognizer or repeat notifications
#[test]
fn given_applied_state_when_same_outcome_repeats_then_no_transition() {
    // Given: Gate already enabled
    let mut gate = HibernationGate::new();
    gate.apply(true);

    // When: Several cycles with the same outcome
    let repeats: Vec<_> = (0..3).map(|_| gate.apply(true)).collect();

    // Then: Nothing to do
    assert!(repeats.iter().all(Option::is_none));
    assert_eq!(gate.last_applied(), Some(true));
}

/// WHAT: Flipping the outcome transitions once per flip
/// WHY: Entering then leaving a quiet window toggles listening
#[test]
fn given_applied_state_when_outcome_flips_then_single_transition_each_way() {
    let mut gate = HibernationGate::new();
    gate.apply(true);

    assert_eq!(gate.apply(false), Some(GateTransition::Disable));
    assert_eq!(gate.apply(false), None);
    assert_eq!(gate.apply(true), Some(GateTransition::Enable));
}

/// WHAT: Forgetting makes the next evaluation transition again
/// WHY: After an explicit stop, start must re-apply the current state
#[test]
fn given_forgotten_gate_when_applying_same_state_then_transitions() {
    let mut gate = HibernationGate::new();
    gate.apply(true);

    gate.forget();

    assert_eq!(gate.apply(true), Some(GateTransition::Enable));
}
