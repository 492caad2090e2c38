use crate::navigator::{Phase, TransitionMachine};

#[test]
fn test_full_cycle_returns_to_idle() {
    let mut machine = TransitionMachine::new();
    assert_eq!(machine.phase(), Phase::Idle);

    let ticket = machine.begin();
    assert_eq!(machine.phase(), Phase::FadingOut);
    assert!(machine.start_loading(ticket));
    assert_eq!(machine.phase(), Phase::Loading);
    assert!(machine.start_fade_in(ticket));
    assert_eq!(machine.phase(), Phase::FadingIn);
    assert!(machine.finish(ticket));
    assert_eq!(machine.phase(), Phase::Idle);
    assert_eq!(machine.superseded_count(), 0);
}

#[test]
fn test_failure_goes_straight_back_to_idle() {
    let mut machine = TransitionMachine::new();
    let ticket = machine.begin();
    assert!(machine.start_loading(ticket));
    assert!(machine.fail(ticket));
    assert_eq!(machine.phase(), Phase::Idle);
}

// transitions must follow the named order
#[test]
fn test_out_of_order_transitions_are_refused() {
    let mut machine = TransitionMachine::new();
    let ticket = machine.begin();
    assert!(!machine.start_fade_in(ticket));
    assert!(!machine.finish(ticket));
    assert!(!machine.fail(ticket));
    assert_eq!(machine.phase(), Phase::FadingOut);
}

// a newer navigation takes over; the old ticket can no longer move the machine
#[test]
fn test_new_navigation_supersedes_in_flight_one() {
    let mut machine = TransitionMachine::new();
    let old = machine.begin();
    assert!(machine.start_loading(old));

    let new = machine.begin();
    assert!(new > old);
    assert_eq!(machine.superseded_count(), 1);
    assert!(!machine.is_current(old));
    assert!(!machine.start_fade_in(old));
    assert!(!machine.fail(old));

    assert!(machine.start_loading(new));
    assert!(machine.start_fade_in(new));
    assert!(machine.finish(new));

    // starting from idle supersedes nothing
    machine.begin();
    assert_eq!(machine.superseded_count(), 1);
}

#[test]
fn test_phase_display_names() {
    assert_eq!(Phase::FadingOut.to_string(), "fading-out");
    assert_eq!(Phase::Idle.to_string(), "idle");
}
