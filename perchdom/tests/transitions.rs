use perchdom::{Easing, StyleProp, TransitionConfig};
use std::time::Duration;

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_linear() {
    assert_eq!(Easing::Linear.apply(0.0), 0.0);
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::Linear.apply(1.0), 1.0);
}

#[test]
fn test_easing_ease_in_out() {
    assert_eq!(Easing::EaseInOut.apply(0.0), 0.0);
    assert_eq!(Easing::EaseInOut.apply(1.0), 1.0);
    assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    // Slow start, slow end
    assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    assert!(Easing::EaseInOut.apply(0.75) > 0.75);
}

#[test]
fn test_easing_monotonic() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        let mut prev = 0.0;
        for i in 1..=10 {
            let t = i as f64 / 10.0;
            let val = easing.apply(t);
            assert!(val >= prev, "{:?} not monotonic at t={}", easing, t);
            prev = val;
        }
    }
}

// =============================================================================
// Style Declaration Tests
// =============================================================================

#[test]
fn test_transition_declaration_display() {
    let config = TransitionConfig::new(Duration::from_millis(150), Easing::EaseInOut);
    assert_eq!(
        StyleProp::Transition(config).to_string(),
        "transition: height 150ms ease-in-out"
    );
}

#[test]
fn test_length_declaration_display() {
    assert_eq!(StyleProp::Height(300.0).to_string(), "height: 300px");
    assert_eq!(StyleProp::Top(0.0).to_string(), "top: 0px");
}
