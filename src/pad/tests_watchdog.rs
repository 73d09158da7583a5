//! Idle watchdog tests: fallback timing and its interaction with the
//! tracker.

use super::test_utils::six_button_pad_at;
use super::*;

#[test]
fn test_no_fallback_at_threshold() {
    let (mut pad, _) = six_button_pad_at(3);

    for _ in 0..IDLE_TIMEOUT_TICKS {
        pad.tick();
    }
    // Exactly 12 ticks: still inside the window
    assert_eq!(pad.phase(), 3);
    assert_eq!(pad.mode(), PadMode::SixButton);
}

#[test]
fn test_fallback_one_tick_past_threshold() {
    let (mut pad, _) = six_button_pad_at(3);

    for _ in 0..=IDLE_TIMEOUT_TICKS {
        pad.tick();
    }
    // The 13th silent tick forces three-button mode
    assert_eq!(pad.phase(), 0);
    assert_eq!(pad.mode(), PadMode::ThreeButton);
}

#[test]
fn test_transition_inside_window_defers_fallback() {
    let (mut pad, th) = six_button_pad_at(2);

    for _ in 0..10 {
        pad.tick();
    }
    pad.observe_th(!th);
    assert_eq!(pad.phase(), 3);

    // The transition restarted the window: 12 more ticks stay armed
    for _ in 0..IDLE_TIMEOUT_TICKS {
        pad.tick();
    }
    assert_eq!(pad.mode(), PadMode::SixButton);

    pad.tick();
    assert_eq!(pad.mode(), PadMode::ThreeButton);
}

#[test]
fn test_power_on_idle_is_idempotent() {
    // Scenario: TH never transitions after power-on
    let mut pad = PadState::new(true);

    for _ in 0..100 {
        pad.tick();
    }
    assert_eq!(pad.phase(), 0);
    assert_eq!(pad.mode(), PadMode::ThreeButton);
}

#[test]
fn test_watchdog_never_arms_six_button() {
    // Park mid-handshake, then let the window expire
    let mut pad = PadState::new(true);
    let mut th = true;
    for _ in 0..7 {
        th = !th;
        pad.observe_th(th);
    }
    assert_eq!(pad.phase(), 7);

    for _ in 0..=IDLE_TIMEOUT_TICKS {
        pad.tick();
    }
    assert_eq!(pad.phase(), 0);
    assert_eq!(pad.mode(), PadMode::ThreeButton);

    // The wrap the watchdog performed must not count as a handshake
    th = !th;
    pad.observe_th(th);
    assert_eq!(pad.phase(), 1);
    assert_eq!(pad.mode(), PadMode::ThreeButton);
}

#[test]
fn test_fallback_takes_effect_on_next_encode() {
    // Scenario: six-button active, console goes silent
    let (mut pad, _) = six_button_pad_at(0);
    let mut buttons = ButtonState::new();
    buttons.left = true;

    // Phase 0 forces Right low even though the button is up
    let armed = pad.encode(true, &buttons);
    assert!(armed.right_mode);
    assert!(!armed.b_a);

    for _ in 0..=IDLE_TIMEOUT_TICKS {
        pad.tick();
    }

    // The very next encode uses the three-button table, no new handshake
    let fallen_back = pad.encode(true, &buttons);
    assert!(fallen_back.left_x);
    assert!(!fallen_back.right_mode);
}

#[test]
fn test_idle_counter_saturates() {
    let mut pad = PadState::new(true);
    pad.idle_ticks = u32::MAX - 1;

    pad.tick();
    pad.tick();
    pad.tick();
    assert_eq!(pad.idle_ticks, u32::MAX);
    assert_eq!(pad.mode(), PadMode::ThreeButton);
}

#[test]
fn test_fallback_holds_while_silent() {
    let (mut pad, _) = six_button_pad_at(6);

    for _ in 0..1000 {
        pad.tick();
    }
    assert_eq!(pad.phase(), 0);
    assert_eq!(pad.mode(), PadMode::ThreeButton);
}
