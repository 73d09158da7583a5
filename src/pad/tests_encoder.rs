//! Output encoder tests: the three-button and six-button truth tables.

use super::test_utils::{buttons_from_mask, six_button_pad_at};
use super::*;

#[test]
fn test_three_button_th_high() {
    let pad = PadState::new(true);
    let mut buttons = ButtonState::new();
    buttons.up = true;
    buttons.left = true;
    buttons.b = true;

    let lines = pad.encode(true, &buttons);
    assert!(lines.up_z);
    assert!(!lines.down_y);
    assert!(lines.left_x);
    assert!(!lines.right_mode);
    assert!(lines.b_a);
    assert!(!lines.c_start);
}

#[test]
fn test_three_button_th_low_forces_left_right() {
    let pad = PadState::new(true);
    let mut buttons = ButtonState::new();
    buttons.a = true;

    let lines = pad.encode(false, &buttons);
    // Left/Right forced low regardless of the d-pad
    assert!(lines.left_x);
    assert!(lines.right_mode);
    assert!(lines.b_a);
    assert!(!lines.c_start);
}

#[test]
fn test_three_button_up_down_on_both_halves() {
    let pad = PadState::new(true);
    let mut buttons = ButtonState::new();
    buttons.up = true;
    buttons.down = true;

    for th in [true, false] {
        let lines = pad.encode(th, &buttons);
        assert!(lines.up_z, "Up must show with TH={}", th);
        assert!(lines.down_y, "Down must show with TH={}", th);
    }
}

#[test]
fn test_three_button_b_c_only_on_high_half() {
    let pad = PadState::new(true);
    let mut buttons = ButtonState::new();
    buttons.b = true;
    buttons.c = true;

    let high = pad.encode(true, &buttons);
    assert!(high.b_a);
    assert!(high.c_start);

    // Low half carries A/Start instead
    let low = pad.encode(false, &buttons);
    assert!(!low.b_a);
    assert!(!low.c_start);
}

#[test]
fn test_three_button_exhaustive_truth_table() {
    // Every one of the 4096 button combinations, both TH halves
    let pad = PadState::new(true);
    for mask in 0u16..(1 << 12) {
        let buttons = buttons_from_mask(mask);

        let high = pad.encode(true, &buttons);
        assert_eq!(high.up_z, buttons.up);
        assert_eq!(high.down_y, buttons.down);
        assert_eq!(high.left_x, buttons.left);
        assert_eq!(high.right_mode, buttons.right);
        assert_eq!(high.b_a, buttons.b);
        assert_eq!(high.c_start, buttons.c);

        let low = pad.encode(false, &buttons);
        assert_eq!(low.up_z, buttons.up);
        assert_eq!(low.down_y, buttons.down);
        assert!(low.left_x);
        assert!(low.right_mode);
        assert_eq!(low.b_a, buttons.a);
        assert_eq!(low.c_start, buttons.start);
    }
}

#[test]
fn test_six_button_standard_low_phases() {
    let mut buttons = ButtonState::new();
    buttons.up = true;
    buttons.left = true;
    buttons.a = true;
    buttons.c = true;

    for phase in [0, 2, 6] {
        let (pad, th) = six_button_pad_at(phase);
        let lines = pad.encode(th, &buttons);
        assert!(lines.up_z, "phase {}", phase);
        assert!(!lines.down_y, "phase {}", phase);
        assert!(lines.left_x, "phase {} forces Left", phase);
        assert!(lines.right_mode, "phase {} forces Right", phase);
        assert!(lines.b_a, "phase {} carries A", phase);
        assert!(!lines.c_start, "phase {} carries Start", phase);
    }
}

#[test]
fn test_six_button_standard_high_phases() {
    let mut buttons = ButtonState::new();
    buttons.down = true;
    buttons.right = true;
    buttons.b = true;

    for phase in [1, 3, 7] {
        let (pad, th) = six_button_pad_at(phase);
        let lines = pad.encode(th, &buttons);
        assert!(!lines.up_z, "phase {}", phase);
        assert!(lines.down_y, "phase {}", phase);
        assert!(!lines.left_x, "phase {}", phase);
        assert!(lines.right_mode, "phase {}", phase);
        assert!(lines.b_a, "phase {} carries B", phase);
        assert!(!lines.c_start, "phase {} carries C", phase);
    }
}

#[test]
fn test_six_button_identification_phase() {
    // Scenario: phase 4, TH low, no buttons pressed
    let (pad, _) = six_button_pad_at(4);
    let buttons = ButtonState::new();

    let lines = pad.encode(false, &buttons);
    assert!(lines.up_z);
    assert!(lines.down_y);
    assert!(lines.left_x);
    assert!(lines.right_mode);
    // A/Start both released, so both lines float high
    assert!(!lines.b_a);
    assert!(!lines.c_start);
}

#[test]
fn test_six_button_extended_phase() {
    // Scenario: phase 5, TH high, X pressed, Mode/Y/Z/B/C released
    let (pad, _) = six_button_pad_at(5);
    let mut buttons = ButtonState::new();
    buttons.x = true;

    let lines = pad.encode(true, &buttons);
    assert!(lines.left_x, "X rides the Left/X line");
    assert!(!lines.up_z);
    assert!(!lines.down_y);
    assert!(!lines.right_mode);
    assert!(!lines.b_a);
    assert!(!lines.c_start);
}

#[test]
fn test_six_button_extended_phase_ignores_dpad() {
    let (pad, _) = six_button_pad_at(5);
    let mut buttons = ButtonState::new();
    buttons.up = true;
    buttons.down = true;
    buttons.left = true;
    buttons.right = true;

    // The direction lines carry only Z/Y/X/Mode in the extended phase
    let lines = pad.encode(true, &buttons);
    assert_eq!(lines, LineLevels::released());
}

#[test]
fn test_six_button_extended_mapping() {
    let (pad, _) = six_button_pad_at(5);
    let mut buttons = ButtonState::new();
    buttons.z = true;
    buttons.y = true;
    buttons.mode = true;

    let lines = pad.encode(true, &buttons);
    assert!(lines.up_z, "Z rides the Up/Z line");
    assert!(lines.down_y, "Y rides the Down/Y line");
    assert!(!lines.left_x);
    assert!(lines.right_mode, "Mode rides the Right/Mode line");
}

#[test]
fn test_encode_rebuilds_lines_every_cycle() {
    let pad = PadState::new(true);
    let mut buttons = ButtonState::new();
    buttons.c = true;

    let first = pad.encode(true, &buttons);
    assert!(first.c_start);

    // Release between cycles: nothing sticks from the previous encode
    buttons.c = false;
    let second = pad.encode(true, &buttons);
    assert_eq!(second, LineLevels::released());
}

#[test]
fn test_encode_is_pure() {
    let (pad, th) = six_button_pad_at(3);
    let buttons = buttons_from_mask(0b1010_0110_0101);

    let before = pad;
    let first = pad.encode(th, &buttons);
    let second = pad.encode(th, &buttons);
    assert_eq!(first, second);
    assert_eq!(pad, before);
}
