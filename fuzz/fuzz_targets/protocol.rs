#![no_main]
use fightpad::pad::{ButtonState, PadState, PHASE_COUNT};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut pad = PadState::new(true);
    let mut th = true;
    let mut buttons = ButtonState::new();

    for &byte in data {
        match byte & 0x07 {
            0 => {
                th = !th;
                pad.observe_th(th);
            }
            1 => pad.tick(),
            2 => {
                // Same-level poll, must be a no-op on the phase
                let before = pad.phase();
                pad.observe_th(th);
                assert_eq!(pad.phase(), before);
            }
            3 => {
                buttons.up = byte & 0x08 != 0;
                buttons.a = byte & 0x10 != 0;
                buttons.x = byte & 0x20 != 0;
                buttons.mode = byte & 0x40 != 0;
            }
            _ => {
                // Encode is total for both TH levels
                let _ = pad.encode(th, &buttons);
                let _ = pad.encode(!th, &buttons);
            }
        }

        assert!(pad.phase() < PHASE_COUNT);
    }
});
