#![no_main]
use fightpad::script::InputScript;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Parsing must never panic; errors are fine
        let _ = InputScript::parse(text);
    }
});
