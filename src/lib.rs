//! Fightpad - a Sega six-button pad protocol core
//!
//! This library implements the peripheral side of the Genesis/Mega Drive
//! controller protocol: the TH-driven phase tracker, the idle watchdog,
//! and the encoder that multiplexes twelve logical buttons onto six
//! shared data lines.

pub mod debugger;
pub mod hal;
pub mod pad;
pub mod runtime;
pub mod script;
pub mod sim;

pub use pad::{Button, ButtonState, DataLine, LineLevels, PadMode, PadState};
pub use runtime::PadService;
