//! Capability Interfaces to the Hardware Layer
//!
//! The protocol core never touches ports or registers directly. Board
//! bring-up code (pin directions, pull-ups, timer configuration) lives
//! outside this crate and hands the core these capabilities: a readable
//! select line, a debounced button source, and a driver for the six
//! shared data lines. Test doubles implementing the same traits live in
//! [`crate::sim`].

use crate::pad::{Button, ButtonState, DataLine, LineLevels};

/// The console-driven TH/SELECT input.
pub trait SelectLine {
    /// Current TH level (true = electrically high).
    fn level(&self) -> bool;
}

/// Any closure reading a level works as a select line.
impl<F: Fn() -> bool> SelectLine for F {
    fn level(&self) -> bool {
        self()
    }
}

/// Source of the twelve logical button states.
///
/// Inputs are assumed debounced and pulled to a defined level upstream.
pub trait ButtonSource {
    /// Whether a logical button is currently pressed.
    fn pressed(&self, button: Button) -> bool;

    /// Read all twelve buttons once, for one output cycle.
    fn snapshot(&self) -> ButtonState {
        let mut state = ButtonState::new();
        for button in Button::ALL {
            state.set(button, self.pressed(button));
        }
        state
    }
}

/// A fixed snapshot is itself a button source.
impl ButtonSource for ButtonState {
    fn pressed(&self, button: Button) -> bool {
        ButtonState::pressed(self, button)
    }

    fn snapshot(&self) -> ButtonState {
        *self
    }
}

/// Driver for the six shared data lines.
///
/// Asserted must map to the electrically low state the console protocol
/// expects; released must present a level the console's pull-up reads as
/// high.
pub trait LineDriver {
    /// Drive one data line.
    fn set(&mut self, line: DataLine, asserted: bool);

    /// Rewrite all six lines from a freshly encoded set of levels.
    fn apply(&mut self, levels: &LineLevels) {
        for line in DataLine::ALL {
            self.set(line, levels.asserted(line));
        }
    }
}
