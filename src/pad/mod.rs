//! Sega Six-Button Pad Protocol Core
//!
//! This module implements the peripheral side of the Genesis/Mega Drive
//! controller protocol, as produced by the 315-5638 multiplexer inside
//! Sega's Fighting Pad 6B: the console drives the TH select line and the
//! pad answers on six shared, active-low data lines.
//!
//! ## Protocol summary
//!
//! A console that is not six-button aware holds TH at one level or toggles
//! it slowly; the pad then behaves as a plain three-button pad. A
//! six-button aware console toggles TH through four rapid pulses (eight
//! level changes). The pad counts those transitions with a phase counter
//! and, once the counter wraps a full cycle, switches to six-button mode,
//! where two of the eight phases carry the identification pattern and the
//! extended X/Y/Z/Mode buttons.
//!
//! | Phase | Up/Z, Down/Y     | Left/X, Right/Mode | B/A, C/Start |
//! |:------|:-----------------|:-------------------|:-------------|
//! | 0, 2  | Up, Down         | forced low         | A, Start     |
//! | 1, 3  | Up, Down         | Left, Right        | B, C         |
//! | 4     | forced low       | forced low         | A, Start     |
//! | 5     | Z, Y             | X, Mode            | B, C         |
//! | 6     | Up, Down         | forced low         | A, Start     |
//! | 7     | Up, Down         | Left, Right        | B, C         |
//!
//! A watchdog tick at ~1 ms cadence counts time since the last TH
//! transition; prolonged silence drops the pad back to three-button mode
//! so a stalled or unaware console never sees a half-finished handshake.

use crate::debugger::Debuggable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of TH transitions in a full handshake cycle.
pub const PHASE_COUNT: u8 = 8;

/// Watchdog ticks (~1 ms each) without a TH transition before the pad
/// falls back to three-button mode.
pub const IDLE_TIMEOUT_TICKS: u32 = 12;

/// Logical buttons of a six-button pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    C,
    Start,
    X,
    Y,
    Z,
    Mode,
}

impl Button {
    /// All twelve buttons, in snapshot order.
    pub const ALL: [Button; 12] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::C,
        Button::Start,
        Button::X,
        Button::Y,
        Button::Z,
        Button::Mode,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::A => "a",
            Button::B => "b",
            Button::C => "c",
            Button::Start => "start",
            Button::X => "x",
            Button::Y => "y",
            Button::Z => "z",
            Button::Mode => "mode",
        }
    }
}

/// Button state snapshot for one output cycle (true = pressed).
///
/// The polling loop takes one snapshot per cycle so a button edge in the
/// middle of an encode cannot split across the six output lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    /// D-pad Up
    pub up: bool,
    /// D-pad Down
    pub down: bool,
    /// D-pad Left
    pub left: bool,
    /// D-pad Right
    pub right: bool,
    /// A button
    pub a: bool,
    /// B button
    pub b: bool,
    /// C button
    pub c: bool,
    /// Start button
    pub start: bool,

    // 6-button extension
    /// X button (6-button only)
    pub x: bool,
    /// Y button (6-button only)
    pub y: bool,
    /// Z button (6-button only)
    pub z: bool,
    /// Mode button (6-button only)
    pub mode: bool,
}

impl ButtonState {
    /// Create a new state with no buttons pressed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::A => self.a,
            Button::B => self.b,
            Button::C => self.c,
            Button::Start => self.start,
            Button::X => self.x,
            Button::Y => self.y,
            Button::Z => self.z,
            Button::Mode => self.mode,
        }
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Up => self.up = pressed,
            Button::Down => self.down = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
            Button::A => self.a = pressed,
            Button::B => self.b = pressed,
            Button::C => self.c = pressed,
            Button::Start => self.start = pressed,
            Button::X => self.x = pressed,
            Button::Y => self.y = pressed,
            Button::Z => self.z = pressed,
            Button::Mode => self.mode = pressed,
        }
    }

    /// Clear all buttons
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The six shared data lines between pad and console.
///
/// Each line carries two logical buttons, multiplexed by the TH sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataLine {
    /// Up / Z
    UpZ,
    /// Down / Y
    DownY,
    /// Left / X
    LeftX,
    /// Right / Mode
    RightMode,
    /// B / A
    BA,
    /// C / Start
    CStart,
}

impl DataLine {
    /// All six lines, in data-port bit order (bit 0 first).
    pub const ALL: [DataLine; 6] = [
        DataLine::UpZ,
        DataLine::DownY,
        DataLine::LeftX,
        DataLine::RightMode,
        DataLine::BA,
        DataLine::CStart,
    ];
}

/// Output levels for the six data lines (true = asserted = electrically low).
///
/// Levels are rebuilt from scratch on every encode; a line is never carried
/// over from a previous phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineLevels {
    pub up_z: bool,
    pub down_y: bool,
    pub left_x: bool,
    pub right_mode: bool,
    pub b_a: bool,
    pub c_start: bool,
}

impl LineLevels {
    /// All six lines released (pulled high by the console)
    pub fn released() -> Self {
        Self::default()
    }

    pub fn asserted(&self, line: DataLine) -> bool {
        match line {
            DataLine::UpZ => self.up_z,
            DataLine::DownY => self.down_y,
            DataLine::LeftX => self.left_x,
            DataLine::RightMode => self.right_mode,
            DataLine::BA => self.b_a,
            DataLine::CStart => self.c_start,
        }
    }

    pub fn set(&mut self, line: DataLine, asserted: bool) {
        match line {
            DataLine::UpZ => self.up_z = asserted,
            DataLine::DownY => self.down_y = asserted,
            DataLine::LeftX => self.left_x = asserted,
            DataLine::RightMode => self.right_mode = asserted,
            DataLine::BA => self.b_a = asserted,
            DataLine::CStart => self.c_start = asserted,
        }
    }
}

/// Pad operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadMode {
    /// Plain three-button pad (original)
    ThreeButton,
    /// Six-button pad, handshake completed
    SixButton,
}

impl Default for PadMode {
    fn default() -> Self {
        PadMode::ThreeButton
    }
}

/// Protocol state shared between the polling loop and the watchdog tick.
///
/// `phase` stays in [0,7] by modulo arithmetic; `mode` becomes
/// [`PadMode::SixButton`] only when the phase counter wraps via a TH
/// transition and [`PadMode::ThreeButton`] only via the watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadState {
    phase: u8,
    mode: PadMode,
    /// Last observed TH level
    prev_th: bool,
    /// Ticks elapsed since the last TH transition
    idle_ticks: u32,
}

impl PadState {
    /// Create the power-on state from the initial TH reading.
    pub fn new(initial_th: bool) -> Self {
        Self {
            phase: 0,
            mode: PadMode::ThreeButton,
            prev_th: initial_th,
            idle_ticks: 0,
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn mode(&self) -> PadMode {
        self.mode
    }

    /// Feed the current TH level to the tracker.
    ///
    /// Any level change counts as a transition (the console's handshake
    /// toggles TH through four rapid pulses, eight transitions total):
    /// the transition resets the idle counter and advances the phase;
    /// wrapping a full cycle completes the handshake. Repeated calls with
    /// an unchanged level do nothing.
    ///
    /// Caller holds the shared-state lock; the compare-and-update must not
    /// interleave with [`PadState::tick`].
    pub fn observe_th(&mut self, th: bool) {
        if th != self.prev_th {
            self.prev_th = th;
            self.idle_ticks = 0;
            self.phase = (self.phase + 1) % PHASE_COUNT;
            if self.phase == 0 {
                self.mode = PadMode::SixButton;
            }
        }
    }

    /// Periodic watchdog tick (~1 ms cadence).
    ///
    /// More than [`IDLE_TIMEOUT_TICKS`] ticks without a TH transition force
    /// the pad back to three-button mode, so an unaware console sees
    /// correct three-button behavior and a desynchronized handshake
    /// self-heals within one idle window. Only a TH transition resets the
    /// idle counter.
    ///
    /// Caller holds the shared-state lock; see [`PadState::observe_th`].
    pub fn tick(&mut self) {
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        if self.idle_ticks > IDLE_TIMEOUT_TICKS {
            self.phase = 0;
            self.mode = PadMode::ThreeButton;
        }
    }

    /// Encode the six output line levels for one cycle.
    ///
    /// Pure and total: defined for every mode, phase, TH level, and button
    /// combination. All lines start released and are selectively asserted.
    /// In three-button mode the view is selected by the live TH level; in
    /// six-button mode it is selected by the phase counter alone (the
    /// phase parity already mirrors the TH half-pulse that produced it).
    pub fn encode(&self, th: bool, buttons: &ButtonState) -> LineLevels {
        let mut lines = LineLevels::released();

        match self.mode {
            PadMode::ThreeButton => {
                // Up/Down are exposed on both TH halves
                lines.up_z = buttons.up;
                lines.down_y = buttons.down;
                if th {
                    lines.left_x = buttons.left;
                    lines.right_mode = buttons.right;
                    lines.b_a = buttons.b;
                    lines.c_start = buttons.c;
                } else {
                    // Left/Right forced low: the classic pad-present pattern
                    lines.left_x = true;
                    lines.right_mode = true;
                    lines.b_a = buttons.a;
                    lines.c_start = buttons.start;
                }
            }
            PadMode::SixButton => match self.phase {
                0 | 2 | 6 => {
                    lines.up_z = buttons.up;
                    lines.down_y = buttons.down;
                    lines.left_x = true;
                    lines.right_mode = true;
                    lines.b_a = buttons.a;
                    lines.c_start = buttons.start;
                }
                4 => {
                    // Identification phase: all four direction lines low
                    lines.up_z = true;
                    lines.down_y = true;
                    lines.left_x = true;
                    lines.right_mode = true;
                    lines.b_a = buttons.a;
                    lines.c_start = buttons.start;
                }
                5 => {
                    // Extended read: X/Y/Z/Mode multiplexed onto the
                    // direction lines
                    lines.up_z = buttons.z;
                    lines.down_y = buttons.y;
                    lines.left_x = buttons.x;
                    lines.right_mode = buttons.mode;
                    lines.b_a = buttons.b;
                    lines.c_start = buttons.c;
                }
                // High half-pulses (1, 3, 7): same view as three-button TH=1
                _ => {
                    lines.up_z = buttons.up;
                    lines.down_y = buttons.down;
                    lines.left_x = buttons.left;
                    lines.right_mode = buttons.right;
                    lines.b_a = buttons.b;
                    lines.c_start = buttons.c;
                }
            },
        }

        lines
    }
}

impl Default for PadState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Debuggable for PadState {
    fn read_state(&self) -> Value {
        serde_json::to_value(self).unwrap()
    }

    fn write_state(&mut self, state: &Value) {
        if let Ok(mut new_state) = serde_json::from_value::<PadState>(state.clone()) {
            new_state.phase %= PHASE_COUNT;
            *self = new_state;
        }
    }
}

impl Debuggable for ButtonState {
    fn read_state(&self) -> Value {
        serde_json::to_value(self).unwrap()
    }

    fn write_state(&mut self, state: &Value) {
        if let Ok(new_state) = serde_json::from_value(state.clone()) {
            *self = new_state;
        }
    }
}


#[cfg(test)]
mod tests_encoder;


#[cfg(test)]
mod tests_watchdog;
