//! Console-Side Simulation Harness
//!
//! Drives the pad the way a Genesis I/O port does: toggle TH, sample the
//! six data lines as an active-low data-port byte (bit 0 = Up/Z through
//! bit 5 = C/Start, bit 6 echoing TH). [`Console`] runs the protocol in
//! lockstep against a [`PadState`]; the wire types ([`ThWire`],
//! [`ButtonPanel`], [`LineProbe`]) implement the [`crate::hal`]
//! capabilities over shared memory so a full [`crate::runtime::PadService`]
//! can be exercised across threads.

use crate::hal::{ButtonSource, LineDriver, SelectLine};
use crate::pad::{Button, ButtonState, DataLine, LineLevels, PadMode, PadState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Lockstep console harness: owns the pad state machine it talks to.
#[derive(Debug)]
pub struct Console {
    pad: PadState,
    /// Buttons held on the simulated pad
    pub buttons: ButtonState,
    th: bool,
}

impl Console {
    /// Console at rest drives TH high.
    pub fn new() -> Self {
        Self {
            pad: PadState::new(true),
            buttons: ButtonState::new(),
            th: true,
        }
    }

    pub fn pad(&self) -> &PadState {
        &self.pad
    }

    pub fn th(&self) -> bool {
        self.th
    }

    /// Drive TH to `level`; the pad polls fast enough to see every change.
    pub fn set_th(&mut self, level: bool) {
        self.th = level;
        self.pad.observe_th(level);
    }

    pub fn toggle_th(&mut self) {
        self.set_th(!self.th);
    }

    /// Let `ticks` watchdog periods elapse with no TH activity.
    pub fn idle(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.pad.tick();
        }
    }

    /// Sample the data port as the console reads it right now.
    ///
    /// Active-low: a pressed/asserted line reads 0, a released line is
    /// pulled high and reads 1.
    pub fn data_byte(&self) -> u8 {
        let levels = self.pad.encode(self.th, &self.buttons);
        let mut data = 0x3F;
        for (bit, line) in DataLine::ALL.iter().enumerate() {
            if levels.asserted(*line) {
                data &= !(1 << bit);
            }
        }
        if self.th {
            data |= 0x40;
        }
        data
    }

    /// Run one identification burst (four TH pulses, eight transitions)
    /// and report what kind of pad the console would detect.
    ///
    /// A six-button pad answers the identification pattern only in bursts
    /// after the arming one, so detection takes two bursts inside one idle
    /// window; the first call on a fresh pad reports three-button.
    pub fn identify(&mut self) -> PadMode {
        let mut six_button = false;
        for _ in 0..8 {
            self.toggle_th();
            // Identification phase: all four direction bits read low
            if self.pad.phase() == 4 && self.data_byte() & 0x0F == 0 {
                six_button = true;
            }
        }
        if six_button {
            PadMode::SixButton
        } else {
            PadMode::ThreeButton
        }
    }

    /// Read all twelve buttons over one full burst.
    ///
    /// The pad must already be in six-button mode (see [`Console::identify`]).
    pub fn read_buttons(&mut self) -> ButtonState {
        let mut out = ButtonState::new();
        for _ in 0..8 {
            self.toggle_th();
            let data = self.data_byte();
            match self.pad.phase() {
                1 => {
                    out.up = data & 0x01 == 0;
                    out.down = data & 0x02 == 0;
                    out.left = data & 0x04 == 0;
                    out.right = data & 0x08 == 0;
                    out.b = data & 0x10 == 0;
                    out.c = data & 0x20 == 0;
                }
                2 => {
                    out.a = data & 0x10 == 0;
                    out.start = data & 0x20 == 0;
                }
                5 => {
                    out.z = data & 0x01 == 0;
                    out.y = data & 0x02 == 0;
                    out.x = data & 0x04 == 0;
                    out.mode = data & 0x08 == 0;
                }
                _ => {}
            }
        }
        out
    }

    /// Classic three-button read: sample both TH halves.
    ///
    /// An unaware console polls at frame rate, slower than the idle
    /// window; call [`Console::idle`] between reads to model that, or the
    /// accumulated transitions will eventually arm six-button mode.
    pub fn read_three_button(&mut self) -> ButtonState {
        let mut out = ButtonState::new();

        self.set_th(true);
        let high = self.data_byte();
        out.up = high & 0x01 == 0;
        out.down = high & 0x02 == 0;
        out.left = high & 0x04 == 0;
        out.right = high & 0x08 == 0;
        out.b = high & 0x10 == 0;
        out.c = high & 0x20 == 0;

        self.set_th(false);
        let low = self.data_byte();
        out.a = low & 0x10 == 0;
        out.start = low & 0x20 == 0;

        out
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared TH wire between a console thread and the pad service.
#[derive(Debug, Clone)]
pub struct ThWire(Arc<AtomicBool>);

impl ThWire {
    pub fn new(level: bool) -> Self {
        Self(Arc::new(AtomicBool::new(level)))
    }

    pub fn set(&self, level: bool) {
        self.0.store(level, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl SelectLine for ThWire {
    fn level(&self) -> bool {
        self.get()
    }
}

/// Shared button panel, pressable from any thread.
#[derive(Debug, Clone, Default)]
pub struct ButtonPanel(Arc<Mutex<ButtonState>>);

impl ButtonPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, button: Button) {
        self.set(button, true);
    }

    pub fn release(&self, button: Button) {
        self.set(button, false);
    }

    pub fn set(&self, button: Button, pressed: bool) {
        if let Ok(mut state) = self.0.lock() {
            state.set(button, pressed);
        }
    }

    pub fn set_state(&self, new_state: ButtonState) {
        if let Ok(mut state) = self.0.lock() {
            *state = new_state;
        }
    }

    pub fn state(&self) -> ButtonState {
        self.0.lock().map(|state| *state).unwrap_or_default()
    }
}

impl ButtonSource for ButtonPanel {
    fn pressed(&self, button: Button) -> bool {
        self.state().pressed(button)
    }

    /// One lock per cycle instead of twelve
    fn snapshot(&self) -> ButtonState {
        self.state()
    }
}

/// Captures the six line levels the pad service last drove.
#[derive(Debug, Clone, Default)]
pub struct LineProbe(Arc<Mutex<LineLevels>>);

impl LineProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> LineLevels {
        self.0.lock().map(|levels| *levels).unwrap_or_default()
    }
}

impl LineDriver for LineProbe {
    fn set(&mut self, line: DataLine, asserted: bool) {
        if let Ok(mut levels) = self.0.lock() {
            levels.set(line, asserted);
        }
    }
}
