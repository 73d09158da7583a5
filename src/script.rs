//! Button Scripts for Replay and Automated Testing
//!
//! Loads and plays back cycle-indexed button states, so protocol runs can
//! be reproduced without physical hardware.
//!
//! ## Script Format
//!
//! Simple CSV format:
//! ```text
//! # cycle,buttons
//! # buttons: UDLRABCSXYZM (Up,Down,Left,Right,A,B,C,Start,X,Y,Z,Mode), . = released
//! 0,............
//! 60,....A.......
//! 120,.....B......
//! ```

use crate::pad::ButtonState;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Maximum script size in bytes (50MB) to prevent OOM
const MAX_SCRIPT_SIZE: u64 = 50 * 1024 * 1024;

/// An input script containing cycle-indexed button states
#[derive(Debug, Default)]
pub struct InputScript {
    /// Map from cycle number to button state
    cycles: HashMap<u64, ButtonState>,
    /// Highest cycle number in the script
    pub max_cycle: u64,
}

impl InputScript {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a script from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(path).map_err(|e| format!("Failed to open input script: {}", e))?;

        // Check metadata size first for quick fail
        if let Ok(metadata) = file.metadata() {
            if metadata.len() > MAX_SCRIPT_SIZE {
                return Err(format!(
                    "Input script too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_SCRIPT_SIZE
                ));
            }
        }

        // Read with limit to prevent OOM from streams/lying metadata
        let mut buffer = Vec::new();
        file.take(MAX_SCRIPT_SIZE + 1)
            .read_to_end(&mut buffer)
            .map_err(|e| format!("Failed to read input script: {}", e))?;

        if buffer.len() as u64 > MAX_SCRIPT_SIZE {
            return Err(format!(
                "Input script too large: exceeds {} bytes",
                MAX_SCRIPT_SIZE
            ));
        }

        let content = String::from_utf8(buffer)
            .map_err(|e| format!("Input script is not valid UTF-8: {}", e))?;

        Self::parse(&content)
    }

    /// Parse a script from a string
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut script = Self::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() < 2 {
                return Err(format!("Line {}: expected at least 2 fields", line_num + 1));
            }

            let cycle: u64 = parts[0]
                .trim()
                .parse()
                .map_err(|_| format!("Line {}: invalid cycle number", line_num + 1))?;

            let buttons = parse_buttons(parts[1].trim());

            script.cycles.insert(cycle, buttons);
            script.max_cycle = script.max_cycle.max(cycle);
        }

        Ok(script)
    }

    /// Get the button state for a specific cycle
    pub fn get(&self, cycle: u64) -> Option<&ButtonState> {
        self.cycles.get(&cycle)
    }

    /// Insert a button state at a cycle
    pub fn insert(&mut self, cycle: u64, buttons: ButtonState) {
        self.cycles.insert(cycle, buttons);
        self.max_cycle = self.max_cycle.max(cycle);
    }

    /// Save script to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        use std::io::Write;
        let mut file =
            File::create(path).map_err(|e| format!("Failed to create input script: {}", e))?;

        writeln!(file, "# cycle,buttons").map_err(|e| e.to_string())?;

        // Sort cycles to ensure deterministic output
        let mut cycle_list: Vec<_> = self.cycles.iter().collect();
        cycle_list.sort_by_key(|(&c, _)| c);

        for (cycle, buttons) in cycle_list {
            writeln!(file, "{},{}", cycle, format_buttons(buttons)).map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}

/// Parse button string to ButtonState
/// Format: UDLRABCSXYZM, use '.' for released buttons
pub fn parse_buttons(s: &str) -> ButtonState {
    let mut state = ButtonState::default();
    let mut chars = s.chars();

    state.up = chars.next() == Some('U');
    state.down = chars.next() == Some('D');
    state.left = chars.next() == Some('L');
    state.right = chars.next() == Some('R');
    state.a = chars.next() == Some('A');
    state.b = chars.next() == Some('B');
    state.c = chars.next() == Some('C');
    state.start = chars.next() == Some('S');
    state.x = chars.next() == Some('X');
    state.y = chars.next() == Some('Y');
    state.z = chars.next() == Some('Z');
    state.mode = chars.next() == Some('M');

    state
}

/// Format a ButtonState in script notation (inverse of [`parse_buttons`])
pub fn format_buttons(state: &ButtonState) -> String {
    let letters = [
        (state.up, 'U'),
        (state.down, 'D'),
        (state.left, 'L'),
        (state.right, 'R'),
        (state.a, 'A'),
        (state.b, 'B'),
        (state.c, 'C'),
        (state.start, 'S'),
        (state.x, 'X'),
        (state.y, 'Y'),
        (state.z, 'Z'),
        (state.mode, 'M'),
    ];
    letters
        .iter()
        .map(|&(pressed, letter)| if pressed { letter } else { '.' })
        .collect()
}

/// Script player handling playback and recording
#[derive(Debug)]
pub struct ScriptPlayer {
    /// Currently loaded script
    script: Option<InputScript>,
    /// Current cycle number
    current_cycle: u64,
    /// Last applied state (for hold behavior)
    last_state: ButtonState,
    /// Recording mode
    recording: bool,
    /// Recorded states
    recorded: Vec<(u64, ButtonState)>,
}

impl Default for ScriptPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptPlayer {
    /// Create a new player
    pub fn new() -> Self {
        Self {
            script: None,
            current_cycle: 0,
            last_state: ButtonState::default(),
            recording: false,
            recorded: Vec::new(),
        }
    }

    /// Load an input script
    pub fn load_script<P: AsRef<Path>>(&mut self, path: P) -> Result<(), String> {
        self.set_script(InputScript::load(path)?);
        Ok(())
    }

    /// Set script directly
    pub fn set_script(&mut self, script: InputScript) {
        self.script = Some(script);
        self.current_cycle = 0;
        self.last_state = ButtonState::default();
    }

    /// Advance to the next cycle and return the button state
    pub fn advance_cycle(&mut self) -> ButtonState {
        if let Some(script) = &self.script {
            if let Some(&buttons) = script.get(self.current_cycle) {
                self.last_state = buttons;
            }
            // No entry for this cycle: hold last state
        }

        self.current_cycle += 1;
        self.last_state
    }

    /// Get current cycle number
    pub fn cycle(&self) -> u64 {
        self.current_cycle
    }

    /// Reset to cycle 0 and drop the script
    pub fn reset(&mut self) {
        self.current_cycle = 0;
        self.last_state = ButtonState::default();
        self.script = None;
    }

    /// Check if script playback is complete
    pub fn is_complete(&self) -> bool {
        if let Some(script) = &self.script {
            self.current_cycle > script.max_cycle
        } else {
            false
        }
    }

    /// Start recording
    pub fn start_recording(&mut self) {
        self.recording = true;
        self.recorded.clear();
    }

    /// Record a button state for the current cycle
    pub fn record(&mut self, buttons: ButtonState) {
        if self.recording {
            self.recorded.push((self.current_cycle, buttons));
        }
    }

    /// Stop recording and return the recorded script
    pub fn stop_recording(&mut self) -> InputScript {
        self.recording = false;
        let mut script = InputScript::new();
        for (cycle, buttons) in self.recorded.drain(..) {
            script.insert(cycle, buttons);
        }
        script
    }
}
