//! Runtime Plumbing Between the Polling Loop and the Watchdog
//!
//! On the original hardware the tracker runs in a tight main loop and the
//! watchdog in a timer interrupt, sharing state with the interrupt masked.
//! On a hosted target that split maps to a continuously-running polling
//! task and a dedicated timer thread, sharing a [`PadState`] behind a
//! mutex. Every read-modify-write of the state goes through the locked
//! operations here; the encoder itself works on the copy returned by the
//! same locked update, so it never takes the lock and its output is at
//! worst one sub-millisecond cycle stale.

use crate::hal::{ButtonSource, LineDriver, SelectLine};
use crate::pad::{PadMode, PadState, IDLE_TIMEOUT_TICKS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// Watchdog tick cadence (the timer interrupt period on real hardware).
pub const TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Protocol state shared between the polling loop and the watchdog thread.
pub type SharedPadState = Arc<Mutex<PadState>>;

/// Create a shared pad state from the initial TH reading.
pub fn shared_pad_state(initial_th: bool) -> SharedPadState {
    Arc::new(Mutex::new(PadState::new(initial_th)))
}

// A poisoned lock still holds a valid state; the writers never leave a
// partial update behind.
fn lock_state(state: &SharedPadState) -> MutexGuard<'_, PadState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Feed a TH sample to the tracker under the lock.
///
/// Returns the post-update state copy the encoder should use for this
/// cycle.
pub fn observe_th(state: &SharedPadState, th: bool) -> PadState {
    let mut pad = lock_state(state);
    let before = *pad;
    pad.observe_th(th);
    if pad.phase() != before.phase() {
        log::trace!("TH transition, phase {} -> {}", before.phase(), pad.phase());
    }
    if pad.mode() == PadMode::SixButton && before.mode() == PadMode::ThreeButton {
        log::debug!("six-button handshake complete");
    }
    *pad
}

/// Run one watchdog tick under the lock.
pub fn tick(state: &SharedPadState) {
    let mut pad = lock_state(state);
    let before = pad.mode();
    pad.tick();
    if before == PadMode::SixButton && pad.mode() == PadMode::ThreeButton {
        log::debug!(
            "TH idle for over {} ticks, falling back to three-button mode",
            IDLE_TIMEOUT_TICKS
        );
    }
}

/// Copy the current state under the lock (instrumentation only; the
/// polling loop uses the copy returned by [`observe_th`]).
pub fn snapshot(state: &SharedPadState) -> PadState {
    *lock_state(state)
}

/// The pad service: one select input, one button source, one line driver,
/// and the shared protocol state.
#[derive(Debug)]
pub struct PadService<S, B, D> {
    select: S,
    buttons: B,
    lines: D,
    state: SharedPadState,
}

impl<S: SelectLine, B: ButtonSource, D: LineDriver> PadService<S, B, D> {
    /// Wire up a service; the initial TH reading seeds the tracker.
    pub fn new(select: S, buttons: B, lines: D) -> Self {
        let state = shared_pad_state(select.level());
        Self {
            select,
            buttons,
            lines,
            state,
        }
    }

    /// Handle to the shared state, for the watchdog and instrumentation.
    pub fn state(&self) -> SharedPadState {
        Arc::clone(&self.state)
    }

    /// One polling-loop iteration: read TH, advance the tracker, snapshot
    /// the buttons, encode, drive all six lines.
    pub fn poll_once(&mut self) {
        let th = self.select.level();
        let pad = observe_th(&self.state, th);
        let snapshot = self.buttons.snapshot();
        let levels = pad.encode(th, &snapshot);
        self.lines.apply(&levels);
    }

    /// Run the polling loop until `running` clears.
    pub fn run(&mut self, running: &AtomicBool) {
        while running.load(Ordering::Relaxed) {
            self.poll_once();
        }
    }
}

/// The periodic tick source driving [`tick`] on a dedicated thread.
pub struct Watchdog {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Watchdog {
    /// Spawn the tick thread at `interval` cadence.
    pub fn spawn(state: SharedPadState, interval: Duration) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || {
            while flag.load(Ordering::Relaxed) {
                thread::sleep(interval);
                tick(&state);
            }
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the tick thread and wait for it to exit.
    pub fn stop(self) {
        // Drop does the work
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
