// Playback controller
// Owns the loaded trace and cursor; a spawned ticker thread drives play()

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::projection::{project, ProjectedState};
use crate::trace::Trace;

/// Fastest supported tick
pub const MIN_STEP_INTERVAL_MS: u64 = 100;
/// Slowest supported tick
pub const MAX_STEP_INTERVAL_MS: u64 = 2000;
/// Tick used until the caller sets a speed
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 500;

struct PlaybackState {
    trace: Option<Arc<Trace>>,
    cursor: usize,
    playing: bool,
    /// Bumped on every load, on every play that starts a ticker, and on
    /// drop. A ticker captures the epoch at spawn time and exits as soon as
    /// the stored value moves on, so a superseded tick can never advance
    /// the cursor, whatever the playing flag says by then.
    epoch: u64,
}

struct Shared {
    state: Mutex<PlaybackState>,
    speed_ms: AtomicU64,
}

/// Thread-safe playback state shared with the ticker thread
///
/// All cursor movement happens under the one mutex; the ticker re-checks
/// both the epoch and the playing flag inside the lock before advancing.
pub struct PlaybackController {
    shared: Arc<Shared>,
}

/// Read-only view of where playback currently stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub trace_id: Option<Uuid>,
    pub cursor: usize,
    pub total: usize,
    pub playing: bool,
    pub speed_ms: u64,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PlaybackState {
                    trace: None,
                    cursor: 0,
                    playing: false,
                    epoch: 0,
                }),
                speed_ms: AtomicU64::new(DEFAULT_STEP_INTERVAL_MS),
            }),
        }
    }

    /// Install a new trace and rewind to the first step
    ///
    /// The epoch bump, stop, and cursor reset happen under a single lock,
    /// so no tick from the previous trace can interleave.
    pub fn load(&self, trace: Trace) {
        let mut state = self.shared.state.lock().unwrap();
        state.epoch += 1;
        state.playing = false;
        state.cursor = 0;
        log::info!(
            "Loaded {} trace {} with {} steps",
            trace.algorithm().display_name(),
            trace.id(),
            trace.len()
        );
        state.trace = Some(Arc::new(trace));
    }

    /// Start advancing the cursor once per tick
    ///
    /// A no-op while already playing or with nothing loaded. Playing from
    /// the last step restarts from the beginning. Every call that starts a
    /// ticker begins a new epoch, so a ticker surviving from a paused run
    /// exits on its next wake instead of advancing alongside the new one.
    pub fn play(&self) {
        let epoch = {
            let mut state = self.shared.state.lock().unwrap();
            let total = match &state.trace {
                Some(trace) => trace.len(),
                None => return,
            };
            if state.playing {
                return;
            }
            if state.cursor + 1 >= total {
                state.cursor = 0;
            }
            state.playing = true;
            state.epoch += 1;
            state.epoch
        };
        log::info!("Playback started");

        let shared = Arc::clone(&self.shared);
        thread::spawn(move || loop {
            let interval = shared.speed_ms.load(Ordering::Relaxed);
            thread::sleep(Duration::from_millis(interval));

            let mut state = shared.state.lock().unwrap();
            if state.epoch != epoch || !state.playing {
                return;
            }
            let total = match &state.trace {
                Some(trace) => trace.len(),
                None => return,
            };
            if state.cursor + 1 < total {
                state.cursor += 1;
            }
            if state.cursor + 1 >= total {
                state.playing = false;
                return;
            }
        });
    }

    /// Stop the ticker without moving the cursor
    pub fn pause(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if state.playing {
            state.playing = false;
            log::info!("Playback paused at step {}", state.cursor);
        }
    }

    /// Move one step forward, clamped to the last step
    pub fn step_forward(&self) {
        let mut state = self.shared.state.lock().unwrap();
        let total = state.trace.as_ref().map_or(0, |trace| trace.len());
        if state.cursor + 1 < total {
            state.cursor += 1;
        }
    }

    /// Move one step back, clamped to the first step
    pub fn step_back(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.cursor = state.cursor.saturating_sub(1);
    }

    /// Jump to `index`, clamped to the trace bounds
    pub fn seek(&self, index: usize) {
        let mut state = self.shared.state.lock().unwrap();
        let total = state.trace.as_ref().map_or(0, |trace| trace.len());
        state.cursor = if total == 0 { 0 } else { index.min(total - 1) };
    }

    /// Set the tick interval, clamped to the supported range
    /// Takes effect on the next tick
    pub fn set_speed(&self, ms: u64) {
        let clamped = ms.clamp(MIN_STEP_INTERVAL_MS, MAX_STEP_INTERVAL_MS);
        self.shared.speed_ms.store(clamped, Ordering::Relaxed);
    }

    /// Projection of the step under the cursor, or `None` before any load
    pub fn current_snapshot(&self) -> Option<ProjectedState> {
        let state = self.shared.state.lock().unwrap();
        let trace = state.trace.as_ref()?;
        project(trace, state.cursor)
    }

    pub fn status(&self) -> PlaybackStatus {
        let state = self.shared.state.lock().unwrap();
        PlaybackStatus {
            trace_id: state.trace.as_ref().map(|trace| trace.id()),
            cursor: state.cursor,
            total: state.trace.as_ref().map_or(0, |trace| trace.len()),
            playing: state.playing,
            speed_ms: self.shared.speed_ms.load(Ordering::Relaxed),
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        // An abandoned controller must not leave a ticker spinning.
        let mut state = self.shared.state.lock().unwrap();
        state.epoch += 1;
        state.playing = false;
    }
}
