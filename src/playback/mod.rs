// Playback
// Cursor-driven replay of a recorded trace

pub mod controller;

pub use controller::{
    PlaybackController, PlaybackStatus, DEFAULT_STEP_INTERVAL_MS, MAX_STEP_INTERVAL_MS,
    MIN_STEP_INTERVAL_MS,
};
