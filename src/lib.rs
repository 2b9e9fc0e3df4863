//! Whack Hole - A timed reaction arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (holes, session timing, scoring)
//! - `renderer`: WebGPU quad rendering
//! - `platform`: Input boundary (device events, coordinate flip)
//! - `settings`: Layout and timing configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the run loop
    pub const FPS: u32 = 60;

    /// Default session length (one minute)
    pub const SESSION_DURATION_MS: u64 = 60 * 1000;
    /// Default time a hole stays active before timing out
    pub const BASE_WINDOW_MS: u64 = 1000;
    /// Unit of the difficulty ramp. Fixed at one minute, independent of session length.
    pub const DIFFICULTY_UNIT_MS: u64 = 60 * 1000;

    /// Points for a hit when the window is still at its base length
    pub const HIT_REWARD: i64 = 100;
    /// Penalty for a click that lands on no active hole
    pub const MISS_PENALTY: i64 = 50;
    /// Penalty for letting the active hole time out
    pub const TIMEOUT_PENALTY: i64 = 100;

    /// Play field size in pixels
    pub const FIELD_WIDTH: u32 = 1920;
    pub const FIELD_HEIGHT: u32 = 1080;

    /// Default hole grid (3 rows x 5 columns)
    pub const GRID_COLUMNS: u32 = 5;
    pub const GRID_ROWS: u32 = 3;
    pub const HOLE_SIZE: i32 = 300;
    pub const HOLE_GAP: i32 = 50;

    /// Active marker size relative to its hole
    pub const ACTIVE_INSET_RATIO: f32 = 0.75;

    /// Clicks processed per frame; extra events are dropped
    pub const MAX_EVENTS_PER_FRAME: usize = 32;
}

/// Format milliseconds as `HH:MM:SS` (hours are not wrapped)
pub fn format_hms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let (m, s) = (total_secs / 60, total_secs % 60);
    let (h, m) = (m / 60, m % 60);
    format!("{h:02}:{m:02}:{s:02}")
}
