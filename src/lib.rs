//! Zippy Bird - a Flappy Bird style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game state)
//! - `config`: Tuning constants and viewport scaling
//! - `highscore`: Durable high-score storage
//! - `app`/`render`/`audio`: Browser shell (wasm32 only)

pub mod config;
pub mod highscore;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use config::{Config, Metrics, Viewport};
pub use highscore::{MemoryStore, ScoreStore};
pub use settings::Settings;

/// Game tuning constants, authored against the reference viewport
pub mod consts {
    /// Reference viewport the base constants are tuned for
    pub const BASE_WIDTH: f32 = 360.0;
    pub const BASE_HEIGHT: f32 = 640.0;

    /// Gravity acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.55;
    /// Vertical velocity assigned on flap (negative = up)
    pub const FLAP_IMPULSE: f32 = -8.0;

    /// Pipe scroll speed (px/tick)
    pub const PIPE_SPEED: f32 = 2.0;
    pub const PIPE_WIDTH: f32 = 80.0;
    /// Vertical opening between the pipe halves
    pub const PIPE_GAP: f32 = 200.0;
    /// Minimum horizontal distance between consecutive pipes
    pub const MIN_PIPE_SPACING: f32 = 200.0;
    /// Minimum pipe stub above and below the gap
    pub const MIN_PIPE_CLEARANCE: f32 = 60.0;
    /// Spawn timer cadence, driven by the shell's interval timer
    pub const PIPE_SPAWN_INTERVAL_MS: i32 = 1500;

    pub const BIRD_SIZE: f32 = 50.0;
    pub const BIRD_START_X: f32 = 60.0;
    pub const BIRD_START_Y: f32 = 240.0;

    /// Height of the ground band at the bottom of the viewport
    pub const GROUND_BAND: f32 = 100.0;

    /// Nominal tick rate of the frame driver
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Resume countdown after unpausing, in seconds (0 = resume immediately)
    pub const RESUME_COUNTDOWN_SECS: u32 = 3;
}
