//! Tuning constants and viewport scaling
//!
//! All gameplay constants live in a `Config` so rule variants (e.g. whether
//! unpausing runs a countdown) are data, not code paths. Base values are
//! authored for the 360x640 reference viewport and scaled per frame via
//! `Metrics`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn scale_x(&self) -> f32 {
        self.width / BASE_WIDTH
    }

    pub fn scale_y(&self) -> f32 {
        self.height / BASE_HEIGHT
    }

    /// Uniform scale factor for square elements (bird, pipe width)
    pub fn scale(&self) -> f32 {
        self.scale_x().min(self.scale_y())
    }
}

/// Gameplay tuning, in reference-viewport units
///
/// Tunable at construction, fixed for the life of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gravity acceleration (px/tick²)
    pub gravity: f32,
    /// Vertical velocity assigned on flap (negative = up)
    pub flap_impulse: f32,
    /// Pipe scroll speed (px/tick)
    pub pipe_speed: f32,
    pub pipe_width: f32,
    /// Vertical opening between the pipe halves
    pub pipe_gap: f32,
    /// Minimum horizontal distance between consecutive pipes
    pub min_pipe_spacing: f32,
    /// Minimum pipe stub above and below the gap
    pub min_pipe_clearance: f32,
    pub bird_size: f32,
    pub bird_start: Vec2,
    /// Height of the ground band
    pub ground_band: f32,
    /// Resume countdown after unpausing, in seconds (0 = resume immediately)
    pub resume_countdown_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            pipe_speed: PIPE_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            min_pipe_spacing: MIN_PIPE_SPACING,
            min_pipe_clearance: MIN_PIPE_CLEARANCE,
            bird_size: BIRD_SIZE,
            bird_start: Vec2::new(BIRD_START_X, BIRD_START_Y),
            ground_band: GROUND_BAND,
            resume_countdown_secs: RESUME_COUNTDOWN_SECS,
        }
    }
}

impl Config {
    /// Derive pixel-space metrics for the given viewport
    pub fn metrics(&self, vp: Viewport) -> Metrics {
        let scale = vp.scale();
        Metrics {
            bird_size: Vec2::splat(self.bird_size * scale),
            bird_start: Vec2::new(
                self.bird_start.x * vp.scale_x(),
                self.bird_start.y * vp.scale_y(),
            ),
            pipe_width: self.pipe_width * scale,
            pipe_gap: self.pipe_gap * vp.scale_y(),
            min_pipe_spacing: self.min_pipe_spacing * vp.scale_x(),
            min_pipe_clearance: self.min_pipe_clearance * vp.scale_y(),
            ground_y: vp.height - self.ground_band * vp.scale_y(),
        }
    }
}

/// Config values resolved against a concrete viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub bird_size: Vec2,
    pub bird_start: Vec2,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub min_pipe_spacing: f32,
    pub min_pipe_clearance: f32,
    /// Top of the ground band; the bird's lower edge may not cross it
    pub ground_y: f32,
}
