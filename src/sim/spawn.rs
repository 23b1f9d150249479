//! Pipe spawner
//!
//! Driven by the shell's fixed-interval timer, not the per-frame tick, so
//! spawn cadence stays decoupled from frame rate. The spawner enforces the
//! minimum horizontal spacing and places the gap uniformly at random within
//! the clearance limits.

use rand::Rng;

use super::state::{GamePhase, GameState, Pipe};
use crate::config::{Config, Viewport};

/// Spawn a pipe at the right edge if the spacing policy allows it
pub fn maybe_spawn(state: &mut GameState, cfg: &Config, vp: Viewport) {
    if state.phase != GamePhase::Running {
        return;
    }

    let m = cfg.metrics(vp);

    // Skip while the newest pipe is still too close to the right edge
    if let Some(last) = state.pipes.last() {
        if last.x > vp.width - m.min_pipe_spacing {
            return;
        }
    }

    // Gap must keep a minimum pipe stub at both the top and the bottom
    let min_gap_y = m.min_pipe_clearance;
    let max_gap_y = vp.height - m.pipe_gap - m.min_pipe_clearance;
    if max_gap_y < min_gap_y {
        log::warn!(
            "viewport {}x{} too short for a pipe gap, skipping spawn",
            vp.width,
            vp.height
        );
        return;
    }

    let gap_y = state.rng.random_range(min_gap_y..=max_gap_y);
    state.pipes.push(Pipe {
        x: vp.width,
        gap_y,
        gap_height: m.pipe_gap,
        passed: false,
    });
}
