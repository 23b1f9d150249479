//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Side effects (sounds) are queued as `GameEvent`s for the shell to drain;
//! the sim never touches a playback API.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{bird_hits_pipe, bird_on_ground, bird_passed_pipe};
pub use spawn::maybe_spawn;
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe, Snapshot};
pub use tick::{flap, reset, tick, toggle_pause};
