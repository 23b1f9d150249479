//! Game state and core simulation types
//!
//! One owned `GameState` holds everything a run needs; the entry points in
//! `tick` mutate it explicitly. No module-level mutable state anywhere.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{Config, Metrics, Viewport};
use crate::consts::TICKS_PER_SECOND;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird hovering at the start position, waiting for the first flap
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen; may carry a resume countdown back into `Running`
    Paused,
    /// Run ended, terminal until reset
    GameOver,
}

/// One-shot side-effect signals, drained by the shell for the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player flapped
    Flap,
    /// A pipe was cleared
    Score,
    /// The run ended (fires at most once per run)
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner; x is fixed per viewport, y integrates velocity
    pub pos: Vec2,
    /// Vertical velocity (px/tick, positive = down)
    pub velocity: f32,
    pub size: Vec2,
}

impl Bird {
    /// Bird at the start position for the given metrics
    pub fn at_start(m: &Metrics) -> Self {
        Self {
            pos: m.bird_start,
            velocity: 0.0,
            size: m.bird_size,
        }
    }

    /// Lower edge of the bounding box
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A gated pipe pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge, decreasing as the pipe scrolls
    pub x: f32,
    /// Top of the gap, fixed at spawn
    pub gap_y: f32,
    /// Gap opening, captured from the metrics at spawn
    pub gap_height: f32,
    /// Whether the bird has already cleared this pipe (one-shot)
    pub passed: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for gap placement
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pipes in spawn order (oldest first)
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Best score seen, backed by the durable store
    pub high_score: u32,
    /// High score changed since the last durable write
    pub(crate) high_score_dirty: bool,
    /// Ticks left in the resume countdown (0 = not counting)
    pub(crate) resume_ticks: u32,
    /// Latch ensuring the game-over signal fires once per run
    pub(crate) game_over_emitted: bool,
    /// Simulation tick counter
    pub tick_count: u64,
    /// Pending one-shot signals (not part of the persisted state)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state with the given seed and stored high score
    pub fn new(cfg: &Config, vp: Viewport, seed: u64, high_score: u32) -> Self {
        let m = cfg.metrics(vp);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            bird: Bird::at_start(&m),
            pipes: Vec::new(),
            score: 0,
            high_score,
            high_score_dirty: false,
            resume_ticks: 0,
            game_over_emitted: false,
            tick_count: 0,
            events: Vec::new(),
        }
    }

    /// Queue a one-shot signal for the shell
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending signals, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resume countdown in whole seconds, 0 when inactive
    pub fn pause_countdown(&self) -> u32 {
        self.resume_ticks.div_ceil(TICKS_PER_SECOND)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            bird: &self.bird,
            pipes: &self.pipes,
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            pause_countdown: self.pause_countdown(),
        }
    }
}

/// Everything the renderer needs, with no mutation rights
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    /// Whole seconds left in the resume countdown, 0 when inactive
    pub pause_countdown: u32,
}
