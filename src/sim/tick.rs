//! Per-frame simulation step and the discrete input entry points
//!
//! `tick` advances one fixed frame; constants are in px/tick so there is no
//! dt parameter. `flap`, `toggle_pause` and `reset` are the only ways input
//! reaches the state.

use super::collision::{bird_hits_pipe, bird_on_ground, bird_passed_pipe, pipe_off_screen};
use super::state::{Bird, GameEvent, GamePhase, GameState};
use crate::config::{Config, Viewport};
use crate::consts::TICKS_PER_SECOND;
use crate::highscore::ScoreStore;

/// Player flap intent
///
/// In `GameOver` this restarts the game instead of flapping. While `Paused`
/// it is fully inert: no impulse, no sound.
pub fn flap<S: ScoreStore>(state: &mut GameState, cfg: &Config, vp: Viewport, store: &mut S) {
    match state.phase {
        GamePhase::GameOver => reset(state, cfg, vp, store),
        GamePhase::Paused => {}
        GamePhase::NotStarted | GamePhase::Running => {
            if state.phase == GamePhase::NotStarted {
                state.phase = GamePhase::Running;
                log::debug!("run started (seed {})", state.seed);
            }
            state.bird.velocity = cfg.flap_impulse;
            state.push_event(GameEvent::Flap);
        }
    }
}

/// Toggle pause; unpausing starts the configured resume countdown
///
/// Toggling again while the countdown runs cancels it and stays paused.
pub fn toggle_pause(state: &mut GameState, cfg: &Config) {
    match state.phase {
        GamePhase::Running => {
            state.phase = GamePhase::Paused;
            state.resume_ticks = 0;
        }
        GamePhase::Paused => {
            if state.resume_ticks > 0 {
                state.resume_ticks = 0;
            } else if cfg.resume_countdown_secs == 0 {
                state.phase = GamePhase::Running;
            } else {
                state.resume_ticks = cfg.resume_countdown_secs * TICKS_PER_SECOND;
            }
        }
        _ => {}
    }
}

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState, cfg: &Config, vp: Viewport) {
    match state.phase {
        // Resume countdown is the only thing that moves while paused
        GamePhase::Paused if state.resume_ticks > 0 => {
            state.resume_ticks -= 1;
            if state.resume_ticks == 0 {
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::Running => {}
        _ => return,
    }

    state.tick_count += 1;
    let m = cfg.metrics(vp);

    // The shell may have resized the canvas since the last frame
    state.bird.size = m.bird_size;
    state.bird.pos.x = m.bird_start.x;

    // Gravity accumulates every tick, uncapped
    state.bird.velocity += cfg.gravity;
    state.bird.pos.y += state.bird.velocity;

    if bird_on_ground(&state.bird, m.ground_y) {
        state.bird.pos.y = m.ground_y - state.bird.size.y;
        state.bird.velocity = 0.0;
        enter_game_over(state);
        // Pipes freeze on the frame the bird grounds
        return;
    }

    for i in 0..state.pipes.len() {
        state.pipes[i].x -= cfg.pipe_speed;
        let pipe = state.pipes[i];

        if !pipe.passed && bird_passed_pipe(&state.bird, &pipe, m.pipe_width) {
            state.pipes[i].passed = true;
            state.score += 1;
            state.push_event(GameEvent::Score);
        }

        if bird_hits_pipe(&state.bird, &pipe, m.pipe_width) {
            enter_game_over(state);
        }
    }

    state.pipes.retain(|p| !pipe_off_screen(p, m.pipe_width));
}

/// Restart into `NotStarted`, persisting the high score when it changed
pub fn reset<S: ScoreStore>(state: &mut GameState, cfg: &Config, vp: Viewport, store: &mut S) {
    if state.score > state.high_score {
        state.high_score = state.score;
        state.high_score_dirty = true;
    }
    if state.high_score_dirty {
        store.write(state.high_score);
        state.high_score_dirty = false;
    }

    let m = cfg.metrics(vp);
    state.bird = Bird::at_start(&m);
    state.pipes.clear();
    state.score = 0;
    state.phase = GamePhase::NotStarted;
    state.game_over_emitted = false;
    state.resume_ticks = 0;
}

/// Enter the terminal phase; the game-over signal fires at most once per run
fn enter_game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    if !state.game_over_emitted {
        state.push_event(GameEvent::GameOver);
        state.game_over_emitted = true;
        log::debug!("game over at score {}", state.score);
    }
    if state.score > state.high_score {
        state.high_score = state.score;
        state.high_score_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryStore;
    use crate::sim::spawn::maybe_spawn;
    use crate::sim::state::Pipe;

    fn setup() -> (Config, Viewport, GameState) {
        let cfg = Config::default();
        let vp = Viewport::default();
        let state = GameState::new(&cfg, vp, 12345, 0);
        (cfg, vp, state)
    }

    fn running(state: &mut GameState) {
        state.phase = GamePhase::Running;
    }

    #[test]
    fn test_gravity_step_scenario() {
        // y=240, velocity=0, height=640, gravity=0.55 -> velocity 0.55, y 240.55
        let (cfg, vp, mut state) = setup();
        running(&mut state);

        tick(&mut state, &cfg, vp);
        assert_eq!(state.bird.velocity, 0.55);
        assert_eq!(state.bird.pos.y, 240.55);
    }

    #[test]
    fn test_gravity_accumulates_unbounded() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        // Keep the bird airborne so only gravity acts
        state.bird.pos.y = 0.0;

        let mut last = state.bird.velocity;
        for _ in 0..5 {
            tick(&mut state, &cfg, vp);
            assert_eq!(state.bird.velocity, last + cfg.gravity);
            last = state.bird.velocity;
        }
    }

    #[test]
    fn test_tick_is_noop_outside_running() {
        let (cfg, vp, mut state) = setup();

        for phase in [GamePhase::NotStarted, GamePhase::Paused, GamePhase::GameOver] {
            state.phase = phase;
            state.bird.velocity = 1.0;
            state.bird.pos.y = 100.0;
            state.pipes = vec![Pipe {
                x: 200.0,
                gap_y: 100.0,
                gap_height: 200.0,
                passed: false,
            }];
            state.score = 3;

            tick(&mut state, &cfg, vp);
            assert_eq!(state.bird.velocity, 1.0);
            assert_eq!(state.bird.pos.y, 100.0);
            assert_eq!(state.pipes[0].x, 200.0);
            assert_eq!(state.score, 3);
        }
    }

    #[test]
    fn test_flap_sets_exact_impulse() {
        let (cfg, vp, mut state) = setup();
        let mut store = MemoryStore::default();
        running(&mut state);

        for prior in [0.0, 12.5, -3.0] {
            state.bird.velocity = prior;
            flap(&mut state, &cfg, vp, &mut store);
            assert_eq!(state.bird.velocity, cfg.flap_impulse);
        }
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Flap, GameEvent::Flap, GameEvent::Flap]
        );
    }

    #[test]
    fn test_first_flap_starts_the_run() {
        let (cfg, vp, mut state) = setup();
        let mut store = MemoryStore::default();

        assert_eq!(state.phase, GamePhase::NotStarted);
        flap(&mut state, &cfg, vp, &mut store);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bird.velocity, cfg.flap_impulse);
    }

    #[test]
    fn test_flap_while_paused_is_inert() {
        let (cfg, vp, mut state) = setup();
        let mut store = MemoryStore::default();
        state.phase = GamePhase::Paused;
        state.bird.velocity = 2.0;

        flap(&mut state, &cfg, vp, &mut store);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.bird.velocity, 2.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_flap_in_game_over_restarts() {
        let (cfg, vp, mut state) = setup();
        let mut store = MemoryStore::default();
        state.phase = GamePhase::GameOver;
        state.score = 4;
        state.pipes.push(Pipe {
            x: 100.0,
            gap_y: 100.0,
            gap_height: 200.0,
            passed: true,
        });

        flap(&mut state, &cfg, vp, &mut store);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.pos, cfg.bird_start);
        // The restart flap itself does not flap
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_ground_collision_fires_game_over_once() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        // Just above the ground line at 540: one gravity step crosses it
        state.bird.pos.y = 540.0 - state.bird.size.y - 0.1;
        state.bird.velocity = 0.0;

        tick(&mut state, &cfg, vp);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird.bottom(), 540.0);
        assert_eq!(state.bird.velocity, 0.0);

        for _ in 0..5 {
            tick(&mut state, &cfg, vp);
        }
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::GameOver)
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_pipes_freeze_on_grounding_tick() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        state.bird.pos.y = 540.0 - state.bird.size.y - 0.1;
        state.pipes.push(Pipe {
            x: 200.0,
            gap_y: 100.0,
            gap_height: 200.0,
            passed: false,
        });

        tick(&mut state, &cfg, vp);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.pipes[0].x, 200.0);
    }

    #[test]
    fn test_pipe_collision_outside_gap() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        // Pipe over the bird with a gap entirely below it
        state.pipes.push(Pipe {
            x: 60.0,
            gap_y: 400.0,
            gap_height: 100.0,
            passed: false,
        });

        tick(&mut state, &cfg, vp);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state
                .drain_events()
                .into_iter()
                .filter(|e| *e == GameEvent::GameOver)
                .count(),
            1
        );
    }

    #[test]
    fn test_bird_in_gap_survives_overlap() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        // Gap 100..460 comfortably contains the falling bird
        state.pipes.push(Pipe {
            x: 60.0,
            gap_y: 100.0,
            gap_height: 360.0,
            passed: false,
        });

        for _ in 0..10 {
            tick(&mut state, &cfg, vp);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_score_increments_once_per_pipe() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        // Trailing edge just left of the bird: first advance clears it
        state.pipes.push(Pipe {
            x: state.bird.pos.x - cfg.pipe_width + 1.0,
            gap_y: 100.0,
            gap_height: 360.0,
            passed: false,
        });

        tick(&mut state, &cfg, vp);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);

        tick(&mut state, &cfg, vp);
        assert_eq!(state.score, 1);
        let scores = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Score)
            .count();
        assert_eq!(scores, 1);
    }

    #[test]
    fn test_pipe_scroll_and_retirement_scenario() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);

        maybe_spawn(&mut state, &cfg, vp);
        assert_eq!(state.pipes[0].x, vp.width);

        // After N ticks at speed 2: x = width - 2N
        for _ in 0..10 {
            tick(&mut state, &cfg, vp);
        }
        assert_eq!(state.pipes[0].x, vp.width - 20.0);

        // Removed once x + width <= 0
        state.pipes[0].x = -cfg.pipe_width + 1.0;
        state.pipes[0].passed = true;
        tick(&mut state, &cfg, vp);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_pause_freezes_and_countdown_resumes() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        state.bird.pos.y = 100.0;

        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &cfg, vp);
        assert_eq!(state.bird.pos.y, 100.0);

        // Unpause starts a 3 second countdown, still frozen
        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.pause_countdown(), 3);

        for _ in 0..TICKS_PER_SECOND {
            tick(&mut state, &cfg, vp);
        }
        assert_eq!(state.pause_countdown(), 2);
        assert_eq!(state.bird.pos.y, 100.0);

        for _ in 0..2 * TICKS_PER_SECOND {
            tick(&mut state, &cfg, vp);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_toggle_during_countdown_cancels_it() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);

        toggle_pause(&mut state, &cfg);
        toggle_pause(&mut state, &cfg);
        assert!(state.pause_countdown() > 0);

        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.pause_countdown(), 0);

        // A stale countdown must never fire later
        for _ in 0..5 * TICKS_PER_SECOND {
            tick(&mut state, &cfg, vp);
        }
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_zero_countdown_resumes_immediately() {
        let (mut cfg, _vp, mut state) = setup();
        cfg.resume_countdown_secs = 0;
        running(&mut state);

        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::Paused);
        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_toggle_pause_ignored_outside_running_or_paused() {
        let (cfg, _vp, mut state) = setup();

        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::NotStarted);

        state.phase = GamePhase::GameOver;
        toggle_pause(&mut state, &cfg);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_reset_clears_countdown() {
        let (cfg, vp, mut state) = setup();
        let mut store = MemoryStore::default();
        running(&mut state);
        toggle_pause(&mut state, &cfg);
        toggle_pause(&mut state, &cfg);
        assert!(state.pause_countdown() > 0);

        reset(&mut state, &cfg, vp, &mut store);
        assert_eq!(state.pause_countdown(), 0);
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_high_score_round_trip() {
        let (cfg, vp, mut state) = setup();
        let mut store = MemoryStore::default();
        store.write(3);
        state.high_score = store.read();

        // A run ending above the stored value persists on reset
        state.phase = GamePhase::GameOver;
        state.score = 7;
        flap(&mut state, &cfg, vp, &mut store);
        assert_eq!(store.read(), 7);
        assert_eq!(state.high_score, 7);

        // A run ending at or below it leaves the store untouched
        state.phase = GamePhase::GameOver;
        state.score = 5;
        flap(&mut state, &cfg, vp, &mut store);
        assert_eq!(store.read(), 7);
    }

    #[test]
    fn test_high_score_visible_at_game_over() {
        let (cfg, vp, mut state) = setup();
        running(&mut state);
        state.score = 9;
        state.bird.pos.y = 540.0 - state.bird.size.y - 0.1;

        tick(&mut state, &cfg, vp);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snapshot().high_score, 9);
    }

    #[test]
    fn test_full_run_is_deterministic() {
        let cfg = Config::default();
        let vp = Viewport::default();
        let mut store_a = MemoryStore::default();
        let mut store_b = MemoryStore::default();
        let mut a = GameState::new(&cfg, vp, 777, 0);
        let mut b = GameState::new(&cfg, vp, 777, 0);

        for i in 0u32..600 {
            if i % 20 == 0 {
                flap(&mut a, &cfg, vp, &mut store_a);
                flap(&mut b, &cfg, vp, &mut store_b);
            }
            if i % 90 == 0 {
                maybe_spawn(&mut a, &cfg, vp);
                maybe_spawn(&mut b, &cfg, vp);
            }
            tick(&mut a, &cfg, vp);
            tick(&mut b, &cfg, vp);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.bird.pos, b.bird.pos);
        assert_eq!(a.pipes.len(), b.pipes.len());
        for (pa, pb) in a.pipes.iter().zip(&b.pipes) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.gap_y, pb.gap_y);
        }
    }
}
