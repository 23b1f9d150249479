//! Native headless runner
//!
//! Drives the simulation with a scripted pilot and prints the outcome.
//! Useful for profiling the core and for eyeballing tuning changes without
//! a browser.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use zippy_bird::consts::TICKS_PER_SECOND;
    use zippy_bird::sim::{self, GamePhase, GameState};
    use zippy_bird::{Config, MemoryStore, Viewport};

    env_logger::init();

    let cfg = Config::default();
    let vp = Viewport::default();
    let mut store = MemoryStore::default();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xDEC0DE);
    let mut state = GameState::new(&cfg, vp, seed, 0);

    log::info!("headless run, seed {seed}");

    // Scripted pilot: flap every 20 ticks, spawn on the shell's cadence
    // (1.5s at 60 ticks/s = 90 ticks), run until it crashes
    sim::flap(&mut state, &cfg, vp, &mut store);
    let mut ticks = 0u64;
    while state.phase != GamePhase::GameOver && ticks < 60_000 {
        if ticks % 20 == 0 {
            sim::flap(&mut state, &cfg, vp, &mut store);
        }
        if ticks % 90 == 0 {
            sim::maybe_spawn(&mut state, &cfg, vp);
        }
        sim::tick(&mut state, &cfg, vp);
        state.drain_events();
        ticks += 1;
    }

    println!(
        "seed {seed}: survived {:.1}s ({ticks} ticks), score {}",
        ticks as f64 / TICKS_PER_SECOND as f64,
        state.score,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build starts from `app::start` via #[wasm_bindgen(start)]
}
