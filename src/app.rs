//! Browser shell
//!
//! Wires the canvas, input events, the requestAnimationFrame tick loop and
//! the fixed-interval pipe spawner to the simulation core. All game logic
//! stays in `sim`; this module only forwards intents and drains events.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

use crate::audio::AudioManager;
use crate::config::{Config, Viewport};
use crate::consts::{BASE_HEIGHT, BASE_WIDTH, PIPE_SPAWN_INTERVAL_MS};
use crate::highscore::{LocalStore, ScoreStore};
use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::{self, GameState};

/// Game instance holding simulation and platform state
struct Game {
    state: GameState,
    cfg: Config,
    vp: Viewport,
    store: LocalStore,
    audio: AudioManager,
    renderer: Renderer,
    canvas: HtmlCanvasElement,
}

impl Game {
    fn flap(&mut self) {
        // Browsers require a user gesture before audio may start
        self.audio.resume();
        sim::flap(&mut self.state, &self.cfg, self.vp, &mut self.store);
    }

    fn toggle_pause(&mut self) {
        sim::toggle_pause(&mut self.state, &self.cfg);
    }

    fn spawn(&mut self) {
        sim::maybe_spawn(&mut self.state, &self.cfg, self.vp);
    }

    /// One animation frame: tick, drain signals, draw
    fn frame(&mut self) {
        sim::tick(&mut self.state, &self.cfg, self.vp);

        for event in self.state.drain_events() {
            self.audio.play(event);
        }

        let m = self.cfg.metrics(self.vp);
        if let Err(e) = self.renderer.draw(&self.state.snapshot(), &m, self.vp) {
            log::warn!("render error: {e:?}");
        }
    }

    /// Fit the canvas to the window at the reference 9:16 aspect
    fn resize(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(BASE_WIDTH as f64);
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(BASE_HEIGHT as f64);

        let aspect = (BASE_WIDTH / BASE_HEIGHT) as f64;
        let (mut width, mut height) = (inner_w, inner_h);
        if width / height > aspect {
            width = height * aspect;
        } else {
            height = width / aspect;
        }

        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.vp = Viewport::new(width as f32, height as f32);
        log::debug!("canvas resized to {}x{}", width as u32, height as u32);
    }
}

/// Entry point: set up logging, state, listeners and the two timers
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("gameCanvas")
        .ok_or_else(|| JsValue::from_str("no #gameCanvas element"))?
        .dyn_into()?;

    let settings = Settings::load();
    let mut audio = AudioManager::new();
    audio.apply_settings(&settings);
    let mut renderer = Renderer::new(&canvas)?;
    renderer.reduced_motion = settings.reduced_motion;

    let cfg = Config::default();
    let vp = Viewport::default();
    let store = LocalStore::default();
    let high_score = store.read();
    let seed = js_sys::Date::now() as u64;
    log::info!("starting with seed {seed}, high score {high_score}");

    let game = Rc::new(RefCell::new(Game {
        state: GameState::new(&cfg, vp, seed, high_score),
        cfg,
        vp,
        store,
        audio,
        renderer,
        canvas,
    }));
    game.borrow_mut().resize();

    // Click anywhere flaps
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || game.borrow_mut().flap());
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch on the canvas flaps (and must not scroll the page)
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
            e.prevent_default();
            game.borrow_mut().flap();
        });
        game.borrow()
            .canvas
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Space flaps, P toggles pause
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            match e.code().as_str() {
                "Space" => game.borrow_mut().flap(),
                "KeyP" => game.borrow_mut().toggle_pause(),
                _ => {}
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Refit the canvas when the window changes
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || game.borrow_mut().resize());
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pipe spawner on its own fixed interval, decoupled from the frame rate
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || game.borrow_mut().spawn());
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            PIPE_SPAWN_INTERVAL_MS,
        )?;
        closure.forget();
    }

    // requestAnimationFrame loop
    {
        let raf_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_clone = raf_closure.clone();
        let game = game.clone();

        *raf_closure.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().frame();
            if let (Some(window), Some(closure)) = (web_sys::window(), raf_clone.borrow().as_ref())
            {
                let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            }
        }));

        if let Some(closure) = raf_closure.borrow().as_ref() {
            window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        }
    }

    Ok(())
}
