//! Flat-color Canvas2D renderer
//!
//! Reads the simulation snapshot and draws; never mutates game state. No
//! sprite assets are involved, so there is nothing to load or fail.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::{Metrics, Viewport};
use crate::sim::{GamePhase, Snapshot};

const SKY: &str = "#4ec0ca";
const PIPE: &str = "#2e8b57";
const PIPE_RIM: &str = "#1f6e43";
const GROUND: &str = "#ded895";
const BIRD: &str = "#f7d51d";
const TEXT: &str = "#ffffff";
const OUTLINE: &str = "#000000";

/// Canvas renderer over the 2D context
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    /// Skip the bird tilt animation
    pub reduced_motion: bool,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            reduced_motion: false,
        })
    }

    /// Draw one frame from the snapshot
    pub fn draw(&self, snap: &Snapshot, m: &Metrics, vp: Viewport) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let w = vp.width as f64;
        let h = vp.height as f64;

        ctx.set_fill_style_str(SKY);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Pipes: solid columns above and below the gap
        for pipe in snap.pipes {
            let x = pipe.x as f64;
            let pw = m.pipe_width as f64;
            let gap_top = pipe.gap_y as f64;
            let gap_bottom = (pipe.gap_y + pipe.gap_height) as f64;

            ctx.set_fill_style_str(PIPE);
            ctx.fill_rect(x, 0.0, pw, gap_top);
            ctx.fill_rect(x, gap_bottom, pw, h - gap_bottom);

            ctx.set_fill_style_str(PIPE_RIM);
            ctx.fill_rect(x, gap_top - 8.0, pw, 8.0);
            ctx.fill_rect(x, gap_bottom, pw, 8.0);
        }

        ctx.set_fill_style_str(GROUND);
        ctx.fill_rect(0.0, m.ground_y as f64, w, h - m.ground_y as f64);

        self.draw_bird(snap)?;
        self.draw_hud(snap, vp)?;
        Ok(())
    }

    fn draw_bird(&self, snap: &Snapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let bird = snap.bird;
        let (bw, bh) = (bird.size.x as f64, bird.size.y as f64);

        ctx.save();
        ctx.translate(bird.pos.x as f64 + bw / 2.0, bird.pos.y as f64 + bh / 2.0)?;
        if !self.reduced_motion {
            // Tilt with vertical velocity, clamped to +/-30 degrees
            let tilt = (bird.velocity as f64 * 3.0).clamp(-30.0, 30.0);
            ctx.rotate(tilt.to_radians())?;
        }
        ctx.set_fill_style_str(BIRD);
        ctx.fill_rect(-bw / 2.0, -bh / 2.0, bw, bh);
        ctx.restore();
        Ok(())
    }

    fn draw_hud(&self, snap: &Snapshot, vp: Viewport) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let sy = vp.scale_y() as f64;
        let cx = vp.width as f64 / 2.0;
        let cy = vp.height as f64 / 2.0;

        ctx.set_line_width(3.0 * sy);
        ctx.set_stroke_style_str(OUTLINE);
        ctx.set_fill_style_str(TEXT);

        self.set_font(20.0 * sy);
        ctx.set_text_align("left");
        let score = format!("Score: {}", snap.score);
        let best = format!("High Score: {}", snap.high_score);
        ctx.stroke_text(&score, 10.0, 30.0 * sy)?;
        ctx.fill_text(&score, 10.0, 30.0 * sy)?;
        ctx.stroke_text(&best, 10.0, 60.0 * sy)?;
        ctx.fill_text(&best, 10.0, 60.0 * sy)?;

        ctx.set_text_align("center");
        match snap.phase {
            GamePhase::NotStarted => {
                self.set_font(32.0 * sy);
                self.text_with_outline("ZIPPY BIRD", cx, cy - 60.0 * sy)?;
                self.set_font(16.0 * sy);
                self.text_with_outline("Click or press Space to start", cx, cy)?;
            }
            GamePhase::GameOver => {
                self.set_font(32.0 * sy);
                self.text_with_outline("Game Over!", cx, cy)?;
                self.set_font(16.0 * sy);
                self.text_with_outline("Click or press Space to restart", cx, cy + 40.0 * sy)?;
            }
            GamePhase::Paused if snap.pause_countdown > 0 => {
                self.set_font(48.0 * sy);
                self.text_with_outline(&snap.pause_countdown.to_string(), cx, cy)?;
            }
            GamePhase::Paused => {
                self.set_font(32.0 * sy);
                self.text_with_outline("Paused", cx, cy)?;
            }
            GamePhase::Running => {}
        }
        Ok(())
    }

    fn set_font(&self, px: f64) {
        self.ctx.set_font(&format!("{px:.0}px monospace"));
    }

    fn text_with_outline(&self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.stroke_text(text, x, y)?;
        self.ctx.fill_text(text, x, y)?;
        Ok(())
    }
}
