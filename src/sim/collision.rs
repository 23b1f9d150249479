//! Collision and scoring predicates
//!
//! Bird and pipes are axis-aligned rectangles. A pipe pair is two solid
//! rects with a gap between `gap_y` and `gap_y + gap_height`; the bird
//! collides when the boxes overlap horizontally and its vertical extent is
//! not fully inside the gap.

use super::state::{Bird, Pipe};

/// Bird overlaps the pipe column and is not fully inside the gap
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe, pipe_width: f32) -> bool {
    let horizontal_overlap =
        bird.pos.x + bird.size.x > pipe.x && bird.pos.x < pipe.x + pipe_width;
    if !horizontal_overlap {
        return false;
    }
    bird.pos.y < pipe.gap_y || bird.bottom() > pipe.gap_y + pipe.gap_height
}

/// Bird's leading edge has moved past the pipe's trailing edge
pub fn bird_passed_pipe(bird: &Bird, pipe: &Pipe, pipe_width: f32) -> bool {
    bird.pos.x > pipe.x + pipe_width
}

/// Bird's lower edge has reached the ground line
pub fn bird_on_ground(bird: &Bird, ground_y: f32) -> bool {
    bird.bottom() > ground_y
}

/// Pipe has fully exited the left edge of the viewport
pub fn pipe_off_screen(pipe: &Pipe, pipe_width: f32) -> bool {
    pipe.x + pipe_width <= 0.0
}
