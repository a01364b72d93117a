//! Axis-aligned collision tests for the pipe game
//!
//! Screen space: y grows downward, boxes are `[min, max)` on both axes.

use glam::Vec2;

use crate::consts::flappy::PIPE_WIDTH;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Horizontal overlap with the span `[left, right)`
    pub fn overlaps_span(&self, left: f32, right: f32) -> bool {
        self.min.x < right && self.max.x > left
    }
}

/// A pipe pair with a gap the bird must fly through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Bottom of the upper pipe
    pub gap_top: f32,
    /// Vertical size of the opening
    pub gap: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32, gap: f32) -> Self {
        Self {
            x,
            gap_top,
            gap,
            passed: false,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }
}

/// True when `body` overlaps the solid part of `pipe`
pub fn hits_pipe(body: &Aabb, pipe: &Pipe) -> bool {
    if !body.overlaps_span(pipe.x, pipe.right()) {
        return false;
    }
    body.top() < pipe.gap_top || body.bottom() > pipe.gap_bottom()
}

/// True when `body` has left the vertical screen range `[0, height]`
pub fn out_of_bounds(body: &Aabb, height: f32) -> bool {
    body.top() < 0.0 || body.bottom() > height
}
