//! Draw-list rendering
//!
//! Views turn simulation state into a flat triangle list in screen pixels.
//! Presenting that list (window, GPU, file) is the surface's job.

pub mod flappy_view;
pub mod race_view;
pub mod shapes;
pub mod vertex;

pub use flappy_view::draw_flappy;
pub use race_view::draw_race;
pub use vertex::{Vertex, colors};

use crate::sim::Viewport;

/// One rendered frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub viewport: Viewport,
    pub vertices: Vec<Vertex>,
}

impl Frame {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
