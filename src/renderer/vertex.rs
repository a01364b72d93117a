//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Raw bytes of a vertex slice, ready for a GPU vertex buffer
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Convert an 8-bit RGB triple to an opaque float color
pub fn rgb(color: [u8; 3]) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        1.0,
    ]
}

/// Blend two colors, `t = 0` gives `a`
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    let s = 1.0 - t;
    [
        a[0] * s + b[0] * t,
        a[1] * s + b[1] * t,
        a[2] * s + b[2] * t,
        a[3] * s + b[3] * t,
    ]
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0, 1.0];
    pub const SKY_NEAR: [f32; 4] = [200.0 / 255.0, 220.0 / 255.0, 240.0 / 255.0, 1.0];
    pub const GRASS: [f32; 4] = [34.0 / 255.0, 139.0 / 255.0, 34.0 / 255.0, 1.0];
    pub const ROAD: [f32; 4] = [50.0 / 255.0, 55.0 / 255.0, 65.0 / 255.0, 1.0];
    pub const ROAD_LINE: [f32; 4] = [1.0, 1.0, 150.0 / 255.0, 1.0];
    pub const BARRIER: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const PIPE: [f32; 4] = [0.2, 0.7, 0.25, 1.0];
    pub const PIPE_RIM: [f32; 4] = [0.1, 0.45, 0.15, 1.0];
    pub const BIRD: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const BIRD_DEAD: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
    pub const BACKGROUND: [f32; 4] = [20.0 / 255.0, 25.0 / 255.0, 50.0 / 255.0, 1.0];
}
