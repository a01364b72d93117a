//! Shape generation for 2D primitives
//!
//! Every shape is emitted as a triangle list appended to a vertex buffer.

use glam::Vec2;

use super::vertex::Vertex;

/// Append a convex quad given in winding order
pub fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    // Two triangles
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

/// Append an axis-aligned rectangle from its top-left corner
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;
    quad(
        out,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
}

/// Append a line segment with the given pixel width
pub fn thick_line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let perp = dir.perp() * (width / 2.0);
    quad(out, [from + perp, to + perp, to - perp, from - perp], color);
}

/// Append a vertical gradient as `bands` horizontal strips
pub fn vertical_gradient(
    out: &mut Vec<Vertex>,
    min: Vec2,
    size: Vec2,
    top: [f32; 4],
    bottom: [f32; 4],
    bands: u32,
) {
    let bands = bands.max(1);
    let band_height = size.y / bands as f32;
    for i in 0..bands {
        let t = i as f32 / (bands - 1).max(1) as f32;
        let y = min.y + i as f32 * band_height;
        rect(
            out,
            Vec2::new(min.x, y),
            Vec2::new(size.x, band_height),
            super::vertex::mix(top, bottom, t),
        );
    }
}
