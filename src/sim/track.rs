//! Procedural closed-loop race track
//!
//! The centerline is a single loop parameterized by angle, with sinusoidal
//! harmonics bending it horizontally and rolling it vertically. Barrier
//! lines sit a fixed distance either side of the centerline.

use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use crate::consts::racer::*;

/// A generated track: centerline plus left/right barrier lines
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub points: Vec<Vec3>,
    pub left_barriers: Vec<Vec3>,
    pub right_barriers: Vec<Vec3>,
}

impl Track {
    /// Generate a track with `segments` centerline points (at least `MIN_TRACK_SEGMENTS`)
    pub fn generate(segments: usize) -> Self {
        let segments = segments.max(MIN_TRACK_SEGMENTS);
        let points: Vec<Vec3> = (0..segments)
            .map(|i| centerline_point(TAU * i as f32 / segments as f32))
            .collect();

        let mut left_barriers = Vec::with_capacity(segments);
        let mut right_barriers = Vec::with_capacity(segments);
        for i in 0..segments {
            let point = points[i];
            let perp = perpendicular(point, points[(i + 1) % segments]);
            let offset = Vec3::new(perp.x, 0.0, perp.y) * BARRIER_OFFSET;
            left_barriers.push(point + offset);
            right_barriers.push(point - offset);
        }

        Self {
            points,
            left_barriers,
            right_barriers,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the centerline point nearest `pos` on the ground plane.
    /// Ties go to the lowest index.
    pub fn closest_index(&self, pos: Vec3) -> usize {
        let ground = Vec2::new(pos.x, pos.z);
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, point) in self.points.iter().enumerate() {
            let dist = Vec2::new(point.x, point.z).distance_squared(ground);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// Point `offset` indices after `index`, wrapping around the loop
    pub fn point_after(&self, index: usize, offset: usize) -> Vec3 {
        self.points[(index + offset) % self.points.len()]
    }

    /// Yaw of the segment leaving point `index`
    pub fn direction_at(&self, index: usize) -> f32 {
        let from = self.points[index % self.points.len()];
        let to = self.point_after(index, 1);
        (to.z - from.z).atan2(to.x - from.x)
    }

    /// Ground-plane bounding box of everything drawn, grown by `margin`
    pub fn bounds(&self, margin: f32) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in self
            .points
            .iter()
            .chain(&self.left_barriers)
            .chain(&self.right_barriers)
        {
            let ground = Vec2::new(p.x, p.z);
            min = min.min(ground);
            max = max.max(ground);
        }
        (min - Vec2::splat(margin), max + Vec2::splat(margin))
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::generate(TRACK_SEGMENTS)
    }
}

fn centerline_point(angle: f32) -> Vec3 {
    let x = TRACK_RADIUS_X * angle.cos() * (1.0 + 0.3 * (angle * 2.0).sin());
    let z = TRACK_RADIUS_Z * angle.sin() * (1.0 + 0.2 * (angle * 3.0).cos());
    // Rolling hills
    let y = 50.0
        + 40.0 * (angle * 2.0).sin()
        + 25.0 * (angle * 3.0).cos()
        + 15.0 * (angle * 5.0).sin();
    Vec3::new(x, y, z)
}

/// Unit ground-plane perpendicular (left of travel) of the segment `from -> to`
fn perpendicular(from: Vec3, to: Vec3) -> Vec2 {
    let along = Vec2::new(to.x - from.x, to.z - from.z);
    along.perp().normalize_or_zero()
}
