//! First-person view of the race
//!
//! Road segments are built from the projected barrier lines and drawn back
//! to front so nearer geometry covers farther geometry.

use glam::{Vec2, Vec3};

use super::Frame;
use super::shapes::{quad, rect, thick_line, vertical_gradient};
use super::vertex::{colors, rgb};
use crate::sim::{Camera, GamePhase, RaceState, Viewport};

/// Sky gradient resolution
const SKY_BANDS: u32 = 32;
/// Every n-th segment gets a center line dash
const DASH_EVERY: usize = 10;
/// Rendered car footprint (world units)
const CAR_WIDTH: f32 = 8.0;
const CAR_HEIGHT: f32 = 4.0;

enum Drawable {
    Road { index: usize, corners: [Vec2; 4] },
    Car { center: Vec2, scale: f32, color: [f32; 4] },
}

pub fn draw_race(state: &RaceState) -> Frame {
    let player = state.player();
    let camera = Camera::first_person(player.pos, player.yaw);
    let viewport = camera.viewport;
    let mut frame = Frame::new(viewport);

    if state.phase == GamePhase::Menu {
        rect(
            &mut frame.vertices,
            Vec2::ZERO,
            Vec2::new(viewport.width, viewport.height),
            colors::BACKGROUND,
        );
        return frame;
    }

    draw_backdrop(&mut frame.vertices, viewport);

    let mut drawables: Vec<(f32, Drawable)> = Vec::new();
    let track = &state.track;
    let len = track.len();
    for i in 0..len {
        let j = (i + 1) % len;
        let corners = [
            track.left_barriers[i],
            track.left_barriers[j],
            track.right_barriers[j],
            track.right_barriers[i],
        ];
        if let Some(screen) = project_all(&camera, &corners) {
            let mid = (track.points[i] + track.points[j]) / 2.0;
            let depth = camera.to_camera_space(mid).z;
            drawables.push((depth, Drawable::Road { index: i, corners: screen }));
        }
    }

    for car in state.cars.iter().skip(1) {
        let depth = camera.to_camera_space(car.pos).z;
        if let Some(center) = camera.project(car.pos) {
            drawables.push((
                depth,
                Drawable::Car {
                    center,
                    scale: camera.scale_at(depth),
                    color: rgb(car.stats().color),
                },
            ));
        }
    }

    // Back to front
    drawables.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let out = &mut frame.vertices;
    for (depth, drawable) in &drawables {
        match drawable {
            Drawable::Road { index, corners } => {
                quad(out, *corners, colors::ROAD);
                let edge = (camera.scale_at(*depth) * 2.0).clamp(1.0, 12.0);
                thick_line(out, corners[0], corners[1], edge, colors::BARRIER);
                thick_line(out, corners[3], corners[2], edge, colors::BARRIER);
                if index % DASH_EVERY == 0 {
                    let from = (corners[0] + corners[3]) / 2.0;
                    let to = (corners[1] + corners[2]) / 2.0;
                    thick_line(out, from, to, edge, colors::ROAD_LINE);
                }
            }
            Drawable::Car { center, scale, color } => {
                let size = Vec2::new(CAR_WIDTH, CAR_HEIGHT) * *scale;
                rect(out, *center - Vec2::new(size.x / 2.0, size.y), size, *color);
            }
        }
    }

    frame
}

/// Sky gradient over the top half, grass below the horizon
fn draw_backdrop(out: &mut Vec<super::Vertex>, viewport: Viewport) {
    let half = viewport.height / 2.0;
    vertical_gradient(
        out,
        Vec2::ZERO,
        Vec2::new(viewport.width, half),
        colors::SKY_NEAR,
        colors::SKY,
        SKY_BANDS,
    );
    rect(out, Vec2::new(0.0, half), Vec2::new(viewport.width, half), colors::GRASS);
}

fn project_all(camera: &Camera, corners: &[Vec3; 4]) -> Option<[Vec2; 4]> {
    Some([
        camera.project_unclipped(corners[0])?,
        camera.project_unclipped(corners[1])?,
        camera.project_unclipped(corners[2])?,
        camera.project_unclipped(corners[3])?,
    ])
}
