//! Pinhole camera projection for the first-person view

use glam::{Vec2, Vec3};

use crate::consts::racer::{EYE_HEIGHT, FOV_DEGREES, NEAR_PLANE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{heading, right_of};

/// Screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }
}

/// A camera looking along `yaw` on the ground plane
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub viewport: Viewport,
    pub focal_length: f32,
    pub near: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, viewport: Viewport) -> Self {
        let half_fov = FOV_DEGREES.to_radians() / 2.0;
        Self {
            position,
            yaw,
            viewport,
            focal_length: (viewport.width / 2.0) / half_fov.tan(),
            near: NEAR_PLANE,
        }
    }

    /// First-person camera riding at eye height above a car
    pub fn first_person(car_pos: Vec3, yaw: f32) -> Self {
        Self::new(
            car_pos + Vec3::Y * EYE_HEIGHT,
            yaw,
            Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        )
    }

    /// Camera-space coordinates: (lateral, vertical, depth)
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        let d = world - self.position;
        let ground = Vec2::new(d.x, d.z);
        Vec3::new(
            ground.dot(right_of(self.yaw)),
            d.y,
            ground.dot(heading(self.yaw)),
        )
    }

    /// Project ignoring screen bounds. `None` only at or behind the near plane.
    pub fn project_unclipped(&self, world: Vec3) -> Option<Vec2> {
        let cam = self.to_camera_space(world);
        if cam.z <= self.near {
            return None;
        }
        let center = self.viewport.center();
        Some(Vec2::new(
            center.x + (cam.x / cam.z) * self.focal_length,
            center.y - (cam.y / cam.z) * self.focal_length,
        ))
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` when the point is behind the near plane or lands
    /// outside the viewport.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        self.project_unclipped(world)
            .filter(|p| self.viewport.contains(*p))
    }

    /// Perspective scale (pixels per world unit) at a camera-space depth
    pub fn scale_at(&self, depth: f32) -> f32 {
        self.focal_length / depth.max(self.near)
    }
}
