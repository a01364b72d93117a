//! Arcade Sims - two small arcade game cores
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, projection, collisions, game state)
//! - `renderer`: Draw-list generation (colored triangles in screen pixels)
//! - `platform`: Keyboard mapping and frame pacing
//! - `app`: Session loop tying input, simulation and rendering together
//! - `persistence`: JSON load/save helpers

pub mod app;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ArcadeError;
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Flap-through-pipes constants (pixels, per-second units)
    pub mod flappy {
        pub const SCREEN_WIDTH: f32 = 800.0;
        pub const SCREEN_HEIGHT: f32 = 600.0;

        pub const BIRD_X: f32 = 100.0;
        pub const BIRD_SIZE: f32 = 60.0;
        pub const GRAVITY: f32 = 1800.0;
        pub const FLAP_VELOCITY: f32 = -720.0;
        pub const TERMINAL_FALL_SPEED: f32 = 720.0;

        pub const PIPE_WIDTH: f32 = 50.0;
        /// Distance the newest pipe must travel before the next one spawns
        pub const PIPE_SPACING: f32 = 200.0;
        /// Pipes are removed once their left edge reaches this x
        pub const PIPE_DESPAWN_X: f32 = -100.0;
        /// Minimum distance between a gap and the top/bottom screen edge
        pub const PIPE_EDGE_MARGIN: f32 = 80.0;

        pub const BASE_SPEED: f32 = 240.0;
        pub const SPEED_PER_PIPE: f32 = 30.0;
        pub const BASE_GAP: f32 = 200.0;
        pub const GAP_SHRINK_PER_PIPE: f32 = 5.0;
        pub const MIN_GAP: f32 = 100.0;
    }

    /// First-person racer constants (world units, per-step factors)
    pub mod racer {
        pub const SCREEN_WIDTH: f32 = 1400.0;
        pub const SCREEN_HEIGHT: f32 = 900.0;

        /// Velocity multiplier applied every step
        pub const FRICTION: f32 = 0.97;
        /// Velocity multiplier while braking without the reverse modifier
        pub const BRAKE_FACTOR: f32 = 0.80;
        pub const PLAYER_THRUST_GAIN: f32 = 50.0;
        pub const REVERSE_THRUST_GAIN: f32 = 30.0;
        pub const AI_THRUST_GAIN: f32 = 30.0;
        /// AI stops accelerating above this fraction of max speed
        pub const AI_CRUISE_RATIO: f32 = 0.85;
        /// AI yaw correction per step (fraction of the bearing error)
        pub const AI_STEER_GAIN: f32 = 0.08;
        /// AI aims this many track points beyond its furthest checkpoint
        pub const AI_LOOKAHEAD: usize = 8;
        /// Max heading change per step at full speed (radians, 5 degrees)
        pub const BASE_TURN_RATE: f32 = 5.0 * std::f32::consts::PI / 180.0;
        /// Fraction of the height error closed per step
        pub const GROUND_FOLLOW: f32 = 0.2;

        pub const TRACK_SEGMENTS: usize = 200;
        pub const MIN_TRACK_SEGMENTS: usize = 8;
        pub const TRACK_RADIUS_X: f32 = 400.0;
        pub const TRACK_RADIUS_Z: f32 = 300.0;
        pub const BARRIER_OFFSET: f32 = 100.0;
        /// Extra room around the track before cars are held back
        pub const WORLD_MARGIN: f32 = 250.0;

        /// Index window for checkpoint advance and lap wraparound
        pub const LAP_WINDOW: usize = 20;
        pub const DEFAULT_LAPS: u32 = 3;

        pub const EYE_HEIGHT: f32 = 2.0;
        pub const FOV_DEGREES: f32 = 60.0;
        pub const NEAR_PLANE: f32 = 0.5;

        /// Spawn track indices for the three rivals
        pub const RIVAL_SPAWNS: [usize; 3] = [10, 20, 30];
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit heading on the XZ ground plane for a yaw angle (x = cos, z = sin)
#[inline]
pub fn heading(yaw: f32) -> Vec2 {
    Vec2::new(yaw.cos(), yaw.sin())
}

/// Right-hand vector on the XZ ground plane for a yaw angle
#[inline]
pub fn right_of(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.sin(), yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-4);
        assert!((normalize_angle(PI) - (-PI)).abs() < 1e-6);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-4);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_heading_and_right_are_perpendicular() {
        for yaw in [0.0, 0.7, -2.1, PI] {
            assert!(heading(yaw).dot(right_of(yaw)).abs() < 1e-6);
        }
        // Turning right (increasing yaw) swings the heading toward the right vector
        let turned = heading(0.1);
        assert!(turned.dot(right_of(0.0)) > 0.0);
    }
}
