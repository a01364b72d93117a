//! Cars: class constants, per-step physics, AI steering

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::lap::{LapEvent, LapTracker};
use super::track::Track;
use crate::consts::racer::*;
use crate::{heading, normalize_angle};

/// Performance class of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarClass {
    Economy,
    #[default]
    Sports,
    Supercar,
    Muscle,
}

/// Constant bundle behind a car class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarStats {
    pub max_speed: f32,
    pub acceleration: f32,
    pub handling: f32,
    pub color: [u8; 3],
}

impl CarClass {
    pub const ALL: [CarClass; 4] = [
        CarClass::Economy,
        CarClass::Sports,
        CarClass::Supercar,
        CarClass::Muscle,
    ];

    pub const fn stats(self) -> CarStats {
        match self {
            CarClass::Economy => CarStats {
                max_speed: 200.0,
                acceleration: 7.0,
                handling: 0.95,
                color: [100, 150, 255],
            },
            CarClass::Sports => CarStats {
                max_speed: 240.0,
                acceleration: 12.0,
                handling: 0.88,
                color: [255, 80, 100],
            },
            CarClass::Supercar => CarStats {
                max_speed: 300.0,
                acceleration: 16.0,
                handling: 0.80,
                color: [255, 200, 50],
            },
            CarClass::Muscle => CarStats {
                max_speed: 260.0,
                acceleration: 14.0,
                handling: 0.75,
                color: [200, 80, 255],
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CarClass::Economy => "Economy",
            CarClass::Sports => "Sports",
            CarClass::Supercar => "Supercar",
            CarClass::Muscle => "Muscle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "economy" => Some(CarClass::Economy),
            "sports" => Some(CarClass::Sports),
            "supercar" => Some(CarClass::Supercar),
            "muscle" => Some(CarClass::Muscle),
            _ => None,
        }
    }
}

/// Who is driving a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Driver {
    Human,
    Ai,
}

/// Control input for one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarControls {
    pub accelerate: bool,
    pub brake: bool,
    /// Reverse modifier: turns braking into reverse thrust
    pub reverse: bool,
    /// -1.0 = full left, 1.0 = full right
    pub steer: f32,
}

/// A car entity
#[derive(Debug, Clone)]
pub struct Car {
    pub id: u32,
    pub class: CarClass,
    pub driver: Driver,
    pub pos: Vec3,
    /// Ground-plane velocity (x, z)
    pub vel: Vec2,
    /// Heading in radians, normalized to [-π, π)
    pub yaw: f32,
    /// Speed after the last step
    pub speed: f32,
    pub reversing: bool,
    pub distance_traveled: f32,
    pub lap: LapTracker,
    /// Tick at which the car completed its final lap
    pub finished_tick: Option<u64>,
}

impl Car {
    /// Spawn on a track point, facing along the track
    pub fn spawn(
        id: u32,
        class: CarClass,
        driver: Driver,
        track: &Track,
        index: usize,
        laps: u32,
    ) -> Self {
        let index = index % track.len();
        Self {
            id,
            class,
            driver,
            pos: track.points[index],
            vel: Vec2::ZERO,
            yaw: normalize_angle(track.direction_at(index)),
            speed: 0.0,
            reversing: false,
            distance_traveled: 0.0,
            lap: LapTracker::new(track.len(), index, laps),
            finished_tick: None,
        }
    }

    pub fn stats(&self) -> CarStats {
        self.class.stats()
    }

    pub fn is_finished(&self) -> bool {
        self.lap.is_finished()
    }

    pub fn forward(&self) -> Vec2 {
        heading(self.yaw)
    }

    /// Apply player controls to heading and velocity
    pub fn apply_controls(&mut self, controls: &CarControls) {
        let stats = self.stats();
        self.reversing = controls.reverse;

        let steer = controls.steer.clamp(-1.0, 1.0);
        if steer != 0.0 {
            self.steer(steer * turn_rate(self.speed, &stats));
        }

        let forward = self.forward();
        if controls.accelerate {
            self.vel += forward * stats.acceleration * PLAYER_THRUST_GAIN;
        }
        if controls.brake {
            if controls.reverse {
                self.vel -= forward * stats.acceleration * REVERSE_THRUST_GAIN;
            } else {
                self.vel *= BRAKE_FACTOR;
            }
        }
    }

    /// Steer toward a point a few checkpoints ahead and hold cruising speed
    pub fn apply_ai(&mut self, track: &Track) {
        let stats = self.stats();
        self.reversing = false;

        let target = track.point_after(self.lap.furthest, AI_LOOKAHEAD);
        let bearing = (target.z - self.pos.z).atan2(target.x - self.pos.x);
        let error = normalize_angle(bearing - self.yaw);
        self.steer(error * AI_STEER_GAIN);

        if self.speed < stats.max_speed * AI_CRUISE_RATIO {
            self.vel += self.forward() * stats.acceleration * AI_THRUST_GAIN;
        }
    }

    fn steer(&mut self, delta: f32) {
        self.yaw = normalize_angle(self.yaw + delta);
    }

    /// Friction, speed clamp, integration and ground follow.
    ///
    /// Returns the lap event produced by this step's position.
    pub fn integrate(&mut self, track: &Track, bounds: (Vec2, Vec2), dt: f32) -> LapEvent {
        let stats = self.stats();

        self.vel *= FRICTION;
        self.vel = clamp_speed(self.vel, stats.max_speed);
        self.speed = self.vel.length();

        self.pos.x += self.vel.x * dt;
        self.pos.z += self.vel.y * dt;
        self.hold_in_world(bounds);

        let closest = track.closest_index(self.pos);
        let ground = track.points[closest].y;
        self.pos.y += (ground - self.pos.y) * GROUND_FOLLOW;

        self.distance_traveled += self.speed * dt;
        self.lap.observe(closest)
    }

    /// Keep the car inside the world box, killing velocity into the edge
    fn hold_in_world(&mut self, (min, max): (Vec2, Vec2)) {
        if self.pos.x < min.x || self.pos.x > max.x {
            self.pos.x = self.pos.x.clamp(min.x, max.x);
            self.vel.x = 0.0;
        }
        if self.pos.z < min.y || self.pos.z > max.y {
            self.pos.z = self.pos.z.clamp(min.y, max.y);
            self.vel.y = 0.0;
        }
    }
}

/// Heading change per step at full steering lock; scales with speed ratio
pub fn turn_rate(speed: f32, stats: &CarStats) -> f32 {
    BASE_TURN_RATE * stats.handling * (speed / stats.max_speed.max(1.0))
}

/// Rescale `vel` so its length does not exceed `max_speed`
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed && speed > 0.0 {
        vel * (max_speed / speed)
    } else {
        vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn setup(class: CarClass) -> (Track, Car, (Vec2, Vec2)) {
        let track = Track::generate(200);
        let car = Car::spawn(1, class, Driver::Human, &track, 0, 3);
        let bounds = track.bounds(WORLD_MARGIN);
        (track, car, bounds)
    }

    #[test]
    fn test_class_table() {
        assert_eq!(CarClass::Supercar.stats().max_speed, 300.0);
        assert_eq!(CarClass::Economy.stats().handling, 0.95);
        assert_eq!(CarClass::Muscle.stats().color, [200, 80, 255]);
        for class in CarClass::ALL {
            assert_eq!(CarClass::from_str(class.as_str()), Some(class));
        }
        assert_eq!(CarClass::from_str("tractor"), None);
    }

    #[test]
    fn test_spawn_faces_track() {
        let (track, car, _) = setup(CarClass::Sports);
        assert_eq!(car.pos, track.points[0]);
        assert!((car.yaw - track.direction_at(0)).abs() < 1e-5);
        assert_eq!(car.lap.furthest, 0);
    }

    #[test]
    fn test_accelerate_hits_speed_cap() {
        let (track, mut car, bounds) = setup(CarClass::Sports);
        let controls = CarControls {
            accelerate: true,
            ..Default::default()
        };
        car.apply_controls(&controls);
        car.integrate(&track, bounds, SIM_DT);
        assert!((car.speed - 240.0).abs() < 1e-3);
        assert!(car.distance_traveled > 0.0);
    }

    #[test]
    fn test_friction_decays_velocity() {
        let (track, mut car, bounds) = setup(CarClass::Sports);
        car.vel = car.forward() * 100.0;
        car.integrate(&track, bounds, SIM_DT);
        assert!((car.speed - 97.0).abs() < 1e-3);
    }

    #[test]
    fn test_brake_and_reverse() {
        let (_, mut car, _) = setup(CarClass::Sports);
        car.vel = car.forward() * 100.0;
        car.apply_controls(&CarControls {
            brake: true,
            ..Default::default()
        });
        assert!((car.vel.length() - 80.0).abs() < 1e-3);

        car.vel = Vec2::ZERO;
        car.apply_controls(&CarControls {
            brake: true,
            reverse: true,
            ..Default::default()
        });
        assert!(car.reversing);
        assert!(car.vel.dot(car.forward()) < 0.0);
    }

    #[test]
    fn test_stationary_car_cannot_turn() {
        let (_, mut car, _) = setup(CarClass::Sports);
        let yaw = car.yaw;
        car.apply_controls(&CarControls {
            steer: 1.0,
            ..Default::default()
        });
        assert_eq!(car.yaw, yaw);
    }

    #[test]
    fn test_turn_rate_scales_with_speed() {
        let stats = CarClass::Sports.stats();
        let slow = turn_rate(60.0, &stats);
        let fast = turn_rate(240.0, &stats);
        assert!(fast > slow);
        assert!((fast - BASE_TURN_RATE * stats.handling).abs() < 1e-6);
    }

    #[test]
    fn test_steering_right_increases_yaw() {
        let (_, mut car, _) = setup(CarClass::Sports);
        car.yaw = 0.0;
        car.speed = 240.0;
        car.apply_controls(&CarControls {
            steer: 1.0,
            ..Default::default()
        });
        assert!(car.yaw > 0.0);
    }

    #[test]
    fn test_world_bounds_hold_car() {
        let (track, mut car, bounds) = setup(CarClass::Supercar);
        car.pos = Vec3::new(bounds.1.x - 1.0, car.pos.y, 0.0);
        car.yaw = 0.0;
        car.vel = Vec2::new(300.0, 0.0);
        for _ in 0..10 {
            car.integrate(&track, bounds, SIM_DT);
        }
        assert!(car.pos.x <= bounds.1.x);
        assert_eq!(car.vel.x, 0.0);
    }

    #[test]
    fn test_ground_follow_converges() {
        let (track, mut car, bounds) = setup(CarClass::Sports);
        car.pos.y += 100.0;
        for _ in 0..60 {
            car.integrate(&track, bounds, SIM_DT);
        }
        assert!((car.pos.y - track.points[0].y).abs() < 0.01);
    }

    #[test]
    fn test_ai_follows_track() {
        let track = Track::generate(200);
        let bounds = track.bounds(WORLD_MARGIN);
        let mut car = Car::spawn(2, CarClass::Economy, Driver::Ai, &track, 10, 3);
        for _ in 0..600 {
            car.apply_ai(&track);
            car.integrate(&track, bounds, SIM_DT);
        }
        assert!(car.lap.furthest > 40 || car.lap.laps > 0);
        // Stays near the centerline
        let closest = track.points[track.closest_index(car.pos)];
        let off_line = Vec2::new(closest.x - car.pos.x, closest.z - car.pos.z).length();
        assert!(off_line < BARRIER_OFFSET * 1.5);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_class_max(
            class_idx in 0usize..4,
            vx in -5000.0f32..5000.0,
            vz in -5000.0f32..5000.0,
            accelerate in any::<bool>(),
            brake in any::<bool>(),
            reverse in any::<bool>(),
            steer in -1.0f32..1.0,
            steps in 1usize..20,
        ) {
            let class = CarClass::ALL[class_idx];
            let (track, mut car, bounds) = setup(class);
            car.vel = Vec2::new(vx, vz);
            let controls = CarControls { accelerate, brake, reverse, steer };
            for _ in 0..steps {
                car.apply_controls(&controls);
                car.integrate(&track, bounds, SIM_DT);
                prop_assert!(car.speed <= class.stats().max_speed + 1e-3);
                prop_assert!(car.vel.length() <= class.stats().max_speed + 1e-3);
            }
        }
    }
}
