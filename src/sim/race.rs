//! Lap race session state and fixed-timestep tick

use glam::Vec2;

use super::car::{Car, CarClass, CarControls, Driver};
use super::lap::LapEvent;
use super::phase::{GamePhase, PhaseCommand};
use super::track::Track;
use crate::consts::racer::*;

/// Input commands for a single race tick
#[derive(Debug, Clone, Default)]
pub struct RaceInput {
    pub controls: CarControls,
    /// Start from the menu / leave the results screen
    pub confirm: bool,
}

/// Race configuration fixed for a session
#[derive(Debug, Clone)]
pub struct RaceConfig {
    pub laps: u32,
    pub track_segments: usize,
    pub player_class: CarClass,
    pub player_driver: Driver,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            laps: DEFAULT_LAPS,
            track_segments: TRACK_SEGMENTS,
            player_class: CarClass::Sports,
            player_driver: Driver::Human,
        }
    }
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct RaceState {
    pub config: RaceConfig,
    pub phase: GamePhase,
    pub track: Track,
    /// World box cars are held inside
    pub bounds: (Vec2, Vec2),
    /// Player first, then rivals (sorted by id)
    pub cars: Vec<Car>,
    /// Car ids in the order they completed the race
    pub finish_order: Vec<u32>,
    pub time_ticks: u64,
}

/// Id of the player's car
pub const PLAYER_ID: u32 = 1;

/// Rival classes, matched with `RIVAL_SPAWNS`
const RIVAL_CLASSES: [CarClass; 3] = [CarClass::Supercar, CarClass::Muscle, CarClass::Economy];

impl RaceState {
    pub fn new(config: RaceConfig) -> Self {
        let track = Track::generate(config.track_segments);
        let bounds = track.bounds(WORLD_MARGIN);
        let mut state = Self {
            config,
            phase: GamePhase::Menu,
            track,
            bounds,
            cars: Vec::new(),
            finish_order: Vec::new(),
            time_ticks: 0,
        };
        state.reset_grid();
        state
    }

    /// Put every car back on its spawn point
    fn reset_grid(&mut self) {
        let laps = self.config.laps;
        let mut cars = Vec::with_capacity(1 + RIVAL_SPAWNS.len());
        cars.push(Car::spawn(
            PLAYER_ID,
            self.config.player_class,
            self.config.player_driver,
            &self.track,
            0,
            laps,
        ));
        for (i, (&spawn, &class)) in RIVAL_SPAWNS.iter().zip(RIVAL_CLASSES.iter()).enumerate() {
            if spawn < self.track.len() {
                let id = PLAYER_ID + 1 + i as u32;
                cars.push(Car::spawn(id, class, Driver::Ai, &self.track, spawn, laps));
            }
        }
        self.cars = cars;
        self.finish_order.clear();
        self.time_ticks = 0;
    }

    pub fn player(&self) -> &Car {
        &self.cars[0]
    }

    /// Cars ordered by race position: finishers first (in finish order),
    /// then by laps and checkpoints, then distance traveled.
    pub fn standings(&self) -> Vec<&Car> {
        let mut order: Vec<&Car> = self.cars.iter().collect();
        order.sort_by(|a, b| {
            let fa = self.finish_position(a.id).unwrap_or(usize::MAX);
            let fb = self.finish_position(b.id).unwrap_or(usize::MAX);
            fa.cmp(&fb)
                .then_with(|| b.lap.progress().cmp(&a.lap.progress()))
                .then_with(|| {
                    b.distance_traveled
                        .partial_cmp(&a.distance_traveled)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.id.cmp(&b.id))
        });
        order
    }

    fn finish_position(&self, id: u32) -> Option<usize> {
        self.finish_order.iter().position(|&f| f == id)
    }

    /// 1-based race position of the player
    pub fn player_position(&self) -> usize {
        self.standings()
            .iter()
            .position(|c| c.id == PLAYER_ID)
            .map(|p| p + 1)
            .unwrap_or(self.cars.len())
    }
}

/// Advance the race by one fixed timestep
pub fn tick(state: &mut RaceState, input: &RaceInput, dt: f32) {
    if input.confirm {
        match state.phase.on_confirm() {
            PhaseCommand::Start => {
                state.reset_grid();
                state.phase = GamePhase::Playing;
                log::info!(
                    "Race started: {} laps, {} track points, player {}",
                    state.config.laps,
                    state.track.len(),
                    state.player().class.as_str()
                );
                return;
            }
            PhaseCommand::ReturnToMenu => {
                state.reset_grid();
                state.phase = GamePhase::Menu;
                return;
            }
            PhaseCommand::None => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    for car in &mut state.cars {
        if car.is_finished() {
            continue;
        }
        match car.driver {
            Driver::Human => car.apply_controls(&input.controls),
            Driver::Ai => car.apply_ai(&state.track),
        }
        match car.integrate(&state.track, state.bounds, dt) {
            LapEvent::Lap(n) => {
                log::info!("Car {} ({}) completed lap {}", car.id, car.class.as_str(), n);
            }
            LapEvent::Finished => {
                car.finished_tick = Some(state.time_ticks);
                state.finish_order.push(car.id);
                log::info!(
                    "Car {} ({}) finished in position {} after {} ticks",
                    car.id,
                    car.class.as_str(),
                    state.finish_order.len(),
                    state.time_ticks
                );
            }
            LapEvent::Advanced | LapEvent::None => {}
        }
    }

    if state.player().is_finished() {
        state.phase = GamePhase::Finished;
        log::info!("Race finished, player position {}", state.player_position());
    }
}
