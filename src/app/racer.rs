//! Race adapter and attract-mode pilot

use super::{Game, InputSource};
use crate::platform::{InputAction, InputSnapshot, Key};
use crate::renderer::{Frame, draw_race};
use crate::sim::race::tick;
use crate::sim::{CarControls, GamePhase, RaceConfig, RaceInput, RaceState};

/// Map held actions to car controls
pub fn controls_from(input: &InputSnapshot) -> CarControls {
    let mut steer = 0.0;
    if input.is_held(InputAction::SteerLeft) {
        steer -= 1.0;
    }
    if input.is_held(InputAction::SteerRight) {
        steer += 1.0;
    }
    CarControls {
        accelerate: input.is_held(InputAction::Accelerate),
        brake: input.is_held(InputAction::Brake),
        reverse: input.is_held(InputAction::Reverse),
        steer,
    }
}

pub struct RaceGame {
    pub state: RaceState,
    last_phase: GamePhase,
}

impl RaceGame {
    pub fn new(config: RaceConfig) -> Self {
        let state = RaceState::new(config);
        let last_phase = state.phase;
        Self { state, last_phase }
    }

    fn log_standings(&self) {
        for (i, car) in self.state.standings().iter().enumerate() {
            log::info!(
                "  {}. car {} ({}) laps {} ticks {}",
                i + 1,
                car.id,
                car.class.as_str(),
                car.lap.laps,
                car.finished_tick.map_or_else(|| "-".to_string(), |t| t.to_string())
            );
        }
    }
}

impl Game for RaceGame {
    fn title(&self) -> &'static str {
        "Racer"
    }

    fn step(&mut self, input: &InputSnapshot, dt: f32) {
        let input = RaceInput {
            controls: controls_from(input),
            confirm: input.was_pressed(InputAction::Confirm),
        };
        tick(&mut self.state, &input, dt);

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {} -> {}", self.last_phase.as_str(), phase.as_str());
            if phase == GamePhase::Finished {
                log::info!("Final standings:");
                self.log_standings();
            }
            self.last_phase = phase;
        }
    }

    fn render(&self) -> Frame {
        draw_race(&self.state)
    }

    fn phase(&self) -> GamePhase {
        self.state.phase
    }
}

/// Starts one race and quits once it is over.
///
/// Only presses Space; pair it with an AI-driven player car.
#[derive(Debug, Clone, Default)]
pub struct RacePilot {
    started: bool,
}

impl InputSource<RaceGame> for RacePilot {
    fn poll(&mut self, game: &RaceGame) -> Vec<Key> {
        match game.state.phase {
            GamePhase::Menu if !self.started => {
                self.started = true;
                vec![Key::Space]
            }
            GamePhase::Playing => Vec::new(),
            _ => vec![Key::Escape],
        }
    }
}
