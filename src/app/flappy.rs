//! Pipe game adapter and attract-mode pilot

use std::path::PathBuf;

use super::{Game, InputSource};
use crate::highscores::{HighScores, now_millis};
use crate::platform::{InputAction, InputSnapshot, Key};
use crate::renderer::{Frame, draw_flappy};
use crate::sim::flappy::tick;
use crate::sim::{FlappyInput, FlappyState, GamePhase};

/// Pipe game plus its leaderboard
pub struct FlappyGame {
    pub state: FlappyState,
    pub scores: HighScores,
    /// Where the leaderboard is saved; `None` keeps it in memory
    scores_path: Option<PathBuf>,
    last_phase: GamePhase,
}

impl FlappyGame {
    pub fn new(seed: u64, scores: HighScores, scores_path: Option<PathBuf>) -> Self {
        let state = FlappyState::new(seed);
        let last_phase = state.phase;
        log::info!("Pipe game seeded with {}", seed);
        Self {
            state,
            scores,
            scores_path,
            last_phase,
        }
    }

    fn record_score(&mut self) {
        let score = self.state.score;
        let speed = self.state.difficulty.speed;
        match self.scores.add_score(score, speed, now_millis()) {
            Some(rank) => {
                log::info!("New high score #{}: {}", rank, score);
                if let Some(path) = &self.scores_path {
                    if let Err(e) = self.scores.save(path) {
                        log::warn!("Failed to save high scores: {}", e);
                    }
                }
            }
            None => log::info!("Score {} did not make the leaderboard", score),
        }
    }
}

impl Game for FlappyGame {
    fn title(&self) -> &'static str {
        "Flappy"
    }

    fn step(&mut self, input: &InputSnapshot, dt: f32) {
        let input = FlappyInput {
            flap: input.was_pressed(InputAction::Confirm),
        };
        tick(&mut self.state, &input, dt);

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {} -> {}", self.last_phase.as_str(), phase.as_str());
            if phase == GamePhase::GameOver {
                self.record_score();
            }
            self.last_phase = phase;
        }
    }

    fn render(&self) -> Frame {
        draw_flappy(&self.state)
    }

    fn phase(&self) -> GamePhase {
        self.state.phase
    }
}

/// Plays a number of runs, then quits.
///
/// Flaps when the bird sinks to the bottom of the next gap.
#[derive(Debug, Clone)]
pub struct FlappyPilot {
    runs: u32,
    completed: u32,
    space_down: bool,
    last_phase: GamePhase,
}

/// How far above the gap bottom the bird's feet may sink before flapping
const FLAP_CLEARANCE: f32 = 20.0;

impl FlappyPilot {
    pub fn new(runs: u32) -> Self {
        Self {
            runs,
            completed: 0,
            space_down: false,
            last_phase: GamePhase::Menu,
        }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    fn wants_flap(state: &FlappyState) -> bool {
        let bird = &state.bird;
        if bird.vel_y < 0.0 {
            return false;
        }
        let floor = state
            .pipes
            .iter()
            .find(|p| p.right() >= bird.pos.x)
            .map(|p| p.gap_bottom())
            .unwrap_or(crate::consts::flappy::SCREEN_HEIGHT * 0.75);
        bird.bounds().bottom() > floor - FLAP_CLEARANCE
    }
}

impl InputSource<FlappyGame> for FlappyPilot {
    fn poll(&mut self, game: &FlappyGame) -> Vec<Key> {
        let state = &game.state;
        if state.phase == GamePhase::GameOver && self.last_phase != GamePhase::GameOver {
            self.completed += 1;
        }
        self.last_phase = state.phase;

        let done = self.completed >= self.runs;
        let wants_space = match state.phase {
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Finished if done => {
                return vec![Key::Escape];
            }
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Finished => true,
            GamePhase::Playing => Self::wants_flap(state),
        };

        // Presses are edges: release for a frame between them
        let press = wants_space && !self.space_down;
        self.space_down = press;
        if press { vec![Key::Space] } else { Vec::new() }
    }
}
