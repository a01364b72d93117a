//! Flap-through-pipes session state and fixed-timestep tick

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Aabb, Pipe, hits_pipe, out_of_bounds};
use super::phase::{GamePhase, PhaseCommand};
use crate::consts::flappy::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct FlappyInput {
    /// Confirm/flap was pressed this frame
    pub flap: bool,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Left the top or bottom of the screen
    Boundary,
    /// Flew into a pipe
    Pipe,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Top-left corner in screen pixels
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive = down)
    pub vel_y: f32,
    pub size: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, SCREEN_HEIGHT / 2.0),
            vel_y: 0.0,
            size: BIRD_SIZE,
        }
    }
}

impl Bird {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, Vec2::splat(self.size))
    }

    pub fn flap(&mut self) {
        self.vel_y = FLAP_VELOCITY;
    }

    /// Gravity, then position (semi-implicit Euler)
    pub fn fall(&mut self, dt: f32) {
        self.vel_y = (self.vel_y + GRAVITY * dt).min(TERMINAL_FALL_SPEED);
        self.pos.y += self.vel_y * dt;
    }
}

/// Current difficulty, recomputed whenever a pipe spawns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Scroll speed (pixels/s)
    pub speed: f32,
    pub gap: f32,
}

impl Difficulty {
    pub fn for_pipes_passed(passed: u32) -> Self {
        let passed = passed as f32;
        Self {
            speed: BASE_SPEED + passed * SPEED_PER_PIPE,
            gap: (BASE_GAP - passed * GAP_SHRINK_PER_PIPE).max(MIN_GAP),
        }
    }
}

/// Complete pipe game state
#[derive(Debug, Clone)]
pub struct FlappyState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pipes, oldest (leftmost) first
    pub pipes: Vec<Pipe>,
    pub score: u64,
    pub pipes_passed: u32,
    pub difficulty: Difficulty,
    pub game_over_cause: Option<GameOverCause>,
    pub time_ticks: u64,
}

impl FlappyState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            pipes_passed: 0,
            difficulty: Difficulty::for_pipes_passed(0),
            game_over_cause: None,
            time_ticks: 0,
        };
        state.reset_run();
        state
    }

    /// Fresh bird and pipes; the RNG stream continues so runs differ
    fn reset_run(&mut self) {
        self.bird = Bird::default();
        self.pipes.clear();
        self.score = 0;
        self.pipes_passed = 0;
        self.difficulty = Difficulty::for_pipes_passed(0);
        self.game_over_cause = None;
        self.time_ticks = 0;
        self.spawn_pipe();
    }

    /// Spawn a pipe at the right edge with the current difficulty
    pub fn spawn_pipe(&mut self) {
        self.difficulty = Difficulty::for_pipes_passed(self.pipes_passed);
        let gap = self.difficulty.gap;
        let lowest = (SCREEN_HEIGHT - gap - PIPE_EDGE_MARGIN).max(PIPE_EDGE_MARGIN);
        let gap_top = self.rng.random_range(PIPE_EDGE_MARGIN..=lowest).round();
        log::debug!(
            "Pipe spawned: gap_top={} gap={} speed={}",
            gap_top,
            gap,
            self.difficulty.speed
        );
        self.pipes.push(Pipe::new(SCREEN_WIDTH, gap_top, gap));
    }

    fn end_run(&mut self, cause: GameOverCause) {
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        // Keep the bird drawable
        self.bird.pos.y = self.bird.pos.y.clamp(0.0, SCREEN_HEIGHT - self.bird.size);
        log::info!("Game over ({:?}): score {}", cause, self.score);
    }
}

/// Advance the pipe game by one fixed timestep
pub fn tick(state: &mut FlappyState, input: &FlappyInput, dt: f32) {
    if input.flap {
        match state.phase.on_confirm() {
            PhaseCommand::Start => {
                state.reset_run();
                state.phase = GamePhase::Playing;
                log::info!("Run started");
                return;
            }
            PhaseCommand::ReturnToMenu => {
                state.reset_run();
                state.phase = GamePhase::Menu;
                return;
            }
            PhaseCommand::None => state.bird.flap(),
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    state.bird.fall(dt);
    if out_of_bounds(&state.bird.bounds(), SCREEN_HEIGHT) {
        state.end_run(GameOverCause::Boundary);
        return;
    }

    let speed = state.difficulty.speed;
    let bird_x = state.bird.pos.x;
    for pipe in &mut state.pipes {
        pipe.x -= speed * dt;
        if !pipe.passed && pipe.right() < bird_x {
            pipe.passed = true;
            state.score += 1;
            state.pipes_passed += 1;
        }
    }

    state.pipes.retain(|p| p.x > PIPE_DESPAWN_X);

    let needs_pipe = state
        .pipes
        .last()
        .map(|p| p.x < SCREEN_WIDTH - PIPE_SPACING)
        .unwrap_or(true);
    if needs_pipe {
        state.spawn_pipe();
    }

    let body = state.bird.bounds();
    if state.pipes.iter().any(|p| hits_pipe(&body, p)) {
        state.end_run(GameOverCause::Pipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn flap() -> FlappyInput {
        FlappyInput { flap: true }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = FlappyState::new(7);
        assert_eq!(state.phase, GamePhase::Menu);
        tick(&mut state, &FlappyInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.bird.pos.y, SCREEN_HEIGHT / 2.0);

        tick(&mut state, &flap(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.pipes.len(), 1);
    }

    #[test]
    fn test_flap_sets_upward_velocity() {
        let mut state = FlappyState::new(7);
        tick(&mut state, &flap(), SIM_DT);
        tick(&mut state, &flap(), SIM_DT);
        // Flap, then one step of gravity
        assert!((state.bird.vel_y - (FLAP_VELOCITY + GRAVITY * SIM_DT)).abs() < 1e-3);
        assert!(state.bird.pos.y < SCREEN_HEIGHT / 2.0);
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let mut bird = Bird::default();
        for _ in 0..200 {
            bird.fall(SIM_DT);
        }
        assert_eq!(bird.vel_y, TERMINAL_FALL_SPEED);
    }

    #[test]
    fn test_no_flap_falls_out_of_bounds() {
        let mut state = FlappyState::new(42);
        tick(&mut state, &flap(), SIM_DT);

        // Time to cross the whole screen at terminal speed, plus time to reach it
        let fall_steps = (SCREEN_HEIGHT / TERMINAL_FALL_SPEED / SIM_DT).ceil() as u32;
        let ramp_steps = (TERMINAL_FALL_SPEED / GRAVITY / SIM_DT).ceil() as u32;
        for _ in 0..fall_steps + ramp_steps {
            tick(&mut state, &FlappyInput::default(), SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_cause, Some(GameOverCause::Boundary));
        assert!(state.bird.bounds().bottom() <= SCREEN_HEIGHT);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ceiling_is_a_boundary() {
        let mut state = FlappyState::new(1);
        tick(&mut state, &flap(), SIM_DT);
        for _ in 0..120 {
            tick(&mut state, &flap(), SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.game_over_cause, Some(GameOverCause::Boundary));
        assert_eq!(state.bird.pos.y, 0.0);
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = FlappyState::new(3);
        tick(&mut state, &flap(), SIM_DT);
        // Pipe already overlapping the bird's front edge, gap far above it
        state.pipes = vec![Pipe::new(BIRD_X + BIRD_SIZE - 1.0, 0.0, 10.0)];
        for _ in 0..10 {
            tick(&mut state, &FlappyInput::default(), SIM_DT);
        }
        assert_eq!(state.game_over_cause, Some(GameOverCause::Pipe));
    }

    #[test]
    fn test_passing_pipe_scores_and_ramps_difficulty() {
        let mut state = FlappyState::new(3);
        tick(&mut state, &flap(), SIM_DT);
        // A pipe whose right edge is just ahead of the bird, wide open gap
        state.pipes = vec![Pipe::new(BIRD_X - PIPE_WIDTH + 1.0, 0.0, SCREEN_HEIGHT)];
        tick(&mut state, &FlappyInput::default(), SIM_DT);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);

        state.spawn_pipe();
        assert_eq!(state.difficulty, Difficulty::for_pipes_passed(1));
        assert_eq!(state.difficulty.speed, BASE_SPEED + SPEED_PER_PIPE);
        assert_eq!(state.difficulty.gap, BASE_GAP - GAP_SHRINK_PER_PIPE);
    }

    #[test]
    fn test_gap_has_floor() {
        assert_eq!(Difficulty::for_pipes_passed(1000).gap, MIN_GAP);
    }

    #[test]
    fn test_spawned_gaps_respect_margins() {
        let mut state = FlappyState::new(99);
        for passed in 0..40 {
            state.pipes_passed = passed;
            state.spawn_pipe();
            let pipe = state.pipes.last().unwrap();
            assert!(pipe.gap_top >= PIPE_EDGE_MARGIN);
            assert!(pipe.gap_bottom() <= SCREEN_HEIGHT - PIPE_EDGE_MARGIN);
            assert_eq!(pipe.x, SCREEN_WIDTH);
        }
    }

    #[test]
    fn test_pipes_spawn_and_despawn() {
        let mut state = FlappyState::new(5);
        tick(&mut state, &flap(), SIM_DT);
        let mut max_pipes = 0;
        for _ in 0..600 {
            // Pin the bird at the top with every gap wide open
            state.bird.pos.y = 0.0;
            state.bird.vel_y = 0.0;
            state.pipes.iter_mut().for_each(|p| {
                p.gap_top = 0.0;
                p.gap = SCREEN_HEIGHT;
            });
            tick(&mut state, &FlappyInput::default(), SIM_DT);
            assert_eq!(state.phase, GamePhase::Playing);
            max_pipes = max_pipes.max(state.pipes.len());
            assert!(state.pipes.iter().all(|p| p.x > PIPE_DESPAWN_X));
        }
        assert!(state.score > 0);
        assert!(max_pipes >= 2);
    }

    #[test]
    fn test_same_seed_same_pipes() {
        let mut a = FlappyState::new(1234);
        let mut b = FlappyState::new(1234);
        for _ in 0..5 {
            a.spawn_pipe();
            b.spawn_pipe();
        }
        assert_eq!(a.pipes, b.pipes);
    }

    #[test]
    fn test_game_over_returns_to_menu() {
        let mut state = FlappyState::new(8);
        tick(&mut state, &flap(), SIM_DT);
        state.end_run(GameOverCause::Pipe);
        state.score = 12;
        tick(&mut state, &flap(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_over_cause, None);
        assert_eq!(state.bird, Bird::default());
    }
}
