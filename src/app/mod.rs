//! Session loop
//!
//! A `Session` owns one game, an input source, a presentation surface and the
//! frame clock. Each frame: poll input, run the owed fixed steps, render,
//! present, then pace.

pub mod flappy;
pub mod racer;

pub use flappy::{FlappyGame, FlappyPilot};
pub use racer::{RaceGame, RacePilot};

use crate::error::ArcadeError;
use crate::platform::{
    ActionStates, FrameClock, InputAction, InputCollector, Key, KeyBindings, Pacing,
};
use crate::renderer::Frame;
use crate::sim::GamePhase;

/// A game the session loop can drive
pub trait Game {
    fn title(&self) -> &'static str;

    /// Advance one fixed timestep
    fn step(&mut self, input: &crate::platform::InputSnapshot, dt: f32);

    fn render(&self) -> Frame;

    fn phase(&self) -> GamePhase;
}

/// Produces the keys held for the next frame.
///
/// Sources may look at the game (attract-mode pilots do); holding Escape
/// ends the session.
pub trait InputSource<G> {
    fn poll(&mut self, game: &G) -> Vec<Key>;
}

/// Replays a fixed list of held-key sets, one per frame, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<Vec<Key>>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<Key>>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl<G> InputSource<G> for ScriptedInput {
    fn poll(&mut self, _game: &G) -> Vec<Key> {
        let keys = self
            .frames
            .get(self.cursor)
            .cloned()
            .unwrap_or_else(|| vec![Key::Escape]);
        self.cursor += 1;
        keys
    }
}

/// Where rendered frames go
pub trait Surface {
    fn present(&mut self, frame: &Frame) -> Result<(), ArcadeError>;
}

/// Surface that only keeps statistics
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub frames: u64,
    pub triangles: u64,
    pub last_triangle_count: usize,
}

impl Surface for HeadlessSurface {
    fn present(&mut self, frame: &Frame) -> Result<(), ArcadeError> {
        self.frames += 1;
        self.last_triangle_count = frame.triangle_count();
        self.triangles += self.last_triangle_count as u64;
        log::trace!(
            "Frame {}: {} triangles ({}x{})",
            self.frames,
            self.last_triangle_count,
            frame.viewport.width,
            frame.viewport.height
        );
        Ok(())
    }
}

/// Everything one running game needs
pub struct Session<G, I, S> {
    pub game: G,
    pub input: I,
    pub surface: S,
    clock: FrameClock,
    collector: InputCollector,
    /// Presses not yet seen by a simulation step
    unconsumed: ActionStates,
    running: bool,
}

impl<G, I, S> Session<G, I, S>
where
    G: Game,
    I: InputSource<G>,
    S: Surface,
{
    pub fn new(game: G, input: I, surface: S, frame_rate: u32, pacing: Pacing) -> Self {
        Self {
            game,
            input,
            surface,
            clock: FrameClock::new(frame_rate, pacing),
            collector: InputCollector::new(KeyBindings::default()),
            unconsumed: ActionStates::default(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames
    }

    /// Run until the input source quits or the surface fails
    pub fn run(&mut self) -> Result<(), ArcadeError> {
        log::info!("{} session started", self.game.title());
        while self.running {
            self.run_frame()?;
        }
        log::info!(
            "{} session ended after {} frames ({})",
            self.game.title(),
            self.clock.frames,
            self.game.phase().as_str()
        );
        Ok(())
    }

    /// Run at most `count` frames; returns how many ran
    pub fn run_frames(&mut self, count: u64) -> Result<u64, ArcadeError> {
        let mut ran = 0;
        while self.running && ran < count {
            self.run_frame()?;
            ran += 1;
        }
        Ok(ran)
    }

    /// One loop iteration
    pub fn run_frame(&mut self) -> Result<(), ArcadeError> {
        let held = self.input.poll(&self.game);
        let mut snapshot = self.collector.collect(&held);
        if snapshot.is_held(InputAction::Quit) {
            log::info!("Quit requested");
            self.running = false;
            return Ok(());
        }

        snapshot.pressed = snapshot.pressed.union(self.unconsumed);
        let steps = self.clock.begin_frame();
        let dt = self.clock.step_dt();
        if steps == 0 {
            // Keep presses for the next frame that simulates
            self.unconsumed = snapshot.pressed;
        } else {
            self.unconsumed = ActionStates::default();
            self.game.step(&snapshot, dt);
            let rest = snapshot.without_presses();
            for _ in 1..steps {
                self.game.step(&rest, dt);
            }
        }

        let frame = self.game.render();
        if let Err(error) = self.surface.present(&frame) {
            self.running = false;
            return Err(error);
        }

        self.clock.end_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::InputSnapshot;
    use crate::sim::Viewport;

    /// Counts steps and presses
    #[derive(Default)]
    struct Counter {
        steps: u32,
        confirms: u32,
        phase: GamePhase,
    }

    impl Game for Counter {
        fn title(&self) -> &'static str {
            "counter"
        }

        fn step(&mut self, input: &InputSnapshot, _dt: f32) {
            self.steps += 1;
            if input.was_pressed(InputAction::Confirm) {
                self.confirms += 1;
                self.phase = GamePhase::Playing;
            }
        }

        fn render(&self) -> Frame {
            Frame::new(Viewport::new(10.0, 10.0))
        }

        fn phase(&self) -> GamePhase {
            self.phase
        }
    }

    struct FailingSurface;

    impl Surface for FailingSurface {
        fn present(&mut self, _frame: &Frame) -> Result<(), ArcadeError> {
            Err(ArcadeError::Surface("lost".into()))
        }
    }

    fn session(script: Vec<Vec<Key>>) -> Session<Counter, ScriptedInput, HeadlessSurface> {
        Session::new(
            Counter::default(),
            ScriptedInput::new(script),
            HeadlessSurface::default(),
            60,
            Pacing::Unthrottled,
        )
    }

    #[test]
    fn test_runs_until_script_ends() {
        let mut s = session(vec![vec![], vec![Key::Space], vec![Key::Space], vec![]]);
        s.run().unwrap();
        assert!(!s.is_running());
        assert_eq!(s.game.steps, 4);
        // Held Space counts once
        assert_eq!(s.game.confirms, 1);
        assert_eq!(s.surface.frames, 4);
    }

    #[test]
    fn test_escape_stops_immediately() {
        let mut s = session(vec![vec![], vec![Key::Escape], vec![]]);
        assert_eq!(s.run_frames(10).unwrap(), 2);
        assert_eq!(s.game.steps, 1);
    }

    #[test]
    fn test_surface_error_ends_session() {
        let mut s = Session::new(
            Counter::default(),
            ScriptedInput::new(vec![vec![]; 5]),
            FailingSurface,
            60,
            Pacing::Unthrottled,
        );
        assert!(matches!(s.run(), Err(ArcadeError::Surface(_))));
        assert!(!s.is_running());
        assert_eq!(s.game.steps, 1);
    }

    #[test]
    fn test_run_frames_bounded() {
        let mut s = session(vec![vec![]; 100]);
        assert_eq!(s.run_frames(30).unwrap(), 30);
        assert!(s.is_running());
        assert_eq!(s.frames(), 30);
    }
}
