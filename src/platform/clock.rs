//! Fixed-timestep accumulator and frame pacing

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

/// Splits wall-clock time into fixed simulation steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    pub step: f32,
    pub max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed time, returning how many steps to run
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DELTA);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

/// How the loop waits between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep to hold the target frame rate and feed measured time
    RealTime,
    /// Exactly one step per frame, no sleeping
    Unthrottled,
}

/// Per-frame clock driving the fixed-timestep accumulator
#[derive(Debug)]
pub struct FrameClock {
    pacing: Pacing,
    frame_duration: Duration,
    timestep: FixedTimestep,
    last_frame: Instant,
    next_deadline: Instant,
    pub frames: u64,
}

impl FrameClock {
    pub fn new(frame_rate: u32, pacing: Pacing) -> Self {
        let now = Instant::now();
        let frame_duration = Duration::from_nanos(1_000_000_000 / frame_rate.max(1) as u64);
        Self {
            pacing,
            frame_duration,
            timestep: FixedTimestep::default(),
            last_frame: now,
            next_deadline: now + frame_duration,
            frames: 0,
        }
    }

    pub fn step_dt(&self) -> f32 {
        self.timestep.step
    }

    /// Simulation steps owed for the frame that is starting
    pub fn begin_frame(&mut self) -> u32 {
        self.frames += 1;
        match self.pacing {
            Pacing::Unthrottled => 1,
            Pacing::RealTime => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.timestep.advance(elapsed)
            }
        }
    }

    /// Sleep until the next frame is due
    pub fn end_frame(&mut self) {
        if self.pacing == Pacing::Unthrottled {
            return;
        }
        let now = Instant::now();
        if self.next_deadline > now {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame_duration;
        } else {
            // Fell behind; restart the schedule from now
            self.next_deadline = now + self.frame_duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_steps() {
        let mut ts = FixedTimestep::new(0.01, 8);
        assert_eq!(ts.advance(0.005), 0);
        assert_eq!(ts.advance(0.006), 1);
        assert_eq!(ts.advance(0.025), 2);
    }

    #[test]
    fn test_caps_substeps() {
        let mut ts = FixedTimestep::new(0.01, 4);
        assert_eq!(ts.advance(0.2), 4);
        // Backlog was dropped, not carried forever
        assert!(ts.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut ts = FixedTimestep::default();
        assert_eq!(ts.advance(-1.0), 0);
    }

    #[test]
    fn test_unthrottled_is_one_step_per_frame() {
        let mut clock = FrameClock::new(60, Pacing::Unthrottled);
        for _ in 0..5 {
            assert_eq!(clock.begin_frame(), 1);
            clock.end_frame();
        }
        assert_eq!(clock.frames, 5);
    }
}
