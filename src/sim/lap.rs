//! Checkpoint and lap progress from the closest track index

use crate::consts::racer::LAP_WINDOW;

/// Result of feeding one closest-index sample to a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LapEvent {
    None,
    /// Furthest checkpoint moved forward
    Advanced,
    /// A lap was completed (carries the new lap count)
    Lap(u32),
    /// The final lap was completed
    Finished,
}

/// Tracks how far around the loop a car has got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapTracker {
    /// Number of points on the track
    pub track_len: usize,
    /// Furthest checkpoint index reached on the current lap
    pub furthest: usize,
    pub laps: u32,
    pub target_laps: u32,
}

impl LapTracker {
    pub fn new(track_len: usize, start_index: usize, target_laps: u32) -> Self {
        Self {
            track_len,
            furthest: start_index,
            laps: 0,
            target_laps,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.laps >= self.target_laps
    }

    /// Index window for advance and wraparound, at most a quarter of the loop
    pub fn window(&self) -> usize {
        LAP_WINDOW.min(self.track_len / 4).max(1)
    }

    /// Feed this step's closest track index.
    ///
    /// Forward progress only counts in steps of at most `window()` indices,
    /// and a lap only counts when the car wraps from the last `window()`
    /// points to the first `window()` points.
    pub fn observe(&mut self, closest: usize) -> LapEvent {
        if self.is_finished() {
            return LapEvent::None;
        }

        let window = self.window();
        if closest > self.furthest {
            if closest - self.furthest <= window {
                self.furthest = closest;
                return LapEvent::Advanced;
            }
            return LapEvent::None;
        }

        let near_end = self.furthest + window >= self.track_len;
        if closest < self.furthest && closest < window && near_end {
            self.laps += 1;
            self.furthest = closest;
            if self.is_finished() {
                return LapEvent::Finished;
            }
            return LapEvent::Lap(self.laps);
        }

        LapEvent::None
    }

    /// Monotonic progress measure: whole laps plus checkpoints
    pub fn progress(&self) -> usize {
        self.laps as usize * self.track_len + self.furthest
    }
}
