//! Best pipe-game runs, kept as a small sorted JSON file

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ArcadeError;
use crate::persistence::{read_json, write_json_atomic};

pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Pipes passed
    pub score: u64,
    /// Scroll speed reached (pixels/s)
    pub top_speed: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// Sorted best-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` would earn a place on the board
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && self.rank_for(score) <= MAX_HIGH_SCORES
    }

    /// 1-based place `score` would take; equal scores rank after existing ones
    fn rank_for(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score) + 1
    }

    /// Insert a run's result. Returns its 1-based rank, or `None` when it
    /// falls off the board.
    pub fn add_score(&mut self, score: u64, top_speed: f32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.rank_for(score);
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                top_speed,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from disk; missing file starts fresh
    pub fn load(path: &Path) -> Result<Self, ArcadeError> {
        match read_json::<HighScores>(path)? {
            Some(scores) => {
                log::info!("Leaderboard loaded: {} entries", scores.entries.len());
                Ok(scores)
            }
            None => {
                log::info!("No leaderboard at {}, starting empty", path.display());
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ArcadeError> {
        write_json_atomic(path, self)?;
        log::debug!("Leaderboard written to {}", path.display());
        Ok(())
    }
}

/// Milliseconds since the Unix epoch (0 if the clock is before it)
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 390.0, 1), Some(1));
        assert_eq!(scores.add_score(9, 510.0, 2), Some(1));
        assert_eq!(scores.add_score(7, 450.0, 3), Some(2));
        assert_eq!(scores.add_score(5, 390.0, 4), Some(4));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_full_board_needs_to_beat_last() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, 0.0, s);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 0.0, 99), None);
        assert_eq!(scores.add_score(15, 0.0, 99), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().unwrap().score, 15);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        assert!(HighScores::load(&path).unwrap().is_empty());

        let mut scores = HighScores::new();
        scores.add_score(3, 330.0, now_millis());
        scores.save(&path).unwrap();
        assert_eq!(HighScores::load(&path).unwrap(), scores);
    }
}
