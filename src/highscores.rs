//! High score leaderboard
//!
//! Kept in memory for the lifetime of the process, tracks the top 10 sessions.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Pipes passed
    pub score: u32,
    /// Simulation ticks survived
    pub ticks: u64,
    /// 1-based session number within this process
    pub session: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Ordering of the board: more pipes first, then longer survival,
    /// then the earlier session
    fn rank_key(entry: &HighScoreEntry) -> (Reverse<u32>, Reverse<u64>, u32) {
        (Reverse(entry.score), Reverse(entry.ticks), entry.session)
    }

    /// Whether a finished session would make the board
    pub fn qualifies(&self, score: u32, ticks: u64) -> bool {
        if score == 0 {
            return false;
        }
        let candidate = HighScoreEntry {
            score,
            ticks,
            session: u32::MAX,
        };
        self.entries.len() < MAX_HIGH_SCORES
            || self
                .entries
                .last()
                .is_some_and(|worst| Self::rank_key(&candidate) < Self::rank_key(worst))
    }

    /// Record a finished session. Returns its 1-based rank if it made the board.
    pub fn add_score(&mut self, score: u32, ticks: u64, session: u32) -> Option<usize> {
        if !self.qualifies(score, ticks) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            ticks,
            session,
        };
        let key = Self::rank_key(&entry);
        let slot = self.entries.partition_point(|e| Self::rank_key(e) < key);
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
