//! High score leaderboard
//!
//! Fed by `GameEvent::GameOver`, keeps the top 5 runs and persists them
//! through any [`KeyValueStore`].

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};
use crate::sim::GameEvent;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sky_strike_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished run; events other than `GameOver` are ignored
    pub fn record(&mut self, event: &GameEvent, timestamp: f64) -> Option<usize> {
        let GameEvent::GameOver { score, level } = *event else {
            return None;
        };
        let rank = self.add_score(score, level, timestamp);
        match rank {
            Some(rank) => log::info!("New high score #{rank}: {score} (level {level})"),
            None => log::info!("Score {score} did not reach the leaderboard"),
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from storage; missing or corrupt data yields an empty board
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<HighScores>(&json) {
                Ok(mut scores) => {
                    scores.normalize();
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("Discarding corrupt high scores: {e}");
                    Self::new()
                }
            },
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save to storage
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::Backend(format!("serialize high scores: {e}")))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Restore ordering and bound after loading foreign data
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}
