//! High score leaderboard system
//!
//! Persisted as JSON in the data directory, tracks the top 5 scores.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::persistence;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// File name inside the data directory
pub const HIGH_SCORES_FILE: &str = "high_scores.json";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name typed on the end screen
    pub name: String,
    /// Player's score
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Default location of the leaderboard file
    pub fn default_path() -> PathBuf {
        persistence::data_dir().join(HIGH_SCORES_FILE)
    }

    /// Check if a score would make it onto the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score, ties keep older first)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore the sorted/capped invariant on data read from disk
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Load high scores, treating a missing or corrupt file as empty
    pub fn load_from(path: &Path) -> Self {
        match persistence::load_json::<HighScores>(path) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!(
                    "Loaded {} high scores (best {:?})",
                    scores.entries.len(),
                    scores.top_score()
                );
                scores
            }
            Err(e) if persistence::is_not_found(&e) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {:#}", e);
                Self::new()
            }
        }
    }

    /// Save high scores; failures are logged and otherwise ignored
    pub fn save_to(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Could not save high scores: {:#}", e),
        }
    }
}
