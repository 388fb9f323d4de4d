//! Final result of one game, as handed to result stores.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Human-readable timestamp layout, e.g. `19 Oct 2026 03:04:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%d %b %Y %I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Grid side length
    pub grid_size: usize,
    /// Highest tile reached
    pub score: u32,
    /// Whether the win threshold was reached
    pub won: bool,
    /// Wall-clock play time
    pub elapsed_secs: f64,
    /// Moves chosen during the game
    pub moves: usize,
    /// Local time at which the game ended
    pub timestamp: String,
}

impl GameResult {
    /// Result stamped with the current local time
    pub fn new(grid_size: usize, score: u32, won: bool, elapsed_secs: f64, moves: usize) -> Self {
        Self {
            grid_size,
            score,
            won,
            elapsed_secs,
            moves,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// A run with no measured play time was aborted and must not be stored.
    pub fn is_recordable(&self) -> bool {
        self.elapsed_secs > 0.0
    }
}
