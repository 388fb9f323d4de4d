//! Best score per grid size, kept in a small CSV file.
//!
//! Format: `GRID SIZE,BEST SCORE`, one row per grid size.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::recording::game_record::GameResult;
use crate::recording::result_store::ResultStore;
use crate::Result;

/// Grid sizes listed in a freshly initialised file
pub const DEFAULT_GRID_SIZES: [usize; 4] = [3, 4, 5, 6];

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRow {
    #[serde(rename = "GRID SIZE")]
    grid_size: usize,
    #[serde(rename = "BEST SCORE")]
    best_score: u32,
}

/// CSV-backed best score table
pub struct BestScores {
    path: PathBuf,
    scores: BTreeMap<usize, u32>,
}

impl BestScores {
    /// Load the table, creating it with zero scores if the file does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Self::init(path);
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let mut scores = BTreeMap::new();
        for row in reader.deserialize() {
            let row: BestScoreRow = row?;
            scores.insert(row.grid_size, row.best_score);
        }
        Ok(Self { path, scores })
    }

    /// Create or overwrite the file with zero scores for the default grid sizes
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let table = Self {
            path: path.as_ref().to_path_buf(),
            scores: DEFAULT_GRID_SIZES.iter().map(|&size| (size, 0)).collect(),
        };
        table.save()?;
        log::info!("Initialised best score file {}", table.path.display());
        Ok(table)
    }

    pub fn best_for(&self, grid_size: usize) -> Option<u32> {
        self.scores.get(&grid_size).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.scores.iter().map(|(&size, &score)| (size, score))
    }

    /// Store `score` if it beats the current best for `grid_size`.
    ///
    /// Returns whether the file was rewritten.
    pub fn update(&mut self, grid_size: usize, score: u32) -> Result<bool> {
        let current = self.scores.get(&grid_size).copied().unwrap_or(0);
        if score <= current && self.scores.contains_key(&grid_size) {
            log::debug!(
                "No best score update for {}x{} ({} <= {})",
                grid_size,
                grid_size,
                score,
                current
            );
            return Ok(false);
        }
        self.scores.insert(grid_size, score);
        self.save()?;
        log::info!("New best score for {}x{}: {}", grid_size, grid_size, score);
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        for (&grid_size, &best_score) in &self.scores {
            writer.serialize(BestScoreRow {
                grid_size,
                best_score,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ResultStore for BestScores {
    fn record_result(&mut self, result: &GameResult) -> Result<()> {
        self.update(result.grid_size, result.score)?;
        Ok(())
    }
}
