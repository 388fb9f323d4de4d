//! Game configuration.
//!
//! One canonical engine covers every game variant: grid size, spawn table,
//! win threshold and search settings are all configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::game::tile_spawn::SpawnTable;
use crate::mcts::hyperparameters::SearchParams;
use crate::{GameError, Result};

/// Configuration for one game (or every game of a batch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid side length
    pub size: usize,
    /// Max tile that ends the game as a win; `None` plays until no move is left
    pub win_threshold: Option<u32>,
    /// Value distribution of spawned tiles
    pub spawn_table: SpawnTable,
    /// Bot search settings
    pub search: SearchParams,
    /// RNG seed; a random one is drawn and logged when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::bot()
    }
}

impl GameConfig {
    /// Bot variant: 4x4, only 2s spawn, win at 2048
    pub fn bot() -> Self {
        Self {
            size: 4,
            win_threshold: Some(2048),
            spawn_table: SpawnTable::bot(),
            search: SearchParams::default(),
            seed: None,
        }
    }

    /// Human variant: chosen grid size, 1/2/4 spawns, no win threshold
    pub fn classic(size: usize) -> Self {
        Self {
            size,
            win_threshold: None,
            spawn_table: SpawnTable::classic(),
            search: SearchParams::default(),
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(GameError::InvalidConfig(format!(
                "grid size {} is too small, need at least 2",
                self.size
            )));
        }
        if let Some(threshold) = self.win_threshold {
            if !threshold.is_power_of_two() || threshold < 2 {
                return Err(GameError::InvalidConfig(format!(
                    "win threshold {} is not a power of two above 1",
                    threshold
                )));
            }
        }
        self.spawn_table.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// Whether `score` ends the game as a win
    pub fn is_win(&self, score: u32) -> bool {
        self.win_threshold.is_some_and(|threshold| score >= threshold)
    }

    /// Load a JSON config; missing fields take the bot defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_presets_validate() {
        assert!(GameConfig::bot().validate().is_ok());
        assert!(GameConfig::classic(5).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let tiny = GameConfig {
            size: 1,
            ..GameConfig::bot()
        };
        assert_matches!(tiny.validate(), Err(GameError::InvalidConfig(_)));

        let odd = GameConfig {
            win_threshold: Some(1000),
            ..GameConfig::bot()
        };
        assert_matches!(odd.validate(), Err(GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_is_win() {
        let config = GameConfig {
            win_threshold: Some(16),
            ..GameConfig::bot()
        };
        assert!(!config.is_win(8));
        assert!(config.is_win(16));
        assert!(config.is_win(32));
        assert!(!GameConfig::classic(4).is_win(u32::MAX));
    }

    #[test]
    fn test_json_partial_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("game.json");
        std::fs::write(
            &path,
            r#"{ "size": 5, "win_threshold": 16384, "search": { "search_depth": 20 } }"#,
        )?;
        let config = GameConfig::from_json_file(&path)?;
        assert_eq!(config.size, 5);
        assert_eq!(config.win_threshold, Some(16384));
        assert_eq!(config.search.search_depth, 20);
        assert_eq!(config.search.searches_per_move, 24);
        assert_eq!(config.spawn_table, SpawnTable::bot());
        Ok(())
    }
}
