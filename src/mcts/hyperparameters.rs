//! Search Hyperparameters Configuration
//!
//! Tunable breadth, depth and board-openness weight of the rollout search.
//! Defaults follow the bot that reliably reaches 2048 on a 4x4 grid:
//! 24 rollouts per candidate, 12 moves deep, 10 points per empty cell.

use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Rollout search hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    // ========== Breadth / Depth ==========
    /// Independent rollouts per candidate move
    /// Default: 24
    pub searches_per_move: usize,

    /// Maximum successful random moves per rollout
    /// Default: 12
    pub search_depth: usize,

    // ========== Board Openness ==========
    /// Cost added per empty cell after the candidate move and its tile
    /// Default: 10
    pub empty_spot_weight: u64,

    // ========== Late-Game Scaling ==========
    /// Every `scaling_coefficient` moves, breadth and depth both grow by one.
    /// `None` keeps them fixed.
    /// Default: None
    pub scaling_coefficient: Option<usize>,

    /// Upper bound for the scaled breadth
    /// Default: 200
    pub max_searches_per_move: usize,

    /// Upper bound for the scaled depth
    /// Default: 64
    pub max_search_depth: usize,

    // ========== Execution ==========
    /// Run the rollouts of a candidate on the rayon pool
    /// Default: false
    pub parallel_rollouts: bool,
}

/// Effective breadth and depth for one decision point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub searches_per_move: usize,
    pub search_depth: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            searches_per_move: 24,
            search_depth: 12,
            empty_spot_weight: 10,
            scaling_coefficient: None,
            max_searches_per_move: 200,
            max_search_depth: 64,
            parallel_rollouts: false,
        }
    }
}

impl SearchParams {
    /// Breadth and depth to use after `move_count` moves
    pub fn for_move(&self, move_count: usize) -> SearchBudget {
        let bonus = match self.scaling_coefficient {
            Some(coefficient) if coefficient > 0 => move_count / coefficient,
            _ => 0,
        };
        SearchBudget {
            searches_per_move: (self.searches_per_move + bonus)
                .min(self.max_searches_per_move.max(self.searches_per_move)),
            search_depth: (self.search_depth + bonus)
                .min(self.max_search_depth.max(self.search_depth)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.scaling_coefficient == Some(0) {
            return Err(GameError::InvalidConfig(
                "scaling coefficient must be positive".into(),
            ));
        }
        if self.max_searches_per_move < self.searches_per_move {
            return Err(GameError::InvalidConfig(format!(
                "max_searches_per_move {} is below searches_per_move {}",
                self.max_searches_per_move, self.searches_per_move
            )));
        }
        if self.max_search_depth < self.search_depth {
            return Err(GameError::InvalidConfig(format!(
                "max_search_depth {} is below search_depth {}",
                self.max_search_depth, self.search_depth
            )));
        }
        Ok(())
    }
}
