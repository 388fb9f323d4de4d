//! Monte Carlo move search.
//!
//! For each of the four directions the search plays the move on a copy of the
//! board, then runs random rollouts from the result and accumulates the max
//! tile reached along the way. The direction with the highest total wins.

pub mod hyperparameters;
pub mod mcts_result;
pub mod rollout;
pub mod selection;

use rand::Rng;

use crate::game::board::Board;
use crate::game::direction::Direction;
use crate::game::tile_spawn::SpawnTable;
use crate::Result;

pub use hyperparameters::{SearchBudget, SearchParams};
pub use mcts_result::SimulationOutcome;
pub use rollout::{evaluate_move, random_rollout, simulate_moves};
pub use selection::select_best;

/// Decision component used by the bot. Holds only search settings; the board
/// is borrowed per decision.
#[derive(Debug, Clone)]
pub struct MoveSearch {
    params: SearchParams,
    spawn: SpawnTable,
}

impl MoveSearch {
    pub fn new(params: SearchParams, spawn: SpawnTable) -> Self {
        Self { params, spawn }
    }

    /// Costs of all four directions after `move_count` moves have been played.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        board: &Board,
        move_count: usize,
        rng: &mut R,
    ) -> Result<SimulationOutcome> {
        let budget = self.params.for_move(move_count);
        simulate_moves(board, budget, &self.params, &self.spawn, rng)
    }

    /// Best direction for the current position.
    pub fn next_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        move_count: usize,
        rng: &mut R,
    ) -> Result<Direction> {
        let outcome = self.evaluate(board, move_count, rng)?;
        let direction = select_best(&outcome, rng);
        log::debug!("move {}: {} -> {}", move_count + 1, outcome, direction);
        Ok(direction)
    }
}
