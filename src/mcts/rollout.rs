use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::game::board::Board;
use crate::game::direction::Direction;
use crate::game::tile_spawn::SpawnTable;
use crate::mcts::hyperparameters::{SearchBudget, SearchParams};
use crate::mcts::mcts_result::SimulationOutcome;
use crate::Result;

/// Score every direction from `board` without touching it.
///
/// Candidates are evaluated in [`Direction::ALL`] order, each on its own copy
/// of the board.
pub fn simulate_moves<R: Rng + ?Sized>(
    board: &Board,
    budget: SearchBudget,
    params: &SearchParams,
    spawn: &SpawnTable,
    rng: &mut R,
) -> Result<SimulationOutcome> {
    let mut outcome = SimulationOutcome::default();
    for direction in Direction::ALL {
        let cost = evaluate_move(board, direction, budget, params, spawn, rng)?;
        outcome.set(direction, cost);
    }
    Ok(outcome)
}

/// Cost of playing `direction` now and then rolling out at random.
///
/// Illegal moves and moves that end the game score exactly 0. Otherwise the
/// cost is the max tile after the move and its new tile, plus the max tile
/// after every successful rollout step, plus `empty_spot_weight` per empty
/// cell of the post-move board (counted once, not per rollout).
pub fn evaluate_move<R: Rng + ?Sized>(
    board: &Board,
    direction: Direction,
    budget: SearchBudget,
    params: &SearchParams,
    spawn: &SpawnTable,
    rng: &mut R,
) -> Result<u64> {
    let mut seed_board = board.clone();
    if !seed_board.apply_move(direction) || seed_board.is_terminal() {
        return Ok(0);
    }
    seed_board.insert_tile(1, spawn, rng)?;
    let mut cost = u64::from(seed_board.score());

    // Seeds are drawn up front so sequential and parallel runs sum the same rollouts.
    let seeds: Vec<u64> = (0..budget.searches_per_move)
        .map(|_| rng.random())
        .collect();

    let rollout_cost: u64 = if params.parallel_rollouts {
        seeds
            .par_iter()
            .map(|&seed| {
                let mut rollout_rng = StdRng::seed_from_u64(seed);
                random_rollout(&seed_board, budget.search_depth, spawn, &mut rollout_rng)
            })
            .collect::<Result<Vec<u64>>>()?
            .into_iter()
            .sum()
    } else {
        let mut total = 0;
        for &seed in &seeds {
            let mut rollout_rng = StdRng::seed_from_u64(seed);
            total += random_rollout(&seed_board, budget.search_depth, spawn, &mut rollout_rng)?;
        }
        total
    };

    cost += rollout_cost;
    cost += params.empty_spot_weight * seed_board.empty_count() as u64;
    Ok(cost)
}

/// Play up to `depth` successful random moves on a private copy of `start`.
///
/// Moves that change nothing are retried and not counted. Each successful
/// move inserts a tile and adds the new max tile to the returned cost. Stops
/// early on a terminal board.
pub fn random_rollout<R: Rng + ?Sized>(
    start: &Board,
    depth: usize,
    spawn: &SpawnTable,
    rng: &mut R,
) -> Result<u64> {
    let mut board = start.clone();
    let mut cost = 0u64;
    let mut steps = 0;
    while steps < depth && !board.is_terminal() {
        let direction = Direction::random(rng);
        if !board.apply_move(direction) {
            continue;
        }
        if board.is_terminal() {
            break;
        }
        board.insert_tile(1, spawn, rng)?;
        cost += u64::from(board.score());
        steps += 1;
    }
    Ok(cost)
}
