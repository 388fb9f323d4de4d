use rand::Rng;

use crate::game::direction::Direction;
use crate::mcts::mcts_result::SimulationOutcome;

/// Pick the direction with the highest accumulated cost.
///
/// Ties go to the first direction in [`Direction::ALL`] order. When every cost
/// is zero the search found nothing useful, so a uniformly random direction is
/// returned instead of always falling back to the same one.
pub fn select_best<R: Rng + ?Sized>(outcome: &SimulationOutcome, rng: &mut R) -> Direction {
    if outcome.all_zero() {
        return Direction::random(rng);
    }
    let mut best = Direction::ALL[0];
    let mut best_cost = outcome.cost(best);
    for (direction, cost) in outcome.iter().skip(1) {
        if cost > best_cost {
            best = direction;
            best_cost = cost;
        }
    }
    best
}
