use crate::game::board::Board;
use crate::game::direction::Direction;

/// Returns the directions that would change the board, in enumeration order
pub fn get_legal_moves(board: &Board) -> Vec<Direction> {
    Direction::ALL
        .iter()
        .copied()
        .filter(|&direction| board.can_move(direction))
        .collect()
}
