use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::direction::Direction;
use crate::game::tile_spawn::SpawnTable;
use crate::{GameError, Result};

/// Square 2048 grid stored row-major; `0` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
}

impl Board {
    /// Empty `size`x`size` board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from explicit rows, e.g. for tests or replays.
    ///
    /// Rows must form a non-empty square and every non-zero value must be a
    /// power of two.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(GameError::InvalidConfig("board has no rows".into()));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GameError::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    size
                )));
            }
            if let Some(bad) = row.iter().find(|&&v| v != 0 && !v.is_power_of_two()) {
                return Err(GameError::InvalidConfig(format!(
                    "tile {} in row {} is not a power of two",
                    bad, r
                )));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at `(row, col)`, `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size.max(1)).map(<[u32]>::to_vec).collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Coordinates `(row, col)` of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.empty_indices()
            .into_iter()
            .map(|i| (i / self.size, i % self.size))
            .collect()
    }

    /// Best tile reached so far; this is the game score, not a running total.
    pub fn score(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn max_tile(&self) -> u32 {
        self.score()
    }

    /// Directions that change the board, in `Direction::ALL` order.
    pub fn legal_moves(&self) -> Vec<Direction> {
        crate::game::get_legal_moves::get_legal_moves(self)
    }

    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Slide and merge every line towards `direction`.
    ///
    /// Returns whether any cell changed. Each line is read in move order so that
    /// every direction reduces to a left compaction.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let mut changed = false;
        for line in 0..self.size {
            let indices = self.line_indices(direction, line);
            let current: Vec<u32> = indices.iter().map(|&i| self.cells[i]).collect();
            let compacted = compact_line(&current);
            if compacted != current {
                changed = true;
                for (&i, value) in indices.iter().zip(compacted) {
                    self.cells[i] = value;
                }
            }
        }
        changed
    }

    /// Parse a move symbol at the board boundary, then apply it.
    pub fn apply_move_str(&mut self, symbol: &str) -> Result<bool> {
        let direction: Direction = symbol.parse()?;
        Ok(self.apply_move(direction))
    }

    /// Whether moving in `direction` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.clone().apply_move(direction)
    }

    /// True when no move can change the board. A board with an empty cell is
    /// never terminal.
    pub fn is_terminal(&self) -> bool {
        if self.cells.iter().any(|&v| v == 0) {
            return false;
        }
        Direction::ALL.iter().all(|&d| !self.can_move(d))
    }

    /// Put `count` new tiles on distinct empty cells chosen uniformly at random,
    /// with values drawn from `table`.
    pub fn insert_tile<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        table: &SpawnTable,
        rng: &mut R,
    ) -> Result<()> {
        let empty = self.empty_indices();
        if count > empty.len() {
            return Err(GameError::InsufficientSpace {
                requested: count,
                available: empty.len(),
            });
        }
        let picks = sample(rng, empty.len(), count);
        for pick in picks.iter() {
            self.cells[empty[pick]] = table.sample(rng);
        }
        Ok(())
    }

    fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v == 0 { Some(i) } else { None })
            .collect()
    }

    /// Cell indices of row/column `line`, ordered in the direction of motion.
    fn line_indices(&self, direction: Direction, line: usize) -> Vec<usize> {
        let n = self.size;
        match direction {
            Direction::Left => (0..n).map(|c| line * n + c).collect(),
            Direction::Right => (0..n).rev().map(|c| line * n + c).collect(),
            Direction::Up => (0..n).map(|r| r * n + line).collect(),
            Direction::Down => (0..n).rev().map(|r| r * n + line).collect(),
        }
    }
}

/// Left-compact one line: drop zeros, merge equal neighbours once, pad with zeros.
///
/// A tile produced by a merge never merges again in the same pass, so
/// `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`. Two `2^31` tiles stay apart since
/// their sum does not fit a cell.
pub fn compact_line(line: &[u32]) -> Vec<u32> {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut merged = Vec::with_capacity(line.len());
    let mut i = 0;
    while i < tiles.len() {
        let pair = tiles
            .get(i + 1)
            .filter(|&&next| next == tiles[i])
            .and_then(|_| tiles[i].checked_mul(2));
        match pair {
            Some(value) => {
                merged.push(value);
                i += 2;
            }
            None => {
                merged.push(tiles[i]);
                i += 1;
            }
        }
    }
    merged.resize(line.len(), 0);
    merged
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.score().max(1).to_string().len().max(4);
        let separator = "-".repeat((width + 1) * self.size);
        for (r, row) in self.cells.chunks(self.size.max(1)).enumerate() {
            if r > 0 {
                writeln!(f, "{}", separator)?;
            }
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".", width = width)
                    } else {
                        format!("{:>width$}", v, width = width)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(rows: Vec<Vec<u32>>) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn sorted_tiles(b: &Board) -> Vec<u32> {
        let mut tiles: Vec<u32> = b.cells().iter().copied().filter(|&v| v != 0).collect();
        tiles.sort_unstable();
        tiles
    }

    #[test]
    fn test_compact_line() {
        assert_eq!(compact_line(&[2, 2, 2, 2]), vec![4, 4, 0, 0]);
        assert_eq!(compact_line(&[2, 2, 2, 0]), vec![4, 2, 0, 0]);
        assert_eq!(compact_line(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
        assert_eq!(compact_line(&[0, 2, 0, 2]), vec![4, 0, 0, 0]);
        assert_eq!(compact_line(&[4, 4, 8, 0]), vec![8, 8, 0, 0]);
        assert_eq!(compact_line(&[2, 4, 8, 16]), vec![2, 4, 8, 16]);
        assert_eq!(compact_line(&[1, 1, 2, 0, 0]), vec![2, 2, 0, 0, 0]);
    }

    #[test]
    fn test_merge_left_and_right() {
        let mut left = board(vec![
            vec![2, 2, 2, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let mut right = left.clone();

        assert!(left.apply_move(Direction::Left));
        assert_eq!(left.rows()[0], vec![4, 4, 0, 0]);

        assert!(right.apply_move(Direction::Right));
        assert_eq!(right.rows()[0], vec![0, 0, 4, 4]);
    }

    #[test]
    fn test_single_merge_per_tile() {
        let mut b = board(vec![
            vec![2, 2, 2, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        b.apply_move(Direction::Left);
        assert_eq!(b.rows()[0], vec![4, 2, 0, 0]);

        let mut r = board(vec![
            vec![0, 2, 2, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        r.apply_move(Direction::Right);
        assert_eq!(r.rows()[0], vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_vertical_moves_work_on_columns() {
        let mut up = board(vec![
            vec![2, 0, 0, 0],
            vec![2, 0, 4, 0],
            vec![0, 0, 4, 0],
            vec![2, 0, 8, 0],
        ]);
        let mut down = up.clone();

        assert!(up.apply_move(Direction::Up));
        assert_eq!(
            up.rows(),
            vec![
                vec![4, 0, 8, 0],
                vec![2, 0, 8, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ]
        );

        assert!(down.apply_move(Direction::Down));
        assert_eq!(
            down.rows(),
            vec![
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![2, 0, 8, 0],
                vec![4, 0, 8, 0],
            ]
        );
    }

    #[test]
    fn test_no_op_move_is_idempotent() {
        let mut b = board(vec![
            vec![2, 4, 0, 0],
            vec![8, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let before = b.clone();
        assert!(!b.apply_move(Direction::Left));
        assert_eq!(b, before);
        assert!(!b.apply_move(Direction::Left));
        assert_eq!(b, before);
    }

    #[test]
    fn test_move_conserves_tile_sum() {
        let mut rng = StdRng::seed_from_u64(5);
        let table = SpawnTable::classic();
        let mut b = Board::new(4);
        b.insert_tile(10, &table, &mut rng).unwrap();
        for _ in 0..200 {
            let direction = Direction::random(&mut rng);
            let sum_before = b.tile_sum();
            let count_before = sorted_tiles(&b).len();
            let changed = b.apply_move(direction);
            assert_eq!(b.tile_sum(), sum_before);
            assert!(sorted_tiles(&b).len() <= count_before);
            if changed && !b.is_terminal() {
                b.insert_tile(1, &table, &mut rng).unwrap();
            }
            if b.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn test_terminal_detection() {
        let stuck = board(vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ]);
        assert!(stuck.is_terminal());

        let mergeable = board(vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 4],
        ]);
        assert!(!mergeable.is_terminal());

        assert!(!Board::new(4).is_terminal());
    }

    #[test]
    fn test_terminal_check_does_not_mutate() {
        let b = board(vec![
            vec![2, 2, 4, 8],
            vec![4, 8, 16, 32],
            vec![8, 16, 32, 64],
            vec![16, 32, 64, 128],
        ]);
        let before = b.clone();
        assert!(!b.is_terminal());
        assert_eq!(b, before);
    }

    #[test]
    fn test_insert_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let table = SpawnTable::bot();
        let mut b = board(vec![
            vec![2, 4, 0, 8],
            vec![4, 0, 4, 2],
            vec![2, 4, 2, 0],
            vec![4, 2, 4, 2],
        ]);
        assert_eq!(b.empty_count(), 3);
        b.insert_tile(3, &table, &mut rng).unwrap();
        assert_eq!(b.empty_count(), 0);
        assert_matches!(
            b.insert_tile(1, &table, &mut rng),
            Err(GameError::InsufficientSpace {
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_insert_fills_distinct_empty_cells() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = SpawnTable::bot();
        let mut b = Board::new(5);
        b.insert_tile(2, &table, &mut rng).unwrap();
        assert_eq!(b.empty_count(), 23);
        assert_eq!(sorted_tiles(&b), vec![2, 2]);
    }

    #[test]
    fn test_insert_too_many_leaves_board_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut b = Board::new(2);
        assert!(b.insert_tile(5, &SpawnTable::bot(), &mut rng).is_err());
        assert_eq!(b, Board::new(2));
    }

    #[test]
    fn test_score_is_max_tile() {
        let b = board(vec![vec![2, 64], vec![0, 8]]);
        assert_eq!(b.score(), 64);
        assert_eq!(b.max_tile(), 64);
        assert_eq!(Board::new(3).score(), 0);
    }

    #[test]
    fn test_largest_tiles_never_overflow() {
        let top = 1u32 << 31;
        assert_eq!(compact_line(&[top, top, 0]), vec![top, top, 0]);
        assert_eq!(compact_line(&[1 << 30, 1 << 30, top]), vec![top, top, 0]);

        let mut b = board(vec![vec![top, top], vec![0, 0]]);
        let sum = b.tile_sum();
        assert!(!b.apply_move(Direction::Left));
        assert!(!b.apply_move(Direction::Right));
        assert_eq!(b.tile_sum(), sum);
        assert_eq!(b.rows(), vec![vec![top, top], vec![0, 0]]);
        assert_eq!(b.legal_moves(), vec![Direction::Down]);

        let mut full = board(vec![vec![top, top], vec![top, top]]);
        assert!(full.is_terminal());
        assert!(!full.apply_move(Direction::Up));
        assert_eq!(full.tile_sum(), 4 * u64::from(top));
    }

    #[test]
    fn test_cell_lookup_is_bounds_checked() {
        let b = board(vec![vec![2, 0], vec![0, 4]]);
        assert_eq!(b.cell(0, 0), Some(2));
        assert_eq!(b.cell(1, 1), Some(4));
        assert_eq!(b.cell(0, 1), Some(0));
        assert_eq!(b.cell(2, 0), None);
        assert_eq!(b.cell(0, 2), None);
    }

    #[test]
    fn test_from_rows_validation() {
        assert_matches!(Board::from_rows(vec![]), Err(GameError::InvalidConfig(_)));
        assert_matches!(
            Board::from_rows(vec![vec![2, 0], vec![0]]),
            Err(GameError::InvalidConfig(_))
        );
        assert_matches!(
            Board::from_rows(vec![vec![3, 0], vec![0, 0]]),
            Err(GameError::InvalidConfig(_))
        );
    }

    #[test]
    fn test_apply_move_str_validates_symbol() {
        let mut b = board(vec![vec![0, 2], vec![0, 0]]);
        assert!(b.apply_move_str("left").unwrap());
        assert_matches!(b.apply_move_str("sideways"), Err(GameError::InvalidMove(_)));
        assert_eq!(b.rows(), vec![vec![2, 0], vec![0, 0]]);
    }

    #[test]
    fn test_empty_cells_coordinates() {
        let b = board(vec![vec![2, 0], vec![0, 4]]);
        assert_eq!(b.empty_cells(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_display_renders_every_row() {
        let b = board(vec![vec![2, 0], vec![0, 2048]]);
        let text = b.to_string();
        assert!(text.contains("2048"));
        assert_eq!(text.lines().count(), 3);
    }
}
