use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::game::board::Board;
use crate::game::direction::Direction;
use crate::game::tile_spawn::SpawnTable;
use crate::recording::game_record::GameResult;
use crate::Result;

/// Number of tiles placed on the board when a game starts.
pub const STARTING_TILES: usize = 2;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
    /// Interrupted before a terminal state; never recorded.
    Cancelled,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Won => write!(f, "won"),
            GameOutcome::Lost => write!(f, "lost"),
            GameOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// State of one game: the live board, the moves played and the timer.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub board: Board,
    trace: Vec<Direction>,
    started_at: Option<Instant>,
    elapsed: Duration,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    pub fn new(size: usize) -> Self {
        Self::from_board(Board::new(size))
    }

    /// Session over an existing position; the timer is not running yet.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            trace: Vec::new(),
            started_at: None,
            elapsed: Duration::ZERO,
            outcome: None,
        }
    }

    /// Place the starting tiles and start the timer.
    pub fn start<R: Rng + ?Sized>(&mut self, table: &SpawnTable, rng: &mut R) -> Result<()> {
        self.board.insert_tile(STARTING_TILES, table, rng)?;
        self.started_at = Some(Instant::now());
        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Apply a chosen move to the live board and count it.
    pub fn play_move(&mut self, direction: Direction) -> bool {
        self.trace.push(direction);
        self.board.apply_move(direction)
    }

    pub fn move_count(&self) -> usize {
        self.trace.len()
    }

    /// Every move chosen so far, including ones that did not change the board.
    pub fn trace(&self) -> &[Direction] {
        &self.trace
    }

    /// Stop the timer and fix the outcome. Later calls are ignored.
    pub fn finish(&mut self, outcome: GameOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.elapsed = self
            .started_at
            .map(|start| start.elapsed())
            .unwrap_or(Duration::ZERO);
        self.outcome = Some(outcome);
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Time played; live while the game runs, frozen once finished.
    pub fn elapsed(&self) -> Duration {
        match (self.outcome, self.started_at) {
            (None, Some(start)) => start.elapsed(),
            _ => self.elapsed,
        }
    }

    /// Final result to hand to a store, only for games that ended normally.
    pub fn to_result(&self) -> Option<GameResult> {
        match self.outcome? {
            GameOutcome::Cancelled => None,
            outcome => Some(GameResult::new(
                self.board.size(),
                self.score(),
                outcome == GameOutcome::Won,
                self.elapsed.as_secs_f64(),
                self.move_count(),
            )),
        }
    }
}
