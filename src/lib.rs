//! # 2048 Game Library
//!
//! A 2048 engine on an NxN grid with a Monte Carlo rollout bot.
//!
//! ## Features
//!
//! - **Game Engine**: board mechanics, tile spawning, terminal detection
//! - **Search Engine**: random rollout move simulation and best-move selection
//! - **Drivers**: bot and human game loops, sequential batch runs with cancellation
//! - **Recording**: SQLite result store and per-grid-size best score CSV
//!
//! ## Usage
//!
//! ```rust
//! use game_2048::{
//!     game::{Board, Direction},
//!     services::BotDriver,
//!     GameConfig,
//! };
//!
//! let mut board = Board::from_rows(vec![vec![2, 2, 2, 0]; 4]).unwrap();
//! assert!(board.apply_move(Direction::Left));
//! assert_eq!(board.rows()[0], vec![4, 2, 0, 0]);
//!
//! let config = GameConfig { seed: Some(7), ..GameConfig::bot() };
//! let _driver = BotDriver::new(config).unwrap();
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Monte Carlo rollout search
pub mod mcts;

/// Game loops and batch runs
pub mod services;

/// Result persistence
pub mod recording;

/// Render and input collaborators
pub mod ui;

/// Game and search configuration
pub mod config;

/// Logger setup for the binary
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use config::GameConfig;
pub use game::{Board, Direction, SpawnTable};
pub use mcts::SearchParams;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the 2048 library
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("cannot insert {requested} tile(s): only {available} empty cell(s)")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("invalid move: {0:?}")]
    InvalidMove(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GameError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
