//! Result recording for finished games.
//!
//! Stores are collaborators of the game loop: a failing store is logged and
//! never aborts a session, and only games that reached a terminal state are
//! handed over.
//!
//! # Components
//!
//! - `game_record`: the final result of one game
//! - `result_store`: the store trait, fan-out and the skip/log policy
//! - `sqlite_store`: SQLite table of every recorded game
//! - `best_scores`: CSV of the best score per grid size

pub mod best_scores;
pub mod game_record;
pub mod result_store;
pub mod sqlite_store;

pub use best_scores::BestScores;
pub use game_record::{GameResult, TIMESTAMP_FORMAT};
pub use result_store::{record_or_log, MultiStore, ResultStore};
pub use sqlite_store::{RecordSummary, SqliteStore, StoredRecord};
