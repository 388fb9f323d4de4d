//! SQLite database of recorded games

use rusqlite::{params, Connection};
use std::path::Path;

use crate::recording::game_record::GameResult;
use crate::recording::result_store::ResultStore;
use crate::Result;

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS game_records (
        id INTEGER PRIMARY KEY,
        grid_size INTEGER NOT NULL,
        score INTEGER NOT NULL,
        win INTEGER NOT NULL,
        time_played_sec REAL NOT NULL,
        moves INTEGER NOT NULL,
        date_played TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_records_grid ON game_records(grid_size);
"#;

/// One stored row
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: i64,
    pub result: GameResult,
}

/// Aggregate over every stored game
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecordSummary {
    pub runs: u64,
    pub wins: u64,
    pub best_score: u32,
    pub mean_elapsed_secs: f64,
}

/// Database connection wrapper
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the table exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.init_tables()?;
        Ok(store)
    }

    /// Create in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    /// Drop every stored game and recreate an empty table
    pub fn reset(&self) -> Result<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS game_records;")?;
        self.init_tables()?;
        log::info!("Result database reset");
        Ok(())
    }

    pub fn insert(&self, result: &GameResult) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO game_records (grid_size, score, win, time_played_sec, moves, date_played)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                result.grid_size as i64,
                result.score,
                result.won as i32,
                result.elapsed_secs,
                result.moves as i64,
                result.timestamp,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Every stored game, oldest first
    pub fn all_records(&self) -> Result<Vec<StoredRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, grid_size, score, win, time_played_sec, moves, date_played
             FROM game_records ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredRecord {
                id: row.get(0)?,
                result: GameResult {
                    grid_size: row.get::<_, i64>(1)? as usize,
                    score: row.get(2)?,
                    won: row.get::<_, i32>(3)? != 0,
                    elapsed_secs: row.get(4)?,
                    moves: row.get::<_, i64>(5)? as usize,
                    timestamp: row.get(6)?,
                },
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM game_records", [], |row| row.get(0))?;
        Ok(n as u64)
    }

    pub fn summary(&self) -> Result<RecordSummary> {
        let summary = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(win), 0), COALESCE(MAX(score), 0),
                    COALESCE(AVG(time_played_sec), 0.0)
             FROM game_records",
            [],
            |row| {
                Ok(RecordSummary {
                    runs: row.get::<_, i64>(0)? as u64,
                    wins: row.get::<_, i64>(1)? as u64,
                    best_score: row.get(2)?,
                    mean_elapsed_secs: row.get(3)?,
                })
            },
        )?;
        Ok(summary)
    }
}

impl ResultStore for SqliteStore {
    fn record_result(&mut self, result: &GameResult) -> Result<()> {
        let id = self.insert(result)?;
        log::debug!("Stored game record #{}", id);
        Ok(())
    }
}
