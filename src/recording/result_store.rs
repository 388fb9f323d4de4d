use crate::recording::game_record::GameResult;
use crate::{GameError, Result};

/// Destination for finished game results.
pub trait ResultStore {
    fn record_result(&mut self, result: &GameResult) -> Result<()>;
}

/// Store that discards everything, for runs without persistence
impl ResultStore for () {
    fn record_result(&mut self, _result: &GameResult) -> Result<()> {
        Ok(())
    }
}

/// Hand a result to `store` without ever failing the caller.
///
/// Results with no play time are skipped. Store errors are logged. Returns
/// whether the result was written.
pub fn record_or_log(store: &mut dyn ResultStore, result: &GameResult) -> bool {
    if !result.is_recordable() {
        log::warn!(
            "Not recording result: elapsed time {:.3}s marks an aborted run",
            result.elapsed_secs
        );
        return false;
    }
    match store.record_result(result) {
        Ok(()) => {
            log::info!(
                "Recorded result: score={} won={} time={:.1}s moves={}",
                result.score,
                result.won,
                result.elapsed_secs,
                result.moves
            );
            true
        }
        Err(e) => {
            log::error!("Failed to record result: {}", e);
            false
        }
    }
}

/// Fans one result out to several stores; a failing store does not stop the others.
#[derive(Default)]
pub struct MultiStore {
    stores: Vec<Box<dyn ResultStore + Send>>,
}

impl MultiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, store: Box<dyn ResultStore + Send>) -> Self {
        self.stores.push(store);
        self
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl ResultStore for MultiStore {
    /// Succeeds when at least one store took the result; failures of the
    /// other stores are logged here. Fails only when every store failed.
    fn record_result(&mut self, result: &GameResult) -> Result<()> {
        let mut failures = Vec::new();
        for store in &mut self.stores {
            if let Err(e) = store.record_result(result) {
                failures.push(e.to_string());
            }
        }
        if failures.is_empty() {
            return Ok(());
        }
        if failures.len() == self.stores.len() {
            return Err(GameError::Persistence(format!(
                "all {} stores failed: {}",
                failures.len(),
                failures.join("; ")
            )));
        }
        for failure in &failures {
            log::error!("Result store failed: {}", failure);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Default)]
    struct MemoryStore {
        results: Vec<GameResult>,
    }

    impl ResultStore for MemoryStore {
        fn record_result(&mut self, result: &GameResult) -> Result<()> {
            self.results.push(result.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl ResultStore for FailingStore {
        fn record_result(&mut self, _result: &GameResult) -> Result<()> {
            Err(GameError::Persistence("disk full".into()))
        }
    }

    #[test]
    fn test_record_or_log_skips_aborted_runs() {
        let mut store = MemoryStore::default();
        let aborted = GameResult::new(4, 32, false, 0.0, 3);
        assert!(!record_or_log(&mut store, &aborted));
        assert!(store.results.is_empty());
    }

    #[test]
    fn test_record_or_log_writes_finished_runs() {
        let mut store = MemoryStore::default();
        let result = GameResult::new(4, 512, false, 3.2, 250);
        assert!(record_or_log(&mut store, &result));
        assert_eq!(store.results, vec![result]);
    }

    #[test]
    fn test_record_or_log_swallows_store_errors() {
        let result = GameResult::new(4, 512, false, 3.2, 250);
        assert!(!record_or_log(&mut FailingStore, &result));
    }

    #[test]
    fn test_multi_store_keeps_going_after_failure() {
        let mut multi = MultiStore::new()
            .with(Box::new(FailingStore))
            .with(Box::new(()));
        assert_eq!(multi.len(), 2);
        let result = GameResult::new(4, 128, false, 1.0, 80);
        assert!(multi.record_result(&result).is_ok());
        assert!(record_or_log(&mut multi, &result));
    }

    #[test]
    fn test_multi_store_fails_when_every_store_fails() {
        let mut multi = MultiStore::new()
            .with(Box::new(FailingStore))
            .with(Box::new(FailingStore));
        let result = GameResult::new(4, 128, false, 1.0, 80);
        assert_matches!(
            multi.record_result(&result),
            Err(GameError::Persistence(msg)) if msg.starts_with("all 2 stores failed") && msg.contains("disk full")
        );
        assert!(!record_or_log(&mut multi, &result));
    }

    #[test]
    fn test_empty_multi_store_accepts_results() {
        let mut multi = MultiStore::new();
        assert!(multi.is_empty());
        assert!(multi.record_result(&GameResult::new(3, 8, false, 0.5, 4)).is_ok());
    }
}
