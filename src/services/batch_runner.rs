//! Sequential batch of bot games with early termination.
//!
//! A session's result is written only after that session reached a terminal
//! state, so raising the cancel flag mid-batch never leaves a partial record.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::GameConfig;
use crate::game::game_state::GameOutcome;
use crate::recording::result_store::{record_or_log, ResultStore};
use crate::services::bot_driver::BotDriver;
use crate::ui::renderer::Renderer;
use crate::Result;

/// Aggregate of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchSummary {
    /// Games that reached a terminal state
    pub runs: usize,
    pub wins: usize,
    pub losses: usize,
    /// Games interrupted by the cancel flag
    pub cancelled: usize,
    /// Results actually written to the store
    pub recorded: usize,
    pub best_score: u32,
    pub mean_score: f64,
    pub mean_elapsed_secs: f64,
}

impl BatchSummary {
    pub fn win_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.wins as f64 / self.runs as f64
        }
    }
}

/// Play up to `runs` bot games one after another.
///
/// With a configured seed, game `i` uses `seed + i` so a batch is replayable.
/// Stops before the next game, or at the next turn of the current one, once
/// `cancel` is raised.
pub fn run_batch(
    config: &GameConfig,
    runs: usize,
    store: &mut dyn ResultStore,
    renderer: &mut dyn Renderer,
    cancel: &AtomicBool,
) -> Result<BatchSummary> {
    config.validate()?;
    let mut summary = BatchSummary::default();
    let mut score_total = 0u64;
    let mut elapsed_total = 0.0;

    for run in 0..runs {
        if cancel.load(Ordering::Relaxed) {
            log::warn!("Batch interrupted before game {}/{}", run + 1, runs);
            break;
        }

        let seed = match config.seed {
            Some(base) => base.wrapping_add(run as u64),
            None => rand::random(),
        };
        let mut driver = BotDriver::with_seed(config.clone(), seed)?;
        let session = driver.play(renderer, cancel)?;

        match session.outcome() {
            Some(GameOutcome::Won) => summary.wins += 1,
            Some(GameOutcome::Lost) => summary.losses += 1,
            _ => {
                summary.cancelled += 1;
                log::warn!("Game {}/{} cancelled, nothing recorded", run + 1, runs);
                break;
            }
        }

        summary.runs += 1;
        summary.best_score = summary.best_score.max(session.score());
        score_total += u64::from(session.score());
        elapsed_total += session.elapsed().as_secs_f64();

        if let Some(result) = session.to_result() {
            if record_or_log(store, &result) {
                summary.recorded += 1;
            }
        }

        log::info!(
            "Game {}/{}: {} with {} (wins so far {}/{})",
            run + 1,
            runs,
            session.outcome().map(|o| o.to_string()).unwrap_or_default(),
            session.score(),
            summary.wins,
            summary.runs
        );
    }

    if summary.runs > 0 {
        summary.mean_score = score_total as f64 / summary.runs as f64;
        summary.mean_elapsed_secs = elapsed_total / summary.runs as f64;
    }
    Ok(summary)
}
