//! Bot game loop.
//!
//! `Init -> Playing -> {Won, Lost}`: two starting tiles, then per turn render,
//! check the win threshold, search, apply the move, check for a loss and add
//! a tile if the move changed the board. A raised cancel flag ends the game
//! as `Cancelled` at the next turn boundary.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::GameConfig;
use crate::game::game_state::{GameOutcome, GameSession};
use crate::mcts::MoveSearch;
use crate::ui::renderer::Renderer;
use crate::Result;

pub struct BotDriver {
    config: GameConfig,
    search: MoveSearch,
    rng: StdRng,
    seed: u64,
}

impl BotDriver {
    /// Validates `config`; uses its seed or draws a fresh one.
    pub fn new(config: GameConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let search = MoveSearch::new(config.search.clone(), config.spawn_table.clone());
        Ok(Self {
            config,
            search,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    /// Seed that replays this driver's games.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Play one game to completion or cancellation.
    pub fn play(&mut self, renderer: &mut dyn Renderer, cancel: &AtomicBool) -> Result<GameSession> {
        let mut session = GameSession::new(self.config.size);
        session.start(&self.config.spawn_table, &mut self.rng)?;
        log::info!(
            "Bot game started: {}x{} grid, win at {:?}, seed {}",
            self.config.size,
            self.config.size,
            self.config.win_threshold,
            self.seed
        );

        loop {
            if cancel.load(Ordering::Relaxed) {
                log::warn!("Game cancelled after {} moves", session.move_count());
                session.finish(GameOutcome::Cancelled);
                break;
            }

            let score = session.score();
            renderer.draw(&session.board, score);

            if self.config.is_win(score) {
                session.finish(GameOutcome::Won);
                break;
            }

            let direction =
                self.search
                    .next_move(&session.board, session.move_count(), &mut self.rng)?;
            let changed = session.play_move(direction);

            if session.board.is_terminal() {
                session.finish(GameOutcome::Lost);
                break;
            }
            if changed {
                session
                    .board
                    .insert_tile(1, &self.config.spawn_table, &mut self.rng)?;
            }
        }

        renderer.show_outcome(&session);
        log::info!(
            "Bot game {}: score {}, {} moves, {:.1}s",
            session.outcome().unwrap_or(GameOutcome::Cancelled),
            session.score(),
            session.move_count(),
            session.elapsed().as_secs_f64()
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::SearchParams;
    use crate::ui::renderer::NullRenderer;

    fn quick_config(size: usize, win_threshold: Option<u32>) -> GameConfig {
        GameConfig {
            size,
            win_threshold,
            search: SearchParams {
                searches_per_move: 4,
                search_depth: 4,
                ..SearchParams::default()
            },
            ..GameConfig::bot()
        }
    }

    #[test]
    fn test_reaches_small_threshold() {
        let mut driver = BotDriver::with_seed(quick_config(4, Some(16)), 1).unwrap();
        let session = driver.play(&mut NullRenderer, &AtomicBool::new(false)).unwrap();
        assert_eq!(session.outcome(), Some(GameOutcome::Won));
        assert!(session.score() >= 16);
    }

    #[test]
    fn test_plays_until_loss_without_threshold() {
        let mut driver = BotDriver::with_seed(quick_config(2, None), 3).unwrap();
        let session = driver.play(&mut NullRenderer, &AtomicBool::new(false)).unwrap();
        assert_eq!(session.outcome(), Some(GameOutcome::Lost));
        assert!(session.board.is_terminal());
        assert!(session.to_result().is_some_and(|r| !r.won));
    }

    #[test]
    fn test_cancel_before_first_turn() {
        let mut driver = BotDriver::with_seed(quick_config(4, Some(2048)), 9).unwrap();
        let session = driver.play(&mut NullRenderer, &AtomicBool::new(true)).unwrap();
        assert_eq!(session.outcome(), Some(GameOutcome::Cancelled));
        assert_eq!(session.move_count(), 0);
        assert!(session.to_result().is_none());
    }

    #[test]
    fn test_same_seed_replays_same_game() {
        let config = quick_config(4, Some(64));
        let a = BotDriver::with_seed(config.clone(), 2024)
            .unwrap()
            .play(&mut NullRenderer, &AtomicBool::new(false))
            .unwrap();
        let b = BotDriver::with_seed(config, 2024)
            .unwrap()
            .play(&mut NullRenderer, &AtomicBool::new(false))
            .unwrap();
        assert_eq!(a.trace(), b.trace());
        assert_eq!(a.board, b.board);
    }

    #[test]
    fn test_configured_seed_is_reported() {
        let config = GameConfig {
            seed: Some(77),
            ..quick_config(4, Some(32))
        };
        assert_eq!(BotDriver::new(config).unwrap().seed(), 77);
        assert_eq!(BotDriver::with_seed(quick_config(3, None), 5).unwrap().seed(), 5);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(BotDriver::new(quick_config(1, None)).is_err());
    }
}
