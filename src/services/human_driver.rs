//! Human game loop driven by an [`InputSource`].

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::game::game_state::{GameOutcome, GameSession};
use crate::ui::input::{InputSource, PlayerCommand};
use crate::ui::renderer::Renderer;
use crate::Result;

pub struct HumanDriver {
    config: GameConfig,
    rng: StdRng,
    seed: u64,
}

impl HumanDriver {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Play until a loss, a win (when a threshold is set) or a quit command.
    ///
    /// Quitting ends the session as `Cancelled`, which is never recorded.
    pub fn play(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<GameSession> {
        let mut session = GameSession::new(self.config.size);
        session.start(&self.config.spawn_table, &mut self.rng)?;
        log::info!(
            "Human game started: {}x{} grid, seed {}",
            self.config.size,
            self.config.size,
            self.seed
        );

        loop {
            let score = session.score();
            renderer.draw(&session.board, score);

            if self.config.is_win(score) {
                session.finish(GameOutcome::Won);
                break;
            }
            if session.board.is_terminal() {
                session.finish(GameOutcome::Lost);
                break;
            }

            match input.poll_command()? {
                PlayerCommand::Quit => {
                    log::info!("Player quit after {} moves", session.move_count());
                    session.finish(GameOutcome::Cancelled);
                    break;
                }
                PlayerCommand::Move(direction) => {
                    if session.play_move(direction) {
                        session
                            .board
                            .insert_tile(1, &self.config.spawn_table, &mut self.rng)?;
                    }
                }
            }
        }

        renderer.show_outcome(&session);
        Ok(session)
    }
}
