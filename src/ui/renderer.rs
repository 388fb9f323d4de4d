use std::io::Write;

use crate::game::board::Board;
use crate::game::game_state::{GameOutcome, GameSession};

/// Draws the game; the loops never read anything back from it.
pub trait Renderer {
    fn draw(&mut self, board: &Board, score: u32);

    /// Final screen once a session has ended.
    fn show_outcome(&mut self, _session: &GameSession) {}
}

/// Renderer for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _board: &Board, _score: u32) {}
}

/// Text renderer writing each frame to `out`.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, board: &Board, score: u32) -> std::io::Result<()> {
        writeln!(self.out, "SCORE: {:06}", score)?;
        write!(self.out, "{}", board)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn write_outcome(&mut self, session: &GameSession) -> std::io::Result<()> {
        let headline = match session.outcome() {
            Some(GameOutcome::Won) => "GAME WON!",
            Some(GameOutcome::Lost) => "GAME LOST.",
            Some(GameOutcome::Cancelled) => "GAME CANCELLED.",
            None => return Ok(()),
        };
        writeln!(self.out, "{}", headline)?;
        writeln!(
            self.out,
            "SCORE: {}  MOVES: {}  TIME PLAYED: {:.1} SEC",
            session.score(),
            session.move_count(),
            session.elapsed().as_secs_f64()
        )?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, board: &Board, score: u32) {
        if let Err(e) = self.write_frame(board, score) {
            log::warn!("Failed to draw board: {}", e);
        }
    }

    fn show_outcome(&mut self, session: &GameSession) {
        if let Err(e) = self.write_outcome(session) {
            log::warn!("Failed to draw final screen: {}", e);
        }
    }
}
