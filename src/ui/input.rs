use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::game::direction::Direction;
use crate::Result;

/// What a human player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Move(Direction),
    Quit,
}

/// Blocking source of player commands.
pub trait InputSource {
    fn poll_command(&mut self) -> Result<PlayerCommand>;
}

/// Reads one command per line: a direction (`left`, `a`, `h`, ...) or `q`/`quit`.
///
/// Unknown input is reported on `prompt` and read again; end of input quits.
pub struct LineInput<R: BufRead, W: Write> {
    reader: R,
    prompt: W,
}

impl LineInput<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, prompt: W) -> Self {
        Self { reader, prompt }
    }
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn poll_command(&mut self) -> Result<PlayerCommand> {
        loop {
            write!(self.prompt, "move [w/a/s/d, q to quit]> ")?;
            self.prompt.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(PlayerCommand::Quit);
            }
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            if matches!(token.to_lowercase().as_str(), "q" | "quit" | "exit") {
                return Ok(PlayerCommand::Quit);
            }
            match token.parse::<Direction>() {
                Ok(direction) => return Ok(PlayerCommand::Move(direction)),
                Err(e) => {
                    log::debug!("Rejected input: {}", e);
                    writeln!(self.prompt, "unknown move {:?}", token)?;
                }
            }
        }
    }
}

/// Replays a fixed list of commands, then quits.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    commands: VecDeque<PlayerCommand>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = PlayerCommand>>(commands: I) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    /// Script that cycles through `directions` `repeat` times.
    pub fn cycling(directions: &[Direction], repeat: usize) -> Self {
        Self::new(
            (0..repeat)
                .flat_map(|_| directions.iter().copied())
                .map(PlayerCommand::Move),
        )
    }
}

impl InputSource for ScriptedInput {
    fn poll_command(&mut self) -> Result<PlayerCommand> {
        Ok(self.commands.pop_front().unwrap_or(PlayerCommand::Quit))
    }
}
