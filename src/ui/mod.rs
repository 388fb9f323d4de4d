//! Render and input collaborators of the game loops.

pub mod input;
pub mod renderer;

pub use input::{InputSource, LineInput, PlayerCommand, ScriptedInput};
pub use renderer::{NullRenderer, Renderer, TerminalRenderer};
