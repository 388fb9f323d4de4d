pub mod board;
pub mod direction;
pub mod game_state;
pub mod get_legal_moves;
pub mod tile_spawn;

pub use board::Board;
pub use direction::Direction;
pub use game_state::{GameOutcome, GameSession};
pub use get_legal_moves::get_legal_moves;
pub use tile_spawn::SpawnTable;
