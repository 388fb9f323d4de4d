pub mod batch_runner;
pub mod bot_driver;
pub mod human_driver;

pub use batch_runner::{run_batch, BatchSummary};
pub use bot_driver::BotDriver;
pub use human_driver::HumanDriver;
