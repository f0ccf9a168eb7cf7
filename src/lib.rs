pub mod actions;
pub mod arena;
pub mod arena_board;
pub mod board;
pub mod breach;
pub mod commitment;
pub mod config;
pub mod constants;
pub mod counter;
pub mod error;
pub mod formation;
pub mod frames;
pub mod hypothetical;
pub mod location;
pub mod risk;
pub mod selector;
pub mod session;
pub mod units;

pub use actions::{ActionBatch, TurnAction};
pub use arena_board::ArenaBoard;
pub use board::Board;
pub use config::StrategyConfig;
pub use error::{Result, StrategyError};
pub use location::{Location, Side};
pub use session::*;
pub use units::*;
