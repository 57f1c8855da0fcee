//! Bingo Hall - chat bingo game engine
//!
//! Card generation, pattern matching, per-chat games and hall-wide
//! tournaments driven by background call loops, plus the command layer and
//! persistent records around them.

pub mod bot;
pub mod common;
pub mod config;
pub mod dm_log;
pub mod errors;
pub mod events;
pub mod factory;
pub mod game_store;
pub mod games;
pub mod messaging;
pub mod storage;

pub use bot::{BingoBot, Inbound};
pub use common::traits::Messenger;
pub use common::types::{ChatId, PlayerKey, UserId};
pub use config::HallConfig;
pub use errors::{HallError, HallResult, Rejection};
pub use factory::HallFactory;
