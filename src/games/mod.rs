pub mod types;
pub mod card;
pub mod patterns;
pub mod round;
pub mod render;
pub mod call_loop;
pub mod session;
pub mod tournament;
pub mod registry;

pub use types::*;
pub use registry::{SessionRegistry, StartedRound};
pub use session::GameSession;
pub use tournament::TournamentSession;
