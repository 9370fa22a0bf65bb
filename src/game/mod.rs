pub mod input;
pub mod physics;
pub mod state;

pub use input::{poll_game_input, GameAction};
pub use state::{Ball, HeldDir, Paddle, Phase, Role, Session, Side};
