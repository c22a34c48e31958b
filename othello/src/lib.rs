pub mod action;
pub mod engine;
pub mod game_state;
pub mod model;

pub use action::*;
pub use engine::*;
pub use game_state::*;
pub use model::*;
