pub mod engine;
pub mod error;
pub mod transition;

pub use crate::engine::*;
pub use crate::error::*;
pub use crate::transition::*;
