pub mod config;
pub mod fs;
pub mod math;
pub mod pool;
pub mod softmax;
pub mod state_key;

pub use config::*;
pub use fs::*;
pub use math::*;
pub use pool::*;
pub use softmax::*;
pub use state_key::*;
