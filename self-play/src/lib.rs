pub mod options;
pub mod play_self_one;
pub mod self_play;

pub use options::*;
pub use play_self_one::*;
pub use self_play::*;
