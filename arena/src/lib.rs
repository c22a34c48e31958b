pub mod duel;
pub mod evaluate;
pub mod options;

pub use duel::*;
pub use evaluate::*;
pub use options::*;
