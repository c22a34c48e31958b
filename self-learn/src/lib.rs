pub mod error;
pub mod example_window;
pub mod options;
pub mod reporter;
pub mod self_learn;

pub use error::*;
pub use example_window::*;
pub use options::*;
pub use reporter::*;
pub use self_learn::*;
