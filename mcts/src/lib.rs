mod adapter;
mod cache;
#[cfg(test)]
mod counting_game;
mod edge;
mod error;
#[cfg(test)]
mod mcts_tests;
mod node;
pub mod node_details;
mod search_tree;

pub use adapter::*;
pub use cache::*;
pub use edge::*;
pub use error::*;
pub use node::*;
pub use node_details::*;
pub use search_tree::*;
