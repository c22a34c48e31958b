use serde::{Deserialize, Serialize};

/// A training sample produced by self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionMetrics<S> {
    /// The mover-relative state.
    pub game_state: S,
    /// The search policy at the state, indexed by action index.
    pub policy: Vec<f32>,
    /// Final outcome of the game for the player to move at the state.
    pub score: f32,
}
