use anyhow::Result;

/// The predict half of an evaluator.
///
/// Implementations must be a pure function of the state's contents. `Sync` implementations are
/// shared between self-play and arena workers without locking.
pub trait GameAnalyzer {
    type State;

    fn get_state_analysis(&self, game_state: &Self::State) -> Result<GameStateAnalysis>;
}

impl<T: GameAnalyzer + ?Sized> GameAnalyzer for &T {
    type State = T::State;

    fn get_state_analysis(&self, game_state: &Self::State) -> Result<GameStateAnalysis> {
        (**self).get_state_analysis(game_state)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameStateAnalysis {
    /// Prior probability per action, indexed by the engine's action index.
    pub policy_scores: Vec<f32>,
    /// Expected outcome for the player to move, in [-1, 1].
    pub value_score: f32,
}

impl GameStateAnalysis {
    pub fn new(value_score: f32, policy_scores: Vec<f32>) -> Self {
        GameStateAnalysis {
            policy_scores,
            value_score,
        }
    }

    /// The prior of an action index. Indexes outside of the policy vector have no prior.
    pub fn policy_score(&self, action_index: usize) -> f32 {
        self.policy_scores.get(action_index).copied().unwrap_or(0.0)
    }
}
