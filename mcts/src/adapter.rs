use std::hash::Hash;

use anyhow::Result;
use engine::{GameEngine, Transition};
use model::{GameAnalyzer, GameStateAnalysis};

/// Everything the search needs to know about a game and its evaluator.
pub trait GameAdapter {
    type State: Hash + Clone;
    type Action: Clone + Eq;

    fn is_terminal(&self, game_state: &Self::State) -> bool;

    /// Terminal outcome relative to the state's mover. Fails on non-terminal states.
    fn reward(&self, game_state: &Self::State) -> Result<f32>;

    fn legal_actions(&self, game_state: &Self::State) -> Vec<Self::Action>;

    fn apply(
        &self,
        game_state: &Self::State,
        action: &Self::Action,
    ) -> Result<Transition<Self::State>>;

    fn priors_and_value(&self, game_state: &Self::State) -> Result<GameStateAnalysis>;

    fn action_index(&self, action: &Self::Action) -> usize;

    fn action_space_size(&self) -> usize;
}

/// Pairs a game engine with an evaluator.
pub struct EngineAdapter<'a, E, M> {
    engine: &'a E,
    analyzer: &'a M,
}

impl<'a, E, M> EngineAdapter<'a, E, M> {
    pub fn new(engine: &'a E, analyzer: &'a M) -> Self {
        Self { engine, analyzer }
    }
}

impl<'a, E, M> GameAdapter for EngineAdapter<'a, E, M>
where
    E: GameEngine,
    E::State: Hash + Clone,
    E::Action: Clone + Eq,
    M: GameAnalyzer<State = E::State>,
{
    type State = E::State;
    type Action = E::Action;

    fn is_terminal(&self, game_state: &Self::State) -> bool {
        self.engine.is_terminal_state(game_state)
    }

    fn reward(&self, game_state: &Self::State) -> Result<f32> {
        self.engine.reward(game_state)
    }

    fn legal_actions(&self, game_state: &Self::State) -> Vec<Self::Action> {
        self.engine.legal_actions(game_state)
    }

    fn apply(
        &self,
        game_state: &Self::State,
        action: &Self::Action,
    ) -> Result<Transition<Self::State>> {
        self.engine.take_action(game_state, action)
    }

    fn priors_and_value(&self, game_state: &Self::State) -> Result<GameStateAnalysis> {
        self.analyzer.get_state_analysis(game_state)
    }

    fn action_index(&self, action: &Self::Action) -> usize {
        self.engine.action_index(action)
    }

    fn action_space_size(&self) -> usize {
        self.engine.action_space_size()
    }
}
