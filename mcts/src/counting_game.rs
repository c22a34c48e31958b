use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use engine::{EngineError, GameEngine, Transition, Turn};
use model::{GameAnalyzer, GameStateAnalysis};

/// Players take turns adding to a shared count. Whoever brings the count to the target wins, so
/// the player to move at a terminal count has lost.
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct CountingGameState {
    pub count: u32,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Add(pub u32);

pub struct CountingGameEngine {
    pub target: u32,
    pub max_step: u32,
    /// The opponent passes when the count lands here.
    pub pass_at: Option<u32>,
}

impl CountingGameEngine {
    pub fn new(target: u32, max_step: u32) -> Self {
        Self {
            target,
            max_step,
            pass_at: None,
        }
    }

    pub fn with_pass_at(mut self, count: u32) -> Self {
        self.pass_at = Some(count);
        self
    }

    pub fn state(count: u32) -> CountingGameState {
        CountingGameState { count }
    }
}

impl GameEngine for CountingGameEngine {
    type Action = Add;
    type State = CountingGameState;

    fn initial_state(&self) -> Self::State {
        Self::state(0)
    }

    fn is_terminal_state(&self, game_state: &Self::State) -> bool {
        game_state.count >= self.target
    }

    fn reward(&self, game_state: &Self::State) -> Result<f32> {
        if !self.is_terminal_state(game_state) {
            return Err(EngineError::NotTerminal.into());
        }

        Ok(-1.0)
    }

    fn legal_actions(&self, game_state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal_state(game_state) {
            return vec![];
        }

        (1..=self.max_step).map(Add).collect()
    }

    fn take_action(
        &self,
        game_state: &Self::State,
        action: &Self::Action,
    ) -> Result<Transition<Self::State>> {
        if !self.legal_actions(game_state).contains(action) {
            return Err(EngineError::IllegalAction(format!("{:?}", action)).into());
        }

        let count = game_state.count + action.0;
        let turn = if self.pass_at == Some(count) {
            Turn::Same
        } else {
            Turn::Opponent
        };

        Ok(Transition::new(Self::state(count), turn))
    }

    fn action_index(&self, action: &Self::Action) -> usize {
        action.0 as usize - 1
    }

    fn action_space_size(&self) -> usize {
        self.max_step as usize
    }
}

/// Uniform priors and a fixed value. Counts every prediction.
pub struct CountingAnalyzer {
    pub value: f32,
    pub max_step: u32,
    pub fail: bool,
    calls: AtomicUsize,
}

impl CountingAnalyzer {
    pub fn new(max_step: u32, value: f32) -> Self {
        Self {
            value,
            max_step,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(max_step: u32) -> Self {
        Self {
            fail: true,
            ..Self::new(max_step, 0.0)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GameAnalyzer for CountingAnalyzer {
    type State = CountingGameState;

    fn get_state_analysis(&self, _: &Self::State) -> Result<GameStateAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(anyhow!("Evaluator unavailable"));
        }

        let prior = 1.0 / self.max_step as f32;
        Ok(GameStateAnalysis::new(
            self.value,
            vec![prior; self.max_step as usize],
        ))
    }
}
