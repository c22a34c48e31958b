use std::fmt::Display;
use std::hash::Hash;

use anyhow::{anyhow, Result};
use engine::GameEngine;
use log::{debug, log_enabled, trace, Level};
use mcts::{EngineAdapter, PredictionCache, SearchTree};
use model::{GameAnalyzer, PositionMetrics};

use super::SelfPlayOptions;

/// How a finished game ended, by seat. Seat 0 moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won(usize),
    Draw,
}

impl GameOutcome {
    /// Reads the outcome from a terminal reward, relative to the seat that would move next.
    pub fn from_reward(reward: f32, seat_to_move: usize) -> Self {
        if reward > 0.0 {
            GameOutcome::Won(seat_to_move)
        } else if reward < 0.0 {
            GameOutcome::Won(1 - seat_to_move)
        } else {
            GameOutcome::Draw
        }
    }

    /// Training target for positions where `seat` was to move.
    pub fn score_for(&self, seat: usize, label_draws_as_zero: bool) -> f32 {
        match self {
            GameOutcome::Won(winner) if *winner == seat => 1.0,
            GameOutcome::Won(_) => -1.0,
            GameOutcome::Draw if label_draws_as_zero => 0.0,
            GameOutcome::Draw => -1.0,
        }
    }
}

/// Plays one game against itself and returns every visited position labelled with the final
/// outcome for the player who was to move there.
///
/// Each move is decided by a fresh search tree. Predictions are carried from one move's tree to
/// the next so positions revisited within the game are not evaluated twice.
pub fn play_self_one<E, M>(
    game_engine: &E,
    analyzer: &M,
    options: &SelfPlayOptions,
) -> Result<Vec<PositionMetrics<E::State>>>
where
    E: GameEngine,
    E::State: Hash + Clone,
    E::Action: Clone + Eq + Display,
    M: GameAnalyzer<State = E::State>,
{
    let adapter = EngineAdapter::new(game_engine, analyzer);
    let mut game_state = game_engine.initial_state();
    let mut seat = 0;
    let mut cache = PredictionCache::new();
    let mut visited = Vec::new();

    while !game_engine.is_terminal_state(&game_state) {
        let mut tree = SearchTree::with_cache(&adapter, options.cpuct, cache);

        for _ in 0..options.visits {
            tree.simulate(&game_state)?;
        }

        let policy = tree.derive_policy(&game_state, options.temperature)?;

        if log_enabled!(Level::Trace) {
            if let Some(details) = tree.node_details(&game_state) {
                trace!("{}", details);
            }
        }

        let action = game_engine
            .most_probable_action(&game_state, &policy)
            .ok_or_else(|| anyhow!("No legal actions in a non-terminal state"))?;

        cache = tree.into_cache();

        let transition = game_engine.take_action(&game_state, &action)?;
        visited.push((game_state, policy, seat));

        seat = transition.turn.next_seat(seat);
        game_state = transition.state;
    }

    let outcome = GameOutcome::from_reward(game_engine.reward(&game_state)?, seat);

    debug!(
        "Self play game complete. Moves: {}, Outcome: {:?}, Evaluations: {}",
        visited.len(),
        outcome,
        cache.misses()
    );

    Ok(visited
        .into_iter()
        .map(|(game_state, policy, seat)| PositionMetrics {
            game_state,
            policy,
            score: outcome.score_for(seat, options.label_draws_as_zero),
        })
        .collect())
}
