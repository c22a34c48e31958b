use std::fmt::Display;
use std::hash::Hash;

use anyhow::Result;
use common::run_scoped;
use engine::GameEngine;
use log::info;
use model::{GameAnalyzer, PositionMetrics};

use super::{play_self_one, SelfPlayOptions};

/// Plays `num_episodes` independent self play games on `parallelism` worker threads.
///
/// Returns once every game has finished, with the games in episode order. `on_complete` receives
/// each game as it finishes.
pub fn play_self<E, M, F>(
    game_engine: &E,
    analyzer: &M,
    options: &SelfPlayOptions,
    num_episodes: usize,
    parallelism: usize,
    on_complete: F,
) -> Result<Vec<Vec<PositionMetrics<E::State>>>>
where
    E: GameEngine + Sync,
    E::State: Hash + Clone + Send,
    E::Action: Clone + Eq + Display,
    M: GameAnalyzer<State = E::State> + Sync,
    F: FnMut(usize, &Vec<PositionMetrics<E::State>>),
{
    info!(
        "Playing {} self play games on {} threads",
        num_episodes, parallelism
    );

    run_scoped(
        parallelism,
        num_episodes,
        |_| play_self_one(game_engine, analyzer, options),
        on_complete,
    )
}
