use std::fmt::Display;

use anyhow::Result;
use common::run_scoped;
use engine::GameEngine;
use log::info;
use model::GameAnalyzer;
use serde::{Deserialize, Serialize};

use super::{duel, DuelOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    CandidateWon,
    BaselineWon,
    Draw,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_wins: usize,
    pub baseline_wins: usize,
    pub draws: usize,
}

impl MatchResult {
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::CandidateWon => self.candidate_wins += 1,
            MatchOutcome::BaselineWon => self.baseline_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
    }

    pub fn num_games(&self) -> usize {
        self.candidate_wins + self.baseline_wins + self.draws
    }
}

/// Decides one game between a candidate and the baseline.
pub trait Arbiter<M: ?Sized> {
    /// `game_num` starts at 1.
    fn play(&self, candidate: &M, baseline: &M, game_num: usize) -> Result<MatchOutcome>;
}

/// Settles games with [`duel`]. The candidate moves first in odd games and second in even games.
pub struct GreedyArbiter<'a, E> {
    game_engine: &'a E,
}

impl<'a, E> GreedyArbiter<'a, E> {
    pub fn new(game_engine: &'a E) -> Self {
        Self { game_engine }
    }
}

impl<'a, E, M> Arbiter<M> for GreedyArbiter<'a, E>
where
    E: GameEngine,
    E::State: Display,
    M: GameAnalyzer<State = E::State> + ?Sized,
{
    fn play(&self, candidate: &M, baseline: &M, game_num: usize) -> Result<MatchOutcome> {
        let candidate_seat = if game_num % 2 == 1 { 0 } else { 1 };
        let players = if candidate_seat == 0 {
            [candidate, baseline]
        } else {
            [baseline, candidate]
        };

        Ok(match duel(self.game_engine, players)? {
            DuelOutcome::Won(seat) if seat == candidate_seat => MatchOutcome::CandidateWon,
            DuelOutcome::Won(_) => MatchOutcome::BaselineWon,
            DuelOutcome::Draw => MatchOutcome::Draw,
        })
    }
}

/// Plays `total_games` games between the candidate and the baseline on `parallelism` worker
/// threads and tallies the outcomes. `on_complete` receives each game's outcome as it finishes.
pub fn evaluate<M, A, F>(
    arbiter: &A,
    candidate: &M,
    baseline: &M,
    total_games: usize,
    parallelism: usize,
    mut on_complete: F,
) -> Result<MatchResult>
where
    M: Sync + ?Sized,
    A: Arbiter<M> + Sync,
    F: FnMut(usize, MatchOutcome),
{
    let outcomes = run_scoped(
        parallelism,
        total_games,
        |job_num| arbiter.play(candidate, baseline, job_num + 1),
        |job_num, outcome| on_complete(job_num + 1, *outcome),
    )?;

    let mut match_result = MatchResult::default();
    for outcome in outcomes {
        match_result.record(outcome);
    }

    info!(
        "Evaluation complete. Candidate: {}, Baseline: {}, Draws: {}",
        match_result.candidate_wins, match_result.baseline_wins, match_result.draws
    );

    Ok(match_result)
}
