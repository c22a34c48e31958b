use std::fmt::Display;

use anyhow::{anyhow, Result};
use engine::GameEngine;
use log::debug;
use model::GameAnalyzer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuelOutcome {
    /// Seat 0 moved first.
    Won(usize),
    Draw,
}

/// Plays one game between two evaluators without search. Each move is the legal action with the
/// highest prior of the evaluator in the mover's seat. `players[0]` moves first.
pub fn duel<E, M>(game_engine: &E, players: [&M; 2]) -> Result<DuelOutcome>
where
    E: GameEngine,
    E::State: Display,
    M: GameAnalyzer<State = E::State> + ?Sized,
{
    let mut game_state = game_engine.initial_state();
    let mut seat = 0;

    while !game_engine.is_terminal_state(&game_state) {
        let analysis = players[seat].get_state_analysis(&game_state)?;
        let action = game_engine
            .most_probable_action(&game_state, &analysis.policy_scores)
            .ok_or_else(|| anyhow!("No legal actions in a non-terminal state"))?;

        let transition = game_engine.take_action(&game_state, &action)?;
        seat = transition.turn.next_seat(seat);
        game_state = transition.state;

        debug!("Seat {} to move\n{}", seat, game_state);
    }

    let reward = game_engine.reward(&game_state)?;

    Ok(if reward > 0.0 {
        DuelOutcome::Won(seat)
    } else if reward < 0.0 {
        DuelOutcome::Won(1 - seat)
    } else {
        DuelOutcome::Draw
    })
}
