use std::path::Path;

use arena::MatchOutcome;
use log::{debug, info};

use super::IterationReport;

/// Progress of a training run.
#[derive(Debug)]
pub enum LearnEvent<'a> {
    IterationStarted {
        iteration: usize,
        num_iterations: usize,
    },
    TemperatureDropped {
        iteration: usize,
        num_iterations: usize,
    },
    EpisodeCompleted {
        iteration: usize,
        num_iterations: usize,
        episode: usize,
        num_examples: usize,
    },
    Training {
        iteration: usize,
        num_iterations: usize,
        num_examples: usize,
    },
    CheckpointSaved {
        iteration: usize,
        num_iterations: usize,
        path: &'a Path,
    },
    GameCompleted {
        iteration: usize,
        num_iterations: usize,
        game: usize,
        total_games: usize,
        outcome: MatchOutcome,
        candidate_wins: usize,
        victory_threshold: usize,
    },
    BestModelSaved {
        iteration: usize,
        num_iterations: usize,
        path: &'a Path,
    },
    IterationCompleted {
        num_iterations: usize,
        report: &'a IterationReport,
    },
}

pub trait Reporter {
    fn on_event(&mut self, event: &LearnEvent);
}

/// Writes progress to the log.
#[derive(Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_event(&mut self, event: &LearnEvent) {
        match event {
            LearnEvent::IterationStarted {
                iteration,
                num_iterations,
            } => info!("Iteration {}/{}: Starting iteration", iteration, num_iterations),
            LearnEvent::TemperatureDropped {
                iteration,
                num_iterations,
            } => info!(
                "Iteration {}/{}: Temperature threshold reached, changing temperature to 0",
                iteration, num_iterations
            ),
            LearnEvent::EpisodeCompleted {
                iteration,
                num_iterations,
                episode,
                num_examples,
            } => debug!(
                "Iteration {}/{} - Episode {}: Finished with {} examples",
                iteration, num_iterations, episode, num_examples
            ),
            LearnEvent::Training {
                iteration,
                num_iterations,
                num_examples,
            } => info!(
                "Iteration {}/{}: Training model with {} examples",
                iteration, num_iterations, num_examples
            ),
            LearnEvent::CheckpointSaved {
                iteration,
                num_iterations,
                path,
            } => info!(
                "Iteration {}/{}: Saved trained model in {:?}",
                iteration, num_iterations, path
            ),
            LearnEvent::GameCompleted {
                iteration,
                num_iterations,
                game,
                total_games,
                outcome,
                candidate_wins,
                victory_threshold,
            } => {
                let result = match outcome {
                    MatchOutcome::CandidateWon => "New model has won",
                    MatchOutcome::BaselineWon => "New model has lost",
                    MatchOutcome::Draw => "Drawn",
                };

                info!(
                    "Iteration {}/{} - Game {}/{}: {}. Promotion status ({}/{})",
                    iteration,
                    num_iterations,
                    game,
                    total_games,
                    result,
                    candidate_wins,
                    victory_threshold
                );
            }
            LearnEvent::BestModelSaved {
                iteration,
                num_iterations,
                path,
            } => debug!(
                "Iteration {}/{}: Saved best model in {:?}",
                iteration, num_iterations, path
            ),
            LearnEvent::IterationCompleted {
                num_iterations,
                report,
            } => {
                let decision = if report.promoted {
                    "New model has been promoted"
                } else {
                    "New model has been rejected"
                };

                info!(
                    "Iteration {}/{}: {}. Candidate: {}, Baseline: {}, Draws: {}, Loss: {:?}",
                    report.iteration,
                    num_iterations,
                    decision,
                    report.match_result.candidate_wins,
                    report.match_result.baseline_wins,
                    report.match_result.draws,
                    report.train_history.final_loss()
                );
            }
        }
    }
}
