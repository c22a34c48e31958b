use std::fmt::Display;
use std::hash::Hash;

use anyhow::Result;
use arena::{evaluate, Arbiter, MatchResult};
use engine::GameEngine;
use model::{Model, TrainHistory};
use self_play::play_self;
use serde::{Deserialize, Serialize};

use super::{ConfigError, ExampleWindow, LearnEvent, Reporter, SelfLearnOptions};

/// What happened in one iteration of [`SelfLearn::learn`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub iteration: usize,
    /// Examples generated by this iteration's self play.
    pub num_examples: usize,
    pub train_history: TrainHistory,
    pub match_result: MatchResult,
    pub promoted: bool,
}

/// Alternates self play, training and evaluation. A trained model replaces its predecessor only
/// after winning enough evaluation games against it.
pub struct SelfLearn<'a, E> {
    game_engine: &'a E,
    options: &'a SelfLearnOptions,
}

impl<'a, E> SelfLearn<'a, E>
where
    E: GameEngine + Sync,
    E::State: Hash + Clone + Send,
    E::Action: Clone + Eq + Display,
{
    pub fn new(game_engine: &'a E, options: &'a SelfLearnOptions) -> Self {
        Self {
            game_engine,
            options,
        }
    }

    /// Runs every iteration and returns the final model with a report per iteration.
    ///
    /// The options are validated, and checked against the engine's action space, before any game
    /// is played. The checkpoint is written after every training step, whether or not the trained
    /// model is then promoted. The model kept after each evaluation is written to
    /// [`SelfLearnOptions::best_checkpoint_path`].
    pub fn learn<M, A, R>(
        &self,
        mut model: M,
        arbiter: &A,
        reporter: &mut R,
    ) -> Result<(M, Vec<IterationReport>)>
    where
        M: Model<State = E::State>,
        A: Arbiter<M> + Sync,
        R: Reporter,
    {
        let options = self.options;
        options.validate()?;

        let expected = options.board_size * options.board_size;
        let action_space_size = self.game_engine.action_space_size();
        if action_space_size != expected {
            return Err(ConfigError::EngineMismatch {
                board_size: options.board_size,
                expected,
                action_space_size,
            }
            .into());
        }

        let best_checkpoint_path = options.best_checkpoint_path();

        let num_iterations = options.num_iterations;
        let arena_options = &options.arena;
        let mut self_play_options = options.self_play.clone();
        let mut window = ExampleWindow::new(options.moving_window_size);
        let mut reports = Vec::with_capacity(num_iterations);

        for iteration in 1..=num_iterations {
            let baseline = model.clone();

            reporter.on_event(&LearnEvent::IterationStarted {
                iteration,
                num_iterations,
            });

            if let Some(threshold) = options.temperature_threshold {
                if iteration >= threshold && self_play_options.temperature != 0.0 {
                    self_play_options.temperature = 0.0;
                    reporter.on_event(&LearnEvent::TemperatureDropped {
                        iteration,
                        num_iterations,
                    });
                }
            }

            let games = play_self(
                self.game_engine,
                &model,
                &self_play_options,
                options.num_episodes,
                options.episode_parallelism,
                |episode_num, positions| {
                    reporter.on_event(&LearnEvent::EpisodeCompleted {
                        iteration,
                        num_iterations,
                        episode: episode_num + 1,
                        num_examples: positions.len(),
                    })
                },
            )?;

            let iteration_examples: Vec<_> = games.into_iter().flatten().collect();
            let num_examples = iteration_examples.len();
            window.push(iteration_examples);

            reporter.on_event(&LearnEvent::Training {
                iteration,
                num_iterations,
                num_examples: window.len(),
            });

            let train_history = model.train(window.examples(), &options.train)?;
            model.save_checkpoint(&options.checkpoint_path)?;

            reporter.on_event(&LearnEvent::CheckpointSaved {
                iteration,
                num_iterations,
                path: &options.checkpoint_path,
            });

            let mut candidate_wins = 0;
            let match_result = evaluate(
                arbiter,
                &model,
                &baseline,
                arena_options.total_games,
                arena_options.game_parallelism,
                |game, outcome| {
                    if outcome == arena::MatchOutcome::CandidateWon {
                        candidate_wins += 1;
                    }

                    reporter.on_event(&LearnEvent::GameCompleted {
                        iteration,
                        num_iterations,
                        game,
                        total_games: arena_options.total_games,
                        outcome,
                        candidate_wins,
                        victory_threshold: arena_options.victory_threshold,
                    })
                },
            )?;

            let promoted = match_result.candidate_wins >= arena_options.victory_threshold;
            if !promoted {
                model = baseline;
            }

            model.save_checkpoint(&best_checkpoint_path)?;

            reporter.on_event(&LearnEvent::BestModelSaved {
                iteration,
                num_iterations,
                path: &best_checkpoint_path,
            });

            let report = IterationReport {
                iteration,
                num_examples,
                train_history,
                match_result,
                promoted,
            };

            reporter.on_event(&LearnEvent::IterationCompleted {
                num_iterations,
                report: &report,
            });

            reports.push(report);
        }

        Ok((model, reports))
    }
}
