use std::path::PathBuf;

use anyhow::Result;
use arena::ArenaOptions;
use common::Config;
use model::TrainOptions;
use self_play::SelfPlayOptions;
use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelfLearnOptions {
    pub board_size: usize,
    pub num_iterations: usize,
    pub num_episodes: usize,
    pub episode_parallelism: usize,
    /// From this iteration on, self play runs at temperature 0.
    pub temperature_threshold: Option<usize>,
    /// Iterations of examples to train on. 0 trains on every example generated so far.
    pub moving_window_size: usize,
    pub checkpoint_path: PathBuf,
    /// Checkpoint to resume from.
    pub weights_path: Option<PathBuf>,
    pub self_play: SelfPlayOptions,
    pub arena: ArenaOptions,
    pub train: TrainOptions,
}

impl Default for SelfLearnOptions {
    fn default() -> Self {
        Self {
            board_size: 6,
            num_iterations: 80,
            num_episodes: 100,
            episode_parallelism: 1,
            temperature_threshold: Some(25),
            moving_window_size: 0,
            checkpoint_path: PathBuf::from("./othello_model.weights.gz"),
            weights_path: None,
            self_play: SelfPlayOptions::default(),
            arena: ArenaOptions::default(),
            train: TrainOptions::default(),
        }
    }
}

impl SelfLearnOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        let self_play = &self.self_play;

        if arena.victory_threshold >= arena.total_games {
            return Err(ConfigError::VictoryThresholdNotBelowTotalGames {
                victory_threshold: arena.victory_threshold,
                total_games: arena.total_games,
            });
        }

        for (name, value) in [
            ("total_games", arena.total_games),
            ("num_iterations", self.num_iterations),
            ("num_episodes", self.num_episodes),
            ("visits", self_play.visits),
            ("episode_parallelism", self.episode_parallelism),
            ("game_parallelism", arena.game_parallelism),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(name));
            }
        }

        for (name, value) in [
            ("temperature", self_play.temperature),
            ("cpuct", self_play.cpuct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if self.board_size < 4 || self.board_size % 2 != 0 {
            return Err(ConfigError::BoardSize(self.board_size));
        }

        Ok(())
    }

    /// Where the model that survived the latest evaluation is kept, next to `checkpoint_path`.
    /// `model.weights.gz` becomes `model.weights.best.gz`.
    pub fn best_checkpoint_path(&self) -> PathBuf {
        let extension = match self.checkpoint_path.extension() {
            Some(extension) => format!("best.{}", extension.to_string_lossy()),
            None => "best".to_string(),
        };

        self.checkpoint_path.with_extension(extension)
    }
}

impl Config for SelfLearnOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let defaults = Self::default();
        let default_train = &defaults.train;

        Ok(Self {
            board_size: config
                .get("board_size")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.board_size),
            num_iterations: config
                .get("num_iterations")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.num_iterations),
            num_episodes: config
                .get("num_episodes")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.num_episodes),
            episode_parallelism: config
                .get("episode_parallelism")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.episode_parallelism),
            temperature_threshold: config
                .get("temperature_threshold")
                .and_then(|v| v.as_usize())
                .map(|v| Some(v).filter(|v| *v > 0))
                .unwrap_or(defaults.temperature_threshold),
            moving_window_size: config
                .get("moving_window_size")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.moving_window_size),
            checkpoint_path: config
                .get_optional_relative_path("checkpoint_path")
                .unwrap_or(defaults.checkpoint_path),
            weights_path: config.get_optional_relative_path("weights_path"),
            self_play: SelfPlayOptions::load(config)?,
            arena: ArenaOptions::load(config)?,
            train: TrainOptions {
                train_batch_size: config
                    .get("train_batch_size")
                    .and_then(|v| v.as_usize())
                    .unwrap_or(default_train.train_batch_size),
                epochs: config
                    .get("epochs")
                    .and_then(|v| v.as_usize())
                    .unwrap_or(default_train.epochs),
                learning_rate: config
                    .get("learning_rate")
                    .and_then(|v| v.as_f32())
                    .unwrap_or(default_train.learning_rate),
            },
        })
    }
}
