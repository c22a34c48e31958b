use thiserror::Error;

/// A combination of options the training loop cannot run with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("victory_threshold ({victory_threshold}) must be less than total_games ({total_games})")]
    VictoryThresholdNotBelowTotalGames {
        victory_threshold: usize,
        total_games: usize,
    },
    #[error("{0} must be greater than 0")]
    Zero(&'static str),
    #[error("{name} must be a finite number of at least 0, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("board_size must be even and at least 4, got {0}")]
    BoardSize(usize),
    #[error("board_size {board_size} needs {expected} actions, the engine has {action_space_size}")]
    EngineMismatch {
        board_size: usize,
        expected: usize,
        action_space_size: usize,
    },
}
