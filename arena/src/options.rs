use anyhow::Result;
use common::Config;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ArenaOptions {
    pub total_games: usize,
    /// Candidate wins needed for promotion.
    pub victory_threshold: usize,
    pub game_parallelism: usize,
}

impl Default for ArenaOptions {
    fn default() -> Self {
        Self {
            total_games: 10,
            victory_threshold: 6,
            game_parallelism: 1,
        }
    }
}

impl Config for ArenaOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            total_games: config
                .get("total_games")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.total_games),
            victory_threshold: config
                .get("victory_threshold")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.victory_threshold),
            game_parallelism: config
                .get("game_parallelism")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.game_parallelism),
        })
    }
}
