use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::analytics::GameAnalyzer;
use super::position_metrics::PositionMetrics;

pub trait Train: GameAnalyzer {
    /// Updates the parameters in place. An empty sample set leaves the parameters unchanged.
    fn train(
        &mut self,
        sample_metrics: &[PositionMetrics<Self::State>],
        options: &TrainOptions,
    ) -> Result<TrainHistory>;
}

pub trait Checkpoint {
    fn save_checkpoint(&self, path: &Path) -> Result<()>;

    fn load_checkpoint(&mut self, path: &Path) -> Result<()>;
}

/// An evaluator that can be predicted from concurrently, trained between phases, and deep copied
/// through `Clone`.
pub trait Model: Train + Checkpoint + Clone + Send + Sync {}

impl<T> Model for T where T: Train + Checkpoint + Clone + Send + Sync {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainOptions {
    pub train_batch_size: usize,
    pub epochs: usize,
    pub learning_rate: f32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            train_batch_size: 32,
            epochs: 10,
            learning_rate: 0.001,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainHistory {
    /// Mean combined loss of each epoch.
    pub epoch_losses: Vec<f32>,
    pub num_samples: usize,
}

impl TrainHistory {
    pub fn final_loss(&self) -> Option<f32> {
        self.epoch_losses.last().copied()
    }
}
