use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use common::{ensure_parent_dir, softmax};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use model::{
    Checkpoint, GameAnalyzer, GameStateAnalysis, PositionMetrics, Train, TrainHistory,
    TrainOptions,
};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

use super::GameState;

const INIT_SCALE: f32 = 0.01;

/// A linear policy head and a tanh value head over the two board planes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    board_size: usize,
    /// Row major, one row of input weights per action.
    policy_weights: Vec<f32>,
    policy_bias: Vec<f32>,
    value_weights: Vec<f32>,
    value_bias: f32,
}

impl LinearModel {
    /// Small random weights so that fresh models are not all identical.
    pub fn new(board_size: usize) -> Self {
        let mut rng = thread_rng();
        let mut model = Self::zeros(board_size);

        for w in model
            .policy_weights
            .iter_mut()
            .chain(model.value_weights.iter_mut())
        {
            *w = rng.gen_range(-INIT_SCALE..INIT_SCALE);
        }

        model
    }

    /// Uniform policy and a value of 0 everywhere.
    pub fn zeros(board_size: usize) -> Self {
        let num_actions = board_size * board_size;
        let num_inputs = num_actions * 2;

        Self {
            board_size,
            policy_weights: vec![0.0; num_actions * num_inputs],
            policy_bias: vec![0.0; num_actions],
            value_weights: vec![0.0; num_inputs],
            value_bias: 0.0,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    fn num_actions(&self) -> usize {
        self.policy_bias.len()
    }

    fn num_inputs(&self) -> usize {
        self.value_weights.len()
    }

    fn forward(&self, input: &[f32]) -> (Vec<f32>, f32) {
        let num_inputs = self.num_inputs();

        let logits: Vec<f32> = self
            .policy_weights
            .chunks(num_inputs)
            .zip(&self.policy_bias)
            .map(|(row, bias)| dot(row, input) + bias)
            .collect();

        let value = (dot(&self.value_weights, input) + self.value_bias).tanh();

        (softmax(&logits), value)
    }

    fn check_board_size(&self, game_state: &GameState) -> Result<()> {
        if game_state.size() != self.board_size {
            return Err(anyhow!(
                "Model expects a board of size {}, got {}",
                self.board_size,
                game_state.size()
            ));
        }

        Ok(())
    }

    fn check_shapes(&self) -> Result<()> {
        let num_actions = self.board_size * self.board_size;
        let num_inputs = num_actions * 2;

        for (name, len, expected) in [
            ("policy_weights", self.policy_weights.len(), num_actions * num_inputs),
            ("policy_bias", self.policy_bias.len(), num_actions),
            ("value_weights", self.value_weights.len(), num_inputs),
        ] {
            if len != expected {
                return Err(anyhow!("{} has {} entries, expected {}", name, len, expected));
            }
        }

        Ok(())
    }

    /// One gradient step over a minibatch. Returns the summed loss of the batch.
    fn train_batch(&mut self, batch: &[&PositionMetrics<GameState>], learning_rate: f32) -> f32 {
        let num_inputs = self.num_inputs();
        let mut policy_weight_grads = vec![0.0; self.policy_weights.len()];
        let mut policy_bias_grads = vec![0.0; self.num_actions()];
        let mut value_weight_grads = vec![0.0; num_inputs];
        let mut value_bias_grad = 0.0;
        let mut loss = 0.0;

        for sample in batch {
            let input = sample.game_state.to_input();
            let (policy, value) = self.forward(&input);

            for (a, (p, target)) in policy.iter().zip(&sample.policy).enumerate() {
                if *target > 0.0 {
                    loss -= target * p.max(f32::EPSILON).ln();
                }

                let grad = p - target;
                if grad == 0.0 {
                    continue;
                }

                policy_bias_grads[a] += grad;
                let row = &mut policy_weight_grads[a * num_inputs..(a + 1) * num_inputs];
                for (g, x) in row.iter_mut().zip(&input) {
                    *g += grad * x;
                }
            }

            let error = value - sample.score;
            loss += error * error;

            let grad = 2.0 * error * (1.0 - value * value);
            value_bias_grad += grad;
            for (g, x) in value_weight_grads.iter_mut().zip(&input) {
                *g += grad * x;
            }
        }

        let step = learning_rate / batch.len() as f32;
        apply_gradient(&mut self.policy_weights, &policy_weight_grads, step);
        apply_gradient(&mut self.policy_bias, &policy_bias_grads, step);
        apply_gradient(&mut self.value_weights, &value_weight_grads, step);
        self.value_bias -= step * value_bias_grad;

        loss
    }
}

impl GameAnalyzer for LinearModel {
    type State = GameState;

    fn get_state_analysis(&self, game_state: &Self::State) -> Result<GameStateAnalysis> {
        self.check_board_size(game_state)?;

        let (policy_scores, value_score) = self.forward(&game_state.to_input());

        Ok(GameStateAnalysis::new(value_score, policy_scores))
    }
}

impl Train for LinearModel {
    fn train(
        &mut self,
        sample_metrics: &[PositionMetrics<Self::State>],
        options: &TrainOptions,
    ) -> Result<TrainHistory> {
        let num_samples = sample_metrics.len();
        if num_samples == 0 {
            return Ok(TrainHistory::default());
        }

        for sample in sample_metrics {
            self.check_board_size(&sample.game_state)?;
            if sample.policy.len() != self.num_actions() {
                return Err(anyhow!(
                    "Policy target has {} entries, expected {}",
                    sample.policy.len(),
                    self.num_actions()
                ));
            }
        }

        let batch_size = options.train_batch_size.max(1);
        let mut samples: Vec<_> = sample_metrics.iter().collect();
        let mut rng = thread_rng();
        let mut epoch_losses = Vec::with_capacity(options.epochs);

        for epoch in 0..options.epochs {
            samples.shuffle(&mut rng);

            let total_loss: f32 = samples
                .chunks(batch_size)
                .map(|batch| self.train_batch(batch, options.learning_rate))
                .sum();

            let epoch_loss = total_loss / num_samples as f32;
            debug!("Epoch: {}, Loss: {:.4}", epoch + 1, epoch_loss);
            epoch_losses.push(epoch_loss);
        }

        Ok(TrainHistory {
            epoch_losses,
            num_samples,
        })
    }
}

impl Checkpoint for LinearModel {
    fn save_checkpoint(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;

        let file = File::create(path)
            .with_context(|| format!("Failed to create checkpoint {:?}", path))?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer(&mut encoder, self)?;
        encoder.finish()?.flush()?;

        info!("Saved checkpoint: {:?}", path);

        Ok(())
    }

    fn load_checkpoint(&mut self, path: &Path) -> Result<()> {
        let file =
            File::open(path).with_context(|| format!("Failed to open checkpoint {:?}", path))?;
        let decoder = GzDecoder::new(BufReader::new(file));
        let loaded: LinearModel = serde_json::from_reader(decoder)
            .with_context(|| format!("Failed to read checkpoint {:?}", path))?;

        if loaded.board_size != self.board_size {
            return Err(anyhow!(
                "Checkpoint {:?} is for board size {}, expected {}",
                path,
                loaded.board_size,
                self.board_size
            ));
        }

        loaded
            .check_shapes()
            .with_context(|| format!("Checkpoint {:?} is malformed", path))?;

        *self = loaded;

        info!("Loaded checkpoint: {:?}", path);

        Ok(())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn apply_gradient(params: &mut [f32], grads: &[f32], step: f32) {
    for (p, g) in params.iter_mut().zip(grads) {
        *p -= step * g;
    }
}
