use anyhow::Result;
use common::Config;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelfPlayOptions {
    /// Simulations per move.
    pub visits: usize,
    pub cpuct: f32,
    pub temperature: f32,
    /// Drawn games label every position 0 instead of -1.
    pub label_draws_as_zero: bool,
}

impl Default for SelfPlayOptions {
    fn default() -> Self {
        Self {
            visits: 25,
            cpuct: 1.0,
            temperature: 1.0,
            label_draws_as_zero: false,
        }
    }
}

impl Config for SelfPlayOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            visits: config
                .get("visits")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.visits),
            cpuct: config
                .get("cpuct")
                .and_then(|v| v.as_f32())
                .unwrap_or(defaults.cpuct),
            temperature: config
                .get("temperature")
                .and_then(|v| v.as_f32())
                .unwrap_or(defaults.temperature),
            label_draws_as_zero: config
                .get("label_draws_as_zero")
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.label_draws_as_zero),
        })
    }
}
