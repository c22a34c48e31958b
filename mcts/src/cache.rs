use std::collections::hash_map::Entry;
use std::collections::HashMap;

use anyhow::Result;
use common::StateKey;
use model::GameStateAnalysis;

/// Memoizes evaluator predictions by state. The first prediction stored for a key is kept.
#[derive(Default)]
pub struct PredictionCache {
    entries: HashMap<StateKey, GameStateAnalysis>,
    misses: usize,
}

impl PredictionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached prediction for `key`, calling `predict` only on a miss.
    /// A failed prediction is not cached.
    pub fn get_or_try_insert_with<F>(&mut self, key: StateKey, predict: F) -> Result<&GameStateAnalysis>
    where
        F: FnOnce() -> Result<GameStateAnalysis>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let analysis = predict()?;
                self.misses += 1;
                Ok(entry.insert(analysis))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times the evaluator was consulted.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_second_lookup_is_a_hit() {
        let mut cache = PredictionCache::new();
        let key = StateKey::of(&1u8);

        let first = cache
            .get_or_try_insert_with(key, || Ok(GameStateAnalysis::new(0.5, vec![1.0])))
            .unwrap()
            .clone();
        let second = cache
            .get_or_try_insert_with(key, || Ok(GameStateAnalysis::new(-0.5, vec![0.0])))
            .unwrap()
            .clone();

        assert_eq!(first, second);
        assert_eq!(second.value_score, 0.5);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_prediction_is_not_cached() {
        let mut cache = PredictionCache::new();
        let key = StateKey::of(&1u8);

        let result = cache.get_or_try_insert_with(key, || Err(anyhow!("evaluator down")));

        assert!(result.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }
}
