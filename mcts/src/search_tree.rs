use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use common::StateKey;
use engine::Turn;
use log::trace;
use rand::{thread_rng, Rng};

use super::adapter::GameAdapter;
use super::cache::PredictionCache;
use super::edge::MCTSEdge;
use super::error::SearchError;
use super::node::MCTSNode;
use super::node_details::NodeDetails;

/// Visit statistics and cached predictions for the states reached from one or more roots.
///
/// A tree serves a single move decision. The prediction cache may outlive it through
/// [`SearchTree::into_cache`] and be handed to the next tree of the same game.
pub struct SearchTree<'a, G: GameAdapter> {
    adapter: &'a G,
    cpuct: f32,
    nodes: HashMap<StateKey, MCTSNode<G::Action>>,
    cache: PredictionCache,
}

impl<'a, G: GameAdapter> SearchTree<'a, G> {
    pub fn new(adapter: &'a G, cpuct: f32) -> Self {
        Self::with_cache(adapter, cpuct, PredictionCache::new())
    }

    pub fn with_cache(adapter: &'a G, cpuct: f32, cache: PredictionCache) -> Self {
        Self {
            adapter,
            cpuct,
            nodes: HashMap::new(),
            cache,
        }
    }

    pub fn into_cache(self) -> PredictionCache {
        self.cache
    }

    /// Runs one selection, expansion and backpropagation pass from `root_state`.
    ///
    /// An unexpanded root is expanded in passing so that every pass adds exactly one visit to
    /// one of the root's edges.
    pub fn simulate(&mut self, root_state: &G::State) -> Result<()> {
        let mut path: Vec<(StateKey, usize, Turn)> = Vec::new();
        let mut game_state = root_state.clone();

        let value = loop {
            if self.adapter.is_terminal(&game_state) {
                break self.adapter.reward(&game_state)?;
            }

            let key = StateKey::of(&game_state);

            if !self.nodes.contains_key(&key) {
                let value = self.expand(key, &game_state)?;
                if !path.is_empty() {
                    break value;
                }
            }

            let node = &self.nodes[&key];
            let edge_index = node
                .select_path(self.cpuct)
                .ok_or(SearchError::NoLegalActions)?;
            let transition = self
                .adapter
                .apply(&game_state, node.edge(edge_index).action())?;

            path.push((key, edge_index, transition.turn));
            game_state = transition.state;
        };

        trace!("Simulation depth: {}, value: {}", path.len(), value);

        self.backpropagate(path, value);

        Ok(())
    }

    /// Visits of an edge. Unknown states and actions have none.
    pub fn visit_count(&self, game_state: &G::State, action: &G::Action) -> usize {
        self.nodes
            .get(&StateKey::of(game_state))
            .and_then(|node| node.get_child_of_action(action))
            .map_or(0, |edge| edge.visits())
    }

    /// Policy over the full action space derived from the visit counts of `game_state`.
    pub fn derive_policy(&self, game_state: &G::State, temperature: f32) -> Result<Vec<f32>> {
        self.derive_policy_with_rng(game_state, temperature, &mut thread_rng())
    }

    /// As [`SearchTree::derive_policy`]. `rng` breaks ties between the most visited actions at
    /// temperature 0.
    pub fn derive_policy_with_rng<R: Rng + ?Sized>(
        &self,
        game_state: &G::State,
        temperature: f32,
        rng: &mut R,
    ) -> Result<Vec<f32>> {
        if !(temperature >= 0.0) {
            return Err(SearchError::InvalidTemperature(temperature).into());
        }

        if self.adapter.is_terminal(game_state) {
            return Err(SearchError::TerminalState.into());
        }

        let node = self
            .nodes
            .get(&StateKey::of(game_state))
            .ok_or(SearchError::NoVisits)?;

        let edges = node.edges();
        if edges.is_empty() {
            return Err(SearchError::TerminalState.into());
        }

        let max_visits = edges.iter().map(|e| e.visits()).max().unwrap_or(0);
        if max_visits == 0 {
            return Err(SearchError::NoVisits.into());
        }

        let mut policy = vec![0.0; self.adapter.action_space_size()];

        if temperature == 0.0 {
            let most_visited: Vec<_> = edges
                .iter()
                .filter(|e| e.visits() == max_visits)
                .collect();
            let chosen = most_visited[rng.gen_range(0..most_visited.len())];
            policy[self.adapter.action_index(chosen.action())] = 1.0;
            return Ok(policy);
        }

        // Scaling by the max keeps powf in range for small temperatures.
        let exponent = 1.0 / temperature;
        let weights: Vec<f32> = edges
            .iter()
            .map(|e| (e.visits() as f32 / max_visits as f32).powf(exponent))
            .collect();
        let total: f32 = weights.iter().sum();

        for (edge, weight) in edges.iter().zip(weights) {
            policy[self.adapter.action_index(edge.action())] = weight / total;
        }

        Ok(policy)
    }

    /// Number of times the evaluator has been consulted through this tree's cache.
    pub fn evaluator_calls(&self) -> usize {
        self.cache.misses()
    }

    pub fn num_expanded(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_edges(&self, game_state: &G::State) -> Option<&[MCTSEdge<G::Action>]> {
        self.nodes
            .get(&StateKey::of(game_state))
            .map(|node| node.edges())
    }

    /// Edges of an expanded state with their PUCT terms, best first.
    pub fn node_details(&self, game_state: &G::State) -> Option<NodeDetails<G::Action>> {
        let node = self.nodes.get(&StateKey::of(game_state))?;

        let mut children: Vec<_> = node
            .edges()
            .iter()
            .zip(node.get_PUCT_for_edges(self.cpuct))
            .map(|(edge, puct)| (edge.action().clone(), puct))
            .collect();

        children.sort_by(|(_, x_puct), (_, y_puct)| {
            y_puct
                .PUCT
                .partial_cmp(&x_puct.PUCT)
                .unwrap_or(Ordering::Equal)
        });

        Some(NodeDetails {
            visits: node.visits(),
            children,
        })
    }

    fn expand(&mut self, key: StateKey, game_state: &G::State) -> Result<f32> {
        let adapter = self.adapter;
        let actions = adapter.legal_actions(game_state);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions.into());
        }

        let analysis = self
            .cache
            .get_or_try_insert_with(key, || adapter.priors_and_value(game_state))?;

        let edges = actions
            .into_iter()
            .map(|action| {
                let policy_score = analysis.policy_score(adapter.action_index(&action));
                MCTSEdge::new(action, policy_score)
            })
            .collect();
        let value = analysis.value_score;

        self.nodes.insert(key, MCTSNode::new(edges));

        Ok(value)
    }

    /// Walks the path leaf first, converting the value to the perspective of each edge's mover.
    fn backpropagate(&mut self, path: Vec<(StateKey, usize, Turn)>, mut value: f32) {
        for (key, edge_index, turn) in path.into_iter().rev() {
            value = turn.to_parent_perspective(value);

            if let Some(node) = self.nodes.get_mut(&key) {
                node.edge_mut(edge_index).record_visit(value);
            }
        }
    }
}
