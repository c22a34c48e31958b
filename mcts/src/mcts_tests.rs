use super::counting_game::{Add, CountingAnalyzer, CountingGameEngine};
use super::*;
use assert_approx_eq::assert_approx_eq;
use engine::GameEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn root_visits<G: GameAdapter>(tree: &SearchTree<G>, root: &G::State) -> usize {
    tree.node_edges(root)
        .map_or(0, |edges| edges.iter().map(|e| e.visits()).sum())
}

#[test]
fn test_visit_count_is_zero_before_search() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);

    assert_eq!(tree.visit_count(&root, &Add(1)), 0);
    assert_eq!(tree.visit_count(&root, &Add(2)), 0);
    assert_eq!(tree.num_expanded(), 0);
}

#[test]
fn test_visit_counts_never_decrease() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.1);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    let mut previous = (0, 0);

    for _ in 0..30 {
        tree.simulate(&root).unwrap();

        let current = (
            tree.visit_count(&root, &Add(1)),
            tree.visit_count(&root, &Add(2)),
        );
        assert!(current.0 >= previous.0);
        assert!(current.1 >= previous.1);
        previous = current;
    }
}

#[test]
fn test_each_simulation_adds_one_root_visit() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, -0.2);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);

    for k in 1..=25 {
        tree.simulate(&root).unwrap();
        assert_eq!(root_visits(&tree, &root), k);
    }
}

#[test]
fn test_values_alternate_sign_between_plies() {
    let engine = CountingGameEngine::new(2, 1);
    let analyzer = CountingAnalyzer::new(1, 0.5);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    let child = CountingGameEngine::state(1);

    tree.simulate(&root).unwrap();
    tree.simulate(&root).unwrap();

    let root_edge = &tree.node_edges(&root).unwrap()[0];
    let child_edge = &tree.node_edges(&child).unwrap()[0];

    // Bringing the count to 2 wins, so the child's mover is winning and the root's mover losing.
    assert_approx_eq!(child_edge.value_total(), 1.0);
    assert_approx_eq!(root_edge.value_total(), -1.5);
    assert!(root_edge.avg_value() < 0.0);
    assert!(child_edge.avg_value() > 0.0);
}

#[test]
fn test_pass_keeps_value_sign() {
    let engine = CountingGameEngine::new(2, 1).with_pass_at(1);
    let analyzer = CountingAnalyzer::new(1, 0.5);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    let child = CountingGameEngine::state(1);

    tree.simulate(&root).unwrap();
    tree.simulate(&root).unwrap();

    assert_approx_eq!(tree.node_edges(&child).unwrap()[0].value_total(), 1.0);
    assert_approx_eq!(tree.node_edges(&root).unwrap()[0].value_total(), 1.5);
}

#[test]
fn test_transposed_state_is_evaluated_once() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    // Expands 1 and then 2 through 1 -> 2.
    tree.simulate(&CountingGameEngine::state(1)).unwrap();
    // Expands 0 and then 3 through 0 -> 1 -> 3.
    tree.simulate(&CountingGameEngine::state(0)).unwrap();
    // Reaches 2 through 0 -> 2 and 3 through 2 -> 3, then expands 4.
    tree.simulate(&CountingGameEngine::state(0)).unwrap();

    assert_eq!(tree.visit_count(&CountingGameEngine::state(0), &Add(2)), 1);
    assert_eq!(tree.visit_count(&CountingGameEngine::state(1), &Add(2)), 1);
    assert_eq!(tree.visit_count(&CountingGameEngine::state(2), &Add(1)), 1);
    assert_eq!(analyzer.calls(), 5);
    assert_eq!(tree.num_expanded(), 5);
    assert_eq!(tree.evaluator_calls(), 5);
}

#[test]
fn test_cache_carries_over_to_next_tree() {
    let engine = CountingGameEngine::new(6, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);

    let root = CountingGameEngine::state(0);
    let mut tree = SearchTree::new(&adapter, 1.0);
    for _ in 0..20 {
        tree.simulate(&root).unwrap();
    }
    let calls = analyzer.calls();

    let mut next_tree = SearchTree::with_cache(&adapter, 1.0, tree.into_cache());
    next_tree.simulate(&root).unwrap();

    assert_eq!(analyzer.calls(), calls);
    assert_eq!(root_visits(&next_tree, &root), 1);
}

#[test]
fn test_evaluator_error_propagates() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::failing(2);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let result = tree.simulate(&CountingGameEngine::state(0));

    assert_eq!(result.unwrap_err().to_string(), "Evaluator unavailable");
    assert_eq!(tree.num_expanded(), 0);
}

#[test]
fn test_zero_temperature_policy_is_one_hot() {
    let engine = CountingGameEngine::new(10, 3);
    let analyzer = CountingAnalyzer::new(3, 0.3);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    for _ in 0..40 {
        tree.simulate(&root).unwrap();
    }

    let policy = tree.derive_policy(&root, 0.0).unwrap();

    assert_eq!(policy.len(), 3);
    assert_eq!(policy.iter().filter(|p| **p == 1.0).count(), 1);
    assert_eq!(policy.iter().filter(|p| **p == 0.0).count(), 2);

    let chosen = policy.iter().position(|p| *p == 1.0).unwrap();
    let chosen_visits = tree.visit_count(&root, &Add(chosen as u32 + 1));
    for step in 1..=3 {
        assert!(tree.visit_count(&root, &Add(step)) <= chosen_visits);
    }
}

#[test]
fn test_zero_temperature_breaks_ties_among_most_visited() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    tree.simulate(&root).unwrap();
    tree.simulate(&root).unwrap();
    assert_eq!(tree.visit_count(&root, &Add(1)), 1);
    assert_eq!(tree.visit_count(&root, &Add(2)), 1);

    let mut rng = StdRng::seed_from_u64(7);
    let mut chosen = [0; 2];
    for _ in 0..64 {
        let policy = tree.derive_policy_with_rng(&root, 0.0, &mut rng).unwrap();
        chosen[policy.iter().position(|p| *p == 1.0).unwrap()] += 1;
    }

    assert!(chosen[0] > 0);
    assert!(chosen[1] > 0);
}

#[test]
fn test_positive_temperature_policy_sums_to_one() {
    let engine = CountingGameEngine::new(10, 3);
    let analyzer = CountingAnalyzer::new(3, 0.3);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    for _ in 0..40 {
        tree.simulate(&root).unwrap();
    }

    for temperature in [0.1, 0.5, 1.0, 2.0] {
        let policy = tree.derive_policy(&root, temperature).unwrap();
        assert_approx_eq!(policy.iter().sum::<f32>(), 1.0, 1e-5);
    }

    let policy = tree.derive_policy(&root, 1.0).unwrap();
    for step in 1..=3 {
        let expected = tree.visit_count(&root, &Add(step)) as f32 / 40.0;
        assert_approx_eq!(policy[step as usize - 1], expected, 1e-5);
    }
}

#[test]
fn test_policy_only_covers_legal_actions() {
    // Only Add(1) is legal in a one step game, the action space is one wide.
    let engine = CountingGameEngine::new(5, 1);
    let analyzer = CountingAnalyzer::new(1, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    tree.simulate(&root).unwrap();

    assert_eq!(tree.derive_policy(&root, 1.0).unwrap(), vec![1.0]);
}

#[test]
fn test_policy_of_terminal_state_fails() {
    let engine = CountingGameEngine::new(3, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let terminal = CountingGameEngine::state(3);
    tree.simulate(&terminal).unwrap();

    let error = tree.derive_policy(&terminal, 1.0).unwrap_err();

    assert_eq!(
        error.downcast_ref::<SearchError>(),
        Some(&SearchError::TerminalState)
    );
    assert_eq!(analyzer.calls(), 0);
}

#[test]
fn test_policy_before_search_fails() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let tree = SearchTree::new(&adapter, 1.0);

    let error = tree
        .derive_policy(&CountingGameEngine::state(0), 0.0)
        .unwrap_err();

    assert_eq!(
        error.downcast_ref::<SearchError>(),
        Some(&SearchError::NoVisits)
    );
}

#[test]
fn test_negative_temperature_is_rejected() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    tree.simulate(&root).unwrap();

    let error = tree.derive_policy(&root, -1.0).unwrap_err();

    assert_eq!(
        error.downcast_ref::<SearchError>(),
        Some(&SearchError::InvalidTemperature(-1.0))
    );
}

#[test]
fn test_node_details_lists_best_first() {
    let engine = CountingGameEngine::new(10, 2);
    let analyzer = CountingAnalyzer::new(2, 0.0);
    let adapter = EngineAdapter::new(&engine, &analyzer);
    let mut tree = SearchTree::new(&adapter, 1.0);

    let root = CountingGameEngine::state(0);
    assert!(tree.node_details(&root).is_none());

    for _ in 0..10 {
        tree.simulate(&root).unwrap();
    }

    let details = tree.node_details(&root).unwrap();

    assert_eq!(details.visits, 11);
    assert_eq!(details.children.len(), 2);
    assert!(details.children[0].1.PUCT >= details.children[1].1.PUCT);
}

#[test]
fn test_illegal_action_is_an_engine_error() {
    let engine = CountingGameEngine::new(10, 2);

    let error = engine
        .take_action(&CountingGameEngine::state(0), &Add(3))
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<engine::EngineError>(),
        Some(engine::EngineError::IllegalAction(_))
    ));
}
