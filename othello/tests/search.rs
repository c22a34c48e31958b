use engine::{GameEngine, Turn};
use mcts::{EngineAdapter, SearchTree};
use model::GameAnalyzer;
use othello::{Engine, LinearModel};

#[test]
fn test_greedy_game_on_small_board_finishes() {
    let engine = Engine::new(4).unwrap();
    let model = LinearModel::new(4);
    let mut state = engine.initial_state();
    let mut moves = 0;

    while !engine.is_terminal_state(&state) {
        let analysis = model.get_state_analysis(&state).unwrap();
        let action = engine
            .most_probable_action(&state, &analysis.policy_scores)
            .unwrap();
        state = engine.take_action(&state, &action).unwrap().state;
        moves += 1;
        assert!(moves <= 12);
    }

    let reward = engine.reward(&state).unwrap();
    assert!(reward == 1.0 || reward == -1.0 || reward == 0.0);
}

#[test]
fn test_search_policy_covers_only_legal_moves() {
    let engine = Engine::new(4).unwrap();
    let model = LinearModel::zeros(4);
    let adapter = EngineAdapter::new(&engine, &model);
    let mut tree = SearchTree::new(&adapter, 1.0);
    let root = engine.initial_state();

    for _ in 0..50 {
        tree.simulate(&root).unwrap();
    }

    let legal: Vec<_> = engine
        .legal_actions(&root)
        .iter()
        .map(|a| engine.action_index(a))
        .collect();
    let visits: usize = engine
        .legal_actions(&root)
        .iter()
        .map(|a| tree.visit_count(&root, a))
        .sum();
    let policy = tree.derive_policy(&root, 1.0).unwrap();

    assert_eq!(visits, 50);
    assert_eq!(policy.len(), 16);
    assert!((policy.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    for (index, p) in policy.iter().enumerate() {
        if !legal.contains(&index) {
            assert_eq!(*p, 0.0);
        }
    }
}

#[test]
fn test_first_move_hands_turn_to_opponent() {
    let engine = Engine::new(6).unwrap();
    let state = engine.initial_state();
    let action = engine.legal_actions(&state)[0];

    let transition = engine.take_action(&state, &action).unwrap();

    assert_eq!(transition.turn, Turn::Opponent);
    assert_eq!(transition.state.piece_count(othello::OPPONENT), 4);
    assert_eq!(transition.state.piece_count(othello::MOVER), 1);
}
