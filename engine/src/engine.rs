use anyhow::Result;

use super::transition::Transition;

/// The rules of a two player game, expressed over mover-relative states.
///
/// Every state produced by an engine is expressed from the perspective of the
/// player who is about to act. `take_action` reports through its `Turn`
/// whether the perspective changed.
pub trait GameEngine {
    type Action;
    type State;

    fn initial_state(&self) -> Self::State;

    fn is_terminal_state(&self, game_state: &Self::State) -> bool;

    /// Outcome of a terminal state for the player the state is relative to.
    /// +1 is a win, -1 a loss and 0 a draw. Errors with `EngineError::NotTerminal`
    /// when called on a state that is still in play.
    fn reward(&self, game_state: &Self::State) -> Result<f32>;

    /// Legal actions in canonical order, i.e. ascending `action_index`.
    fn legal_actions(&self, game_state: &Self::State) -> Vec<Self::Action>;

    fn take_action(
        &self,
        game_state: &Self::State,
        action: &Self::Action,
    ) -> Result<Transition<Self::State>>;

    fn action_index(&self, action: &Self::Action) -> usize;

    fn action_space_size(&self) -> usize;

    /// The legal action with the highest score, where `scores` is indexed by `action_index`.
    /// The first action in canonical order wins ties. `None` when no action is legal.
    fn most_probable_action(
        &self,
        game_state: &Self::State,
        scores: &[f32],
    ) -> Option<Self::Action> {
        let mut best_action = None;
        let mut best_score = f32::MIN;

        for action in self.legal_actions(game_state) {
            let score = scores
                .get(self.action_index(&action))
                .copied()
                .unwrap_or(0.0);

            if best_action.is_none() || score > best_score {
                best_score = score;
                best_action = Some(action);
            }
        }

        best_action
    }
}
