use anyhow::{anyhow, Result};
use engine::{EngineError, GameEngine, Transition, Turn};

use super::{Action, GameState, MOVER, OPPONENT};

/// Othello on a square board of even size.
pub struct Engine {
    board_size: usize,
}

impl Engine {
    pub fn new(board_size: usize) -> Result<Self> {
        if board_size < 4 || board_size % 2 != 0 {
            return Err(anyhow!(
                "Board size must be even and at least 4, got {}",
                board_size
            ));
        }

        Ok(Self { board_size })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }
}

impl GameEngine for Engine {
    type Action = Action;
    type State = GameState;

    fn initial_state(&self) -> Self::State {
        GameState::initial(self.board_size)
    }

    fn is_terminal_state(&self, game_state: &Self::State) -> bool {
        game_state.is_finished()
    }

    fn reward(&self, game_state: &Self::State) -> Result<f32> {
        if !game_state.is_finished() {
            return Err(EngineError::NotTerminal.into());
        }

        let mover = game_state.piece_count(MOVER);
        let opponent = game_state.piece_count(OPPONENT);

        Ok(match mover.cmp(&opponent) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Less => -1.0,
            std::cmp::Ordering::Equal => 0.0,
        })
    }

    fn legal_actions(&self, game_state: &Self::State) -> Vec<Self::Action> {
        game_state.valid_actions(MOVER)
    }

    /// The board is handed to the opponent when they can reply. Otherwise they pass and the
    /// mover keeps the board as is.
    fn take_action(
        &self,
        game_state: &Self::State,
        action: &Self::Action,
    ) -> Result<Transition<Self::State>> {
        let next_state = game_state
            .place(action)
            .ok_or_else(|| EngineError::IllegalAction(action.to_string()))?;

        if next_state.has_actions(OPPONENT) {
            Ok(Transition::new(next_state.inverted(), Turn::Opponent))
        } else {
            Ok(Transition::new(next_state, Turn::Same))
        }
    }

    fn action_index(&self, action: &Self::Action) -> usize {
        action.index(self.board_size)
    }

    fn action_space_size(&self) -> usize {
        self.board_size * self.board_size
    }
}
