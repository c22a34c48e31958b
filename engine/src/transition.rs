/// Who acts in the state that follows an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Control passed to the opponent. The next state has been re-expressed from their perspective.
    Opponent,
    /// The opponent has no legal action and passes. The same player moves again.
    Same,
}

impl Turn {
    /// Converts a value from the perspective of the next state's mover to the perspective of the
    /// player who took the action.
    pub fn to_parent_perspective(&self, value: f32) -> f32 {
        match self {
            Turn::Opponent => -value,
            Turn::Same => value,
        }
    }

    /// Seat of the player to move after the transition in a two seat game.
    pub fn next_seat(&self, seat: usize) -> usize {
        match self {
            Turn::Opponent => 1 - seat,
            Turn::Same => seat,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub turn: Turn,
}

impl<S> Transition<S> {
    pub fn new(state: S, turn: Turn) -> Self {
        Self { state, turn }
    }
}
