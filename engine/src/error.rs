use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Action {0} is not legal in the current state")]
    IllegalAction(String),

    #[error("Reward requested for a state that is not terminal")]
    NotTerminal,
}
