use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("State is terminal and has no policy")]
    TerminalState,
    #[error("State has not been visited")]
    NoVisits,
    #[error("Non-terminal state has no legal actions")]
    NoLegalActions,
    #[error("Temperature must be a non-negative number, got {0}")]
    InvalidTemperature(f32),
}
