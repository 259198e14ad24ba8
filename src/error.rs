//! Error types for the simulator

use thiserror::Error;

/// Fatal errors surfaced by a simulation run. There is no partial-result
/// recovery: a failed run produces no output series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// The resolved configuration is invalid; the run never starts
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No wallet is active, so the dividend is undefined
    #[error("cannot compute the dividend: zero active population")]
    ZeroActivePopulation,
}

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, SimError>;
