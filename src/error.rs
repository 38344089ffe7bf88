//! Error types
//!
//! Generation failures are fatal and kept apart from configuration mistakes so
//! callers can report them distinctly.

use thiserror::Error;

/// Errors raised while carving a maze.
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("maze dimensions must be non-zero (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },
    /// The requested size/bias cannot reliably connect start to exit.
    #[error(
        "no connected {width}x{height} maze after {attempts} attempts (turn bias {turn_bias})"
    )]
    AttemptsExhausted {
        width: usize,
        height: usize,
        turn_bias: f32,
        attempts: u32,
    },
}

/// Errors raised when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that prevent the engine from starting.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("maze generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl EngineError {
    /// Whether this is the unrecoverable generation failure
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            EngineError::Generation(GenerationError::AttemptsExhausted { .. })
        )
    }
}
