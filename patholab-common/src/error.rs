//! Common error types for the patholab client

use thiserror::Error;

/// Common result type for patholab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the patholab crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A retrieval against the backend failed; carries the message shown to the user
    #[error("{0}")]
    Retrieval(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
