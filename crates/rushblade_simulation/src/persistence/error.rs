//! Error types raised by session stores.

use thiserror::Error;

/// Errors surfaced by `SessionStore` implementations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted session data: {0}")]
    Corrupted(String),

    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
