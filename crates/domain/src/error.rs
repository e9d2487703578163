//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A token pair must carry both an access and a refresh token.
    #[error("invalid token pair: {0}")]
    InvalidTokenPair(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
