//! Network port for the token-refresh exchange.

use async_trait::async_trait;
use autoglue_domain::TokenPair;
use thiserror::Error;

/// Errors from the refresh exchange.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint answered with a non-success status.
    #[error("refresh endpoint returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided error text, possibly empty.
        message: String,
    },

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not parse as a token pair.
    #[error("malformed refresh response: {0}")]
    Decode(String),
}

/// Port for the network exchange that trades a refresh token for a new
/// token pair. The [`crate::RefreshCoordinator`] is its only caller.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// Exchanges `refresh_token` for a fresh pair.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx response or a body
    /// that does not deserialize into a [`TokenPair`].
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TransportError>;
}
