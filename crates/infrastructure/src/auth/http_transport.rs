//! HTTP implementation of the refresh-exchange port.

use async_trait::async_trait;
use autoglue_application::{AuthTransport, TransportError};
use autoglue_domain::{RefreshRequest, TokenPair};
use reqwest::Client;
use url::Url;

/// Performs the refresh exchange against `POST /api/v1/auth/refresh`.
///
/// Deliberately separate from the session-header-stamping client: the
/// exchange authenticates with the refresh token in the body, never
/// with the (possibly expired) access token.
pub struct HttpAuthTransport {
    base_url: String,
    http: Client,
}

impl HttpAuthTransport {
    /// Creates a transport against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not a valid absolute URL or
    /// the underlying client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url)
            .map_err(|error| TransportError::Network(format!("base url: {error}")))?;
        let http = Client::builder()
            .user_agent(concat!("AutoGlue/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl AuthTransport for HttpAuthTransport {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TransportError> {
        let response = self
            .http
            .post(format!("{}/api/v1/auth/refresh", self.base_url))
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).trim().to_string(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|error| TransportError::Decode(error.to_string()))
    }
}

impl std::fmt::Debug for HttpAuthTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuthTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpAuthTransport::new("no scheme").is_err());
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let transport = HttpAuthTransport::new("https://glue.example.com/").unwrap();
        assert_eq!(transport.base_url, "https://glue.example.com");
    }
}
