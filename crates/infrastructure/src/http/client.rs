//! Low-level authenticated API client.
//!
//! One request per call, no policy: the refresh-and-retry behavior
//! lives in the application layer's executor, which wraps these calls.

use std::sync::Arc;

use autoglue_application::{OrgContext, TokenStore};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ApiError;

const USER_AGENT: &str = concat!("AutoGlue/", env!("CARGO_PKG_VERSION"));

/// Reqwest-backed client that stamps every request with the session's
/// bearer token and active-organization header.
pub struct ApiClient {
    base_url: String,
    http: Client,
    tokens: Arc<TokenStore>,
    org: Arc<OrgContext>,
}

impl ApiClient {
    /// Creates a client against `base_url` (scheme and host, no
    /// trailing path).
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not a valid absolute URL or
    /// the underlying client cannot be constructed.
    pub fn new(
        base_url: &str,
        tokens: Arc<TokenStore>,
        org: Arc<OrgContext>,
    ) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|error| ApiError::Decode(format!("base url: {error}")))?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http,
            tokens,
            org,
        })
    }

    /// Returns the configured base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Some(token) = self.tokens.access_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(org_id) = self.org.get() {
            builder = builder.header("X-Org-ID", org_id);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|error| ApiError::Decode(error.to_string()))
    }

    async fn send_empty(builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await?;
            return Err(ApiError::from_status(status.as_u16(), &bytes));
        }
        Ok(())
    }

    /// GET `path`, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send_json(self.authed(Method::GET, path)).await
    }

    /// POST `body` as JSON to `path`, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send_json(self.authed(Method::POST, path).json(body)).await
    }

    /// POST `body` as JSON to `path`, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_empty<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        Self::send_empty(self.authed(Method::POST, path).json(body)).await
    }

    /// PATCH `body` as JSON to `path`, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn patch_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send_json(self.authed(Method::PATCH, path).json(body)).await
    }

    /// DELETE `path`, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        Self::send_empty(self.authed(Method::DELETE, path)).await
    }

    /// DELETE `path`, decoding the JSON response. Used by the detach
    /// endpoints that return the updated parent resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send_json(self.authed(Method::DELETE, path)).await
    }

    /// POST `body` as JSON to `path` without session headers, for the
    /// endpoints that establish a session in the first place.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn post_json_public<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send_json(self.http.post(self.endpoint(path)).json(body)).await
    }

    /// POST `body` as JSON to `path` without session headers, ignoring
    /// the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_empty_public<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        Self::send_empty(self.http.post(self.endpoint(path)).json(body)).await
    }

    /// GET `path` without session headers, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn get_json_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send_json(self.http.get(self.endpoint(path))).await
    }

    /// GET `path` without session headers, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get_empty_public(&self, path: &str) -> Result<(), ApiError> {
        Self::send_empty(self.http.get(self.endpoint(path))).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::adapters::SystemClock;
    use crate::storage::MemorySessionStorage;
    use pretty_assertions::assert_eq;

    fn client(base: &str) -> ApiClient {
        let storage = Arc::new(MemorySessionStorage::new());
        let tokens = Arc::new(TokenStore::new(
            Arc::clone(&storage) as Arc<_>,
            Arc::new(SystemClock::new()),
        ));
        let org = Arc::new(OrgContext::new(storage));
        ApiClient::new(base, tokens, org).unwrap()
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = client("https://glue.example.com/");
        assert_eq!(client.base_url(), "https://glue.example.com");
        assert_eq!(
            client.endpoint("/api/v1/servers"),
            "https://glue.example.com/api/v1/servers"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let storage = Arc::new(MemorySessionStorage::new());
        let tokens = Arc::new(TokenStore::new(
            Arc::clone(&storage) as Arc<_>,
            Arc::new(SystemClock::new()),
        ));
        let org = Arc::new(OrgContext::new(storage));
        assert!(ApiClient::new("not a url", tokens, org).is_err());
    }
}
