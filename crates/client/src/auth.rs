//! Authentication operations.

use std::sync::Arc;

use autoglue_application::{AuthExecutor, OrgContext, TokenStore};
use autoglue_domain::{
    ForgotPasswordRequest, LoginRequest, LogoutRequest, RegisterRequest, ResendVerificationRequest,
    ResetPasswordRequest, SessionProfile, TokenPair,
};
use autoglue_infrastructure::{ApiClient, ApiError};

/// Client for the `/api/v1/auth` endpoints.
///
/// Login and logout also drive the session stores, so after a
/// successful [`AuthClient::login`] every other client is authenticated.
pub struct AuthClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
    tokens: Arc<TokenStore>,
    org: Arc<OrgContext>,
}

impl AuthClient {
    pub(crate) fn new(
        api: Arc<ApiClient>,
        executor: Arc<AuthExecutor>,
        tokens: Arc<TokenStore>,
        org: Arc<OrgContext>,
    ) -> Self {
        Self {
            api,
            executor,
            tokens,
            org,
        }
    }

    /// Exchanges credentials for a token pair and stores it.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let pair: TokenPair = self
            .api
            .post_json_public(
                "/api/v1/auth/login",
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;

        if let Err(error) = self.tokens.set(Some(pair.clone())) {
            tracing::warn!(%error, "login succeeded but the pair was not persisted");
        }
        Ok(pair)
    }

    /// Creates an account. The caller still logs in afterwards.
    ///
    /// # Errors
    ///
    /// Returns the server's error when registration is rejected.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.api
            .post_empty_public(
                "/api/v1/auth/register",
                &RegisterRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await
    }

    /// Revokes the refresh token server-side, then clears the local
    /// session. The local session is cleared even when revocation
    /// fails; the active-organization selection is kept for the next
    /// login.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.tokens.refresh_token() {
            let request = LogoutRequest { refresh_token };
            let outcome = self
                .executor
                .execute(|| self.api.post_empty("/api/v1/auth/logout", &request))
                .await;
            if let Err(error) = outcome {
                tracing::debug!(%error, "server-side logout failed, clearing locally anyway");
            }
        }
        if let Err(error) = self.tokens.logout() {
            tracing::warn!(%error, "failed to clear the persisted session");
        }
    }

    /// Returns the session's identity summary.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 401 when the session is
    /// not authenticated.
    pub async fn me(&self) -> Result<SessionProfile, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/auth/me"))
            .await
    }

    /// Confirms an account with the token from the verification email.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the token is invalid or spent.
    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("token", token)
            .finish();
        self.api
            .get_empty_public(&format!("/api/v1/auth/verify?{query}"))
            .await
    }

    /// Requests a fresh verification email.
    ///
    /// # Errors
    ///
    /// Returns the server's error; an unknown email is not an error.
    pub async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .post_empty_public(
                "/api/v1/auth/verify/resend",
                &ResendVerificationRequest {
                    email: email.to_string(),
                },
            )
            .await
    }

    /// Requests a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns the server's error; an unknown email is not an error.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .post_empty_public(
                "/api/v1/auth/password/forgot",
                &ForgotPasswordRequest {
                    email: email.to_string(),
                },
            )
            .await
    }

    /// Completes a password reset with the emailed token.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the token is invalid or spent.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        self.api
            .post_empty_public(
                "/api/v1/auth/password/reset",
                &ResetPasswordRequest {
                    token: token.to_string(),
                    new_password: new_password.to_string(),
                },
            )
            .await
    }

    /// Whether a token pair is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authed()
    }

    /// The active-organization context backing this session.
    #[must_use]
    pub fn org(&self) -> &Arc<OrgContext> {
        &self.org
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verify_token_is_percent_encoded() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("token", "abc+/=")
            .finish();
        assert_eq!(query, "token=abc%2B%2F%3D");
    }
}
