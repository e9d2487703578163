//! Request and response payloads for the authentication endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name for the new account.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Payload for `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token being exchanged.
    pub refresh_token: String,
}

/// Payload for `POST /auth/logout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// The refresh token to revoke server-side.
    pub refresh_token: String,
}

/// Payload for `POST /auth/password/forgot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Account email address.
    pub email: String,
}

/// Payload for `POST /auth/verify/resend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerificationRequest {
    /// Account email address.
    pub email: String,
}

/// Payload for `POST /auth/password/reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// One-time reset token from the email link.
    pub token: String,
    /// Replacement password.
    pub new_password: String,
}

/// Response of `GET /auth/me`: the session's identity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    /// The authenticated user id.
    pub user_id: Uuid,
    /// Active organization, when the session is org-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    /// Role within the active organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_role: Option<String>,
}
