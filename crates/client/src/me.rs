//! Profile and personal API-key operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{ApiKey, CreateApiKeyRequest, UpdateProfileRequest, UserProfile};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/me` endpoints.
pub struct MeClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl MeClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Returns the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the session is invalid.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/me"))
            .await
    }

    /// Updates the profile; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        self.executor
            .execute(|| self.api.patch_json("/api/v1/me", request))
            .await
    }

    /// Lists personal API keys; `plain` is never present here.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn api_keys(&self) -> Result<Vec<ApiKey>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/me/api-keys"))
            .await
    }

    /// Creates a personal API key. The returned key carries `plain`, the
    /// only time the full material is visible.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create_api_key(&self, request: &CreateApiKeyRequest) -> Result<ApiKey, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/me/api-keys", request))
            .await
    }

    /// Revokes a personal API key.
    ///
    /// # Errors
    ///
    /// Returns the server's error when revocation is rejected.
    pub async fn delete_api_key(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/me/api-keys/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for MeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeClient").finish_non_exhaustive()
    }
}
