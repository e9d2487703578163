//! Credential operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{CreateCredentialRequest, Credential, UpdateCredentialRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/credentials` endpoints. Secret material is
/// write-only: responses never include it.
pub struct CredentialsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl CredentialsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's credentials, secrets elided.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<Credential>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/credentials"))
            .await
    }

    /// Fetches one credential, secrets elided.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Credential, ApiError> {
        let path = format!("/api/v1/credentials/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Stores a credential.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateCredentialRequest) -> Result<Credential, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/credentials", request))
            .await
    }

    /// Updates a credential; providing `secret` rotates the material.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateCredentialRequest,
    ) -> Result<Credential, ApiError> {
        let path = format!("/api/v1/credentials/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Deletes a credential.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected, e.g. while
    /// resources still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/credentials/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for CredentialsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsClient").finish_non_exhaustive()
    }
}
