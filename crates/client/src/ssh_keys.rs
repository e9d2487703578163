//! SSH key operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{CreateSshKeyRequest, SshKey, SshKeyMaterial};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/ssh` endpoints.
pub struct SshKeysClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl SshKeysClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's keys (public parts only).
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<SshKey>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/ssh"))
            .await
    }

    /// Fetches one key.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<SshKey, ApiError> {
        let path = format!("/api/v1/ssh/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Asks the server to generate a new key pair.
    ///
    /// # Errors
    ///
    /// Returns the server's error when generation is rejected.
    pub async fn create(&self, request: &CreateSshKeyRequest) -> Result<SshKey, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/ssh", request))
            .await
    }

    /// Deletes a key.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/ssh/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }

    /// Downloads key material, private PEM included when the server
    /// allows it.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the download is rejected.
    pub async fn download(&self, id: Uuid) -> Result<SshKeyMaterial, ApiError> {
        let path = format!("/api/v1/ssh/{id}/download");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }
}

impl std::fmt::Debug for SshKeysClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshKeysClient").finish_non_exhaustive()
    }
}
