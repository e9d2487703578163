//! Taint operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{CreateTaintRequest, Taint, UpdateTaintRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/taints` endpoints.
pub struct TaintsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl TaintsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's taints.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<Taint>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/taints"))
            .await
    }

    /// Fetches one taint.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Taint, ApiError> {
        let path = format!("/api/v1/taints/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates a taint.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateTaintRequest) -> Result<Taint, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/taints", request))
            .await
    }

    /// Updates a taint; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(&self, id: Uuid, request: &UpdateTaintRequest) -> Result<Taint, ApiError> {
        let path = format!("/api/v1/taints/{id}");
        self.executor
            .execute(|| self.api.patch_json(&path, request))
            .await
    }

    /// Deletes a taint.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/taints/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for TaintsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaintsClient").finish_non_exhaustive()
    }
}
