//! Label operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{CreateLabelRequest, Label, UpdateLabelRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/labels` endpoints.
pub struct LabelsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl LabelsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's labels.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<Label>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/labels"))
            .await
    }

    /// Fetches one label.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Label, ApiError> {
        let path = format!("/api/v1/labels/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates a label.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateLabelRequest) -> Result<Label, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/labels", request))
            .await
    }

    /// Updates a label; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(&self, id: Uuid, request: &UpdateLabelRequest) -> Result<Label, ApiError> {
        let path = format!("/api/v1/labels/{id}");
        self.executor
            .execute(|| self.api.patch_json(&path, request))
            .await
    }

    /// Deletes a label.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/labels/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for LabelsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelsClient").finish_non_exhaustive()
    }
}
