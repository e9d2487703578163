//! Annotation operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{Annotation, CreateAnnotationRequest, UpdateAnnotationRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/annotations` endpoints.
pub struct AnnotationsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl AnnotationsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's annotations.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<Annotation>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/annotations"))
            .await
    }

    /// Fetches one annotation.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Annotation, ApiError> {
        let path = format!("/api/v1/annotations/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates an annotation.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateAnnotationRequest) -> Result<Annotation, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/annotations", request))
            .await
    }

    /// Updates an annotation; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateAnnotationRequest,
    ) -> Result<Annotation, ApiError> {
        let path = format!("/api/v1/annotations/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Deletes an annotation.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/annotations/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for AnnotationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationsClient").finish_non_exhaustive()
    }
}
