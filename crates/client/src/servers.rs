//! Server operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{CreateServerRequest, Server, UpdateServerRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/servers` endpoints.
pub struct ServersClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl ServersClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's servers.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<Server>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/servers"))
            .await
    }

    /// Fetches one server.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Server, ApiError> {
        let path = format!("/api/v1/servers/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Registers a server.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateServerRequest) -> Result<Server, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/servers", request))
            .await
    }

    /// Updates a server; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateServerRequest,
    ) -> Result<Server, ApiError> {
        let path = format!("/api/v1/servers/{id}");
        self.executor
            .execute(|| self.api.patch_json(&path, request))
            .await
    }

    /// Deregisters a server.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/servers/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }

    /// Drops the recorded SSH host key so it is re-learned on the next
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the reset is rejected.
    pub async fn reset_hostkey(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/servers/{id}/reset-hostkey");
        self.executor
            .execute(|| {
                self.api
                    .post_empty(&path, &())
            })
            .await
    }
}

impl std::fmt::Debug for ServersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServersClient").finish_non_exhaustive()
    }
}
