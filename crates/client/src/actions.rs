//! Admin action catalog operations.
//!
//! Actions are platform-wide definitions; running one against a
//! cluster goes through [`ClustersClient::run_action`].
//!
//! [`ClustersClient::run_action`]: crate::ClustersClient::run_action

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{Action, CreateActionRequest, UpdateActionRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/admin/actions` endpoints. Requires a
/// platform-admin session.
pub struct ActionsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl ActionsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists all actions.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 403 for non-admin sessions.
    pub async fn list(&self) -> Result<Vec<Action>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/admin/actions"))
            .await
    }

    /// Fetches one action.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Action, ApiError> {
        let path = format!("/api/v1/admin/actions/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates an action.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateActionRequest) -> Result<Action, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/admin/actions", request))
            .await
    }

    /// Updates an action; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(&self, id: Uuid, request: &UpdateActionRequest) -> Result<Action, ApiError> {
        let path = format!("/api/v1/admin/actions/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Deletes an action. Past runs keep their recorded target.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/admin/actions/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for ActionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionsClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use autoglue_domain::UpdateActionRequest;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_update_request_omits_unset_fields() {
        let request = UpdateActionRequest {
            label: Some("Upgrade".to_string()),
            ..UpdateActionRequest::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            "{\"label\":\"Upgrade\"}"
        );
    }
}
