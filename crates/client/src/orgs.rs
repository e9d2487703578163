//! Organization operations.

use std::sync::Arc;

use autoglue_application::{AuthExecutor, OrgContext};
use autoglue_domain::{
    CreateOrganizationRequest, InviteMemberRequest, Member, Organization,
    UpdateOrganizationRequest,
};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/orgs` endpoints.
pub struct OrgsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
    org: Arc<OrgContext>,
}

impl OrgsClient {
    pub(crate) fn new(
        api: Arc<ApiClient>,
        executor: Arc<AuthExecutor>,
        org: Arc<OrgContext>,
    ) -> Self {
        Self { api, executor, org }
    }

    /// Lists the organizations the user belongs to.
    ///
    /// When no organization is selected yet, the first listed one is
    /// selected so org-scoped calls work right after login.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<Organization>, ApiError> {
        let orgs: Vec<Organization> = self
            .executor
            .execute(|| self.api.get_json("/api/v1/orgs"))
            .await?;

        if self.org.get().is_none()
            && let Some(first) = orgs.first()
            && let Err(error) = self.org.set(first.id.to_string())
        {
            tracing::warn!(%error, "default organization selection was not persisted");
        }
        Ok(orgs)
    }

    /// Fetches one organization.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Organization, ApiError> {
        let path = format!("/api/v1/orgs/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(
        &self,
        request: &CreateOrganizationRequest,
    ) -> Result<Organization, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/orgs", request))
            .await
    }

    /// Updates an organization; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateOrganizationRequest,
    ) -> Result<Organization, ApiError> {
        let path = format!("/api/v1/orgs/{id}");
        self.executor
            .execute(|| self.api.patch_json(&path, request))
            .await
    }

    /// Deletes an organization. A deleted active organization is also
    /// deselected locally.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/orgs/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await?;

        if self.org.get().as_deref() == Some(id.to_string().as_str())
            && let Err(error) = self.org.clear()
        {
            tracing::warn!(%error, "failed to clear the deleted organization selection");
        }
        Ok(())
    }

    /// Selects the active organization for subsequent org-scoped calls.
    ///
    /// # Errors
    ///
    /// Returns an error when the selection could not be persisted; it
    /// is still active in this process.
    pub fn select(&self, id: Uuid) -> Result<(), autoglue_application::StorageError> {
        self.org.set(id.to_string())
    }

    /// Lists an organization's members.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn members(&self, id: Uuid) -> Result<Vec<Member>, ApiError> {
        let path = format!("/api/v1/orgs/{id}/members");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Invites a user into an organization. Inviting an existing member
    /// updates their role instead.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the invite is rejected.
    pub async fn invite_member(
        &self,
        id: Uuid,
        request: &InviteMemberRequest,
    ) -> Result<Member, ApiError> {
        let path = format!("/api/v1/orgs/{id}/members");
        self.executor
            .execute(|| self.api.post_json(&path, request))
            .await
    }

    /// Removes a member from an organization.
    ///
    /// # Errors
    ///
    /// Returns the server's error when removal is rejected.
    pub async fn remove_member(&self, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/orgs/{id}/members/{user_id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for OrgsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrgsClient").finish_non_exhaustive()
    }
}
