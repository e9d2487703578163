//! Load-balancer operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{CreateLoadBalancerRequest, LoadBalancer, UpdateLoadBalancerRequest};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/load-balancers` endpoints.
pub struct LoadBalancersClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl LoadBalancersClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's load balancers.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<LoadBalancer>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/load-balancers"))
            .await
    }

    /// Fetches one load balancer.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<LoadBalancer, ApiError> {
        let path = format!("/api/v1/load-balancers/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Provisions a load balancer.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(
        &self,
        request: &CreateLoadBalancerRequest,
    ) -> Result<LoadBalancer, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/load-balancers", request))
            .await
    }

    /// Updates a load balancer; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateLoadBalancerRequest,
    ) -> Result<LoadBalancer, ApiError> {
        let path = format!("/api/v1/load-balancers/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Deprovisions a load balancer.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/load-balancers/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for LoadBalancersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadBalancersClient").finish_non_exhaustive()
    }
}
