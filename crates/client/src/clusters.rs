//! Cluster operations: CRUD, attachment subresources and action runs.
//!
//! A cluster is assembled by attaching resources created elsewhere (a
//! captain domain, record set, load balancers, a bastion, node pools).
//! Every attach and detach call returns the updated cluster with its
//! expansions, so callers can refresh their view from the response.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{
    Cluster, ClusterRun, CreateClusterRequest, SetKubeconfigRequest, UpdateClusterRequest,
};
use autoglue_infrastructure::{ApiClient, ApiError};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct AttachDomain {
    domain_id: Uuid,
}

#[derive(Serialize)]
struct AttachRecordSet {
    record_set_id: Uuid,
}

#[derive(Serialize)]
struct AttachLoadBalancer {
    load_balancer_id: Uuid,
}

#[derive(Serialize)]
struct AttachBastion {
    server_id: Uuid,
}

#[derive(Serialize)]
struct AttachNodePool {
    node_pool_id: Uuid,
}

/// Client for the `/api/v1/clusters` endpoints.
pub struct ClustersClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl ClustersClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's clusters, optionally filtered by
    /// a name search.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Cluster>, ApiError> {
        let path = match search {
            Some(q) => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", q)
                    .finish();
                format!("/api/v1/clusters?{query}")
            }
            None => "/api/v1/clusters".to_string(),
        };
        self.executor.execute(|| self.api.get_json(&path)).await
    }

    /// Fetches one cluster with its attachment expansions.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates a cluster. Attachments are added afterwards.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateClusterRequest) -> Result<Cluster, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/clusters", request))
            .await
    }

    /// Updates a cluster; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateClusterRequest,
    ) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}");
        self.executor
            .execute(|| self.api.patch_json(&path, request))
            .await
    }

    /// Deletes a cluster. Attached resources are released, not deleted.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/clusters/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }

    /// Attaches the domain serving the captain endpoint.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the domain does not belong to
    /// the active organization.
    pub async fn attach_captain_domain(
        &self,
        id: Uuid,
        domain_id: Uuid,
    ) -> Result<Cluster, ApiError> {
        let body = AttachDomain { domain_id };
        let path = format!("/api/v1/clusters/{id}/captain-domain");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &body)
            })
            .await
    }

    /// Detaches the captain domain.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_captain_domain(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/captain-domain");
        self.executor
            .execute(|| {
                self.api
                    .delete_json(&path)
            })
            .await
    }

    /// Attaches the record set fronting the control plane.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the record set does not belong
    /// to the active organization.
    pub async fn attach_control_plane_record_set(
        &self,
        id: Uuid,
        record_set_id: Uuid,
    ) -> Result<Cluster, ApiError> {
        let body = AttachRecordSet { record_set_id };
        let path = format!("/api/v1/clusters/{id}/control-plane-record-set");
        self.executor
            .execute(|| {
                self.api.post_json(
                    &path,
                    &body,
                )
            })
            .await
    }

    /// Detaches the control-plane record set.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_control_plane_record_set(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/control-plane-record-set");
        self.executor
            .execute(|| {
                self.api
                    .delete_json(&path)
            })
            .await
    }

    /// Attaches the load balancer for workload traffic.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the load balancer does not
    /// belong to the active organization.
    pub async fn attach_apps_load_balancer(
        &self,
        id: Uuid,
        load_balancer_id: Uuid,
    ) -> Result<Cluster, ApiError> {
        let body = AttachLoadBalancer { load_balancer_id };
        let path = format!("/api/v1/clusters/{id}/apps-load-balancer");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &body)
            })
            .await
    }

    /// Detaches the workload-traffic load balancer.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_apps_load_balancer(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/apps-load-balancer");
        self.executor
            .execute(|| {
                self.api
                    .delete_json(&path)
            })
            .await
    }

    /// Attaches the load balancer for platform traffic.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the load balancer does not
    /// belong to the active organization.
    pub async fn attach_glueops_load_balancer(
        &self,
        id: Uuid,
        load_balancer_id: Uuid,
    ) -> Result<Cluster, ApiError> {
        let body = AttachLoadBalancer { load_balancer_id };
        let path = format!("/api/v1/clusters/{id}/glueops-load-balancer");
        self.executor
            .execute(|| {
                self.api.post_json(
                    &path,
                    &body,
                )
            })
            .await
    }

    /// Detaches the platform-traffic load balancer.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_glueops_load_balancer(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/glueops-load-balancer");
        self.executor
            .execute(|| {
                self.api
                    .delete_json(&path)
            })
            .await
    }

    /// Attaches the bastion server.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the server does not belong to
    /// the active organization.
    pub async fn attach_bastion(&self, id: Uuid, server_id: Uuid) -> Result<Cluster, ApiError> {
        let body = AttachBastion { server_id };
        let path = format!("/api/v1/clusters/{id}/bastion");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &body)
            })
            .await
    }

    /// Detaches the bastion server.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_bastion(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/bastion");
        self.executor
            .execute(|| self.api.delete_json(&path))
            .await
    }

    /// Stores the cluster's kubeconfig.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the document is rejected.
    pub async fn set_kubeconfig(&self, id: Uuid, kubeconfig: &str) -> Result<Cluster, ApiError> {
        let body = SetKubeconfigRequest {
            kubeconfig: kubeconfig.to_string(),
        };
        let path = format!("/api/v1/clusters/{id}/kubeconfig");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &body)
            })
            .await
    }

    /// Removes the cluster's stored kubeconfig.
    ///
    /// # Errors
    ///
    /// Returns the server's error when removal is rejected.
    pub async fn clear_kubeconfig(&self, id: Uuid) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/kubeconfig");
        self.executor
            .execute(|| {
                self.api
                    .delete_json(&path)
            })
            .await
    }

    /// Attaches one node pool to a cluster.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the pool does not belong to the
    /// active organization.
    pub async fn attach_node_pool(&self, id: Uuid, node_pool_id: Uuid) -> Result<Cluster, ApiError> {
        let body = AttachNodePool { node_pool_id };
        let path = format!("/api/v1/clusters/{id}/node-pools");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &body)
            })
            .await
    }

    /// Detaches one node pool from a cluster.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_node_pool(
        &self,
        id: Uuid,
        node_pool_id: Uuid,
    ) -> Result<Cluster, ApiError> {
        let path = format!("/api/v1/clusters/{id}/node-pools/{node_pool_id}");
        self.executor
            .execute(|| {
                self.api
                    .delete_json(&path)
            })
            .await
    }

    /// Lists a cluster's action runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn runs(&self, id: Uuid) -> Result<Vec<ClusterRun>, ApiError> {
        let path = format!("/api/v1/clusters/{id}/runs");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Fetches one action run.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get_run(&self, id: Uuid, run_id: Uuid) -> Result<ClusterRun, ApiError> {
        let path = format!("/api/v1/clusters/{id}/runs/{run_id}");
        self.executor
            .execute(|| {
                self.api
                    .get_json(&path)
            })
            .await
    }

    /// Starts an action against a cluster, returning the pending run.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the action cannot be started.
    pub async fn run_action(&self, id: Uuid, action_id: Uuid) -> Result<ClusterRun, ApiError> {
        let path = format!("/api/v1/clusters/{id}/actions/{action_id}/runs");
        let body = serde_json::json!({});
        self.executor
            .execute(|| self.api.post_json(&path, &body))
            .await
    }
}

impl std::fmt::Debug for ClustersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClustersClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attach_payload_shapes() {
        let id = Uuid::nil();

        let domain = AttachDomain { domain_id: id };
        assert_eq!(
            serde_json::to_string(&domain).unwrap(),
            format!("{{\"domain_id\":\"{id}\"}}")
        );

        let record_set = AttachRecordSet { record_set_id: id };
        assert_eq!(
            serde_json::to_string(&record_set).unwrap(),
            format!("{{\"record_set_id\":\"{id}\"}}")
        );

        let lb = AttachLoadBalancer {
            load_balancer_id: id,
        };
        assert_eq!(
            serde_json::to_string(&lb).unwrap(),
            format!("{{\"load_balancer_id\":\"{id}\"}}")
        );

        let bastion = AttachBastion { server_id: id };
        assert_eq!(
            serde_json::to_string(&bastion).unwrap(),
            format!("{{\"server_id\":\"{id}\"}}")
        );

        let pool = AttachNodePool { node_pool_id: id };
        assert_eq!(
            serde_json::to_string(&pool).unwrap(),
            format!("{{\"node_pool_id\":\"{id}\"}}")
        );
    }

    #[test]
    fn test_search_query_is_percent_encoded() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", "edge cluster")
            .finish();
        assert_eq!(query, "q=edge+cluster");
    }
}
