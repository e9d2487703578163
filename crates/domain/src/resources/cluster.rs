//! Clusters: provisioned Kubernetes control planes assembled from node
//! pools, a bastion, load balancers and DNS attachments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DnsDomain, LoadBalancer, NodePool, RecordSet, Server};

/// A cluster with its optional attachment expansions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Cloud provider identifier, e.g. "hetzner".
    pub provider: String,
    /// Provider region.
    pub region: String,
    /// Provisioning status, server-managed.
    pub status: String,
    /// Message of the most recent provisioning failure.
    #[serde(default)]
    pub last_error: String,
    /// Server-generated join token.
    #[serde(default)]
    pub random_token: String,
    /// Server-generated certificate key.
    #[serde(default)]
    pub certificate_key: String,
    /// Domain serving the captain endpoint, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain_domain: Option<DnsDomain>,
    /// Record set fronting the control plane, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_record_set: Option<RecordSet>,
    /// Load balancer for workload traffic, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps_load_balancer: Option<LoadBalancer>,
    /// Load balancer for platform traffic, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glueops_load_balancer: Option<LoadBalancer>,
    /// Bastion server, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bastion_server: Option<Server>,
    /// Attached node pools, present when the server expands them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_pools: Option<Vec<NodePool>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /clusters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClusterRequest {
    /// Display name.
    pub name: String,
    /// Cloud provider identifier.
    pub provider: String,
    /// Provider region.
    pub region: String,
}

/// Payload for `PATCH /clusters/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClusterRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// New region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Payload for `POST /clusters/{id}/kubeconfig`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetKubeconfigRequest {
    /// Kubeconfig document to store for the cluster.
    pub kubeconfig: String,
}

/// One execution of an admin-configured action against a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRun {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Cluster the action ran against.
    pub cluster_id: Uuid,
    /// Make target that was executed.
    pub action: String,
    /// Lifecycle state, server-managed.
    pub status: String,
    /// Failure message, empty while pending or on success.
    #[serde(default)]
    pub error: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, absent while the run is live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cluster_decodes_without_attachment_expansions() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "edge",
            "provider": "hetzner",
            "region": "fsn1",
            "status": "provisioning",
            "created_at": "2025-11-08T12:00:00Z",
            "updated_at": "2025-11-08T12:00:00Z"
        }"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.name, "edge");
        assert_eq!(cluster.last_error, "");
        assert!(cluster.captain_domain.is_none());
        assert!(cluster.bastion_server.is_none());
        assert!(cluster.node_pools.is_none());
    }

    #[test]
    fn test_update_request_omits_unset_fields() {
        let request = UpdateClusterRequest {
            region: Some("nbg1".to_string()),
            ..UpdateClusterRequest::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            "{\"region\":\"nbg1\"}"
        );
    }

    #[test]
    fn test_cluster_run_finished_at_is_optional() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000002",
            "organization_id": "00000000-0000-0000-0000-000000000003",
            "cluster_id": "00000000-0000-0000-0000-000000000001",
            "action": "upgrade",
            "status": "running",
            "created_at": "2025-11-08T12:00:00Z",
            "updated_at": "2025-11-08T12:00:05Z"
        }"#;
        let run: ClusterRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, "running");
        assert_eq!(run.error, "");
        assert!(run.finished_at.is_none());
    }
}
