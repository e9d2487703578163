//! Node pools: named groups of servers with shared labels, taints and
//! annotations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Annotation, Label, Server, Taint};

/// Role a pool's nodes play in the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodePoolRole {
    /// Control-plane pool.
    Master,
    /// Workload pool.
    #[default]
    Worker,
}

/// A node pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePool {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name.
    pub name: String,
    /// Pool role.
    #[serde(default)]
    pub role: NodePoolRole,
    /// Attached servers, present when the server expands them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// Attached labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    /// Attached taints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taints: Option<Vec<Taint>>,
    /// Attached annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /node-pools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNodePoolRequest {
    /// Display name.
    pub name: String,
    /// Pool role.
    #[serde(default)]
    pub role: NodePoolRole,
}

/// Payload for `PATCH /node-pools/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNodePoolRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<NodePoolRole>,
}
