//! Managed servers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a server plays in a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerRole {
    /// Control-plane node.
    Master,
    /// Workload node.
    Worker,
    /// SSH jump host; requires a public address.
    Bastion,
}

/// Provisioning lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Registered, not yet provisioned.
    #[default]
    Pending,
    /// Provisioning in progress.
    Provisioning,
    /// Provisioned and reachable.
    Ready,
    /// Provisioning failed.
    Failed,
}

/// A registered server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Hostname, may be empty until provisioning assigns one.
    #[serde(default)]
    pub hostname: String,
    /// Public address; required for bastions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    /// Private network address.
    pub private_ip_address: String,
    /// User account for SSH access.
    pub ssh_user: String,
    /// Key used to reach the server.
    pub ssh_key_id: Uuid,
    /// Cluster role.
    pub role: ServerRole,
    /// Provisioning state.
    #[serde(default)]
    pub status: ServerStatus,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /servers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServerRequest {
    /// Hostname, optional at registration time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Public address; required when `role` is bastion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    /// Private network address.
    pub private_ip_address: String,
    /// User account for SSH access.
    pub ssh_user: String,
    /// Key used to reach the server.
    pub ssh_key_id: Uuid,
    /// Cluster role.
    pub role: ServerRole,
}

/// Payload for `PATCH /servers/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServerRequest {
    /// New hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// New public address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    /// New private address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    /// New SSH user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_user: Option<String>,
    /// New SSH key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key_id: Option<Uuid>,
    /// New role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ServerRole>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServerStatus>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&ServerRole::Bastion).unwrap(),
            "\"bastion\""
        );
        let role: ServerRole = serde_json::from_str("\"master\"").unwrap();
        assert_eq!(role, ServerRole::Master);
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let req = UpdateServerRequest {
            hostname: Some("node-1".to_string()),
            ..UpdateServerRequest::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, "{\"hostname\":\"node-1\"}");
    }
}
