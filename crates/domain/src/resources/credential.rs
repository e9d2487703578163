//! Provider credentials. Secret material is write-only: it is sent on
//! create/rotate and never returned by list or get.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored provider credential, secrets elided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique identifier.
    pub id: Uuid,
    /// Cloud provider: aws, cloudflare, hetzner, digitalocean or generic.
    pub provider: String,
    /// Secret kind: aws_access_key, api_token, basic_auth, oauth2.
    pub kind: String,
    /// Secret schema version.
    pub schema_version: u32,
    /// Human label.
    #[serde(default)]
    pub name: String,
    /// Scope granularity: provider, service or resource.
    pub scope_kind: String,
    /// Scope schema version.
    pub scope_version: u32,
    /// Scope selector, e.g. `{"service":"route53"}`.
    pub scope: serde_json::Value,
    /// Provider account id, when scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Provider region, when scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /credentials`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCredentialRequest {
    /// Cloud provider.
    pub provider: String,
    /// Secret kind.
    pub kind: String,
    /// Secret schema version.
    pub schema_version: u32,
    /// Human label.
    #[serde(default)]
    pub name: String,
    /// Scope granularity.
    pub scope_kind: String,
    /// Scope schema version.
    pub scope_version: u32,
    /// Scope selector.
    pub scope: serde_json::Value,
    /// Provider account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Provider region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Secret material; encrypted at rest server-side.
    pub secret: serde_json::Value,
}

/// Payload for `PATCH /credentials/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCredentialRequest {
    /// New label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// New region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// New scope granularity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_kind: Option<String>,
    /// New scope selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<serde_json::Value>,
    /// Replacement secret, when rotating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<serde_json::Value>,
}
