//! SSH key pairs managed server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization-owned SSH key pair. Private material never appears here;
/// it is fetched separately through the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name.
    pub name: String,
    /// OpenSSH-formatted public key.
    pub public_key: String,
    /// Key fingerprint.
    pub fingerprint: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /ssh`; the server generates the pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSshKeyRequest {
    /// Display name.
    pub name: String,
    /// Key comment, e.g. "deploy@autoglue".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Key size; only meaningful for RSA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    /// "rsa" (default) or "ed25519".
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub key_type: Option<String>,
}

/// Response of `GET /ssh/{id}/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyMaterial {
    /// Key identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Key fingerprint.
    pub fingerprint: String,
    /// Populated when the public part was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Populated when the private part was requested (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_pem: Option<String>,
    /// Suggested filenames for saving to disk.
    #[serde(default)]
    pub filenames: Vec<String>,
}
