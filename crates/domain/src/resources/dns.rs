//! DNS domains and record sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A managed DNS zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsDomain {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Fully qualified domain name.
    pub domain_name: String,
    /// Provider zone identifier, once provisioned.
    #[serde(default)]
    pub zone_id: String,
    /// Provisioning status: pending, provisioning, ready, failed.
    #[serde(default)]
    pub status: String,
    /// Last provisioning error, when any.
    #[serde(default)]
    pub last_error: String,
    /// Credential used to manage the zone.
    pub credential_id: Uuid,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /dns/domains`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDomainRequest {
    /// Fully qualified domain name.
    pub domain_name: String,
    /// Credential used to manage the zone.
    pub credential_id: Uuid,
    /// Pre-existing provider zone id, if adopting one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

/// Payload for `PATCH /dns/domains/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDomainRequest {
    /// New managing credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<Uuid>,
    /// New provider zone id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// New domain name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
}

/// A record set within a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Unique identifier.
    pub id: Uuid,
    /// Parent domain.
    pub domain_id: Uuid,
    /// Record name relative to the domain.
    pub name: String,
    /// Record type: A, AAAA, CNAME, TXT, MX, NS, SRV or CAA.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Record values.
    #[serde(default)]
    pub values: Vec<String>,
    /// Provisioning status.
    #[serde(default)]
    pub status: String,
    /// Last provisioning error, when any.
    #[serde(default)]
    pub last_error: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /dns/domains/{domain_id}/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordSetRequest {
    /// Record name, relative or fully qualified; the server normalizes it.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Record values.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Payload for `PATCH /dns/records/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecordSetRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New record type.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub record_type: Option<String>,
    /// New TTL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Replacement values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}
