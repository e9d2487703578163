//! Node labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A key/value label attachable to node pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Label key.
    pub key: String,
    /// Label value.
    pub value: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /labels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabelRequest {
    /// Label key.
    pub key: String,
    /// Label value.
    pub value: String,
}

/// Payload for `PATCH /labels/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLabelRequest {
    /// New key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// New value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
