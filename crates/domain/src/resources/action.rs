//! Admin-configured actions runnable against clusters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform-wide action; runs are triggered per cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier.
    pub id: Uuid,
    /// Display label.
    pub label: String,
    /// Human-readable description.
    pub description: String,
    /// Make target the workers execute.
    pub make_target: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /admin/actions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActionRequest {
    /// Display label.
    pub label: String,
    /// Human-readable description.
    pub description: String,
    /// Make target to execute.
    pub make_target: String,
}

/// Payload for `PATCH /admin/actions/{id}`. Unset fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateActionRequest {
    /// New label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New make target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_target: Option<String>,
}
