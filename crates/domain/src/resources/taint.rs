//! Node taints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheduling effect of a taint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaintEffect {
    /// Pods that do not tolerate the taint are not scheduled.
    NoSchedule,
    /// The scheduler tries to avoid placing intolerant pods.
    PreferNoSchedule,
    /// Intolerant pods are evicted as well.
    NoExecute,
}

/// A taint attachable to node pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taint {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Taint key.
    pub key: String,
    /// Taint value.
    pub value: String,
    /// Scheduling effect.
    pub effect: TaintEffect,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /taints`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaintRequest {
    /// Taint key.
    pub key: String,
    /// Taint value.
    pub value: String,
    /// Scheduling effect.
    pub effect: TaintEffect,
}

/// Payload for `PATCH /taints/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaintRequest {
    /// New key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// New value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// New effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<TaintEffect>,
}
