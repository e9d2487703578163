//! Background jobs and queues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Waiting to be picked up.
    Queued,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error and exhausted its attempts.
    Failed,
    /// Cancelled before completion.
    Canceled,
    /// Failed and waiting for the next attempt.
    Retrying,
    /// Scheduled for a future run time.
    Scheduled,
}

/// A background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier (ULID).
    pub id: String,
    /// Job type, e.g. "email.send".
    #[serde(rename = "type")]
    pub job_type: String,
    /// Queue the job belongs to.
    pub queue: String,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Attempts made so far.
    pub attempts: u32,
    /// Attempt limit, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Earliest run time for scheduled jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_at: Option<DateTime<Utc>>,
    /// Job payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// Per-queue job counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueInfo {
    /// Queue name.
    pub name: String,
    /// Jobs waiting to run.
    pub pending: u64,
    /// Jobs currently executing.
    pub running: u64,
    /// Jobs that exhausted their attempts.
    pub failed: u64,
    /// Jobs waiting for a future run time.
    pub scheduled: u64,
}

/// A page of jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    /// Jobs on this page.
    pub items: Vec<Job>,
    /// Total matching jobs.
    pub total: u64,
    /// 1-based page index.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
}

/// Payload for `POST /admin/archer/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueJobRequest {
    /// Target queue.
    pub queue: String,
    /// Job type.
    #[serde(rename = "type")]
    pub job_type: String,
    /// Job payload.
    pub payload: serde_json::Value,
    /// Optional future run time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_at: Option<DateTime<Utc>>,
}
