//! Background-job administration.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{EnqueueJobRequest, Job, JobPage, JobStatus, QueueInfo};
use autoglue_infrastructure::{ApiClient, ApiError};

/// Filters for [`JobsClient::list`].
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Restrict to one queue.
    pub queue: Option<String>,
    /// Restrict to one lifecycle state.
    pub status: Option<JobStatus>,
    /// 1-based page index; the server defaults to 1.
    pub page: Option<u32>,
    /// Page size; the server clamps it to 1..=100.
    pub page_size: Option<u32>,
}

impl JobFilter {
    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(queue) = &self.queue {
            params.push(format!("queue={queue}"));
        }
        // JobStatus serializes to its lowercase wire name.
        if let Some(status) = self.status
            && let Ok(value) = serde_json::to_value(status)
            && let Some(name) = value.as_str()
        {
            params.push(format!("status={name}"));
        }
        if let Some(page) = self.page {
            params.push(format!("page={page}"));
        }
        if let Some(size) = self.page_size {
            params.push(format!("page_size={size}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Client for the `/api/v1/admin/archer` endpoints.
pub struct JobsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl JobsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists jobs matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 403 for non-admin sessions.
    pub async fn list(&self, filter: &JobFilter) -> Result<JobPage, ApiError> {
        let path = format!("/api/v1/admin/archer/jobs{}", filter.query());
        self.executor.execute(|| self.api.get_json(&path)).await
    }

    /// Enqueues a job.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the payload is rejected.
    pub async fn enqueue(&self, request: &EnqueueJobRequest) -> Result<Job, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/admin/archer/jobs", request))
            .await
    }

    /// Re-queues a failed job for another attempt.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the job is not retryable.
    pub async fn retry(&self, id: &str) -> Result<Job, ApiError> {
        let path = format!("/api/v1/admin/archer/jobs/{id}/retry");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &())
            })
            .await
    }

    /// Cancels a queued or scheduled job.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the job already ran.
    pub async fn cancel(&self, id: &str) -> Result<Job, ApiError> {
        let path = format!("/api/v1/admin/archer/jobs/{id}/cancel");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, &())
            })
            .await
    }

    /// Returns per-queue job counts.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 403 for non-admin sessions.
    pub async fn queues(&self) -> Result<Vec<QueueInfo>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/admin/archer/queues"))
            .await
    }
}

impl std::fmt::Debug for JobsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobsClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_filter_builds_no_query() {
        assert_eq!(JobFilter::default().query(), "");
    }

    #[test]
    fn test_filter_query_uses_wire_names() {
        let filter = JobFilter {
            queue: Some("default".to_string()),
            status: Some(JobStatus::Retrying),
            page: Some(2),
            page_size: Some(50),
        };
        assert_eq!(
            filter.query(),
            "?queue=default&status=retrying&page=2&page_size=50"
        );
    }
}
