//! DNS domain and record-set operations.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{
    CreateDomainRequest, CreateRecordSetRequest, DnsDomain, RecordSet, UpdateDomainRequest,
    UpdateRecordSetRequest,
};
use autoglue_infrastructure::{ApiClient, ApiError};
use uuid::Uuid;

/// Client for the `/api/v1/dns` endpoints.
///
/// Record sets hang off a domain for list/create but are addressed
/// directly by id for get/update/delete, mirroring the server's routes.
pub struct DnsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl DnsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's domains.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list_domains(&self) -> Result<Vec<DnsDomain>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/dns/domains"))
            .await
    }

    /// Fetches one domain.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get_domain(&self, id: Uuid) -> Result<DnsDomain, ApiError> {
        let path = format!("/api/v1/dns/domains/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Registers a domain for management.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create_domain(&self, request: &CreateDomainRequest) -> Result<DnsDomain, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/dns/domains", request))
            .await
    }

    /// Updates a domain; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update_domain(
        &self,
        id: Uuid,
        request: &UpdateDomainRequest,
    ) -> Result<DnsDomain, ApiError> {
        let path = format!("/api/v1/dns/domains/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Removes a domain from management.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete_domain(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/dns/domains/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }

    /// Lists a domain's record sets.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list_records(&self, domain_id: Uuid) -> Result<Vec<RecordSet>, ApiError> {
        let path = format!("/api/v1/dns/domains/{domain_id}/records");
        self.executor
            .execute(|| {
                self.api
                    .get_json(&path)
            })
            .await
    }

    /// Creates a record set within a domain.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create_record(
        &self,
        domain_id: Uuid,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet, ApiError> {
        let path = format!("/api/v1/dns/domains/{domain_id}/records");
        self.executor
            .execute(|| {
                self.api
                    .post_json(&path, request)
            })
            .await
    }

    /// Fetches one record set.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get_record(&self, id: Uuid) -> Result<RecordSet, ApiError> {
        let path = format!("/api/v1/dns/records/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Updates a record set; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update_record(
        &self,
        id: Uuid,
        request: &UpdateRecordSetRequest,
    ) -> Result<RecordSet, ApiError> {
        let path = format!("/api/v1/dns/records/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Deletes a record set.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete_record(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/dns/records/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }
}

impl std::fmt::Debug for DnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsClient").finish_non_exhaustive()
    }
}
