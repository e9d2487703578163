//! Service metadata operations.

use std::sync::Arc;

use autoglue_domain::VersionInfo;
use autoglue_infrastructure::{ApiClient, ApiError};

/// Client for the unauthenticated `/api/v1/version` endpoint.
pub struct MetaClient {
    api: Arc<ApiClient>,
}

impl MetaClient {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Returns the server's build and runtime metadata.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable body.
    pub async fn version(&self) -> Result<VersionInfo, ApiError> {
        self.api.get_json_public("/api/v1/version").await
    }
}

impl std::fmt::Debug for MetaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaClient").finish_non_exhaustive()
    }
}
