//! High-level AutoGlue API client.
//!
//! [`AutoGlue`] wires the session pipeline together: durable token and
//! organization stores, the single-flight refresh coordinator and the
//! request executor, plus one typed client per API resource. Every
//! resource call runs through the executor, so proactive refresh and
//! the retry-on-401 policy apply uniformly.

mod actions;
mod annotations;
mod auth;
mod clusters;
mod credentials;
mod dns;
mod jobs;
mod labels;
mod load_balancers;
mod me;
mod meta;
mod node_pools;
mod orgs;
mod servers;
mod ssh_keys;
mod taints;

use std::sync::Arc;

use autoglue_application::{
    AuthExecutor, AuthTransport, Clock, DEFAULT_PROACTIVE_REFRESH_SECS, OrgContext,
    RefreshCoordinator, SessionStorage, StorageError, TokenStore, TransportError,
};
use autoglue_infrastructure::{
    ApiClient, ApiError, FileSessionStorage, HttpAuthTransport, SystemClock,
};
use thiserror::Error;

pub use actions::ActionsClient;
pub use annotations::AnnotationsClient;
pub use auth::AuthClient;
pub use clusters::ClustersClient;
pub use credentials::CredentialsClient;
pub use dns::DnsClient;
pub use jobs::{JobFilter, JobsClient};
pub use labels::LabelsClient;
pub use load_balancers::LoadBalancersClient;
pub use me::MeClient;
pub use meta::MetaClient;
pub use node_pools::NodePoolsClient;
pub use orgs::OrgsClient;
pub use servers::ServersClient;
pub use ssh_keys::SshKeysClient;
pub use taints::TaintsClient;

/// Error constructing an [`AutoGlue`] handle.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Durable storage could not be set up.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    /// The API client could not be constructed.
    #[error("api client: {0}")]
    Api(#[from] ApiError),
    /// The refresh transport could not be constructed.
    #[error("auth transport: {0}")]
    Transport(#[from] TransportError),
}

/// Entry point to the AutoGlue API.
pub struct AutoGlue {
    tokens: Arc<TokenStore>,
    org: Arc<OrgContext>,
    refresher: Arc<RefreshCoordinator>,
    executor: Arc<AuthExecutor>,
    api: Arc<ApiClient>,
}

impl AutoGlue {
    /// Starts building a handle against `base_url`.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> AutoGlueBuilder {
        AutoGlueBuilder {
            base_url: base_url.into(),
            storage: None,
            clock: None,
            transport: None,
            proactive_threshold_secs: DEFAULT_PROACTIVE_REFRESH_SECS,
        }
    }

    /// The session's token store.
    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// The active-organization context.
    #[must_use]
    pub fn org(&self) -> &Arc<OrgContext> {
        &self.org
    }

    /// The refresh coordinator, for embedders that want to refresh
    /// eagerly (e.g. on resume from sleep).
    #[must_use]
    pub fn refresher(&self) -> &Arc<RefreshCoordinator> {
        &self.refresher
    }

    /// The request executor, for calls outside the typed clients.
    #[must_use]
    pub fn executor(&self) -> &Arc<AuthExecutor> {
        &self.executor
    }

    /// The low-level API client.
    #[must_use]
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Authentication operations.
    #[must_use]
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(
            Arc::clone(&self.api),
            Arc::clone(&self.executor),
            Arc::clone(&self.tokens),
            Arc::clone(&self.org),
        )
    }

    /// Organization operations.
    #[must_use]
    pub fn orgs(&self) -> OrgsClient {
        OrgsClient::new(
            Arc::clone(&self.api),
            Arc::clone(&self.executor),
            Arc::clone(&self.org),
        )
    }

    /// Server operations.
    #[must_use]
    pub fn servers(&self) -> ServersClient {
        ServersClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// SSH key operations.
    #[must_use]
    pub fn ssh_keys(&self) -> SshKeysClient {
        SshKeysClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Label operations.
    #[must_use]
    pub fn labels(&self) -> LabelsClient {
        LabelsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Taint operations.
    #[must_use]
    pub fn taints(&self) -> TaintsClient {
        TaintsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Annotation operations.
    #[must_use]
    pub fn annotations(&self) -> AnnotationsClient {
        AnnotationsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Node-pool operations.
    #[must_use]
    pub fn node_pools(&self) -> NodePoolsClient {
        NodePoolsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Cluster operations, including attachments and action runs.
    #[must_use]
    pub fn clusters(&self) -> ClustersClient {
        ClustersClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Admin action-catalog operations.
    #[must_use]
    pub fn actions(&self) -> ActionsClient {
        ActionsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// DNS domain and record-set operations.
    #[must_use]
    pub fn dns(&self) -> DnsClient {
        DnsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Load-balancer operations.
    #[must_use]
    pub fn load_balancers(&self) -> LoadBalancersClient {
        LoadBalancersClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Credential operations.
    #[must_use]
    pub fn credentials(&self) -> CredentialsClient {
        CredentialsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Background-job administration.
    #[must_use]
    pub fn jobs(&self) -> JobsClient {
        JobsClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Profile and API-key operations for the authenticated user.
    #[must_use]
    pub fn me(&self) -> MeClient {
        MeClient::new(Arc::clone(&self.api), Arc::clone(&self.executor))
    }

    /// Service metadata, e.g. the server's build version.
    #[must_use]
    pub fn meta(&self) -> MetaClient {
        MetaClient::new(Arc::clone(&self.api))
    }
}

impl std::fmt::Debug for AutoGlue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoGlue")
            .field("base_url", &self.api.base_url())
            .finish_non_exhaustive()
    }
}

/// Builder for [`AutoGlue`]; every port has a production default.
pub struct AutoGlueBuilder {
    base_url: String,
    storage: Option<Arc<dyn SessionStorage>>,
    clock: Option<Arc<dyn Clock>>,
    transport: Option<Arc<dyn AuthTransport>>,
    proactive_threshold_secs: i64,
}

impl AutoGlueBuilder {
    /// Overrides the durable session storage. Defaults to one file per
    /// key under the user's configuration directory.
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Overrides the clock used for expiry checks.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides the refresh-exchange transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn AuthTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Overrides how close to expiry, in seconds, a request may find
    /// the access token before refreshing ahead of the call.
    #[must_use]
    pub const fn proactive_threshold_secs(mut self, secs: i64) -> Self {
        self.proactive_threshold_secs = secs;
        self
    }

    /// Builds the handle, wiring the session pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or a default port
    /// cannot be constructed.
    pub fn build(self) -> Result<AutoGlue, BuildError> {
        let storage: Arc<dyn SessionStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileSessionStorage::in_config_dir()?),
        };
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let transport: Arc<dyn AuthTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpAuthTransport::new(&self.base_url)?),
        };

        let tokens = Arc::new(TokenStore::new(Arc::clone(&storage), clock));
        let org = Arc::new(OrgContext::new(storage));
        let refresher = Arc::new(RefreshCoordinator::new(Arc::clone(&tokens), transport));
        let executor = Arc::new(AuthExecutor::with_threshold(
            Arc::clone(&tokens),
            Arc::clone(&refresher),
            self.proactive_threshold_secs,
        ));
        let api = Arc::new(ApiClient::new(
            &self.base_url,
            Arc::clone(&tokens),
            Arc::clone(&org),
        )?);

        Ok(AutoGlue {
            tokens,
            org,
            refresher,
            executor,
            api,
        })
    }
}

impl std::fmt::Debug for AutoGlueBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoGlueBuilder")
            .field("base_url", &self.base_url)
            .field("proactive_threshold_secs", &self.proactive_threshold_secs)
            .finish_non_exhaustive()
    }
}
