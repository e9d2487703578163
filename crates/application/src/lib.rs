//! AutoGlue Application - Session pipeline and ports
//!
//! This crate owns the session and authenticated-request pipeline:
//! the token store, the active-organization context, the single-flight
//! refresh coordinator and the retry-on-401 executor. External systems
//! (clock, durable storage, the refresh HTTP exchange) are reached
//! through ports implemented in the infrastructure layer.

pub mod ports;
pub mod session;

pub use ports::{AuthTransport, Clock, SessionStorage, StorageError, TransportError};
pub use session::{
    AuthExecutor, DEFAULT_PROACTIVE_REFRESH_SECS, ORG_STORAGE_KEY, OrgContext, RefreshCoordinator,
    Subscription, TOKEN_STORAGE_KEY, TokenStore, UnauthorizedError,
};
