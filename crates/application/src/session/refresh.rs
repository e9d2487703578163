//! Single-flight token refresh.
//!
//! At most one refresh exchange is outstanding per coordinator. Callers
//! that request a refresh while one is in flight attach to the same
//! shared future and receive its eventual result; once the attempt
//! settles the marker is cleared so the next request starts fresh.

use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::token_store::TokenStore;
use crate::ports::AuthTransport;

type InFlight = Shared<BoxFuture<'static, bool>>;

/// Coordinates the refresh exchange through the [`AuthTransport`] port.
pub struct RefreshCoordinator {
    tokens: Arc<TokenStore>,
    transport: Arc<dyn AuthTransport>,
    inflight: Mutex<Option<InFlight>>,
}

impl RefreshCoordinator {
    /// Creates a coordinator over the given store and transport.
    #[must_use]
    pub fn new(tokens: Arc<TokenStore>, transport: Arc<dyn AuthTransport>) -> Self {
        Self {
            tokens,
            transport,
            inflight: Mutex::new(None),
        }
    }

    /// Attempts one refresh, deduplicated across concurrent callers.
    ///
    /// Returns `true` when a new pair was obtained and stored. Returns
    /// `false` when no refresh token is present (no network call is made)
    /// or the exchange failed; the store is left untouched in both cases.
    pub async fn refresh_once(&self) -> bool {
        let attempt = {
            let mut slot = self.lock_inflight();
            match slot.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let attempt =
                        do_refresh(Arc::clone(&self.tokens), Arc::clone(&self.transport))
                            .boxed()
                            .shared();
                    *slot = Some(attempt.clone());
                    attempt
                }
            }
        };

        let refreshed = attempt.clone().await;

        // Clear the marker, unless a later attempt already replaced it.
        let mut slot = self.lock_inflight();
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
            *slot = None;
        }
        refreshed
    }

    fn lock_inflight(&self) -> std::sync::MutexGuard<'_, Option<InFlight>> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator").finish_non_exhaustive()
    }
}

async fn do_refresh(tokens: Arc<TokenStore>, transport: Arc<dyn AuthTransport>) -> bool {
    let Some(refresh_token) = tokens.refresh_token() else {
        tracing::debug!("refresh skipped: no refresh token present");
        return false;
    };

    match transport.refresh(&refresh_token).await {
        Ok(pair) => {
            // A failed durable write is not a failed refresh; the cache
            // holds the new pair either way.
            if let Err(error) = tokens.set(Some(pair)) {
                tracing::warn!(%error, "refreshed pair not persisted");
            }
            true
        }
        Err(error) => {
            tracing::debug!(%error, "token refresh failed");
            false
        }
    }
}
