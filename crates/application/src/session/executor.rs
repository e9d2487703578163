//! Authenticated-request execution policy.
//!
//! The executor wraps a remote call with two behaviors: a proactive
//! refresh when the access token is inside the expiry window, and a
//! single retry after a reactive refresh when the call comes back
//! unauthorized. Errors pass through unwrapped so callers keep their
//! own error types.

use std::future::Future;
use std::sync::Arc;

use super::refresh::RefreshCoordinator;
use super::token_store::TokenStore;

/// How close to expiry, in seconds, the access token may get before a
/// call triggers a refresh ahead of time.
pub const DEFAULT_PROACTIVE_REFRESH_SECS: i64 = 30;

/// Lets the executor recognize an authentication failure inside the
/// caller's error type without taking ownership of it.
pub trait UnauthorizedError {
    /// Whether this error represents an HTTP 401 response.
    fn is_unauthorized(&self) -> bool;
}

/// Runs remote calls under the session's refresh and retry policy.
pub struct AuthExecutor {
    tokens: Arc<TokenStore>,
    refresher: Arc<RefreshCoordinator>,
    proactive_threshold_secs: i64,
}

impl AuthExecutor {
    /// Creates an executor with the default proactive-refresh window.
    #[must_use]
    pub fn new(tokens: Arc<TokenStore>, refresher: Arc<RefreshCoordinator>) -> Self {
        Self::with_threshold(tokens, refresher, DEFAULT_PROACTIVE_REFRESH_SECS)
    }

    /// Creates an executor with a custom proactive-refresh window.
    #[must_use]
    pub fn with_threshold(
        tokens: Arc<TokenStore>,
        refresher: Arc<RefreshCoordinator>,
        proactive_threshold_secs: i64,
    ) -> Self {
        Self {
            tokens,
            refresher,
            proactive_threshold_secs,
        }
    }

    /// Runs `call` under the session policy.
    ///
    /// When the cached access token is within the proactive window the
    /// executor refreshes first; the outcome of that refresh does not
    /// block the call. When the call fails unauthorized, one reactive
    /// refresh is attempted and, if it succeeds, `call` runs exactly one
    /// more time. Any other error, and any error from the retried call,
    /// is returned as-is.
    ///
    /// # Errors
    ///
    /// Propagates the error of the last attempted call.
    pub async fn execute<T, E, F, Fut>(&self, call: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: UnauthorizedError,
    {
        if self.tokens.will_expire_soon(self.proactive_threshold_secs) {
            tracing::debug!("access token near expiry, refreshing ahead of the call");
            self.refresher.refresh_once().await;
        }

        match call().await {
            Err(error) if error.is_unauthorized() => {
                if self.refresher.refresh_once().await {
                    tracing::debug!("retrying call after reactive refresh");
                    call().await
                } else {
                    Err(error)
                }
            }
            outcome => outcome,
        }
    }
}

impl std::fmt::Debug for AuthExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthExecutor")
            .field("proactive_threshold_secs", &self.proactive_threshold_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::{AuthTransport, TransportError};
    use crate::session::testing::{FixedClock, MemoryStorage, token_with_exp};
    use async_trait::async_trait;
    use autoglue_domain::TokenPair;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    enum CallError {
        Unauthorized,
        Server,
    }

    impl UnauthorizedError for CallError {
        fn is_unauthorized(&self) -> bool {
            matches!(self, Self::Unauthorized)
        }
    }

    struct ScriptedTransport {
        calls: AtomicUsize,
        outcome: Result<TokenPair, TransportError>,
    }

    impl ScriptedTransport {
        fn succeeding(pair: TokenPair) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Ok(pair),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Err(TransportError::Status {
                    status: 401,
                    message: "refresh token expired".to_string(),
                }),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthTransport for ScriptedTransport {
        async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn pair(access_exp: i64) -> TokenPair {
        TokenPair::new(token_with_exp(access_exp), "refresh-1", "Bearer", 900).unwrap()
    }

    struct Rig {
        executor: AuthExecutor,
        transport: Arc<ScriptedTransport>,
    }

    /// Builds an executor over a store pinned to t=0 whose cached access
    /// token expires at `access_exp`.
    fn rig(access_exp: i64, transport: ScriptedTransport) -> Rig {
        let clock = Arc::new(FixedClock(Utc.timestamp_opt(0, 0).single().unwrap()));
        let tokens = Arc::new(TokenStore::new(Arc::new(MemoryStorage::new()), clock));
        tokens.set(Some(pair(access_exp))).unwrap();

        let transport = Arc::new(transport);
        let refresher = Arc::new(RefreshCoordinator::new(
            Arc::clone(&tokens),
            Arc::clone(&transport) as Arc<_>,
        ));
        Rig {
            executor: AuthExecutor::new(tokens, refresher),
            transport,
        }
    }

    struct CountingCall {
        attempts: AtomicUsize,
        script: Mutex<Vec<Result<u32, CallError>>>,
    }

    impl CountingCall {
        fn scripted(outcomes: Vec<Result<u32, CallError>>) -> Self {
            Self {
                attempts: AtomicUsize::new(0),
                script: Mutex::new(outcomes),
            }
        }

        async fn invoke(&self) -> Result<u32, CallError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                panic!("call invoked more times than scripted");
            }
            script.remove(0)
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_success_passes_through_without_refresh() {
        let rig = rig(9_999, ScriptedTransport::succeeding(pair(99_999)));
        let call = CountingCall::scripted(vec![Ok(42)]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Ok(42));
        assert_eq!(call.attempts(), 1);
        assert_eq!(rig.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_refreshes_and_retries_once() {
        let rig = rig(9_999, ScriptedTransport::succeeding(pair(99_999)));
        let call = CountingCall::scripted(vec![Err(CallError::Unauthorized), Ok(7)]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Ok(7));
        assert_eq!(call.attempts(), 2);
        assert_eq!(rig.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_reactive_refresh_returns_original_error() {
        let rig = rig(9_999, ScriptedTransport::failing());
        let call = CountingCall::scripted(vec![Err(CallError::Unauthorized)]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Err(CallError::Unauthorized));
        assert_eq!(call.attempts(), 1);
        assert_eq!(rig.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_unauthorized_is_not_retried_again() {
        let rig = rig(9_999, ScriptedTransport::succeeding(pair(99_999)));
        let call = CountingCall::scripted(vec![
            Err(CallError::Unauthorized),
            Err(CallError::Unauthorized),
        ]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Err(CallError::Unauthorized));
        assert_eq!(call.attempts(), 2);
        assert_eq!(rig.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_non_auth_error_passes_through_unwrapped() {
        let rig = rig(9_999, ScriptedTransport::succeeding(pair(99_999)));
        let call = CountingCall::scripted(vec![Err(CallError::Server)]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Err(CallError::Server));
        assert_eq!(call.attempts(), 1);
        assert_eq!(rig.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_near_expiry_refreshes_before_the_call() {
        // exp at t=10 with a 30s window: refresh first, then call once.
        let rig = rig(10, ScriptedTransport::succeeding(pair(99_999)));
        let call = CountingCall::scripted(vec![Ok(1)]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Ok(1));
        assert_eq!(call.attempts(), 1);
        assert_eq!(rig.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_proactive_refresh_does_not_block_the_call() {
        let rig = rig(10, ScriptedTransport::failing());
        let call = CountingCall::scripted(vec![Ok(1)]);

        let result = rig.executor.execute(|| call.invoke()).await;

        assert_eq!(result, Ok(1));
        assert_eq!(call.attempts(), 1);
        assert_eq!(rig.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_comfortably_fresh_token_skips_proactive_refresh() {
        // exp at t=120 sits outside the 30s window.
        let rig = rig(120, ScriptedTransport::succeeding(pair(99_999)));
        let call = CountingCall::scripted(vec![Ok(1)]);

        rig.executor.execute(|| call.invoke()).await.unwrap();
        assert_eq!(rig.transport.call_count(), 0);
    }
}
