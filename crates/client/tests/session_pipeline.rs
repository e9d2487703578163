//! End-to-end tests of the session pipeline through the public handle:
//! storage, stores, refresh coordinator and executor wired by the
//! builder, with only the network faked.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use autoglue_application::{
    AuthTransport, Clock, SessionStorage, TransportError, UnauthorizedError,
};
use autoglue_client::AutoGlue;
use autoglue_domain::TokenPair;
use autoglue_infrastructure::{ApiError, MemorySessionStorage};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

struct FakeTransport {
    calls: AtomicUsize,
    outcome: Result<TokenPair, TransportError>,
}

impl FakeTransport {
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
impl AuthTransport for FakeTransport {
    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield long enough for concurrent callers to pile up on the
        // in-flight attempt.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        self.outcome.clone()
    }
}

fn token_with_exp(exp: i64) -> String {
    let encode = |s: String| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s.into_bytes());
    format!(
        "{}.{}.sig",
        encode("{\"alg\":\"HS256\"}".to_string()),
        encode(format!("{{\"exp\":{exp}}}"))
    )
}

fn pair(access_exp: i64) -> TokenPair {
    TokenPair::new(token_with_exp(access_exp), "refresh-1", "Bearer", 900).unwrap()
}

fn glue(
    storage: Arc<MemorySessionStorage>,
    transport: Arc<FakeTransport>,
    now_secs: i64,
) -> AutoGlue {
    AutoGlue::builder("https://glue.example.com")
        .storage(storage as Arc<dyn SessionStorage>)
        .clock(Arc::new(FixedClock(
            Utc.timestamp_opt(now_secs, 0).single().unwrap(),
        )))
        .transport(transport as Arc<dyn AuthTransport>)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_session_survives_across_handles() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::failing());

    let first = glue(Arc::clone(&storage), Arc::clone(&transport), 0);
    first.tokens().set(Some(pair(9_999))).unwrap();
    first.org().set("org-1").unwrap();

    let second = glue(storage, transport, 0);
    assert_eq!(second.tokens().get(), Some(pair(9_999)));
    assert_eq!(second.org().get(), Some("org-1".to_string()));
    assert!(second.tokens().is_authed());
}

#[tokio::test]
async fn test_unauthorized_call_is_retried_after_refresh() {
    let storage = Arc::new(MemorySessionStorage::new());
    let fresh = pair(99_999);
    let transport = Arc::new(FakeTransport::succeeding(fresh.clone()));
    let glue = glue(Arc::clone(&storage), Arc::clone(&transport), 0);
    glue.tokens().set(Some(pair(9_999))).unwrap();

    let attempts = AtomicUsize::new(0);
    let result: Result<u32, ApiError> = glue
        .executor()
        .execute(|| async {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiError::from_status(401, b""))
            } else {
                Ok(7)
            }
        })
        .await;

    assert_eq!(result.unwrap(), 7);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(transport.call_count(), 1);
    // The refreshed pair reached durable storage.
    assert_eq!(glue.tokens().get(), Some(fresh));
}

#[tokio::test]
async fn test_failed_refresh_surfaces_the_original_error() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::failing());
    let glue = glue(storage, Arc::clone(&transport), 0);
    glue.tokens().set(Some(pair(9_999))).unwrap();

    let result: Result<u32, ApiError> = glue
        .executor()
        .execute(|| async { Err(ApiError::from_status(401, b"{\"error\":\"expired\"}")) })
        .await;

    let error = result.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.to_string(), "HTTP 401: expired");
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_unauthorized_calls_share_one_refresh() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::succeeding(pair(99_999)));
    let glue = glue(storage, Arc::clone(&transport), 0);
    glue.tokens().set(Some(pair(9_999))).unwrap();

    let run = || async {
        let first = AtomicUsize::new(0);
        glue.executor()
            .execute(|| async {
                if first.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err::<u32, _>(ApiError::from_status(401, b""))
                } else {
                    Ok(1)
                }
            })
            .await
    };

    let (a, b, c) = tokio::join!(run(), run(), run());
    assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (1, 1, 1));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_proactive_refresh_inside_the_expiry_window() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::succeeding(pair(99_999)));
    // Access token expires at t=20 while the clock reads t=0; within
    // the default 30 second window.
    let glue = glue(storage, Arc::clone(&transport), 0);
    glue.tokens().set(Some(pair(20))).unwrap();

    let result: Result<u32, ApiError> = glue.executor().execute(|| async { Ok(5) }).await;
    assert_eq!(result.unwrap(), 5);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_custom_proactive_threshold_is_honored() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::succeeding(pair(99_999)));
    let glue = AutoGlue::builder("https://glue.example.com")
        .storage(Arc::clone(&storage) as Arc<dyn SessionStorage>)
        .clock(Arc::new(FixedClock(Utc.timestamp_opt(0, 0).single().unwrap())))
        .transport(Arc::clone(&transport) as Arc<dyn AuthTransport>)
        .proactive_threshold_secs(5)
        .build()
        .unwrap();
    glue.tokens().set(Some(pair(20))).unwrap();

    // t=20 is outside a 5 second window, so no refresh happens.
    let result: Result<u32, ApiError> = glue.executor().execute(|| async { Ok(5) }).await;
    assert_eq!(result.unwrap(), 5);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_logged_out_session_fails_closed() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::succeeding(pair(99_999)));
    let glue = glue(storage, Arc::clone(&transport), 0);

    assert!(!glue.tokens().is_authed());
    assert!(glue.tokens().is_expired());

    // The executor still runs the call; with no refresh token the
    // coordinator declines without a network attempt.
    let result: Result<u32, ApiError> = glue
        .executor()
        .execute(|| async { Err(ApiError::from_status(401, b"")) })
        .await;
    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_external_change_is_visible_after_reload() {
    let storage = Arc::new(MemorySessionStorage::new());
    let transport = Arc::new(FakeTransport::failing());

    let writer = glue(Arc::clone(&storage), Arc::clone(&transport), 0);
    let reader = glue(Arc::clone(&storage), transport, 0);

    writer.tokens().set(Some(pair(9_999))).unwrap();
    assert_eq!(reader.tokens().get(), None);

    reader.tokens().handle_external_change();
    assert_eq!(reader.tokens().get(), Some(pair(9_999)));
}
