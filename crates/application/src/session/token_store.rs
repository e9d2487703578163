//! Durable, observable holder of the current token pair.
//!
//! The in-memory cache is the authority for synchronous reads; durable
//! storage is a write-through target, read only at construction, on
//! [`TokenStore::reload`] and on an externally signalled change. Expiry
//! checks decode the access token's `exp` claim and fail closed: a token
//! whose expiry cannot be determined counts as already expired.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use autoglue_domain::TokenPair;

use super::observable::{Subscribers, Subscription};
use crate::ports::{Clock, SessionStorage, StorageError};

/// Durable-storage key for the serialized token pair.
pub const TOKEN_STORAGE_KEY: &str = "autoglue.tokens";

/// Single source of truth for the session's credential pair.
///
/// Construct one instance per process and share it via [`Arc`]; tests
/// build isolated instances over their own storage.
pub struct TokenStore {
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    cache: Mutex<Option<TokenPair>>,
    subscribers: Subscribers<Option<TokenPair>>,
}

impl TokenStore {
    /// Creates a store, priming the cache from durable storage.
    ///
    /// An unreadable or malformed stored value degrades to "logged out"
    /// rather than failing construction.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, clock: Arc<dyn Clock>) -> Self {
        let initial = read_stored_pair(storage.as_ref());
        Self {
            storage,
            clock,
            cache: Mutex::new(initial),
            subscribers: Subscribers::default(),
        }
    }

    /// Returns the cached pair.
    #[must_use]
    pub fn get(&self) -> Option<TokenPair> {
        self.lock_cache().clone()
    }

    /// Replaces the pair: updates the cache, writes through to durable
    /// storage (removes the entry on `None`) and notifies subscribers.
    ///
    /// The cache update and the notification happen regardless of the
    /// durable write's outcome; the returned error only reports that the
    /// write-through failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write failed.
    pub fn set(&self, pair: Option<TokenPair>) -> Result<(), StorageError> {
        *self.lock_cache() = pair.clone();

        let persisted = match &pair {
            Some(pair) => serde_json::to_string(pair)
                .map_err(|e| StorageError::Serialization(e.to_string()))
                .and_then(|json| self.storage.write(TOKEN_STORAGE_KEY, &json)),
            None => self.storage.remove(TOKEN_STORAGE_KEY),
        };
        if let Err(error) = &persisted {
            tracing::warn!(%error, "failed to persist token pair");
        }

        self.subscribers.notify(&pair);
        persisted
    }

    /// Re-reads durable storage into the cache and returns the value.
    /// Does not notify subscribers.
    pub fn reload(&self) -> Option<TokenPair> {
        let stored = read_stored_pair(self.storage.as_ref());
        *self.lock_cache() = stored.clone();
        stored
    }

    /// Re-reads durable storage and notifies subscribers with the new
    /// value. Wire this to whatever cross-process change signal the
    /// embedding environment provides (file watcher, storage event).
    pub fn handle_external_change(&self) {
        let stored = self.reload();
        self.subscribers.notify(&stored);
    }

    /// True iff an access token is present, regardless of validity.
    #[must_use]
    pub fn is_authed(&self) -> bool {
        self.lock_cache()
            .as_ref()
            .is_some_and(|pair| !pair.access_token.is_empty())
    }

    /// The current access token, when present.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock_cache()
            .as_ref()
            .map(|pair| pair.access_token.clone())
    }

    /// The current refresh token, when present.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.lock_cache()
            .as_ref()
            .map(|pair| pair.refresh_token.clone())
            .filter(|token| !token.is_empty())
    }

    /// Whether the access token has expired, per the injected clock.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(self.clock.now())
    }

    /// Whether the access token has expired at `now`. Fail-closed: no
    /// token or no decodable `exp` claim counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.access_exp()
            .is_none_or(|exp| now.timestamp() >= exp)
    }

    /// Whether the access token expires within `threshold_secs` of the
    /// injected clock's now.
    #[must_use]
    pub fn will_expire_soon(&self, threshold_secs: i64) -> bool {
        self.will_expire_soon_at(threshold_secs, self.clock.now())
    }

    /// Whether the access token expires within `threshold_secs` of `now`.
    /// Fail-closed, like [`TokenStore::is_expired_at`].
    #[must_use]
    pub fn will_expire_soon_at(&self, threshold_secs: i64, now: DateTime<Utc>) -> bool {
        self.access_exp()
            .is_none_or(|exp| exp - now.timestamp() <= threshold_secs)
    }

    /// Clears the pair; equivalent to `set(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if removing the durable entry failed.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.set(None)
    }

    /// Registers `callback` to run with the new value on every [`set`]
    /// and every [`handle_external_change`].
    ///
    /// [`set`]: TokenStore::set
    /// [`handle_external_change`]: TokenStore::handle_external_change
    pub fn subscribe(
        &self,
        callback: impl Fn(&Option<TokenPair>) + Send + Sync + 'static,
    ) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    fn access_exp(&self) -> Option<i64> {
        self.lock_cache().as_ref().and_then(TokenPair::access_exp)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<TokenPair>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authed", &self.is_authed())
            .finish_non_exhaustive()
    }
}

fn read_stored_pair(storage: &dyn SessionStorage) -> Option<TokenPair> {
    match storage.read(TOKEN_STORAGE_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(pair) => Some(pair),
            Err(error) => {
                tracing::warn!(%error, "discarding malformed stored token pair");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(%error, "failed to read stored token pair");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::session::testing::{FixedClock, MemoryStorage, token_with_exp};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_clock(at: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.timestamp_opt(at, 0).single().unwrap()))
    }

    fn pair_with_exp(exp: i64) -> TokenPair {
        TokenPair::new(token_with_exp(exp), "refresh-1", "Bearer", 900).unwrap()
    }

    #[test]
    fn test_set_then_get() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(storage, fixed_clock(0));
        assert_eq!(store.get(), None);
        assert!(!store.is_authed());

        let pair = pair_with_exp(1_000);
        store.set(Some(pair.clone())).unwrap();
        assert_eq!(store.get(), Some(pair));
        assert!(store.is_authed());
    }

    #[test]
    fn test_persistence_round_trip_across_instances() {
        let storage = Arc::new(MemoryStorage::new());
        let pair = pair_with_exp(1_000);

        let store = TokenStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>, fixed_clock(0));
        store.set(Some(pair.clone())).unwrap();

        // A fresh instance over the same storage simulates a reload.
        let reloaded = TokenStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>, fixed_clock(0));
        assert_eq!(reloaded.get(), Some(pair));

        store.set(None).unwrap();
        let after_logout = TokenStore::new(storage, fixed_clock(0));
        assert_eq!(after_logout.get(), None);
    }

    #[test]
    fn test_malformed_stored_value_degrades_to_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write_external(TOKEN_STORAGE_KEY, "{not json");
        let store = TokenStore::new(storage, fixed_clock(0));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_notifies_subscribers() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(storage, fixed_clock(0));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_inner = Arc::clone(&seen);
        let _sub = store.subscribe(move |pair| {
            seen_inner.lock().unwrap().push(pair.clone());
        });

        let pair = pair_with_exp(1_000);
        store.set(Some(pair.clone())).unwrap();
        store.logout().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Some(pair), None]);
    }

    #[test]
    fn test_external_change_notifies_with_reloaded_value() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(
            Arc::clone(&storage) as Arc<dyn SessionStorage>,
            fixed_clock(0),
        );

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_inner = Arc::clone(&seen);
        let _sub = store.subscribe(move |pair| {
            seen_inner.lock().unwrap().push(pair.clone());
        });

        // Another context writes the slot behind this store's back.
        let pair = pair_with_exp(2_000);
        storage.write_external(TOKEN_STORAGE_KEY, &serde_json::to_string(&pair).unwrap());
        assert_eq!(store.get(), None, "cache unaware until signalled");

        store.handle_external_change();
        assert_eq!(store.get(), Some(pair.clone()));
        assert_eq!(*seen.lock().unwrap(), vec![Some(pair)]);
    }

    #[test]
    fn test_reload_does_not_notify() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(
            Arc::clone(&storage) as Arc<dyn SessionStorage>,
            fixed_clock(0),
        );

        let seen = Arc::new(Mutex::new(0_u32));
        let seen_inner = Arc::clone(&seen);
        let _sub = store.subscribe(move |_| *seen_inner.lock().unwrap() += 1);

        let pair = pair_with_exp(2_000);
        storage.write_external(TOKEN_STORAGE_KEY, &serde_json::to_string(&pair).unwrap());
        assert_eq!(store.reload(), Some(pair));
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn test_subscriber_may_reenter_store() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(TokenStore::new(storage, fixed_clock(0)));

        let reentrant = Arc::clone(&store);
        let seen = Arc::new(Mutex::new(None));
        let seen_inner = Arc::clone(&seen);
        let _sub = store.subscribe(move |_| {
            *seen_inner.lock().unwrap() = reentrant.get();
        });

        let pair = pair_with_exp(1_000);
        store.set(Some(pair.clone())).unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(pair));
    }

    #[test]
    fn test_expiry_fail_closed() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(storage, fixed_clock(0));

        // No token at all.
        assert!(store.is_expired());
        assert!(store.will_expire_soon(30));

        // Token with no decodable exp claim.
        let opaque = TokenPair::new("not-a-jwt", "refresh-1", "Bearer", 900).unwrap();
        store.set(Some(opaque)).unwrap();
        assert!(store.is_expired());
        assert!(store.will_expire_soon(30));
    }

    #[test]
    fn test_expiry_window_scenario() {
        // exp is 10 seconds in the future; now is that moment minus 5.
        let exp = 10_000;
        let now = Utc.timestamp_opt(exp - 5, 0).single().unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(storage, Arc::new(FixedClock(now)));
        store.set(Some(pair_with_exp(exp))).unwrap();

        assert!(store.will_expire_soon_at(30, now));
        assert!(!store.will_expire_soon_at(1, now));
        assert!(!store.is_expired_at(now));
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let exp = 500;
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(storage, fixed_clock(0));
        store.set(Some(pair_with_exp(exp))).unwrap();

        let just_before = Utc.timestamp_opt(exp - 1, 0).single().unwrap();
        let at_exp = Utc.timestamp_opt(exp, 0).single().unwrap();
        assert!(!store.is_expired_at(just_before));
        assert!(store.is_expired_at(at_exp));
    }
}
