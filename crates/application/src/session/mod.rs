//! The session and authenticated-request pipeline.
//!
//! Data flows through four pieces: [`TokenStore`] holds the credential
//! pair, [`OrgContext`] holds the active-organization selection,
//! [`RefreshCoordinator`] performs the deduplicated refresh exchange and
//! [`AuthExecutor`] wraps remote calls with the proactive-refresh and
//! retry-on-401 policy.

mod executor;
mod observable;
mod org_context;
mod refresh;
mod token_store;

pub use executor::{AuthExecutor, DEFAULT_PROACTIVE_REFRESH_SECS, UnauthorizedError};
pub use observable::Subscription;
pub use org_context::{ORG_STORAGE_KEY, OrgContext};
pub use refresh::RefreshCoordinator;
pub use token_store::{TOKEN_STORAGE_KEY, TokenStore};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared in-process fakes for session tests.
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    use crate::ports::{Clock, SessionStorage, StorageError};

    /// In-memory storage fake.
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        /// Writes directly to the backing map, bypassing any store cache,
        /// simulating another execution context mutating durable storage.
        pub fn write_external(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }
    }

    impl SessionStorage for MemoryStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    /// Clock fake pinned to a fixed instant.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Builds a compact three-segment token whose payload carries `exp`.
    pub fn token_with_exp(exp: i64) -> String {
        use base64::Engine;
        let encode =
            |s: String| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s.into_bytes());
        format!(
            "{}.{}.sig",
            encode("{\"alg\":\"HS256\"}".to_string()),
            encode(format!("{{\"exp\":{exp}}}"))
        )
    }
}
