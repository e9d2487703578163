//! Durable, observable holder of the active-organization selection.
//!
//! One instance serves every caller in the process; the selection is a
//! bare organization id with no validation here (the server rejects ids
//! the session cannot access).

use std::sync::{Arc, Mutex, PoisonError};

use super::observable::{Subscribers, Subscription};
use crate::ports::{SessionStorage, StorageError};

/// Durable-storage key for the active organization id.
pub const ORG_STORAGE_KEY: &str = "autoglue.org";

/// Single source of truth for the active-organization selection.
pub struct OrgContext {
    storage: Arc<dyn SessionStorage>,
    cache: Mutex<Option<String>>,
    subscribers: Subscribers<Option<String>>,
}

impl OrgContext {
    /// Creates a context, priming the cache from durable storage.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let initial = match storage.read(ORG_STORAGE_KEY) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "failed to read stored organization id");
                None
            }
        };
        Self {
            storage,
            cache: Mutex::new(initial),
            subscribers: Subscribers::default(),
        }
    }

    /// Returns the selected organization id, when any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.lock_cache().clone()
    }

    /// Selects an organization: updates the cache, writes through and
    /// notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write failed; the cache and the
    /// notification are unaffected.
    pub fn set(&self, id: impl Into<String>) -> Result<(), StorageError> {
        let id = id.into();
        *self.lock_cache() = Some(id.clone());

        let persisted = self.storage.write(ORG_STORAGE_KEY, &id);
        if let Err(error) = &persisted {
            tracing::warn!(%error, "failed to persist organization id");
        }

        self.subscribers.notify(&Some(id));
        persisted
    }

    /// Clears the selection, for instance when the active organization
    /// was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if removing the durable entry failed.
    pub fn clear(&self) -> Result<(), StorageError> {
        *self.lock_cache() = None;

        let persisted = self.storage.remove(ORG_STORAGE_KEY);
        if let Err(error) = &persisted {
            tracing::warn!(%error, "failed to clear persisted organization id");
        }

        self.subscribers.notify(&None);
        persisted
    }

    /// Re-reads durable storage into the cache without notifying.
    pub fn reload(&self) -> Option<String> {
        let stored = self.storage.read(ORG_STORAGE_KEY).unwrap_or_default();
        *self.lock_cache() = stored.clone();
        stored
    }

    /// Re-reads durable storage and notifies subscribers; the hook for an
    /// externally observed change.
    pub fn handle_external_change(&self) {
        let stored = self.reload();
        self.subscribers.notify(&stored);
    }

    /// Registers `callback` to run with the new value on every change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Option<String>) + Send + Sync + 'static,
    ) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for OrgContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrgContext")
            .field("selected", &self.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::session::testing::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_get_clear() {
        let ctx = OrgContext::new(Arc::new(MemoryStorage::new()));
        assert_eq!(ctx.get(), None);

        ctx.set("org-1").unwrap();
        assert_eq!(ctx.get(), Some("org-1".to_string()));

        ctx.clear().unwrap();
        assert_eq!(ctx.get(), None);
    }

    #[test]
    fn test_selection_survives_reload() {
        let storage = Arc::new(MemoryStorage::new());
        let ctx = OrgContext::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
        ctx.set("org-1").unwrap();

        let fresh = OrgContext::new(storage);
        assert_eq!(fresh.get(), Some("org-1".to_string()));
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let ctx = OrgContext::new(Arc::new(MemoryStorage::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_inner = Arc::clone(&seen);
        let _sub = ctx.subscribe(move |id| seen_inner.lock().unwrap().push(id.clone()));

        ctx.set("org-1").unwrap();
        ctx.set("org-2").unwrap();
        ctx.clear().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("org-1".to_string()), Some("org-2".to_string()), None]
        );
    }

    #[test]
    fn test_external_change_notifies() {
        let storage = Arc::new(MemoryStorage::new());
        let ctx = OrgContext::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_inner = Arc::clone(&seen);
        let _sub = ctx.subscribe(move |id| seen_inner.lock().unwrap().push(id.clone()));

        storage.write_external(ORG_STORAGE_KEY, "org-9");
        ctx.handle_external_change();

        assert_eq!(ctx.get(), Some("org-9".to_string()));
        assert_eq!(*seen.lock().unwrap(), vec![Some("org-9".to_string())]);
    }
}
