//! In-process subscriber registry shared by the session stores.
//!
//! Fan-out is synchronous and happens with no lock held, so a callback
//! may re-enter the owning store. Callbacks run in registration order,
//! but subscribers must not rely on each other's side effects.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: u64,
    callback: Callback<T>,
}

/// Registry of change callbacks for a single observed value.
pub(crate) struct Subscribers<T> {
    entries: Arc<Mutex<Vec<Entry<T>>>>,
    next_id: AtomicU64,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T: 'static> Subscribers<T> {
    /// Registers `callback` and returns its removal handle.
    pub(crate) fn subscribe(
        &self,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Entry {
                id,
                callback: Arc::new(callback),
            });

        let entries = Arc::downgrade(&self.entries);
        Subscription::new(move || remove_entry(&entries, id))
    }

    /// Invokes every registered callback with `value`.
    pub(crate) fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }
}

fn remove_entry<T>(entries: &Weak<Mutex<Vec<Entry<T>>>>, id: u64) {
    if let Some(entries) = entries.upgrade() {
        entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|entry| entry.id != id);
    }
}

/// Handle for removing a registered subscriber.
///
/// The subscription stays active until [`Subscription::cancel`] is called;
/// dropping the handle does not remove the registration. Cancelling more
/// than once is a no-op.
pub struct Subscription {
    remove: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remove: Mutex::new(Some(Box::new(remove))),
        }
    }

    /// Removes the registration; idempotent.
    pub fn cancel(&self) {
        let remove = self
            .remove
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(remove) = remove {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let subscribers = Subscribers::<u32>::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_a = Arc::clone(&seen);
        let _a = subscribers.subscribe(move |v| seen_a.lock().unwrap().push(("a", *v)));
        let seen_b = Arc::clone(&seen);
        let _b = subscribers.subscribe(move |v| seen_b.lock().unwrap().push(("b", *v)));

        subscribers.notify(&7);
        assert_eq!(*seen.lock().unwrap(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_cancel_removes_subscriber_and_is_idempotent() {
        let subscribers = Subscribers::<u32>::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_inner = Arc::clone(&calls);
        let sub = subscribers.subscribe(move |_| {
            calls_inner.fetch_add(1, Ordering::SeqCst);
        });

        subscribers.notify(&1);
        sub.cancel();
        sub.cancel();
        subscribers.notify(&2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropping_handle_keeps_subscription_alive() {
        let subscribers = Subscribers::<u32>::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_inner = Arc::clone(&calls);
        drop(subscribers.subscribe(move |_| {
            calls_inner.fetch_add(1, Ordering::SeqCst);
        }));

        subscribers.notify(&1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
