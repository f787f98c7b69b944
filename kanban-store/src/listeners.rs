//! Callback registry for change and hydration notifications.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback<E>>,
}

/// A set of callbacks invoked in registration order
pub struct Listeners<E> {
    inner: Arc<Mutex<Registry<E>>>,
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    /// Register a callback. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
        let mut registry = lock(&self.inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.insert(id, Arc::new(callback));
        drop(registry);

        let weak: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).callbacks.remove(&id);
                }
            })),
        }
    }

    /// Invoke every callback with `event`.
    ///
    /// Callbacks run outside the registry lock so they may subscribe or
    /// unsubscribe without deadlocking.
    pub fn emit(&self, event: &E) {
        let callbacks: Vec<Callback<E>> = lock(&self.inner).callbacks.values().cloned().collect();
        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        lock(&self.inner).callbacks.len()
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the callback now
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Keep the callback registered for the lifetime of its source
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_subscribers() {
        let listeners = Listeners::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));
        let seen = total.clone();
        let _sub = listeners.subscribe(move |n| {
            seen.fetch_add(*n as usize, Ordering::SeqCst);
        });

        listeners.emit(&3);
        listeners.emit(&4);
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners = Listeners::<()>::new();
        let sub = listeners.subscribe(|_| {});
        assert_eq!(listeners.len(), 1);
        drop(sub);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_unsubscribe_and_detach() {
        let listeners = Listeners::<()>::new();
        listeners.subscribe(|_| {}).unsubscribe();
        assert_eq!(listeners.len(), 0);

        listeners.subscribe(|_| {}).detach();
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let listeners = Listeners::<()>::new();
        let sub = listeners.subscribe(|_| {});
        drop(listeners);
        sub.unsubscribe();
    }
}
