//! Change notification
//!
//! A small observer primitive: a [`ListenerSet`] registry keyed by
//! [`ListenerId`], shared behind a lock, with RAII [`Subscription`] guards
//! that deregister exactly once on drop.
//!
//! Notification snapshots the registered listeners under the lock and
//! invokes them after releasing it, so a listener may re-enter the
//! structure that owns the set.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Unique identifier for a registered listener
    pub struct ListenerId;
}

/// Callback invoked with the notification payload.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Registry of change listeners.
pub struct ListenerSet<T> {
    listeners: SlotMap<ListenerId, Listener<T>>,
}

impl<T> ListenerSet<T> {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }

    /// Register a listener and return its id.
    pub fn insert(&mut self, listener: Listener<T>) -> ListenerId {
        self.listeners.insert(listener)
    }

    /// Remove a listener. Returns false if the id was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Clone out the current listeners for invocation outside the lock.
    pub fn snapshot(&self) -> Vec<Listener<T>> {
        self.listeners.values().cloned().collect()
    }
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A listener set shared behind a lock.
pub type SharedListeners<T> = Arc<Mutex<ListenerSet<T>>>;

/// Register `listener` in `set`, returning a guard that deregisters it on
/// drop.
pub fn subscribe<T: 'static>(set: &SharedListeners<T>, listener: Listener<T>) -> Subscription {
    let id = set.lock().unwrap().insert(listener);
    let weak = Arc::downgrade(set);
    Subscription::new(move || {
        if let Some(set) = weak.upgrade() {
            set.lock().unwrap().remove(id);
        }
    })
}

/// Invoke every listener registered in `set` with `payload`.
pub fn notify_all<T>(set: &SharedListeners<T>, payload: &T) {
    let snapshot = set.lock().unwrap().snapshot();
    for listener in snapshot {
        listener(payload);
    }
}

/// RAII guard for a registered listener.
///
/// Dropping the guard releases the registration exactly once. Guards from
/// sources that never notify are [`Subscription::inert`].
pub struct Subscription {
    cleanup: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wrap an arbitrary cleanup action.
    pub fn new(cleanup: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// A subscription with nothing to release.
    pub fn inert() -> Self {
        Self { cleanup: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cleanup.is_some())
            .finish()
    }
}
