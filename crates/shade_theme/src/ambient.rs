//! Ambient dark-preference sources
//!
//! The host environment's "prefers dark" signal is injected behind
//! [`AmbientSource`] rather than detected by the core. A source answers a
//! synchronous query and notifies subscribers on every transition; the
//! per-scope state machine holds one subscription for its lifetime.
//!
//! Three implementations ship here:
//! - [`FixedAmbient`]: a constant (environments without appearance
//!   support report day)
//! - [`SimulatedAmbient`]: a mutable source for tests and demos
//! - [`SystemAmbient`]: a one-shot snapshot of the OS preference
//!
//! The polling [`crate::watcher::SystemWatcher`] (cargo feature
//! `watcher`) is the live OS-backed source.

use crate::platform::detect_system_prefers_dark;
use shade_core::notify::{self, Listener, SharedListeners, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Live boolean signal for the environment's dark-appearance preference.
pub trait AmbientSource: Send + Sync {
    /// Current preference; `false` when the environment cannot say.
    fn prefers_dark(&self) -> bool;

    /// Register a change listener, invoked with the new preference on
    /// every subsequent transition. Dropping the returned guard releases
    /// the registration.
    fn subscribe(&self, listener: Listener<bool>) -> Subscription;
}

/// Constant source; never notifies.
#[derive(Clone, Copy, Debug)]
pub struct FixedAmbient {
    prefers_dark: bool,
}

impl FixedAmbient {
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark }
    }

    /// An environment without appearance support, reported as preferring
    /// day.
    pub fn unsupported() -> Self {
        Self::new(false)
    }
}

impl AmbientSource for FixedAmbient {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn subscribe(&self, _listener: Listener<bool>) -> Subscription {
        Subscription::inert()
    }
}

/// Mutable source driven by the caller; used by tests and demos.
#[derive(Clone, Default)]
pub struct SimulatedAmbient {
    inner: Arc<SimulatedInner>,
}

#[derive(Default)]
struct SimulatedInner {
    prefers_dark: AtomicBool,
    listeners: SharedListeners<bool>,
}

impl SimulatedAmbient {
    pub fn new(prefers_dark: bool) -> Self {
        let simulated = Self::default();
        simulated
            .inner
            .prefers_dark
            .store(prefers_dark, Ordering::SeqCst);
        simulated
    }

    /// Flip the preference, notifying subscribers when it actually
    /// changes.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let previous = self.inner.prefers_dark.swap(prefers_dark, Ordering::SeqCst);
        if previous != prefers_dark {
            tracing::debug!(prefers_dark, "ambient preference changed");
            notify::notify_all(&self.inner.listeners, &prefers_dark);
        }
    }

    /// Number of live subscriptions (for lifecycle assertions).
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().unwrap().len()
    }
}

impl AmbientSource for SimulatedAmbient {
    fn prefers_dark(&self) -> bool {
        self.inner.prefers_dark.load(Ordering::SeqCst)
    }

    fn subscribe(&self, listener: Listener<bool>) -> Subscription {
        notify::subscribe(&self.inner.listeners, listener)
    }
}

/// One-shot snapshot of the OS preference; never notifies.
#[derive(Clone, Copy, Debug)]
pub struct SystemAmbient {
    prefers_dark: bool,
}

impl SystemAmbient {
    /// Probe the OS once. Undeterminable environments default to day.
    pub fn snapshot() -> Self {
        Self {
            prefers_dark: detect_system_prefers_dark().unwrap_or(false),
        }
    }
}

impl AmbientSource for SystemAmbient {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn subscribe(&self, _listener: Listener<bool>) -> Subscription {
        Subscription::inert()
    }
}
