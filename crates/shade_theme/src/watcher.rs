//! Polling system appearance watcher
//!
//! A live [`AmbientSource`] backed by the OS probe: a background thread
//! polls [`detect_system_prefers_dark`] at a configurable interval and
//! notifies subscribers on transitions. Dropping the watcher stops the
//! thread and joins it.
//!
//! Enabled by the `watcher` cargo feature.

use crate::ambient::AmbientSource;
use crate::platform::detect_system_prefers_dark;
use shade_core::notify::{self, Listener, SharedListeners, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Polling configuration.
#[derive(Clone, Copy, Debug)]
pub struct WatcherConfig {
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
        }
    }
}

struct WatcherShared {
    prefers_dark: AtomicBool,
    stopped: Mutex<bool>,
    wake: Condvar,
    listeners: SharedListeners<bool>,
}

/// Watches the OS appearance preference by polling.
pub struct SystemWatcher {
    shared: Arc<WatcherShared>,
    handle: Option<JoinHandle<()>>,
}

impl SystemWatcher {
    /// Spawn the polling thread.
    ///
    /// The initial preference is probed synchronously; undeterminable
    /// environments report day until a poll succeeds.
    pub fn spawn(config: WatcherConfig) -> std::io::Result<Self> {
        let shared = Arc::new(WatcherShared {
            prefers_dark: AtomicBool::new(detect_system_prefers_dark().unwrap_or(false)),
            stopped: Mutex::new(false),
            wake: Condvar::new(),
            listeners: Arc::default(),
        });

        let worker = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("shade-ambient-watcher".to_string())
            .spawn(move || poll_loop(&worker, config.poll_interval))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }
}

fn poll_loop(shared: &WatcherShared, interval: Duration) {
    let mut stopped = shared.stopped.lock().unwrap();
    loop {
        let (guard, timeout) = shared.wake.wait_timeout(stopped, interval).unwrap();
        stopped = guard;
        if *stopped {
            break;
        }
        if !timeout.timed_out() {
            continue;
        }

        let Some(current) = detect_system_prefers_dark() else {
            continue;
        };
        let previous = shared.prefers_dark.swap(current, Ordering::SeqCst);
        if previous != current {
            tracing::debug!(prefers_dark = current, "system appearance preference changed");
            drop(stopped);
            notify::notify_all(&shared.listeners, &current);
            stopped = shared.stopped.lock().unwrap();
        }
    }
}

impl AmbientSource for SystemWatcher {
    fn prefers_dark(&self) -> bool {
        self.shared.prefers_dark.load(Ordering::SeqCst)
    }

    fn subscribe(&self, listener: Listener<bool>) -> Subscription {
        notify::subscribe(&self.shared.listeners, listener)
    }
}

impl Drop for SystemWatcher {
    fn drop(&mut self) {
        *self.shared.stopped.lock().unwrap() = true;
        self.shared.wake.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
