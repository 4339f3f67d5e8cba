//! Per-scope color-mode state
//!
//! [`ColorModeState`] owns the mode, the latest ambient snapshot, and the
//! per-polarity scheme overrides for one scope, and derives the concrete
//! polarity and scheme name from them:
//!
//! ```text
//! polarity = night          if mode == night
//!          = day            if mode == day
//!          = ambient ? night : day            (mode == auto)
//! scheme   = day_scheme   ?? "light"          (polarity == day)
//!          = night_scheme ?? "dark"           (polarity == night)
//! ```
//!
//! `set_mode` is the only externally invocable transition; the ambient
//! subscription feeds the only other input event. Each machine holds its
//! subscription for its lifetime and releases it exactly once on drop.
//! Listeners are invoked after the state lock is released, so a listener
//! may call straight back into the machine.

use crate::ambient::AmbientSource;
use crate::mode::{ColorMode, Polarity};
use shade_core::notify::{self, ListenerSet, SharedListeners, Subscription};
use std::sync::{Arc, Mutex, Weak};

/// Seed configuration for one state machine.
#[derive(Clone, Debug, Default)]
pub struct ModeConfig {
    pub mode: ColorMode,
    pub day_scheme: Option<String>,
    pub night_scheme: Option<String>,
}

/// Coherent snapshot of a machine's derived outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeSnapshot {
    pub mode: ColorMode,
    pub polarity: Polarity,
    pub scheme_name: String,
}

struct ModeCore {
    mode: ColorMode,
    ambient_prefers_dark: bool,
    day_scheme: Option<String>,
    night_scheme: Option<String>,
}

impl ModeCore {
    fn polarity(&self) -> Polarity {
        self.mode.resolve(self.ambient_prefers_dark)
    }

    fn scheme_name(&self) -> String {
        let polarity = self.polarity();
        let configured = match polarity {
            Polarity::Day => self.day_scheme.as_deref(),
            Polarity::Night => self.night_scheme.as_deref(),
        };
        configured.unwrap_or(polarity.default_scheme()).to_string()
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            mode: self.mode,
            polarity: self.polarity(),
            scheme_name: self.scheme_name(),
        }
    }
}

type SharedCore = Arc<Mutex<ModeCore>>;

/// The color-mode state machine for one scope.
pub struct ColorModeState {
    core: SharedCore,
    listeners: SharedListeners<()>,
    // released exactly once, when the machine is dropped
    _ambient: Subscription,
}

impl ColorModeState {
    /// Create a machine seeded from `config` and wired to `ambient`.
    ///
    /// The ambient signal is queried synchronously for its initial value
    /// and tracked from then on, even while the mode is explicit day or
    /// night (it only affects derivation after a switch to `auto`).
    pub fn new(config: ModeConfig, ambient: &Arc<dyn AmbientSource>) -> Self {
        let core = Arc::new(Mutex::new(ModeCore {
            mode: config.mode,
            ambient_prefers_dark: ambient.prefers_dark(),
            day_scheme: config.day_scheme,
            night_scheme: config.night_scheme,
        }));
        let listeners: SharedListeners<()> = Arc::default();

        let weak_core = Arc::downgrade(&core);
        let weak_listeners = Arc::downgrade(&listeners);
        let subscription = ambient.subscribe(Arc::new(move |prefers_dark: &bool| {
            on_ambient(&weak_core, &weak_listeners, *prefers_dark);
        }));

        Self {
            core,
            listeners,
            _ambient: subscription,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.core.lock().unwrap().mode
    }

    pub fn polarity(&self) -> Polarity {
        self.core.lock().unwrap().polarity()
    }

    pub fn scheme_name(&self) -> String {
        self.core.lock().unwrap().scheme_name()
    }

    pub fn day_scheme(&self) -> Option<String> {
        self.core.lock().unwrap().day_scheme.clone()
    }

    pub fn night_scheme(&self) -> Option<String> {
        self.core.lock().unwrap().night_scheme.clone()
    }

    /// Derive mode, polarity, and scheme name under a single lock pass.
    pub fn snapshot(&self) -> ModeSnapshot {
        self.core.lock().unwrap().snapshot()
    }

    /// Replace the mode. The only externally invocable transition;
    /// derivation is synchronous, so the next read observes the new
    /// polarity and scheme.
    pub fn set_mode(&self, mode: ColorMode) {
        apply_mode(&self.core, &self.listeners, mode);
    }

    /// A mutating handle that does not keep the machine alive.
    pub fn setter(&self) -> ColorModeSetter {
        ColorModeSetter {
            core: Arc::downgrade(&self.core),
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Register a change listener, invoked after every observable
    /// re-derivation.
    pub fn on_change(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        notify::subscribe(&self.listeners, Arc::new(move |_: &()| listener()))
    }
}

/// Mutating handle targeting the nearest state machine.
///
/// Cloneable and detachable: once the owning scope is gone, `set` becomes
/// a no-op.
#[derive(Clone)]
pub struct ColorModeSetter {
    core: Weak<Mutex<ModeCore>>,
    listeners: Weak<Mutex<ListenerSet<()>>>,
}

impl ColorModeSetter {
    pub fn set(&self, mode: ColorMode) {
        let (Some(core), Some(listeners)) = (self.core.upgrade(), self.listeners.upgrade())
        else {
            return;
        };
        apply_mode(&core, &listeners, mode);
    }
}

fn apply_mode(core: &SharedCore, listeners: &SharedListeners<()>, mode: ColorMode) {
    let changed = {
        let mut core = core.lock().unwrap();
        if core.mode == mode {
            false
        } else {
            tracing::debug!(from = %core.mode, to = %mode, "color mode transition");
            core.mode = mode;
            true
        }
    };
    if changed {
        notify::notify_all(listeners, &());
    }
}

fn on_ambient(
    core: &Weak<Mutex<ModeCore>>,
    listeners: &Weak<Mutex<ListenerSet<()>>>,
    prefers_dark: bool,
) {
    let Some(core) = core.upgrade() else { return };
    let changed = {
        let mut core = core.lock().unwrap();
        let before = core.snapshot();
        core.ambient_prefers_dark = prefers_dark;
        before != core.snapshot()
    };
    tracing::trace!(prefers_dark, changed, "ambient preference updated");
    if changed {
        if let Some(listeners) = listeners.upgrade() {
            notify::notify_all(&listeners, &());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::SimulatedAmbient;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn machine(config: ModeConfig, ambient: &SimulatedAmbient) -> ColorModeState {
        let source: Arc<dyn AmbientSource> = Arc::new(ambient.clone());
        ColorModeState::new(config, &source)
    }

    #[test]
    fn day_mode_ignores_the_ambient_signal() {
        let ambient = SimulatedAmbient::new(true);
        let state = machine(ModeConfig::default(), &ambient);

        assert_eq!(state.polarity(), Polarity::Day);
        assert_eq!(state.scheme_name(), "light");

        ambient.set_prefers_dark(false);
        ambient.set_prefers_dark(true);
        assert_eq!(state.polarity(), Polarity::Day);
    }

    #[test]
    fn auto_mode_tracks_the_ambient_signal() {
        let ambient = SimulatedAmbient::new(false);
        let state = machine(
            ModeConfig {
                mode: ColorMode::Auto,
                ..Default::default()
            },
            &ambient,
        );

        assert_eq!(state.polarity(), Polarity::Day);
        ambient.set_prefers_dark(true);
        assert_eq!(state.polarity(), Polarity::Night);
        assert_eq!(state.scheme_name(), "dark");
    }

    #[test]
    fn scheme_overrides_beat_the_defaults() {
        let ambient = SimulatedAmbient::new(false);
        let state = machine(
            ModeConfig {
                mode: ColorMode::Day,
                day_scheme: Some("dark".to_string()),
                night_scheme: Some("dark_dimmed".to_string()),
            },
            &ambient,
        );

        assert_eq!(state.scheme_name(), "dark");
        state.set_mode(ColorMode::Night);
        assert_eq!(state.scheme_name(), "dark_dimmed");
    }

    #[test]
    fn set_mode_notifies_and_rederives_synchronously() {
        let ambient = SimulatedAmbient::new(false);
        let state = machine(ModeConfig::default(), &ambient);
        let notifications = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notifications);
        let _guard = state.on_change(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        state.set_mode(ColorMode::Night);
        assert_eq!(state.polarity(), Polarity::Night);
        assert_eq!(notifications.load(Ordering::SeqCst), 1);

        // same mode again is not a transition
        state.set_mode(ColorMode::Night);
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ambient_flip_under_explicit_mode_does_not_notify() {
        let ambient = SimulatedAmbient::new(false);
        let state = machine(ModeConfig::default(), &ambient);
        let notifications = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notifications);
        let _guard = state.on_change(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        ambient.set_prefers_dark(true);
        assert_eq!(notifications.load(Ordering::SeqCst), 0);

        // the signal was still tracked for a later switch into auto
        state.set_mode(ColorMode::Auto);
        assert_eq!(state.polarity(), Polarity::Night);
    }

    #[test]
    fn listener_may_reenter_the_machine() {
        let ambient = SimulatedAmbient::new(false);
        let state = Arc::new(machine(
            ModeConfig {
                mode: ColorMode::Auto,
                ..Default::default()
            },
            &ambient,
        ));

        let setter = state.setter();
        let _guard = state.on_change(move || {
            // re-entering the machine from a notification must not deadlock
            setter.set(ColorMode::Auto);
        });
        let probe = Arc::clone(&state);
        let _second = state.on_change(move || {
            let _ = probe.scheme_name();
        });

        ambient.set_prefers_dark(true);
        assert_eq!(state.scheme_name(), "dark");
    }

    #[test]
    fn dropping_the_machine_releases_the_ambient_subscription() {
        let ambient = SimulatedAmbient::new(false);
        let state = machine(ModeConfig::default(), &ambient);

        assert_eq!(ambient.listener_count(), 1);
        drop(state);
        assert_eq!(ambient.listener_count(), 0);

        // late signals against a dead machine are harmless
        ambient.set_prefers_dark(true);
    }

    #[test]
    fn setter_outliving_the_machine_is_a_no_op() {
        let ambient = SimulatedAmbient::new(false);
        let state = machine(ModeConfig::default(), &ambient);
        let setter = state.setter();

        drop(state);
        setter.set(ColorMode::Night);
    }
}
