//! Theme scope propagation
//!
//! A [`ThemeScope`] is one instance of the propagation layer: it carries
//! the merged (still unresolved) theme chain, its own color-mode state
//! machine, and the ambient source shared with descendants. Parents are
//! explicit references; there is no hidden registry.
//!
//! Inheritance per input:
//! - `theme` composes by merge over the parent's unresolved chain,
//! - `color_mode`, `day_scheme`, and `night_scheme` inherit by direct
//!   substitution into a forked machine seeded at construction time.
//!
//! Every scope owns its machine: a scope that supplies no `color_mode`
//! still forks one from the inherited values, so `set_color_mode` always
//! targets the nearest scope and ambient changes reach each layer through
//! its own subscription.

use crate::ambient::{AmbientSource, SystemAmbient};
use crate::error::ThemeError;
use crate::mode::{ColorMode, Polarity};
use crate::presets;
use crate::state::{ColorModeSetter, ColorModeState, ModeConfig};
use crate::theme::Theme;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use shade_core::notify::Subscription;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Per-scope configuration surface.
///
/// Every field is optional; anything unspecified is inherited from the
/// enclosing scope, and outermost scopes fall back to the built-in
/// defaults (default theme, `day` mode, no scheme overrides).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScopeOptions {
    pub theme: Option<Theme>,
    pub color_mode: Option<ColorMode>,
    pub day_scheme: Option<String>,
    pub night_scheme: Option<String>,
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }

    pub fn with_day_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.day_scheme = Some(scheme.into());
        self
    }

    pub fn with_night_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.night_scheme = Some(scheme.into());
        self
    }

    /// Parse the TOML configuration surface.
    ///
    /// An out-of-set `color_mode` fails here, rejected at the boundary
    /// rather than coerced.
    pub fn from_toml_str(source: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(source)?)
    }
}

struct ScopeInner {
    // merged, unresolved chain handed down to descendants
    base: Theme,
    state: ColorModeState,
    ambient: Arc<dyn AmbientSource>,
    // scheme name -> resolved theme
    resolved: Mutex<FxHashMap<String, Theme>>,
}

/// One instance of the propagation layer.
#[derive(Clone)]
pub struct ThemeScope {
    inner: Arc<ScopeInner>,
}

impl ThemeScope {
    /// Outermost scope.
    ///
    /// A theme supplied here replaces the built-in default; nested scopes
    /// compose by merge instead.
    pub fn root(options: ScopeOptions, ambient: Arc<dyn AmbientSource>) -> ThemeScope {
        let base = match options.theme {
            Some(theme) => theme,
            None => presets::default_theme().clone(),
        };
        let config = ModeConfig {
            mode: options.color_mode.unwrap_or_default(),
            day_scheme: options.day_scheme,
            night_scheme: options.night_scheme,
        };
        Self::build(base, config, ambient)
    }

    /// Outermost scope with the built-in defaults and a one-shot probe of
    /// the OS preference.
    pub fn with_defaults() -> ThemeScope {
        Self::root(ScopeOptions::default(), Arc::new(SystemAmbient::snapshot()))
    }

    /// Nested scope inheriting every unspecified input from `self`.
    pub fn nested(&self, options: ScopeOptions) -> ThemeScope {
        let base = self.inner.base.merge_opt(options.theme.as_ref());
        let state = &self.inner.state;
        let config = ModeConfig {
            mode: options.color_mode.unwrap_or_else(|| state.mode()),
            day_scheme: options.day_scheme.or_else(|| state.day_scheme()),
            night_scheme: options.night_scheme.or_else(|| state.night_scheme()),
        };
        Self::build(base, config, Arc::clone(&self.inner.ambient))
    }

    fn build(base: Theme, config: ModeConfig, ambient: Arc<dyn AmbientSource>) -> ThemeScope {
        let state = ColorModeState::new(config, &ambient);
        ThemeScope {
            inner: Arc::new(ScopeInner {
                base,
                state,
                ambient,
                resolved: Mutex::new(FxHashMap::default()),
            }),
        }
    }

    /// The unresolved theme chain this scope passes to descendants.
    pub fn base_theme(&self) -> &Theme {
        &self.inner.base
    }

    /// Fully resolved theme for the machine's current scheme.
    pub fn resolved_theme(&self) -> Theme {
        self.resolve(&self.inner.state.scheme_name())
    }

    pub fn color_mode(&self) -> ColorMode {
        self.inner.state.mode()
    }

    pub fn polarity(&self) -> Polarity {
        self.inner.state.polarity()
    }

    pub fn scheme_name(&self) -> String {
        self.inner.state.scheme_name()
    }

    /// Replace the mode on this scope's machine, the nearest machine for
    /// any consumer of this scope. Re-derivation is synchronous.
    pub fn set_color_mode(&self, mode: ColorMode) {
        self.inner.state.set_mode(mode);
    }

    /// Coherent snapshot for consumers.
    pub fn context(&self) -> ThemeContext {
        let snapshot = self.inner.state.snapshot();
        let resolved_theme = self.resolve(&snapshot.scheme_name);
        ThemeContext {
            resolved_theme,
            color_mode: snapshot.mode,
            polarity: snapshot.polarity,
            scheme_name: snapshot.scheme_name,
            setter: self.inner.state.setter(),
        }
    }

    /// Register a listener invoked after every observable change of this
    /// scope's derived outputs.
    pub fn on_change(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.inner.state.on_change(listener)
    }

    fn resolve(&self, scheme: &str) -> Theme {
        let mut memo = self.inner.resolved.lock().unwrap();
        if let Some(resolved) = memo.get(scheme) {
            return resolved.clone();
        }
        let resolved = self.inner.base.resolve_scheme(scheme);
        memo.insert(scheme.to_string(), resolved.clone());
        resolved
    }
}

impl fmt::Debug for ThemeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeScope")
            .field("color_mode", &self.color_mode())
            .field("scheme_name", &self.scheme_name())
            .finish_non_exhaustive()
    }
}

/// Snapshot handed to consumers: the resolved theme, the mode and its
/// concrete polarity, and the setter targeting the nearest machine.
///
/// Snapshots are internally consistent: mode, polarity, scheme, and
/// resolved theme all derive from one state observation.
#[derive(Clone)]
pub struct ThemeContext {
    resolved_theme: Theme,
    color_mode: ColorMode,
    polarity: Polarity,
    scheme_name: String,
    setter: ColorModeSetter,
}

impl ThemeContext {
    pub fn resolved_theme(&self) -> &Theme {
        &self.resolved_theme
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }

    /// Mutate the nearest machine; the next snapshot observes the change.
    pub fn set_color_mode(&self, mode: ColorMode) {
        self.setter.set(mode);
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("color_mode", &self.color_mode)
            .field("polarity", &self.polarity)
            .field("scheme_name", &self.scheme_name)
            .finish_non_exhaustive()
    }
}
