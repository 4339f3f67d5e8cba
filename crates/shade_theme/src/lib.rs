//! Shade Theme System
//!
//! Theme resolution and color-mode state for nested component scopes.
//!
//! # Overview
//!
//! The theme system provides:
//! - **Themes**: nested design-token configurations with named color
//!   schemes (`light`, `dark`, `dark_dimmed`, ...)
//! - **Color modes**: day / night / auto intent collapsed to a concrete
//!   polarity against the environment's ambient preference
//! - **Scopes**: nested providers that inherit unspecified inputs from
//!   their parent and expose a consistent resolved context
//! - **Ambient sources**: injected dark-preference signals, from fixed
//!   test doubles to a polling OS watcher
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use shade_theme::{ColorMode, ScopeOptions, SimulatedAmbient, ThemeScope};
//!
//! let ambient = SimulatedAmbient::new(false);
//! let scope = ThemeScope::root(
//!     ScopeOptions::new().with_color_mode(ColorMode::Auto),
//!     Arc::new(ambient.clone()),
//! );
//!
//! assert_eq!(scope.scheme_name(), "light");
//!
//! // the environment switches to dark; auto mode follows
//! ambient.set_prefers_dark(true);
//! assert_eq!(scope.scheme_name(), "dark");
//! ```
//!
//! # Architecture
//!
//! Resolution walks a fixed pipeline: the scope merges its override theme
//! onto the inherited chain, the color-mode state machine derives the
//! active scheme name, and the scheme resolver merges that scheme's
//! partial theme onto the base. Consumers receive a [`ThemeContext`]
//! snapshot (resolved theme, mode, polarity, and a setter targeting the
//! nearest machine) that is never torn: everything in it derives from one
//! state observation.
//!
//! Each scope owns its machine and its ambient subscription. Dropping the
//! scope releases the subscription exactly once.

pub mod ambient;
pub mod context;
pub mod error;
pub mod mode;
pub mod platform;
pub mod presets;
pub mod state;
pub mod theme;

#[cfg(feature = "watcher")]
pub mod watcher;

// Re-export commonly used types
pub use ambient::{AmbientSource, FixedAmbient, SimulatedAmbient, SystemAmbient};
pub use context::{ScopeOptions, ThemeContext, ThemeScope};
pub use error::ThemeError;
pub use mode::{ColorMode, Polarity};
pub use platform::detect_system_prefers_dark;
pub use presets::{default_theme, ThemePreset};
pub use state::{ColorModeSetter, ColorModeState, ModeConfig, ModeSnapshot};
pub use theme::{Theme, SCHEME_TABLE_KEY};

#[cfg(feature = "watcher")]
pub use watcher::{SystemWatcher, WatcherConfig};
