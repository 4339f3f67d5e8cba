//! Built-in theme presets
//!
//! Theme data lives in embedded TOML documents and is parsed once per
//! process. The default preset ships `light`, `dark`, and `dark_dimmed`
//! schemes.

use crate::theme::Theme;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Default Shade theme.
    Shade,
    /// High-contrast variant for accessibility-first surfaces.
    Contrast,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Shade => "shade",
            Self::Contrast => "contrast",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Shade => "Shade",
            Self::Contrast => "Contrast",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::Shade, ThemePreset::Contrast];
        &PRESETS
    }

    /// The preset's theme, parsed on first access.
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Shade => {
                static SHADE: OnceLock<Theme> = OnceLock::new();
                cached(&SHADE, include_str!("shade.toml"))
            }
            Self::Contrast => {
                static CONTRAST: OnceLock<Theme> = OnceLock::new();
                cached(&CONTRAST, include_str!("contrast.toml"))
            }
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The built-in default theme, used by outermost scopes that supply none.
pub fn default_theme() -> &'static Theme {
    ThemePreset::Shade.theme()
}

fn cached(slot: &'static OnceLock<Theme>, source: &'static str) -> &'static Theme {
    slot.get_or_init(|| Theme::from_toml_str(source).expect("built-in preset must parse"))
}
