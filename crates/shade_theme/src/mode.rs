//! Color modes and polarities

use crate::error::ThemeError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// User-facing day/night/auto intent.
///
/// `Auto` follows the ambient preference signal. It is an input-only
/// value: derivation always collapses it to a concrete [`Polarity`]
/// before anything renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Day,
    Night,
    Auto,
}

impl ColorMode {
    /// Stable id for config/serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::Auto => "auto",
        }
    }

    /// Collapse to a concrete polarity against the ambient signal.
    pub fn resolve(self, ambient_prefers_dark: bool) -> Polarity {
        match self {
            Self::Day => Polarity::Day,
            Self::Night => Polarity::Night,
            Self::Auto => {
                if ambient_prefers_dark {
                    Polarity::Night
                } else {
                    Polarity::Day
                }
            }
        }
    }
}

impl FromStr for ColorMode {
    type Err = ThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            "auto" => Ok(Self::Auto),
            other => Err(ThemeError::InvalidColorMode {
                value: other.to_string(),
            }),
        }
    }
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete day/night polarity after collapsing `auto`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Day,
    Night,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    /// Scheme name used when no per-polarity override is configured.
    pub fn default_scheme(self) -> &'static str {
        match self {
            Self::Day => "light",
            Self::Night => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_enumerated_set_only() {
        assert_eq!("day".parse::<ColorMode>().unwrap(), ColorMode::Day);
        assert_eq!("night".parse::<ColorMode>().unwrap(), ColorMode::Night);
        assert_eq!("auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);

        let err = "dusk".parse::<ColorMode>().unwrap_err();
        assert!(err.to_string().contains("dusk"));
    }

    #[test]
    fn explicit_modes_ignore_the_ambient_signal() {
        for ambient in [false, true] {
            assert_eq!(ColorMode::Day.resolve(ambient), Polarity::Day);
            assert_eq!(ColorMode::Night.resolve(ambient), Polarity::Night);
        }
    }

    #[test]
    fn auto_tracks_the_ambient_signal_exactly() {
        assert_eq!(ColorMode::Auto.resolve(false), Polarity::Day);
        assert_eq!(ColorMode::Auto.resolve(true), Polarity::Night);
    }

    #[test]
    fn default_schemes_per_polarity() {
        assert_eq!(Polarity::Day.default_scheme(), "light");
        assert_eq!(Polarity::Night.default_scheme(), "dark");
    }
}
