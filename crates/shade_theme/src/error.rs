//! Error types

use thiserror::Error;

/// Errors surfaced at the theming configuration boundary.
///
/// Resolution itself is total: unknown scheme names fall back to the base
/// theme and an undeterminable ambient signal defaults to day. Only
/// malformed configuration is rejected.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A color mode outside the `day`/`night`/`auto` set was supplied.
    #[error("invalid color mode `{value}`, expected `day`, `night`, or `auto`")]
    InvalidColorMode { value: String },

    /// A theme or scope-options document failed to parse.
    #[error("malformed theme document: {0}")]
    Parse(#[from] toml::de::Error),
}
