//! Theme model and scheme resolution
//!
//! A [`Theme`] is a nested design-token configuration. The reserved
//! top-level key [`SCHEME_TABLE_KEY`] may hold a table of named partial
//! themes (`"light"`, `"dark"`, `"dark_dimmed"`, ...); resolving a scheme
//! merges the named partial onto the base and strips the table, producing
//! a fully concrete theme for consumers.
//!
//! Themes are immutable values: merging and resolving always return new
//! themes.

use crate::error::ThemeError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shade_core::path;
use shade_core::value::{merge_maps, TokenMap, TokenValue};

/// Reserved top-level key holding the scheme table.
pub const SCHEME_TABLE_KEY: &str = "color_schemes";

/// A nested design-token configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    tokens: TokenMap,
}

impl Theme {
    /// An empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing token mapping.
    pub fn from_map(tokens: TokenMap) -> Self {
        Self { tokens }
    }

    /// Parse a TOML theme document.
    pub fn from_toml_str(source: &str) -> Result<Self, ThemeError> {
        Ok(Self {
            tokens: toml::from_str(source)?,
        })
    }

    /// The underlying token mapping.
    pub fn tokens(&self) -> &TokenMap {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Deep-merge `overlay` onto this theme.
    pub fn merge(&self, overlay: &Theme) -> Theme {
        Theme {
            tokens: merge_maps(&self.tokens, &overlay.tokens),
        }
    }

    /// Deep-merge an optional overlay; `None` returns the base unchanged.
    pub fn merge_opt(&self, overlay: Option<&Theme>) -> Theme {
        match overlay {
            Some(overlay) => self.merge(overlay),
            None => self.clone(),
        }
    }

    fn scheme_table(&self) -> Option<&TokenMap> {
        self.tokens.get(SCHEME_TABLE_KEY)?.as_mapping()
    }

    /// Scheme names declared by this theme, in declaration order.
    pub fn scheme_names(&self) -> Vec<&str> {
        self.scheme_table()
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.scheme_table()
            .is_some_and(|table| table.contains_key(scheme))
    }

    /// Produce the effective theme for `scheme`.
    ///
    /// Unknown scheme names (or a theme without scheme support at all)
    /// fall back to the base theme unchanged. On a hit, the named partial
    /// is merged onto the base and the scheme table is stripped from the
    /// result.
    pub fn resolve_scheme(&self, scheme: &str) -> Theme {
        let partial = self
            .scheme_table()
            .and_then(|table| table.get(scheme))
            .and_then(TokenValue::as_mapping);
        let Some(partial) = partial else {
            return self.clone();
        };

        let mut base = self.tokens.clone();
        base.shift_remove(SCHEME_TABLE_KEY);
        tracing::trace!(scheme, "resolved color scheme");
        Theme {
            tokens: merge_maps(&base, partial),
        }
    }

    /// Dotted-path token lookup, e.g. `theme.get("colors.text")`.
    pub fn get(&self, path: &str) -> Option<&TokenValue> {
        path::lookup(&self.tokens, path)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_f64()
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// Flatten scalar leaves into `dotted-path -> display string` pairs,
    /// skipping the scheme table.
    ///
    /// This is the bridge to style-attribute mappers that want a flat
    /// variable map rather than tree lookups.
    pub fn to_variable_map(&self) -> IndexMap<String, String> {
        let mut variables = IndexMap::new();
        for (key, value) in &self.tokens {
            if key == SCHEME_TABLE_KEY {
                continue;
            }
            path::flatten_value(key, value, &mut variables);
        }
        variables
    }
}
