//! Shade Core Primitives
//!
//! This crate provides the foundational primitives for the Shade theming
//! system:
//!
//! - **Token value trees**: Arbitrarily nested design-token configurations
//! - **Structural merge**: Total, side-effect-free deep merging of trees
//! - **Change notification**: Listener registries with RAII subscriptions
//!
//! # Example
//!
//! ```rust
//! use shade_core::value::{merge, TokenValue};
//!
//! let base: TokenValue = serde_json::from_str(r#"{"colors": {"text": "black"}}"#).unwrap();
//! let overlay: TokenValue = serde_json::from_str(r#"{"colors": {"canvas": "white"}}"#).unwrap();
//!
//! let merged = merge(&base, &overlay);
//! assert_eq!(
//!     merged.as_mapping().unwrap()["colors"].as_mapping().unwrap().len(),
//!     2
//! );
//! ```

pub mod notify;
pub mod path;
pub mod value;

pub use notify::{ListenerId, ListenerSet, Subscription};
pub use value::{merge, merge_maps, TokenMap, TokenValue};
