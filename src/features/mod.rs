//! # Features
//!
//! Bot state: the food catalog, the cached suggestion and the role lists.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add roles feature
//! - 1.0.0: Initial release with catalog and suggestion features

pub mod catalog;
pub mod roles;
pub mod suggestion;

pub use catalog::{CatalogListener, CatalogManager};
pub use roles::{RoleRegistry, RoleSeeds, RoleSet};
pub use suggestion::{SuggestionCache, SuggestionCacheEntry};

/// Crate version shown to users
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
