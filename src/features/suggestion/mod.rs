//! # Feature: Food Suggestion
//!
//! Picks a random food from the catalog and keeps it for 12 hours so the
//! whole channel sees the same answer.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Clear the cached suggestion when its food leaves the catalog
//! - 1.0.0: Initial release

pub mod cache;

pub use cache::{SuggestionCache, SuggestionCacheEntry, SUGGESTION_TTL_HOURS};
