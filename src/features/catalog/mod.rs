//! # Feature: Food Catalog
//!
//! The list of foods the bot can suggest. Admins add and remove entries by
//! name or by their number in the sorted list.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Removal events through `CatalogListener`
//! - 1.1.0: Substring suggestions when a removal finds no exact match
//! - 1.0.0: Initial release

pub mod manager;

pub use manager::{CatalogListener, CatalogManager, EMPTY_CATALOG_MESSAGE};
