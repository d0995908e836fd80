//! # Feature: Role Registry
//!
//! Admin and restricted user lists. Admins manage the catalog and other users;
//! restricted users are ignored by the bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Keep the two lists mutually exclusive on every update
//! - 1.0.0: Initial release with built-in admins and legacy restricted list

pub mod registry;

pub use registry::{normalize_username, RoleRegistry, RoleSeeds, RoleSet};
