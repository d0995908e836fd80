// Core layer - shared types, configuration and storage
pub mod core;

// Features layer - catalog, suggestion and role state
pub mod features;

// Application layer
pub mod commands;

pub use crate::core::Config;

pub use features::{
    CatalogListener, CatalogManager, RoleRegistry, RoleSeeds, RoleSet, SuggestionCache,
    SuggestionCacheEntry,
};

pub use commands::{CommandContext, CommandRegistry};
