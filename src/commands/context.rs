//! Shared context for command handlers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Subscribe the suggestion cache to catalog removals
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::core::{SharedStore, StatePaths};
use crate::features::catalog::CatalogManager;
use crate::features::roles::{RoleRegistry, RoleSeeds, RoleSet};
use crate::features::suggestion::SuggestionCache;

/// Shared state for all command handlers
///
/// Owns the three state managers. Each component reads and writes its own
/// files, so no locking happens between them; the transport serializes
/// commands.
pub struct CommandContext {
    pub catalog: CatalogManager,
    pub suggestions: Arc<SuggestionCache>,
    pub roles: RoleRegistry,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(store: SharedStore, paths: &StatePaths, seeds: RoleSeeds) -> Self {
        let suggestions = Arc::new(SuggestionCache::new(
            store.clone(),
            paths.suggestion_cache.clone(),
        ));

        let mut catalog = CatalogManager::new(store.clone(), paths.catalog.clone());
        catalog.subscribe(suggestions.clone());

        let roles = RoleRegistry::new(
            store,
            paths.privileged.clone(),
            paths.restricted.clone(),
            seeds,
        );

        Self {
            catalog,
            suggestions,
            roles,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn is_admin(&self, username: &str) -> bool {
        self.roles.is_member(RoleSet::Privileged, username)
    }

    pub fn is_restricted(&self, username: &str) -> bool {
        self.roles.is_member(RoleSet::Restricted, username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStore;

    fn context() -> CommandContext {
        CommandContext::new(
            MemoryStore::shared(),
            &StatePaths::in_dir("data"),
            RoleSeeds::new(vec!["owner".to_string()], vec!["troll".to_string()]),
        )
    }

    #[test]
    fn test_role_checks() {
        let ctx = context();
        assert!(ctx.is_admin("@Owner"));
        assert!(!ctx.is_admin("troll"));
        assert!(ctx.is_restricted("troll"));
        assert!(!ctx.is_restricted("owner"));
    }

    #[test]
    fn test_catalog_removal_clears_suggestion() {
        let ctx = context();
        assert!(ctx.catalog.add("Pho"));
        assert_eq!(
            ctx.suggestions.get_or_select(&ctx.catalog, false).as_deref(),
            Some("Pho")
        );

        assert!(ctx.catalog.remove_by_index(1).success);
        assert!(ctx.suggestions.current().is_none());
    }
}
