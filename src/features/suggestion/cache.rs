//! Cached random food suggestion
//!
//! One suggestion is remembered for [`SUGGESTION_TTL_HOURS`]; asking again
//! inside that window returns the same food. A forced refresh or an explicit
//! clear starts over.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::store::{self, SharedStore};
use crate::features::catalog::{CatalogListener, CatalogManager};

pub const SUGGESTION_TTL_HOURS: i64 = 12;

/// The single persisted suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCacheEntry {
    pub food: String,
    pub timestamp: DateTime<Utc>,
}

impl SuggestionCacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.timestamp < ttl
    }

    /// Time left before the entry goes stale, zero when already stale
    pub fn remaining(&self, now: DateTime<Utc>, ttl: Duration) -> Duration {
        let left = ttl - (now - self.timestamp);
        if left < Duration::zero() {
            Duration::zero()
        } else {
            left
        }
    }
}

pub struct SuggestionCache {
    store: SharedStore,
    path: PathBuf,
    ttl: Duration,
}

impl SuggestionCache {
    pub fn new(store: SharedStore, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
            ttl: Duration::hours(SUGGESTION_TTL_HOURS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored entry, fresh or not. Malformed files read as no entry.
    pub fn current(&self) -> Option<SuggestionCacheEntry> {
        store::load_json(self.store.as_ref(), &self.path)
    }

    /// Cached suggestion if still fresh, otherwise a new random pick
    pub fn get_or_select(&self, catalog: &CatalogManager, force_new: bool) -> Option<String> {
        self.get_or_select_at(catalog, force_new, Utc::now())
    }

    /// Same as [`get_or_select`](Self::get_or_select) with an explicit clock
    pub fn get_or_select_at(
        &self,
        catalog: &CatalogManager,
        force_new: bool,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if !force_new {
            if let Some(entry) = self.current() {
                if entry.is_fresh(now, self.ttl) {
                    debug!("Serving cached suggestion '{}'", entry.food);
                    return Some(entry.food);
                }
                debug!("Cached suggestion '{}' is stale", entry.food);
            }
        }

        let items = catalog.load_all();
        let food = items.choose(&mut rand::rng())?.clone();

        let entry = SuggestionCacheEntry {
            food: food.clone(),
            timestamp: now,
        };
        if let Err(e) = store::save_json(self.store.as_ref(), &self.path, &entry) {
            error!("Failed to persist suggestion cache: {e:#}");
        }

        info!("Selected new suggestion '{food}' from {} items", items.len());
        Some(food)
    }

    /// Forget the cached suggestion. Clearing an empty cache is a no-op.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.path)?;
        debug!("Suggestion cache cleared");
        Ok(())
    }
}

impl CatalogListener for SuggestionCache {
    fn on_items_removed(&self, removed: &[String]) -> Result<()> {
        let Some(entry) = self.current() else {
            return Ok(());
        };

        let cached = entry.food.to_lowercase();
        if removed.iter().any(|item| item.to_lowercase() == cached) {
            info!("Cached suggestion '{}' was removed from the catalog", entry.food);
            self.clear()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{DocumentStore, MemoryStore};
    use std::sync::Arc;

    const CATALOG: &str = "foods.txt";
    const CACHE: &str = "suggestion_cache.json";

    fn setup(items: &[&str]) -> (Arc<MemoryStore>, CatalogManager, Arc<SuggestionCache>) {
        let store = MemoryStore::shared();
        let contents: String = items.iter().map(|i| format!("{i}\n")).collect();
        store.write(Path::new(CATALOG), &contents).unwrap();

        let cache = Arc::new(SuggestionCache::new(store.clone(), CACHE));
        let mut catalog = CatalogManager::new(store.clone(), CATALOG);
        catalog.subscribe(cache.clone());
        (store, catalog, cache)
    }

    fn at(hours: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::hours(hours)
    }

    #[test]
    fn test_empty_catalog_yields_none() {
        let (store, catalog, cache) = setup(&[]);
        assert_eq!(cache.get_or_select_at(&catalog, false, at(0)), None);
        assert!(!store.exists(Path::new(CACHE)));
    }

    #[test]
    fn test_same_suggestion_within_ttl() {
        let items: Vec<String> = (0..50).map(|i| format!("Dish {i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let (_, catalog, cache) = setup(&refs);

        let first = cache.get_or_select_at(&catalog, false, at(0)).unwrap();
        let second = cache.get_or_select_at(&catalog, false, at(11)).unwrap();
        assert_eq!(first, second);
        assert!(items.contains(&first));
    }

    #[test]
    fn test_cached_value_served_without_catalog() {
        let (store, catalog, cache) = setup(&["Pho"]);
        assert_eq!(cache.get_or_select_at(&catalog, false, at(0)).as_deref(), Some("Pho"));

        // Catalog edited behind our back: the cached value still wins
        store.write(Path::new(CATALOG), "Ramen\n").unwrap();
        assert_eq!(cache.get_or_select_at(&catalog, false, at(1)).as_deref(), Some("Pho"));
    }

    #[test]
    fn test_stale_entry_reselects() {
        let (store, catalog, cache) = setup(&["Pho"]);
        cache.get_or_select_at(&catalog, false, at(0));

        store.write(Path::new(CATALOG), "Ramen\n").unwrap();
        assert_eq!(cache.get_or_select_at(&catalog, false, at(12)).as_deref(), Some("Ramen"));
        assert_eq!(cache.current().unwrap().timestamp, at(12));
    }

    #[test]
    fn test_force_new_resets_window() {
        let (store, catalog, cache) = setup(&["Pho"]);
        cache.get_or_select_at(&catalog, false, at(0));

        store.write(Path::new(CATALOG), "Ramen\n").unwrap();
        assert_eq!(cache.get_or_select_at(&catalog, true, at(5)).as_deref(), Some("Ramen"));

        let entry = cache.current().unwrap();
        assert_eq!(entry.timestamp, at(5));
        assert!(entry.is_fresh(at(16), cache.ttl()));
        assert!(!entry.is_fresh(at(17), cache.ttl()));
    }

    #[test]
    fn test_corrupted_cache_behaves_as_absent() {
        let (store, catalog, cache) = setup(&["Pho"]);
        store.write(Path::new(CACHE), "{\"food\": 42, oops").unwrap();

        assert_eq!(cache.current(), None);
        assert_eq!(cache.get_or_select_at(&catalog, false, at(0)).as_deref(), Some("Pho"));
        assert_eq!(cache.current().unwrap().food, "Pho");
    }

    #[test]
    fn test_cache_file_format() {
        let (store, catalog, cache) = setup(&["Pho"]);
        cache.get_or_select_at(&catalog, false, at(0));

        let raw = store.read(Path::new(CACHE)).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["food"], "Pho");
        assert_eq!(value["timestamp"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_, catalog, cache) = setup(&["Pho"]);
        cache.get_or_select_at(&catalog, false, at(0));

        cache.clear().unwrap();
        assert!(cache.current().is_none());
        cache.clear().unwrap();
    }

    #[test]
    fn test_removing_cached_item_clears_cache() {
        let (_, catalog, cache) = setup(&["Pho", "Ramen"]);
        let food = cache.get_or_select_at(&catalog, true, at(0)).unwrap();

        assert!(catalog.remove_by_value(&food.to_uppercase()).success);
        assert!(cache.current().is_none());
    }

    #[test]
    fn test_removing_other_item_keeps_cache() {
        let (_, catalog, cache) = setup(&["Pho", "Ramen"]);
        let food = cache.get_or_select_at(&catalog, true, at(0)).unwrap();
        let other = if food == "Pho" { "Ramen" } else { "Pho" };

        assert!(catalog.remove_by_value(other).success);
        assert_eq!(cache.current().unwrap().food, food);
    }

    #[test]
    fn test_remove_by_index_clears_cached_item() {
        let (_, catalog, cache) = setup(&["Ramen", "Pho"]);
        let food = cache.get_or_select_at(&catalog, true, at(0)).unwrap();
        let index = if food == "Pho" { 1 } else { 2 };

        assert!(catalog.remove_by_index(index).success);
        assert!(cache.current().is_none());
    }

    #[test]
    fn test_remaining() {
        let entry = SuggestionCacheEntry {
            food: "Pho".to_string(),
            timestamp: at(0),
        };
        let ttl = Duration::hours(SUGGESTION_TTL_HOURS);
        assert_eq!(entry.remaining(at(2), ttl), Duration::hours(10));
        assert_eq!(entry.remaining(at(20), ttl), Duration::zero());
    }
}
