//! Food catalog backed by a newline-delimited text file
//!
//! Items are stored unordered but always shown sorted, and index-based removal
//! addresses that sorted view. Removing by index rewrites the file in sorted
//! order.

use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::store::{self, SharedStore};
use crate::core::Outcome;

/// How many near-miss candidates a failed removal suggests
pub const MAX_REMOVE_SUGGESTIONS: usize = 5;

pub const EMPTY_CATALOG_MESSAGE: &str =
    "🍽️ The food list is empty. Add something with /addfood!";

/// Receives catalog change events
pub trait CatalogListener: Send + Sync {
    /// Called after `removed` items were deleted and the file was rewritten
    fn on_items_removed(&self, removed: &[String]) -> anyhow::Result<()>;
}

pub struct CatalogManager {
    store: SharedStore,
    path: PathBuf,
    listeners: Vec<Arc<dyn CatalogListener>>,
}

impl CatalogManager {
    pub fn new(store: SharedStore, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for removal events
    pub fn subscribe(&mut self, listener: Arc<dyn CatalogListener>) {
        self.listeners.push(listener);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All items in file order. Duplicates are kept.
    pub fn load_all(&self) -> Vec<String> {
        store::load_lines(self.store.as_ref(), &self.path)
    }

    /// All items in display order
    pub fn sorted(&self) -> Vec<String> {
        let mut items = self.load_all();
        items.sort();
        items
    }

    /// Add an item. Returns `false` without touching the file when the
    /// trimmed text is empty, spans several lines, is already present
    /// (case-sensitive), or the append fails.
    pub fn add(&self, text: &str) -> bool {
        let item = text.trim();
        if item.is_empty() {
            return false;
        }

        // One item per line in the catalog file
        if item.contains(['\n', '\r']) {
            debug!("Rejected multi-line catalog item {item:?}");
            return false;
        }

        if self.load_all().iter().any(|existing| existing == item) {
            debug!("'{item}' is already in the catalog");
            return false;
        }

        match store::append_line(self.store.as_ref(), &self.path, item) {
            Ok(()) => {
                info!("Added '{item}' to the catalog");
                true
            }
            Err(e) => {
                error!("Failed to add '{item}' to {}: {e:#}", self.path.display());
                false
            }
        }
    }

    /// Remove the item at a 1-based position in the sorted list
    pub fn remove_by_index(&self, index: i64) -> Outcome {
        let mut items = self.sorted();
        if items.is_empty() {
            return Outcome::fail(EMPTY_CATALOG_MESSAGE);
        }

        let count = items.len();
        if index < 1 || index as usize > count {
            return Outcome::fail(format!(
                "❌ Invalid number {index}. Please choose a number between 1 and {count}."
            ));
        }

        let removed = items.remove(index as usize - 1);
        if let Err(outcome) = self.rewrite(&items) {
            return outcome;
        }

        info!("Removed catalog item #{index} '{removed}'");
        self.notify_removed(std::slice::from_ref(&removed));
        Outcome::ok(format!("✅ Removed #{index}: '{removed}'"))
    }

    /// Remove every item that case-insensitively equals `text`.
    ///
    /// With no exact match nothing is removed; items containing `text` are
    /// offered as suggestions instead.
    pub fn remove_by_value(&self, text: &str) -> Outcome {
        let needle = text.trim();
        if needle.is_empty() {
            return Outcome::fail("❌ Please tell me which food to remove.");
        }
        let needle_lower = needle.to_lowercase();

        let items = self.load_all();
        let (removed, remaining): (Vec<String>, Vec<String>) = items
            .into_iter()
            .partition(|item| item.to_lowercase() == needle_lower);

        if removed.is_empty() {
            return Self::suggest_candidates(needle, &needle_lower, &remaining);
        }

        if let Err(outcome) = self.rewrite(&remaining) {
            return outcome;
        }

        info!("Removed {} catalog item(s) matching '{needle}'", removed.len());
        self.notify_removed(&removed);

        if removed.len() == 1 {
            Outcome::ok(format!("✅ Removed '{}' from the food list.", removed[0]))
        } else {
            Outcome::ok(format!(
                "✅ Removed {} entries matching '{needle}' from the food list.",
                removed.len()
            ))
        }
    }

    /// Remove by position when `selector` is a number, by value otherwise
    pub fn remove(&self, selector: &str) -> Outcome {
        let selector = selector.trim();
        if !selector.is_empty() && selector.chars().all(|c| c.is_ascii_digit()) {
            match selector.parse::<i64>() {
                Ok(index) => self.remove_by_index(index),
                Err(_) => Outcome::fail(format!("❌ {selector} is not a valid number.")),
            }
        } else {
            self.remove_by_value(selector)
        }
    }

    /// Sorted items as a numbered or bulleted block
    pub fn list_formatted(&self, numbered: bool) -> String {
        let items = self.sorted();
        if items.is_empty() {
            return EMPTY_CATALOG_MESSAGE.to_string();
        }

        let mut text = format!("🍽️ **Food list** ({} items)\n", items.len());
        for (i, item) in items.iter().enumerate() {
            if numbered {
                text.push_str(&format!("{}. {item}\n", i + 1));
            } else {
                text.push_str(&format!("• {item}\n"));
            }
        }
        text.trim_end().to_string()
    }

    fn suggest_candidates(needle: &str, needle_lower: &str, items: &[String]) -> Outcome {
        let mut candidates: Vec<&String> = items
            .iter()
            .filter(|item| item.to_lowercase().contains(needle_lower))
            .collect();
        candidates.sort();
        candidates.dedup();

        if candidates.is_empty() {
            return Outcome::fail(format!("❌ '{needle}' is not in the food list."));
        }

        let mut message = format!("❌ '{needle}' is not in the food list. Did you mean:");
        for candidate in candidates.iter().take(MAX_REMOVE_SUGGESTIONS) {
            message.push_str(&format!("\n• {candidate}"));
        }
        if candidates.len() > MAX_REMOVE_SUGGESTIONS {
            message.push_str(&format!(
                "\n…and {} more",
                candidates.len() - MAX_REMOVE_SUGGESTIONS
            ));
        }
        Outcome::fail(message)
    }

    fn rewrite(&self, items: &[String]) -> Result<(), Outcome> {
        store::save_lines(self.store.as_ref(), &self.path, items).map_err(|e| {
            error!("Failed to rewrite {}: {e:#}", self.path.display());
            Outcome::fail("❌ Could not save the food list. Please try again.")
        })
    }

    fn notify_removed(&self, removed: &[String]) {
        for listener in &self.listeners {
            if let Err(e) = listener.on_items_removed(removed) {
                warn!("Catalog listener failed after removal: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{DocumentStore, MemoryStore};
    use anyhow::anyhow;
    use std::sync::Mutex;

    const PATH: &str = "data/foods.txt";

    fn catalog_with(items: &[&str]) -> (Arc<MemoryStore>, CatalogManager) {
        let store = MemoryStore::shared();
        let contents: String = items.iter().map(|i| format!("{i}\n")).collect();
        store.write(Path::new(PATH), &contents).unwrap();
        let shared: SharedStore = store.clone();
        (store, CatalogManager::new(shared, PATH))
    }

    #[derive(Default)]
    struct RecordingListener {
        removed: Mutex<Vec<String>>,
    }

    impl CatalogListener for RecordingListener {
        fn on_items_removed(&self, removed: &[String]) -> anyhow::Result<()> {
            self.removed.lock().unwrap().extend_from_slice(removed);
            Ok(())
        }
    }

    struct FailingListener;

    impl CatalogListener for FailingListener {
        fn on_items_removed(&self, _removed: &[String]) -> anyhow::Result<()> {
            Err(anyhow!("listener exploded"))
        }
    }

    /// Reads succeed, every write fails
    struct ReadOnlyStore(MemoryStore);

    impl DocumentStore for ReadOnlyStore {
        fn read(&self, path: &Path) -> anyhow::Result<Option<String>> {
            self.0.read(path)
        }
        fn write(&self, _path: &Path, _contents: &str) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
        fn append(&self, _path: &Path, _contents: &str) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
        fn remove(&self, _path: &Path) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
    }

    #[test]
    fn test_load_all_missing_file_is_empty() {
        let catalog = CatalogManager::new(MemoryStore::shared(), PATH);
        assert!(catalog.load_all().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let (_, catalog) = catalog_with(&[]);
        assert!(catalog.add("Pho"));
        assert!(!catalog.add("Pho"));
        assert!(!catalog.add("  Pho  "));
        assert_eq!(catalog.load_all(), vec!["Pho"]);
    }

    #[test]
    fn test_add_is_case_sensitive() {
        let (_, catalog) = catalog_with(&["Pho"]);
        assert!(catalog.add("pho"));
        assert_eq!(catalog.load_all(), vec!["Pho", "pho"]);
    }

    #[test]
    fn test_add_rejects_blank() {
        let (_, catalog) = catalog_with(&[]);
        assert!(!catalog.add("   "));
        assert!(catalog.load_all().is_empty());
    }

    #[test]
    fn test_add_rejects_line_breaks() {
        let (_, catalog) = catalog_with(&["Pho"]);
        assert!(!catalog.add("Pho\nRamen"));
        assert!(!catalog.add("Curry\r\nUdon"));
        assert_eq!(catalog.load_all(), vec!["Pho"]);
    }

    #[test]
    fn test_add_returns_false_on_write_failure() {
        let store: SharedStore = Arc::new(ReadOnlyStore(MemoryStore::new()));
        let catalog = CatalogManager::new(store, PATH);
        assert!(!catalog.add("Pho"));
    }

    #[test]
    fn test_remove_by_index_addresses_sorted_order() {
        let (_, catalog) = catalog_with(&["E", "C", "A", "D", "B"]);

        let first = catalog.remove_by_index(1);
        assert!(first.success);
        assert!(first.message.contains("'A'"));

        let last = catalog.remove_by_index(4);
        assert!(last.success);
        assert!(last.message.contains("'E'"));

        assert_eq!(catalog.load_all(), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_remove_by_index_last_of_five() {
        let (_, catalog) = catalog_with(&["A", "B", "C", "D", "E"]);
        let outcome = catalog.remove_by_index(5);
        assert!(outcome.success);
        assert!(outcome.message.contains("'E'"));
    }

    #[test]
    fn test_remove_by_index_out_of_range() {
        let (_, catalog) = catalog_with(&["A", "B", "C", "D", "E"]);

        for index in [0, 6, -1] {
            let outcome = catalog.remove_by_index(index);
            assert!(!outcome.success);
            assert!(outcome.message.contains("between 1 and 5"));
        }
        assert_eq!(catalog.load_all().len(), 5);
    }

    #[test]
    fn test_remove_by_index_empty_catalog() {
        let (_, catalog) = catalog_with(&[]);
        let outcome = catalog.remove_by_index(1);
        assert!(!outcome.success);
        assert_eq!(outcome.message, EMPTY_CATALOG_MESSAGE);
    }

    #[test]
    fn test_remove_by_index_rewrites_sorted() {
        let (store, catalog) = catalog_with(&["Tacos", "Pho", "Ramen", "Curry"]);
        catalog.remove_by_index(2);
        assert_eq!(
            store.read(Path::new(PATH)).unwrap().unwrap(),
            "Curry\nRamen\nTacos\n"
        );
    }

    #[test]
    fn test_remove_by_value_case_insensitive() {
        let (_, catalog) = catalog_with(&["Pho", "Ramen"]);
        let outcome = catalog.remove_by_value("pho");
        assert!(outcome.success);
        assert_eq!(outcome.message, "✅ Removed 'Pho' from the food list.");
        assert_eq!(catalog.load_all(), vec!["Ramen"]);
    }

    #[test]
    fn test_remove_by_value_removes_all_matches() {
        let (_, catalog) = catalog_with(&["Pho", "Ramen", "PHO", "pho"]);
        let outcome = catalog.remove_by_value("Pho");
        assert!(outcome.success);
        assert!(outcome.message.contains("Removed 3 entries"));
        assert_eq!(catalog.load_all(), vec!["Ramen"]);
    }

    #[test]
    fn test_remove_by_value_suggests_substring_matches() {
        let (_, catalog) = catalog_with(&["Beef Pho", "Chicken Pho", "Ramen"]);
        let outcome = catalog.remove_by_value("pho");
        assert!(!outcome.success);
        assert!(outcome.message.contains("Did you mean"));
        assert!(outcome.message.contains("• Beef Pho"));
        assert!(outcome.message.contains("• Chicken Pho"));
        assert!(!outcome.message.contains("more"));
        assert_eq!(catalog.load_all().len(), 3);
    }

    #[test]
    fn test_remove_by_value_caps_suggestions() {
        let items = [
            "Pho 1", "Pho 2", "Pho 3", "Pho 4", "Pho 5", "Pho 6", "Pho 7",
        ];
        let (_, catalog) = catalog_with(&items);
        let outcome = catalog.remove_by_value("pho");
        assert!(!outcome.success);
        assert_eq!(outcome.message.matches('•').count(), MAX_REMOVE_SUGGESTIONS);
        assert!(outcome.message.ends_with("…and 2 more"));
    }

    #[test]
    fn test_remove_by_value_not_found() {
        let (_, catalog) = catalog_with(&["Ramen"]);
        let outcome = catalog.remove_by_value("Sushi");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "❌ 'Sushi' is not in the food list.");
    }

    #[test]
    fn test_remove_selector_dispatch() {
        let (_, catalog) = catalog_with(&["Curry", "Pho", "Ramen"]);
        assert!(catalog.remove("2").message.contains("'Pho'"));
        assert!(catalog.remove("ramen").success);
        assert_eq!(catalog.load_all(), vec!["Curry"]);
    }

    #[test]
    fn test_removal_notifies_listeners() {
        let (_, mut catalog) = catalog_with(&["Curry", "Pho"]);
        let listener = Arc::new(RecordingListener::default());
        catalog.subscribe(listener.clone());
        catalog.subscribe(Arc::new(FailingListener));

        assert!(catalog.remove_by_value("PHO").success);
        assert!(catalog.remove_by_index(1).success);
        assert_eq!(*listener.removed.lock().unwrap(), vec!["Pho", "Curry"]);
    }

    #[test]
    fn test_failed_removal_does_not_notify() {
        let (_, mut catalog) = catalog_with(&["Curry"]);
        let listener = Arc::new(RecordingListener::default());
        catalog.subscribe(listener.clone());

        catalog.remove_by_index(3);
        catalog.remove_by_value("Pho");
        assert!(listener.removed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_remove_reports_write_failure() {
        let inner = MemoryStore::new();
        inner.write(Path::new(PATH), "Pho\n").unwrap();
        let catalog = CatalogManager::new(Arc::new(ReadOnlyStore(inner)), PATH);

        let outcome = catalog.remove_by_value("Pho");
        assert!(!outcome.success);
        assert!(outcome.message.contains("Could not save"));
    }

    #[test]
    fn test_list_formatted() {
        let (_, catalog) = catalog_with(&["Ramen", "Curry"]);
        assert_eq!(
            catalog.list_formatted(true),
            "🍽️ **Food list** (2 items)\n1. Curry\n2. Ramen"
        );
        assert_eq!(
            catalog.list_formatted(false),
            "🍽️ **Food list** (2 items)\n• Curry\n• Ramen"
        );
    }

    #[test]
    fn test_list_formatted_empty() {
        let (_, catalog) = catalog_with(&[]);
        assert_eq!(catalog.list_formatted(true), EMPTY_CATALOG_MESSAGE);
    }
}
