//! Admin and restricted user lists
//!
//! Both lists are JSON arrays of normalized usernames. A user is never on
//! both lists: adding to one removes from the other in the same operation,
//! and the opposing list is restored if the second write fails.

use log::{error, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::store::{self, SharedStore};
use crate::core::Outcome;

/// Which of the two role lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleSet {
    Privileged,
    Restricted,
}

impl RoleSet {
    pub fn opposite(self) -> Self {
        match self {
            RoleSet::Privileged => RoleSet::Restricted,
            RoleSet::Restricted => RoleSet::Privileged,
        }
    }

    fn member_phrase(self) -> &'static str {
        match self {
            RoleSet::Privileged => "an admin",
            RoleSet::Restricted => "restricted",
        }
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleSet::Privileged => f.write_str("admins"),
            RoleSet::Restricted => f.write_str("restricted"),
        }
    }
}

/// Lowercase, trimmed, without leading `@`
pub fn normalize_username(raw: &str) -> String {
    raw.trim().trim_start_matches('@').trim().to_lowercase()
}

/// Normalize, drop empties and case-insensitive duplicates, keep first-seen order
fn dedupe<'a>(names: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| normalize_username(name))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

/// Built-in usernames injected at construction.
///
/// Privileged seeds are merged into the admin list on every load and can never
/// be removed. Restricted seeds only initialize the restricted file the first
/// time it is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSeeds {
    privileged: Vec<String>,
    restricted: Vec<String>,
}

impl RoleSeeds {
    pub fn new(privileged: Vec<String>, restricted: Vec<String>) -> Self {
        let privileged = dedupe(&privileged);
        // A built-in admin can never start out restricted
        let restricted = dedupe(&restricted)
            .into_iter()
            .filter(|name| !privileged.contains(name))
            .collect();
        Self {
            privileged,
            restricted,
        }
    }

    pub fn privileged(&self) -> &[String] {
        &self.privileged
    }

    pub fn restricted(&self) -> &[String] {
        &self.restricted
    }

    pub fn is_privileged_seed(&self, normalized: &str) -> bool {
        self.privileged.iter().any(|name| name == normalized)
    }
}

pub struct RoleRegistry {
    store: SharedStore,
    privileged_path: PathBuf,
    restricted_path: PathBuf,
    seeds: RoleSeeds,
}

impl RoleRegistry {
    pub fn new(
        store: SharedStore,
        privileged_path: impl Into<PathBuf>,
        restricted_path: impl Into<PathBuf>,
        seeds: RoleSeeds,
    ) -> Self {
        Self {
            store,
            privileged_path: privileged_path.into(),
            restricted_path: restricted_path.into(),
            seeds,
        }
    }

    pub fn seeds(&self) -> &RoleSeeds {
        &self.seeds
    }

    fn path(&self, set: RoleSet) -> &Path {
        match set {
            RoleSet::Privileged => &self.privileged_path,
            RoleSet::Restricted => &self.restricted_path,
        }
    }

    /// Current members of `set`, normalized and unique
    pub fn load(&self, set: RoleSet) -> Vec<String> {
        match set {
            RoleSet::Privileged => {
                let persisted: Vec<String> = store::load_json(self.store.as_ref(), self.path(set));
                dedupe(self.seeds.privileged.iter().chain(persisted.iter()))
            }
            RoleSet::Restricted => {
                // Admins win: a name on both lists is treated as privileged only
                let privileged = self.load(RoleSet::Privileged);
                let path = self.path(set);
                if !self.store.exists(path) {
                    let seeded: Vec<String> = self
                        .seeds
                        .restricted
                        .iter()
                        .filter(|name| !privileged.contains(*name))
                        .cloned()
                        .collect();
                    match store::save_json(self.store.as_ref(), path, &seeded) {
                        Ok(()) => info!(
                            "Initialized {} with {} legacy restricted users",
                            path.display(),
                            seeded.len()
                        ),
                        Err(e) => warn!("Could not initialize {}: {e:#}", path.display()),
                    }
                    return seeded;
                }
                let persisted: Vec<String> = store::load_json(self.store.as_ref(), path);
                let mut members = dedupe(&persisted);
                members.retain(|name| !privileged.contains(name));
                members
            }
        }
    }

    pub fn list_all(&self, set: RoleSet) -> Vec<String> {
        self.load(set)
    }

    pub fn is_member(&self, set: RoleSet, username: &str) -> bool {
        let name = normalize_username(username);
        if name.is_empty() {
            return false;
        }
        self.load(set).contains(&name)
    }

    /// Add `username` to `set`, taking it off the opposing list first
    pub fn add(&self, set: RoleSet, username: &str) -> Outcome {
        let name = normalize_username(username);
        if name.is_empty() {
            return Outcome::fail("❌ Please provide a username.");
        }

        if set == RoleSet::Restricted && self.seeds.is_privileged_seed(&name) {
            return Outcome::fail(format!(
                "❌ @{name} is a built-in admin and cannot be restricted."
            ));
        }

        let mut members = self.load(set);
        if members.contains(&name) {
            return Outcome::fail(format!("ℹ️ @{name} is already {}.", set.member_phrase()));
        }

        let opposite = set.opposite();
        let opposing = self.load(opposite);
        let was_opposing = opposing.contains(&name);

        if was_opposing {
            let remaining: Vec<String> = opposing.iter().filter(|n| **n != name).cloned().collect();
            if let Err(outcome) = self.save(opposite, &remaining) {
                return outcome;
            }
        }

        members.push(name.clone());
        if let Err(outcome) = self.save(set, &members) {
            if was_opposing {
                if let Err(e) = store::save_json(self.store.as_ref(), self.path(opposite), &opposing)
                {
                    error!("Failed to restore {opposite} list after aborted update: {e:#}");
                }
            }
            return outcome;
        }

        info!("Added @{name} to {set}{}", if was_opposing { " (moved)" } else { "" });
        let message = match (set, was_opposing) {
            (RoleSet::Privileged, false) => format!("✅ @{name} is now an admin."),
            (RoleSet::Privileged, true) => {
                format!("✅ @{name} is now an admin and was removed from the restricted list.")
            }
            (RoleSet::Restricted, false) => format!("✅ @{name} is now restricted."),
            (RoleSet::Restricted, true) => {
                format!("✅ @{name} is now restricted and is no longer an admin.")
            }
        };
        Outcome::ok(message)
    }

    pub fn remove(&self, set: RoleSet, username: &str) -> Outcome {
        let name = normalize_username(username);
        if name.is_empty() {
            return Outcome::fail("❌ Please provide a username.");
        }

        if set == RoleSet::Privileged && self.seeds.is_privileged_seed(&name) {
            return Outcome::fail(format!(
                "❌ @{name} is a built-in admin and cannot be removed."
            ));
        }

        let members = self.load(set);
        if !members.contains(&name) {
            return Outcome::fail(format!("❌ @{name} is not {}.", set.member_phrase()));
        }

        let remaining: Vec<String> = members.into_iter().filter(|n| *n != name).collect();
        if let Err(outcome) = self.save(set, &remaining) {
            return outcome;
        }

        info!("Removed @{name} from {set}");
        Outcome::ok(format!("✅ @{name} is no longer {}.", set.member_phrase()))
    }

    /// Members of `set` as a bulleted block for display
    pub fn list_formatted(&self, set: RoleSet) -> String {
        let members = self.load(set);
        let (title, empty) = match set {
            RoleSet::Privileged => ("👑 **Admins**", "No admins configured."),
            RoleSet::Restricted => ("🚫 **Restricted users**", "No restricted users."),
        };
        if members.is_empty() {
            return empty.to_string();
        }

        let mut text = format!("{title} ({})", members.len());
        for name in &members {
            text.push_str(&format!("\n• @{name}"));
            if set == RoleSet::Privileged && self.seeds.is_privileged_seed(name) {
                text.push_str(" (built-in)");
            }
        }
        text
    }

    fn save(&self, set: RoleSet, members: &[String]) -> Result<(), Outcome> {
        store::save_json(self.store.as_ref(), self.path(set), members).map_err(|e| {
            error!("Failed to save {set} list: {e:#}");
            Outcome::fail("❌ Could not save the user list. Please try again.")
        })
    }
}
