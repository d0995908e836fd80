//! Suggestion command handlers
//!
//! Handles: food, newfood, clearfood
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use chrono::Utc;
use log::error;

use crate::commands::context::CommandContext;
use crate::commands::handler::{Access, CommandHandler, Invocation, Reply};
use crate::features::catalog::EMPTY_CATALOG_MESSAGE;

/// Handler for the daily suggestion
pub struct FoodHandler;

impl CommandHandler for FoodHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["food", "newfood", "clearfood"]
    }

    fn access(&self, command: &str) -> Access {
        match command {
            "food" => Access::Everyone,
            _ => Access::Admin,
        }
    }

    fn handle(&self, ctx: &CommandContext, invocation: &Invocation) -> Result<Reply> {
        match invocation.command.as_str() {
            "food" => Ok(self.handle_food(ctx, false)),
            "newfood" => Ok(self.handle_food(ctx, true)),
            "clearfood" => Ok(self.handle_clear(ctx, invocation)),
            _ => Ok(Reply::failure("Unknown command")),
        }
    }
}

impl FoodHandler {
    /// Handle /food and /newfood
    fn handle_food(&self, ctx: &CommandContext, force_new: bool) -> Reply {
        let now = Utc::now();
        let Some(food) = ctx
            .suggestions
            .get_or_select_at(&ctx.catalog, force_new, now)
        else {
            return Reply::failure(EMPTY_CATALOG_MESSAGE);
        };

        let mut text = if force_new {
            format!("🎲 New pick: **{food}**!")
        } else {
            format!("🍽️ How about **{food}**?")
        };

        // Only count down when the stored entry is the pick we just returned
        let ttl = ctx.suggestions.ttl();
        let stored = ctx
            .suggestions
            .current()
            .filter(|entry| entry.food == food && entry.is_fresh(now, ttl));
        if let Some(entry) = stored {
            let left = entry.remaining(now, ttl);
            text.push_str(&format!(
                "\n_Next suggestion in {}h {}m._",
                left.num_hours(),
                left.num_minutes() % 60
            ));
        }
        Reply::info(text)
    }

    /// Handle /clearfood
    fn handle_clear(&self, ctx: &CommandContext, invocation: &Invocation) -> Reply {
        match ctx.suggestions.clear() {
            Ok(()) => Reply::success("🧹 Suggestion cleared. The next /food picks something new."),
            Err(e) => {
                error!("[{}] Failed to clear suggestion: {e:#}", invocation.request_id);
                Reply::failure("❌ Could not clear the suggestion. Please try again.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DocumentStore, MemoryStore, StatePaths, Tone};
    use crate::features::roles::RoleSeeds;
    use anyhow::anyhow;
    use std::path::Path;
    use std::sync::Arc;

    fn context() -> CommandContext {
        CommandContext::new(
            MemoryStore::shared(),
            &StatePaths::in_dir("data"),
            RoleSeeds::default(),
        )
    }

    fn run(ctx: &CommandContext, command: &str) -> Reply {
        FoodHandler
            .handle(ctx, &Invocation::new(command, "", "alice"))
            .unwrap()
    }

    #[test]
    fn test_access_levels() {
        assert_eq!(FoodHandler.access("food"), Access::Everyone);
        assert_eq!(FoodHandler.access("newfood"), Access::Admin);
        assert_eq!(FoodHandler.access("clearfood"), Access::Admin);
    }

    #[test]
    fn test_food_with_empty_catalog() {
        let ctx = context();
        assert_eq!(run(&ctx, "food"), Reply::failure(EMPTY_CATALOG_MESSAGE));
    }

    #[test]
    fn test_food_is_cached() {
        let ctx = context();
        ctx.catalog.add("Pho");

        let first = run(&ctx, "food");
        assert_eq!(first.tone, Tone::Info);
        assert!(first.text.starts_with("🍽️ How about **Pho**?"));
        assert!(first.text.contains("Next suggestion in 1"));

        ctx.catalog.add("Ramen");
        assert!(run(&ctx, "food").text.contains("**Pho**"));
    }

    /// Reads pass through, writes fail
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
    fn test_newfood_skips_countdown_when_cache_unsaved() {
        let paths = StatePaths::in_dir("data");
        let inner = MemoryStore::new();
        inner.write(&paths.catalog, "Pho\n").unwrap();
        let earlier = (Utc::now() - chrono::Duration::hours(1)).to_rfc3339();
        inner
            .write(
                &paths.suggestion_cache,
                &format!(r#"{{"food": "Ramen", "timestamp": "{earlier}"}}"#),
            )
            .unwrap();

        let ctx = CommandContext::new(
            Arc::new(ReadOnlyStore(inner)),
            &paths,
            RoleSeeds::default(),
        );
        let reply = run(&ctx, "newfood");
        assert_eq!(reply, Reply::info("🎲 New pick: **Pho**!"));
        assert_eq!(ctx.suggestions.current().unwrap().food, "Ramen");
    }

    #[test]
    fn test_newfood_and_clear() {
        let ctx = context();
        ctx.catalog.add("Pho");

        assert!(run(&ctx, "newfood").text.starts_with("🎲 New pick: **Pho**"));
        assert!(ctx.suggestions.current().is_some());

        assert_eq!(run(&ctx, "clearfood").tone, Tone::Success);
        assert!(ctx.suggestions.current().is_none());
    }
}
