//! Catalog command handlers
//!
//! Handles: foods, addfood, removefood
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: /removefood accepts a list number or a name
//! - 1.0.0: Initial release

use anyhow::Result;

use crate::commands::context::CommandContext;
use crate::commands::handler::{Access, CommandHandler, Invocation, Reply};

/// Handler for viewing and editing the food list
pub struct CatalogHandler;

impl CommandHandler for CatalogHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["foods", "addfood", "removefood"]
    }

    fn access(&self, command: &str) -> Access {
        match command {
            "foods" => Access::Everyone,
            _ => Access::Admin,
        }
    }

    fn handle(&self, ctx: &CommandContext, invocation: &Invocation) -> Result<Reply> {
        let reply = match invocation.command.as_str() {
            "foods" => Reply::info(ctx.catalog.list_formatted(true)),
            "addfood" => self.handle_add(ctx, &invocation.argument),
            "removefood" => self.handle_remove(ctx, &invocation.argument),
            _ => Reply::failure("Unknown command"),
        };
        Ok(reply)
    }
}

impl CatalogHandler {
    /// Handle /addfood
    fn handle_add(&self, ctx: &CommandContext, argument: &str) -> Reply {
        let item = argument.trim();
        if item.is_empty() {
            return Reply::failure("❌ Usage: /addfood <food>");
        }

        if item.contains(['\n', '\r']) {
            return Reply::failure("❌ Please add one food at a time, on a single line.");
        }

        if ctx.catalog.add(item) {
            return Reply::success(format!("✅ Added '{item}' to the food list."));
        }

        if ctx.catalog.load_all().iter().any(|existing| existing == item) {
            Reply::failure(format!("ℹ️ '{item}' is already in the food list."))
        } else {
            Reply::failure("❌ Could not save the food list. Please try again.")
        }
    }

    /// Handle /removefood
    fn handle_remove(&self, ctx: &CommandContext, argument: &str) -> Reply {
        if argument.trim().is_empty() {
            return Reply::failure("❌ Usage: /removefood <number or food>");
        }
        Reply::from(ctx.catalog.remove(argument))
    }
}
