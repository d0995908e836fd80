//! Command handler registry and dispatch
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Dispatch with role checks and error replies
//! - 1.0.0: Initial implementation for handler dispatch

use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::context::CommandContext;
use super::handler::{Access, CommandHandler, Invocation, Reply};

pub const RESTRICTED_MESSAGE: &str = "🚫 You are not allowed to use this bot.";
pub const ADMIN_ONLY_MESSAGE: &str = "🔒 This command is only available to admins.";
pub const INTERNAL_ERROR_MESSAGE: &str =
    "❌ Sorry, something went wrong while handling that command. Please try again.";

/// Registry mapping command names to handlers
///
/// Multiple command names can map to the same handler if they share logic.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(PingHandler));
///
/// let reply = registry.dispatch(&ctx, &Invocation::new("ping", "", "alice"));
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every built-in handler
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        for handler in super::handlers::create_all_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler for its declared command names
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Get handler for a command name
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get all registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }

    /// Run one command to completion and produce the reply to send.
    ///
    /// Restricted users are refused before anything else; admin-only
    /// commands are refused for everyone not on the admin list.
    pub fn dispatch(&self, ctx: &CommandContext, invocation: &Invocation) -> Reply {
        let request_id = invocation.request_id;
        let command = invocation.command.as_str();

        let Some(handler) = self.get(command) else {
            warn!("[{request_id}] Unknown command '{command}'");
            return Reply::failure(format!("❓ Unknown command /{command}. Try /help."));
        };

        if ctx.is_restricted(&invocation.username) {
            info!(
                "[{request_id}] Refused /{command} for restricted user {}",
                invocation.username
            );
            return Reply::failure(RESTRICTED_MESSAGE);
        }

        if handler.access(command) == Access::Admin && !ctx.is_admin(&invocation.username) {
            info!(
                "[{request_id}] Refused admin command /{command} for {}",
                invocation.username
            );
            return Reply::failure(ADMIN_ONLY_MESSAGE);
        }

        info!(
            "[{request_id}] /{command} from {} {:?}",
            invocation.username, invocation.argument
        );
        match handler.handle(ctx, invocation) {
            Ok(reply) => reply,
            Err(e) => {
                error!("[{request_id}] /{command} failed: {e:#}");
                Reply::failure(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
