//! # Command System
//!
//! Slash (/) and text (!) command handling. Handlers work on parsed
//! invocations and return pre-formatted replies; the binary relays them.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Text commands alongside slash commands
//! - 1.0.0: Initial release with handler trait, context and registry

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;
pub mod text;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::{Access, CommandHandler, Invocation, Reply};
pub use registry::CommandRegistry;

// Re-export commonly used items from submodules
pub use slash::{
    create_slash_commands, get_string_option, invocation_from_interaction,
    register_global_commands, register_guild_commands,
};
pub use text::parse_text_command;
