//! Command handler trait and invocation types
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Per-command access levels
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use uuid::Uuid;

use super::context::CommandContext;
use crate::core::{chunk_reply, Outcome, Tone};

/// Who may run a command. Restricted users may run nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Everyone,
    Admin,
}

/// A parsed command, independent of how it arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub argument: String,
    pub username: String,
    pub request_id: Uuid,
}

impl Invocation {
    pub fn new(command: &str, argument: &str, username: &str) -> Self {
        Self {
            command: command.trim().to_lowercase(),
            argument: argument.trim().to_string(),
            username: username.to_string(),
            request_id: Uuid::new_v4(),
        }
    }
}

/// Pre-formatted reply text plus its accent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub tone: Tone,
}

impl Reply {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Failure,
        }
    }

    /// Text split into sendable pieces
    pub fn chunks(&self) -> Vec<String> {
        chunk_reply(&self.text)
    }
}

impl From<Outcome> for Reply {
    fn from(outcome: Outcome) -> Self {
        if outcome.success {
            Reply::success(outcome.message)
        } else {
            Reply::failure(outcome.message)
        }
    }
}

/// Trait for command handlers
///
/// Each handler serves one or more command names and is registered with a
/// `CommandRegistry`. Handlers only see parsed arguments; Discord plumbing
/// stays in the binary.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// impl CommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     fn handle(&self, _ctx: &CommandContext, _invocation: &Invocation) -> Result<Reply> {
///         Ok(Reply::info("Pong!"))
///     }
/// }
/// ```
pub trait CommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Access level for one of this handler's commands
    fn access(&self, _command: &str) -> Access {
        Access::Everyone
    }

    fn handle(&self, ctx: &CommandContext, invocation: &Invocation) -> Result<Reply>;
}
