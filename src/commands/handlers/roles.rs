//! Role command handlers
//!
//! Handles: admins, addadmin, removeadmin, restricted, restrict, unrestrict
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use regex::Regex;

use crate::commands::context::CommandContext;
use crate::commands::handler::{Access, CommandHandler, Invocation, Reply};
use crate::features::roles::{normalize_username, RoleSet};

/// Discord usernames: letters, digits, `_` and `.`, optionally typed with `@`
const USERNAME_PATTERN: &str = r"^@?[A-Za-z0-9_.]{2,32}$";

/// Handler for admin and restricted list management
pub struct RolesHandler;

impl CommandHandler for RolesHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &[
            "admins",
            "addadmin",
            "removeadmin",
            "restricted",
            "restrict",
            "unrestrict",
        ]
    }

    fn access(&self, _command: &str) -> Access {
        Access::Admin
    }

    fn handle(&self, ctx: &CommandContext, invocation: &Invocation) -> Result<Reply> {
        let reply = match invocation.command.as_str() {
            "admins" => Reply::info(ctx.roles.list_formatted(RoleSet::Privileged)),
            "restricted" => Reply::info(ctx.roles.list_formatted(RoleSet::Restricted)),
            "addadmin" => self.handle_change(ctx, invocation, RoleSet::Privileged, true)?,
            "removeadmin" => self.handle_change(ctx, invocation, RoleSet::Privileged, false)?,
            "restrict" => self.handle_change(ctx, invocation, RoleSet::Restricted, true)?,
            "unrestrict" => self.handle_change(ctx, invocation, RoleSet::Restricted, false)?,
            _ => Reply::failure("Unknown command"),
        };
        Ok(reply)
    }
}

impl RolesHandler {
    fn handle_change(
        &self,
        ctx: &CommandContext,
        invocation: &Invocation,
        set: RoleSet,
        add: bool,
    ) -> Result<Reply> {
        let username = invocation.argument.trim();
        if username.is_empty() {
            return Ok(Reply::failure(format!(
                "❌ Usage: /{} <username>",
                invocation.command
            )));
        }

        let pattern = Regex::new(USERNAME_PATTERN)?;
        if !pattern.is_match(username) {
            return Ok(Reply::failure(format!(
                "❌ '{username}' is not a valid username. Type the name, not a mention."
            )));
        }

        let is_self = normalize_username(username) == normalize_username(&invocation.username);
        if add && set == RoleSet::Restricted && is_self {
            return Ok(Reply::failure("❌ You cannot restrict yourself."));
        }

        let outcome = if add {
            ctx.roles.add(set, username)
        } else {
            ctx.roles.remove(set, username)
        };
        Ok(Reply::from(outcome))
    }
}
