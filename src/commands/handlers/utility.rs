//! Utility command handlers
//!
//! Handles: help
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, Invocation, Reply};
use crate::features::get_bot_version;
use crate::features::suggestion::SUGGESTION_TTL_HOURS;

/// Handler for utility commands
pub struct UtilityHandler;

impl CommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["help"]
    }

    fn handle(&self, ctx: &CommandContext, invocation: &Invocation) -> Result<Reply> {
        let mut text = format!(
            "**Available Commands:**\n\
            `/food` - Today's suggestion (kept for {SUGGESTION_TTL_HOURS} hours)\n\
            `/foods` - Show the food list"
        );

        if ctx.is_admin(&invocation.username) {
            text.push_str(
                "\n\n**Admin Commands:**\n\
                `/newfood` - Pick a new suggestion now\n\
                `/clearfood` - Forget the current suggestion\n\
                `/addfood <food>` - Add a food to the list\n\
                `/removefood <number or food>` - Remove a food by list number or name\n\
                `/admins` - Show admins\n\
                `/addadmin <username>` - Make someone an admin\n\
                `/removeadmin <username>` - Revoke admin rights\n\
                `/restricted` - Show restricted users\n\
                `/restrict <username>` - Stop someone from using the bot\n\
                `/unrestrict <username>` - Allow someone again",
            );
        }

        text.push_str(&format!("\n\n_lunchbot v{}_", get_bot_version()));
        Ok(Reply::info(text))
    }
}
