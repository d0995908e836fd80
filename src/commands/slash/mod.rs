//! # Slash Commands (/)
//!
//! Discord slash command definitions and registration.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Role management commands
//! - 1.0.0: Initial release with suggestion and catalog commands

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::{Command, CommandOptionType};
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use super::handler::Invocation;

/// One slash command with at most one string option
struct SlashDef {
    name: &'static str,
    description: &'static str,
    option: Option<(&'static str, &'static str)>,
}

const SLASH_COMMANDS: &[SlashDef] = &[
    SlashDef {
        name: "help",
        description: "Show what this bot can do",
        option: None,
    },
    SlashDef {
        name: "food",
        description: "What should we eat? Same answer for 12 hours",
        option: None,
    },
    SlashDef {
        name: "newfood",
        description: "Pick a new food suggestion right now",
        option: None,
    },
    SlashDef {
        name: "clearfood",
        description: "Forget the current food suggestion",
        option: None,
    },
    SlashDef {
        name: "foods",
        description: "Show the food list",
        option: None,
    },
    SlashDef {
        name: "addfood",
        description: "Add a food to the list",
        option: Some(("item", "The food to add")),
    },
    SlashDef {
        name: "removefood",
        description: "Remove a food by its list number or name",
        option: Some(("item", "List number from /foods, or the food name")),
    },
    SlashDef {
        name: "admins",
        description: "Show bot admins",
        option: None,
    },
    SlashDef {
        name: "addadmin",
        description: "Make a user a bot admin",
        option: Some(("username", "Discord username")),
    },
    SlashDef {
        name: "removeadmin",
        description: "Revoke a user's admin rights",
        option: Some(("username", "Discord username")),
    },
    SlashDef {
        name: "restricted",
        description: "Show users who may not use the bot",
        option: None,
    },
    SlashDef {
        name: "restrict",
        description: "Stop a user from using the bot",
        option: Some(("username", "Discord username")),
    },
    SlashDef {
        name: "unrestrict",
        description: "Allow a restricted user again",
        option: Some(("username", "Discord username")),
    },
];

fn create_command(def: &SlashDef) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name(def.name).description(def.description);
    if let Some((option_name, option_description)) = def.option {
        command.create_option(|option| {
            option
                .name(option_name)
                .description(option_description)
                .kind(CommandOptionType::String)
                .required(true)
        });
    }
    command
}

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    SLASH_COMMANDS.iter().map(create_command).collect()
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (faster for testing)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Name of the string option a command takes, if any
pub fn option_name(command: &str) -> Option<&'static str> {
    SLASH_COMMANDS
        .iter()
        .find(|def| def.name == command)
        .and_then(|def| def.option)
        .map(|(name, _)| name)
}

/// Turn a slash command interaction into a transport-independent invocation
pub fn invocation_from_interaction(command: &ApplicationCommandInteraction) -> Invocation {
    let argument = option_name(&command.data.name)
        .and_then(|name| get_string_option(&command.data.options, name))
        .unwrap_or_default();
    Invocation::new(&command.data.name, &argument, &command.user.name)
}
