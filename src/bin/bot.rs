use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use lunchbot::commands::{
    invocation_from_interaction, parse_text_command, register_global_commands,
    register_guild_commands, CommandContext, CommandRegistry, Invocation, Reply,
};
use lunchbot::core::{fill_reply_embed, reply_embed, Config, FileStore};

struct Handler {
    // One command at a time: every read-modify-write finishes before the next starts
    context: Arc<Mutex<CommandContext>>,
    registry: CommandRegistry,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(context: CommandContext, registry: CommandRegistry, guild_id: Option<GuildId>) -> Self {
        Handler {
            context: Arc::new(Mutex::new(context)),
            registry,
            guild_id,
        }
    }

    async fn run(&self, invocation: &Invocation) -> Reply {
        let context = self.context.lock().await;
        self.registry.dispatch(&context, invocation)
    }

    async fn respond_to_interaction(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let invocation = invocation_from_interaction(command);
        let reply = self.run(&invocation).await;
        let chunks = reply.chunks();

        let mut chunks = chunks.iter();
        if let Some(first) = chunks.next() {
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.embed(|e| fill_reply_embed(e, first, reply.tone))
                        })
                })
                .await?;
        }

        for chunk in chunks {
            command
                .create_followup_message(&ctx.http, |message| {
                    message.set_embed(reply_embed(chunk, reply.tone))
                })
                .await?;
        }

        Ok(())
    }

    async fn respond_to_message(
        &self,
        ctx: &Context,
        msg: &Message,
        invocation: &Invocation,
    ) -> Result<()> {
        let reply = self.run(invocation).await;
        for chunk in reply.chunks() {
            msg.channel_id
                .send_message(&ctx.http, |m| m.set_embed(reply_embed(&chunk, reply.tone)))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let invocation = match parse_text_command(&msg.content, &msg.author.name) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => return,
            Err(e) => {
                error!("Failed to parse message {}: {e}", msg.id);
                return;
            }
        };

        // Ignore "!something" chatter that is not one of our commands
        if !self.registry.contains(&invocation.command) {
            return;
        }

        if let Err(e) = self.respond_to_message(&ctx, &msg, &invocation).await {
            error!(
                "[{}] Error replying to text command '{}': {e}",
                invocation.request_id, invocation.command
            );
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        let registered = match self.guild_id {
            Some(guild_id) => register_guild_commands(&ctx, guild_id).await,
            None => register_global_commands(&ctx).await,
        };
        if let Err(e) = registered {
            error!("Failed to register slash commands: {e}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            if let Err(e) = self.respond_to_interaction(&ctx, &command).await {
                error!(
                    "Error handling slash command '{}': {}",
                    command.data.name, e
                );

                let _ = command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(
                                    "❌ Sorry, I encountered an error processing your command. Please try again.",
                                )
                            })
                    })
                    .await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting lunchbot {}...", lunchbot::features::get_bot_version());
    info!("📄 Catalog: {}", config.paths.catalog.display());
    info!("📄 Suggestion cache: {}", config.paths.suggestion_cache.display());
    info!("📄 Admins: {}", config.paths.privileged.display());
    info!("📄 Restricted: {}", config.paths.restricted.display());
    if config.seeds.privileged().is_empty() {
        warn!("BOT_ADMINS is empty - only admins stored in the admin file can manage the bot");
    }

    let context = CommandContext::new(FileStore::shared(), &config.paths, config.seeds.clone());
    let registry = CommandRegistry::with_default_handlers();
    info!("Registered {} commands", registry.len());

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler::new(context, registry, guild_id);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
