//! Poise framework setup, command registration and client lifecycle.

use crate::{
    bot::{BotData, commands, components},
    config::discord::DiscordConfig,
    core::reply,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Generic reply for a command that failed with a storage or Discord error.
fn command_failure(name: &str) -> reply::Reply {
    reply::failure(&format!("executar /{name}"))
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let name = &ctx.command().name;
            error!("Error in command `{name}`: {error:?}");
            let failure = command_failure(name);
            if let Err(e) = ctx.send(components::create_reply(&failure)).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn command_list() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::add(),
        commands::remove(),
        commands::list(),
        commands::check(),
        commands::help(),
        commands::ping(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
///
/// Ctrl-C shuts the shards down, which makes this function return so the caller can
/// tear down the database.
#[instrument(skip_all)]
pub async fn run_bot(config: DiscordConfig, data: BotData) -> Result<()> {
    let dev_guild_id = config.dev_guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: command_list(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                let commands = &framework.options().commands;
                if let Some(guild_id) = dev_guild_id {
                    let guild_id = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                    info!("Registered commands in guild {guild_id}");
                } else {
                    poise::builtins::register_globally(ctx, commands).await?;
                    info!("Registered commands globally");
                }
                Ok(data)
            })
        })
        .build();

    // Message content is needed to read the quantity reply of `/remove`
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .application_id(serenity::ApplicationId::new(config.application_id))
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested, stopping shards...");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;

    info!("Bot client stopped");
    Ok(())
}
