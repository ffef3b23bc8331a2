use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::service::signup::coordinator::SignupCoordinator;

/// Starts the Discord bot in a blocking manner
///
/// This function creates and starts the Discord bot client. It should be called
/// from within a tokio::spawn task since it will block until the bot shuts down.
///
/// # Arguments
/// - `config` - Application configuration
/// - `coordinator` - Signup coordinator shared with the HTTP server
///
/// # Returns
/// - `Ok(())` if the bot starts and runs successfully
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(
    config: &Config,
    coordinator: Arc<SignupCoordinator>,
) -> Result<(), AppError> {
    // Configure gateway intents - what events the bot will receive
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES;

    let handler = Handler::new(coordinator);

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Start the bot (this blocks until shutdown)
    client.start().await?;

    Ok(())
}
