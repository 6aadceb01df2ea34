//! Messenger Bot - Main entry point.

use anyhow::Context;
use messenger_bot::commands::standard_handlers;
use messenger_bot::config::LogFormat;
use messenger_bot::{
    AppResult, Bot, BotState, CommandCatalog, CommandRouter, Config, Stores, WelcomeFlow,
};
use messenger_client::{ChatApi, EventReceiver, MessengerClient};
use std::sync::Arc;
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level, config.bot.log_format);

    info!("Starting Messenger Bot...");

    let catalog = Arc::new(CommandCatalog::load(&config.storage.commands_path).await?);
    info!("Loaded {} catalog entries", catalog.len());

    let app_state = config.messenger.load_app_state()?;

    // Health check, then log in
    let probe = MessengerClient::new(&config.messenger.service_url, "")
        .context("Failed to create messenger client")?;
    if !probe.health_check().await {
        error!("Messenger bridge not reachable at {}", config.messenger.service_url);
        return Err(anyhow::anyhow!("Messenger bridge not reachable").into());
    }
    info!("Messenger bridge healthy");

    let client = MessengerClient::login(&config.messenger.service_url, &app_state)
        .await
        .context("Login failed")?;
    let bot_id = client.user_id().to_string();

    let chat: Arc<dyn ChatApi> = Arc::new(client.clone());
    let stores = Stores::open(&config.storage);
    let state = Arc::new(BotState::new());

    let router = CommandRouter::new(
        chat.clone(),
        catalog,
        state.clone(),
        stores.mutes.clone(),
        bot_id.clone(),
    )
    .with_handlers(standard_handlers(chat.clone(), &stores, state, &bot_id));
    info!("Registered {} command handlers", router.handler_count());

    let welcome = WelcomeFlow::new(chat, stores.bans.clone(), &config.storage.temp_dir, bot_id)?;
    let bot = Arc::new(Bot::new(router, welcome));

    info!("Listening for events...");

    let receiver = EventReceiver::new(client, config.messenger.poll_interval);
    let mut stream = Box::pin(receiver.stream());

    // Main event loop
    loop {
        tokio::select! {
            Some(event) = stream.next() => {
                let bot = bot.clone();
                tokio::spawn(async move {
                    bot.handle_event(event).await;
                });
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}
