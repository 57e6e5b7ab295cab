use croupier_bot::config::Config;
use croupier_bot::dispatch::{CommandGate, CommandRegistry};
use croupier_bot::error::BotError;
use croupier_bot::handler::Handler;
use croupier_bot::model::AppState;
use croupier_bot::services::locks::RedisLockStore;
use croupier_bot::commands;

use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tokio::sync::RwLock;
use sqlx::postgres::PgPoolOptions;
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    tracing::info!("connected to postgres");

    let redis_client = redis::Client::open(config.redis_url.as_str())?;
    let manager = redis_client.get_connection_manager().await?;
    tracing::info!("connected to redis");

    let app_state = Arc::new(AppState {
        db,
        gate: Arc::new(CommandGate::new(Arc::new(RedisLockStore::new(manager)))),
        registry: Arc::new(CommandRegistry::new(commands::all())),
        prefix: Arc::new(RwLock::new(config.default_prefix.clone())),
        pending_wagers: Arc::new(RwLock::new(HashMap::new())),
    });

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    tracing::info!("starting gateway client");
    client.start().await?;
    Ok(())
}
