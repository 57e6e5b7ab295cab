//! Startup configuration loaded from the environment (via `.env` in dev).

use crate::error::{BotError, BotResult};
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub redis_url: String,
    pub default_prefix: String,
}

impl Config {
    pub fn from_env() -> BotResult<Self> {
        Ok(Self {
            discord_token: require("DISCORD_TOKEN")?,
            database_url: require("DATABASE_URL")?,
            redis_url: require("REDIS_URL")?,
            default_prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),
        })
    }
}

fn require(name: &str) -> BotResult<String> {
    env::var(name).map_err(|_| BotError::Config(format!("{name} is not set")))
}
