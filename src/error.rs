//! Crate-wide error type. Commands and services propagate `BotError` with `?`;
//! the dispatch boundary in `handler` is the only place errors are swallowed
//! (logged and reported to the user as a generic failure).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("lock store error: {0}")]
    LockStore(#[from] redis::RedisError),

    #[error("discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type BotResult<T> = Result<T, BotError>;
