//! Shared application state stored in Serenity's global context.

use crate::dispatch::{CommandGate, CommandRegistry, SessionToken};
use serenity::model::id::{MessageId, UserId};
use serenity::prelude::TypeMapKey;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A wager challenge waiting on the target's accept/decline click. The entry
/// is removed by the click or by the per-wager expiry task; the gate session's
/// TTL bounds the wait either way.
#[derive(Debug, Clone)]
pub struct PendingWager {
    pub challenger: UserId,
    pub target: UserId,
    pub guild: u64,
    pub amount: i64,
    pub session: SessionToken,
}

/// The central, shared state of the application. An `Arc<AppState>` lives in
/// the global context for access from any command or event handler.
pub struct AppState {
    /// The connection pool for the PostgreSQL database.
    pub db: PgPool,
    /// Cooldown and exclusive-session coordinator backed by the shared store.
    pub gate: Arc<CommandGate>,
    /// All chat commands, indexed by name and alias.
    pub registry: Arc<CommandRegistry>,
    /// The current command prefix, changeable at runtime by administrators.
    pub prefix: Arc<RwLock<String>>,
    /// Wager challenges awaiting a button click, keyed by challenge message.
    pub pending_wagers: Arc<RwLock<HashMap<MessageId, PendingWager>>>,
}

impl AppState {
    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
