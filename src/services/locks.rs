//! The shared key/value store behind cooldowns, exclusive sessions and ad-hoc
//! timed keys (e.g. rob protection windows).
//!
//! `LockStore` is the seam: production uses Redis through a
//! `ConnectionManager`, tests use `MemoryLockStore`. Every bot instance in a
//! rolling deploy talks to the same Redis, which is why the store (not any
//! in-process map) is authoritative.

use crate::error::BotResult;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[async_trait]
pub trait LockStore: Send + Sync {
    /// Conditional write: sets `key` to `value` with expiry `ttl` only if the
    /// key does not exist. Returns whether the write happened.
    async fn set_nx_px(&self, key: &str, value: &str, ttl: Duration) -> BotResult<bool>;

    async fn get(&self, key: &str) -> BotResult<Option<String>>;

    /// Remaining lifetime of `key`, or `None` if it does not exist.
    async fn pttl(&self, key: &str) -> BotResult<Option<Duration>>;

    async fn del(&self, key: &str) -> BotResult<()>;

    /// Deletes `key` only if its current value equals `value`. Returns whether
    /// a delete happened. This is the guard that keeps a stale session holder
    /// from releasing a lock someone else has since acquired.
    async fn del_if_equals(&self, key: &str, value: &str) -> BotResult<bool>;
}

const RELEASE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
else
    return 0
end
"#;

pub struct RedisLockStore {
    manager: ConnectionManager,
    release: redis::Script,
}

impl RedisLockStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self {
            manager,
            release: redis::Script::new(RELEASE_SCRIPT),
        }
    }
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn set_nx_px(&self, key: &str, value: &str, ttl: Duration) -> BotResult<bool> {
        let mut conn = self.manager.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl.as_millis() as u64)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn get(&self, key: &str) -> BotResult<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn pttl(&self, key: &str) -> BotResult<Option<Duration>> {
        let mut conn = self.manager.clone();
        let ms: i64 = redis::cmd("PTTL").arg(key).query_async(&mut conn).await?;
        // -2: no such key, -1: no expiry set (should not happen for our keys).
        if ms < 0 {
            Ok(None)
        } else {
            Ok(Some(Duration::from_millis(ms as u64)))
        }
    }

    async fn del(&self, key: &str) -> BotResult<()> {
        let mut conn = self.manager.clone();
        let _: i64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }

    async fn del_if_equals(&self, key: &str, value: &str) -> BotResult<bool> {
        let mut conn = self.manager.clone();
        let deleted: i64 = self
            .release
            .key(key)
            .arg(value)
            .invoke_async(&mut conn)
            .await?;
        Ok(deleted == 1)
    }
}

/// In-memory stand-in for Redis. Single-process only; used by the test suite
/// and useful for running the bot locally without a cache server.
#[derive(Default)]
pub struct MemoryLockStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn set_nx_px(&self, key: &str, value: &str, ttl: Duration) -> BotResult<bool> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some((_, deadline)) if *deadline > now => Ok(false),
            _ => {
                entries.insert(key.to_string(), (value.to_string(), now + ttl));
                Ok(true)
            }
        }
    }

    async fn get(&self, key: &str) -> BotResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some((value, deadline)) if *deadline > now => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn pttl(&self, key: &str) -> BotResult<Option<Duration>> {
        let entries = self.entries.lock().await;
        let now = Instant::now();
        Ok(entries.get(key).and_then(|(_, deadline)| {
            deadline.checked_duration_since(now).filter(|d| !d.is_zero())
        }))
    }

    async fn del(&self, key: &str) -> BotResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn del_if_equals(&self, key: &str, value: &str) -> BotResult<bool> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some((current, deadline)) if *deadline > now && current == value => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
