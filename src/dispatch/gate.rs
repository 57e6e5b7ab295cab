//! The command gate: cooldowns and exclusive sessions.
//!
//! Every gambling command passes through here before its handler runs. The
//! gate answers two questions atomically against the shared store: "has this
//! user's cooldown for this command elapsed?" and "does this user already have
//! an exclusive session in flight?". Both must hold across every bot instance,
//! so the store is the source of truth; the local `TtlCache` only short-cuts
//! repeat rejections (double-clicks) without a round-trip.
//!
//! Per (user, guild) exclusive slot the state machine is
//! `FREE -> HELD(token, command, expiry) -> FREE`, transitioning back on
//! token-guarded release or TTL expiry. Nothing else is a valid transition.

use crate::error::BotResult;
use crate::services::cache::TtlCache;
use crate::services::locks::LockStore;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, PartialEq, Eq)]
pub enum CooldownDecision {
    Reserved,
    Blocked { remaining: Duration },
}

#[derive(Debug)]
pub enum SessionDecision {
    Granted(SessionToken),
    /// Another session is active; `holder` is the command that owns it.
    Busy { holder: String },
}

/// Proof of session ownership. The wrapped value is what the store holds for
/// the session key; release only succeeds while the store still holds exactly
/// this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct CommandGate {
    store: Arc<dyn LockStore>,
    cooldown_cache: TtlCache<String, Instant>,
}

impl CommandGate {
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self {
            store,
            cooldown_cache: TtlCache::new(),
        }
    }

    fn cooldown_key(user: u64, guild: u64, command: &str) -> String {
        format!("cd:{guild}:{user}:{command}")
    }

    fn session_key(user: u64, guild: u64) -> String {
        format!("session:{guild}:{user}")
    }

    /// Atomically check-and-set the cooldown for (user, guild, command).
    /// Concurrent invocations race on the store's conditional write, so at
    /// most one caller is ever `Reserved` per window.
    pub async fn reserve_cooldown(
        &self,
        user: u64,
        guild: u64,
        command: &str,
        ttl: Duration,
    ) -> BotResult<CooldownDecision> {
        let key = Self::cooldown_key(user, guild, command);

        // Fast path: a locally cached deadline rejects without a round-trip.
        if let Some(deadline) = self.cooldown_cache.get(&key).await {
            if let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
                if !remaining.is_zero() {
                    return Ok(CooldownDecision::Blocked { remaining });
                }
            }
        }

        if self.store.set_nx_px(&key, "1", ttl).await? {
            self.cooldown_cache
                .insert(key, Instant::now() + ttl, ttl)
                .await;
            return Ok(CooldownDecision::Reserved);
        }

        // Lost the race (or the window is simply still open): report how long
        // is left. The key may expire between SET and PTTL; treat that as a
        // near-zero wait rather than retrying.
        let remaining = self
            .store
            .pttl(&key)
            .await?
            .unwrap_or(Duration::from_millis(1));
        self.cooldown_cache
            .insert(key, Instant::now() + remaining, remaining)
            .await;
        Ok(CooldownDecision::Blocked { remaining })
    }

    /// Waive a cooldown that was reserved for an invocation that turned out to
    /// be a usage error, so a typo does not cost the user the window.
    pub async fn clear_cooldown(&self, user: u64, guild: u64, command: &str) -> BotResult<()> {
        let key = Self::cooldown_key(user, guild, command);
        self.cooldown_cache.remove(&key).await;
        self.store.del(&key).await
    }

    /// Remaining wait for (user, guild, command), if any. Read-only; used by
    /// the `cooldowns` overview command.
    pub async fn cooldown_remaining(
        &self,
        user: u64,
        guild: u64,
        command: &str,
    ) -> BotResult<Option<Duration>> {
        self.store
            .pttl(&Self::cooldown_key(user, guild, command))
            .await
    }

    /// Take the exclusive slot for (user, guild). Fails while any other
    /// session is HELD and unexpired, naming the blocking command.
    pub async fn acquire_session(
        &self,
        user: u64,
        guild: u64,
        command: &str,
        ttl: Duration,
    ) -> BotResult<SessionDecision> {
        let key = Self::session_key(user, guild);
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        // Command names never contain ':', so the holder is recoverable from
        // the stored value when reporting a conflict.
        let value = format!("{command}:{token}");

        if self.store.set_nx_px(&key, &value, ttl).await? {
            return Ok(SessionDecision::Granted(SessionToken(value)));
        }
        match self.store.get(&key).await? {
            Some(held) => {
                let holder = held
                    .split_once(':')
                    .map(|(name, _)| name.to_string())
                    .unwrap_or(held);
                Ok(SessionDecision::Busy { holder })
            }
            // Expired between SET and GET: one more attempt, then give up.
            // Acquisition failures are never retried beyond this.
            None => {
                if self.store.set_nx_px(&key, &value, ttl).await? {
                    Ok(SessionDecision::Granted(SessionToken(value)))
                } else {
                    Ok(SessionDecision::Busy {
                        holder: "another command".to_string(),
                    })
                }
            }
        }
    }

    /// Release the exclusive slot, but only if `token` still owns it. A slow
    /// handler whose session expired must not release a newer session that
    /// was acquired since; the token guard makes that release a no-op.
    /// Returns whether a release actually happened.
    pub async fn release_session(
        &self,
        user: u64,
        guild: u64,
        token: &SessionToken,
    ) -> BotResult<bool> {
        self.store
            .del_if_equals(&Self::session_key(user, guild), token.as_str())
            .await
    }

    /// Arm an ad-hoc timed key (e.g. a rob-protection window). Overwrites any
    /// shorter window already present.
    pub async fn arm_timer(&self, key: &str, ttl: Duration) -> BotResult<()> {
        // Plain timed flag, not a lock: last writer wins is fine here.
        self.store.del(key).await?;
        self.store.set_nx_px(key, "1", ttl).await?;
        Ok(())
    }

    /// Remaining lifetime of an ad-hoc timed key, if it is still armed.
    pub async fn timer_remaining(&self, key: &str) -> BotResult<Option<Duration>> {
        self.store.pttl(key).await
    }
}
